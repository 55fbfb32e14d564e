//! EAN/UPC element encodings, most significant bit = first module, 1 = bar.
//! Index is the digit value.

/// Left-half odd parity (A set)
pub const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Left-half even parity (B set), EAN-13 only
pub const G_CODES: [u8; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101, 0b0111001, 0b0000101, 0b0010001,
    0b0001001, 0b0010111,
];

/// Right-half codes (C set), all symbologies
pub const R_CODES: [u8; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100, 0b1001110, 0b1010000, 0b1000100,
    0b1001000, 0b1110100,
];

/// EAN-13 leading digit from the parity of the six left digits.
/// Bit 5 is the first left digit, set = G.
pub const LEADING_DIGIT_PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

/// Start and end guard, in modules
pub const EDGE_GUARD: [bool; 3] = [true, false, true];
/// Center guard, in modules
pub const CENTER_GUARD: [bool; 5] = [false, true, false, true, false];

/// Module offset of the left digit field, relative to the start guard
pub const LEFT_DIGITS_OFFSET: usize = 3;
/// Right digit field of EAN-13 and UPC-A
pub const EAN13_RIGHT_DIGITS_OFFSET: usize = 50;
/// Right digit field of EAN-8
pub const EAN8_RIGHT_DIGITS_OFFSET: usize = 36;
/// Every digit spans seven modules
pub const MODULES_PER_DIGIT: usize = 7;

/// Leading digit whose parity pattern is `pattern`
pub fn leading_digit(pattern: u8) -> Option<u8> {
    LEADING_DIGIT_PARITY
        .iter()
        .position(|&p| p == pattern)
        .map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_relationships() {
        for d in 0..10 {
            // R is the complement of L
            assert_eq!(R_CODES[d], !L_CODES[d] & 0x7F);
            // G is R read backwards
            assert_eq!(G_CODES[d], R_CODES[d].reverse_bits() >> 1);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut all: Vec<u8> = L_CODES.iter().chain(&G_CODES).chain(&R_CODES).copied().collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 30);
    }

    #[test]
    fn test_leading_digit_lookup() {
        assert_eq!(leading_digit(0b000000), Some(0));
        assert_eq!(leading_digit(0b010011), Some(4));
        assert_eq!(leading_digit(0b111111), None);
    }
}
