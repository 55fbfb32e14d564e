//! GS1 mod-10 check digits.
//!
//! Counting from the right of the payload (the digit just before the check
//! digit is position 1), odd positions weigh 3 and even positions weigh 1.
//! The same rule covers EAN-13, EAN-8 and UPC-A.

/// Check digit for a payload of digit values (0-9)
pub fn gs1_check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// `true` when the last digit is the check digit of the rest
pub fn has_valid_check_digit(digits: &[u8]) -> bool {
    match digits.split_last() {
        Some((&check, payload)) if !payload.is_empty() => gs1_check_digit(payload) == check,
        _ => false,
    }
}

/// 13 digits with a valid check digit
pub fn is_valid_ean13(digits: &[u8]) -> bool {
    digits.len() == 13 && has_valid_check_digit(digits)
}

/// 8 digits with a valid check digit
pub fn is_valid_ean8(digits: &[u8]) -> bool {
    digits.len() == 8 && has_valid_check_digit(digits)
}

/// 12 digits with a valid check digit
pub fn is_valid_upca(digits: &[u8]) -> bool {
    digits.len() == 12 && has_valid_check_digit(digits)
}

/// Parse an ASCII digit string into digit values
pub fn parse_digits(text: &str) -> Option<Vec<u8>> {
    text.bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

pub(crate) fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}
