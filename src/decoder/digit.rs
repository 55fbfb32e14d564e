//! 7-module pattern lookup against the L/G/R tables.

use super::sampler::ModulePattern;
use super::tables::{G_CODES, L_CODES, R_CODES};

/// Which tables a digit position may match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    /// Left half, L only (EAN-8, UPC-A)
    LeftOdd,
    /// Left half, L or G (EAN-13)
    LeftAny,
    /// Right half, R only
    Right,
}

/// Encoding variant a digit matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Left odd (A set)
    L,
    /// Left even (B set)
    G,
    /// Right (C set)
    R,
}

/// Whether the match needed the bar/space complement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Bars read as bars
    Normal,
    /// Bars and spaces swapped
    Inverted,
}

/// One digit read from a 7-module pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedDigit {
    /// Digit value, 0-9
    pub value: u8,
    /// Table the pattern matched
    pub parity: Parity,
    /// Whether the complement was needed
    pub polarity: Polarity,
}

/// Stateless lookup of sampled patterns in the code tables
pub struct DigitDecoder;

impl DigitDecoder {
    /// Match a sampled pattern against the tables allowed by `set`.
    ///
    /// Two passes: the pattern as read, then its complement for symbols whose
    /// bars and spaces came out swapped. `None` rejects the candidate.
    pub fn decode(pattern: ModulePattern, set: CodeSet) -> Option<DecodedDigit> {
        let code = pattern.code();
        Self::lookup(code, set, Polarity::Normal)
            .or_else(|| Self::lookup(!code & 0x7F, set, Polarity::Inverted))
    }

    fn lookup(code: u8, set: CodeSet, polarity: Polarity) -> Option<DecodedDigit> {
        let (value, parity) = match set {
            CodeSet::Right => (find(&R_CODES, code)?, Parity::R),
            CodeSet::LeftOdd => (find(&L_CODES, code)?, Parity::L),
            CodeSet::LeftAny => match find(&L_CODES, code) {
                Some(v) => (v, Parity::L),
                None => (find(&G_CODES, code)?, Parity::G),
            },
        };
        Some(DecodedDigit {
            value,
            parity,
            polarity,
        })
    }
}

fn find(table: &[u8; 10], code: u8) -> Option<u8> {
    table.iter().position(|&c| c == code).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(code: u8, set: CodeSet) -> Option<DecodedDigit> {
        DigitDecoder::decode(ModulePattern::from_code(code), set)
    }

    #[test]
    fn test_all_tables_decode() {
        for d in 0..10u8 {
            let l = decode(L_CODES[d as usize], CodeSet::LeftAny).unwrap();
            assert_eq!((l.value, l.parity, l.polarity), (d, Parity::L, Polarity::Normal));

            let g = decode(G_CODES[d as usize], CodeSet::LeftAny).unwrap();
            assert_eq!((g.value, g.parity), (d, Parity::G));

            let r = decode(R_CODES[d as usize], CodeSet::Right).unwrap();
            assert_eq!((r.value, r.parity), (d, Parity::R));
        }
    }

    #[test]
    fn test_g_rejected_without_parity_ambiguity() {
        assert!(decode(G_CODES[3], CodeSet::LeftOdd).is_none());
    }

    #[test]
    fn test_inverted_polarity_retry() {
        let inverted = !R_CODES[7] & 0x7F;
        let digit = decode(inverted, CodeSet::Right).unwrap();
        assert_eq!(digit.value, 7);
        assert_eq!(digit.polarity, Polarity::Inverted);

        let inverted_g = !G_CODES[2] & 0x7F;
        let digit = decode(inverted_g, CodeSet::LeftAny).unwrap();
        assert_eq!((digit.value, digit.parity, digit.polarity), (2, Parity::G, Polarity::Inverted));
    }

    #[test]
    fn test_unmatched_both_polarities() {
        // all-space reads as all-bar when inverted; neither is a digit
        assert!(decode(0b0000000, CodeSet::LeftAny).is_none());
        assert!(decode(0b1111111, CodeSet::Right).is_none());
        assert!(decode(0b0101010, CodeSet::Right).is_none());
    }
}
