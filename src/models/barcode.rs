//! Scan results and the symbologies they can carry.

use serde::Serialize;
use std::fmt;

/// Symbologies the scanner can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symbology {
    /// Payload from the external 2-D decoder
    #[serde(rename = "QR")]
    Qr,
    /// 13-digit EAN
    #[serde(rename = "EAN13")]
    Ean13,
    /// 8-digit EAN
    #[serde(rename = "EAN8")]
    Ean8,
    /// 12-digit UPC-A
    #[serde(rename = "UPCA")]
    UpcA,
}

impl Symbology {
    /// Number of digits in the data string, `None` for free-form 2-D payloads
    pub fn digit_count(&self) -> Option<usize> {
        match self {
            Symbology::Qr => None,
            Symbology::Ean13 => Some(13),
            Symbology::Ean8 => Some(8),
            Symbology::UpcA => Some(12),
        }
    }

    /// Tag used in logs, `Display` and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Qr => "QR",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::UpcA => "UPCA",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated scan result.
///
/// Only the decoders in this crate construct it, and a linear symbol is only
/// constructed after its check digit verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Barcode {
    symbology: Symbology,
    data: String,
}

impl Barcode {
    pub(crate) fn new(symbology: Symbology, data: String) -> Self {
        Self { symbology, data }
    }

    /// Symbology the data was read as
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Digit string (13/8/12 characters) or the raw 2-D payload
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Take the data string
    pub fn into_data(self) -> String {
        self.data
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbology, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbology_lengths() {
        assert_eq!(Symbology::Ean13.digit_count(), Some(13));
        assert_eq!(Symbology::Ean8.digit_count(), Some(8));
        assert_eq!(Symbology::UpcA.digit_count(), Some(12));
        assert_eq!(Symbology::Qr.digit_count(), None);
    }

    #[test]
    fn test_serialized_names() {
        let code = Barcode::new(Symbology::UpcA, "036000291452".into());
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#"{"symbology":"UPCA","data":"036000291452"}"#);
        assert_eq!(code.to_string(), "UPCA:036000291452");
    }
}
