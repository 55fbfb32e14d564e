//! EAN-13, EAN-8 and UPC-A row decoders.
//!
//! Each decoder reads fixed digit fields relative to the start guard and
//! returns either a checked [`Barcode`] or the first reason it gave up.

use super::checksum::{digits_to_string, is_valid_ean8, is_valid_ean13, is_valid_upca};
use super::digit::{CodeSet, DigitDecoder, Parity};
use super::sampler::ModulePattern;
use super::tables::{
    EAN8_RIGHT_DIGITS_OFFSET, EAN13_RIGHT_DIGITS_OFFSET, LEFT_DIGITS_OFFSET, MODULES_PER_DIGIT,
    leading_digit,
};
use crate::detector::RowThreshold;
use crate::models::{Barcode, Symbology};
use thiserror::Error;

/// Why a candidate was dropped. All of these are routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Symbol would not fit in the row at this module width
    #[error("symbol would extend past the row end")]
    OutOfBounds,
    /// A digit pattern matched no table
    #[error("no table entry matches digit {position} in either polarity")]
    UnknownPattern {
        /// Digit index within the data string
        position: usize,
    },
    /// EAN-13 left half read a parity pattern outside the table
    #[error("left parity pattern {0:06b} encodes no leading digit")]
    ParityPattern(u8),
    /// All digits read but the check digit disagrees
    #[error("check digit mismatch")]
    Checksum,
}

/// Linear symbologies in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearSymbology {
    /// 95 modules, L/G left half
    Ean13,
    /// 67 modules
    Ean8,
    /// 95 modules, L left half
    UpcA,
}

impl LinearSymbology {
    /// Try order at every guard and module width
    pub const PRIORITY: [LinearSymbology; 3] = [
        LinearSymbology::Ean13,
        LinearSymbology::Ean8,
        LinearSymbology::UpcA,
    ];

    /// Modules from the first start-guard bar to the last end-guard bar
    pub fn module_count(&self) -> usize {
        match self {
            LinearSymbology::Ean13 | LinearSymbology::UpcA => 95,
            LinearSymbology::Ean8 => 67,
        }
    }

    /// Reported symbology for a successful decode
    pub fn symbology(&self) -> Symbology {
        match self {
            LinearSymbology::Ean13 => Symbology::Ean13,
            LinearSymbology::Ean8 => Symbology::Ean8,
            LinearSymbology::UpcA => Symbology::UpcA,
        }
    }

    /// Decode this symbology at `start` with the given module width
    pub fn decode(
        &self,
        row: &[u8],
        threshold: &RowThreshold,
        start: usize,
        module_width: usize,
    ) -> Result<Barcode, Rejection> {
        match self {
            LinearSymbology::Ean13 => decode_ean13(row, threshold, start, module_width),
            LinearSymbology::Ean8 => decode_ean8(row, threshold, start, module_width),
            LinearSymbology::UpcA => decode_upca(row, threshold, start, module_width),
        }
    }
}

fn check_bounds(
    row: &[u8],
    start: usize,
    module_width: usize,
    symbology: LinearSymbology,
) -> Result<(), Rejection> {
    match module_width
        .checked_mul(symbology.module_count())
        .and_then(|span| span.checked_add(start))
    {
        Some(end) if module_width > 0 && end <= row.len() => Ok(()),
        _ => Err(Rejection::OutOfBounds),
    }
}

/// Decode consecutive digits into `out`, returning the G/L parity bits
/// (first digit in the highest used bit, set = G).
fn read_field(
    row: &[u8],
    threshold: &RowThreshold,
    field_start: usize,
    module_width: usize,
    set: CodeSet,
    first_position: usize,
    out: &mut [u8],
) -> Result<u8, Rejection> {
    let mut parity = 0u8;
    for (k, slot) in out.iter_mut().enumerate() {
        let x = field_start + k * MODULES_PER_DIGIT * module_width;
        let pattern = ModulePattern::sample(row, x, module_width, threshold);
        let digit = DigitDecoder::decode(pattern, set).ok_or(Rejection::UnknownPattern {
            position: first_position + k,
        })?;
        *slot = digit.value;
        parity = (parity << 1) | (digit.parity == Parity::G) as u8;
    }
    Ok(parity)
}

/// EAN-13: six L/G digits whose parity gives the leading digit, six R digits.
///
/// A leading zero makes the symbol a UPC-A, reported with its 12 explicit digits.
pub fn decode_ean13(
    row: &[u8],
    threshold: &RowThreshold,
    start: usize,
    module_width: usize,
) -> Result<Barcode, Rejection> {
    check_bounds(row, start, module_width, LinearSymbology::Ean13)?;

    let mut digits = [0u8; 13];
    let left = start + LEFT_DIGITS_OFFSET * module_width;
    let parity = read_field(row, threshold, left, module_width, CodeSet::LeftAny, 1, &mut digits[1..7])?;
    digits[0] = leading_digit(parity).ok_or(Rejection::ParityPattern(parity))?;

    let right = start + EAN13_RIGHT_DIGITS_OFFSET * module_width;
    read_field(row, threshold, right, module_width, CodeSet::Right, 7, &mut digits[7..])?;

    if !is_valid_ean13(&digits) {
        return Err(Rejection::Checksum);
    }

    if digits[0] == 0 {
        Ok(Barcode::new(Symbology::UpcA, digits_to_string(&digits[1..])))
    } else {
        Ok(Barcode::new(Symbology::Ean13, digits_to_string(&digits)))
    }
}

/// EAN-8: four L digits, four R digits, no implicit digit
pub fn decode_ean8(
    row: &[u8],
    threshold: &RowThreshold,
    start: usize,
    module_width: usize,
) -> Result<Barcode, Rejection> {
    check_bounds(row, start, module_width, LinearSymbology::Ean8)?;

    let mut digits = [0u8; 8];
    let left = start + LEFT_DIGITS_OFFSET * module_width;
    read_field(row, threshold, left, module_width, CodeSet::LeftOdd, 0, &mut digits[..4])?;
    let right = start + EAN8_RIGHT_DIGITS_OFFSET * module_width;
    read_field(row, threshold, right, module_width, CodeSet::Right, 4, &mut digits[4..])?;

    if !is_valid_ean8(&digits) {
        return Err(Rejection::Checksum);
    }
    Ok(Barcode::new(Symbology::Ean8, digits_to_string(&digits)))
}

/// UPC-A: EAN-13 layout with six L digits and six R digits
pub fn decode_upca(
    row: &[u8],
    threshold: &RowThreshold,
    start: usize,
    module_width: usize,
) -> Result<Barcode, Rejection> {
    check_bounds(row, start, module_width, LinearSymbology::UpcA)?;

    let mut digits = [0u8; 12];
    let left = start + LEFT_DIGITS_OFFSET * module_width;
    read_field(row, threshold, left, module_width, CodeSet::LeftOdd, 0, &mut digits[..6])?;
    let right = start + EAN13_RIGHT_DIGITS_OFFSET * module_width;
    read_field(row, threshold, right, module_width, CodeSet::Right, 6, &mut digits[6..])?;

    if !is_valid_upca(&digits) {
        return Err(Rejection::Checksum);
    }
    Ok(Barcode::new(Symbology::UpcA, digits_to_string(&digits)))
}
