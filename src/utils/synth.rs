//! Synthetic symbol generation for tests, benchmarks and the CLI.
//!
//! Digits are encoded as given; the check digit is not recomputed, so a
//! corrupted code renders as a corrupted symbol.

use crate::decoder::checksum::parse_digits;
use crate::decoder::tables::{
    CENTER_GUARD, EDGE_GUARD, G_CODES, L_CODES, LEADING_DIGIT_PARITY, R_CODES,
};
use crate::models::Symbology;

/// Pixel value of a rendered bar
pub const BAR_LEVEL: u8 = 0;
/// Pixel value of a rendered space
pub const SPACE_LEVEL: u8 = 255;

fn push_code(modules: &mut Vec<bool>, code: u8) {
    for bit in (0..7).rev() {
        modules.push((code >> bit) & 1 == 1);
    }
}

/// Symbology implied by a digit string length
pub fn symbology_for_len(len: usize) -> Option<Symbology> {
    [Symbology::Ean13, Symbology::Ean8, Symbology::UpcA]
        .into_iter()
        .find(|s| s.digit_count() == Some(len))
}

/// Bar/space modules (`true` = bar) of a 13, 8 or 12 digit code
pub fn encode_modules(code: &str) -> Option<Vec<bool>> {
    let digits = parse_digits(code)?;
    let symbology = symbology_for_len(digits.len())?;

    let (left, right): (Vec<(u8, &[u8; 10])>, &[u8]) = match symbology {
        Symbology::Ean13 => {
            let parity = LEADING_DIGIT_PARITY[digits[0] as usize];
            let left = digits[1..7]
                .iter()
                .enumerate()
                .map(|(k, &d)| {
                    let table = if (parity >> (5 - k)) & 1 == 1 { &G_CODES } else { &L_CODES };
                    (d, table)
                })
                .collect();
            (left, &digits[7..])
        }
        Symbology::Ean8 => (digits[..4].iter().map(|&d| (d, &L_CODES)).collect(), &digits[4..]),
        Symbology::UpcA => (digits[..6].iter().map(|&d| (d, &L_CODES)).collect(), &digits[6..]),
        Symbology::Qr => return None,
    };

    let mut modules = Vec::with_capacity(95);
    modules.extend_from_slice(&EDGE_GUARD);
    for (d, table) in left {
        push_code(&mut modules, table[d as usize]);
    }
    modules.extend_from_slice(&CENTER_GUARD);
    for &d in right {
        push_code(&mut modules, R_CODES[d as usize]);
    }
    modules.extend_from_slice(&EDGE_GUARD);
    Some(modules)
}

/// Render modules into a `width`-pixel row, first bar at pixel `start`
pub fn render_row(modules: &[bool], start: usize, module_width: usize, width: usize) -> Vec<u8> {
    render_row_with_levels(modules, start, module_width, width, BAR_LEVEL, SPACE_LEVEL)
}

/// [`render_row`] with explicit bar and space intensities
pub fn render_row_with_levels(
    modules: &[bool],
    start: usize,
    module_width: usize,
    width: usize,
    bar: u8,
    space: u8,
) -> Vec<u8> {
    let mut row = vec![space; width];
    for (m, &is_bar) in modules.iter().enumerate() {
        if !is_bar {
            continue;
        }
        let from = (start + m * module_width).min(width);
        let to = (start + (m + 1) * module_width).min(width);
        row[from..to].fill(bar);
    }
    row
}

/// Stack one row `height` times into a row-major frame buffer
pub fn render_frame(row: &[u8], height: usize) -> Vec<u8> {
    row.repeat(height)
}

/// Convenience: full frame with the symbol for `code` on every row
pub fn synthesize_frame(
    code: &str,
    start: usize,
    module_width: usize,
    width: usize,
    height: usize,
) -> Option<Vec<u8>> {
    let modules = encode_modules(code)?;
    Some(render_frame(&render_row(&modules, start, module_width, width), height))
}

/// Horizontal mirror of a row
pub fn mirror(row: &[u8]) -> Vec<u8> {
    row.iter().rev().copied().collect()
}
