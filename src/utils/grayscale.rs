//! Luma conversion for frame sources that deliver color.
//!
//! The scanner only accepts grayscale frames; convert before scanning.
//! Y = 0.299*R + 0.587*G + 0.114*B, as (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8).min(255) as u8
}

fn convert_row(src: &[u8], channels: usize, dst: &mut [u8]) {
    for (out, px) in dst.iter_mut().zip(src.chunks_exact(channels)) {
        *out = luma(px[0], px[1], px[2]);
    }
}

/// Interleaved RGB (3 bytes per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    convert_row(rgb, 3, &mut gray);
    gray
}

/// Interleaved RGBA (4 bytes per pixel) to grayscale, alpha ignored
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    convert_row(rgba, 4, &mut gray);
    gray
}

/// Row-parallel RGB conversion for large frames
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    gray.par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(dst, src)| convert_row(src, 3, dst));
    gray
}
