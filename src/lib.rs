//! ean_scan - bounded-time EAN-13 / EAN-8 / UPC-A scanning of grayscale frames
//!
//! Each frame is offered to an optional 2-D (QR) decoder first. Failing
//! that, a fixed set of rows is thresholded, searched for a start guard and
//! decoded under every supported symbology, forward and mirrored. A miss
//! comes back with frame statistics and a lighting hint instead of an error.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// EAN/UPC decoding modules (sampling, digit tables, symbologies, check digits)
pub mod decoder;
/// Row thresholding and start guard search
pub mod detector;
/// Seam for the external 2-D decoder
pub mod matrix;
/// Core data structures (Frame, Barcode, ScanReport, FrameStats)
pub mod models;
/// Frame search orchestration
pub mod pipeline;
/// Image loading and dataset helpers for the CLI and benches
pub mod tools;
/// Utility functions (grayscale, scratch buffers, synthetic symbols)
pub mod utils;

pub use decoder::{LinearSymbology, Rejection, ScanConfig};
pub use matrix::{MatrixDecoder, NoMatrixDecoder};
#[cfg(feature = "qr")]
pub use matrix::RqrrDecoder;
pub use models::{
    Barcode, Frame, FrameError, FrameStats, LightingHint, PixelFormat, ScanReport, ScanTelemetry,
    Symbology,
};
pub use pipeline::Scanner;

/// Scan one grayscale frame for a linear barcode with default settings
///
/// Convenience wrapper; reuse a [`Scanner`] when scanning a stream of frames
/// so the mirrored-row buffer is allocated once.
pub fn scan(frame: &Frame<'_>) -> ScanReport {
    Scanner::new().scan(frame)
}
