//! EAN/UPC decoding modules
//!
//! This module contains all the logic for turning a located guard into digits:
//! - Module sampling with majority voting
//! - Digit lookup with polarity retry
//! - Per-symbology field layout and check digit validation

/// GS1 mod-10 check digit validation
pub mod checksum;
/// Search constants and environment overrides
pub mod config;
/// 7-module pattern to digit lookup
pub mod digit;
/// 3-point majority sampling of one digit
pub mod sampler;
/// EAN-13 / EAN-8 / UPC-A field layouts
pub mod symbology;
/// L/G/R code tables and guard layout constants
pub mod tables;

pub use config::ScanConfig;
pub use digit::{CodeSet, DecodedDigit, DigitDecoder, Parity, Polarity};
pub use sampler::ModulePattern;
pub use symbology::{LinearSymbology, Rejection, decode_ean8, decode_ean13, decode_upca};
