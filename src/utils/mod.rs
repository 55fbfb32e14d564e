//! Utility functions around the scan pipeline
//!
//! - Grayscale conversion for color frame sources
//! - Mirrored-row scratch buffer reuse
//! - Synthetic symbol rendering for tests, benches and the CLI

/// RGB/RGBA to luma conversion
pub mod grayscale;
/// Reusable mirrored-row buffer
pub mod scratch;
/// Synthetic symbol rendering
pub mod synth;
