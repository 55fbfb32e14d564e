//! Core data structures shared by the detector, decoder and pipeline

pub mod barcode;
pub mod frame;
pub mod report;
pub mod stats;

pub use barcode::{Barcode, Symbology};
pub use frame::{Frame, FrameError, PixelFormat};
pub use report::{ScanReport, ScanTelemetry};
pub use stats::{FrameStats, LightingHint};
