//! Per-scan outcome and stage counters.

use super::{Barcode, FrameStats};
use serde::Serialize;

/// Stage counters collected while scanning one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanTelemetry {
    /// The 2-D decoder was asked
    pub matrix_attempted: bool,
    /// Rows thresholded
    pub rows_considered: usize,
    /// Rows dropped by the contrast gate
    pub rows_gated: usize,
    /// Rows searched again in mirrored order
    pub mirrored_passes: usize,
    /// Distinct guards located
    pub guards_found: usize,
    /// (width, symbology) decode attempts
    pub candidates_tried: usize,
    /// Rejected: symbol past the row end
    pub rejections_bounds: usize,
    /// Rejected: unknown digit pattern
    pub rejections_pattern: usize,
    /// Rejected: EAN-13 parity pattern
    pub rejections_parity: usize,
    /// Rejected: check digit
    pub rejections_checksum: usize,
}

impl ScanTelemetry {
    /// Total rejected candidates, all reasons
    pub fn rejections(&self) -> usize {
        self.rejections_bounds
            + self.rejections_pattern
            + self.rejections_parity
            + self.rejections_checksum
    }
}

/// Outcome of one scan call.
///
/// `barcode` is present only for a validated symbol. `stats` is present only
/// when a well-formed frame was searched without success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Decoded symbol, if any
    pub barcode: Option<Barcode>,
    /// Frame statistics for a searched frame with no result
    pub stats: Option<FrameStats>,
    /// Stage counters for this scan
    pub telemetry: ScanTelemetry,
}

impl ScanReport {
    /// `true` when a symbol was decoded
    pub fn found(&self) -> bool {
        self.barcode.is_some()
    }

    pub(crate) fn found_with(barcode: Barcode, telemetry: ScanTelemetry) -> Self {
        Self {
            barcode: Some(barcode),
            stats: None,
            telemetry,
        }
    }

    pub(crate) fn not_found(stats: Option<FrameStats>, telemetry: ScanTelemetry) -> Self {
        Self {
            barcode: None,
            stats,
            telemetry,
        }
    }
}
