//! Bounded frame search.
//!
//! Work per frame is a fixed product: rows x (forward + mirrored) x guard
//! offsets x module widths x symbologies. Nothing loops on image content.

use crate::decoder::{LinearSymbology, Rejection, ScanConfig};
use crate::detector::{Guard, GuardLocator, RowThreshold};
use crate::matrix::{MatrixDecoder, NoMatrixDecoder};
use crate::models::{Barcode, Frame, FrameStats, ScanReport, ScanTelemetry, Symbology};
use crate::utils::scratch::RowScratch;
use log::{debug, trace, warn};

/// Single-frame scanner.
///
/// Owns its 2-D decoder and mirrored-row scratch buffer; `scan` takes
/// `&mut self`, so one scanner handles one frame at a time.
pub struct Scanner<M: MatrixDecoder = NoMatrixDecoder> {
    config: ScanConfig,
    locator: GuardLocator,
    matrix: M,
    scratch: RowScratch,
}

impl Scanner<NoMatrixDecoder> {
    /// Linear symbologies only, default search constants
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Linear symbologies only, custom search constants
    pub fn with_config(config: ScanConfig) -> Self {
        Scanner::with_config_and_matrix(config, NoMatrixDecoder)
    }
}

impl Default for Scanner<NoMatrixDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MatrixDecoder> Scanner<M> {
    /// Take ownership of a 2-D decoder, default search constants
    pub fn with_matrix_decoder(matrix: M) -> Self {
        Self::with_config_and_matrix(ScanConfig::default(), matrix)
    }

    /// Custom search constants and a 2-D decoder; `config` is sanitized first
    pub fn with_config_and_matrix(config: ScanConfig, matrix: M) -> Self {
        let config = config.sanitized();
        Self {
            locator: GuardLocator::new(&config),
            config,
            matrix,
            scratch: RowScratch::new(),
        }
    }

    /// Search constants in effect, after sanitizing
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Shut down and hand the 2-D decoder back
    pub fn into_matrix_decoder(self) -> M {
        self.matrix
    }

    /// Mirrored-row buffer, for its allocation counters
    pub fn scratch(&self) -> &RowScratch {
        &self.scratch
    }

    /// Scan one frame.
    ///
    /// Never fails: precondition violations and exhaustion both come back as
    /// a not-found report. Statistics are attached only when a valid frame
    /// was searched without success.
    pub fn scan(&mut self, frame: &Frame<'_>) -> ScanReport {
        let mut telemetry = ScanTelemetry::default();

        if let Err(err) = frame.validate() {
            warn!("frame rejected before decode: {err}");
            return ScanReport::not_found(None, telemetry);
        }

        let Self {
            config,
            locator,
            matrix,
            scratch,
        } = self;
        let (width, height) = (frame.width(), frame.height());

        if config.matrix_first {
            telemetry.matrix_attempted = true;
            if let Some(payload) = matrix.decode(frame.data(), width, height).into_iter().next() {
                debug!("2-D decoder returned a payload ({} bytes)", payload.len());
                return ScanReport::found_with(Barcode::new(Symbology::Qr, payload), telemetry);
            }
        }

        for &(num, den) in &config.row_fractions {
            let y = row_at(height, num, den);
            let row = frame.row(y);
            if let Some(code) = scan_row(config, locator, scratch, row, &mut telemetry) {
                debug!("decoded {code} on row {y}");
                return ScanReport::found_with(code, telemetry);
            }
        }

        let stats = FrameStats::sample(frame.data());
        debug!(
            "no barcode: brightness={} contrast={} (min={}, max={}), {} candidates rejected",
            stats.avg,
            stats.contrast(),
            stats.min,
            stats.max,
            telemetry.rejections()
        );
        if let Some(hint) = stats.hint() {
            debug!("hint: {}", hint.message());
        }
        ScanReport::not_found(Some(stats), telemetry)
    }

    /// Gate, search and decode a single pixel row, mirrored pass included
    pub fn decode_row(&mut self, row: &[u8]) -> Option<Barcode> {
        let mut telemetry = ScanTelemetry::default();
        scan_row(
            &self.config,
            &self.locator,
            &mut self.scratch,
            row,
            &mut telemetry,
        )
    }

    /// Try every width perturbation and symbology at a known guard
    pub fn decode_at_guard(&self, row: &[u8], guard: Guard) -> Option<Barcode> {
        let threshold = RowThreshold::estimate(row);
        let mut telemetry = ScanTelemetry::default();
        decode_at_guard(&self.config, row, &threshold, guard, &mut telemetry)
    }
}

/// Row `height * num / den` without intermediate overflow
fn row_at(height: usize, num: usize, den: usize) -> usize {
    height / den * num + height % den * num / den
}

fn scan_row(
    config: &ScanConfig,
    locator: &GuardLocator,
    scratch: &mut RowScratch,
    row: &[u8],
    telemetry: &mut ScanTelemetry,
) -> Option<Barcode> {
    telemetry.rows_considered += 1;

    let threshold = RowThreshold::estimate(row);
    if !threshold.passes_gate(config.min_contrast) {
        telemetry.rows_gated += 1;
        trace!(
            "row gated: contrast {} < {}",
            threshold.contrast(),
            config.min_contrast
        );
        return None;
    }

    if let Some(code) = search_row(config, locator, row, &threshold, telemetry) {
        return Some(code);
    }

    if !config.mirror_pass {
        return None;
    }
    // mirrored row has the same min/max, so the threshold carries over
    telemetry.mirrored_passes += 1;
    let mirrored = scratch.mirrored(row);
    search_row(config, locator, mirrored, &threshold, telemetry)
}

fn search_row(
    config: &ScanConfig,
    locator: &GuardLocator,
    row: &[u8],
    threshold: &RowThreshold,
    telemetry: &mut ScanTelemetry,
) -> Option<Barcode> {
    let mut previous: Option<Guard> = None;
    for offset in locator.search_offsets(row.len()) {
        let Some(guard) = locator.locate(row, threshold, offset) else {
            continue;
        };
        if previous == Some(guard) {
            continue;
        }
        previous = Some(guard);
        telemetry.guards_found += 1;
        trace!(
            "guard at {} (module {}px) from offset {}",
            guard.start, guard.module_width, offset
        );

        if let Some(code) = decode_at_guard(config, row, threshold, guard, telemetry) {
            return Some(code);
        }
    }
    None
}

fn decode_at_guard(
    config: &ScanConfig,
    row: &[u8],
    threshold: &RowThreshold,
    guard: Guard,
    telemetry: &mut ScanTelemetry,
) -> Option<Barcode> {
    for module_width in config.width_candidates(guard.module_width) {
        for symbology in LinearSymbology::PRIORITY {
            telemetry.candidates_tried += 1;
            match symbology.decode(row, threshold, guard.start, module_width) {
                Ok(code) => return Some(code),
                Err(rejection) => {
                    record_rejection(telemetry, rejection);
                    trace!(
                        "{:?} at {}+{}px rejected: {rejection}",
                        symbology, guard.start, module_width
                    );
                }
            }
        }
    }
    None
}

fn record_rejection(telemetry: &mut ScanTelemetry, rejection: Rejection) {
    match rejection {
        Rejection::OutOfBounds => telemetry.rejections_bounds += 1,
        Rejection::UnknownPattern { .. } => telemetry.rejections_pattern += 1,
        Rejection::ParityPattern(_) => telemetry.rejections_parity += 1,
        Rejection::Checksum => telemetry.rejections_checksum += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::synth::{encode_modules, mirror, render_row, synthesize_frame};

    fn row_for(code: &str, start: usize, module_width: usize) -> Vec<u8> {
        render_row(&encode_modules(code).unwrap(), start, module_width, 640)
    }

    #[test]
    fn test_scan_ean13_frame() {
        let buf = synthesize_frame("4006381333931", 50, 4, 640, 480).unwrap();
        let report = Scanner::new().scan(&Frame::grayscale(&buf, 640, 480));
        let code = report.barcode.unwrap();
        assert_eq!(code.symbology(), Symbology::Ean13);
        assert_eq!(code.data(), "4006381333931");
        assert!(report.stats.is_none());
        assert_eq!(report.telemetry.rows_considered, 1);
    }

    #[test]
    fn test_decode_row_mirrored() {
        let row = row_for("96385074", 80, 3);
        let mut scanner = Scanner::new();
        let forward = scanner.decode_row(&row).unwrap();
        let backward = scanner.decode_row(&mirror(&row)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.data(), "96385074");
    }

    #[test]
    fn test_mirror_pass_can_be_disabled() {
        let row = mirror(&row_for("4006381333931", 50, 4));
        let config = ScanConfig {
            mirror_pass: false,
            ..ScanConfig::default()
        };
        assert!(Scanner::with_config(config).decode_row(&row).is_none());
    }

    #[test]
    fn test_width_tolerance_at_guard() {
        let row = row_for("4006381333931", 50, 5);
        let scanner = Scanner::new();
        for estimate in 3..=7 {
            let guard = Guard { start: 50, module_width: estimate };
            let code = scanner.decode_at_guard(&row, guard);
            assert_eq!(code.map(|c| c.into_data()).as_deref(), Some("4006381333931"), "estimate {estimate}");
        }
    }

    #[test]
    fn test_checksum_failures_are_counted() {
        let buf = synthesize_frame("4006381333932", 50, 4, 640, 480).unwrap();
        let report = Scanner::new().scan(&Frame::grayscale(&buf, 640, 480));
        assert!(!report.found());
        assert!(report.telemetry.rejections_checksum >= 1);
        assert_eq!(report.telemetry.rows_considered, 9);
        assert_eq!(report.telemetry.mirrored_passes, 9);
        assert!(report.stats.is_some());
    }

    #[test]
    fn test_matrix_decoder_wins() {
        let buf = synthesize_frame("4006381333931", 50, 4, 640, 480).unwrap();
        let qr = |_: &[u8], _: usize, _: usize| vec!["https://example.com".to_string()];
        let mut scanner = Scanner::with_matrix_decoder(qr);
        let report = scanner.scan(&Frame::grayscale(&buf, 640, 480));
        let code = report.barcode.unwrap();
        assert_eq!(code.symbology(), Symbology::Qr);
        assert_eq!(code.data(), "https://example.com");
        assert_eq!(report.telemetry.rows_considered, 0);
    }

    #[test]
    fn test_matrix_first_disabled() {
        let buf = synthesize_frame("96385074", 50, 4, 640, 480).unwrap();
        let config = ScanConfig {
            matrix_first: false,
            ..ScanConfig::default()
        };
        let qr = |_: &[u8], _: usize, _: usize| vec!["ignored".to_string()];
        let report = Scanner::with_config_and_matrix(config, qr).scan(&Frame::grayscale(&buf, 640, 480));
        assert_eq!(report.barcode.unwrap().symbology(), Symbology::Ean8);
        assert!(!report.telemetry.matrix_attempted);
    }

    #[test]
    fn test_scratch_reused_across_rows() {
        let mut buf = vec![128u8; 640 * 480];
        // one row with edges but no symbol, so only that row reaches the mirror pass
        let noise = row_for("4006381333932", 50, 4);
        buf[240 * 640..241 * 640].copy_from_slice(&noise);
        let mut scanner = Scanner::new();
        scanner.scan(&Frame::grayscale(&buf, 640, 480));
        scanner.scan(&Frame::grayscale(&buf, 640, 480));
        assert_eq!(scanner.scratch().stats().allocations, 1);
        assert_eq!(scanner.scratch().stats().reuses, 1);
    }

    #[test]
    fn test_row_at_matches_plain_fraction() {
        for height in [1, 7, 48, 480, 1080] {
            for (num, den) in [(1, 2), (2, 3), (5, 12), (1023, 1024)] {
                assert_eq!(row_at(height, num, den), height * num / den);
            }
        }
        assert!(row_at(usize::MAX, 1023, 1024) < usize::MAX);
    }

    #[test]
    fn test_oversized_fractions_do_not_panic() {
        let json = format!(r#"{{"row_fractions": [[{}, {}], [1, 2]]}}"#, usize::MAX - 1, usize::MAX);
        let config: ScanConfig = serde_json::from_str(&json).unwrap();
        let buf = synthesize_frame("96385074", 50, 4, 640, 480).unwrap();
        let report = Scanner::with_config(config).scan(&Frame::grayscale(&buf, 640, 480));
        assert_eq!(report.barcode.map(|c| c.into_data()).as_deref(), Some("96385074"));
        assert_eq!(report.telemetry.rows_considered, 1);
    }

    #[test]
    fn test_config_is_sanitized_on_construction() {
        let config = ScanConfig {
            search_offsets: 100,
            row_fractions: vec![(1, 2), (4, 3)],
            ..ScanConfig::default()
        };
        let scanner = Scanner::with_config(config);
        assert_eq!(scanner.config().search_offsets, 16);
        assert_eq!(scanner.config().row_fractions, vec![(1, 2)]);
    }
}
