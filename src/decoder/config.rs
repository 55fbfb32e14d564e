//! Search constants for the bounded scan.
//!
//! Every field has a fixed default; `from_env` lets a deployment override
//! individual values through `EAN_SCAN_*` variables without code changes.

use serde::{Deserialize, Serialize};

/// Largest row fraction denominator kept by [`ScanConfig::sanitized`]
pub const MAX_ROW_DENOMINATOR: usize = 1024;

/// Fractional heights (numerator, denominator) of the candidate rows, in priority order
pub const DEFAULT_ROW_FRACTIONS: [(usize, usize); 9] = [
    (1, 2),
    (1, 3),
    (2, 3),
    (1, 4),
    (3, 4),
    (2, 5),
    (3, 5),
    (5, 12),
    (7, 12),
];

/// Tunable constants of the bounded search; missing fields take their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rows with `max - min` below this are skipped
    pub min_contrast: u8,
    /// Pixels skipped after each search offset before looking for an edge
    pub guard_skip: usize,
    /// Guard search stops this many pixels before the row end
    pub guard_tail_margin: usize,
    /// Longest first guard bar accepted, in pixels
    pub max_bar_run: usize,
    /// Narrowest module width accepted or tried, in pixels
    pub min_module_width: usize,
    /// Widest module width accepted from a guard, in pixels
    pub max_module_width: usize,
    /// Number of guard search offsets per row, spaced `width / (n + 1)` apart
    pub search_offsets: usize,
    /// Module widths `estimate - r ..= estimate + r` are tried
    pub width_radius: usize,
    /// Rows scanned, as `(num, den)` fractions of the frame height, in order
    pub row_fractions: Vec<(usize, usize)>,
    /// Repeat the search on the horizontally mirrored row
    pub mirror_pass: bool,
    /// Ask the 2-D decoder before the linear search
    pub matrix_first: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_contrast: 60,
            guard_skip: 20,
            guard_tail_margin: 200,
            max_bar_run: 25,
            min_module_width: 2,
            max_module_width: 20,
            search_offsets: 5,
            width_radius: 2,
            row_fractions: DEFAULT_ROW_FRACTIONS.to_vec(),
            mirror_pass: true,
            matrix_first: true,
        }
    }
}

fn parse_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_u8(value: Option<String>, default: u8) -> u8 {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_bool_u8(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

impl ScanConfig {
    /// Defaults overridden by `EAN_SCAN_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ScanConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            min_contrast: parse_u8(lookup("EAN_SCAN_MIN_CONTRAST"), d.min_contrast),
            guard_skip: parse_usize(lookup("EAN_SCAN_GUARD_SKIP"), d.guard_skip),
            guard_tail_margin: parse_usize(lookup("EAN_SCAN_GUARD_TAIL"), d.guard_tail_margin),
            max_bar_run: parse_usize(lookup("EAN_SCAN_MAX_BAR_RUN"), d.max_bar_run),
            min_module_width: parse_usize(lookup("EAN_SCAN_MIN_MODULE"), d.min_module_width),
            max_module_width: parse_usize(lookup("EAN_SCAN_MAX_MODULE"), d.max_module_width),
            search_offsets: parse_usize(lookup("EAN_SCAN_OFFSETS"), d.search_offsets),
            width_radius: parse_usize(lookup("EAN_SCAN_WIDTH_RADIUS"), d.width_radius),
            row_fractions: d.row_fractions,
            mirror_pass: parse_bool_u8(lookup("EAN_SCAN_MIRROR"), d.mirror_pass),
            matrix_first: parse_bool_u8(lookup("EAN_SCAN_MATRIX_FIRST"), d.matrix_first),
        }
        .sanitized()
    }

    /// Clamp every field into a range that keeps the search small and well-defined
    pub fn sanitized(mut self) -> Self {
        self.min_module_width = self.min_module_width.clamp(1, 64);
        self.max_module_width = self.max_module_width.clamp(self.min_module_width, 64);
        self.max_bar_run = self.max_bar_run.clamp(self.min_module_width, 128);
        self.search_offsets = self.search_offsets.clamp(1, 16);
        self.width_radius = self.width_radius.min(4);
        self.row_fractions
            .retain(|&(num, den)| den > 0 && den <= MAX_ROW_DENOMINATOR && num < den);
        self.row_fractions.truncate(32);
        self
    }

    /// Module width candidates around an estimate: nominal first, then widening
    pub fn width_candidates(&self, estimate: usize) -> Vec<usize> {
        let mut widths = Vec::with_capacity(2 * self.width_radius + 1);
        widths.push(estimate);
        for delta in 1..=self.width_radius {
            if let Some(w) = estimate.checked_sub(delta) {
                widths.push(w);
            }
            widths.push(estimate + delta);
        }
        widths.retain(|&w| w >= self.min_module_width);
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.min_contrast, 60);
        assert_eq!(cfg.search_offsets, 5);
        assert_eq!(cfg.row_fractions.len(), 9);
        assert_eq!(cfg.row_fractions[0], (1, 2));
    }

    #[test]
    fn test_width_candidates_order() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.width_candidates(4), vec![4, 3, 5, 2, 6]);
        assert_eq!(cfg.width_candidates(3), vec![3, 2, 4, 5]);
        assert_eq!(cfg.width_candidates(2), vec![2, 3, 4]);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("EAN_SCAN_MIN_CONTRAST", "80"),
            ("EAN_SCAN_MIRROR", "0"),
            ("EAN_SCAN_OFFSETS", "not-a-number"),
            ("EAN_SCAN_WIDTH_RADIUS", "9"),
        ]
        .into_iter()
        .collect();
        let cfg = ScanConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.min_contrast, 80);
        assert!(!cfg.mirror_pass);
        assert_eq!(cfg.search_offsets, 5);
        assert_eq!(cfg.width_radius, 4);
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: ScanConfig = serde_json::from_str(r#"{"min_contrast": 40}"#).unwrap();
        assert_eq!(cfg.min_contrast, 40);
        assert_eq!(cfg.max_module_width, 20);
    }

    #[test]
    fn test_sanitize_drops_bad_fractions() {
        let cfg = ScanConfig {
            row_fractions: vec![(1, 0), (3, 2), (1, 2)],
            ..ScanConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.row_fractions, vec![(1, 2)]);
    }

    #[test]
    fn test_sanitize_bounds_denominator() {
        let json = format!(r#"{{"row_fractions": [[{}, {}], [511, 1024]]}}"#, usize::MAX - 1, usize::MAX);
        let cfg: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.sanitized().row_fractions, vec![(511, 1024)]);
    }
}
