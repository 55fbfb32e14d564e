//! Start guard (bar-space-bar) location using run-length ratio checks
use super::threshold::RowThreshold;
use crate::decoder::config::ScanConfig;

/// A located start guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    /// First pixel of the leading guard bar
    pub start: usize,
    /// Estimated module width in pixels
    pub module_width: usize,
}

/// Finds bar-space-bar triples whose widths agree with each other
#[derive(Debug, Clone, Copy)]
pub struct GuardLocator {
    skip: usize,
    tail_margin: usize,
    max_bar_run: usize,
    min_module: usize,
    max_module: usize,
    offsets: usize,
}

impl GuardLocator {
    /// Take guard bounds and offset count from `config`
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            skip: config.guard_skip,
            tail_margin: config.guard_tail_margin,
            max_bar_run: config.max_bar_run,
            min_module: config.min_module_width,
            max_module: config.max_module_width,
            offsets: config.search_offsets,
        }
    }

    /// Evenly spaced search starts across a row of `width` pixels
    pub fn search_offsets(&self, width: usize) -> impl Iterator<Item = usize> {
        let step = width / (self.offsets + 1);
        (0..self.offsets).map(move |k| k * step)
    }

    /// Scan forward from `offset` for the first consistent guard.
    ///
    /// The scan stops `tail_margin` pixels before the row end, so a guard
    /// is only reported where a symbol could still fit behind it.
    pub fn locate(&self, row: &[u8], threshold: &RowThreshold, offset: usize) -> Option<Guard> {
        let width = row.len();
        let end = width.saturating_sub(self.tail_margin).min(width.saturating_sub(1));

        for i in (offset + self.skip)..end {
            // white -> black edge
            if threshold.is_bar(row[i]) || !threshold.is_bar(row[i + 1]) {
                continue;
            }

            let (bar1, j) = run_length(row, i + 1, true, threshold);
            if bar1 < self.min_module || bar1 > self.max_bar_run {
                continue;
            }

            let (space, j) = run_length(row, j, false, threshold);
            if space == 0 || space.abs_diff(bar1) > bar1 {
                continue;
            }

            let (bar2, _) = run_length(row, j, true, threshold);
            if bar2 == 0 || bar2.abs_diff(bar1) > bar1 / 2 + 1 {
                continue;
            }

            let module_width = (bar1 + space + bar2) / 3;
            if (self.min_module..=self.max_module).contains(&module_width) {
                return Some(Guard {
                    start: i + 1,
                    module_width,
                });
            }
        }

        None
    }
}

/// Length of the run of bars (or spaces) starting at `from`, and the index after it
fn run_length(row: &[u8], from: usize, bar: bool, threshold: &RowThreshold) -> (usize, usize) {
    let mut j = from;
    while j < row.len() && threshold.is_bar(row[j]) == bar {
        j += 1;
    }
    (j - from, j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_runs(lead: usize, runs: &[usize], width: usize) -> Vec<u8> {
        let mut row = vec![255u8; lead];
        let mut bar = true;
        for &r in runs {
            row.extend(std::iter::repeat(if bar { 0u8 } else { 255u8 }).take(r));
            bar = !bar;
        }
        row.resize(width, 255);
        row
    }

    fn locator() -> GuardLocator {
        GuardLocator::new(&ScanConfig::default())
    }

    #[test]
    fn test_locate_clean_guard() {
        let row = row_with_runs(50, &[4, 4, 4], 640);
        let t = RowThreshold::estimate(&row);
        let guard = locator().locate(&row, &t, 0).unwrap();
        assert_eq!(guard, Guard { start: 50, module_width: 4 });
    }

    #[test]
    fn test_locate_tolerates_uneven_runs() {
        // space within one bar width, second bar within bar/2 + 1
        let row = row_with_runs(60, &[4, 7, 6], 640);
        let t = RowThreshold::estimate(&row);
        let guard = locator().locate(&row, &t, 0).unwrap();
        assert_eq!(guard.start, 60);
        assert_eq!(guard.module_width, 5);
    }

    #[test]
    fn test_rejects_inconsistent_triples() {
        let row = row_with_runs(60, &[4, 12, 4], 640);
        let t = RowThreshold::estimate(&row);
        assert!(locator().locate(&row, &t, 0).is_none());

        let row = row_with_runs(60, &[4, 4, 9], 640);
        let t = RowThreshold::estimate(&row);
        assert!(locator().locate(&row, &t, 0).is_none());

        // single-pixel bar is noise
        let row = row_with_runs(60, &[1, 1, 1], 640);
        let t = RowThreshold::estimate(&row);
        assert!(locator().locate(&row, &t, 0).is_none());
    }

    #[test]
    fn test_skips_leading_noise_to_next_guard() {
        let mut row = row_with_runs(40, &[1, 3, 1], 100);
        row.extend(row_with_runs(10, &[3, 3, 3], 540));
        let t = RowThreshold::estimate(&row);
        let guard = locator().locate(&row, &t, 0).unwrap();
        assert_eq!(guard.start, 110);
        assert_eq!(guard.module_width, 3);
    }

    #[test]
    fn test_uniform_row_has_no_guard() {
        let row = vec![128u8; 640];
        let t = RowThreshold::estimate(&row);
        let loc = locator();
        for offset in loc.search_offsets(row.len()) {
            assert!(loc.locate(&row, &t, offset).is_none());
        }
    }

    #[test]
    fn test_guard_past_tail_margin_is_ignored() {
        let row = row_with_runs(500, &[4, 4, 4], 640);
        let t = RowThreshold::estimate(&row);
        assert!(locator().locate(&row, &t, 0).is_none());
    }

    #[test]
    fn test_search_offsets() {
        let offsets: Vec<usize> = locator().search_offsets(640).collect();
        assert_eq!(offsets, vec![0, 106, 212, 318, 424]);
    }

    #[test]
    fn test_short_row() {
        let row = vec![255u8, 0, 255];
        let t = RowThreshold::estimate(&row);
        assert!(locator().locate(&row, &t, 0).is_none());
    }
}
