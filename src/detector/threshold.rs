//! Per-row binarization cut from a single min/max scan

/// Min/max summary of one row and the bar/space cut derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowThreshold {
    /// Darkest pixel in the row
    pub min: u8,
    /// Brightest pixel in the row
    pub max: u8,
    /// Pixels at or below the cut are bars
    pub cut: u8,
}

impl RowThreshold {
    /// Estimate the threshold for one pixel row
    pub fn estimate(row: &[u8]) -> Self {
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for &v in row {
            min = min.min(v);
            max = max.max(v);
        }
        if row.is_empty() {
            return Self { min: 0, max: 0, cut: 0 };
        }
        let cut = ((min as u16 + max as u16) / 2) as u8;
        Self { min, max, cut }
    }

    /// Spread between the brightest and darkest pixel
    pub fn contrast(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }

    /// Contrast gate: flat rows never reach the guard search
    pub fn passes_gate(&self, min_contrast: u8) -> bool {
        self.contrast() >= min_contrast
    }

    /// `true` when `pixel` is dark enough to be part of a bar
    #[inline]
    pub fn is_bar(&self, pixel: u8) -> bool {
        pixel <= self.cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate() {
        let row = [200u8, 30, 180, 90, 240];
        let t = RowThreshold::estimate(&row);
        assert_eq!(t.min, 30);
        assert_eq!(t.max, 240);
        assert_eq!(t.cut, 135);
        assert!(t.is_bar(135));
        assert!(!t.is_bar(136));
    }

    #[test]
    fn test_contrast_gate() {
        let flat = RowThreshold::estimate(&[100, 120, 159, 110]);
        assert_eq!(flat.contrast(), 59);
        assert!(!flat.passes_gate(60));

        let edge = RowThreshold::estimate(&[100, 160]);
        assert!(edge.passes_gate(60));
    }

    #[test]
    fn test_empty_row_never_passes() {
        let t = RowThreshold::estimate(&[]);
        assert!(!t.passes_gate(1));
    }
}
