//! Frame brightness summary and lighting guidance.

use serde::Serialize;

/// Sample every Nth pixel when summarising a frame
pub const STATS_SAMPLE_STRIDE: usize = 100;

const LOW_CONTRAST: u8 = 80;
const DARK_AVERAGE: u8 = 60;
const BRIGHT_AVERAGE: u8 = 190;

/// Brightness summary reported alongside a not-found outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Minimum sampled intensity
    pub min: u8,
    /// Maximum sampled intensity
    pub max: u8,
    /// Mean sampled intensity
    pub avg: u8,
}

/// User guidance derived from [`FrameStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LightingHint {
    /// Improve lighting
    LowContrast,
    /// Enable illumination
    TooDark,
    /// Reduce light
    TooBright,
}

impl FrameStats {
    /// Summarise a grayscale buffer using a fixed sampling stride
    pub fn sample(gray: &[u8]) -> Self {
        Self::sample_with_stride(gray, STATS_SAMPLE_STRIDE)
    }

    /// Summarise every `stride`-th pixel; a zero stride reads every pixel
    pub fn sample_with_stride(gray: &[u8], stride: usize) -> Self {
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut sum: u64 = 0;
        let mut count: u64 = 0;
        for &v in gray.iter().step_by(stride.max(1)) {
            min = min.min(v);
            max = max.max(v);
            sum += v as u64;
            count += 1;
        }
        if count == 0 {
            return Self { min: 0, max: 0, avg: 0 };
        }
        Self {
            min,
            max,
            avg: (sum / count) as u8,
        }
    }

    /// Spread between the brightest and darkest sample
    pub fn contrast(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }

    /// Contrast problems win over exposure problems
    pub fn hint(&self) -> Option<LightingHint> {
        if self.contrast() < LOW_CONTRAST {
            Some(LightingHint::LowContrast)
        } else if self.avg < DARK_AVERAGE {
            Some(LightingHint::TooDark)
        } else if self.avg > BRIGHT_AVERAGE {
            Some(LightingHint::TooBright)
        } else {
            None
        }
    }
}

impl LightingHint {
    /// Short advice for the operator
    pub fn message(&self) -> &'static str {
        match self {
            LightingHint::LowContrast => "low contrast - improve lighting",
            LightingHint::TooDark => "too dark - enable illumination",
            LightingHint::TooBright => "too bright - reduce light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stats() {
        let mut gray = vec![100u8; 1000];
        gray[0] = 10;
        gray[500] = 250;
        let stats = FrameStats::sample(&gray);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 250);
        assert_eq!(stats.contrast(), 240);
        // (10 + 8 * 100 + 250) / 10
        assert_eq!(stats.avg, 106);
    }

    #[test]
    fn test_empty_buffer() {
        let stats = FrameStats::sample(&[]);
        assert_eq!(stats, FrameStats { min: 0, max: 0, avg: 0 });
    }

    #[test]
    fn test_hints() {
        let flat = FrameStats { min: 100, max: 150, avg: 120 };
        assert_eq!(flat.hint(), Some(LightingHint::LowContrast));
        let dark = FrameStats { min: 0, max: 200, avg: 40 };
        assert_eq!(dark.hint(), Some(LightingHint::TooDark));
        let bright = FrameStats { min: 20, max: 255, avg: 220 };
        assert_eq!(bright.hint(), Some(LightingHint::TooBright));
        let fine = FrameStats { min: 0, max: 255, avg: 128 };
        assert_eq!(fine.hint(), None);
    }
}
