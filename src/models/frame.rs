//! Borrowed frame views and their input contract.

use thiserror::Error;

/// Pixel layout reported by the frame source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One byte per pixel, row-major, no padding
    Grayscale,
    /// 16-bit packed RGB
    Rgb565,
    /// 24-bit packed RGB
    Rgb888,
    /// YUV 4:2:2 interleaved
    Yuv422,
    /// Compressed JPEG stream
    Jpeg,
}

/// Precondition violations detected before any decode attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Anything but 8-bit grayscale
    #[error("unsupported pixel format {0:?}, expected grayscale")]
    UnsupportedFormat(PixelFormat),
    /// Zero width or height
    #[error("frame has zero width or height")]
    EmptyFrame,
    /// `width * height` does not fit in `usize`
    #[error("frame dimensions {width}x{height} overflow")]
    DimensionOverflow {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
    },
    /// Buffer length differs from `width * height`
    #[error("buffer holds {actual} bytes, {width}x{height} grayscale needs {expected}")]
    SizeMismatch {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
        /// Bytes a grayscale frame of that size needs
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
}

/// Borrowed view of one captured frame.
///
/// The buffer is owned by the frame source and must not change while a scan
/// is running; the scanner only ever reads through this view.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl<'a> Frame<'a> {
    /// Wrap a buffer with an explicit pixel format
    pub fn new(data: &'a [u8], width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// Wrap a row-major 8-bit grayscale buffer
    pub fn grayscale(data: &'a [u8], width: usize, height: usize) -> Self {
        Self::new(data, width, height, PixelFormat::Grayscale)
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel layout declared by the source
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw buffer, row-major
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Check the input contract: grayscale, non-empty, exactly `width * height` bytes
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.format != PixelFormat::Grayscale {
            return Err(FrameError::UnsupportedFormat(self.format));
        }
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::EmptyFrame);
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(FrameError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })?;
        if self.data.len() != expected {
            return Err(FrameError::SizeMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Pixel row `y`. Callers validate the frame first; out-of-range rows come back empty.
    pub fn row(&self, y: usize) -> &'a [u8] {
        if y >= self.height {
            return &[];
        }
        y.checked_mul(self.width)
            .and_then(|start| start.checked_add(self.width).map(|end| start..end))
            .and_then(|range| self.data.get(range))
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grayscale() {
        let buf = vec![0u8; 12];
        assert!(Frame::grayscale(&buf, 4, 3).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_color() {
        let buf = vec![0u8; 4 * 3 * 3];
        let frame = Frame::new(&buf, 4, 3, PixelFormat::Rgb888);
        assert_eq!(
            frame.validate(),
            Err(FrameError::UnsupportedFormat(PixelFormat::Rgb888))
        );
    }

    #[test]
    fn test_validate_size_mismatch() {
        let buf = vec![0u8; 10];
        let err = Frame::grayscale(&buf, 4, 3).validate().unwrap_err();
        assert!(matches!(err, FrameError::SizeMismatch { expected: 12, actual: 10, .. }));
        assert_eq!(
            Frame::grayscale(&[], 0, 3).validate(),
            Err(FrameError::EmptyFrame)
        );
    }

    #[test]
    fn test_row_access() {
        let buf: Vec<u8> = (0..12).collect();
        let frame = Frame::grayscale(&buf, 4, 3);
        assert_eq!(frame.row(1), &[4, 5, 6, 7]);
        assert!(frame.row(3).is_empty());
    }

    #[test]
    fn test_validate_dimension_overflow() {
        let buf = [0u8; 4];
        let frame = Frame::grayscale(&buf, usize::MAX, 2);
        assert_eq!(
            frame.validate(),
            Err(FrameError::DimensionOverflow { width: usize::MAX, height: 2 })
        );
        // 2^63 + 2 wraps to 4 under unchecked multiplication
        let wrapping = Frame::grayscale(&buf, (1usize << (usize::BITS - 1)) + 2, 2);
        assert!(matches!(wrapping.validate(), Err(FrameError::DimensionOverflow { .. })));
        assert!(frame.row(1).is_empty());
    }
}
