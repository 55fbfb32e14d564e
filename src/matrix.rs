//! Seam for the external 2-D (QR) decoder.
//!
//! The scanner owns exactly one decoder instance for its whole lifetime and
//! asks it first on every frame. Any closure with the right shape also works.

/// Decodes zero or more 2-D payloads from a grayscale buffer
pub trait MatrixDecoder {
    /// Every payload found in a `width` x `height` row-major buffer
    fn decode(&mut self, gray: &[u8], width: usize, height: usize) -> Vec<String>;
}

impl<F> MatrixDecoder for F
where
    F: FnMut(&[u8], usize, usize) -> Vec<String>,
{
    fn decode(&mut self, gray: &[u8], width: usize, height: usize) -> Vec<String> {
        self(gray, width, height)
    }
}

/// Linear-only scanning: never reports a 2-D payload
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMatrixDecoder;

impl MatrixDecoder for NoMatrixDecoder {
    fn decode(&mut self, _gray: &[u8], _width: usize, _height: usize) -> Vec<String> {
        Vec::new()
    }
}

/// QR decoding backed by `rqrr`
#[cfg(feature = "qr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

#[cfg(feature = "qr")]
impl MatrixDecoder for RqrrDecoder {
    fn decode(&mut self, gray: &[u8], width: usize, height: usize) -> Vec<String> {
        if gray.len() < width * height {
            return Vec::new();
        }
        let mut img =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| gray[y * width + x]);
        img.detect_grids()
            .iter()
            .filter_map(|grid| grid.decode().ok())
            .map(|(_, content)| content)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matrix_decoder() {
        assert!(NoMatrixDecoder.decode(&[0; 4], 2, 2).is_empty());
    }

    #[test]
    fn test_closure_decoder() {
        let mut calls = 0;
        let mut dec = |_: &[u8], w: usize, h: usize| {
            calls += 1;
            vec![format!("{w}x{h}")]
        };
        assert_eq!(MatrixDecoder::decode(&mut dec, &[0; 6], 3, 2), vec!["3x2"]);
        assert_eq!(calls, 1);
    }
}
