//! Image I/O and dataset helpers shared by the CLI and benches.

use crate::decoder::checksum::parse_digits;
use crate::models::{Barcode, Frame, FrameStats};
use crate::pipeline::Scanner;
use crate::utils::grayscale::rgb_to_grayscale_parallel;
use crate::utils::synth::symbology_for_len;
use image::GenericImageView;
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures outside the scan itself (file and image handling)
#[derive(Debug, Error)]
pub enum ToolError {
    /// Opening or decoding an image file failed
    #[error("failed to read image {}: {source}", path.display())]
    Load {
        /// File being read
        path: PathBuf,
        /// Underlying codec or I/O error
        #[source]
        source: image::ImageError,
    },
    /// Encoding or writing an image file failed
    #[error("failed to write image {}: {source}", path.display())]
    Save {
        /// File being written
        path: PathBuf,
        /// Underlying codec or I/O error
        #[source]
        source: image::ImageError,
    },
    /// Buffer length does not match the requested dimensions
    #[error("buffer of {actual} bytes does not fit {width}x{height}")]
    BufferSize {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Bytes supplied
        actual: usize,
    },
}

fn max_dim_from_env() -> Option<u32> {
    match env::var("EAN_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as an 8-bit grayscale buffer along with its dimensions.
///
/// Large images are downscaled when `EAN_MAX_DIM` is set.
pub fn load_luma<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), ToolError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ToolError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgb8(),
        _ => img.to_rgb8(),
    };
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let gray = rgb_to_grayscale_parallel(rgb.as_raw(), width, height);
    Ok((gray, width, height))
}

/// Write a grayscale buffer as an image; format follows the extension.
pub fn save_luma<P: AsRef<Path>>(
    path: P,
    gray: Vec<u8>,
    width: usize,
    height: usize,
) -> Result<(), ToolError> {
    let path = path.as_ref();
    let actual = gray.len();
    let img = image::GrayImage::from_raw(width as u32, height as u32, gray).ok_or(
        ToolError::BufferSize {
            width,
            height,
            actual,
        },
    )?;
    img.save(path).map_err(|source| ToolError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("EAN_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Default bench limit from environment variables.
///
/// Returns `None` (full dataset) when `EAN_BENCH_LIMIT` is unset or `0`.
pub fn bench_limit_from_env() -> Option<usize> {
    match env::var("EAN_BENCH_LIMIT") {
        Ok(value) => value
            .parse::<usize>()
            .ok()
            .and_then(|v| if v == 0 { None } else { Some(v) }),
        Err(_) => None,
    }
}

/// Smoke test flag from environment variables.
pub fn smoke_from_env() -> bool {
    matches!(
        env::var("EAN_SMOKE").as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

/// Expected code for a dataset image, taken from the leading digits of its
/// file name (`4006381333931.png`, `96385074_blurry.jpg`).
pub fn expected_code<P: AsRef<Path>>(path: P) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_string_lossy().into_owned();
    let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    let parsed = parse_digits(&digits)?;
    symbology_for_len(parsed.len())?;
    Some(digits)
}

/// Iterate dataset image paths with optional smoke list and limit.
pub fn dataset_iter<P: AsRef<Path>>(
    root: P,
    limit: Option<usize>,
    smoke: bool,
) -> impl Iterator<Item = PathBuf> {
    let root = root.as_ref();
    let mut images = if smoke {
        load_smoke_list(root).unwrap_or_else(|| collect_images(root))
    } else {
        collect_images(root)
    };

    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn load_smoke_list(root: &Path) -> Option<Vec<PathBuf>> {
    let contents = fs::read_to_string(root.join("_smoke.txt")).ok()?;
    let paths: Vec<PathBuf> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let candidate = Path::new(line);
            if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                root.join(candidate)
            }
        })
        .filter(|path| path.exists())
        .collect();
    if paths.is_empty() { None } else { Some(paths) }
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp") {
                    images.push(path);
                }
            }
        }
    }

    images
}

/// Result of scanning one dataset image
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Image file
    pub path: PathBuf,
    /// Digits parsed from the file name
    pub expected: Option<String>,
    /// Scan result
    pub decoded: Option<Barcode>,
    /// Frame statistics when nothing decoded
    pub stats: Option<FrameStats>,
    /// Load failure, if the image could not be read
    pub error: Option<String>,
}

impl BatchEntry {
    /// Decoded digits equal the digits in the file name
    pub fn is_correct(&self) -> bool {
        match (&self.expected, &self.decoded) {
            (Some(expected), Some(code)) => expected == code.data(),
            _ => false,
        }
    }
}

/// Aggregate reading rate over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Images attempted
    pub total: usize,
    /// Images with any decoded symbol
    pub decoded: usize,
    /// Decodes matching the file name
    pub correct: usize,
    /// Images whose file name carries an expected code
    pub labelled: usize,
    /// Images that failed to load
    pub errors: usize,
}

impl BatchSummary {
    /// Tally a batch
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            acc.total += 1;
            acc.decoded += entry.decoded.is_some() as usize;
            acc.correct += entry.is_correct() as usize;
            acc.labelled += entry.expected.is_some() as usize;
            acc.errors += entry.error.is_some() as usize;
            acc
        })
    }

    /// Percentage of labelled images decoded to the expected digits
    pub fn reading_rate(&self) -> f64 {
        if self.labelled == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.labelled as f64
        }
    }
}

/// Scan a list of images in parallel, one scanner per worker thread
pub fn scan_batch(paths: &[PathBuf]) -> Vec<BatchEntry> {
    paths
        .par_iter()
        .map_init(Scanner::new, |scanner, path| {
            let expected = expected_code(path);
            match load_luma(path) {
                Ok((gray, width, height)) => {
                    let report = scanner.scan(&Frame::grayscale(&gray, width, height));
                    BatchEntry {
                        path: path.clone(),
                        expected,
                        decoded: report.barcode,
                        stats: report.stats,
                        error: None,
                    }
                }
                Err(err) => {
                    log::warn!("{err}");
                    BatchEntry {
                        path: path.clone(),
                        expected,
                        decoded: None,
                        stats: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect()
}
