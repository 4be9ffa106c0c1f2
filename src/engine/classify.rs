//! Per-image match predicates: low saturation (grayscale-ish pictures) and resolution below a threshold.

use image::{DynamicImage, ImageReader, RgbImage};
use log::debug;
use std::path::Path;
use thiserror::Error;

use crate::utils::config::SaturationConsts;

/// Why an image could not be classified. Callers collapse this to "no match".
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,
}

/// Bad threshold input, rejected before any walk starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a positive integer, got {value:?}")]
    NotPositiveInteger { field: &'static str, value: String },
}

/// A per-file predicate. `Ok(false)` is a confirmed non-match; `Err` means the file could not be read as an image.
pub trait Classifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn classify(&self, path: &Path) -> Result<bool, DecodeError>;
}

/// Classify and treat any decode failure as a non-match.
pub fn is_match(classifier: &dyn Classifier, path: &Path) -> bool {
    match classifier.classify(path) {
        Ok(m) => m,
        Err(e) => {
            debug!("{}: treating {} as non-match: {}", classifier.name(), path.display(), e);
            false
        }
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, DecodeError> {
    // Sniff the header so a mislabelled extension still decodes.
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

// ---- Low saturation ----

/// HSV saturation of one 8-bit RGB pixel, on the 0..=255 scale (floored).
pub fn saturation(r: u8, g: u8, b: u8) -> u8 {
    let max = r.max(g).max(b) as u32;
    let min = r.min(g).min(b) as u32;
    if max == 0 {
        return 0;
    }
    ((max - min) * 255 / max) as u8
}

/// 256-bucket histogram of the saturation channel.
pub fn saturation_histogram(img: &RgbImage) -> [u64; SaturationConsts::BUCKETS] {
    let mut hist = [0u64; SaturationConsts::BUCKETS];
    for px in img.pixels() {
        let [r, g, b] = px.0;
        hist[saturation(r, g, b) as usize] += 1;
    }
    hist
}

/// Share of pixels in buckets `0..cutoff`. None for an empty histogram.
pub fn low_saturation_ratio(hist: &[u64; SaturationConsts::BUCKETS], cutoff: usize) -> Option<f64> {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return None;
    }
    let low: u64 = hist[..cutoff.min(hist.len())].iter().sum();
    Some(low as f64 / total as f64)
}

/// Matches images whose saturation mass sits almost entirely in the lowest buckets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LowSaturation {
    /// Buckets `0..cutoff_bucket` count as low saturation.
    pub cutoff_bucket: usize,
    /// Match when the low-saturation share is strictly greater than this.
    pub min_ratio: f64,
}

impl Default for LowSaturation {
    fn default() -> Self {
        Self {
            cutoff_bucket: SaturationConsts::CUTOFF_BUCKET,
            min_ratio: SaturationConsts::MIN_RATIO,
        }
    }
}

impl LowSaturation {
    /// None when `cutoff_bucket` is outside `1..=256` or `min_ratio` outside `0.0..1.0`.
    pub fn new(cutoff_bucket: usize, min_ratio: f64) -> Option<Self> {
        let cutoff_ok = (1..=SaturationConsts::BUCKETS).contains(&cutoff_bucket);
        let ratio_ok = (0.0..1.0).contains(&min_ratio);
        (cutoff_ok && ratio_ok).then_some(Self {
            cutoff_bucket,
            min_ratio,
        })
    }

    /// Predicate on an already decoded image.
    pub fn matches_image(&self, img: &DynamicImage) -> Result<bool, DecodeError> {
        let hist = saturation_histogram(&img.to_rgb8());
        let ratio = low_saturation_ratio(&hist, self.cutoff_bucket).ok_or(DecodeError::Empty)?;
        Ok(ratio > self.min_ratio)
    }
}

impl Classifier for LowSaturation {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn classify(&self, path: &Path) -> Result<bool, DecodeError> {
        self.matches_image(&open_image(path)?)
    }
}

// ---- Resolution ----

/// Parse a threshold typed by the operator. Only positive integers are accepted.
pub fn parse_threshold(field: &'static str, text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field });
    }
    match trimmed.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(InputError::NotPositiveInteger {
            field,
            value: text.to_string(),
        }),
    }
}

/// Matches images narrower than `min_width` or shorter than `min_height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub min_width: u32,
    pub min_height: u32,
}

impl Resolution {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Build from raw text fields; both are required.
    pub fn from_text(width: &str, height: &str) -> Result<Self, InputError> {
        Ok(Self::new(
            parse_threshold("width", width)?,
            parse_threshold("height", height)?,
        ))
    }

    pub fn matches_dimensions(&self, width: u32, height: u32) -> bool {
        width < self.min_width || height < self.min_height
    }
}

impl Classifier for Resolution {
    fn name(&self) -> &'static str {
        "lowres"
    }

    fn classify(&self, path: &Path) -> Result<bool, DecodeError> {
        let (w, h) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(self.matches_dimensions(w, h))
    }
}
