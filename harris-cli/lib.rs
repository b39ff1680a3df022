use std::path::Path;
use std::time::Instant;

pub use harris_core::{CornerCandidate, HarrisConfig, Image};
use harris_detect::{validate_harris_config, HarrisDetector, HarrisError, ImagePreprocessing};
use serde::Serialize;

pub mod loader;
pub mod visualize;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Harris error: {0}")]
    Harris(#[from] HarrisError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Encode(image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Unsupported config file extension: {0}")]
    UnsupportedConfig(String),

    #[error("Image pair size mismatch: left {left_width}x{left_height}, right {right_width}x{right_height}")]
    PairSizeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
}

pub type CliResult<T> = Result<T, CliError>;

/// Load pipeline parameters from a `.json` or `.toml` file.
///
/// Missing fields fall back to their defaults.
pub fn load_harris_config<P: AsRef<Path>>(path: P) -> CliResult<HarrisConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let cfg: HarrisConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        other => return Err(CliError::UnsupportedConfig(other.unwrap_or("").to_string())),
    };
    validate_harris_config(&cfg)?;
    Ok(cfg)
}

/// Command-line overrides applied on top of a base configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub kernel_size: Option<usize>,
    pub sigma: Option<f64>,
    pub harris_constant: Option<f64>,
    pub threshold: Option<f64>,
    pub top_k: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut cfg: HarrisConfig) -> HarrisConfig {
        if let Some(size) = self.kernel_size {
            cfg.gaussian_kernel_size = size;
        }
        if let Some(sigma) = self.sigma {
            cfg.gaussian_sigma = sigma;
        }
        if let Some(a) = self.harris_constant {
            cfg.harris_constant = a;
        }
        if let Some(t) = self.threshold {
            cfg.cornerness_threshold = t;
        }
        if let Some(k) = self.top_k {
            cfg.top_k = k;
        }
        cfg
    }
}

/// Corners found in both images of a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCorners {
    pub left: Vec<CornerCandidate>,
    pub right: Vec<CornerCandidate>,
}

/// Runs the Harris pipeline on both images of a stereo/panorama pair.
pub struct PairDetector {
    detector: HarrisDetector,
    preprocess: bool,
}

impl PairDetector {
    /// Create a detector for a pair of `width × height` images.
    pub fn new(cfg: HarrisConfig, width: usize, height: usize, preprocess: bool) -> CliResult<Self> {
        let detector = HarrisDetector::new(cfg, width, height)?;
        Ok(Self {
            detector,
            preprocess,
        })
    }

    /// Smooth and stretch an image if preprocessing is enabled.
    pub fn prepare(&self, img: &[u8]) -> CliResult<Image> {
        if !self.preprocess {
            return Ok(img.to_vec());
        }
        let (w, h) = self.detector.dimensions();
        Ok(ImagePreprocessing::prepare(img, w, h)?)
    }

    /// Prepare both images concurrently.
    pub fn prepare_pair(&self, left: &[u8], right: &[u8]) -> CliResult<(Image, Image)> {
        let start = Instant::now();
        let (l, r) = rayon::join(|| self.prepare(left), || self.prepare(right));
        log::info!("elapsed time image preparation: {:.2?}", start.elapsed());
        Ok((l?, r?))
    }

    /// Detect corners on both (already prepared) images concurrently.
    pub fn detect_pair(&self, left: &[u8], right: &[u8]) -> CliResult<PairCorners> {
        let start = Instant::now();
        let (l, r) = rayon::join(
            || self.detector.detect_image(left),
            || self.detector.detect_image(right),
        );
        let corners = PairCorners { left: l?, right: r? };
        log::info!(
            "elapsed time corner detection: {:.2?} ({} left, {} right)",
            start.elapsed(),
            corners.left.len(),
            corners.right.len()
        );
        Ok(corners)
    }

    /// Get reference to underlying detector
    pub fn detector(&self) -> &HarrisDetector {
        &self.detector
    }
}

/// Both images of a pair must share their dimensions.
pub fn check_pair_dimensions(left: (usize, usize), right: (usize, usize)) -> CliResult<()> {
    if left != right {
        return Err(CliError::PairSizeMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        });
    }
    Ok(())
}
