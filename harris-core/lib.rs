#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major 8-bit grayscale image
pub type Image = Vec<u8>;

/// Row-major scalar field: an image channel, a derivative or a score map.
///
/// The field never knows its own dimensions; every stage receives the
/// declared width and height next to it.
pub type ScalarField = Vec<f64>;

/// Corner candidate ≙ strict local maximum of the thresholded cornerness map
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CornerCandidate {
    pub x: usize,
    pub y: usize,
    pub score: f64,
}

/// Parameters of the Harris pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HarrisConfig {
    /// Side of the Gaussian window used for the structure tensor (odd)
    pub gaussian_kernel_size: usize,
    /// Gaussian sigma, 0.0 derives it from the window size
    pub gaussian_sigma: f64,
    /// Harris constant `a` in `det - a * trace²`
    pub harris_constant: f64,
    /// Responses below this value are zeroed before NMS
    pub cornerness_threshold: f64,
    /// Maximum number of corners returned
    pub top_k: usize,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            gaussian_kernel_size: 5,
            gaussian_sigma: 1.0,
            harris_constant: 0.04,
            cornerness_threshold: 0.0,
            top_k: 1000,
        }
    }
}

/// Number of worker threads to use when nothing else is configured.
pub fn default_threads() -> usize {
    num_cpus::get().max(1)
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}

/// Widen an 8-bit image into a scalar field.
pub fn field_from_image(img: &[u8]) -> ScalarField {
    img.iter().map(|&v| f64::from(v)).collect()
}
