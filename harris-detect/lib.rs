//! Harris corner detection.
//!
//! The pipeline runs strictly left to right:
//!
//! ```text
//! field → Sobel gradients → structure tensor → cornerness → threshold → top-K NMS
//! ```
//!
//! Every stage takes a borrowed field plus its declared width and height and
//! returns a new field of the same size. [`HarrisDetector`] chains them for a
//! fixed image size; [`detect_corners`] is the one-shot form.

pub mod builder;
pub mod config;
pub mod convolution;
pub mod detector;
pub mod error;
pub mod gradient;
pub mod kernel;
pub mod preprocessing;
pub mod response;
pub mod selection;
pub mod structure_tensor;
pub mod threshold;

pub use builder::DetectorBuilder;
pub use config::{validate_harris_config, DetectorConfig};
pub use detector::HarrisDetector;
pub use error::{HarrisError, HarrisResult};
pub use gradient::DerivativeProducts;
pub use kernel::{gaussian_kernel, Kernel};
pub use preprocessing::ImagePreprocessing;
pub use structure_tensor::StructureTensor;

use harris_core::{CornerCandidate, HarrisConfig};

/// Run the whole pipeline once on a single field.
///
/// # Examples
/// ```
/// use harris_core::HarrisConfig;
///
/// let mut field = vec![0.0; 49];
/// field[3 * 7 + 3] = 100.0;
/// let corners = harris_detect::detect_corners(&field, 7, 7, &HarrisConfig::default()).unwrap();
/// assert_eq!(corners.len(), 1);
/// assert_eq!((corners[0].x, corners[0].y), (3, 3));
/// ```
pub fn detect_corners(
    field: &[f64],
    width: usize,
    height: usize,
    cfg: &HarrisConfig,
) -> HarrisResult<Vec<CornerCandidate>> {
    HarrisDetector::new(cfg.clone(), width, height)?.detect(field)
}
