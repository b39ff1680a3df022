use std::time::Instant;

use harris_core::{field_from_image, CornerCandidate, HarrisConfig, ScalarField};

use crate::config::validate_harris_config;
use crate::error::{validate_field, HarrisError, HarrisResult};
use crate::gradient::{derivative_products, DerivativeProducts};
use crate::kernel::{gaussian_kernel, Kernel};
use crate::response::cornerness_map;
use crate::selection::select_top_k;
use crate::structure_tensor::StructureTensor;
use crate::threshold::threshold_ge;

/// Harris corner detector for images of a fixed size.
///
/// Holds no per-image state: the Gaussian window is built once in
/// [`HarrisDetector::new`] and every detection call borrows `&self`, so a
/// single detector can serve several threads at once.
#[derive(Debug, Clone)]
pub struct HarrisDetector {
    cfg: HarrisConfig,
    w: usize,
    h: usize,
    window: Kernel,
}

impl HarrisDetector {
    /// Creates a new detector with validation
    pub fn new(cfg: HarrisConfig, width: usize, height: usize) -> HarrisResult<Self> {
        if width == 0 || height == 0 {
            return Err(HarrisError::InvalidImageSize { width, height });
        }
        validate_harris_config(&cfg)?;
        let window = gaussian_kernel(cfg.gaussian_kernel_size, cfg.gaussian_sigma)?;

        Ok(Self {
            cfg,
            w: width,
            h: height,
            window,
        })
    }

    fn validate_field(&self, field: &[f64]) -> HarrisResult<()> {
        validate_field(field, self.w, self.h)
    }

    /// `Ix², Iy², IxIy` with forced-zero borders.
    pub fn derivative_products(&self, field: &[f64]) -> HarrisResult<DerivativeProducts> {
        self.validate_field(field)?;
        derivative_products(field, self.w, self.h)
    }

    /// Gaussian-smoothed structure tensor.
    pub fn structure_tensor(&self, field: &[f64]) -> HarrisResult<StructureTensor> {
        let products = self.derivative_products(field)?;
        StructureTensor::aggregate(&products, self.w, self.h, &self.window)
    }

    /// Raw Harris response map, before thresholding.
    ///
    /// Positive → corner, negative → edge, near zero → flat.
    pub fn corner_response(&self, field: &[f64]) -> HarrisResult<ScalarField> {
        let tensor = self.structure_tensor(field)?;
        cornerness_map(&tensor, self.w, self.h, self.cfg.harris_constant)
    }

    /// Response map with everything below the configured threshold zeroed.
    pub fn thresholded_response(&self, field: &[f64]) -> HarrisResult<ScalarField> {
        let response = self.corner_response(field)?;
        threshold_ge(&response, self.w, self.h, self.cfg.cornerness_threshold)
    }

    /// Detect corners in a scalar field.
    ///
    /// Returns at most `top_k` candidates sorted by score (descending).
    pub fn detect(&self, field: &[f64]) -> HarrisResult<Vec<CornerCandidate>> {
        let start = Instant::now();
        let tensor = self.structure_tensor(field)?;
        log::debug!("structure tensor: {:.2?}", start.elapsed());

        let t = Instant::now();
        let response = cornerness_map(&tensor, self.w, self.h, self.cfg.harris_constant)?;
        let thresholded = threshold_ge(&response, self.w, self.h, self.cfg.cornerness_threshold)?;
        log::debug!("cornerness + threshold: {:.2?}", t.elapsed());

        let t = Instant::now();
        let corners = select_top_k(&thresholded, self.w, self.h, self.cfg.top_k)?;
        log::debug!("top-k selection: {:.2?}", t.elapsed());
        log::debug!(
            "{}x{}: {} corners in {:.2?}",
            self.w,
            self.h,
            corners.len(),
            start.elapsed()
        );
        Ok(corners)
    }

    /// Detect corners in an 8-bit greyscale image.
    pub fn detect_image(&self, img: &[u8]) -> HarrisResult<Vec<CornerCandidate>> {
        self.detect(&field_from_image(img))
    }

    /// Get detector configuration
    pub fn config(&self) -> &HarrisConfig {
        &self.cfg
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    /// Gaussian window used for the structure tensor
    pub fn window(&self) -> &Kernel {
        &self.window
    }
}
