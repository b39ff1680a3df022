use harris_core::ScalarField;

use crate::convolution::convolve_zero_padded;
use crate::error::HarrisResult;
use crate::gradient::DerivativeProducts;
use crate::kernel::{gaussian_kernel, Kernel};

/// Gaussian-weighted second moment entries at every pixel.
///
/// Per pixel the tensor is `[[gx, gxy], [gxy, gy]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureTensor {
    pub gx: ScalarField,
    pub gy: ScalarField,
    pub gxy: ScalarField,
}

impl StructureTensor {
    /// Smooth each derivative product with `window` (plain zero padding,
    /// no border override).
    pub fn aggregate(
        products: &DerivativeProducts,
        width: usize,
        height: usize,
        window: &Kernel,
    ) -> HarrisResult<Self> {
        let gx = convolve_zero_padded(&products.ix2, width, height, window)?;
        let gy = convolve_zero_padded(&products.iy2, width, height, window)?;
        let gxy = convolve_zero_padded(&products.ixiy, width, height, window)?;
        Ok(Self { gx, gy, gxy })
    }

    /// Build the Gaussian window from `(kernel_size, sigma)` and aggregate.
    pub fn aggregate_gaussian(
        products: &DerivativeProducts,
        width: usize,
        height: usize,
        kernel_size: usize,
        sigma: f64,
    ) -> HarrisResult<Self> {
        let window = gaussian_kernel(kernel_size, sigma)?;
        Self::aggregate(products, width, height, &window)
    }
}
