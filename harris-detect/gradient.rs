// Sobel gradients and their elementwise products.
//
// The derivative fields come from zero-padded correlation with the fixed
// Sobel kernels, after which the outermost rows and columns are overwritten
// with exact zeros. That override is applied on top of the padding, not
// instead of it: border gradients are discarded outright.

use harris_core::ScalarField;
use rayon::prelude::*;

use crate::convolution::convolve_zero_padded;
use crate::error::{validate_field, HarrisResult};
use crate::kernel::Kernel;

/// Per-pixel products of the Sobel derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeProducts {
    /// `Ix ⊙ Ix`
    pub ix2: ScalarField,
    /// `Iy ⊙ Iy`
    pub iy2: ScalarField,
    /// `Ix ⊙ Iy`
    pub ixiy: ScalarField,
}

/// Compute `(Ix, Iy)` with forced-zero borders.
pub fn sobel_gradients(
    src: &[f64],
    width: usize,
    height: usize,
) -> HarrisResult<(ScalarField, ScalarField)> {
    let mut ix = convolve_zero_padded(src, width, height, &Kernel::sobel_x())?;
    let mut iy = convolve_zero_padded(src, width, height, &Kernel::sobel_y())?;
    zero_border(&mut ix, width, height);
    zero_border(&mut iy, width, height);
    Ok((ix, iy))
}

/// Sobel derivatives followed by their Hadamard products.
pub fn derivative_products(
    src: &[f64],
    width: usize,
    height: usize,
) -> HarrisResult<DerivativeProducts> {
    let (ix, iy) = sobel_gradients(src, width, height)?;
    hadamard_products(&ix, &iy, width, height)
}

/// Elementwise `Ix², Iy², IxIy` from precomputed gradients.
pub fn hadamard_products(
    ix: &[f64],
    iy: &[f64],
    width: usize,
    height: usize,
) -> HarrisResult<DerivativeProducts> {
    validate_field(ix, width, height)?;
    validate_field(iy, width, height)?;

    let n = width * height;
    let mut ix2 = vec![0.0; n];
    let mut iy2 = vec![0.0; n];
    let mut ixiy = vec![0.0; n];

    ix2.par_iter_mut()
        .zip(iy2.par_iter_mut())
        .zip(ixiy.par_iter_mut())
        .zip(ix.par_iter().zip(iy.par_iter()))
        .for_each(|(((xx, yy), xy), (&gx, &gy))| {
            *xx = gx * gx;
            *yy = gy * gy;
            *xy = gx * gy;
        });

    Ok(DerivativeProducts { ix2, iy2, ixiy })
}

/// Overwrite the first/last row and first/last column with 0.
fn zero_border(field: &mut [f64], width: usize, height: usize) {
    for x in 0..width {
        field[x] = 0.0;
        field[(height - 1) * width + x] = 0.0;
    }
    for y in 0..height {
        field[y * width] = 0.0;
        field[y * width + width - 1] = 0.0;
    }
}
