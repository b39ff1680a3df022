use harris_core::ScalarField;
use rayon::prelude::*;

use crate::error::{validate_field, HarrisResult};
use crate::structure_tensor::StructureTensor;

/// Harris cornerness for one pixel: `det(M) - a * trace(M)²`
/// with `M = [[gx, gxy], [gxy, gy]]`.
///
/// Positive at corners, negative along edges, near zero on flat regions.
#[inline]
pub fn harris_score(gx: f64, gy: f64, gxy: f64, a: f64) -> f64 {
    let trace = gx + gy;
    gx * gy - gxy * gxy - a * (trace * trace)
}

/// Cornerness map from the smoothed structure tensor fields.
pub fn cornerness_map(
    tensor: &StructureTensor,
    width: usize,
    height: usize,
    harris_constant: f64,
) -> HarrisResult<ScalarField> {
    validate_field(&tensor.gx, width, height)?;
    validate_field(&tensor.gy, width, height)?;
    validate_field(&tensor.gxy, width, height)?;

    let response = tensor
        .gx
        .par_iter()
        .zip(tensor.gy.par_iter())
        .zip(tensor.gxy.par_iter())
        .map(|((&gx, &gy), &gxy)| harris_score(gx, gy, gxy, harris_constant))
        .collect();

    Ok(response)
}
