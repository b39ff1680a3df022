use harris_core::ScalarField;
use rayon::prelude::*;

use crate::error::{validate_field, HarrisError, HarrisResult};

/// Keep samples `>= threshold`, replace everything else with 0.
///
/// NaN samples never pass the comparison and come out as 0.
pub fn threshold_ge(
    src: &[f64],
    width: usize,
    height: usize,
    threshold: f64,
) -> HarrisResult<ScalarField> {
    validate_field(src, width, height)?;
    if threshold.is_nan() {
        return Err(HarrisError::InvalidThreshold(threshold));
    }

    Ok(src
        .par_iter()
        .map(|&v| if v >= threshold { v } else { 0.0 })
        .collect())
}
