use harris_core::{Image, ScalarField};
use rayon::prelude::*;

use crate::error::{HarrisError, HarrisResult};

/// Denoising and contrast stretch applied before the Harris pipeline.
///
/// The pipeline itself never calls these; the CLI runs them on freshly
/// loaded images.
pub struct ImagePreprocessing;

impl ImagePreprocessing {
    /// 3x3 Gaussian average `[1 2 1; 2 4 2; 1 2 1] / 16`, border pixels
    /// repeated.
    pub fn gaussian_average_3x3(img: &[u8], width: usize, height: usize) -> HarrisResult<ScalarField> {
        Self::validate_image(img, width, height)?;

        const WEIGHTS: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
        let mut dst = vec![0.0; width * height];

        dst.par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let mut acc = 0.0;
                    for (ky, weights_row) in WEIGHTS.iter().enumerate() {
                        let sy = (y + ky).saturating_sub(1).min(height - 1);
                        for (kx, &w) in weights_row.iter().enumerate() {
                            let sx = (x + kx).saturating_sub(1).min(width - 1);
                            acc += w * f64::from(img[sy * width + sx]);
                        }
                    }
                    *out = acc / 16.0;
                }
            });

        Ok(dst)
    }

    /// Linear stretch of `[min, max]` onto `[0, 255]`, rounded.
    ///
    /// A constant field has no range to stretch and maps to all zeros.
    pub fn stretch_to_u8(field: &[f64], width: usize, height: usize) -> HarrisResult<Image> {
        crate::error::validate_field(field, width, height)?;

        let (min, max) = field
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        if max <= min {
            return Ok(vec![0; field.len()]);
        }

        let scale = 255.0 / (max - min);
        Ok(field
            .par_iter()
            .map(|&v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
            .collect())
    }

    /// Smooth then stretch, the preparation applied to each input image.
    pub fn prepare(img: &[u8], width: usize, height: usize) -> HarrisResult<Image> {
        let smoothed = Self::gaussian_average_3x3(img, width, height)?;
        Self::stretch_to_u8(&smoothed, width, height)
    }

    fn validate_image(img: &[u8], width: usize, height: usize) -> HarrisResult<()> {
        if width == 0 || height == 0 {
            return Err(HarrisError::InvalidImageSize { width, height });
        }
        if img.len() != width * height {
            return Err(HarrisError::DimensionMismatch {
                width,
                height,
                expected_len: width * height,
                actual_len: img.len(),
            });
        }
        Ok(())
    }
}
