use crate::error::{HarrisError, HarrisResult};

/// Square, odd-sized correlation kernel stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    pub fn new(size: usize, weights: Vec<f64>) -> HarrisResult<Self> {
        let expected_len = window_len(size)?;
        if weights.len() != expected_len {
            return Err(HarrisError::InvalidKernelWeights {
                size,
                expected_len,
                actual_len: weights.len(),
            });
        }
        Ok(Self { size, weights })
    }

    /// Vertical-edge Sobel kernel, yields `Ix` under correlation.
    pub fn sobel_x() -> Self {
        Self {
            size: 3,
            weights: vec![
                -1.0, 0.0, 1.0,
                -2.0, 0.0, 2.0,
                -1.0, 0.0, 1.0,
            ],
        }
    }

    /// Horizontal-edge Sobel kernel, yields `Iy` under correlation.
    ///
    /// Positive where the row above is brighter than the row below.
    pub fn sobel_y() -> Self {
        Self {
            size: 3,
            weights: vec![
                1.0, 2.0, 1.0,
                0.0, 0.0, 0.0,
                -1.0, -2.0, -1.0,
            ],
        }
    }

    /// Kernel with a single 1.0 at the center.
    pub fn identity(size: usize) -> HarrisResult<Self> {
        let len = window_len(size)?;
        let mut weights = alloc_weights(size, len)?;
        weights.resize(len, 0.0);
        weights[len / 2] = 1.0;
        Ok(Self { size, weights })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Padding needed on each side: `(size - 1) / 2`
    pub fn half_size(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Number of taps in a `size × size` window.
///
/// Rejects even and zero sizes, and sizes whose `f64` buffer would not be
/// addressable.
fn window_len(size: usize) -> HarrisResult<usize> {
    if size == 0 || size % 2 == 0 {
        return Err(HarrisError::InvalidKernelSize(size));
    }
    match size.checked_mul(size) {
        Some(len) if len <= isize::MAX as usize / std::mem::size_of::<f64>() => Ok(len),
        _ => Err(HarrisError::InvalidKernelSize(size)),
    }
}

fn alloc_weights(size: usize, len: usize) -> HarrisResult<Vec<f64>> {
    let mut weights = Vec::new();
    weights
        .try_reserve_exact(len)
        .map_err(|_| HarrisError::InvalidKernelSize(size))?;
    Ok(weights)
}

/// Sigma derived from the window size when the caller passes 0.
pub fn auto_sigma(size: usize) -> f64 {
    ((size as f64 - 1.0) * 0.5 - 1.0) * 0.3 + 0.8
}

/// Normalized isotropic 2D Gaussian window.
///
/// Each weight is the Gaussian density at the integer offset from the
/// center; the window is then divided by its total so it sums to 1.
/// A `sigma` of 0 is replaced by [`auto_sigma`].
///
/// # Examples
/// ```
/// let k = harris_detect::kernel::gaussian_kernel(5, 1.0).unwrap();
/// assert_eq!(k.size(), 5);
/// assert!((k.sum() - 1.0).abs() < 1e-9);
/// ```
pub fn gaussian_kernel(size: usize, sigma: f64) -> HarrisResult<Kernel> {
    let len = window_len(size)?;
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(HarrisError::InvalidSigma(sigma));
    }
    let sigma = if sigma == 0.0 { auto_sigma(size) } else { sigma };

    let center = (size / 2) as f64;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let norm = 1.0 / (std::f64::consts::PI * two_sigma_sq);

    let mut weights = alloc_weights(size, len)?;
    for row in 0..size {
        for col in 0..size {
            let dy = row as f64 - center;
            let dx = col as f64 - center;
            weights.push(norm * (-(dx * dx + dy * dy) / two_sigma_sq).exp());
        }
    }

    let total: f64 = weights.iter().sum();
    // sigma so small that its square underflows
    if !total.is_finite() || total <= 0.0 {
        return Err(HarrisError::InvalidSigma(sigma));
    }
    for w in &mut weights {
        *w /= total;
    }

    log::trace!("gaussian window {size}x{size}, sigma={sigma}");
    Ok(Kernel { size, weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_properties() {
        let k = gaussian_kernel(5, 1.0).unwrap();
        assert_eq!(k.size(), 5);
        assert_eq!(k.half_size(), 2);
        assert_relative_eq!(k.sum(), 1.0, epsilon = 1e-9);
        // Peak at the center, decreasing outwards.
        assert!(k.weight(2, 2) > k.weight(2, 1));
        assert!(k.weight(2, 1) > k.weight(2, 0));
        assert!(k.weight(2, 1) > k.weight(1, 1));
    }

    #[test]
    fn test_gaussian_kernel_symmetric() {
        let k = gaussian_kernel(7, 1.5).unwrap();
        let n = k.size();
        for r in 0..n {
            for c in 0..n {
                assert_eq!(k.weight(r, c), k.weight(n - 1 - r, n - 1 - c));
                assert_eq!(k.weight(r, c), k.weight(c, r));
            }
        }
    }

    #[test]
    fn test_auto_sigma() {
        assert_relative_eq!(auto_sigma(5), 1.1, epsilon = 1e-12);
        assert_relative_eq!(auto_sigma(3), 0.8, epsilon = 1e-12);
        // sigma = 0 must match an explicit call with the derived value.
        let auto = gaussian_kernel(5, 0.0).unwrap();
        let explicit = gaussian_kernel(5, auto_sigma(5)).unwrap();
        assert_eq!(auto, explicit);
    }

    #[test]
    fn test_size_one_is_unit() {
        let k = gaussian_kernel(1, 2.0).unwrap();
        assert_eq!(k.weights(), &[1.0]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(gaussian_kernel(0, 1.0), Err(HarrisError::InvalidKernelSize(0)));
        assert_eq!(gaussian_kernel(4, 1.0), Err(HarrisError::InvalidKernelSize(4)));
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        // size * size overflows usize
        assert_eq!(
            gaussian_kernel(usize::MAX, 1.0),
            Err(HarrisError::InvalidKernelSize(usize::MAX))
        );
        // fits in usize, but not as an f64 buffer
        let huge = (1usize << (usize::BITS / 2 - 1)) + 1;
        assert_eq!(gaussian_kernel(huge, 0.0), Err(HarrisError::InvalidKernelSize(huge)));
        assert_eq!(Kernel::identity(huge), Err(HarrisError::InvalidKernelSize(huge)));
        assert_eq!(
            Kernel::new(usize::MAX, vec![1.0]),
            Err(HarrisError::InvalidKernelSize(usize::MAX))
        );
    }

    #[test]
    fn test_invalid_sigma() {
        assert_eq!(gaussian_kernel(5, -0.5), Err(HarrisError::InvalidSigma(-0.5)));
        assert!(matches!(
            gaussian_kernel(5, f64::NAN),
            Err(HarrisError::InvalidSigma(_))
        ));
    }

    #[test]
    fn test_sobel_kernels_antisymmetric() {
        let kx = Kernel::sobel_x();
        let ky = Kernel::sobel_y();
        assert_eq!(kx.sum(), 0.0);
        assert_eq!(ky.sum(), 0.0);
        assert_eq!(kx.weight(1, 0), -2.0);
        assert_eq!(kx.weight(1, 2), 2.0);
        assert_eq!(ky.weight(0, 1), 2.0);
        assert_eq!(ky.weight(2, 1), -2.0);
    }

    #[test]
    fn test_kernel_new_rejects_bad_shapes() {
        assert_eq!(
            Kernel::new(3, vec![0.0; 8]),
            Err(HarrisError::InvalidKernelWeights { size: 3, expected_len: 9, actual_len: 8 })
        );
        assert_eq!(Kernel::new(2, vec![0.0; 4]), Err(HarrisError::InvalidKernelSize(2)));
        assert!(Kernel::identity(3).is_ok());
    }
}
