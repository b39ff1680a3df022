#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HarrisError {
    #[error("Invalid image dimensions: {width}x{height} (must be > 0)")]
    InvalidImageSize { width: usize, height: usize },

    #[error("Invalid kernel size: {0} (must be odd, > 0 and fit in memory)")]
    InvalidKernelSize(usize),

    #[error("Kernel of size {size} needs {expected_len} weights, got {actual_len}")]
    InvalidKernelWeights {
        size: usize,
        expected_len: usize,
        actual_len: usize,
    },

    #[error("Invalid sigma: {0} (must be finite and >= 0)")]
    InvalidSigma(f64),

    #[error("Invalid Harris constant: {0} (must be finite)")]
    InvalidHarrisConstant(f64),

    #[error("Invalid cornerness threshold: {0} (must not be NaN)")]
    InvalidThreshold(f64),

    #[error("Field length mismatch for {width}x{height}: expected {expected_len}, got {actual_len}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected_len: usize,
        actual_len: usize,
    },
}

impl HarrisError {
    /// True for errors caused by a bad parameter rather than by a bad field.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, HarrisError::DimensionMismatch { .. })
    }
}

pub type HarrisResult<T> = Result<T, HarrisError>;

/// Checks a field against its declared dimensions.
pub fn validate_field(field: &[f64], width: usize, height: usize) -> HarrisResult<()> {
    if width == 0 || height == 0 {
        return Err(HarrisError::InvalidImageSize { width, height });
    }
    let expected_len = width * height;
    if field.len() != expected_len {
        return Err(HarrisError::DimensionMismatch {
            width,
            height,
            expected_len,
            actual_len: field.len(),
        });
    }
    Ok(())
}
