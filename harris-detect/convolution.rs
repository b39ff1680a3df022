// Zero-padded 2D correlation over a ScalarField.
//
// The input is treated as if surrounded by `half` rows/columns of zeros,
// so border outputs receive nothing from outside the image (no clamping,
// no reflection). The kernel is applied as given, not mirrored.

use harris_core::ScalarField;
use rayon::prelude::*;

use crate::error::{validate_field, HarrisResult};
use crate::kernel::Kernel;

/// Correlate `src` with `kernel`, zero-padding by `kernel.half_size()`.
///
/// Output has the same `width × height` as the input. Rows are processed
/// in parallel; each output sample accumulates its taps in a fixed order,
/// so results do not depend on the thread count.
pub fn convolve_zero_padded(
    src: &[f64],
    width: usize,
    height: usize,
    kernel: &Kernel,
) -> HarrisResult<ScalarField> {
    validate_field(src, width, height)?;

    let k = kernel.size();
    let half = kernel.half_size();
    let mut dst = vec![0.0; width * height];

    dst.par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            // Kernel rows that land inside the image for this output row.
            let ky_start = half.saturating_sub(y);
            let ky_end = k.min(height + half - y);

            for (x, out) in row.iter_mut().enumerate() {
                let kx_start = half.saturating_sub(x);
                let kx_end = k.min(width + half - x);

                let mut acc = 0.0;
                for ky in ky_start..ky_end {
                    let sy = y + ky - half;
                    let src_row = &src[sy * width..(sy + 1) * width];
                    for kx in kx_start..kx_end {
                        acc += kernel.weight(ky, kx) * src_row[x + kx - half];
                    }
                }
                *out = acc;
            }
        });

    Ok(dst)
}
