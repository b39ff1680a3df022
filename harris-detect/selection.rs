// Non-maximum suppression over the 8-neighbourhood and top-K selection.
//
// The map is treated as if padded by one ring of zeros. A pixel survives
// only if it is strictly greater than all 8 padded neighbours, so ties
// (including ties with the padding) are never selected and a zero-valued
// pixel can never be a corner.

use std::collections::HashSet;

use harris_core::CornerCandidate;
use rayon::prelude::*;

use crate::error::{validate_field, HarrisResult};

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Sample with zero padding outside the image.
#[inline]
fn padded(field: &[f64], width: usize, height: usize, x: isize, y: isize) -> f64 {
    if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
        0.0
    } else {
        field[y as usize * width + x as usize]
    }
}

/// True if `(x, y)` is strictly greater than every zero-padded neighbour.
pub fn is_strict_local_max(field: &[f64], width: usize, height: usize, x: usize, y: usize) -> bool {
    let v = field[y * width + x];
    NEIGHBOURS.iter().all(|&(dx, dy)| {
        v > padded(field, width, height, x as isize + dx, y as isize + dy)
    })
}

/// All strict local maxima in row-major scan order.
pub fn local_maxima(field: &[f64], width: usize, height: usize) -> HarrisResult<Vec<CornerCandidate>> {
    validate_field(field, width, height)?;

    let rows: Vec<Vec<CornerCandidate>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .filter(|&x| is_strict_local_max(field, width, height, x, y))
                .map(|x| CornerCandidate {
                    x,
                    y,
                    score: field[y * width + x],
                })
                .collect()
        })
        .collect();

    Ok(rows.into_iter().flatten().collect())
}

/// Strongest `k` strict local maxima, sorted by score descending.
///
/// The sort is stable, so equal scores keep their row-major scan order.
/// Exact duplicates are removed before truncation.
pub fn select_top_k(
    field: &[f64],
    width: usize,
    height: usize,
    k: usize,
) -> HarrisResult<Vec<CornerCandidate>> {
    let mut candidates = local_maxima(field, width, height)?;
    log::trace!("{} strict local maxima", candidates.len());

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|c| seen.insert((c.x, c.y, c.score.to_bits())));

    candidates.truncate(k);
    Ok(candidates)
}
