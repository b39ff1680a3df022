use std::path::Path;

use harris_core::{CornerCandidate, Image};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::{CliError, CliResult};

const RED: Rgb<u8> = Rgb([255, 0, 0]);

fn to_rgb(img: &[u8], width: usize, height: usize) -> CliResult<RgbImage> {
    let grey = GrayImage::from_raw(width as u32, height as u32, img.to_vec()).ok_or(
        harris_detect::HarrisError::DimensionMismatch {
            width,
            height,
            expected_len: width * height,
            actual_len: img.len(),
        },
    )?;
    Ok(image::DynamicImage::ImageLuma8(grey).into_rgb8())
}

/// Greyscale image with a small red disc on every corner.
pub fn overlay_corners(
    img: &[u8],
    width: usize,
    height: usize,
    corners: &[CornerCandidate],
) -> CliResult<RgbImage> {
    let mut out = to_rgb(img, width, height)?;
    for c in corners {
        draw_filled_circle_mut(&mut out, (c.x as i32, c.y as i32), 1, RED);
    }
    Ok(out)
}

/// Place `left` and `right` side by side in a `2w × h` greyscale buffer.
pub fn matching_image(left: &[u8], right: &[u8], width: usize, height: usize) -> CliResult<Image> {
    let expected_len = width * height;
    if left.len() != expected_len || right.len() != expected_len {
        return Err(CliError::PairSizeMismatch {
            left_width: width,
            left_height: left.len() / width.max(1),
            right_width: width,
            right_height: right.len() / width.max(1),
        });
    }

    let mut out = vec![0u8; 2 * width * height];
    for ((dst, l), r) in out
        .chunks_exact_mut(2 * width)
        .zip(left.chunks_exact(width))
        .zip(right.chunks_exact(width))
    {
        dst[..width].copy_from_slice(l);
        dst[width..].copy_from_slice(r);
    }
    Ok(out)
}

/// Side-by-side pair with a red connector between the two image centres.
pub fn draw_matching_image(left: &[u8], right: &[u8], width: usize, height: usize) -> CliResult<RgbImage> {
    let joined = matching_image(left, right, width, height)?;
    let mut out = to_rgb(&joined, 2 * width, height)?;
    let y = (height / 2) as f32;
    draw_line_segment_mut(
        &mut out,
        ((width / 2) as f32, y),
        ((3 * width / 2) as f32, y),
        RED,
    );
    Ok(out)
}

pub fn save_rgb<P: AsRef<Path>>(img: &RgbImage, path: P) -> CliResult<()> {
    let path = path.as_ref();
    img.save(path).map_err(CliError::Encode)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_marks_corner() {
        let img = vec![50u8; 49];
        let corners = [CornerCandidate { x: 3, y: 3, score: 1.0 }];
        let out = overlay_corners(&img, 7, 7, &corners).unwrap();
        assert_eq!(out.dimensions(), (7, 7));
        assert_eq!(*out.get_pixel(3, 3), RED);
        assert_eq!(*out.get_pixel(4, 3), RED);
        assert_eq!(*out.get_pixel(0, 0), Rgb([50, 50, 50]));
    }

    #[test]
    fn test_overlay_corner_at_image_edge() {
        let img = vec![0u8; 16];
        let corners = [CornerCandidate { x: 0, y: 0, score: 1.0 }];
        let out = overlay_corners(&img, 4, 4, &corners).unwrap();
        assert_eq!(*out.get_pixel(0, 0), RED);
    }

    #[test]
    fn test_matching_image_layout() {
        let left = vec![1u8, 2, 3, 4];
        let right = vec![5u8, 6, 7, 8];
        let joined = matching_image(&left, &right, 2, 2).unwrap();
        assert_eq!(joined, vec![1, 2, 5, 6, 3, 4, 7, 8]);
    }

    #[test]
    fn test_matching_image_rejects_size_mismatch() {
        let left = vec![0u8; 6];
        let right = vec![0u8; 4];
        assert!(matches!(
            matching_image(&left, &right, 2, 3),
            Err(CliError::PairSizeMismatch { left_height: 3, right_height: 2, .. })
        ));
        // right is short by one pixel but rounds to the same row count
        let ragged = vec![0u8; 5];
        assert!(matches!(
            matching_image(&left, &ragged, 2, 3),
            Err(CliError::PairSizeMismatch { .. })
        ));
        // both buffers agree with each other but not with the declared size
        assert!(matching_image(&left, &left, 3, 3).is_err());
    }

    #[test]
    fn test_draw_matching_connector() {
        let left = vec![0u8; 40];
        let right = vec![0u8; 40];
        let out = draw_matching_image(&left, &right, 8, 5).unwrap();
        assert_eq!(out.dimensions(), (16, 5));
        assert_eq!(*out.get_pixel(4, 2), RED);
        assert_eq!(*out.get_pixel(8, 2), RED);
        assert_eq!(*out.get_pixel(12, 2), RED);
        assert_eq!(*out.get_pixel(2, 2), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(8, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        save_rgb(&RgbImage::from_pixel(3, 2, RED), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (3, 2));
    }
}
