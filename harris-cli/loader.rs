use std::path::Path;

use harris_core::Image;
use image::{ImageReader, RgbImage};

use crate::CliResult;

/// Decode an image file into a row-major greyscale buffer.
///
/// Returns `(width, height, pixels)`. The format is guessed from the file
/// contents, not the extension.
pub fn load_greyscale<P: AsRef<Path>>(path: P) -> CliResult<(usize, usize, Image)> {
    let path = path.as_ref();
    let rgb = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();
    let (w, h) = rgb.dimensions();
    log::debug!("loaded {} ({}x{})", path.display(), w, h);
    Ok((w as usize, h as usize, luma_from_rgb(&rgb)))
}

/// `round(0.299 R + 0.587 G + 0.114 B)` per pixel.
pub fn luma_from_rgb(rgb: &RgbImage) -> Image {
    rgb.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            y.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use image::{GrayImage, Luma, Rgb};

    #[test]
    fn test_luma_weights() {
        let mut rgb = RgbImage::new(4, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        rgb.put_pixel(3, 0, Rgb([200, 200, 200]));
        // 76.245, 149.685, 29.07, 200
        assert_eq!(luma_from_rgb(&rgb), vec![76, 150, 29, 200]);
    }

    #[test]
    fn test_load_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.png");
        let img = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));
        img.save(&path).unwrap();

        let (w, h, pixels) = load_greyscale(&path).unwrap();
        assert_eq!((w, h), (5, 3));
        assert_eq!(pixels, img.into_raw());
    }

    #[test]
    fn test_load_colour_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colour.png");
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])).save(&path).unwrap();

        let (_, _, pixels) = load_greyscale(&path).unwrap();
        assert_eq!(pixels, vec![76; 4]);
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();
        assert!(matches!(load_greyscale(&path), Err(CliError::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(load_greyscale(&path), Err(CliError::Io(_))));
    }
}
