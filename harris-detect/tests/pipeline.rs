use approx::assert_relative_eq;
use harris_core::HarrisConfig;
use harris_detect::{detect_corners, DetectorBuilder, HarrisDetector, HarrisError};

fn single_impulse(size: usize, at: (usize, usize), value: f64) -> Vec<f64> {
    let mut field = vec![0.0; size * size];
    field[at.1 * size + at.0] = value;
    field
}

fn textured(width: usize, height: usize) -> Vec<f64> {
    let mut img = vec![0.0; width * height];
    for y in 0..height {
        for x in 0..width {
            let block = ((x / 6) * 37 + (y / 6) * 91) % 255;
            img[y * width + x] = (block as f64 + ((x * y) % 13) as f64).min(255.0);
        }
    }
    img
}

#[test]
fn test_single_pixel_7x7_yields_one_corner() {
    let field = single_impulse(7, (3, 3), 100.0);
    let corners = detect_corners(&field, 7, 7, &HarrisConfig::default()).unwrap();

    assert_eq!(corners.len(), 1);
    assert_eq!((corners[0].x, corners[0].y), (3, 3));
    assert_relative_eq!(corners[0].score, 88_269_692.0, max_relative = 1e-6);
}

#[test]
fn test_single_pixel_7x7_response_map() {
    let det = HarrisDetector::new(HarrisConfig::default(), 7, 7).unwrap();
    let field = single_impulse(7, (3, 3), 100.0);
    let response = det.corner_response(&field).unwrap();
    let thresholded = det.thresholded_response(&field).unwrap();

    // The image corners are slightly negative and get zeroed.
    for &i in &[0, 6, 42, 48] {
        assert!(response[i] < 0.0);
        assert_eq!(thresholded[i], 0.0);
    }
    // The centre dominates its neighbours.
    let centre = response[3 * 7 + 3];
    for &i in &[2 * 7 + 2, 2 * 7 + 3, 3 * 7 + 2, 4 * 7 + 4] {
        assert!(response[i] < centre);
    }
    // Symmetric under transposition.
    for y in 0..7 {
        for x in 0..7 {
            assert_relative_eq!(response[y * 7 + x], response[x * 7 + y], max_relative = 1e-9);
        }
    }
}

#[test]
fn test_threshold_above_peak_removes_everything() {
    let field = single_impulse(7, (3, 3), 100.0);
    let cfg = HarrisConfig {
        cornerness_threshold: 1e9,
        ..HarrisConfig::default()
    };
    assert!(detect_corners(&field, 7, 7, &cfg).unwrap().is_empty());
}

#[test]
fn test_deterministic_output() {
    let (w, h) = (96, 64);
    let img = textured(w, h);
    let det = HarrisDetector::new(HarrisConfig::default(), w, h).unwrap();
    let a = det.detect(&img).unwrap();
    let b = det.detect(&img).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a.len(), b.len());
    for (ca, cb) in a.iter().zip(&b) {
        assert_eq!((ca.x, ca.y, ca.score.to_bits()), (cb.x, cb.y, cb.score.to_bits()));
    }
}

#[test]
fn test_thread_count_does_not_change_results() {
    let (w, h) = (80, 60);
    let img = textured(w, h);
    let det = HarrisDetector::new(HarrisConfig::default(), w, h).unwrap();

    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| det.detect(&img).unwrap())
    };
    assert_eq!(run(1), run(4));
}

#[test]
fn test_concurrent_pair_detection() {
    let (w, h) = (64, 48);
    let left = textured(w, h);
    let right: Vec<f64> = left.iter().rev().copied().collect();
    let det = HarrisDetector::new(HarrisConfig::default(), w, h).unwrap();

    let (l, r) = rayon::join(|| det.detect(&left), || det.detect(&right));
    assert_eq!(l.unwrap(), det.detect(&left).unwrap());
    assert_eq!(r.unwrap(), det.detect(&right).unwrap());
}

#[test]
fn test_top_k_truncates() {
    let (w, h) = (96, 64);
    let img = textured(w, h);
    let all = DetectorBuilder::new(w, h).build().unwrap().detect(&img).unwrap();
    assert!(all.len() > 5);
    let five = DetectorBuilder::new(w, h).top_k(5).build().unwrap().detect(&img).unwrap();
    assert_eq!(five, all[..5].to_vec());
}

#[test]
fn test_errors_abort_pipeline() {
    let cfg = HarrisConfig::default();
    assert!(matches!(
        detect_corners(&[0.0; 10], 4, 3, &cfg),
        Err(HarrisError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        detect_corners(&[], 0, 3, &cfg),
        Err(HarrisError::InvalidImageSize { .. })
    ));
    let bad = HarrisConfig {
        harris_constant: f64::NAN,
        ..HarrisConfig::default()
    };
    let err = detect_corners(&[0.0; 9], 3, 3, &bad).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_oversized_window_returns_error() {
    for size in [usize::MAX, (1usize << (usize::BITS / 2)) + 1] {
        let cfg = HarrisConfig {
            gaussian_kernel_size: size,
            ..HarrisConfig::default()
        };
        assert_eq!(
            detect_corners(&[0.0; 9], 3, 3, &cfg),
            Err(HarrisError::InvalidKernelSize(size))
        );
        assert!(matches!(
            DetectorBuilder::new(3, 3).kernel_size(size).build(),
            Err(HarrisError::InvalidKernelSize(_))
        ));
    }
}
