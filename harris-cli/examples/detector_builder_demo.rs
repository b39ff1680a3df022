use harris_cli::visualize::{overlay_corners, save_rgb};
use harris_detect::{DetectorBuilder, ImagePreprocessing};
use std::time::{Duration, Instant};

/// Offset rectangles on a diagonal ramp.
fn synthetic_image(width: usize, height: usize) -> Vec<u8> {
    let mut img: Vec<u8> = (0..width * height)
        .map(|i| ((i % width + i / width) / 8) as u8)
        .collect();
    for i in 0..6 {
        let (x0, y0) = (10 + i * 35, 12 + (i % 3) * 40);
        for y in y0..(y0 + 22).min(height) {
            for x in x0..(x0 + 18).min(width) {
                img[y * width + x] = 120 + (i as u8) * 20;
            }
        }
    }
    img
}

fn run_detection_demo(
    builder: DetectorBuilder,
    img: &[u8],
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("   Config: {}", builder.summary());
    let (width, height) = (builder.width(), builder.height());
    let detector = builder.build()?;

    let start = Instant::now();
    let corners = detector.detect_image(img)?;
    println!("   Time: {:.2?}", start.elapsed());
    println!("   Detected {} corners", corners.len());

    let path = std::env::temp_dir().join(format!("harris_corners_{}.png", name));
    save_rgb(&overlay_corners(img, width, height, &corners)?, &path)?;
    println!("   Saved: {}\n", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("Harris DetectorBuilder demo");
    println!("===========================\n");

    let (width, height) = (240, 160);
    let raw = synthetic_image(width, height);
    let img = ImagePreprocessing::prepare(&raw, width, height)?;

    println!("1. Defaults");
    run_detection_demo(DetectorBuilder::new(width, height), &img, "default")?;

    println!("2. Strong corners only");
    run_detection_demo(
        DetectorBuilder::new(width, height).threshold(1e9).top_k(12),
        &img,
        "strong",
    )?;

    println!("3. Wide window, derived sigma");
    run_detection_demo(
        DetectorBuilder::new(width, height).kernel_size(7).sigma(0.0).harris_constant(0.06),
        &img,
        "wide",
    )?;

    println!("4. Timing per window size");
    println!("   {:<8} {:<12} {:<8}", "Window", "Time", "Corners");
    for size in [3usize, 5, 7, 9] {
        let detector = DetectorBuilder::new(width, height).kernel_size(size).build()?;
        const RUNS: u32 = 3;
        let mut total = Duration::ZERO;
        let mut count = 0;
        for _ in 0..RUNS {
            let start = Instant::now();
            count = detector.detect_image(&img)?.len();
            total += start.elapsed();
        }
        println!("   {:<8} {:<12.2?} {:<8}", size, total / RUNS, count);
    }

    Ok(())
}
