use std::path::PathBuf;
use std::time::Instant;

use argh::FromArgs;
use harris_cli::loader::load_greyscale;
use harris_cli::visualize::{draw_matching_image, overlay_corners, save_rgb};
use harris_cli::{check_pair_dimensions, load_harris_config, ConfigOverrides, PairDetector};
use harris_core::{init_thread_pool, HarrisConfig};
use harris_detect::DetectorConfig;

/// Detects Harris corners on a pair of images
#[derive(Debug, FromArgs)]
struct Args {
    /// left image path
    #[argh(positional)]
    left: PathBuf,

    /// right image path
    #[argh(positional)]
    right: PathBuf,

    /// pipeline parameters from a .json or .toml file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// odd side length of the gaussian window
    #[argh(option)]
    kernel_size: Option<usize>,

    /// gaussian standard deviation, 0 derives it from the window size
    #[argh(option)]
    sigma: Option<f64>,

    /// harris sensitivity constant
    #[argh(option, short = 'a')]
    harris_constant: Option<f64>,

    /// minimum cornerness kept before selection
    #[argh(option, short = 't')]
    threshold: Option<f64>,

    /// maximum number of corners per image
    #[argh(option, short = 'k')]
    top_k: Option<usize>,

    /// worker threads, defaults to the number of cpus
    #[argh(option, short = 'j')]
    threads: Option<usize>,

    /// directory for the rendered images
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// skip smoothing and contrast stretch
    #[argh(switch)]
    no_preprocess: bool,

    /// print the detected corners as JSON
    #[argh(switch)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let base = match &args.config {
        Some(path) => load_harris_config(path)?,
        None => HarrisConfig::default(),
    };
    let overrides = ConfigOverrides {
        kernel_size: args.kernel_size,
        sigma: args.sigma,
        harris_constant: args.harris_constant,
        threshold: args.threshold,
        top_k: args.top_k,
    };

    let t0 = Instant::now();
    let (lw, lh, left) = load_greyscale(&args.left)?;
    let (rw, rh, right) = load_greyscale(&args.right)?;
    check_pair_dimensions((lw, lh), (rw, rh))?;
    log::info!("elapsed time image loading: {:.2?}", t0.elapsed());

    let mut config = DetectorConfig::new(lw, lh);
    config.core = overrides.apply(base);
    if let Some(n) = args.threads {
        config.n_threads = n;
    }
    config.validate()?;
    init_thread_pool(config.n_threads)?;
    log::info!("{}", config.summary());

    let pair = PairDetector::new(config.core.clone(), lw, lh, !args.no_preprocess)?;
    let (left, right) = pair.prepare_pair(&left, &right)?;
    let corners = pair.detect_pair(&left, &right)?;

    std::fs::create_dir_all(&args.output_dir)?;
    let t1 = Instant::now();
    save_rgb(
        &overlay_corners(&left, lw, lh, &corners.left)?,
        args.output_dir.join("left_corners.png"),
    )?;
    save_rgb(
        &overlay_corners(&right, rw, rh, &corners.right)?,
        args.output_dir.join("right_corners.png"),
    )?;
    save_rgb(
        &draw_matching_image(&left, &right, lw, lh)?,
        args.output_dir.join("matching.png"),
    )?;
    log::info!("elapsed time rendering: {:.2?}", t1.elapsed());
    log::info!("elapsed time total: {:.2?}", t0.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&corners)?);
    } else {
        println!(
            "Detected {} corners (left) and {} corners (right)",
            corners.left.len(),
            corners.right.len()
        );
    }

    Ok(())
}
