use harris_detect::{DetectorBuilder, DetectorConfig};
use std::time::Instant;

/// Grey background with three bright squares.
fn synthetic_image(width: usize, height: usize) -> Vec<u8> {
    let mut img = vec![40u8; width * height];
    for &(x0, y0, side, value) in &[(20, 20, 30, 230u8), (90, 30, 40, 160), (50, 90, 25, 200)] {
        for y in y0..(y0 + side).min(height) {
            for x in x0..(x0 + side).min(width) {
                img[y * width + x] = value;
            }
        }
    }
    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("Harris configuration serialization demo");
    println!("=======================================\n");

    let (width, height) = (160, 128);
    let img = synthetic_image(width, height);
    let out_dir = std::env::temp_dir().join("harris_config_demo");
    std::fs::create_dir_all(&out_dir)?;

    println!("1. Creating configurations");
    let default_config = DetectorConfig::new(width, height)
        .with_metadata("Default", "5x5 window, sigma 1.0, a = 0.04");
    let strict_config = DetectorBuilder::new(width, height)
        .threshold(1e8)
        .top_k(20)
        .to_config()
        .with_metadata("Strict", "Only strong corners");
    let wide_config = DetectorBuilder::new(width, height)
        .kernel_size(9)
        .sigma(0.0)
        .to_config()
        .with_metadata("Wide", "9x9 window with derived sigma");

    for config in [&default_config, &strict_config, &wide_config] {
        println!("   {}", config.summary());
    }

    println!("\n2. JSON and TOML files");
    let json_path = out_dir.join("strict.json");
    let toml_path = out_dir.join("wide.toml");
    strict_config.save_json(&json_path)?;
    wide_config.save_toml(&toml_path)?;
    println!("   wrote {}", json_path.display());
    println!("   wrote {}", toml_path.display());

    let loaded_json = DetectorConfig::load_json(&json_path)?;
    let loaded_toml = DetectorConfig::load_toml(&toml_path)?;
    assert_eq!(loaded_json, strict_config);
    assert_eq!(loaded_toml, wide_config);
    println!("   reloaded configurations match the originals");

    println!("\n3. Detection per configuration");
    for config in [default_config, loaded_json, loaded_toml] {
        let name = config.name.clone().unwrap_or_default();
        let detector = config.build()?;
        let start = Instant::now();
        let corners = detector.detect_image(&img)?;
        println!("   {:<8} {:>4} corners in {:.2?}", name, corners.len(), start.elapsed());
        if let Some(best) = corners.first() {
            println!("            strongest at ({}, {}) score {:.1}", best.x, best.y, best.score);
        }
    }

    Ok(())
}
