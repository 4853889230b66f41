use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;
mod output;
mod scenes;

use cli::Args;
use logger::init_logger;
use lux_core::Texture;
use lux_renderer::render;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    info!("Lux {}", env!("CARGO_PKG_VERSION"));

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let settings = args.render_settings()?;
    settings.validate()?;

    let aspect = args.width as f32 / args.height as f32;
    let (scene, camera) = scenes::build(args.scene, aspect)
        .with_context(|| format!("Failed to build the {:?} scene", args.scene))?;

    let mut framebuffer = Texture::new(args.width, args.height);
    let stats = render(&scene, &camera, &settings, &mut framebuffer)?;

    info!(
        "Traced {} samples over {} rows in {:.2?}",
        stats.samples, stats.rows, stats.elapsed
    );

    output::save_image(&framebuffer, &args.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_image() {
        let path = std::env::temp_dir().join(format!("lux_run_{}.bmp", std::process::id()));
        let args = Args::try_parse_from([
            "lux",
            "--scene",
            "furnace",
            "--width",
            "6",
            "--height",
            "4",
            "-s",
            "2",
            "--max-bounces",
            "1",
            "--output",
            path.to_str().unwrap(),
        ])
        .unwrap();

        run(&args).unwrap();
        let image = lux_core::bmp::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        // 1 + 0.5 clamps to white
        assert_eq!((image.width(), image.height()), (6, 4));
        assert!(image.pixels().iter().all(|p| p.min_element() > 0.99));
    }

    #[test]
    fn test_run_rejects_empty_image() {
        let args = Args::try_parse_from(["lux", "--width", "0"]).unwrap();
        assert!(run(&args).is_err());
    }
}
