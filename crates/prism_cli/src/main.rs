//! `prism`: render a JSON scene file to a PNG image.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use prism_core::load_scene;
use prism_renderer::{render, SceneBuilder};

mod cli;
mod output;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let description = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let mut builder = match args.scene.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => SceneBuilder::with_base_dir(dir),
        _ => SceneBuilder::new(),
    };
    let scene = builder
        .build(&description)
        .with_context(|| format!("Failed to build scene {}", args.scene.display()))?;

    let config = args.render_config();
    let image = render(&scene, &config);

    let output = args.output_path();
    output::save_png(&image, &output)?;

    info!("Done");
    Ok(())
}
