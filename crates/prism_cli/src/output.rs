//! PNG export of rendered images.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use log::info;
use prism_renderer::ImageBuffer;

/// Convert a rendered buffer to 8-bit RGBA. Colors are clamped to [0, 1].
pub fn to_rgba_image(image: &ImageBuffer) -> Result<RgbaImage> {
    RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Pixel buffer does not match the image dimensions")
}

/// Save a rendered buffer as PNG, creating the parent directory if needed.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    to_rgba_image(image)?
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
