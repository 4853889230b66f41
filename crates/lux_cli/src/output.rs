//! Image output.
//!
//! The framebuffer is written as a 24-bit BMP or an 8-bit PNG, chosen by the
//! output file extension.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{ImageBuffer, Rgb};
use log::info;
use lux_core::{bmp, Texture};

/// Save `texture` to `path`, picking the format from the extension.
pub fn save_image(texture: &Texture, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("bmp") => bmp::save(texture, path)
            .with_context(|| format!("Failed to write BMP {}", path.display()))?,
        Some("png") => save_png(texture, path)?,
        _ => bail!(
            "Unsupported output extension for {} (expected .bmp or .png)",
            path.display()
        ),
    }

    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save as an 8-bit RGB PNG.
fn save_png(texture: &Texture, path: &Path) -> Result<()> {
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(texture.width(), texture.height(), texture.to_rgb8())
            .context("Framebuffer size does not match its pixel data")?;

    image
        .save(path)
        .with_context(|| format!("Failed to write PNG {}", path.display()))
}
