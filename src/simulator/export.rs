use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};

/// Default file name offered when saving a plan.
pub const DEFAULT_EXPORT_NAME: &str = "toolshed_plan.png";

/// Encode the composite as PNG bytes.
pub fn export_png(image: &RgbImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| anyhow::anyhow!("Failed to encode PNG: {}", e))?;
    Ok(buffer.into_inner())
}

pub fn save_png(image: &RgbImage, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, export_png(image)?)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))
}
