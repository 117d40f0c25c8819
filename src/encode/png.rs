use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::PixelBuffer,
    error::{SortError, SortResult},
};

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> SortResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `image` as PNG at `path`.
pub fn write_png(image: &PixelBuffer, path: &Path) -> SortResult<()> {
    ensure_parent_dir(path)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SortError::encode(format!("write png '{}': {e}", path.display())))
}

/// Path of frame `index` inside a per-frame output directory.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("FRAME_{index}.png"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
