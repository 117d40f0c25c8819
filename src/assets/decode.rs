use std::path::Path;

use anyhow::Context as _;

use crate::{
    anim::signal::Signal,
    foundation::{
        core::PixelBuffer,
        error::{SortError, SortResult},
    },
};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> SortResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SortError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> SortResult<PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        SortError::Decode(msg) => SortError::decode(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

/// Read a file fully as a raw signal, one sample per byte.
pub fn load_raw_signal(path: &Path) -> SortResult<Signal> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read signal file '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), samples = bytes.len(), "loaded raw signal");
    Ok(Signal::from_bytes(&bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
