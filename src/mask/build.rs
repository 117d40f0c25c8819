use std::path::Path;

use crate::{
    assets::decode::load_image,
    config::effect::EffectConfig,
    foundation::{
        core::{PixelBuffer, wide_channels},
        error::SortResult,
    },
    mask::grid::Mask,
};

/// Threshold the red channel of `image` into a mask.
///
/// The wide red channel is narrowed to 8 bits by truncation (keeping the low byte) and a pixel
/// is active when that value is below `threshold`. `invert` swaps both outcomes. The mask
/// debug toggle forces every cell active.
pub fn build_mask(image: &PixelBuffer, threshold: u8, config: &EffectConfig) -> Mask {
    let (width, height) = image.dimensions();
    let mut mask = Mask::unset(width, height);
    for (x, y, px) in image.enumerate_pixels() {
        let narrowed = wide_channels(*px)[0] as u8;
        let below = narrowed < threshold;
        let active = config.debug.mask || (below != config.invert);
        mask.set_active(x, y, active);
    }
    tracing::debug!(
        width,
        height,
        threshold,
        active = mask.active_count(),
        "built threshold mask"
    );
    mask
}

/// Copy a decoded mask into a `width x height` grid.
///
/// Only the overlap `min(width, mask_w) x min(height, mask_h)` is copied; the rest stays
/// [`Mask::UNSET`]. A size mismatch is never an error.
pub fn fit_mask(decoded: &PixelBuffer, width: u32, height: u32) -> Mask {
    let mut fitted = PixelBuffer::new(width, height);
    let copy_w = width.min(decoded.width());
    let copy_h = height.min(decoded.height());
    for y in 0..copy_h {
        for x in 0..copy_w {
            fitted.put_pixel(x, y, *decoded.get_pixel(x, y));
        }
    }
    Mask::from_image(fitted)
}

/// Decode an external mask image and fit it to `width x height`.
pub fn load_mask(path: &Path, width: u32, height: u32) -> SortResult<Mask> {
    let decoded = load_image(path)?;
    if decoded.dimensions() != (width, height) {
        tracing::debug!(
            path = %path.display(),
            mask_w = decoded.width(),
            mask_h = decoded.height(),
            width,
            height,
            "external mask size differs from target; truncating to overlap"
        );
    }
    Ok(fit_mask(&decoded, width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/build.rs"]
mod tests;
