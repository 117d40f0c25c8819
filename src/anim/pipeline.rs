use std::path::Path;

use rand::Rng;

use crate::{
    anim::signal::Signal,
    config::effect::EffectConfig,
    engine::row::{random_opaque, sort_rows},
    foundation::{core::PixelBuffer, error::SortResult},
    mask::{
        build::{build_mask, load_mask},
        grid::Mask,
    },
};

/// Where a pass takes its mask from.
#[derive(Clone, Copy, Debug, Default)]
pub enum MaskSource<'a> {
    /// Threshold the (oriented) image.
    #[default]
    Threshold,
    /// External mask image in image orientation; fitted to the image, then oriented.
    File(&'a Path),
    /// Mask already in row-engine orientation, shared across frames; a size mismatch is
    /// truncated to the overlap.
    Prepared(&'a Mask),
}

/// Optional per-call inputs of [`sort_image`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SortInputs<'a> {
    /// Mask source.
    pub mask: MaskSource<'a>,
    /// Per-row amplitude curve.
    pub signal: Option<&'a Signal>,
}

/// Result of one still-image pass.
#[derive(Clone, Debug)]
pub struct SortedImage {
    /// Sorted image, in the input's orientation.
    pub image: PixelBuffer,
    /// Mask used for the pass, in the input's orientation. `None` for prepared masks.
    pub mask: Option<Mask>,
}

/// Build the mask for an image already mapped into the row frame.
///
/// With `path` set the external mask is fitted to the image-orientation size and then mapped
/// into the row frame the same way the image was.
pub fn row_frame_mask(
    oriented: &PixelBuffer,
    config: &EffectConfig,
    path: Option<&Path>,
) -> SortResult<Mask> {
    match path {
        None => Ok(build_mask(oriented, config.threshold, config)),
        Some(path) => {
            let (w, h) = config
                .direction
                .row_frame_dimensions(oriented.width(), oriented.height());
            let fitted = load_mask(path, w, h)?;
            Ok(Mask::from_image(
                config.direction.to_row_frame(fitted.into_image()),
            ))
        }
    }
}

/// Random opaque noise the size of `width x height`.
pub fn noise_image<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| random_opaque(rng))
}

/// Sort one image: orient, mask, run the row engine, restore orientation.
#[tracing::instrument(
    skip_all,
    fields(width = image.width(), height = image.height(), direction = %config.direction)
)]
pub fn sort_image<R: Rng + ?Sized>(
    image: PixelBuffer,
    config: &EffectConfig,
    inputs: SortInputs<'_>,
    rng: &mut R,
) -> SortResult<SortedImage> {
    config.validate()?;
    let image = if config.debug.source_noise {
        noise_image(image.width(), image.height(), rng)
    } else {
        image
    };

    let oriented = config.direction.to_row_frame(image);
    let mut owned_mask = None;
    let mask: &Mask = match inputs.mask {
        MaskSource::Prepared(shared) => shared,
        MaskSource::Threshold => &*owned_mask.insert(row_frame_mask(&oriented, config, None)?),
        MaskSource::File(path) => {
            &*owned_mask.insert(row_frame_mask(&oriented, config, Some(path))?)
        }
    };

    let sorted = sort_rows(&oriented, mask, inputs.signal, config, rng)?;
    Ok(SortedImage {
        image: config.direction.from_row_frame(sorted),
        mask: owned_mask.map(|m| Mask::from_image(config.direction.from_row_frame(m.into_image()))),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/anim/pipeline.rs"]
mod tests;
