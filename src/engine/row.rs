use std::ops::RangeInclusive;

use rand::Rng;

use crate::{
    anim::signal::Signal,
    config::effect::EffectConfig,
    engine::span::SpanPolicy,
    foundation::{
        core::{Color, PixelBuffer, wide_channels},
        error::SortResult,
    },
    mask::{build::fit_mask, grid::Mask, locate::locate_span},
    sort::{compare::Comparator, merge::sort_span},
};

/// Run one full left-to-right pass over `source`, returning a new buffer.
///
/// Each row walks a column cursor. On an active mask cell the span is located, resolved,
/// sorted out of `source` and written to the output, and the cursor jumps past the span.
/// Every other column is copied through unless a span already wrote it. A mask of a
/// different size is truncated to the overlap, and cells it does not cover read as unset.
pub fn sort_rows<R: Rng + ?Sized>(
    source: &PixelBuffer,
    mask: &Mask,
    signal: Option<&Signal>,
    config: &EffectConfig,
    rng: &mut R,
) -> SortResult<PixelBuffer> {
    let (width, height) = source.dimensions();
    let fitted;
    let mask = if mask.dimensions() == source.dimensions() {
        mask
    } else {
        tracing::debug!(
            mask_w = mask.width(),
            mask_h = mask.height(),
            width,
            height,
            "mask size differs from image; truncating to overlap"
        );
        fitted = fit_mask(mask.as_image(), width, height);
        &fitted
    };
    let pass = RowPass {
        source,
        config,
        cmp: Comparator::from_config(config),
        policy: SpanPolicy::new(config, signal, width, height),
    };

    let mut output = PixelBuffer::new(width, height);
    let mut written = vec![false; width as usize];
    let mut segment = Vec::with_capacity(width as usize);
    let mut spans = 0usize;

    for row in 0..height {
        written.fill(false);
        let mut col = 0u32;
        while col < width {
            if mask.is_active(col, row) {
                let mask_end = locate_span(mask, row, col, width);
                let span = pass.policy.resolve(row, col, mask_end, rng);
                if let Some(cols) = span.columns(width) {
                    pass.write_span(&mut output, row, cols.clone(), &mut segment, rng);
                    for x in cols.clone() {
                        written[x as usize] = true;
                    }
                    spans += 1;
                    let resume = cols.end() + 1;
                    if resume > col {
                        col = resume;
                        continue;
                    }
                    // span was pulled entirely left of the cursor
                }
            }
            if !written[col as usize] {
                output.put_pixel(col, row, *source.get_pixel(col, row));
            }
            col += 1;
        }
    }

    tracing::debug!(width, height, spans, "row pass complete");
    Ok(output)
}

struct RowPass<'a> {
    source: &'a PixelBuffer,
    config: &'a EffectConfig,
    cmp: Comparator,
    policy: SpanPolicy<'a>,
}

impl RowPass<'_> {
    fn write_span<R: Rng + ?Sized>(
        &self,
        output: &mut PixelBuffer,
        row: u32,
        cols: RangeInclusive<u32>,
        segment: &mut Vec<Color>,
        rng: &mut R,
    ) {
        segment.clear();
        segment.extend(cols.clone().map(|x| *self.source.get_pixel(x, row)));
        sort_span(segment, self.cmp, self.config.crush);

        let span_color = self.config.debug.span_colors.then(|| random_opaque(rng));
        for (x, &px) in cols.zip(segment.iter()) {
            let mut px = span_color.unwrap_or(px);
            if self.config.debug.mask {
                let level = wide_channels(px)[0] as u8;
                px = image::Rgba([level, level, level, 255]);
            }
            output.put_pixel(x, row, px);
        }
    }
}

/// Opaque color with each channel drawn from `[0, 255)`.
pub(crate) fn random_opaque<R: Rng + ?Sized>(rng: &mut R) -> Color {
    image::Rgba([
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        255,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/engine/row.rs"]
mod tests;
