use rayon::prelude::*;

use crate::{audio::spectrum::WaveStack, foundation::core::PixelBuffer};

const BAR: image::Rgba<u8> = image::Rgba([255, 255, 255, 255]);
const FIRST_FRAME_FILL: image::Rgba<u8> = image::Rgba([0, 255, 0, 255]);
const FILL: image::Rgba<u8> = image::Rgba([0, 0, 0, 0]);

/// Render one `size x size` bar chart per frame of `stack`.
///
/// Column `c` reads bucket `floor(c / size * num_buckets)` and draws a white bar from the
/// bottom whose height is the bucket's share of the stack peak. The area above the bar is
/// green on the first frame and transparent afterwards.
pub fn render_spectrum_frames(stack: &WaveStack, size: u32) -> Vec<PixelBuffer> {
    let max_amp = f64::from(stack.peak().max(1));
    let num_buckets = stack.num_buckets();

    stack
        .frames()
        .par_iter()
        .enumerate()
        .map(|(frame_idx, buckets)| {
            let fill = if frame_idx == 0 { FIRST_FRAME_FILL } else { FILL };
            let mut img = PixelBuffer::from_pixel(size, size, fill);
            for col in 0..size {
                let bucket = (f64::from(col) / f64::from(size) * num_buckets as f64) as usize;
                let amp = f64::from(buckets[bucket.min(num_buckets - 1)]);
                let height = ((amp / max_amp * f64::from(size)) as u32).min(size);
                for row in 0..height {
                    img.put_pixel(col, size - 1 - row, BAR);
                }
            }
            img
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/audio/visualize.rs"]
mod tests;
