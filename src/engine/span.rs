use std::{cmp::Ordering, ops::RangeInclusive};

use rand::Rng;

use crate::{anim::signal::Signal, config::effect::EffectConfig};

/// One resolved span of a row. Lives for a single row iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Row index.
    pub row: u32,
    /// First column sorted (the mask start, possibly pulled left by negative noise).
    pub start: u32,
    /// Exclusive end of the mask run.
    pub mask_end: u32,
    /// Last column requested for sorting, inclusive. May equal the row width in mask debug.
    pub write_end: u32,
}

impl Span {
    /// Inclusive columns actually sorted within a row of `row_width`, or `None` when the span
    /// ends before it starts.
    pub fn columns(&self, row_width: u32) -> Option<RangeInclusive<u32>> {
        if row_width == 0 {
            return None;
        }
        let last = self.write_end.min(row_width - 1);
        (last >= self.start).then_some(self.start..=last)
    }
}

/// Computes the final extent of a span from the mask run, scalar, noise and signal.
#[derive(Clone, Copy, Debug)]
pub struct SpanPolicy<'a> {
    config: &'a EffectConfig,
    signal: Option<&'a Signal>,
    row_width: u32,
    row_count: u32,
}

impl<'a> SpanPolicy<'a> {
    /// Policy for an image of `row_width x row_count` in row-engine orientation.
    pub fn new(
        config: &'a EffectConfig,
        signal: Option<&'a Signal>,
        row_width: u32,
        row_count: u32,
    ) -> Self {
        Self {
            config,
            signal,
            row_width,
            row_count,
        }
    }

    /// Resolve the span whose mask run is `[start, mask_end)` on `row`.
    ///
    /// The noise draw is added to the length for either sign of the noise factor; a negative
    /// draw also moves the start left (not past column 0). The combined length, floored at 0,
    /// is scaled and added to the start, then clamped to the last column. Mask debug extends to
    /// the row end and clean mode ignores everything but the mask run.
    pub fn resolve<R: Rng + ?Sized>(&self, row: u32, start: u32, mask_end: u32, rng: &mut R) -> Span {
        if self.config.clean {
            return Span {
                row,
                start,
                mask_end,
                write_end: mask_end,
            };
        }

        let noise = self.draw_noise(rng);
        let adjusted = if noise < 0 {
            (i64::from(start) + noise).max(0) as u32
        } else {
            start
        };

        let base = f64::from(mask_end.saturating_sub(start));
        let signal_amt = self
            .signal
            .map_or(0, |s| s.sample(row, self.row_count));
        let length = (base + noise as f64 + signal_amt as f64).max(0.0);
        let computed = (f64::from(adjusted) + length * self.config.scalar) as i64;
        let last_col = i64::from(self.row_width.saturating_sub(1));

        let write_end = if self.config.debug.mask {
            self.row_width
        } else {
            computed.clamp(0, last_col) as u32
        };

        Span {
            row,
            start: adjusted,
            mask_end,
            write_end,
        }
    }

    fn draw_noise<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let factor = i64::from(self.config.noise_factor);
        match factor.cmp(&0) {
            Ordering::Greater => rng.gen_range(0..factor),
            Ordering::Less => {
                let spread = factor.abs();
                spread / 2 - rng.gen_range(0..spread)
            }
            Ordering::Equal => 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/span.rs"]
mod tests;
