use crate::foundation::math::resample_index;

/// Immutable amplitude curve that modulates span length per row.
///
/// A signal is never resampled when it is created; rows are mapped onto it at read time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signal {
    samples: Vec<i64>,
}

impl Signal {
    /// Wrap raw samples.
    pub fn new(samples: Vec<i64>) -> Self {
        Self { samples }
    }

    /// One sample per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().map(|&b| i64::from(b)).collect())
    }

    /// Per-row curve for one animation frame.
    ///
    /// Row `r` of `rows` reads bucket `floor(r / rows * buckets.len())`; the amplitude is scaled
    /// by `rows / max_amp` and truncated. `max_amp` is floored at 1.
    pub fn from_buckets(buckets: &[u32], max_amp: u32, rows: u32) -> Self {
        if buckets.is_empty() || rows == 0 {
            return Self::new(vec![0; rows as usize]);
        }
        let max_amp = f64::from(max_amp.max(1));
        let samples = (0..rows)
            .map(|row| {
                let bucket = (f64::from(row) / f64::from(rows) * buckets.len() as f64) as usize;
                let amp = f64::from(buckets[bucket.min(buckets.len() - 1)]);
                (amp / max_amp * f64::from(rows)) as i64
            })
            .collect();
        Self::new(samples)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the raw samples.
    pub fn samples(&self) -> &[i64] {
        &self.samples
    }

    /// Index read for `row` of a `row_count`-row image: `floor(row * len / row_count)`,
    /// clamped to `[0, len - 1]`.
    pub fn index_for_row(&self, row: u32, row_count: u32) -> Option<usize> {
        resample_index(row, row_count, self.samples.len())
    }

    /// Amplitude at `row`; an empty signal reads as 0.
    pub fn sample(&self, row: u32, row_count: u32) -> i64 {
        self.index_for_row(row, row_count)
            .map_or(0, |idx| self.samples[idx])
    }

    /// Mean absolute amplitude, used for log output.
    pub fn mean_abs(&self) -> i64 {
        let total: i64 = self.samples.iter().map(|s| s.abs()).sum();
        total / self.samples.len().max(1) as i64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/signal.rs"]
mod tests;
