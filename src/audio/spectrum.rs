use std::{path::Path, sync::Arc};

use rayon::prelude::*;
use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::{
    audio::wav::{Wav, read_wav},
    foundation::{
        error::{SortError, SortResult},
        math::div_floor_one,
    },
};

/// How FFT bins are grouped into buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketScale {
    /// Equal-width bands.
    #[default]
    Linear,
    /// Geometrically growing bands, finer at low frequencies.
    Log,
}

/// One amplitude-bucket array per animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveStack {
    frames: Vec<Vec<u32>>,
    num_buckets: usize,
}

impl WaveStack {
    /// Wrap per-frame bucket arrays; every array must hold `num_buckets` entries.
    pub fn new(frames: Vec<Vec<u32>>, num_buckets: usize) -> SortResult<Self> {
        if num_buckets == 0 {
            return Err(SortError::validation("bucket count must be >= 1"));
        }
        if let Some((idx, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.len() != num_buckets)
        {
            return Err(SortError::validation(format!(
                "frame {idx} has {} buckets, expected {num_buckets}",
                f.len()
            )));
        }
        Ok(Self {
            frames,
            num_buckets,
        })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Buckets per frame.
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Vec<u32>] {
        &self.frames
    }

    /// Largest bucket value across every frame (0 for an empty stack).
    pub fn peak(&self) -> u32 {
        self.frames
            .iter()
            .flat_map(|f| f.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Magnitudes of bins `1 .. len/2 - 1` of the forward FFT of `window`.
pub fn spectrum_magnitudes(fft: &dyn Fft<f64>, window: &[f64]) -> Vec<f64> {
    let mut buf: Vec<Complex<f64>> = window.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buf);
    let hi = (buf.len() / 2).saturating_sub(1);
    buf.get(1..hi)
        .unwrap_or(&[])
        .iter()
        .map(|c| c.norm())
        .collect()
}

/// Group magnitudes into `num_buckets` bands, keeping each band's peak.
pub fn bucket_peaks(mags: &[f64], num_buckets: usize, scale: BucketScale) -> Vec<u32> {
    let len = mags.len();
    (0..num_buckets)
        .map(|x| {
            let (lo, hi) = band_bounds(x, num_buckets, len, scale);
            mags[lo..hi].iter().copied().fold(0.0f64, f64::max) as u32
        })
        .collect()
}

fn band_bounds(x: usize, num_buckets: usize, len: usize, scale: BucketScale) -> (usize, usize) {
    match scale {
        BucketScale::Linear => {
            let width = div_floor_one(len, num_buckets).max(1);
            let lo = (x * width).min(len);
            (lo, (lo + width).min(len))
        }
        BucketScale::Log => {
            let edge = |i: usize| -> usize {
                let e = (len as f64).powf(i as f64 / num_buckets as f64).floor() as usize;
                e.saturating_sub(1).min(len)
            };
            let lo = edge(x);
            (lo, edge(x + 1).max(lo + 1).min(len))
        }
    }
}

/// Buckets for a single window; plans its own FFT.
pub fn spectrum_buckets(window: &[f64], num_buckets: usize, scale: BucketScale) -> Vec<u32> {
    let fft = FftPlanner::<f64>::new().plan_fft_forward(window.len());
    bucket_peaks(&spectrum_magnitudes(fft.as_ref(), window), num_buckets, scale)
}

/// Per-frame spectrum buckets for a decoded clip.
pub fn wave_stack(
    wav: &Wav,
    framerate: u32,
    num_buckets: usize,
    scale: BucketScale,
) -> SortResult<WaveStack> {
    if num_buckets == 0 {
        return Err(SortError::validation("bucket count must be >= 1"));
    }
    let windows = wav.frame_windows(framerate)?;
    let Some(window_len) = windows.first().map(|w| w.len()) else {
        tracing::warn!("clip is shorter than one frame; wave stack is empty");
        return WaveStack::new(Vec::new(), num_buckets);
    };
    let fft: Arc<dyn Fft<f64>> = FftPlanner::<f64>::new().plan_fft_forward(window_len);

    let frames = windows
        .par_iter()
        .map(|w| bucket_peaks(&spectrum_magnitudes(fft.as_ref(), w), num_buckets, scale))
        .collect::<Vec<_>>();

    tracing::info!(
        frames = frames.len(),
        samples_per_frame = window_len,
        num_buckets,
        "built wave stack"
    );
    WaveStack::new(frames, num_buckets)
}

/// Read a WAV file and build its wave stack.
pub fn load_wave_stack(
    path: &Path,
    framerate: u32,
    num_buckets: usize,
    scale: BucketScale,
) -> SortResult<WaveStack> {
    let wav = read_wav(path)?;
    wave_stack(&wav, framerate, num_buckets, scale)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/spectrum.rs"]
mod tests;
