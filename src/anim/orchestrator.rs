use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    anim::{
        pipeline::{MaskSource, SortInputs, noise_image, row_frame_mask, sort_image},
        signal::Signal,
    },
    audio::spectrum::WaveStack,
    config::effect::{DebugFlags, EffectConfig},
    encode::{
        png::{frame_path, write_png},
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::PixelBuffer,
        error::{SortError, SortResult},
        math::frame_seed,
    },
};

/// Per-frame modulation of an animation.
#[derive(Clone, Debug)]
pub enum FrameSignals {
    /// `n` frames without a signal; frames differ only by their noise draws.
    Unmodulated(usize),
    /// One bucket array per frame, resampled to the row count at render time.
    Spectrum(WaveStack),
    /// One ready-made signal per frame.
    Explicit(Vec<Signal>),
}

impl FrameSignals {
    /// Number of frames to render.
    pub fn len(&self) -> usize {
        match self {
            Self::Unmodulated(n) => *n,
            Self::Spectrum(stack) => stack.len(),
            Self::Explicit(signals) => signals.len(),
        }
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn signal_for(&self, frame: usize, rows: u32, max_amp: u32) -> Option<Cow<'_, Signal>> {
        match self {
            Self::Unmodulated(_) => None,
            Self::Spectrum(stack) => Some(Cow::Owned(Signal::from_buckets(
                &stack.frames()[frame],
                max_amp,
                rows,
            ))),
            Self::Explicit(signals) => Some(Cow::Borrowed(&signals[frame])),
        }
    }

    fn peak(&self) -> u32 {
        match self {
            Self::Spectrum(stack) => stack.peak(),
            Self::Unmodulated(_) | Self::Explicit(_) => 0,
        }
    }
}

/// Threading controls for multi-frame rendering.
#[derive(Clone, Debug)]
pub struct AnimationThreading {
    /// Render frames concurrently when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for AnimationThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Options shared by every animation entry point.
#[derive(Clone, Debug, Default)]
pub struct AnimationOpts {
    /// Threading configuration.
    pub threading: AnimationThreading,
    /// External mask image used instead of thresholding the base image.
    pub mask_path: Option<PathBuf>,
}

/// Render every frame and return them in frame order.
pub fn render_animation(
    base: &PixelBuffer,
    signals: &FrameSignals,
    config: &EffectConfig,
    opts: &AnimationOpts,
) -> SortResult<Vec<PixelBuffer>> {
    render_frames_with(base, signals, config, opts, |_, frame| Ok(frame))
}

/// Render every frame, then push them in order into `sink` once all workers are done.
pub fn render_animation_to_sink(
    base: &PixelBuffer,
    signals: &FrameSignals,
    config: &EffectConfig,
    opts: &AnimationOpts,
    framerate: u32,
    sink: &mut dyn FrameSink,
) -> SortResult<usize> {
    let frames = render_animation(base, signals, config, opts)?;
    sink.begin(SinkConfig {
        width: base.width(),
        height: base.height(),
        framerate,
    })?;
    let count = frames.len();
    for (idx, frame) in frames.into_iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    sink.end()?;
    Ok(count)
}

/// Render every frame and write each one as `FRAME_<n>.png` inside `dir` from its worker.
///
/// Any write failure aborts the whole run.
pub fn render_animation_to_dir(
    base: &PixelBuffer,
    signals: &FrameSignals,
    config: &EffectConfig,
    opts: &AnimationOpts,
    dir: &Path,
) -> SortResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create frames directory '{}'", dir.display()))?;
    let paths = render_frames_with(base, signals, config, opts, |idx, frame| {
        let path = frame_path(dir, idx);
        write_png(&frame, &path)?;
        Ok(path)
    })?;
    tracing::info!(dir = %dir.display(), frames = paths.len(), "wrote frame files");
    Ok(paths)
}

#[tracing::instrument(
    skip_all,
    fields(frames = signals.len(), direction = %config.direction, parallel = opts.threading.parallel)
)]
fn render_frames_with<T, F>(
    base: &PixelBuffer,
    signals: &FrameSignals,
    config: &EffectConfig,
    opts: &AnimationOpts,
    finish: F,
) -> SortResult<Vec<T>>
where
    T: Send,
    F: Fn(usize, PixelBuffer) -> SortResult<T> + Sync,
{
    config.validate()?;
    if signals.is_empty() {
        return Err(SortError::validation("animation needs at least one frame"));
    }

    let seed = config.resolve_seed();
    let base: Cow<'_, PixelBuffer> = if config.debug.source_noise {
        let mut rng = StdRng::seed_from_u64(seed);
        Cow::Owned(noise_image(base.width(), base.height(), &mut rng))
    } else {
        Cow::Borrowed(base)
    };
    let frame_config = EffectConfig {
        debug: DebugFlags {
            source_noise: false,
            ..config.debug
        },
        ..config.clone()
    };

    // Thresholding happens once, on a like-oriented copy of the base.
    let oriented = config.direction.to_row_frame(base.as_ref().clone());
    let rows = oriented.height();
    let mask = row_frame_mask(&oriented, config, opts.mask_path.as_deref())?;
    drop(oriented);
    let max_amp = signals.peak();

    let render_one = |frame: usize| -> SortResult<T> {
        let mut rng = StdRng::seed_from_u64(frame_seed(seed, frame));
        let signal = signals.signal_for(frame, rows, max_amp);
        let inputs = SortInputs {
            mask: MaskSource::Prepared(&mask),
            signal: signal.as_deref(),
        };
        let sorted = sort_image(base.as_ref().clone(), &frame_config, inputs, &mut rng)?;
        tracing::trace!(
            frame,
            amplitude = signal.as_deref().map_or(0, Signal::mean_abs),
            "frame sorted"
        );
        finish(frame, sorted.image)
    };

    let n = signals.len();
    tracing::info!(frames = n, seed, "rendering animation");
    let rendered: Vec<SortResult<T>> = if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        pool.install(|| (0..n).into_par_iter().map(render_one).collect())
    } else {
        (0..n).map(render_one).collect()
    };

    let mut out = Vec::with_capacity(n);
    for item in rendered {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> SortResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SortError::validation(
            "animation threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SortError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/anim/orchestrator.rs"]
mod tests;
