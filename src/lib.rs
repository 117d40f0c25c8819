//! Spansort is a mask-driven pixel span sorter for still images and audio-reactive animations.
//!
//! Every pass works on rows of an oriented image:
//!
//! - Build a [`Mask`] by thresholding the red channel (or load one from disk)
//! - Walk each row, resolve [`Span`]s from mask runs, noise and an optional [`Signal`]
//! - Merge-sort each span by a [`Comparator`] and map the result back to image orientation
//!
//! Use [`sort_image`] for a single image and [`render_animation`] (or its sink/directory
//! variants) for a sequence of frames rendered concurrently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod anim;
mod assets;
mod audio;
mod config;
mod encode;
mod engine;
mod foundation;
mod mask;
mod orient;
mod sort;

pub use crate::foundation::core::{
    Color, CompareKind, Direction, PixelBuffer, SortOrder, wide_channels,
};
pub use crate::foundation::error::{SortError, SortResult};

pub use crate::config::effect::{DebugFlags, EffectConfig};

pub use crate::sort::compare::Comparator;
pub use crate::sort::merge::sort_span;

pub use crate::mask::build::{build_mask, fit_mask, load_mask};
pub use crate::mask::grid::Mask;
pub use crate::mask::locate::locate_span;

pub use crate::engine::row::sort_rows;
pub use crate::engine::span::{Span, SpanPolicy};

pub use crate::orient::transform::{FlipAxis, flip, rotate};

pub use crate::assets::decode::{decode_image, load_image, load_raw_signal};

pub use crate::encode::png::{ensure_parent_dir, frame_path, write_png};
pub use crate::encode::sink::{FrameSink, GifSink, InMemorySink, SinkConfig, gif_delay_centis};

pub use crate::audio::spectrum::{
    BucketScale, WaveStack, bucket_peaks, load_wave_stack, spectrum_buckets,
    spectrum_magnitudes, wave_stack,
};
pub use crate::audio::visualize::render_spectrum_frames;
pub use crate::audio::wav::{WAV_HEADER_LEN, Wav, WavHeader, parse_header, parse_wav, read_wav};

pub use crate::anim::orchestrator::{
    AnimationOpts, AnimationThreading, FrameSignals, render_animation, render_animation_to_dir,
    render_animation_to_sink,
};
pub use crate::anim::pipeline::{
    MaskSource, SortInputs, SortedImage, noise_image, row_frame_mask, sort_image,
};
pub use crate::anim::signal::Signal;
