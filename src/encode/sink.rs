use std::path::PathBuf;

use anyhow::Context as _;
use image::{
    Delay, Frame,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    encode::png::ensure_parent_dir,
    foundation::{
        core::PixelBuffer,
        error::{SortError, SortResult},
    },
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate in frames per second.
    pub framerate: u32,
}

/// Consumer of finished animation frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SortResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: PixelBuffer) -> SortResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> SortResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, PixelBuffer)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(usize, PixelBuffer)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SortResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: PixelBuffer) -> SortResult<()> {
        self.frames.push((idx, frame));
        Ok(())
    }

    fn end(&mut self) -> SortResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Frame delay in hundredths of a second for `framerate`: `round(100 / framerate)`.
pub fn gif_delay_centis(framerate: u32) -> u32 {
    (100.0 / f64::from(framerate.max(1))).round() as u32
}

/// Animated GIF writer. Frames are palette-quantized by the encoder; the file loops forever.
///
/// Frames are held until [`FrameSink::end`], which encodes them in memory and writes the
/// file in one call so that any I/O failure surfaces as an error.
pub struct GifSink {
    out_path: PathBuf,
    delay: Delay,
    pending: Option<Vec<Frame>>,
    frames_written: usize,
}

impl GifSink {
    /// Sink that will write `out_path` on `end`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            delay: Delay::from_numer_denom_ms(0, 1),
            pending: None,
            frames_written: 0,
        }
    }

    /// Number of frames accepted so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("out_path", &self.out_path)
            .field("open", &self.pending.is_some())
            .field("frames_written", &self.frames_written)
            .finish()
    }
}

fn encode_gif(frames: Vec<Frame>) -> SortResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SortError::encode(format!("gif repeat: {e}")))?;
        for (idx, frame) in frames.into_iter().enumerate() {
            encoder
                .encode_frame(frame)
                .map_err(|e| SortError::encode(format!("encode gif frame {idx}: {e}")))?;
        }
        // Dropping the encoder appends the trailer.
    }
    Ok(bytes)
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SortResult<()> {
        ensure_parent_dir(&self.out_path)?;
        self.delay = Delay::from_numer_denom_ms(gif_delay_centis(cfg.framerate) * 10, 1);
        self.pending = Some(Vec::new());
        self.frames_written = 0;
        tracing::debug!(
            path = %self.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            framerate = cfg.framerate,
            "gif sink opened"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: PixelBuffer) -> SortResult<()> {
        let pending = self
            .pending
            .as_mut()
            .ok_or_else(|| SortError::encode("gif sink used before begin"))?;
        if idx != self.frames_written {
            return Err(SortError::encode(format!(
                "gif frames must arrive in order: expected {}, got {idx}",
                self.frames_written
            )));
        }
        pending.push(Frame::from_parts(frame, 0, 0, self.delay));
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> SortResult<()> {
        let frames = self
            .pending
            .take()
            .ok_or_else(|| SortError::encode("gif sink ended before begin"))?;
        let bytes = encode_gif(frames)?;
        std::fs::write(&self.out_path, &bytes)
            .with_context(|| format!("write gif '{}'", self.out_path.display()))?;
        tracing::info!(
            path = %self.out_path.display(),
            frames = self.frames_written,
            bytes = bytes.len(),
            "wrote gif"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
