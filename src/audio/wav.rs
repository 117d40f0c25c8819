use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SortError, SortResult};

/// Size of the canonical RIFF/WAVE header this reader understands.
pub const WAV_HEADER_LEN: usize = 44;

/// Fields of a canonical 44-byte PCM WAV header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavHeader {
    /// Audio format tag (1 = PCM).
    pub format: u16,
    /// Interleaved channel count.
    pub channels: u16,
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Bytes per second across channels.
    pub byte_rate: u32,
    /// Bytes per sample frame across channels.
    pub block_align: u16,
    /// Bits per sample per channel.
    pub bits_per_sample: u16,
    /// Declared size of the data chunk in bytes.
    pub data_len: u32,
}

/// Decoded PCM clip; only channel 0 is retained.
#[derive(Clone, Debug, PartialEq)]
pub struct Wav {
    /// Parsed header.
    pub header: WavHeader,
    channel0: Vec<f64>,
}

impl Wav {
    /// Channel-0 samples as signed values (8-bit data is re-centered on 0).
    pub fn channel0(&self) -> &[f64] {
        &self.channel0
    }

    /// Clip duration in seconds.
    pub fn playtime_secs(&self) -> f64 {
        self.channel0.len() as f64 / f64::from(self.header.sample_rate)
    }

    /// Split channel 0 into consecutive windows, one per output frame.
    ///
    /// Each window holds `sample_rate / framerate` samples (at least 1) and there are
    /// `floor(playtime * framerate)` of them.
    pub fn frame_windows(&self, framerate: u32) -> SortResult<Vec<&[f64]>> {
        if framerate == 0 {
            return Err(SortError::validation("framerate must be >= 1"));
        }
        let per_frame = (self.header.sample_rate / framerate).max(1) as usize;
        let frames = (self.playtime_secs() * f64::from(framerate)).floor() as usize;
        Ok(self
            .channel0
            .chunks_exact(per_frame)
            .take(frames)
            .collect())
    }
}

fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse a canonical header from the first [`WAV_HEADER_LEN`] bytes.
pub fn parse_header(bytes: &[u8]) -> SortResult<WavHeader> {
    if bytes.len() < WAV_HEADER_LEN {
        return Err(SortError::audio(format!(
            "wav header truncated: {} of {WAV_HEADER_LEN} bytes",
            bytes.len()
        )));
    }
    for (at, marker) in [(0usize, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
        if &bytes[at..at + 4] != marker {
            return Err(SortError::audio(format!(
                "wav header missing '{}' marker at byte {at}",
                String::from_utf8_lossy(marker)
            )));
        }
    }

    let header = WavHeader {
        format: u16_le(bytes, 20),
        channels: u16_le(bytes, 22),
        sample_rate: u32_le(bytes, 24),
        byte_rate: u32_le(bytes, 28),
        block_align: u16_le(bytes, 32),
        bits_per_sample: u16_le(bytes, 34),
        data_len: u32_le(bytes, 40),
    };

    if header.format != 1 {
        return Err(SortError::audio(format!(
            "unsupported wav format tag {} (only PCM is supported)",
            header.format
        )));
    }
    if header.channels == 0 || header.sample_rate == 0 {
        return Err(SortError::audio("wav header has zero channels or sample rate"));
    }
    if !matches!(header.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(SortError::audio(format!(
            "unsupported bits per sample {}",
            header.bits_per_sample
        )));
    }
    let min_align = u32::from(header.channels) * u32::from(header.bits_per_sample / 8);
    if u32::from(header.block_align) < min_align {
        return Err(SortError::audio(format!(
            "wav block align {} is smaller than {min_align}",
            header.block_align
        )));
    }
    Ok(header)
}

/// Parse a whole WAV file held in memory.
pub fn parse_wav(bytes: &[u8]) -> SortResult<Wav> {
    let header = parse_header(bytes)?;
    let body = &bytes[WAV_HEADER_LEN..];
    let data_len = header.data_len as usize;
    if body.len() < data_len {
        return Err(SortError::audio(format!(
            "wav data truncated: header declares {data_len} bytes, file has {}",
            body.len()
        )));
    }

    let sample_bytes = usize::from(header.bits_per_sample / 8);
    let channel0 = body[..data_len]
        .chunks_exact(usize::from(header.block_align))
        .map(|frame| decode_sample(&frame[..sample_bytes]))
        .collect();

    Ok(Wav { header, channel0 })
}

fn decode_sample(raw: &[u8]) -> f64 {
    match raw.len() {
        1 => f64::from(raw[0]) - 128.0,
        2 => f64::from(i16::from_le_bytes([raw[0], raw[1]])),
        3 => {
            let v = i32::from_le_bytes([0, raw[0], raw[1], raw[2]]) >> 8;
            f64::from(v)
        }
        _ => f64::from(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
    }
}

/// Read and parse a WAV file.
#[tracing::instrument]
pub fn read_wav(path: &Path) -> SortResult<Wav> {
    let bytes = std::fs::read(path).with_context(|| format!("read wav '{}'", path.display()))?;
    let wav = parse_wav(&bytes)?;
    tracing::info!(
        channels = wav.header.channels,
        sample_rate = wav.header.sample_rate,
        bits = wav.header.bits_per_sample,
        samples = wav.channel0.len(),
        playtime_secs = wav.playtime_secs(),
        "read wav"
    );
    Ok(wav)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/wav.rs"]
mod tests;
