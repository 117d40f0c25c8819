use std::{fmt, str::FromStr};

use crate::foundation::error::SortError;

/// Straight-alpha RGBA8 pixel, the unit every stage reads and writes.
pub type Color = image::Rgba<u8>;

/// Owned 2-D RGBA8 grid; input and output of every pass.
pub type PixelBuffer = image::RgbaImage;

/// Widen a straight-alpha RGBA8 pixel to 16-bit alpha-premultiplied channels.
///
/// Each channel is replicated into both bytes (`c * 0x101`) and then scaled by alpha, so an
/// opaque channel `c` reads as `c * 257` and the low byte equals `c`.
pub fn wide_channels(px: Color) -> [u32; 4] {
    let [r, g, b, a] = px.0;
    let a = u32::from(a);
    let widen = |c: u8| -> u32 {
        let c = u32::from(c);
        ((c | (c << 8)) * a) / 0xff
    };
    [widen(r), widen(g), widen(b), a | (a << 8)]
}

/// Channel used to order two pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareKind {
    /// Mean of the wide red, green and blue channels.
    #[default]
    Mean,
    /// Wide red channel only.
    Red,
}

/// Direction of the sorted output within a span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

/// Screen direction spans are sorted toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right (the row engine's native direction).
    #[default]
    Right,
    /// Right to left.
    Left,
    /// Bottom to top.
    Up,
    /// Top to bottom.
    Down,
}

impl FromStr for Direction {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(SortError::validation(format!(
                "unknown direction '{other}' (expected right, left, up or down)"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
