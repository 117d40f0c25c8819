use image::imageops;

use crate::foundation::core::{Direction, PixelBuffer};

/// Mirror axis for [`flip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    /// Reverse every row (mirror left/right).
    Horizontal,
    /// Reverse every column (mirror top/bottom).
    Vertical,
}

/// Rotate clockwise by `quarter_turns * 90` degrees into a fresh buffer.
///
/// Odd turn counts swap width and height. Zero turns hands the buffer back unchanged.
pub fn rotate(image: PixelBuffer, quarter_turns: u8) -> PixelBuffer {
    match quarter_turns % 4 {
        1 => imageops::rotate90(&image),
        2 => imageops::rotate180(&image),
        3 => imageops::rotate270(&image),
        _ => image,
    }
}

/// Mirror `image` along `axis` into a fresh buffer.
pub fn flip(image: PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(&image),
        FlipAxis::Vertical => imageops::flip_vertical(&image),
    }
}

impl Direction {
    /// Map an image into the frame where this direction reads left to right.
    pub fn to_row_frame(self, image: PixelBuffer) -> PixelBuffer {
        match self {
            Self::Right => image,
            Self::Left => flip(image, FlipAxis::Horizontal),
            Self::Up => rotate(image, 1),
            Self::Down => rotate(image, 3),
        }
    }

    /// Inverse of [`Direction::to_row_frame`].
    pub fn from_row_frame(self, image: PixelBuffer) -> PixelBuffer {
        match self {
            Self::Right => image,
            Self::Left => flip(image, FlipAxis::Horizontal),
            Self::Up => rotate(image, 3),
            Self::Down => rotate(image, 1),
        }
    }

    /// Dimensions of a `width x height` image once mapped into the row frame.
    pub fn row_frame_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Right | Self::Left => (width, height),
            Self::Up | Self::Down => (height, width),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orient/transform.rs"]
mod tests;
