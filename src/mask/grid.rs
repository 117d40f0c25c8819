use crate::foundation::core::{Color, PixelBuffer};

/// Binary activity grid stored as an image so it can be written out and read back.
///
/// Only pure opaque white counts as active. Fully transparent black marks a cell that was
/// never written (for example outside the overlap of a smaller external mask).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    image: PixelBuffer,
}

impl Mask {
    /// Color of an active cell.
    pub const ACTIVE: Color = image::Rgba([255, 255, 255, 255]);
    /// Color of an inactive cell.
    pub const INACTIVE: Color = image::Rgba([0, 0, 0, 255]);
    /// Color of a cell nothing has written.
    pub const UNSET: Color = image::Rgba([0, 0, 0, 0]);

    /// A mask whose every cell is [`Mask::UNSET`].
    pub fn unset(width: u32, height: u32) -> Self {
        Self {
            image: PixelBuffer::new(width, height),
        }
    }

    /// Wrap an existing image; white cells become active.
    pub fn from_image(image: PixelBuffer) -> Self {
        Self { image }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// `true` when the cell is pure opaque white. Out-of-bounds cells are inactive.
    pub fn is_active(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|px| *px == Self::ACTIVE)
    }

    /// `true` when the cell still holds [`Mask::UNSET`].
    pub fn is_unset(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|px| *px == Self::UNSET)
    }

    /// Mark a cell active or inactive.
    pub fn set_active(&mut self, x: u32, y: u32, active: bool) {
        let color = if active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        };
        self.image.put_pixel(x, y, color);
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.image.pixels().filter(|px| **px == Self::ACTIVE).count()
    }

    /// Borrow the backing image.
    pub fn as_image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Take the backing image.
    pub fn into_image(self) -> PixelBuffer {
        self.image
    }
}
