//! Packed 1-bit framebuffer
//!
//! Row-major, one bit per pixel, most significant bit first within a byte.
//! A set bit is white. The buffer is sized once and never resized.

use crate::epd::color::Color;
use crate::epd::error::EpdError;
use crate::epd::image::MonoImage;
use crate::epd::window::UpdateWindow;

/// Byte index and bit mask of pixel `(x, y)` in a buffer `width` pixels wide.
///
/// Every read and write path goes through here.
pub const fn pixel_address(width: u32, x: u32, y: u32) -> (usize, u8) {
    let index = y as usize * (width as usize / 8) + x as usize / 8;
    (index, 0x80 >> (x % 8))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Buffer with every byte set to `fill`
    pub fn new(width: u32, height: u32, fill: u8) -> Result<Self, EpdError> {
        if width == 0 || height == 0 || width % 8 != 0 {
            return Err(EpdError::InvalidDimensions { width, height });
        }
        Ok(FrameBuffer {
            width,
            height,
            bytes: vec![fill; (width / 8) as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        (self.width / 8) as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite every byte
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (index, mask) = pixel_address(self.width, x, y);
        Some(Color::from_bit(self.bytes[index] & mask != 0))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), EpdError> {
        self.check_rect(x, y, 1, 1)?;
        self.write_bit(x, y, color);
        Ok(())
    }

    /// Copy `image` into the buffer with its top-left corner at `(x, y)`.
    ///
    /// `x` needs no alignment, pixels are written one bit at a time. Rejects
    /// images that do not fit without touching the buffer.
    pub fn set_pixel_region(&mut self, x: u32, y: u32, image: &MonoImage) -> Result<(), EpdError> {
        self.check_rect(x, y, image.width(), image.height())?;
        for (j, row) in image.rows().enumerate() {
            for (i, color) in row.iter().enumerate() {
                self.write_bit(x + i as u32, y + j as u32, *color);
            }
        }
        Ok(())
    }

    /// Rebuild the whole buffer as an image
    pub fn to_image(&self) -> MonoImage {
        MonoImage::from_fn(self.width, self.height, |x, y| {
            let (index, mask) = pixel_address(self.width, x, y);
            Color::from_bit(self.bytes[index] & mask != 0)
        })
    }

    /// Bytes covered by a byte-aligned window, row by row
    pub fn window_bytes(&self, window: &UpdateWindow) -> Vec<u8> {
        let row_len = self.bytes_per_row();
        let first = (window.x_start / 8) as usize;
        let last = (window.x_end / 8) as usize;
        let mut out = Vec::with_capacity(window.byte_len());
        for y in window.y_start..window.y_end {
            let row = y as usize * row_len;
            out.extend_from_slice(&self.bytes[row + first..row + last]);
        }
        out
    }

    fn write_bit(&mut self, x: u32, y: u32, color: Color) {
        let (index, mask) = pixel_address(self.width, x, y);
        if color.bit() {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
    }

    fn check_rect(&self, x: u32, y: u32, width: u32, height: u32) -> Result<(), EpdError> {
        let fits = x
            .checked_add(width)
            .is_some_and(|right| right <= self.width)
            && y.checked_add(height)
                .is_some_and(|bottom| bottom <= self.height);
        if fits {
            Ok(())
        } else {
            Err(EpdError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
        }
    }
}
