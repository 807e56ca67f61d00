//! Byte-aligned update windows
//!
//! The framebuffer packs eight pixels per byte, so a window sent to the panel
//! has to start and end on a byte column.

/// Rectangle in pixels, end coordinates exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateWindow {
    pub x_start: u32,
    pub y_start: u32,
    pub x_end: u32,
    pub y_end: u32,
}

impl UpdateWindow {
    /// The whole panel
    pub fn full(width: u32, height: u32) -> Self {
        UpdateWindow {
            x_start: 0,
            y_start: 0,
            x_end: width,
            y_end: height,
        }
    }

    /// Snap a pixel rectangle outwards to byte columns inside a `width` x `height` panel.
    ///
    /// `x_start` rounds down. `x_end` always moves to the next multiple of 8, even when
    /// it already is one, so the column holding `x_end` is included too. Both are
    /// clamped to the panel, as is `y_end`.
    pub fn snap(x_start: u32, y_start: u32, x_end: u32, y_end: u32, width: u32, height: u32) -> Self {
        let last_column = width.saturating_sub(8);
        let x_start = (x_start / 8 * 8).min(last_column);
        let x_end = x_end
            .saturating_add(8)
            .min(width)
            / 8
            * 8;
        let x_end = x_end.max(x_start + 8).min(width);
        let y_end = y_end.min(height);
        let y_start = y_start.min(y_end);
        UpdateWindow {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }

    pub fn bytes_per_row(&self) -> usize {
        (self.width() / 8) as usize
    }

    /// Number of framebuffer bytes inside the window
    pub fn byte_len(&self) -> usize {
        self.bytes_per_row() * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_start || self.y_end <= self.y_start
    }
}
