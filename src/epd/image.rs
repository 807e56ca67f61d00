//! Monochrome raster handed to the driver
//!
//! Anything richer than one bit per pixel has to be converted before it gets here.
//! The raster is an [`embedded_graphics`] draw target, so text and primitives can be
//! rendered straight into it.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::epd::color::Color;

/// Width x height grid of [`Color`] values, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoImage {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl MonoImage {
    /// Image of the given size filled with one colour
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        MonoImage {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build an image by asking `f` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        MonoImage {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`; ignored outside the image
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Rows of pixels, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks() panics on zero, an empty image simply has no rows
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for MonoImage {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MonoImage {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Point, Primitive};
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::Drawable;

    #[test]
    fn from_fn_is_row_major() {
        let image = MonoImage::from_fn(3, 2, |x, y| Color::from_bit((x + y) % 2 == 0));
        assert_eq!(image.pixel(0, 0), Some(Color::White));
        assert_eq!(image.pixel(1, 0), Some(Color::Black));
        assert_eq!(image.pixel(1, 1), Some(Color::White));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.rows().count(), 2);
    }

    #[test]
    fn draws_embedded_graphics_primitives() {
        let mut image = MonoImage::new(16, 8, Color::White);
        Rectangle::new(Point::new(2, 2), Size::new(4, 3))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut image)
            .unwrap();

        assert_eq!(image.pixel(2, 2), Some(Color::Black));
        assert_eq!(image.pixel(5, 4), Some(Color::Black));
        assert_eq!(image.pixel(6, 4), Some(Color::White));
        assert_eq!(image.pixel(1, 1), Some(Color::White));
    }

    #[test]
    fn negative_coordinates_are_clipped() {
        let mut image = MonoImage::new(4, 4, Color::White);
        image
            .draw_iter([Pixel(Point::new(-1, 0), BinaryColor::On)])
            .unwrap();
        assert!(image.rows().flatten().all(|c| *c == Color::White));
    }
}
