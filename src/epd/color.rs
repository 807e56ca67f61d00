//! Monochrome pixel colour
use embedded_graphics::pixelcolor::BinaryColor;

/// Only white and black are available on the panel in monochrome mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Bit cleared in the framebuffer
    Black,
    /// Bit set in the framebuffer
    #[default]
    White,
}

impl Color {
    /// Framebuffer bit for this colour
    pub const fn bit(self) -> bool {
        matches!(self, Color::White)
    }

    /// Colour stored in a framebuffer bit
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Color::White
        } else {
            Color::Black
        }
    }

    /// A whole byte of this colour
    pub const fn byte(self) -> u8 {
        match self {
            Color::White => 0xFF,
            Color::Black => 0x00,
        }
    }

    /// The other colour
    pub const fn inverse(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// On = black pixels, Off = white paper
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_is_the_set_bit() {
        assert!(Color::White.bit());
        assert!(!Color::Black.bit());
        assert_eq!(Color::from_bit(true), Color::White);
        assert_eq!(Color::White.byte(), 0xFF);
    }

    #[test]
    fn binary_color_on_draws_black() {
        assert_eq!(Color::from(BinaryColor::On), Color::Black);
        assert_eq!(BinaryColor::from(Color::White), BinaryColor::Off);
        assert_eq!(Color::Black.inverse(), Color::White);
    }
}
