//! Driver error taxonomy
use core::fmt;

pub use display_interface::DisplayError;

use crate::epd::protocol::Mode;

/// Everything that can go wrong while driving the panel.
///
/// None of these are retried. After a failure in the middle of `init` the panel
/// state is undefined and the caller has to run `init` again.
#[derive(Debug)]
pub enum EpdError {
    /// The transport failed to come up; nothing was sent to the panel
    BusInit,
    /// A pin or bus transfer failed
    Bus(DisplayError),
    /// The busy line never reported idle
    PanelTimeout { waited_ms: u32 },
    /// A write rectangle does not fit in the framebuffer
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Framebuffer width must be a non-zero multiple of 8, height non-zero
    InvalidDimensions { width: u32, height: u32 },
    /// `fill` needs a band height of at least one row
    InvalidBandHeight,
    /// The panel has not been initialised, or is asleep
    NotInitialized,
    /// The panel revision cannot drive this mode
    UnsupportedMode(Mode),
}

impl From<DisplayError> for EpdError {
    fn from(e: DisplayError) -> Self {
        EpdError::Bus(e)
    }
}

impl fmt::Display for EpdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpdError::BusInit => write!(f, "bus transport failed to initialise"),
            EpdError::Bus(e) => write!(f, "bus error: {:?}", e),
            EpdError::PanelTimeout { waited_ms } => {
                write!(f, "panel still busy after {} ms", waited_ms)
            }
            EpdError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "{}x{} image at ({}, {}) does not fit the framebuffer",
                width, height, x, y
            ),
            EpdError::InvalidDimensions { width, height } => write!(
                f,
                "invalid framebuffer size {}x{} (width must be a multiple of 8)",
                width, height
            ),
            EpdError::InvalidBandHeight => write!(f, "fill band height must be at least 1"),
            EpdError::NotInitialized => write!(f, "panel is not initialised"),
            EpdError::UnsupportedMode(mode) => {
                write!(f, "mode {:?} is not supported by this panel revision", mode)
            }
        }
    }
}

impl std::error::Error for EpdError {}
