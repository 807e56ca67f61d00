//! Panel protocol: the part that differs between controller revisions
//!
//! Both revisions share the framebuffer, the refresh orchestration in
//! [`crate::epd::driver`] and the bus framing in [`crate::epd::interface`].
//! What stays here is the command sequences, waveform selection and the busy
//! line polarity.

use crate::epd::config::TransferMode;
use crate::epd::error::EpdError;
use crate::epd::framebuffer::FrameBuffer;
use crate::epd::interface::{BusyLine, DisplayInterface};
use crate::epd::transport::BusTransport;
use crate::epd::window::UpdateWindow;

/// Refresh mode chosen at `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full refreshes with the black/white waveform
    BlackWhite,
    /// Full refreshes with the grayscale waveform
    Gray4,
    /// Windowed updates with the fast waveform
    PartialFast,
}

impl Mode {
    /// Grayscale wins over partial refresh
    pub fn from_flags(partial: bool, gray: bool) -> Self {
        match (partial, gray) {
            (_, true) => Mode::Gray4,
            (true, false) => Mode::PartialFast,
            (false, false) => Mode::BlackWhite,
        }
    }
}

/// Lifecycle of the panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Uninitialized,
    /// Reset or init in progress, or an init that failed half way
    Resetting,
    Initialized(Mode),
    Sleeping,
}

/// One controller revision
///
/// Every method runs to completion and blocks on the busy line where the
/// controller needs it.
pub trait PanelProtocol {
    /// Busy line polarity and poll interval
    fn busy_line(&self) -> BusyLine;

    /// How data payloads are framed unless configured otherwise
    fn default_transfer(&self) -> TransferMode;

    /// Byte the framebuffer starts out with
    fn initial_fill(&self) -> u8;

    fn supports(&self, mode: Mode) -> bool;

    /// Power-cycle the controller through its reset line
    fn reset<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError>;

    fn wait_until_idle<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
    ) -> Result<(), EpdError>;

    /// Reset and configure the controller for `mode`
    fn init<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        mode: Mode,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError>;

    /// Send the whole framebuffer and run a full refresh
    fn display_full<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
    ) -> Result<(), EpdError>;

    /// Send the bytes inside `window` and run a partial refresh
    fn display_partial<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
        window: &UpdateWindow,
    ) -> Result<(), EpdError>;

    /// Blank the panel to white with a full refresh
    fn clear<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError>;

    /// Enter deep sleep; only `init` wakes the controller again
    fn sleep<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError>;
}
