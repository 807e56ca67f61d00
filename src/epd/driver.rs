//! 4.2" e-paper driver: framebuffer plus refresh orchestration
//!
//! The driver owns the framebuffer and the bus connection exclusively. One
//! instance per physical panel; nothing is shared and every call blocks until
//! the panel is idle again.
//!
//! ## Lifecycle
//!
//! `Uninitialized -> Resetting -> Initialized(mode) -> Sleeping`, and back to
//! `Initialized` only through [`Epd4in2::init`].
//!
//! ## One draw
//!
//! 1. the image is written into the framebuffer
//! 1. the framebuffer (or the byte-aligned window around the image) is streamed
//!    to the panel RAM
//! 1. a refresh is triggered and the busy line is polled until idle
//!
//! Partial refreshes leave ghosting behind. With
//! [`EpdConfig::full_refresh_every`] set, every n-th partial draw is promoted to
//! a full refresh.

use crate::epd::color::Color;
use crate::epd::config::EpdConfig;
use crate::epd::error::EpdError;
use crate::epd::flag::Flag;
use crate::epd::framebuffer::FrameBuffer;
use crate::epd::image::MonoImage;
use crate::epd::interface::{BusyLine, DisplayInterface};
use crate::epd::protocol::{Mode, PanelProtocol, PanelState};
use crate::epd::transport::BusTransport;
use crate::epd::window::UpdateWindow;

/// E-paper driver generic over the panel revision `P` and the bus transport `T`
pub struct Epd4in2<P, T> {
    protocol: P,
    interface: DisplayInterface<T>,
    frame_buffer: FrameBuffer,
    state: PanelState,
    partial_refresh: bool,
    full_refresh_every: Option<u32>,
    /// Partial refreshes since the last full one
    partial_count: u32,
}

impl<P, T> Epd4in2<P, T>
where
    P: PanelProtocol,
    T: BusTransport,
{
    /// Set up the driver. Nothing is sent to the panel until [`Epd4in2::init`].
    pub fn new(protocol: P, transport: T, config: EpdConfig) -> Result<Self, EpdError> {
        let frame_buffer = FrameBuffer::new(config.width, config.height, protocol.initial_fill())?;
        let defaults = protocol.busy_line();
        let busy = BusyLine {
            idle: defaults.idle,
            poll_ms: config.busy_poll_ms.unwrap_or(defaults.poll_ms),
        };
        let transfer = config.transfer.unwrap_or(protocol.default_transfer());
        let interface = DisplayInterface::new(transport, transfer, busy, config.busy_timeout_ms);

        Ok(Epd4in2 {
            protocol,
            interface,
            frame_buffer,
            state: PanelState::Uninitialized,
            partial_refresh: false,
            full_refresh_every: config.full_refresh_every,
            partial_count: 0,
        })
    }

    /// Bring up the bus, reset the panel and configure it.
    ///
    /// Grayscale wins when both flags are set, and disables partial refresh.
    /// If this fails half way the panel state is undefined; call `init` again.
    pub fn init(&mut self, partial: bool, gray: bool) -> Result<(), EpdError> {
        let mode = Mode::from_flags(partial, gray);
        if !self.protocol.supports(mode) {
            log::error!("Panel revision cannot run in {:?} mode", mode);
            return Err(EpdError::UnsupportedMode(mode));
        }

        self.interface.init_bus()?;

        log::info!("Initialising panel in {:?} mode", mode);
        self.state = PanelState::Resetting;
        self.protocol.init(
            &mut self.interface,
            mode,
            self.frame_buffer.width(),
            self.frame_buffer.height(),
        )?;

        self.state = PanelState::Initialized(mode);
        self.partial_refresh = mode == Mode::PartialFast;
        self.partial_count = 0;
        Ok(())
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn width(&self) -> u32 {
        self.frame_buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.frame_buffer.height()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Current framebuffer contents as an image
    pub fn frame_buffer_to_image(&self) -> MonoImage {
        self.frame_buffer.to_image()
    }

    /// Write `image` into the framebuffer at `(x, y)` without refreshing
    pub fn set_frame_buffer(&mut self, x: u32, y: u32, image: &MonoImage) -> Result<(), EpdError> {
        self.frame_buffer.set_pixel_region(x, y, image)
    }

    /// Write `image` at `(x, y)` and show it, as a window update in partial
    /// mode or a full refresh otherwise
    pub fn draw(&mut self, x: u32, y: u32, image: &MonoImage) -> Result<(), EpdError> {
        self.ensure_initialized()?;
        self.set_frame_buffer(x, y, image)?;

        if !self.partial_refresh {
            return self.display_full();
        }

        if let Some(limit) = self.full_refresh_every {
            if self.partial_count >= limit {
                log::warn!(
                    "{} partial refreshes in a row, doing a full refresh",
                    self.partial_count
                );
                return self.display_full();
            }
        }

        self.display_partial(x, y, x + image.width(), y + image.height())
    }

    /// Stream the whole framebuffer and run a full refresh
    pub fn display_full(&mut self) -> Result<(), EpdError> {
        self.ensure_initialized()?;
        log::info!("Full refresh");
        self.protocol
            .display_full(&mut self.interface, &self.frame_buffer)?;
        self.partial_count = 0;
        Ok(())
    }

    /// Refresh the rectangle `x_start..x_end`, `y_start..y_end`, widened to
    /// whole byte columns
    pub fn display_partial(
        &mut self,
        x_start: u32,
        y_start: u32,
        x_end: u32,
        y_end: u32,
    ) -> Result<(), EpdError> {
        self.ensure_initialized()?;
        let window = UpdateWindow::snap(
            x_start,
            y_start,
            x_end,
            y_end,
            self.frame_buffer.width(),
            self.frame_buffer.height(),
        );
        if window.is_empty() {
            log::debug!("Nothing to refresh in {:?}", window);
            return Ok(());
        }

        log::info!(
            "Partial refresh x {}..{} y {}..{} ({} bytes)",
            window.x_start,
            window.x_end,
            window.y_start,
            window.y_end,
            window.byte_len()
        );
        self.protocol
            .display_partial(&mut self.interface, &self.frame_buffer, &window)?;
        self.partial_count += 1;
        Ok(())
    }

    /// Paint the whole panel `color`, drawing bands of `band_height` rows
    pub fn fill(&mut self, color: Color, band_height: u32) -> Result<(), EpdError> {
        if band_height == 0 {
            return Err(EpdError::InvalidBandHeight);
        }
        let width = self.frame_buffer.width();
        let height = self.frame_buffer.height();
        let bands = height / band_height;
        let rest = height % band_height;

        let band = MonoImage::new(width, band_height.min(height), color);
        for i in 0..bands {
            self.draw(0, i * band_height, &band)?;
        }
        if rest != 0 {
            self.draw(0, bands * band_height, &MonoImage::new(width, rest, color))?;
        }
        Ok(())
    }

    /// Blank the panel and the framebuffer to white
    pub fn clear(&mut self) -> Result<(), EpdError> {
        self.ensure_initialized()?;
        log::info!("Clearing panel");
        self.protocol.clear(
            &mut self.interface,
            self.frame_buffer.width(),
            self.frame_buffer.height(),
        )?;
        self.frame_buffer.fill(Flag::RAM_ALL_WHITE);
        self.partial_count = 0;
        Ok(())
    }

    /// Put the panel into deep sleep. [`Epd4in2::init`] is needed before further use.
    pub fn sleep(&mut self) -> Result<(), EpdError> {
        self.ensure_initialized()?;
        log::info!("Panel entering deep sleep");
        self.protocol.sleep(&mut self.interface)?;
        self.state = PanelState::Sleeping;
        Ok(())
    }

    /// Give back the protocol state and the transport
    pub fn release(self) -> (P, T) {
        (self.protocol, self.interface.release())
    }

    fn ensure_initialized(&self) -> Result<(), EpdError> {
        match self.state {
            PanelState::Initialized(_) => Ok(()),
            _ => Err(EpdError::NotInitialized),
        }
    }
}
