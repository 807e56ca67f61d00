//! Waveshare 4.2" e-paper driver
//!
//! Drives the 400x300 black/white panel in both controller revisions that ship
//! under the same name:
//!
//! - [`v1::PanelV1`], the UC8176/IL0398 controller with waveform tables uploaded
//!   from the host, grayscale support and a busy line that is high when idle
//! - [`v2::PanelV2`], the SSD1683 controller with waveforms in OTP and a busy line
//!   that is low when idle
//!
//! ### Usage
//!
//! 1. wrap the SPI bus and pins in a [`transport::HalTransport`]
//! 1. create a [`driver::Epd4in2`] for the right revision and call `init`
//! 1. draw [`image::MonoImage`]s, preferably rendered with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics),
//!    with `draw` or `fill`
//! 1. put the panel to sleep when done
//!
//! ```no_run
//! # fn demo<T: epd4in2::epd::transport::BusTransport>(transport: T) -> Result<(), epd4in2::EpdError> {
//! use epd4in2::{Color, Epd4in2, EpdConfig, MonoImage, PanelV2};
//!
//! let mut epd = Epd4in2::new(PanelV2::new(), transport, EpdConfig::default())?;
//! epd.init(true, false)?;
//! epd.draw(8, 8, &MonoImage::new(64, 16, Color::Black))?;
//! epd.sleep()?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod framebuffer;
pub mod image;
pub mod interface;
pub mod lut;
pub mod pins;
pub mod protocol;
pub mod transport;
pub mod v1;
pub mod v2;
pub mod window;

#[cfg(test)]
mod testing;
