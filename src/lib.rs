//! Driver for 4.2" e-paper panels
//!
//! Packed 1 bit per pixel framebuffer, full and partial refresh, and the command
//! sequences of both controller revisions. See [`epd`] for the details.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod epd;

pub use crate::epd::color::Color;
pub use crate::epd::config::{EpdConfig, TransferMode};
pub use crate::epd::driver::Epd4in2;
pub use crate::epd::error::EpdError;
pub use crate::epd::framebuffer::FrameBuffer;
pub use crate::epd::image::MonoImage;
pub use crate::epd::pins::Pins;
pub use crate::epd::protocol::{Mode, PanelState};
pub use crate::epd::transport::HalTransport;
pub use crate::epd::v1::PanelV1;
pub use crate::epd::v2::PanelV2;
