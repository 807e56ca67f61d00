//! Bus transport: the raw primitives the panel driver is built on
//!
//! The driver only ever asks for four things: toggle a control line, read the busy
//! line, push bytes over the serial link and sleep. Chip-select and command/data
//! framing are done one level up in [`crate::epd::interface`].

use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Role of a control or status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// Panel reset, active low
    Reset,
    /// Low for commands, high for data
    DataCommand,
    /// Chip select, active low
    ChipSelect,
    /// Busy/status input driven by the panel
    Busy,
}

/// Digital line level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Capability set the driver consumes
pub trait BusTransport {
    /// Bring up the bus. An error aborts panel initialisation before any command is sent.
    fn init(&mut self) -> Result<(), DisplayError>;

    fn digital_write(&mut self, pin: PinRole, level: Level) -> Result<(), DisplayError>;

    fn digital_read(&mut self, pin: PinRole) -> Result<Level, DisplayError>;

    /// Write bytes on the serial link. Nothing is read back.
    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    fn delay_ms(&mut self, ms: u32);
}

/// [`BusTransport`] over `embedded-hal` peripherals
///
/// ## Type Parameters
///
/// - `SPI` - SPI bus without chip-select handling
/// - `CS` - Chip select output pin
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `BSY` - BUSY input pin
/// - `DELAY` - Delay provider for timing
pub struct HalTransport<SPI, CS, DC, RST, BSY, DELAY> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    busy: BSY,
    delay: DELAY,
}

impl<SPI, CS, DC, RST, BSY, DELAY> HalTransport<SPI, CS, DC, RST, BSY, DELAY> {
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BSY, delay: DELAY) -> Self {
        HalTransport {
            spi,
            cs,
            dc,
            rst,
            busy,
            delay,
        }
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, DELAY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy, self.delay)
    }
}

fn set_pin(pin: &mut impl OutputPin, level: Level, err: DisplayError) -> Result<(), DisplayError> {
    match level {
        Level::High => pin.set_high(),
        Level::Low => pin.set_low(),
    }
    .map_err(|_| err)
}

impl<SPI, CS, DC, RST, BSY, DELAY> BusTransport for HalTransport<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        // Deselect the panel and release reset
        self.cs.set_high().map_err(|_| DisplayError::CSError)?;
        self.rst.set_high().map_err(|_| DisplayError::RSError)
    }

    fn digital_write(&mut self, pin: PinRole, level: Level) -> Result<(), DisplayError> {
        match pin {
            PinRole::Reset => set_pin(&mut self.rst, level, DisplayError::RSError),
            PinRole::DataCommand => set_pin(&mut self.dc, level, DisplayError::DCError),
            PinRole::ChipSelect => set_pin(&mut self.cs, level, DisplayError::CSError),
            PinRole::Busy => {
                log::error!("BUSY is an input, refusing to drive it");
                Err(DisplayError::BusWriteError)
            }
        }
    }

    fn digital_read(&mut self, pin: PinRole) -> Result<Level, DisplayError> {
        match pin {
            PinRole::Busy => self
                .busy
                .is_high()
                .map(Level::from)
                .map_err(|_| DisplayError::BusWriteError),
            other => {
                log::error!("{:?} is an output, it cannot be read", other);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        if let Err(e) = self.spi.write(bytes) {
            log::error!("SPI write error for {} bytes: {:?}", bytes.len(), e);
            return Err(DisplayError::BusWriteError);
        }
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
