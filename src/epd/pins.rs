//! GPIO assignment of the 4.2" panel on the reference board

/// Pin numbers used by the firmware binary
pub struct Pins;

impl Pins {
    /// Chip Select pin for SPI display
    pub const CS: u8 = 45;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 46;
    /// Reset pin for display
    pub const RST: u8 = 47;
    /// Busy status pin
    pub const BSY: u8 = 48;
    /// SPI Clock pin
    pub const SCK: u8 = 12;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;
    /// Panel supply enable
    pub const POWER: u8 = 7;
}
