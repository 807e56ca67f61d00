/// Opcodes of the first panel revision (UC8176 / IL0398 class controller).
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Power and panel setup
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DEEP_SLEEP: u8 = 0x07;

    // Frame transfer
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;

    // Waveform tables
    pub const VCOM_LUT: u8 = 0x20;
    pub const W2W_LUT: u8 = 0x21;
    pub const B2W_LUT: u8 = 0x22;
    pub const W2B_LUT: u8 = 0x23;
    pub const B2B_LUT: u8 = 0x24;

    pub const PLL_CONTROL: u8 = 0x30;
    pub const VCOM_AND_DATA_INTERVAL_SETTING: u8 = 0x50;
    pub const RESOLUTION_SETTING: u8 = 0x61;
    pub const GET_STATUS: u8 = 0x71;
    pub const VCM_DC_SETTING: u8 = 0x82;

    // Partial window
    pub const PARTIAL_WINDOW: u8 = 0x90;
    pub const PARTIAL_IN: u8 = 0x91;
    pub const PARTIAL_OUT: u8 = 0x92;
}

/// Opcodes of the second panel revision (SSD1683 class controller).
pub struct CmdV2;
#[allow(missing_docs)]
impl CmdV2 {
    pub const DEEP_SLEEP_MODE: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const MASTER_ACTIVATE: u8 = 0x20;
    pub const DISPLAY_UPDATE_CTRL1: u8 = 0x21;
    pub const DISPLAY_UPDATE_CTRL2: u8 = 0x22;
    pub const WRITE_BW_DATA: u8 = 0x24;
    pub const WRITE_PREVIOUS_DATA: u8 = 0x26;
    pub const BORDER_WAVEFORM_CONTROL: u8 = 0x3C;
    pub const SET_RAMX_START_END: u8 = 0x44;
    pub const SET_RAMY_START_END: u8 = 0x45;
    pub const SET_RAMX_COUNTER: u8 = 0x4E;
    pub const SET_RAMY_COUNTER: u8 = 0x4F;
}
