/// Data values written alongside the opcodes in [`crate::epd::cmd`].
///
/// Transcribed from the controller datasheets and the vendor reference sequences.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // ---- First revision ----

    // Power Setting (0x01): VDS/VDG internal, VDH/VDL +-11V, VDHR 6.2V
    pub const POWER_SETTING: [u8; 5] = [0x03, 0x00, 0x2B, 0x2B, 0x13];
    // Booster Soft Start (0x06) phases A/B/C
    pub const BOOSTER_SOFT_START: [u8; 3] = [0x17, 0x17, 0x17];

    // Panel Setting (0x00)
    pub const PANEL_SETTING_LUT_FROM_REGISTER: [u8; 2] = [0xBF, 0x0D];
    pub const PANEL_SETTING_GRAY: [u8; 1] = [0x3F];

    // PLL Control (0x30): 100Hz frame rate
    pub const PLL_100HZ: u8 = 0x3C;

    // VCM DC Setting (0x82)
    pub const VCM_DC_FULL: u8 = 0x12;
    pub const VCM_DC_PARTIAL: u8 = 0x08;

    // VCOM and Data Interval Setting (0x50)
    pub const VCOM_DATA_INTERVAL_FULL: u8 = 0x97;
    pub const VCOM_DATA_INTERVAL_BORDER_FLOATING: u8 = 0xF7;
    pub const VCOM_DATA_INTERVAL_PARTIAL: u8 = 0x47;

    // Trailing byte of Partial Window (0x90): PT_SCAN, gates scan inside and outside the window
    pub const PARTIAL_WINDOW_SCAN: u8 = 0x28;

    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

    // ---- Second revision ----

    // Display Update Control 1 (0x21)
    pub const UPDATE_CTRL1_BYPASS_RED_AS_ZERO: [u8; 2] = [0x40, 0x00];
    pub const UPDATE_CTRL1_NORMAL: [u8; 2] = [0x00, 0x00];

    // Border Waveform Control (0x3C)
    pub const BORDER_WAVEFORM_FOLLOW_LUT: u8 = 0x05;
    pub const BORDER_WAVEFORM_VSS: u8 = 0x80;

    // Data Entry Mode (0x11)
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03;

    // Display Update Control 2 (0x22) sequences
    pub const DISPLAY_UPDATE_FULL: u8 = 0xF7;
    pub const DISPLAY_UPDATE_PARTIAL: u8 = 0xFF;

    // Deep Sleep Mode (0x10)
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;

    // ---- Shared ----

    pub const RAM_ALL_WHITE: u8 = 0xFF;
    pub const RAM_ALL_BLACK: u8 = 0x00;
}
