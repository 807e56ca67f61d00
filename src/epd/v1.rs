//! First panel revision
//!
//! Waveforms are programmed explicitly from [`crate::epd::lut`]. A partial
//! refresh streams the window twice: as-is into the first RAM bank and bit
//! inverted into the second, which is how this controller's waveform logic
//! learns the old/new difference.
//!
//! The busy line reads low while the controller works, and only updates after
//! a GET_STATUS request.

use crate::epd::cmd::Cmd;
use crate::epd::config::TransferMode;
use crate::epd::error::EpdError;
use crate::epd::flag::Flag;
use crate::epd::framebuffer::FrameBuffer;
use crate::epd::interface::{BusyLine, DisplayInterface};
use crate::epd::lut::{Lut, LutClass};
use crate::epd::protocol::{Mode, PanelProtocol};
use crate::epd::transport::{BusTransport, Level};
use crate::epd::window::UpdateWindow;

const RESET_SEQUENCE: [(Level, u32); 3] = [(Level::High, 200), (Level::Low, 200), (Level::High, 200)];
const BUSY_POLL_MS: u32 = 100;
const REFRESH_SETTLE_MS: u32 = 100;

/// Driver state of the first revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelV1 {
    /// Waveform used for full refreshes in the current mode
    full_lut: LutClass,
    /// PARTIAL_IN was sent and the partial waveform is loaded
    partial_active: bool,
}

impl Default for PanelV1 {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelV1 {
    pub fn new() -> Self {
        PanelV1 {
            full_lut: LutClass::Full,
            partial_active: false,
        }
    }

    fn set_lut<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        class: LutClass,
    ) -> Result<(), EpdError> {
        log::debug!("Loading {:?} waveform", class);
        for (register, table) in Lut::for_class(class).registers() {
            iface.cmd_with_data(register, table)?;
        }
        Ok(())
    }

    fn set_resolution<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        iface.cmd_with_data(
            Cmd::RESOLUTION_SETTING,
            &[
                (width >> 8) as u8,
                width as u8,
                (height >> 8) as u8,
                height as u8,
            ],
        )?;
        Ok(())
    }

    /// Leave partial mode and restore the full refresh registers
    fn leave_partial<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
    ) -> Result<(), EpdError> {
        if !self.partial_active {
            return Ok(());
        }
        log::debug!("Leaving partial mode");
        iface.cmd(Cmd::PARTIAL_OUT)?;
        iface.cmd_with_data(Cmd::VCM_DC_SETTING, &[Flag::VCM_DC_FULL])?;
        iface.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_FULL],
        )?;
        self.set_lut(iface, self.full_lut)?;
        self.partial_active = false;
        Ok(())
    }

    fn turn_on_display<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
    ) -> Result<(), EpdError> {
        iface.cmd(Cmd::DISPLAY_REFRESH)?;
        iface.delay_ms(REFRESH_SETTLE_MS);
        self.wait_until_idle(iface)
    }
}

/// PARTIAL_WINDOW payload: big-endian start/end, inclusive ends
fn partial_window_payload(window: &UpdateWindow) -> [u8; 9] {
    let x_last = window.x_end - 1;
    let y_last = window.y_end - 1;
    [
        (window.x_start >> 8) as u8,
        window.x_start as u8,
        (x_last >> 8) as u8,
        x_last as u8,
        (window.y_start >> 8) as u8,
        window.y_start as u8,
        (y_last >> 8) as u8,
        y_last as u8,
        Flag::PARTIAL_WINDOW_SCAN,
    ]
}

impl PanelProtocol for PanelV1 {
    fn busy_line(&self) -> BusyLine {
        BusyLine {
            idle: Level::High,
            poll_ms: BUSY_POLL_MS,
        }
    }

    fn default_transfer(&self) -> TransferMode {
        TransferMode::PerByte
    }

    fn initial_fill(&self) -> u8 {
        Flag::RAM_ALL_BLACK
    }

    fn supports(&self, _mode: Mode) -> bool {
        true
    }

    fn reset<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError> {
        iface.reset(&RESET_SEQUENCE)?;
        Ok(())
    }

    fn wait_until_idle<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
    ) -> Result<(), EpdError> {
        iface.wait_until_idle(Some(Cmd::GET_STATUS))
    }

    fn init<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        mode: Mode,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        let gray = mode == Mode::Gray4;
        self.partial_active = false;
        self.full_lut = if gray { LutClass::Gray } else { LutClass::Full };

        self.reset(iface)?;

        iface.cmd_with_data(Cmd::POWER_SETTING, &Flag::POWER_SETTING)?;
        iface.cmd_with_data(Cmd::BOOSTER_SOFT_START, &Flag::BOOSTER_SOFT_START)?;
        iface.cmd(Cmd::POWER_ON)?;
        self.wait_until_idle(iface)?;

        if gray {
            iface.cmd_with_data(Cmd::PANEL_SETTING, &Flag::PANEL_SETTING_GRAY)?;
        } else {
            iface.cmd_with_data(Cmd::PANEL_SETTING, &Flag::PANEL_SETTING_LUT_FROM_REGISTER)?;
        }
        iface.cmd_with_data(Cmd::PLL_CONTROL, &[Flag::PLL_100HZ])?;
        self.set_resolution(iface, width, height)?;
        iface.cmd_with_data(Cmd::VCM_DC_SETTING, &[Flag::VCM_DC_FULL])?;
        iface.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_FULL],
        )?;
        self.set_lut(iface, self.full_lut)
    }

    fn display_full<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
    ) -> Result<(), EpdError> {
        self.leave_partial(iface)?;

        // Same image in both banks: every pixel is a plain black or white transition
        iface.cmd_with_data(Cmd::DATA_START_TRANSMISSION_1, frame_buffer.as_bytes())?;
        iface.cmd_with_data(Cmd::DATA_START_TRANSMISSION_2, frame_buffer.as_bytes())?;

        self.turn_on_display(iface)
    }

    fn display_partial<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
        window: &UpdateWindow,
    ) -> Result<(), EpdError> {
        iface.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_BORDER_FLOATING],
        )?;
        iface.delay_ms(REFRESH_SETTLE_MS);

        iface.cmd_with_data(Cmd::VCM_DC_SETTING, &[Flag::VCM_DC_PARTIAL])?;
        iface.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_PARTIAL],
        )?;
        self.set_lut(iface, LutClass::Partial)?;

        iface.cmd(Cmd::PARTIAL_IN)?;
        iface.cmd_with_data(Cmd::PARTIAL_WINDOW, &partial_window_payload(window))?;
        self.partial_active = true;

        let bytes = frame_buffer.window_bytes(window);
        iface.cmd_with_data(Cmd::DATA_START_TRANSMISSION_1, &bytes)?;
        let inverted: Vec<u8> = bytes.iter().map(|b| !b).collect();
        iface.cmd_with_data(Cmd::DATA_START_TRANSMISSION_2, &inverted)?;

        self.turn_on_display(iface)
    }

    fn clear<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        self.leave_partial(iface)?;
        let len = (width / 8) as usize * height as usize;

        iface.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        iface.data_x_times(Flag::RAM_ALL_WHITE, len)?;
        iface.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        iface.data_x_times(Flag::RAM_ALL_WHITE, len)?;

        self.turn_on_display(iface)
    }

    fn sleep<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError> {
        iface.cmd(Cmd::POWER_OFF)?;
        self.wait_until_idle(iface)?;
        iface.cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])?;
        self.partial_active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::testing::FakeTransport;

    fn interface() -> DisplayInterface<FakeTransport> {
        let panel = PanelV1::new();
        DisplayInterface::new(
            FakeTransport::new().with_busy_level(Level::High),
            panel.default_transfer(),
            panel.busy_line(),
            Some(1_000),
        )
    }

    /// Commands with the status polls filtered out
    fn commands(t: &FakeTransport) -> Vec<u8> {
        t.commands()
            .into_iter()
            .filter(|c| *c != Cmd::GET_STATUS)
            .collect()
    }

    #[test]
    fn black_white_init_sequence() {
        let mut iface = interface();
        PanelV1::new()
            .init(&mut iface, Mode::BlackWhite, 400, 300)
            .unwrap();
        let t = iface.release();
        assert_eq!(
            commands(&t),
            vec![
                Cmd::POWER_SETTING,
                Cmd::BOOSTER_SOFT_START,
                Cmd::POWER_ON,
                Cmd::PANEL_SETTING,
                Cmd::PLL_CONTROL,
                Cmd::RESOLUTION_SETTING,
                Cmd::VCM_DC_SETTING,
                Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
                Cmd::VCOM_LUT,
                Cmd::W2W_LUT,
                Cmd::B2W_LUT,
                Cmd::W2B_LUT,
                Cmd::B2B_LUT,
            ]
        );
        assert_eq!(t.data_for(Cmd::RESOLUTION_SETTING), Some(vec![0x01, 0x90, 0x01, 0x2C]));
        assert_eq!(t.data_for(Cmd::PANEL_SETTING), Some(vec![0xBF, 0x0D]));
        assert_eq!(t.data_for(Cmd::VCOM_LUT), Some(crate::epd::lut::FULL.vcom.to_vec()));
    }

    #[test]
    fn gray_init_loads_gray_waveform() {
        let mut iface = interface();
        PanelV1::new().init(&mut iface, Mode::Gray4, 400, 300).unwrap();
        let t = iface.release();
        assert_eq!(t.data_for(Cmd::PANEL_SETTING), Some(vec![0x3F]));
        assert_eq!(t.data_for(Cmd::B2B_LUT), Some(crate::epd::lut::GRAY.bb.to_vec()));
    }

    #[test]
    fn data_bytes_go_out_one_frame_each() {
        let mut iface = interface();
        iface.cmd_with_data(Cmd::POWER_SETTING, &Flag::POWER_SETTING).unwrap();
        // one frame for the command and five for the payload
        assert_eq!(iface.release().chip_select_frames(), 6);
    }

    #[test]
    fn partial_window_payload_uses_inclusive_ends() {
        let window = UpdateWindow {
            x_start: 0,
            y_start: 10,
            x_end: 24,
            y_end: 12,
        };
        assert_eq!(
            partial_window_payload(&window),
            [0x00, 0x00, 0x00, 23, 0x00, 10, 0x00, 11, 0x28]
        );
        let window = UpdateWindow::full(400, 300);
        assert_eq!(
            partial_window_payload(&window),
            [0x00, 0x00, 0x01, 0x8F, 0x00, 0x00, 0x01, 0x2B, 0x28]
        );
    }

    #[test]
    fn partial_refresh_sends_window_then_its_inverse() {
        let mut fb = FrameBuffer::new(400, 300, 0x00).unwrap();
        fb.fill(0x0F);
        let window = UpdateWindow::snap(3, 10, 20, 12, 400, 300);
        let mut panel = PanelV1::new();
        let mut iface = interface();
        panel.display_partial(&mut iface, &fb, &window).unwrap();
        let t = iface.release();

        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_1), Some(vec![0x0F; 6]));
        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_2), Some(vec![0xF0; 6]));
        assert_eq!(t.data_for(Cmd::VCOM_LUT), Some(crate::epd::lut::PARTIAL.vcom.to_vec()));
        assert!(panel.partial_active);
        assert_eq!(commands(&t).last(), Some(&Cmd::DISPLAY_REFRESH));
    }

    #[test]
    fn full_refresh_after_partial_leaves_partial_mode() {
        let fb = FrameBuffer::new(16, 2, 0xAA).unwrap();
        let mut panel = PanelV1::new();
        let mut iface = interface();
        panel
            .display_partial(&mut iface, &fb, &UpdateWindow::full(16, 2))
            .unwrap();
        iface.release();

        let mut iface = interface();
        panel.display_full(&mut iface, &fb).unwrap();
        let t = iface.release();
        let cmds = commands(&t);
        assert_eq!(cmds[0], Cmd::PARTIAL_OUT);
        assert_eq!(t.data_for(Cmd::VCOM_LUT), Some(crate::epd::lut::FULL.vcom.to_vec()));
        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_1), Some(vec![0xAA; 4]));
        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_2), Some(vec![0xAA; 4]));
        assert!(!panel.partial_active);
    }

    #[test]
    fn clear_writes_white_into_both_banks() {
        let mut iface = interface();
        PanelV1::new().clear(&mut iface, 16, 2).unwrap();
        let t = iface.release();
        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_1), Some(vec![0xFF; 4]));
        assert_eq!(t.data_for(Cmd::DATA_START_TRANSMISSION_2), Some(vec![0xFF; 4]));
    }

    #[test]
    fn sleep_powers_off_before_deep_sleep() {
        let mut iface = interface();
        PanelV1::new().sleep(&mut iface).unwrap();
        let t = iface.release();
        assert_eq!(commands(&t), vec![Cmd::POWER_OFF, Cmd::DEEP_SLEEP]);
        assert_eq!(t.data_for(Cmd::DEEP_SLEEP), Some(vec![0xA5]));
    }
}
