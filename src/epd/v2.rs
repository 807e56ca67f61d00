//! Second panel revision
//!
//! The controller carries its own waveforms, so there are no tables to load.
//! Windows are set through the RAM address registers and a partial refresh
//! streams the window once. The busy line reads high while the controller works.

use crate::epd::cmd::CmdV2;
use crate::epd::config::TransferMode;
use crate::epd::error::EpdError;
use crate::epd::flag::Flag;
use crate::epd::framebuffer::FrameBuffer;
use crate::epd::interface::{BusyLine, DisplayInterface};
use crate::epd::protocol::{Mode, PanelProtocol};
use crate::epd::transport::{BusTransport, Level};
use crate::epd::window::UpdateWindow;

const RESET_SEQUENCE: [(Level, u32); 3] = [(Level::High, 100), (Level::Low, 2), (Level::High, 100)];
const BUSY_POLL_MS: u32 = 20;
const DEEP_SLEEP_SETTLE_MS: u32 = 200;

/// Driver state of the second revision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelV2 {
    /// Border and update control were switched for windowed updates
    partial_active: bool,
}

impl PanelV2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// RAM address window, end coordinates exclusive
    fn set_ram_area<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        window: &UpdateWindow,
    ) -> Result<(), EpdError> {
        let x_last = window.x_end - 1;
        let y_last = window.y_end - 1;
        log::debug!(
            "RAM window x {}..={} y {}..={}",
            window.x_start,
            x_last,
            window.y_start,
            y_last
        );

        // X is addressed in bytes
        iface.cmd_with_data(
            CmdV2::SET_RAMX_START_END,
            &[(window.x_start >> 3) as u8, (x_last >> 3) as u8],
        )?;
        // Y little endian
        iface.cmd_with_data(
            CmdV2::SET_RAMY_START_END,
            &[
                window.y_start as u8,
                (window.y_start >> 8) as u8,
                y_last as u8,
                (y_last >> 8) as u8,
            ],
        )?;
        Ok(())
    }

    fn set_ram_counter<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        x: u32,
        y: u32,
    ) -> Result<(), EpdError> {
        iface.cmd_with_data(CmdV2::SET_RAMX_COUNTER, &[(x >> 3) as u8])?;
        iface.cmd_with_data(CmdV2::SET_RAMY_COUNTER, &[y as u8, (y >> 8) as u8])?;
        Ok(())
    }

    /// Border waveform and update control for full refreshes, full RAM window
    fn use_full_frame<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        if self.partial_active {
            log::debug!("Restoring full refresh registers");
            iface.cmd_with_data(
                CmdV2::BORDER_WAVEFORM_CONTROL,
                &[Flag::BORDER_WAVEFORM_FOLLOW_LUT],
            )?;
            iface.cmd_with_data(
                CmdV2::DISPLAY_UPDATE_CTRL1,
                &Flag::UPDATE_CTRL1_BYPASS_RED_AS_ZERO,
            )?;
            self.partial_active = false;
        }
        self.set_ram_area(iface, &UpdateWindow::full(width, height))?;
        self.set_ram_counter(iface, 0, 0)
    }

    /// Trigger display update with the given control value and wait for completion
    fn trigger_display_update<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        ctrl2_value: u8,
    ) -> Result<(), EpdError> {
        iface.cmd_with_data(CmdV2::DISPLAY_UPDATE_CTRL2, &[ctrl2_value])?;
        iface.cmd(CmdV2::MASTER_ACTIVATE)?;
        self.wait_until_idle(iface)
    }
}

impl PanelProtocol for PanelV2 {
    fn busy_line(&self) -> BusyLine {
        BusyLine {
            idle: Level::Low,
            poll_ms: BUSY_POLL_MS,
        }
    }

    fn default_transfer(&self) -> TransferMode {
        TransferMode::Burst
    }

    fn initial_fill(&self) -> u8 {
        Flag::RAM_ALL_WHITE
    }

    // Grayscale on this controller needs a vendor waveform blob
    fn supports(&self, mode: Mode) -> bool {
        mode != Mode::Gray4
    }

    fn reset<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError> {
        iface.reset(&RESET_SEQUENCE)?;
        Ok(())
    }

    fn wait_until_idle<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
    ) -> Result<(), EpdError> {
        iface.wait_until_idle(None)
    }

    fn init<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        mode: Mode,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        if !self.supports(mode) {
            return Err(EpdError::UnsupportedMode(mode));
        }
        self.partial_active = false;

        self.reset(iface)?;
        self.wait_until_idle(iface)?;

        iface.cmd(CmdV2::SW_RESET)?;
        self.wait_until_idle(iface)?;

        iface.cmd_with_data(
            CmdV2::DISPLAY_UPDATE_CTRL1,
            &Flag::UPDATE_CTRL1_BYPASS_RED_AS_ZERO,
        )?;
        iface.cmd_with_data(
            CmdV2::BORDER_WAVEFORM_CONTROL,
            &[Flag::BORDER_WAVEFORM_FOLLOW_LUT],
        )?;
        iface.cmd_with_data(CmdV2::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;

        self.set_ram_area(iface, &UpdateWindow::full(width, height))?;
        self.set_ram_counter(iface, 0, 0)?;
        self.wait_until_idle(iface)
    }

    fn display_full<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
    ) -> Result<(), EpdError> {
        self.use_full_frame(iface, frame_buffer.width(), frame_buffer.height())?;
        iface.cmd_with_data(CmdV2::WRITE_BW_DATA, frame_buffer.as_bytes())?;
        self.trigger_display_update(iface, Flag::DISPLAY_UPDATE_FULL)
    }

    fn display_partial<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        frame_buffer: &FrameBuffer,
        window: &UpdateWindow,
    ) -> Result<(), EpdError> {
        iface.cmd_with_data(CmdV2::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_VSS])?;
        iface.cmd_with_data(CmdV2::DISPLAY_UPDATE_CTRL1, &Flag::UPDATE_CTRL1_NORMAL)?;
        self.partial_active = true;

        self.set_ram_area(iface, window)?;
        self.set_ram_counter(iface, window.x_start, window.y_start)?;

        iface.cmd_with_data(CmdV2::WRITE_BW_DATA, &frame_buffer.window_bytes(window))?;
        self.trigger_display_update(iface, Flag::DISPLAY_UPDATE_PARTIAL)
    }

    fn clear<T: BusTransport>(
        &mut self,
        iface: &mut DisplayInterface<T>,
        width: u32,
        height: u32,
    ) -> Result<(), EpdError> {
        self.use_full_frame(iface, width, height)?;
        let len = (width / 8) as usize * height as usize;

        iface.cmd(CmdV2::WRITE_BW_DATA)?;
        iface.data_x_times(Flag::RAM_ALL_WHITE, len)?;
        iface.cmd(CmdV2::WRITE_PREVIOUS_DATA)?;
        iface.data_x_times(Flag::RAM_ALL_WHITE, len)?;

        self.trigger_display_update(iface, Flag::DISPLAY_UPDATE_FULL)
    }

    fn sleep<T: BusTransport>(&mut self, iface: &mut DisplayInterface<T>) -> Result<(), EpdError> {
        iface.cmd_with_data(CmdV2::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])?;
        iface.delay_ms(DEEP_SLEEP_SETTLE_MS);
        self.partial_active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::testing::FakeTransport;

    fn interface() -> DisplayInterface<FakeTransport> {
        let panel = PanelV2::new();
        DisplayInterface::new(
            FakeTransport::new(),
            panel.default_transfer(),
            panel.busy_line(),
            Some(1_000),
        )
    }

    #[test]
    fn init_sequence() {
        let mut iface = interface();
        PanelV2::new()
            .init(&mut iface, Mode::PartialFast, 400, 300)
            .unwrap();
        let t = iface.release();
        assert_eq!(
            t.commands(),
            vec![
                CmdV2::SW_RESET,
                CmdV2::DISPLAY_UPDATE_CTRL1,
                CmdV2::BORDER_WAVEFORM_CONTROL,
                CmdV2::DATA_ENTRY_MODE,
                CmdV2::SET_RAMX_START_END,
                CmdV2::SET_RAMY_START_END,
                CmdV2::SET_RAMX_COUNTER,
                CmdV2::SET_RAMY_COUNTER,
            ]
        );
        assert_eq!(t.data_for(CmdV2::SET_RAMX_START_END), Some(vec![0x00, 0x31]));
        assert_eq!(
            t.data_for(CmdV2::SET_RAMY_START_END),
            Some(vec![0x00, 0x00, 0x2B, 0x01])
        );
    }

    #[test]
    fn gray_mode_is_rejected_before_touching_the_bus() {
        let mut iface = interface();
        let err = PanelV2::new()
            .init(&mut iface, Mode::Gray4, 400, 300)
            .unwrap_err();
        assert!(matches!(err, EpdError::UnsupportedMode(Mode::Gray4)));
        assert!(iface.release().events.is_empty());
    }

    #[test]
    fn payloads_are_sent_in_one_frame() {
        let fb = FrameBuffer::new(400, 300, 0xFF).unwrap();
        let mut iface = interface();
        PanelV2::new().display_full(&mut iface, &fb).unwrap();
        let t = iface.release();
        assert!(t.transfers().iter().any(|bytes| bytes.len() == 15_000));
    }

    #[test]
    fn full_refresh_writes_only_the_primary_bank() {
        let fb = FrameBuffer::new(16, 2, 0x5A).unwrap();
        let mut iface = interface();
        PanelV2::new().display_full(&mut iface, &fb).unwrap();
        let t = iface.release();
        assert_eq!(t.data_for(CmdV2::WRITE_BW_DATA), Some(vec![0x5A; 4]));
        assert_eq!(t.data_for(CmdV2::WRITE_PREVIOUS_DATA), None);
        assert_eq!(t.data_for(CmdV2::DISPLAY_UPDATE_CTRL2), Some(vec![0xF7]));
        assert_eq!(t.commands().last(), Some(&CmdV2::MASTER_ACTIVATE));
    }

    #[test]
    fn partial_refresh_addresses_the_window() {
        let fb = FrameBuffer::new(400, 300, 0xFF).unwrap();
        let window = UpdateWindow::snap(3, 10, 20, 12, 400, 300);
        let mut iface = interface();
        PanelV2::new()
            .display_partial(&mut iface, &fb, &window)
            .unwrap();
        let t = iface.release();
        assert_eq!(t.data_for(CmdV2::BORDER_WAVEFORM_CONTROL), Some(vec![0x80]));
        assert_eq!(t.data_for(CmdV2::SET_RAMX_START_END), Some(vec![0, 2]));
        assert_eq!(t.data_for(CmdV2::SET_RAMY_START_END), Some(vec![10, 0, 11, 0]));
        assert_eq!(t.data_for(CmdV2::SET_RAMX_COUNTER), Some(vec![0]));
        assert_eq!(t.data_for(CmdV2::SET_RAMY_COUNTER), Some(vec![10, 0]));
        assert_eq!(t.data_for(CmdV2::WRITE_BW_DATA), Some(vec![0xFF; 6]));
        assert_eq!(t.data_for(CmdV2::DISPLAY_UPDATE_CTRL2), Some(vec![0xFF]));
    }

    #[test]
    fn full_refresh_after_partial_restores_the_full_window() {
        let fb = FrameBuffer::new(400, 300, 0xFF).unwrap();
        let mut panel = PanelV2::new();
        let mut iface = interface();
        panel
            .display_partial(&mut iface, &fb, &UpdateWindow::snap(0, 0, 8, 8, 400, 300))
            .unwrap();
        iface.release();

        let mut iface = interface();
        panel.display_full(&mut iface, &fb).unwrap();
        let t = iface.release();
        assert_eq!(t.data_for(CmdV2::BORDER_WAVEFORM_CONTROL), Some(vec![0x05]));
        assert_eq!(t.data_for(CmdV2::DISPLAY_UPDATE_CTRL1), Some(vec![0x40, 0x00]));
        assert_eq!(t.data_for(CmdV2::SET_RAMX_START_END), Some(vec![0x00, 0x31]));
    }

    #[test]
    fn sleep_enters_deep_sleep_mode_one() {
        let mut iface = interface();
        PanelV2::new().sleep(&mut iface).unwrap();
        let t = iface.release();
        assert_eq!(t.commands(), vec![CmdV2::DEEP_SLEEP_MODE]);
        assert_eq!(t.data_for(CmdV2::DEEP_SLEEP_MODE), Some(vec![0x01]));
    }
}
