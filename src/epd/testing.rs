//! Recording transport for unit tests
use std::collections::VecDeque;

use display_interface::DisplayError;

use crate::epd::transport::{BusTransport, Level, PinRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write(PinRole, Level),
    Transfer(Vec<u8>),
    Delay(u32),
}

/// Logs every primitive and plays back a scripted busy line
#[derive(Debug, Default)]
pub struct FakeTransport {
    pub events: Vec<Event>,
    busy_script: VecDeque<Level>,
    busy_level: Option<Level>,
    fail_init: bool,
    pub busy_reads: usize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level returned once the script is used up
    pub fn with_busy_level(mut self, level: Level) -> Self {
        self.busy_level = Some(level);
        self
    }

    /// Levels returned by successive reads of the busy line
    pub fn with_busy_script(mut self, levels: &[Level]) -> Self {
        self.busy_script.extend(levels.iter().copied());
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn transfers(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Transfer(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn transferred_bytes(&self) -> Vec<u8> {
        self.transfers().concat()
    }

    pub fn chip_select_frames(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == Event::Write(PinRole::ChipSelect, Level::Low))
            .count()
    }

    pub fn total_delay_ms(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                Event::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Every command with the data bytes that followed it
    pub fn packets(&self) -> Vec<(u8, Vec<u8>)> {
        let mut dc = Level::High;
        let mut packets: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in &self.events {
            match event {
                Event::Write(PinRole::DataCommand, level) => dc = *level,
                Event::Transfer(bytes) if dc == Level::Low => {
                    packets.extend(bytes.iter().map(|b| (*b, Vec::new())));
                }
                Event::Transfer(bytes) => {
                    if let Some((_, data)) = packets.last_mut() {
                        data.extend_from_slice(bytes);
                    }
                }
                _ => {}
            }
        }
        packets
    }

    pub fn commands(&self) -> Vec<u8> {
        self.packets().into_iter().map(|(cmd, _)| cmd).collect()
    }

    /// Data sent after the last occurrence of `command`
    pub fn data_for(&self, command: u8) -> Option<Vec<u8>> {
        self.packets()
            .into_iter()
            .rev()
            .find(|(cmd, _)| *cmd == command)
            .map(|(_, data)| data)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BusTransport for FakeTransport {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.fail_init {
            Err(DisplayError::BusWriteError)
        } else {
            Ok(())
        }
    }

    fn digital_write(&mut self, pin: PinRole, level: Level) -> Result<(), DisplayError> {
        self.events.push(Event::Write(pin, level));
        Ok(())
    }

    fn digital_read(&mut self, _pin: PinRole) -> Result<Level, DisplayError> {
        self.busy_reads += 1;
        Ok(self
            .busy_script
            .pop_front()
            .or(self.busy_level)
            .unwrap_or(Level::Low))
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.events.push(Event::Transfer(bytes.to_vec()));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Delay(ms));
    }
}
