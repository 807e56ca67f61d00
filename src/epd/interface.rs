//! Command/data framing on top of a [`BusTransport`]
use display_interface::DisplayError;

use crate::epd::config::TransferMode;
use crate::epd::error::EpdError;
use crate::epd::transport::{BusTransport, Level, PinRole};

/// Bytes sent per frame when repeating a single value
const REPEAT_CHUNK_SIZE: usize = 32;

/// Busy line behaviour of a panel revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyLine {
    /// Level the panel drives when it is ready for the next command
    pub idle: Level,
    /// Delay between two reads
    pub poll_ms: u32,
}

/// The connection interface to the panel controller
///
/// Owns the transport exclusively; two interfaces on one bus would corrupt the
/// chip-select and command/data framing of each other.
pub struct DisplayInterface<T> {
    transport: T,
    transfer: TransferMode,
    busy: BusyLine,
    /// `None` waits forever
    timeout_ms: Option<u32>,
}

impl<T> DisplayInterface<T> {
    pub fn new(
        transport: T,
        transfer: TransferMode,
        busy: BusyLine,
        timeout_ms: Option<u32>,
    ) -> Self {
        DisplayInterface {
            transport,
            transfer,
            busy,
            timeout_ms,
        }
    }

    pub fn transfer_mode(&self) -> TransferMode {
        self.transfer
    }

    pub fn busy_line(&self) -> BusyLine {
        self.busy
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T> DisplayInterface<T>
where
    T: BusTransport,
{
    /// Bring up the underlying bus
    pub(crate) fn init_bus(&mut self) -> Result<(), EpdError> {
        self.transport.init().map_err(|e| {
            log::error!("Bus initialisation failed: {:?}", e);
            EpdError::BusInit
        })
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.transport
            .digital_write(PinRole::DataCommand, Level::Low)?;
        self.framed(&[command]).map_err(|e| {
            log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
            e
        })
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.transport
            .digital_write(PinRole::DataCommand, Level::High)?;
        match self.transfer {
            TransferMode::Burst => self.framed(data),
            TransferMode::PerByte => data.chunks(1).try_for_each(|b| self.framed(b)),
            TransferMode::Chunked(n) => data.chunks(n.max(1)).try_for_each(|c| self.framed(c)),
        }
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send the same byte `repetitions` times, used for flat colour frames
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), DisplayError> {
        self.transport
            .digital_write(PinRole::DataCommand, Level::High)?;

        let chunk_size = match self.transfer {
            TransferMode::Burst => REPEAT_CHUNK_SIZE,
            TransferMode::PerByte => 1,
            TransferMode::Chunked(n) => n.clamp(1, REPEAT_CHUNK_SIZE),
        };
        let buffer = [val; REPEAT_CHUNK_SIZE];

        if self.transfer == TransferMode::Burst {
            // one chip-select frame around every chunk
            self.transport
                .digital_write(PinRole::ChipSelect, Level::Low)?;
            let mut remaining = repetitions;
            while remaining > 0 {
                let n = remaining.min(chunk_size);
                self.transport.transfer(&buffer[..n])?;
                remaining -= n;
            }
            self.transport
                .digital_write(PinRole::ChipSelect, Level::High)?;
        } else {
            let mut remaining = repetitions;
            while remaining > 0 {
                let n = remaining.min(chunk_size);
                self.framed(&buffer[..n])?;
                remaining -= n;
            }
        }

        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// Drive the reset line through `steps` of `(level, hold time in ms)`
    pub(crate) fn reset(&mut self, steps: &[(Level, u32)]) -> Result<(), DisplayError> {
        for &(level, hold_ms) in steps {
            self.transport.digital_write(PinRole::Reset, level)?;
            self.transport.delay_ms(hold_ms);
        }
        Ok(())
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.transport.delay_ms(ms);
    }

    /// Block until the busy line reports idle.
    ///
    /// `poll_cmd` is re-sent before every read for controllers that only refresh
    /// their busy output on a status request.
    pub(crate) fn wait_until_idle(&mut self, poll_cmd: Option<u8>) -> Result<(), EpdError> {
        let mut waited_ms: u32 = 0;
        loop {
            if let Some(command) = poll_cmd {
                self.cmd(command)?;
            }
            if self.transport.digital_read(PinRole::Busy)? == self.busy.idle {
                log::debug!("Panel idle after {} ms", waited_ms);
                return Ok(());
            }
            if let Some(timeout_ms) = self.timeout_ms {
                if waited_ms >= timeout_ms {
                    log::warn!("BUSY: timeout waiting for idle after {} ms", waited_ms);
                    return Err(EpdError::PanelTimeout { waited_ms });
                }
            }
            self.transport.delay_ms(self.busy.poll_ms);
            // a zero poll interval still has to make progress towards the timeout
            waited_ms = waited_ms.saturating_add(self.busy.poll_ms.max(1));
        }
    }

    /// One chip-select frame around a transfer
    fn framed(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.transport
            .digital_write(PinRole::ChipSelect, Level::Low)?;
        self.transport.transfer(bytes)?;
        self.transport
            .digital_write(PinRole::ChipSelect, Level::High)
    }
}
