//! Driver configuration

/// Panel width in pixels
pub const WIDTH: u32 = 400;

/// Panel height in pixels
pub const HEIGHT: u32 = 300;

/// Default upper bound for a single busy wait
pub const BUSY_TIMEOUT_MS: u32 = 10_000;

/// How a multi-byte data payload is framed on the bus
///
/// Some controllers do not care, others lose data when chip-select toggles
/// in the middle of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// The whole payload inside one chip-select frame
    Burst,
    /// One chip-select frame per byte
    PerByte,
    /// Frames of at most `n` bytes
    Chunked(usize),
}

/// Runtime settings for [`crate::epd::driver::Epd4in2`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpdConfig {
    pub width: u32,
    pub height: u32,
    /// Delay between two reads of the busy line, `None` uses the panel revision's value
    pub busy_poll_ms: Option<u32>,
    /// Give up waiting on the busy line after this long. `None` blocks forever.
    pub busy_timeout_ms: Option<u32>,
    /// Payload framing, `None` uses the panel revision's default
    pub transfer: Option<TransferMode>,
    /// After this many partial refreshes in a row the next draw does a full refresh
    pub full_refresh_every: Option<u32>,
}

impl Default for EpdConfig {
    fn default() -> Self {
        EpdConfig {
            width: WIDTH,
            height: HEIGHT,
            busy_poll_ms: None,
            busy_timeout_ms: Some(BUSY_TIMEOUT_MS),
            transfer: None,
            full_refresh_every: None,
        }
    }
}

impl EpdConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_busy_poll_ms(mut self, poll_ms: u32) -> Self {
        self.busy_poll_ms = Some(poll_ms);
        self
    }

    pub fn with_busy_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    pub fn with_transfer(mut self, mode: TransferMode) -> Self {
        self.transfer = Some(mode);
        self
    }

    pub fn with_full_refresh_every(mut self, partial_refreshes: u32) -> Self {
        self.full_refresh_every = Some(partial_refreshes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_bounded_400x300_panel() {
        let config = EpdConfig::default();
        assert_eq!((config.width, config.height), (400, 300));
        assert_eq!(config.busy_timeout_ms, Some(BUSY_TIMEOUT_MS));
        assert_eq!(config.transfer, None);
        assert_eq!(config.full_refresh_every, None);
    }

    #[test]
    fn setters_chain() {
        let config = EpdConfig::default()
            .with_size(200, 100)
            .with_busy_poll_ms(5)
            .with_busy_timeout_ms(None)
            .with_transfer(TransferMode::Chunked(32))
            .with_full_refresh_every(10);
        assert_eq!((config.width, config.height), (200, 100));
        assert_eq!(config.busy_poll_ms, Some(5));
        assert_eq!(config.busy_timeout_ms, None);
        assert_eq!(config.transfer, Some(TransferMode::Chunked(32)));
        assert_eq!(config.full_refresh_every, Some(10));
    }
}
