use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT_MS};
use std::time::Duration;

/// Serial link settings. Framing is fixed at 8N1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    /// Applied to every blocking read.
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        SerialConfig {
            port: port.into(),
            baud_rate,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}
