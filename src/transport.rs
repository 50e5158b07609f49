use crate::config::SerialConfig;
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read: expected {expected} bytes but got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

/// A byte link to the hand. Reads block until exactly `len` bytes arrive or
/// the link fails; any timeout is the implementation's business.
pub trait Transport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    fn read(&mut self, len: usize) -> Result<Vec<u8>, TransportError>;
}

/// RS-485 link through a serial adapter, 8N1.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(config: &SerialConfig) -> Result<Self, TransportError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(config.timeout)
            .open()?;
        info!("Opened serial port {} at {} baud", config.port, config.baud_rate);
        Ok(SerialTransport { port })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::TimedOut && filled > 0 => break,
                Err(e) => return Err(e.into()),
            }
        }

        if filled < len {
            return Err(TransportError::ShortRead {
                expected: len,
                actual: filled,
            });
        }
        Ok(buf)
    }
}
