//! Driver for the RS-485 register protocol of a six-actuator dexterous hand.

pub mod codec;
mod config;
mod constants;
mod controller;
mod error;
pub mod response;
mod transport;
mod types;

pub use codec::{
    build_read_frame, build_read_frame_with_len, build_write_bytes_frame, build_write_frame,
    checksum, Frame,
};
pub use config::SerialConfig;
pub use controller::{Controller, SharedController};
pub use error::{HandError, HandResult};
pub use response::{parse_bytes, parse_values};
pub use transport::{SerialTransport, Transport, TransportError};
pub use types::{address_of, lookup, CellWidth, Register};

// Re-export commonly used items
pub use constants::{
    BYTES_RESPONSE_LEN, CMD_READ_REGISTER, CMD_WRITE_REGISTER, DEFAULT_BAUD_RATE, DEFAULT_DEVICE_ID,
    DEFAULT_PORT, DEFAULT_TIMEOUT_MS, MAX_VALID_VALUE, MAX_VALUES, READ_BYTES_LEN, READ_DATA_LENGTH,
    READ_WORDS_LEN, UNCHANGED, WORDS_RESPONSE_LEN, WRITE_ACK_LEN,
};
