// Frame header
pub const SYNC_0: u8 = 0xEB;
pub const SYNC_1: u8 = 0x90;

// Command constants
pub const CMD_READ_REGISTER: u8 = 0x11;
pub const CMD_WRITE_REGISTER: u8 = 0x12;

// Frame layout
pub const HEADER_LEN: usize = 7;
pub const CHECKSUM_START: usize = 2;
pub const READ_DATA_LENGTH: u8 = 0x04;
pub const READ_WORDS_LEN: u8 = 0x0C;
pub const READ_BYTES_LEN: u8 = 0x06;

// Register values
pub const MAX_VALUES: usize = 6;
pub const MAX_VALID_VALUE: u16 = 6000;
pub const UNCHANGED: i32 = -1;

// Response sizes
pub const WRITE_ACK_LEN: usize = 9;
pub const WORDS_RESPONSE_LEN: usize = 20;
pub const BYTES_RESPONSE_LEN: usize = HEADER_LEN + READ_BYTES_LEN as usize + 1;

// Link defaults
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_DEVICE_ID: u8 = 0x01;
