//! Request frame encoding.
//!
//! Every request has the same shape:
//! - Bytes 0-1: sync header `EB 90`
//! - Byte 2: device id
//! - Byte 3: data length (command + address + payload)
//! - Byte 4: command (`0x11` read, `0x12` write)
//! - Bytes 5-6: register address, little-endian
//! - Bytes 7..: payload
//! - Last byte: 8-bit sum of bytes 2 through the end of the payload
//!
//! Everything here is pure; nothing touches a transport.

use crate::constants::*;
use crate::error::{HandError, HandResult};
use std::fmt;

/// Truncated additive checksum over `bytes`.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// A finished request frame, checksum included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn device_id(&self) -> u8 {
        self.0[2]
    }

    pub fn command(&self) -> u8 {
        self.0[4]
    }

    pub fn address(&self) -> u16 {
        u16::from_le_bytes([self.0[5], self.0[6]])
    }

    pub fn payload(&self) -> &[u8] {
        &self.0[HEADER_LEN..self.0.len() - 1]
    }

    pub fn checksum(&self) -> u8 {
        self.0[self.0.len() - 1]
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for byte in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
            first = false;
        }
        Ok(())
    }
}

/// Assembles a frame from its header fields and payload. The header and
/// checksum are only laid down by `finish`, so a builder never exposes a
/// half-written frame.
#[derive(Debug, Clone)]
pub(crate) struct FrameBuilder {
    device_id: u8,
    command: u8,
    address: u16,
    payload: Vec<u8>,
}

impl FrameBuilder {
    pub(crate) fn new(device_id: u8, command: u8, address: u16) -> Self {
        FrameBuilder {
            device_id,
            command,
            address,
            payload: Vec::new(),
        }
    }

    pub(crate) fn byte(mut self, byte: u8) -> Self {
        self.payload.push(byte);
        self
    }

    /// Appends the low 16 bits of `value`, little-endian.
    pub(crate) fn word(mut self, value: i32) -> Self {
        self.payload.push((value & 0xff) as u8);
        self.payload.push(((value >> 8) & 0xff) as u8);
        self
    }

    pub(crate) fn words(self, values: &[i32]) -> Self {
        values.iter().fold(self, |builder, &value| builder.word(value))
    }

    /// Appends the low 8 bits of each value.
    pub(crate) fn bytes(self, values: &[i32]) -> Self {
        values
            .iter()
            .fold(self, |builder, &value| builder.byte((value & 0xff) as u8))
    }

    pub(crate) fn finish(self) -> Frame {
        let [addr_lo, addr_hi] = self.address.to_le_bytes();
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.payload.len() + 1);
        bytes.extend_from_slice(&[
            SYNC_0,
            SYNC_1,
            self.device_id,
            (self.payload.len() + 3) as u8,
            self.command,
            addr_lo,
            addr_hi,
        ]);
        bytes.extend_from_slice(&self.payload);
        bytes.push(checksum(&bytes[CHECKSUM_START..]));
        Frame(bytes)
    }
}

/// Builds a write request for up to six consecutive register cells.
///
/// Values are truncated to their low 16 bits, so `UNCHANGED` (-1) goes out
/// as `FF FF`.
pub fn build_write_frame(device_id: u8, address: u16, values: &[i32]) -> HandResult<Frame> {
    check_value_count(values)?;
    Ok(FrameBuilder::new(device_id, CMD_WRITE_REGISTER, address)
        .words(values)
        .finish())
}

/// Builds a write request for up to six consecutive byte-wide cells, one
/// payload byte per value. Values are truncated to their low 8 bits.
pub fn build_write_bytes_frame(device_id: u8, address: u16, values: &[i32]) -> HandResult<Frame> {
    check_value_count(values)?;
    Ok(FrameBuilder::new(device_id, CMD_WRITE_REGISTER, address)
        .bytes(values)
        .finish())
}

fn check_value_count(values: &[i32]) -> HandResult<()> {
    if values.len() > MAX_VALUES {
        return Err(HandError::TooManyValues {
            count: values.len(),
            max: MAX_VALUES,
        });
    }
    Ok(())
}

/// Builds a read request for the six-word block at `address`.
pub fn build_read_frame(device_id: u8, address: u16) -> Frame {
    build_read_frame_with_len(device_id, address, READ_WORDS_LEN)
}

/// Builds a read request asking for `read_len` bytes starting at `address`.
pub fn build_read_frame_with_len(device_id: u8, address: u16, read_len: u8) -> Frame {
    FrameBuilder::new(device_id, CMD_READ_REGISTER, address)
        .byte(read_len)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn write_frame_matches_known_bytes() -> HandResult<()> {
        let frame = build_write_frame(1, 1522, &[1000; 6])?;
        let mut expected = vec![
            0xEB, 0x90, 0x01, 0x0F, 0x12, 0xF2, 0x05, 0xE8, 0x03, 0xE8, 0x03, 0xE8, 0x03, 0xE8,
            0x03, 0xE8, 0x03, 0xE8, 0x03,
        ];
        let sum: u32 = expected[2..].iter().map(|&b| u32::from(b)).sum();
        expected.push((sum & 0xff) as u8);
        assert_eq!(frame.as_bytes(), expected.as_slice());
        assert_eq!(frame.checksum(), 0x9B);
        Ok(())
    }

    #[test]
    fn read_frame_matches_known_bytes() {
        let frame = build_read_frame(1, 1546);
        assert_eq!(
            frame.as_bytes(),
            &[0xEB, 0x90, 0x01, 0x04, 0x11, 0x0A, 0x06, 0x0C, 0x32]
        );
        assert_eq!(frame.device_id(), 1);
        assert_eq!(frame.command(), CMD_READ_REGISTER);
        assert_eq!(frame.address(), 1546);
        assert_eq!(frame.payload(), &[READ_WORDS_LEN]);
    }

    #[test]
    fn seven_values_are_rejected() {
        let result = build_write_frame(1, 1486, &[0; 7]);
        assert!(matches!(
            result,
            Err(HandError::TooManyValues { count: 7, max: 6 })
        ));
    }

    #[test]
    fn empty_write_is_header_and_checksum() -> HandResult<()> {
        let frame = build_write_frame(2, 2322, &[])?;
        assert_eq!(frame.len(), 8);
        assert_eq!(frame.as_bytes()[3], 3);
        assert!(frame.payload().is_empty());
        Ok(())
    }

    #[test]
    fn values_are_truncated_to_sixteen_bits() -> HandResult<()> {
        let frame = build_write_frame(1, 1486, &[UNCHANGED, 0x1_2345, 70000])?;
        assert_eq!(frame.payload(), &[0xFF, 0xFF, 0x45, 0x23, 0x70, 0x11]);
        Ok(())
    }

    #[test]
    fn byte_write_carries_one_byte_per_value() -> HandResult<()> {
        let frame = build_write_bytes_frame(1, 2320, &[3])?;
        assert_eq!(
            frame.as_bytes(),
            &[0xEB, 0x90, 0x01, 0x04, 0x12, 0x10, 0x09, 0x03, 0x33]
        );

        let frame = build_write_bytes_frame(1, 1000, &[UNCHANGED, 0x1FE])?;
        assert_eq!(frame.as_bytes()[3], 5);
        assert_eq!(frame.payload(), &[0xFF, 0xFE]);
        Ok(())
    }

    #[test]
    fn byte_write_rejects_seven_values() {
        let result = build_write_bytes_frame(1, 2320, &[0; 7]);
        assert!(matches!(
            result,
            Err(HandError::TooManyValues { count: 7, max: 6 })
        ));
    }

    #[test]
    fn display_is_spaced_hex() {
        let frame = build_read_frame(1, 1546);
        assert_eq!(frame.to_string(), "EB 90 01 04 11 0A 06 0C 32");
    }

    #[test]
    fn checksum_wraps() {
        assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
        assert_eq!(checksum(&[]), 0);
    }

    proptest! {
        #[test]
        fn prop_write_frame_layout(
            device_id in any::<u8>(),
            address in any::<u16>(),
            values in prop::collection::vec(any::<i32>(), 0..=MAX_VALUES),
        ) {
            let frame = build_write_frame(device_id, address, &values)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let bytes = frame.as_bytes();
            prop_assert_eq!(bytes.len(), 8 + 2 * values.len());
            prop_assert_eq!(bytes[3] as usize, 2 * values.len() + 3);
            prop_assert_eq!(bytes[4], CMD_WRITE_REGISTER);
            prop_assert_eq!(frame.address(), address);
            prop_assert_eq!(frame.checksum(), checksum(&bytes[2..bytes.len() - 1]));
        }

        #[test]
        fn prop_write_frame_rejects_excess(
            values in prop::collection::vec(any::<i32>(), (MAX_VALUES + 1)..32),
        ) {
            let rejected = matches!(
                build_write_frame(1, 1486, &values),
                Err(HandError::TooManyValues { .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn prop_byte_write_frame_layout(
            values in prop::collection::vec(any::<i32>(), 0..=MAX_VALUES),
        ) {
            let frame = build_write_bytes_frame(1, 2322, &values)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let bytes = frame.as_bytes();
            prop_assert_eq!(bytes.len(), 8 + values.len());
            prop_assert_eq!(bytes[3] as usize, values.len() + 3);
            prop_assert_eq!(frame.checksum(), checksum(&bytes[2..bytes.len() - 1]));
        }

        #[test]
        fn prop_read_frame_layout(device_id in any::<u8>(), address in any::<u16>()) {
            let frame = build_read_frame(device_id, address);
            let bytes = frame.as_bytes();
            prop_assert_eq!(bytes.len(), 9);
            prop_assert_eq!(bytes[3], READ_DATA_LENGTH);
            prop_assert_eq!(bytes[7], READ_WORDS_LEN);
            prop_assert_eq!(frame.checksum(), checksum(&bytes[2..8]));
        }
    }
}
