//! Response decoding.
//!
//! Register data in a reply starts at byte 7, right after the echoed header.
//! Short replies are not an error: decoding simply stops at the last complete
//! cell, so callers that need all six actuators must check the length.

use crate::constants::{HEADER_LEN, MAX_VALID_VALUE, MAX_VALUES, READ_BYTES_LEN};

/// Decodes up to six little-endian words from a register read reply.
///
/// Words above `MAX_VALID_VALUE` are outside anything the actuators report
/// and come back as 0.
pub fn parse_values(raw: &[u8]) -> Vec<u16> {
    (0..MAX_VALUES)
        .map(|i| HEADER_LEN + 2 * i)
        .take_while(|&j| j + 1 < raw.len())
        .map(|j| sanitize(u16::from_le_bytes([raw[j], raw[j + 1]])))
        .collect()
}

/// Returns the per-actuator bytes of a byte-wide register read reply.
pub fn parse_bytes(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .skip(HEADER_LEN)
        .take(READ_BYTES_LEN as usize)
        .copied()
        .collect()
}

fn sanitize(value: u16) -> u16 {
    if value > MAX_VALID_VALUE {
        0
    } else {
        value
    }
}
