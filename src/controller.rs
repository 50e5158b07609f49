use crate::{
    codec::{
        build_read_frame, build_read_frame_with_len, build_write_bytes_frame, build_write_frame,
        Frame,
    },
    config::SerialConfig,
    constants::*,
    error::HandResult,
    response::{parse_bytes, parse_values},
    transport::{SerialTransport, Transport},
    types::{lookup, CellWidth, Register},
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Issues register reads and writes to a hand over one transport.
///
/// Every operation is a single blocking request/reply exchange; nothing is
/// kept between calls.
pub struct Controller<T: Transport> {
    transport: T,
}

impl Controller<SerialTransport> {
    pub fn open(config: &SerialConfig) -> HandResult<Self> {
        Ok(Controller::new(SerialTransport::open(config)?))
    }
}

impl<T: Transport> Controller<T> {
    pub fn new(transport: T) -> Self {
        Controller { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Writes `values` to consecutive cells of the named register.
    pub fn write_register(&mut self, device_id: u8, name: &str, values: &[i32]) -> HandResult<()> {
        self.write(device_id, lookup(name)?, values)
    }

    /// Writes `values` to consecutive cells of `register`, one word or one
    /// byte per value depending on the register's cell width.
    ///
    /// The device answers every write with a short acknowledgment. It is read
    /// and thrown away; if that read fails the write still counts as issued.
    pub fn write(&mut self, device_id: u8, register: Register, values: &[i32]) -> HandResult<()> {
        let frame = match register.width() {
            CellWidth::Word => build_write_frame(device_id, register.address(), values)?,
            CellWidth::Byte => build_write_bytes_frame(device_id, register.address(), values)?,
        };
        self.send(register, &frame)?;

        match self.transport.read(WRITE_ACK_LEN) {
            Ok(ack) => debug!("Discarded {} byte write acknowledgment", ack.len()),
            Err(e) => warn!("Failed to read write acknowledgment for {}: {}", register, e),
        }
        Ok(())
    }

    /// Reads the six-word block of the named register, waiting for exactly
    /// `response_len` reply bytes.
    pub fn read_register(
        &mut self,
        device_id: u8,
        name: &str,
        response_len: usize,
    ) -> HandResult<Vec<u16>> {
        self.read(device_id, lookup(name)?, response_len)
    }

    pub fn read(
        &mut self,
        device_id: u8,
        register: Register,
        response_len: usize,
    ) -> HandResult<Vec<u16>> {
        let frame = build_read_frame(device_id, register.address());
        self.send(register, &frame)?;

        let raw = self.receive(response_len)?;
        let values = parse_values(&raw);
        info!("{} values: {:?}", register, values);
        Ok(values)
    }

    /// Reads a byte-wide register block such as `temp` or `errCode`.
    pub fn read_bytes(&mut self, device_id: u8, name: &str) -> HandResult<Vec<u8>> {
        let register = lookup(name)?;
        let frame = build_read_frame_with_len(device_id, register.address(), READ_BYTES_LEN);
        self.send(register, &frame)?;

        let raw = self.receive(BYTES_RESPONSE_LEN)?;
        let cells = parse_bytes(&raw);
        info!("{} values: {:?}", register, cells);
        Ok(cells)
    }

    fn send(&mut self, register: Register, frame: &Frame) -> HandResult<()> {
        debug!("Sending {} frame: {}", register, frame);
        self.transport.write(frame.as_bytes())?;
        Ok(())
    }

    fn receive(&mut self, len: usize) -> HandResult<Vec<u8>> {
        let raw = self.transport.read(len)?;
        debug!("Received: {:02X?}", raw);
        Ok(raw)
    }
}

/// Cloneable handle that serializes whole exchanges on one controller, so
/// frames from different callers never interleave on the bus.
pub struct SharedController<T: Transport> {
    inner: Arc<Mutex<Controller<T>>>,
}

impl<T: Transport> Clone for SharedController<T> {
    fn clone(&self) -> Self {
        SharedController {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> SharedController<T> {
    pub fn new(controller: Controller<T>) -> Self {
        SharedController {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Runs `f` with exclusive use of the link.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<T>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    pub fn write_register(&self, device_id: u8, name: &str, values: &[i32]) -> HandResult<()> {
        self.with(|c| c.write_register(device_id, name, values))
    }

    pub fn read_register(
        &self,
        device_id: u8,
        name: &str,
        response_len: usize,
    ) -> HandResult<Vec<u16>> {
        self.with(|c| c.read_register(device_id, name, response_len))
    }

    pub fn read_bytes(&self, device_id: u8, name: &str) -> HandResult<Vec<u8>> {
        self.with(|c| c.read_bytes(device_id, name))
    }
}

impl<T: Transport> From<Controller<T>> for SharedController<T> {
    fn from(controller: Controller<T>) -> Self {
        SharedController::new(controller)
    }
}
