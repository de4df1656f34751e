//! Transport contract between the register layer and the physical bus.
//!
//! A [`Transport`] opens a session to one bus address; the resulting
//! [`RegisterBus`] reads and writes blocks of the device's register file.
//! Both calls are blocking and treated as atomic. No retries happen here or
//! in the layers above.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("Cannot open bus address {address:#04x}: {reason}")]
    Open { address: u8, reason: String },
    #[error("Read of {len} byte(s) at register {register} failed: {reason}")]
    Read {
        register: u8,
        len: usize,
        reason: String,
    },
    #[error("Write of {len} byte(s) at register {register} failed: {reason}")]
    Write {
        register: u8,
        len: usize,
        reason: String,
    },
}

/// Register level access to a single device.
pub trait RegisterBus {
    /// Fills `buf` with the bytes starting at `register`.
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Writes `data` starting at `register`.
    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), BusError>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for Box<B> {
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        (**self).read_register(register, buf)
    }

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
        (**self).write_register(register, data)
    }
}

/// Opens device sessions on a shared bus.
///
/// Serializing access to the physical bus between processes is the
/// transport's business.
pub trait Transport {
    fn open(&mut self, address: u8) -> Result<Box<dyn RegisterBus>, BusError>;
}
