//! Linux I2C transport through `/dev/i2c-N`.

use crate::bus::{BusError, RegisterBus, Transport};
use log::*;
use rppal::i2c::I2c;

/// The host's I2C bus with the given number.
#[derive(Debug, Clone, Copy)]
pub struct LinuxI2c {
    bus: u8,
}

impl LinuxI2c {
    pub fn new(bus: u8) -> Self {
        Self { bus }
    }
}

impl Default for LinuxI2c {
    /// Bus 1, the one routed to the Raspberry Pi header.
    fn default() -> Self {
        Self::new(1)
    }
}

impl Transport for LinuxI2c {
    fn open(&mut self, address: u8) -> Result<Box<dyn RegisterBus>, BusError> {
        let open_error = |err: rppal::i2c::Error| BusError::Open {
            address,
            reason: err.to_string(),
        };
        trace!("Opening /dev/i2c-{} for address {address:#04x}", self.bus);
        let mut i2c = I2c::with_bus(self.bus).map_err(open_error)?;
        i2c.set_slave_address(address as u16).map_err(open_error)?;
        Ok(Box::new(I2cDevice { i2c }))
    }
}

/// Session to one slave address. The handle is closed on drop.
pub struct I2cDevice {
    i2c: I2c,
}

impl RegisterBus for I2cDevice {
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let len = buf.len();
        self.i2c
            .write_read(&[register], buf)
            .map_err(|err| BusError::Read {
                register,
                len,
                reason: err.to_string(),
            })
    }

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(register);
        frame.extend_from_slice(data);
        let failure = |reason: String| BusError::Write {
            register,
            len: data.len(),
            reason,
        };
        let written = self
            .i2c
            .write(&frame)
            .map_err(|err| failure(err.to_string()))?;
        if written != frame.len() {
            return Err(failure(format!(
                "short write, {written} of {} bytes",
                frame.len()
            )));
        }
        Ok(())
    }
}
