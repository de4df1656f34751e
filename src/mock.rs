//! In-memory stand-in for the I2C bus.
//!
//! Each board is a plain register file. Every call that reaches the
//! transport is recorded, so tests can assert both on the resulting register
//! contents and on the exact transactions that produced them.

use crate::bus::{BusError, RegisterBus, Transport};
use crate::protocol as proto;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const REGISTER_FILE_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Open { address: u8 },
    Read { address: u8, register: u8, len: usize },
    Write { address: u8, register: u8, data: Vec<u8> },
}

#[derive(Debug)]
struct MockBoard {
    registers: Vec<u8>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockBoard {
    fn new() -> Self {
        let mut registers = vec![0u8; REGISTER_FILE_SIZE];
        registers[proto::FIRMWARE_REVISION_MAJOR.address as usize] = 1;
        registers[proto::FIRMWARE_REVISION_MINOR.address as usize] = 2;
        registers[proto::HARDWARE_REVISION_MAJOR.address as usize] = 1;
        Self {
            registers,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Mimics the firmware side effects of a register write.
    fn apply_write(&mut self, register: u8, data: &[u8]) {
        let start = register as usize;
        self.registers[start..start + data.len()].copy_from_slice(data);

        let mirror = match register {
            r if r == proto::WDT_PERIOD_SET.address => Some(proto::WDT_PERIOD_GET),
            r if r == proto::WDT_INIT_PERIOD_SET.address => Some(proto::WDT_INIT_PERIOD_GET),
            r if r == proto::WDT_OFF_PERIOD_SET.address => Some(proto::WDT_OFF_PERIOD_GET),
            _ => None,
        };
        if let Some(get) = mirror {
            let at = get.address as usize;
            self.registers[at..at + data.len()].copy_from_slice(data);
        }
        if register == proto::WDT_CLEAR_RESET_COUNT.address
            && data.first() == Some(&proto::WDT_CLEAR_RESET_COUNT_SIGNATURE)
        {
            let at = proto::WDT_RESET_COUNT.address as usize;
            self.registers[at..at + 2].fill(0);
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    boards: BTreeMap<u8, MockBoard>,
    log: Vec<Transaction>,
}

/// A bus with zero or more simulated boards attached.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

fn bus_address(stack: u8) -> u8 {
    proto::BASE_ADDRESS + stack
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_board_mut<R>(&self, stack: u8, f: impl FnOnce(&mut MockBoard) -> R) -> Option<R> {
        self.lock().boards.get_mut(&bus_address(stack)).map(f)
    }

    /// Attaches a board answering at `stack`, reporting firmware 1.02.
    pub fn with_board(self, stack: u8) -> Self {
        self.lock().boards.insert(bus_address(stack), MockBoard::new());
        self
    }

    pub fn set_register(&self, stack: u8, register: u8, bytes: &[u8]) {
        self.with_board_mut(stack, |board| {
            let start = register as usize;
            board.registers[start..start + bytes.len()].copy_from_slice(bytes);
        });
    }

    pub fn register(&self, stack: u8, register: u8, len: usize) -> Vec<u8> {
        self.with_board_mut(stack, |board| {
            let start = register as usize;
            board.registers[start..start + len].to_vec()
        })
        .unwrap_or_default()
    }

    /// Makes every following read on `stack` fail, as a NACK would.
    pub fn fail_reads(&self, stack: u8, fail: bool) {
        self.with_board_mut(stack, |board| board.fail_reads = fail);
    }

    pub fn fail_writes(&self, stack: u8, fail: bool) {
        self.with_board_mut(stack, |board| board.fail_writes = fail);
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().log.clone()
    }

    pub fn writes(&self) -> Vec<Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| matches!(t, Transaction::Write { .. }))
            .collect()
    }

    pub fn clear_transactions(&self) {
        self.lock().log.clear();
    }
}

impl Transport for MockTransport {
    fn open(&mut self, address: u8) -> Result<Box<dyn RegisterBus>, BusError> {
        self.lock().log.push(Transaction::Open { address });
        Ok(Box::new(MockDevice {
            address,
            inner: self.inner.clone(),
        }))
    }
}

/// Session to one address of a [`MockTransport`].
#[derive(Debug)]
pub struct MockDevice {
    address: u8,
    inner: Arc<Mutex<Inner>>,
}

impl RegisterBus for MockDevice {
    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.log.push(Transaction::Read {
            address: self.address,
            register,
            len: buf.len(),
        });
        let len = buf.len();
        let failure = |reason: &str| BusError::Read {
            register,
            len,
            reason: reason.to_string(),
        };
        let board = match inner.boards.get(&self.address) {
            Some(board) if !board.fail_reads => board,
            Some(_) => return Err(failure("injected failure")),
            None => return Err(failure("no acknowledge")),
        };
        let start = register as usize;
        let end = start + len;
        if end > REGISTER_FILE_SIZE {
            return Err(failure("register out of range"));
        }
        buf.copy_from_slice(&board.registers[start..end]);
        Ok(())
    }

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.log.push(Transaction::Write {
            address: self.address,
            register,
            data: data.to_vec(),
        });
        let failure = |reason: &str| BusError::Write {
            register,
            len: data.len(),
            reason: reason.to_string(),
        };
        let board = match inner.boards.get_mut(&self.address) {
            Some(board) if !board.fail_writes => board,
            Some(_) => return Err(failure("injected failure")),
            None => return Err(failure("no acknowledge")),
        };
        if register as usize + data.len() > REGISTER_FILE_SIZE {
            return Err(failure("register out of range"));
        }
        board.apply_write(register, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_board_does_not_acknowledge() {
        let mut transport = MockTransport::new().with_board(0);
        let mut device = transport.open(bus_address(3)).unwrap();
        let mut buf = [0u8; 1];
        assert!(device.read_register(57, &mut buf).is_err());
        assert!(device.write_register(57, &[1]).is_err());
    }

    #[test]
    fn records_transactions() {
        let mut transport = MockTransport::new().with_board(2);
        let mut device = transport.open(0x42).unwrap();
        device.write_register(10, &[1, 2]).unwrap();
        let mut buf = [0u8; 2];
        device.read_register(10, &mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert_eq!(
            transport.transactions(),
            vec![
                Transaction::Open { address: 0x42 },
                Transaction::Write {
                    address: 0x42,
                    register: 10,
                    data: vec![1, 2]
                },
                Transaction::Read {
                    address: 0x42,
                    register: 10,
                    len: 2
                },
            ]
        );
    }
}
