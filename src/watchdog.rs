//! Hardware watchdog of the RTD HAT.
//!
//! Once reloaded the watchdog must be reloaded again within its period,
//! otherwise the board cuts the Raspberry Pi's power for the off period and
//! then restores it. After power-up the boot-init period applies instead of
//! the regular one, giving the host time to boot.
//!
//! Period setters write the `*_SET` register; the firmware reports the active
//! value through the matching `*_GET` register.

use crate::board::Board;
use crate::bus::RegisterBus;
use crate::error::Result;
use crate::protocol::{self as proto, IntoChecked};
use log::*;

impl<B: RegisterBus> Board<B> {
    /// Reloads the watchdog, enabling it if it was disabled.
    pub fn reload_watchdog(&mut self) -> Result<()> {
        debug!("Board {}: reloading watchdog", self.stack());
        self.write_block(proto::WDT_RELOAD.address, &[proto::WDT_RELOAD_SIGNATURE])
    }

    pub fn watchdog_period(&mut self) -> Result<proto::WatchdogPeriod> {
        let bytes = self.read_block::<2>(proto::WDT_PERIOD_GET.address)?;
        Ok(proto::WatchdogPeriod::decode(&bytes)?)
    }

    pub fn set_watchdog_period(
        &mut self,
        period: impl IntoChecked<proto::WatchdogPeriod>,
    ) -> Result<()> {
        let period = period.into_checked()?;
        self.write_block(proto::WDT_PERIOD_SET.address, &period.encode())
    }

    pub fn watchdog_init_period(&mut self) -> Result<proto::WatchdogPeriod> {
        let bytes = self.read_block::<2>(proto::WDT_INIT_PERIOD_GET.address)?;
        Ok(proto::WatchdogPeriod::decode(&bytes)?)
    }

    pub fn set_watchdog_init_period(
        &mut self,
        period: impl IntoChecked<proto::WatchdogPeriod>,
    ) -> Result<()> {
        let period = period.into_checked()?;
        self.write_block(proto::WDT_INIT_PERIOD_SET.address, &period.encode())
    }

    pub fn watchdog_off_period(&mut self) -> Result<proto::WatchdogOffPeriod> {
        let bytes = self.read_block::<4>(proto::WDT_OFF_PERIOD_GET.address)?;
        Ok(proto::WatchdogOffPeriod::decode(&bytes)?)
    }

    /// Sets how long the host stays powered off after a watchdog expiry.
    pub fn set_watchdog_off_period(
        &mut self,
        period: impl IntoChecked<proto::WatchdogOffPeriod>,
    ) -> Result<()> {
        let period = period.into_checked()?;
        self.write_block(proto::WDT_OFF_PERIOD_SET.address, &period.encode())
    }

    /// Number of power cycles the watchdog has forced.
    pub fn watchdog_reset_count(&mut self) -> Result<u16> {
        let bytes = self.read_block::<2>(proto::WDT_RESET_COUNT.address)?;
        Ok(proto::decode_u16(&bytes)?)
    }

    pub fn clear_watchdog_reset_count(&mut self) -> Result<()> {
        self.write_block(
            proto::WDT_CLEAR_RESET_COUNT.address,
            &[proto::WDT_CLEAR_RESET_COUNT_SIGNATURE],
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::error::Error;
    use crate::mock::{MockTransport, Transaction};
    use crate::protocol as proto;
    use assert_matches::assert_matches;

    #[test]
    fn reload_writes_signature() {
        let mut transport = MockTransport::new().with_board(1);
        let mut board = Board::open(&mut transport, 1u8).unwrap();
        board.reload_watchdog().unwrap();
        assert_eq!(
            transport.writes(),
            vec![Transaction::Write {
                address: 0x41,
                register: 35,
                data: vec![0xCA]
            }]
        );
    }

    #[test]
    fn periods_round_trip() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = Board::open(&mut transport, 0u8).unwrap();
        board.set_watchdog_period(120u16).unwrap();
        board.set_watchdog_init_period(300u16).unwrap();
        assert_eq!(*board.watchdog_period().unwrap(), 120);
        assert_eq!(*board.watchdog_init_period().unwrap(), 300);
        assert_eq!(transport.register(0, 36, 2), vec![120, 0]);
        assert_eq!(transport.register(0, 40, 2), vec![0x2C, 0x01]);
    }

    #[test]
    fn zero_period_is_rejected_before_write() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = Board::open(&mut transport, 0u8).unwrap();
        transport.clear_transactions();
        assert_matches!(
            board.set_watchdog_period(0u16),
            Err(Error::Protocol(proto::Error::PeriodOutOfRange(0)))
        );
        assert_matches!(
            board.set_watchdog_init_period(0u16),
            Err(Error::Protocol(proto::Error::PeriodOutOfRange(0)))
        );
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn off_period_bounds_and_round_trip() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = Board::open(&mut transport, 0u8).unwrap();
        transport.clear_transactions();
        for value in [0u32, proto::WatchdogOffPeriod::MAX + 1, u32::MAX] {
            assert_matches!(
                board.set_watchdog_off_period(value),
                Err(Error::Protocol(proto::Error::OffPeriodOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());

        for value in [1u32, 3600, proto::WatchdogOffPeriod::MAX] {
            board.set_watchdog_off_period(value).unwrap();
            assert_eq!(*board.watchdog_off_period().unwrap(), value);
        }
    }

    #[test]
    fn reset_count_read_and_clear() {
        let mut transport = MockTransport::new().with_board(0);
        transport.set_register(0, 44, &[3, 0]);
        let mut board = Board::open(&mut transport, 0u8).unwrap();
        assert_eq!(board.watchdog_reset_count().unwrap(), 3);
        board.clear_watchdog_reset_count().unwrap();
        assert_eq!(board.watchdog_reset_count().unwrap(), 0);
        assert_eq!(transport.register(0, 46, 1), vec![0xBE]);
    }
}
