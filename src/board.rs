//! Connection to one RTD HAT and its typed register accessors.
//!
//! ```no_run
//! use rtd_lib::{board::Board, i2c::LinuxI2c};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut transport = LinuxI2c::new(1);
//!     let mut board = Board::open(&mut transport, 0u8)?;
//!     println!("Channel 1: {} °C", board.temperature(1u8)?);
//!     Ok(())
//! }
//! ```
//!
//! Every accessor validates its arguments before touching the bus, so a
//! rejected call leaves the board untouched. Packed registers (LED modes,
//! sensor types) are updated with a single read-modify-write that keeps the
//! bits of the sibling channels or groups.

use crate::bus::{RegisterBus, Transport};
use crate::error::{Error, Result};
use crate::polynomial;
use crate::protocol::{self as proto, IntoChecked};
use log::*;
use std::fmt;

/// An opened board whose presence has been confirmed.
pub struct Board<B> {
    bus: B,
    stack: proto::StackId,
}

impl<B> fmt::Debug for Board<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board").field("stack", &self.stack).finish()
    }
}

impl Board<Box<dyn RegisterBus>> {
    /// Opens the board at `stack` and checks that it answers.
    ///
    /// # Errors
    ///
    /// * [`Error::Protocol`] if the stack level is out of range; the bus is not touched.
    /// * [`Error::Bus`] if the transport cannot open the address.
    /// * [`Error::DeviceNotDetected`] if the firmware revision read fails.
    pub fn open<T>(transport: &mut T, stack: impl IntoChecked<proto::StackId>) -> Result<Self>
    where
        T: Transport + ?Sized,
    {
        let stack = stack.into_checked()?;
        debug!("Opening RTD board {stack} at address {:#04x}", stack.address());
        let bus = transport.open(stack.address())?;
        Self::detect(bus, stack)
    }
}

impl<B: RegisterBus> Board<B> {
    /// Wraps an already opened bus session, checking once that the board answers.
    ///
    /// A single failed presence check is final, there is no retry.
    pub fn detect(bus: B, stack: proto::StackId) -> Result<Self> {
        let mut board = Self { bus, stack };
        let mut revision = [0u8; 1];
        if let Err(source) = board
            .bus
            .read_register(proto::FIRMWARE_REVISION_MAJOR.address, &mut revision)
        {
            debug!("RTD board {stack} not detected: {source}");
            return Err(Error::DeviceNotDetected { stack, source });
        }
        Ok(board)
    }

    pub fn stack(&self) -> proto::StackId {
        self.stack
    }

    pub(crate) fn read_block<const N: usize>(&mut self, register: u8) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.bus.read_register(register, &mut buf)?;
        trace!("Board {}: read {register} -> {buf:02x?}", self.stack);
        Ok(buf)
    }

    pub(crate) fn write_block(&mut self, register: u8, data: &[u8]) -> Result<()> {
        trace!("Board {}: write {register} <- {data:02x?}", self.stack);
        self.bus.write_register(register, data)?;
        Ok(())
    }

    /// Reads the whole register, lets `update` change its bytes and writes it back.
    ///
    /// A failed read returns before anything is written.
    fn modify_block<const N: usize>(
        &mut self,
        register: u8,
        update: impl FnOnce([u8; N]) -> [u8; N],
    ) -> Result<()> {
        let current = self.read_block::<N>(register)?;
        let updated = update(current);
        debug!(
            "Board {}: register {register} {current:02x?} -> {updated:02x?}",
            self.stack
        );
        self.write_block(register, &updated)
    }

    /// Temperature of `channel` in °C, as converted by the board.
    pub fn temperature(&mut self, channel: impl IntoChecked<proto::Channel>) -> Result<f32> {
        let channel = channel.into_checked()?;
        let bytes = self.read_block::<4>(proto::TEMPERATURE.channel_address(channel))?;
        Ok(proto::decode_f32(&bytes)?)
    }

    /// Resistance of the RTD on `channel` in Ohm.
    pub fn resistance(&mut self, channel: impl IntoChecked<proto::Channel>) -> Result<f32> {
        let channel = channel.into_checked()?;
        let bytes = self.read_block::<4>(proto::RESISTANCE.channel_address(channel))?;
        Ok(proto::decode_f32(&bytes)?)
    }

    /// Temperature of `channel` in °C, computed locally from its resistance
    /// with the 5th order fit of [`polynomial::resistance_to_temperature`].
    pub fn temperature_poly5(&mut self, channel: impl IntoChecked<proto::Channel>) -> Result<f32> {
        let resistance = self.resistance(channel)?;
        Ok(polynomial::resistance_to_temperature(resistance))
    }

    pub fn firmware_revision(&mut self) -> Result<proto::Revision> {
        let bytes = self.read_block::<2>(proto::FIRMWARE_REVISION_MAJOR.address)?;
        Ok(proto::Revision::decode(&bytes)?)
    }

    pub fn hardware_revision(&mut self) -> Result<proto::Revision> {
        let bytes = self.read_block::<2>(proto::HARDWARE_REVISION_MAJOR.address)?;
        Ok(proto::Revision::decode(&bytes)?)
    }

    /// CPU temperature and supply voltage of the board.
    pub fn diagnostics(&mut self) -> Result<proto::Diagnostics> {
        let bytes = self.read_block::<3>(proto::CPU_TEMPERATURE.address)?;
        Ok(proto::Diagnostics::decode(&bytes)?)
    }

    pub fn led_mode(&mut self, channel: impl IntoChecked<proto::Channel>) -> Result<proto::LedMode> {
        let channel = channel.into_checked()?;
        let bytes = self.read_block::<2>(proto::LED_MODE.address)?;
        Ok(proto::LedMode::unpack(u16::from_le_bytes(bytes), channel)?)
    }

    /// Sets the LED mode of `channel`, keeping the modes of the other seven.
    pub fn set_led_mode(
        &mut self,
        channel: impl IntoChecked<proto::Channel>,
        mode: impl IntoChecked<proto::LedMode>,
    ) -> Result<()> {
        let channel = channel.into_checked()?;
        let mode = mode.into_checked()?;
        self.modify_block::<2>(proto::LED_MODE.address, |bytes| {
            mode.pack(u16::from_le_bytes(bytes), channel).to_le_bytes()
        })
    }

    pub fn led_threshold(
        &mut self,
        channel: impl IntoChecked<proto::Channel>,
    ) -> Result<proto::LedThreshold> {
        let channel = channel.into_checked()?;
        let bytes = self.read_block::<2>(proto::LED_THRESHOLD.channel_address(channel))?;
        Ok(proto::LedThreshold::decode(&bytes)?)
    }

    pub fn set_led_threshold(
        &mut self,
        channel: impl IntoChecked<proto::Channel>,
        threshold: impl IntoChecked<proto::LedThreshold>,
    ) -> Result<()> {
        let channel = channel.into_checked()?;
        let threshold = threshold.into_checked()?;
        self.write_block(
            proto::LED_THRESHOLD.channel_address(channel),
            &threshold.encode(),
        )
    }

    pub fn sensor_type(&mut self, group: impl IntoChecked<proto::Group>) -> Result<proto::SensorType> {
        let group = group.into_checked()?;
        let [packed] = self.read_block::<1>(proto::SENSOR_TYPE.address)?;
        Ok(proto::SensorType::unpack(packed, group))
    }

    /// Sets the sensor type of `group`, keeping the other group's setting.
    pub fn set_sensor_type(
        &mut self,
        group: impl IntoChecked<proto::Group>,
        sensor_type: impl IntoChecked<proto::SensorType>,
    ) -> Result<()> {
        let group = group.into_checked()?;
        let sensor_type = sensor_type.into_checked()?;
        self.modify_block::<1>(proto::SENSOR_TYPE.address, |[packed]| {
            [sensor_type.pack(packed, group)]
        })
    }

    pub fn sample_switch_count(&mut self) -> Result<proto::SampleSwitchCount> {
        let bytes = self.read_block::<2>(proto::SAMPLE_SWITCH_COUNT.address)?;
        Ok(proto::SampleSwitchCount::decode(&bytes)?)
    }

    pub fn set_sample_switch_count(
        &mut self,
        count: impl IntoChecked<proto::SampleSwitchCount>,
    ) -> Result<()> {
        let count = count.into_checked()?;
        self.write_block(proto::SAMPLE_SWITCH_COUNT.address, &count.encode())
    }

    /// Stores one calibration point for `channel`.
    ///
    /// `value` is the reference resistance in Ohm currently applied to the
    /// input. Two-point calibration is two calls with different resistances.
    /// The write is not read back.
    pub fn calibrate(
        &mut self,
        channel: impl IntoChecked<proto::Channel>,
        value: impl IntoChecked<proto::CalibrationValue>,
    ) -> Result<()> {
        let channel = channel.into_checked()?;
        let value = value.into_checked()?;
        debug!("Board {}: calibrating channel {channel} with {value:?}", self.stack);
        self.write_block(
            proto::CALIBRATION_VALUE.address,
            &value.encode_command(channel),
        )
    }

    /// Drops the calibration of `channel` only, restoring the factory fit.
    pub fn reset_calibration(&mut self, channel: impl IntoChecked<proto::Channel>) -> Result<()> {
        self.calibrate(channel, proto::CalibrationValue::Reset)
    }
}

/// Checks every stack level and returns the ones with a board attached.
pub fn scan<T: Transport + ?Sized>(transport: &mut T) -> Result<Vec<proto::StackId>> {
    let mut found = Vec::new();
    for stack in proto::StackId::all() {
        match Board::open(&mut *transport, stack) {
            Ok(_) => found.push(stack),
            Err(Error::DeviceNotDetected { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    info!("Found {} RTD board(s)", found.len());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTransport, Transaction};
    use assert_matches::assert_matches;

    fn open(transport: &mut MockTransport) -> Board<Box<dyn RegisterBus>> {
        let board = Board::open(&mut *transport, 0u8).unwrap();
        transport.clear_transactions();
        board
    }

    #[test]
    fn open_reads_firmware_revision() {
        let mut transport = MockTransport::new().with_board(3);
        let board = Board::open(&mut transport, 3u8).unwrap();
        assert_eq!(*board.stack(), 3);
        assert_eq!(
            transport.transactions(),
            vec![
                Transaction::Open { address: 0x43 },
                Transaction::Read {
                    address: 0x43,
                    register: 57,
                    len: 1
                }
            ]
        );
    }

    #[test]
    fn open_rejects_invalid_stack_without_bus_access() {
        let mut transport = MockTransport::new().with_board(0);
        assert_matches!(
            Board::open(&mut transport, 8u8),
            Err(Error::Protocol(proto::Error::StackOutOfRange(8)))
        );
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn open_reports_missing_board() {
        let mut transport = MockTransport::new().with_board(0);
        assert_matches!(
            Board::open(&mut transport, 1u8),
            Err(Error::DeviceNotDetected { stack, .. }) if *stack == 1
        );
    }

    #[test]
    fn reads_float_channels() {
        let mut transport = MockTransport::new().with_board(0);
        transport.set_register(0, 12, &21.5f32.to_le_bytes());
        transport.set_register(0, 59 + 12, &108.4f32.to_le_bytes());
        let mut board = open(&mut transport);
        assert_eq!(board.temperature(4u8).unwrap(), 21.5);
        assert_eq!(board.resistance(4u8).unwrap(), 108.4);
        let poly = board.temperature_poly5(4u8).unwrap();
        assert_eq!(poly, polynomial::resistance_to_temperature(108.4));
    }

    #[test]
    fn per_channel_accessors_reject_invalid_channel_without_bus_access() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        for channel in [0u8, 9, 255] {
            assert_matches!(
                board.temperature(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.resistance(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.temperature_poly5(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.led_mode(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.set_led_mode(channel, 1u8),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.led_threshold(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.set_led_threshold(channel, 10i16),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.calibrate(channel, 100.0f32),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
            assert_matches!(
                board.reset_calibration(channel),
                Err(Error::Protocol(proto::Error::ChannelOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn sensor_type_rejects_invalid_group_without_bus_access() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        for group in [0u8, 3] {
            assert_matches!(
                board.sensor_type(group),
                Err(Error::Protocol(proto::Error::GroupOutOfRange(_)))
            );
            assert_matches!(
                board.set_sensor_type(group, 1u8),
                Err(Error::Protocol(proto::Error::GroupOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn led_mode_round_trip_keeps_other_channels() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        let modes = [2u8, 1, 0, 2, 1, 0, 2, 1];
        for (channel, mode) in (1u8..=8).zip(modes) {
            board.set_led_mode(channel, mode).unwrap();
        }
        for mode in [0u8, 1, 2] {
            board.set_led_mode(5u8, mode).unwrap();
            assert_eq!(board.led_mode(5u8).unwrap() as u8, mode);
            for (channel, expected) in (1u8..=8).zip(modes).filter(|(c, _)| *c != 5) {
                assert_eq!(board.led_mode(channel).unwrap() as u8, expected);
            }
        }
    }

    #[test]
    fn set_led_mode_is_one_read_then_one_write() {
        let mut transport = MockTransport::new().with_board(0);
        transport.set_register(0, 97, &[0xFF, 0x3F]);
        let mut board = open(&mut transport);
        board.set_led_mode(2u8, proto::LedMode::Off).unwrap();
        assert_eq!(
            transport.transactions(),
            vec![
                Transaction::Read {
                    address: 0x40,
                    register: 97,
                    len: 2
                },
                Transaction::Write {
                    address: 0x40,
                    register: 97,
                    data: vec![0xF3, 0x3F]
                },
            ]
        );
    }

    #[test]
    fn failed_read_aborts_packed_write() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        transport.fail_reads(0, true);
        assert_matches!(board.set_led_mode(1u8, 2u8), Err(Error::Bus(_)));
        assert_matches!(board.set_sensor_type(1u8, 1u8), Err(Error::Bus(_)));
        assert!(transport.writes().is_empty());
    }

    #[test]
    fn led_mode_rejects_invalid_value_without_bus_access() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        assert_matches!(
            board.set_led_mode(1u8, 3u8),
            Err(Error::Protocol(proto::Error::LedModeOutOfRange(3)))
        );
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn led_threshold_range_and_round_trip() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        for value in [-201i16, 301, i16::MIN, i16::MAX] {
            assert_matches!(
                board.set_led_threshold(1u8, value),
                Err(Error::Protocol(proto::Error::LedThresholdOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());

        for value in [-200i16, -1, 0, 37, 300] {
            board.set_led_threshold(8u8, value).unwrap();
            assert_eq!(*board.led_threshold(8u8).unwrap(), value);
        }
        assert_eq!(transport.register(0, 113, 2), 300i16.to_le_bytes().to_vec());
    }

    #[test]
    fn sensor_type_round_trip_keeps_other_group() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        board.set_sensor_type(1u8, proto::SensorType::Pt1000).unwrap();
        board.set_sensor_type(2u8, proto::SensorType::Pt100).unwrap();
        assert_eq!(board.sensor_type(1u8).unwrap(), proto::SensorType::Pt1000);
        assert_eq!(board.sensor_type(2u8).unwrap(), proto::SensorType::Pt100);
        board.set_sensor_type(2u8, 1u8).unwrap();
        assert_eq!(transport.register(0, 96, 1), vec![0b11]);
        board.set_sensor_type(1u8, 0u8).unwrap();
        assert_eq!(transport.register(0, 96, 1), vec![0b10]);
    }

    #[test]
    fn sample_switch_count_range_and_round_trip() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        for value in [0u16, 10001, u16::MAX] {
            assert_matches!(
                board.set_sample_switch_count(value),
                Err(Error::Protocol(proto::Error::SampleSwitchCountOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());
        for value in [1u16, 250, 10000] {
            board.set_sample_switch_count(value).unwrap();
            assert_eq!(*board.sample_switch_count().unwrap(), value);
        }
    }

    #[test]
    fn calibration_writes_value_and_channel_byte() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        board.calibrate(3u8, 100.0f32).unwrap();
        board.calibrate(3u8, 138.5f32).unwrap();
        let mut expected = 138.5f32.to_le_bytes().to_vec();
        expected.push(3);
        assert_eq!(transport.register(0, 91, 5), expected);
        assert_eq!(transport.writes().len(), 2);
    }

    #[test]
    fn calibration_rejects_out_of_range_resistance() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        for value in [-0.5f32, -1.5, 4000.5, f32::NAN, f32::INFINITY] {
            assert_matches!(
                board.calibrate(1u8, value),
                Err(Error::Protocol(proto::Error::ResistanceOutOfRange(_)))
            );
        }
        assert!(transport.transactions().is_empty());
    }

    #[test]
    fn reset_calibration_writes_sentinel() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        board.reset_calibration(7u8).unwrap();
        assert_eq!(
            transport.writes(),
            vec![Transaction::Write {
                address: 0x40,
                register: 91,
                data: vec![0x00, 0x00, 0x80, 0xBF, 7]
            }]
        );
    }

    #[test]
    fn revisions_and_diagnostics() {
        let mut transport = MockTransport::new().with_board(0);
        transport.set_register(0, 32, &[41, 0x88, 0x13]);
        transport.set_register(0, 55, &[2, 1]);
        let mut board = open(&mut transport);
        assert_eq!(board.firmware_revision().unwrap().to_string(), "1.02");
        assert_eq!(board.hardware_revision().unwrap().to_string(), "2.01");
        let diagnostics = board.diagnostics().unwrap();
        assert_eq!(diagnostics.cpu_temperature, 41);
        assert_eq!(diagnostics.supply_millivolts, 5000);
    }

    #[test]
    fn transport_failure_surfaces_as_bus_error() {
        let mut transport = MockTransport::new().with_board(0);
        let mut board = open(&mut transport);
        transport.fail_reads(0, true);
        assert_matches!(board.temperature(1u8), Err(Error::Bus(_)));
        transport.fail_writes(0, true);
        assert_matches!(board.set_led_threshold(1u8, 5i16), Err(Error::Bus(_)));
    }

    #[test]
    fn scan_lists_attached_boards() {
        let mut transport = MockTransport::new().with_board(0).with_board(5);
        let found: Vec<u8> = scan(&mut transport).unwrap().iter().map(|s| **s).collect();
        assert_eq!(found, vec![0, 5]);
    }
}
