//! Register map and value types of the RTD data acquisition HAT.
//!
//! The board exposes a flat, little-endian register file over I2C. Every
//! quantity lives at a fixed byte offset described by a [`RegisterField`].
//! Per-channel quantities are laid out as arrays with a stride equal to the
//! field width.
//!
//! The value types in this module ([`StackId`], [`Channel`], [`LedThreshold`],
//! ...) can only be constructed through `TryFrom`, so a value that reaches the
//! bus has already been range checked.

use std::fmt;
use std::ops::Deref;

/// Validation and decoding errors of the register protocol.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Stack level {0} out of range [{min}..{max}]", min = StackId::MIN, max = StackId::MAX)]
    StackOutOfRange(u8),
    #[error("RTD channel {0} out of range [{min}..{max}]", min = Channel::MIN, max = Channel::MAX)]
    ChannelOutOfRange(u8),
    #[error("Sensor group {0} out of range [{min}..{max}]", min = Group::MIN, max = Group::MAX)]
    GroupOutOfRange(u8),
    #[error("LED mode {0} out of range, expected off<0>, low<1> or high<2>")]
    LedModeOutOfRange(u16),
    #[error("LED threshold {0} out of range [{min}..{max}] °C", min = LedThreshold::MIN, max = LedThreshold::MAX)]
    LedThresholdOutOfRange(i16),
    #[error("Sensor type {0} out of range, expected PT100<0> or PT1000<1>")]
    SensorTypeOutOfRange(u8),
    #[error("Calibration resistance {0} out of range [{min}..{max}] Ohm", min = CalibrationValue::MIN, max = CalibrationValue::MAX)]
    ResistanceOutOfRange(f32),
    #[error("Watchdog period {0} out of range [{min}..{max}] s", min = WatchdogPeriod::MIN, max = WatchdogPeriod::MAX)]
    PeriodOutOfRange(u16),
    #[error("Watchdog off period {0} out of range [{min}..{max}] s", min = WatchdogOffPeriod::MIN, max = WatchdogOffPeriod::MAX)]
    OffPeriodOutOfRange(u32),
    #[error("Sample switch count {0} out of range [{min}..{max}]", min = SampleSwitchCount::MIN, max = SampleSwitchCount::MAX)]
    SampleSwitchCountOutOfRange(u16),
    #[error("Expected {expected} register byte(s), got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },
}

/// Lets accessors accept either a raw value or an already validated one.
impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Conversion into a validated protocol value.
///
/// Implemented for every raw type a value type can be built from, and for the
/// value type itself, so accessors take `3u8` as readily as a `Channel`.
pub trait IntoChecked<T> {
    fn into_checked(self) -> Result<T, Error>;
}

impl<T, S> IntoChecked<T> for S
where
    S: TryInto<T>,
    Error: From<S::Error>,
{
    fn into_checked(self) -> Result<T, Error> {
        self.try_into().map_err(Error::from)
    }
}

/// How the bytes of a register field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    U8,
    U16,
    S16,
    U32,
    Float32,
    /// Several sub-fields packed into one register, accessed read-modify-write.
    Bitfield,
}

/// Location and shape of one quantity in the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterField {
    pub address: u8,
    pub width: u8,
    pub encoding: Encoding,
    /// Number of consecutive elements, 8 for per-channel arrays.
    pub count: u8,
}

impl RegisterField {
    const fn scalar(address: u8, width: u8, encoding: Encoding) -> Self {
        Self {
            address,
            width,
            encoding,
            count: 1,
        }
    }

    const fn per_channel(address: u8, width: u8, encoding: Encoding) -> Self {
        Self {
            address,
            width,
            encoding,
            count: NUMBER_OF_CHANNELS,
        }
    }

    /// Address of the element belonging to `channel`.
    pub const fn channel_address(&self, channel: Channel) -> u8 {
        self.address + self.width * (channel.0 - 1)
    }

    /// Number of bytes covered by all elements of the field.
    pub const fn span(&self) -> usize {
        self.width as usize * self.count as usize
    }

    /// Whether `width` is the natural size of `encoding`.
    pub const fn width_matches_encoding(&self) -> bool {
        match self.encoding {
            Encoding::U8 => self.width == 1,
            Encoding::U16 | Encoding::S16 => self.width == 2,
            Encoding::U32 | Encoding::Float32 => self.width == 4,
            Encoding::Bitfield => self.width == 1 || self.width == 2,
        }
    }
}

pub const NUMBER_OF_CHANNELS: u8 = 8;
pub const NUMBER_OF_GROUPS: u8 = 2;
pub const CHANNELS_PER_GROUP: u8 = NUMBER_OF_CHANNELS / NUMBER_OF_GROUPS;

/// I2C address of the board at stack level 0.
pub const BASE_ADDRESS: u8 = 0x40;

pub const TEMPERATURE: RegisterField = RegisterField::per_channel(0, 4, Encoding::Float32);
pub const CPU_TEMPERATURE: RegisterField = RegisterField::scalar(32, 1, Encoding::U8);
pub const SUPPLY_VOLTAGE: RegisterField = RegisterField::scalar(33, 2, Encoding::U16);
pub const WDT_RELOAD: RegisterField = RegisterField::scalar(35, 1, Encoding::U8);
pub const WDT_PERIOD_SET: RegisterField = RegisterField::scalar(36, 2, Encoding::U16);
pub const WDT_PERIOD_GET: RegisterField = RegisterField::scalar(38, 2, Encoding::U16);
pub const WDT_INIT_PERIOD_SET: RegisterField = RegisterField::scalar(40, 2, Encoding::U16);
pub const WDT_INIT_PERIOD_GET: RegisterField = RegisterField::scalar(42, 2, Encoding::U16);
pub const WDT_RESET_COUNT: RegisterField = RegisterField::scalar(44, 2, Encoding::U16);
pub const WDT_CLEAR_RESET_COUNT: RegisterField = RegisterField::scalar(46, 1, Encoding::U8);
pub const WDT_OFF_PERIOD_SET: RegisterField = RegisterField::scalar(47, 4, Encoding::U32);
pub const WDT_OFF_PERIOD_GET: RegisterField = RegisterField::scalar(51, 4, Encoding::U32);
pub const HARDWARE_REVISION_MAJOR: RegisterField = RegisterField::scalar(55, 1, Encoding::U8);
pub const HARDWARE_REVISION_MINOR: RegisterField = RegisterField::scalar(56, 1, Encoding::U8);
pub const FIRMWARE_REVISION_MAJOR: RegisterField = RegisterField::scalar(57, 1, Encoding::U8);
pub const FIRMWARE_REVISION_MINOR: RegisterField = RegisterField::scalar(58, 1, Encoding::U8);
pub const RESISTANCE: RegisterField = RegisterField::per_channel(59, 4, Encoding::Float32);
pub const CALIBRATION_VALUE: RegisterField = RegisterField::scalar(91, 4, Encoding::Float32);
pub const CALIBRATION_CHANNEL: RegisterField = RegisterField::scalar(95, 1, Encoding::U8);
pub const SENSOR_TYPE: RegisterField = RegisterField::scalar(96, 1, Encoding::Bitfield);
pub const LED_MODE: RegisterField = RegisterField::scalar(97, 2, Encoding::Bitfield);
pub const LED_THRESHOLD: RegisterField = RegisterField::per_channel(99, 2, Encoding::S16);
pub const SAMPLE_SWITCH_COUNT: RegisterField = RegisterField::scalar(115, 2, Encoding::U16);

/// Every field of the register map, ordered by address.
pub const REGISTER_MAP: &[RegisterField] = &[
    TEMPERATURE,
    CPU_TEMPERATURE,
    SUPPLY_VOLTAGE,
    WDT_RELOAD,
    WDT_PERIOD_SET,
    WDT_PERIOD_GET,
    WDT_INIT_PERIOD_SET,
    WDT_INIT_PERIOD_GET,
    WDT_RESET_COUNT,
    WDT_CLEAR_RESET_COUNT,
    WDT_OFF_PERIOD_SET,
    WDT_OFF_PERIOD_GET,
    HARDWARE_REVISION_MAJOR,
    HARDWARE_REVISION_MINOR,
    FIRMWARE_REVISION_MAJOR,
    FIRMWARE_REVISION_MINOR,
    RESISTANCE,
    CALIBRATION_VALUE,
    CALIBRATION_CHANNEL,
    SENSOR_TYPE,
    LED_MODE,
    LED_THRESHOLD,
    SAMPLE_SWITCH_COUNT,
];

/// Byte written to [`WDT_RELOAD`] to reload (and enable) the watchdog.
pub const WDT_RELOAD_SIGNATURE: u8 = 0xCA;
/// Byte written to [`WDT_CLEAR_RESET_COUNT`] to clear the reset counter.
pub const WDT_CLEAR_RESET_COUNT_SIGNATURE: u8 = 0xBE;

fn le_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    bytes.try_into().map_err(|_| Error::UnexpectedLength {
        expected: N,
        actual: bytes.len(),
    })
}

pub fn decode_u8(bytes: &[u8]) -> Result<u8, Error> {
    Ok(le_array::<1>(bytes)?[0])
}

pub fn decode_u16(bytes: &[u8]) -> Result<u16, Error> {
    Ok(u16::from_le_bytes(le_array(bytes)?))
}

pub fn decode_i16(bytes: &[u8]) -> Result<i16, Error> {
    Ok(i16::from_le_bytes(le_array(bytes)?))
}

pub fn decode_u32(bytes: &[u8]) -> Result<u32, Error> {
    Ok(u32::from_le_bytes(le_array(bytes)?))
}

pub fn decode_f32(bytes: &[u8]) -> Result<f32, Error> {
    Ok(f32::from_le_bytes(le_array(bytes)?))
}

/// Extracts the `mask`-wide sub-field at bit `shift` of a packed register.
pub fn extract_bits(packed: u16, shift: u32, mask: u16) -> u16 {
    (packed >> shift) & mask
}

/// Replaces the sub-field at bit `shift`, leaving every other bit untouched.
pub fn insert_bits(packed: u16, shift: u32, mask: u16, value: u16) -> u16 {
    (packed & !(mask << shift)) | ((value & mask) << shift)
}

/// Stack level of a board, selecting its I2C address.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackId(u8);

impl StackId {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;

    /// All stack levels, in probing order.
    pub fn all() -> impl Iterator<Item = StackId> {
        (Self::MIN..=Self::MAX).map(StackId)
    }

    /// Bus address of the board at this stack level.
    pub const fn address(&self) -> u8 {
        BASE_ADDRESS + self.0
    }
}

impl TryFrom<u8> for StackId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::StackOutOfRange(value))
        }
    }
}

impl Deref for StackId {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the eight RTD inputs, numbered from 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = NUMBER_OF_CHANNELS;

    pub fn all() -> impl Iterator<Item = Channel> {
        (Self::MIN..=Self::MAX).map(Channel)
    }

    /// Zero based position of the channel.
    pub const fn index(&self) -> u8 {
        self.0 - 1
    }

    /// The sensor group this channel belongs to.
    pub const fn group(&self) -> Group {
        Group(self.index() / CHANNELS_PER_GROUP + 1)
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::ChannelOutOfRange(value))
        }
    }
}

impl Deref for Channel {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group of four channels sharing one sensor type: 1 covers channels 1-4,
/// 2 covers channels 5-8.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(u8);

impl Group {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = NUMBER_OF_GROUPS;

    /// Bit position of this group inside [`SENSOR_TYPE`].
    pub const fn bit(&self) -> u32 {
        (self.0 - 1) as u32
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> {
        let first = (self.0 - 1) * CHANNELS_PER_GROUP + 1;
        (first..first + CHANNELS_PER_GROUP).map(Channel)
    }
}

impl TryFrom<u8> for Group {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::GroupOutOfRange(value))
        }
    }
}

impl Deref for Group {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behaviour of a channel's LED relative to its threshold.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LedMode {
    #[default]
    Off = 0,
    /// On while the temperature is above the threshold.
    Low = 1,
    /// On while the temperature is below the threshold.
    High = 2,
}

impl LedMode {
    const MASK: u16 = 0b11;
    const BITS: u32 = 2;

    fn shift(channel: Channel) -> u32 {
        Self::BITS * channel.index() as u32
    }

    /// Reads the mode of `channel` out of the packed [`LED_MODE`] register.
    pub fn unpack(packed: u16, channel: Channel) -> Result<Self, Error> {
        let raw = extract_bits(packed, Self::shift(channel), Self::MASK);
        Self::try_from(raw as u8).map_err(|_| Error::LedModeOutOfRange(raw))
    }

    /// Stores this mode for `channel` into `packed`, keeping the other channels.
    pub fn pack(self, packed: u16, channel: Channel) -> u16 {
        insert_bits(packed, Self::shift(channel), Self::MASK, self as u16)
    }
}

impl TryFrom<u8> for LedMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Low),
            2 => Ok(Self::High),
            _ => Err(Error::LedModeOutOfRange(value as u16)),
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// LED switching threshold of a channel in whole degrees Celsius.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LedThreshold(i16);

impl LedThreshold {
    pub const MIN: i16 = -200;
    pub const MAX: i16 = 300;

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        // Stored values are reported as-is, the range only guards writes.
        Ok(Self(decode_i16(bytes)?))
    }

    pub fn encode(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl TryFrom<i16> for LedThreshold {
    type Error = Error;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::LedThresholdOutOfRange(value))
        }
    }
}

impl Deref for LedThreshold {
    type Target = i16;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for LedThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// RTD element fitted to a channel group.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SensorType {
    #[default]
    Pt100 = 0,
    Pt1000 = 1,
}

impl SensorType {
    const MASK: u16 = 0b1;

    pub fn unpack(packed: u8, group: Group) -> Self {
        match extract_bits(packed as u16, group.bit(), Self::MASK) {
            0 => Self::Pt100,
            _ => Self::Pt1000,
        }
    }

    pub fn pack(self, packed: u8, group: Group) -> u8 {
        insert_bits(packed as u16, group.bit(), Self::MASK, self as u16) as u8
    }
}

impl TryFrom<u8> for SensorType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pt100),
            1 => Ok(Self::Pt1000),
            _ => Err(Error::SensorTypeOutOfRange(value)),
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Value written by a calibration command.
///
/// A calibration point is a reference resistance applied to the channel
/// input. Resetting a channel reuses the same wire format with the
/// [`CalibrationValue::RESET_SENTINEL`] in place of the resistance.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationValue {
    Resistance(f32),
    Reset,
}

impl CalibrationValue {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 4000.0;
    pub const RESET_SENTINEL: f32 = -1.0;

    /// Wire image of the command: the value as float32 followed by the channel byte.
    pub fn encode_command(&self, channel: Channel) -> [u8; 5] {
        let value = match self {
            Self::Resistance(ohms) => *ohms,
            Self::Reset => Self::RESET_SENTINEL,
        };
        let mut command = [0u8; 5];
        command[..4].copy_from_slice(&value.to_le_bytes());
        command[4] = *channel;
        command
    }
}

impl TryFrom<f32> for CalibrationValue {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if value == Self::RESET_SENTINEL {
            Ok(Self::Reset)
        } else if (Self::MIN..=Self::MAX).contains(&value) {
            // -0.0 passes the range check, store it as +0.0.
            Ok(Self::Resistance(value + 0.0))
        } else {
            Err(Error::ResistanceOutOfRange(value))
        }
    }
}

/// Watchdog period in seconds, used for both the running and the boot period.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WatchdogPeriod(u16);

impl WatchdogPeriod {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = u16::MAX;

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(decode_u16(bytes)?))
    }

    pub fn encode(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl TryFrom<u16> for WatchdogPeriod {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(Error::PeriodOutOfRange(value))
        }
    }
}

impl Deref for WatchdogPeriod {
    type Target = u16;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for WatchdogPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time in seconds the watchdog keeps the host powered off.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WatchdogOffPeriod(u32);

impl WatchdogOffPeriod {
    pub const MIN: u32 = 1;
    /// 48 days.
    pub const MAX: u32 = 48 * 24 * 3600;

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(decode_u32(bytes)?))
    }

    pub fn encode(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl TryFrom<u32> for WatchdogOffPeriod {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::OffPeriodOutOfRange(value))
        }
    }
}

impl Deref for WatchdogOffPeriod {
    type Target = u32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for WatchdogOffPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of samples the converter takes on a channel before moving on to the next one.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleSwitchCount(u16);

impl SampleSwitchCount {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 10000;

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(decode_u16(bytes)?))
    }

    pub fn encode(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl TryFrom<u16> for SampleSwitchCount {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::SampleSwitchCountOutOfRange(value))
        }
    }
}

impl Deref for SampleSwitchCount {
    type Target = u16;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for SampleSwitchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `major.minor` revision pair, as stored for hardware and firmware.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Revision {
    pub major: u8,
    pub minor: u8,
}

impl Revision {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let [major, minor] = le_array::<2>(bytes)?;
        Ok(Self { major, minor })
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

/// On-board health readings.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Temperature of the board's microcontroller in °C.
    pub cpu_temperature: u8,
    /// Supply rail in millivolts.
    pub supply_millivolts: u16,
}

impl Diagnostics {
    /// Decodes the contiguous [`CPU_TEMPERATURE`] + [`SUPPLY_VOLTAGE`] block.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let [cpu_temperature, lo, hi] = le_array::<3>(bytes)?;
        Ok(Self {
            cpu_temperature,
            supply_millivolts: u16::from_le_bytes([lo, hi]),
        })
    }

    pub fn supply_volts(&self) -> f32 {
        self.supply_millivolts as f32 / 1000.0
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU temperature {} C, Power source {:.2} V",
            self.cpu_temperature,
            self.supply_volts()
        )
    }
}
