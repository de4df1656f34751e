//! A library for the eight channel RTD data acquisition HAT for the Raspberry Pi.
//!
//! Up to eight boards can be stacked on one I2C bus; the stack level (0-7)
//! selects the bus address of each board. This crate provides:
//!
//! - **Register protocol**: the board's register map and range checked value
//!   types for every quantity it exposes. See [`protocol`].
//! - **Typed accessors**: temperatures, resistances, LED modes and thresholds,
//!   sensor types, calibration, sample switch count and the hardware watchdog,
//!   all on [`board::Board`].
//! - **Polynomial conversion**: a local resistance to temperature fit for
//!   cross-checking the board's own conversion. See [`polynomial`].
//! - **Transports**: the Linux I2C bus (feature `linux-i2c`) and an in-memory
//!   mock for testing (feature `mock`), both behind the [`bus::Transport`] trait.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rtd_lib::{board::Board, i2c::LinuxI2c};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut transport = LinuxI2c::new(1);
//!     let mut board = Board::open(&mut transport, 0u8)?;
//!
//!     for channel in 1u8..=8 {
//!         println!("Channel {channel}: {:.2} °C", board.temperature(channel)?);
//!     }
//!     board.set_led_threshold(1u8, 40i16)?;
//!     board.reload_watchdog()?;
//!
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod bus;
pub mod error;
pub mod polynomial;
pub mod protocol;
mod watchdog;

#[cfg_attr(docsrs, doc(cfg(feature = "linux-i2c")))]
#[cfg(feature = "linux-i2c")]
pub mod i2c;

#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{Error, Result};
