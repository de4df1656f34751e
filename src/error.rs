//! Errors returned by the board accessors.
use crate::{bus::BusError, protocol as proto};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument failed validation. Nothing was sent to the board.
    #[error(transparent)]
    Protocol(#[from] proto::Error),

    /// The presence check of [`crate::board::Board::open`] got no answer.
    #[error("RTD board with stack level {stack} not detected")]
    DeviceNotDetected {
        stack: proto::StackId,
        #[source]
        source: BusError,
    },

    /// A register transaction failed.
    #[error(transparent)]
    Bus(#[from] BusError),
}

pub type Result<T> = std::result::Result<T, Error>;
