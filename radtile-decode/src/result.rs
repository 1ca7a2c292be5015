//!
//! Contains the Result and Error types for message decoding operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("input data ended mid-read")]
    Truncated,
    #[error("segment number {segment_number} outside [1, {segment_count}]")]
    BadSegment {
        segment_number: u16,
        segment_count: u16,
    },
    #[error("message {sequence_number} incomplete: found {found} of {expected} segments")]
    ReassemblyIncomplete {
        sequence_number: u16,
        found: usize,
        expected: usize,
    },
    #[error("expected a type 31 radial message, got type {0}")]
    WrongMessageType(u8),
    #[error("cut container error")]
    ModelError(#[from] radtile_model::result::Error),
}
