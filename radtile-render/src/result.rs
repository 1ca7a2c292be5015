//!
//! Contains the Result and Error types for tile rendering operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("pixel buffer does not match the tile dimensions")]
    InvalidDimensions,
}
