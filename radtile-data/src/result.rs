//!
//! Contains the Result and Error types for archive file operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("input data ended mid-read")]
    Truncated,
    #[error("volume header magic is not AR2V00")]
    BadMagic,
    #[error("volume header version {0:?} is not ASCII decimal")]
    BadVersion(String),
    #[error("file decoding error: {0}")]
    DecodingError(String),
    #[error("zero-length compressed block payload")]
    EmptyBzip2,
    #[error("block decompression error")]
    Bzip2Decode(#[from] std::io::Error),
    #[error("message decoding error")]
    MessageError(#[from] radtile_decode::result::Error),
}
