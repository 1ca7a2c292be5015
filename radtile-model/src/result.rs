//!
//! Contains the Result and Error types for cut model operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("azimuth {azimuth} collides with an existing radial in index bucket {bucket}")]
    IndexCollision { azimuth: f32, bucket: usize },
    #[error("cut serialization error")]
    SerializationError(#[from] bincode::Error),
    #[error("cut file shorter than its format version header")]
    TruncatedCutFile,
    #[error("unsupported cut format version {0}")]
    UnsupportedFormatVersion(u32),
}
