//!
//! # radtile-data
//! Access to NEXRAD Archive-2 volume files: the volume header record, the
//! bzip2-compressed blocks that follow it, and the pipeline from raw bytes to
//! reassembled messages and a built elevation cut.
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]

pub mod volume;

pub mod result;

mod util;
