//!
//! The Archive-2 volume file layout: one [Header] record followed by a
//! sequence of bzip2-compressed [Block]s carrying message segments.
//!

mod block;
pub use block::{split_blocks, Block};

mod file;
pub use file::File;

mod header;
pub use header::Header;
