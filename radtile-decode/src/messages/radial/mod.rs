//!
//! Message type 31, the generic radial format. One message carries a single
//! radial: its identifier and collection time, azimuth and elevation
//! geometry, and a pointer table of data blocks holding moment data and
//! volume constants. Unknown or malformed data blocks are dropped without
//! failing the radial.
//!

mod moment;
pub use moment::MomentBlock;

mod volume_constants;
pub use volume_constants::VolumeConstants;

pub(crate) mod message;
pub use message::{RadialMessage, RadialStatus};

pub(crate) mod raw;
