//!
//! Model types describing a single elevation cut of radar data.
//!
//! A [Cut] is one full rotation of the antenna at a fixed elevation angle,
//! holding one [Radial] per azimuth in an [AzimuthMap] that supports
//! constant-time lower-bound lookup and wrap-around iteration.
//!

mod azimuth_map;
pub use azimuth_map::AzimuthMap;

mod cut;
pub use cut::Cut;

mod radial;
pub use radial::{GateValue, Radial};
