//!
//! # radtile-render
//! Renders one radar elevation cut as web-Mercator raster tiles.
//!
//! Rendering is a pure function of the cut and a tile coordinate: for every
//! pixel the tile's position is inverted to a latitude/longitude, projected
//! onto the radar's conical scan as a (range, azimuth) pair, resampled with a
//! separable Gaussian filter over neighboring radials and gates, and mapped
//! through the reflectivity color table. A quadtree walk over the tile
//! pyramid prunes tiles that do not intersect the radar's coverage disk.
//!
//! # Crate Boundaries
//!
//! - Produces RGBA pixel buffers (convertible to [`image::RgbaImage`]);
//!   encoding them to PNG or anything else is the caller's concern
//! - **No data access and no binary parsing** — cuts arrive already decoded
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]

pub use image::RgbaImage;

pub mod bounds;
pub mod color;
pub mod geo;
pub mod sample;
pub mod tile;

mod gaussian;
pub use gaussian::gaussian_power;

mod render;
pub use render::{render_tile, Tile};

pub mod result;
