//!
//! Web-Mercator tile and pixel coordinate math.
//!
//! At zoom `z` the projection sphere is `2^z * 256` pixels around. Raw
//! Mercator pixel coordinates put the origin at the equator and prime
//! meridian with y increasing north; the raster system used by slippy-map
//! tiles puts the origin at the northwest corner of the map with y increasing
//! south. The raster transform (a false easting of half the circumference and
//! a matching false northing) converts between the two.
//!

use std::f64::consts::PI;

/// Web-Mercator tiles are 256 pixels square.
pub const TILE_DIMENSION_PIXELS: u32 = 256;

/// The false easting and false northing for a projection sphere of the given
/// circumference in pixels.
pub fn calculate_false_offset(sphere_circumference_pixels: f64) -> (f64, f64) {
    let false_easting = -sphere_circumference_pixels / 2.0;
    let false_northing = sphere_circumference_pixels / 2.0;

    (false_easting, false_northing)
}

/// Transform projected Mercator pixel coordinates into raster coordinates.
fn apply_raster_transform(x: f64, y: f64, sphere_circumference_pixels: f64) -> (f64, f64) {
    let (false_easting, false_northing) = calculate_false_offset(sphere_circumference_pixels);

    (x - false_easting, false_northing - y)
}

/// Transform raster coordinates back into projected Mercator coordinates.
fn inverse_raster_transform(x: f64, y: f64, sphere_circumference_pixels: f64) -> (f64, f64) {
    let (false_easting, false_northing) = calculate_false_offset(sphere_circumference_pixels);

    (x + false_easting, false_northing - y)
}

/// Map a lat/lon in decimal degrees to the pixel-Mercator projection at the
/// given zoom level, returning the tile coordinate and the pixel offset from
/// that tile's origin.
pub fn latlon_to_pixel_mercator(
    lat_degrees: f64,
    lon_degrees: f64,
    zoom_level: u8,
) -> ((i64, i64), (f64, f64)) {
    let tiles_per_side = 1i64 << zoom_level;
    let sphere_circumference_pixels = (tiles_per_side * TILE_DIMENSION_PIXELS as i64) as f64;
    let sphere_radius_pixels = sphere_circumference_pixels / (2.0 * PI);

    let lat = lat_degrees.to_radians();
    let lon = lon_degrees.to_radians();

    // Mercator projection
    let r = sphere_radius_pixels;
    let projected_x = r * lon;
    let projected_y = (r / 2.0) * ((1.0 + lat.sin()) / (1.0 - lat.sin())).ln();

    let (zoomed_x, zoomed_y) =
        apply_raster_transform(projected_x, projected_y, sphere_circumference_pixels);

    let tile_dimension = TILE_DIMENSION_PIXELS as f64;
    let tile = (
        (zoomed_x / tile_dimension).floor() as i64,
        (zoomed_y / tile_dimension).floor() as i64,
    );
    let offset = (zoomed_x % tile_dimension, zoomed_y % tile_dimension);

    (tile, offset)
}

/// Map a tile coordinate and pixel offset back to a lat/lon pair in radians.
pub fn pixel_mercator_to_latlon(
    tile_x: i64,
    tile_y: i64,
    offset_x: f64,
    offset_y: f64,
    zoom_level: u8,
) -> (f64, f64) {
    let tiles_per_side = 1i64 << zoom_level;
    let sphere_circumference_pixels = (tiles_per_side * TILE_DIMENSION_PIXELS as i64) as f64;
    let sphere_radius_pixels = sphere_circumference_pixels / (2.0 * PI);

    let tile_dimension = TILE_DIMENSION_PIXELS as f64;
    let zoomed_x = tile_x as f64 * tile_dimension + offset_x;
    let zoomed_y = tile_y as f64 * tile_dimension + offset_y;

    let (projected_x, projected_y) =
        inverse_raster_transform(zoomed_x, zoomed_y, sphere_circumference_pixels);

    // Inverse Mercator projection
    let r = sphere_radius_pixels;
    let lat = PI / 2.0 - 2.0 * (-projected_y / r).exp().atan();
    let lon = projected_x / r;

    (lat, lon)
}
