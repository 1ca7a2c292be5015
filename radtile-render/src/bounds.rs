//!
//! Tile/coverage-disk intersection and the quadtree search over the tile
//! pyramid.
//!

use crate::geo::great_circle_distance;
use crate::tile::{pixel_mercator_to_latlon, TILE_DIMENSION_PIXELS};

/// A tile address: x, y, and zoom level.
pub type TileCoord = (i64, i64, u8);

/// Test whether a tile intersects a circle of `distance_meters` radius
/// centered on a site given as lat/lon in radians.
///
/// The latitude and longitude lines forming the tile's edges dissect the
/// plane into nine sections, like a tic-tac-toe board, relative to the site:
///
/// - In a corner section, the nearest point of the tile is the facing corner.
/// - In a side section, the nearest point lies on the facing edge, at the
///   site's latitude or longitude.
/// - In the center section the site is on the tile itself.
pub fn test_tile_intersection(
    tile_x: i64,
    tile_y: i64,
    zoom_level: u8,
    lat: f64,
    lon: f64,
    distance_meters: f64,
) -> bool {
    let tile_dimension = TILE_DIMENSION_PIXELS as f64;
    let (north, west) = pixel_mercator_to_latlon(tile_x, tile_y, 0.0, 0.0, zoom_level);
    let (south, east) =
        pixel_mercator_to_latlon(tile_x, tile_y, tile_dimension, tile_dimension, zoom_level);

    let all_north = north > lat && south > lat;
    let all_south = north < lat && south < lat;
    let all_east = east > lon && west > lon;
    let all_west = east < lon && west < lon;

    if all_north {
        if all_east {
            great_circle_distance(lat, lon, south, west) < distance_meters
        } else if all_west {
            great_circle_distance(lat, lon, south, east) < distance_meters
        } else {
            great_circle_distance(lat, lon, south, lon) < distance_meters
        }
    } else if all_south {
        if all_east {
            great_circle_distance(lat, lon, north, west) < distance_meters
        } else if all_west {
            great_circle_distance(lat, lon, north, east) < distance_meters
        } else {
            great_circle_distance(lat, lon, north, lon) < distance_meters
        }
    } else if all_east {
        great_circle_distance(lat, lon, lat, west) < distance_meters
    } else if all_west {
        great_circle_distance(lat, lon, lat, east) < distance_meters
    } else {
        true
    }
}

/// Recursively find all tiles intersecting the coverage disk, starting at the
/// given tile and descending to `max_zoom_level`. A tile that does not
/// intersect prunes its whole subtree. Recursion depth is bounded by the zoom
/// level, at most ~18 in practice.
pub fn find_intersecting_tiles(
    start: TileCoord,
    lat: f64,
    lon: f64,
    distance_meters: f64,
    max_zoom_level: u8,
) -> Vec<TileCoord> {
    let mut tiles = Vec::new();
    let (tile_x, tile_y, zoom) = start;
    walk(
        tile_x,
        tile_y,
        zoom,
        lat,
        lon,
        distance_meters,
        max_zoom_level,
        &mut tiles,
    );
    tiles
}

#[allow(clippy::too_many_arguments)]
fn walk(
    tile_x: i64,
    tile_y: i64,
    zoom: u8,
    lat: f64,
    lon: f64,
    distance_meters: f64,
    max_zoom_level: u8,
    tiles: &mut Vec<TileCoord>,
) {
    if zoom >= max_zoom_level {
        if test_tile_intersection(tile_x, tile_y, zoom, lat, lon, distance_meters) {
            tiles.push((tile_x, tile_y, zoom));
        }
        return;
    }

    if !test_tile_intersection(tile_x, tile_y, zoom, lat, lon, distance_meters) {
        return;
    }

    tiles.push((tile_x, tile_y, zoom));

    let child_x = tile_x * 2;
    let child_y = tile_y * 2;
    let child_zoom = zoom + 1;

    walk(child_x, child_y, child_zoom, lat, lon, distance_meters, max_zoom_level, tiles);
    walk(child_x + 1, child_y, child_zoom, lat, lon, distance_meters, max_zoom_level, tiles);
    walk(child_x, child_y + 1, child_zoom, lat, lon, distance_meters, max_zoom_level, tiles);
    walk(child_x + 1, child_y + 1, child_zoom, lat, lon, distance_meters, max_zoom_level, tiles);
}
