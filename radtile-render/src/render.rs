use crate::color::tone_map;
use crate::geo::MEAN_EARTH_RADIUS_METERS;
use crate::result::{Error, Result};
use crate::sample::sample_gaussian;
use crate::tile::{pixel_mercator_to_latlon, TILE_DIMENSION_PIXELS};
use image::RgbaImage;
use radtile_model::data::Cut;

/// A rendered 256x256 tile: a row-major, top-left-origin RGBA8 pixel buffer
/// plus a flag recording whether any pixel came out non-transparent.
pub struct Tile {
    pixels: Vec<u8>,
    significant: bool,
}

impl Tile {
    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        TILE_DIMENSION_PIXELS
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        TILE_DIMENSION_PIXELS
    }

    /// The RGBA8 pixel buffer, row-major from the top-left, four bytes per
    /// pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether any pixel's final alpha is greater than zero. Tile pyramids
    /// use this to stop descending into subtrees with nothing to show.
    pub fn has_significant_data(&self) -> bool {
        self.significant
    }

    /// Convert the tile into an [RgbaImage] for encoding.
    pub fn into_image(self) -> Result<RgbaImage> {
        RgbaImage::from_raw(TILE_DIMENSION_PIXELS, TILE_DIMENSION_PIXELS, self.pixels)
            .ok_or(Error::InvalidDimensions)
    }
}

/// Render one web-Mercator tile of the cut.
///
/// Every pixel is sampled at its center: the pixel position is inverted to a
/// lat/lon, resampled from the cut's radials, and tone mapped. The filter
/// width is the vertical size of a pixel in meters at the tile's row, so each
/// zoom level filters at its own footprint.
pub fn render_tile(cut: &Cut, tile_x: i64, tile_y: i64, zoom_level: u8) -> Tile {
    let filter_width_meters = calculate_filter_width(tile_y, zoom_level);

    let dimension = TILE_DIMENSION_PIXELS as usize;
    let mut pixels = vec![0u8; dimension * dimension * 4];
    let mut significant = false;

    for pixel_y in 0..dimension {
        for pixel_x in 0..dimension {
            let (lat, lon) = pixel_mercator_to_latlon(
                tile_x,
                tile_y,
                pixel_x as f64 + 0.5,
                pixel_y as f64 + 0.5,
                zoom_level,
            );

            let rv = sample_gaussian(cut, lat, lon, filter_width_meters);
            let rgba = tone_map(rv);
            if rgba[3] > 0 {
                significant = true;
            }

            let index = (pixel_y * dimension + pixel_x) * 4;
            pixels[index..index + 4].copy_from_slice(&rgba);
        }
    }

    Tile {
        pixels,
        significant,
    }
}

/// The vertical size of one pixel in meters at the given tile row.
fn calculate_filter_width(tile_y: i64, zoom_level: u8) -> f32 {
    let (lat_top, _) = pixel_mercator_to_latlon(0, tile_y, 0.0, 0.0, zoom_level);
    let (lat_below, _) = pixel_mercator_to_latlon(0, tile_y, 0.0, 1.0, zoom_level);

    (MEAN_EARTH_RADIUS_METERS * (lat_top - lat_below)) as f32
}
