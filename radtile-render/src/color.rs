//!
//! The tone-mapping operator: a piecewise-linear color table from radar
//! reflectivity to RGBA.
//!
//! The table is process-global and immutable, initialized on first use. Table
//! keys are reflectivity in tenths of a dBZ so lookups work in integers.
//! Interpolated results are deliberately not cached: cached entries
//! accumulate roundoff in access patterns at high zoom levels, producing
//! visible borders between tiles.
//!

use crate::sample::RadarValue;
use once_cell::sync::Lazy;

/// An RGBA color, one byte per channel.
pub type Rgba = [u8; 4];

/// Reflectivity breakpoints keyed by tenths of a dBZ, ascending.
static REFLECTIVITY_TABLE: Lazy<Vec<(i32, Rgba)>> = Lazy::new(|| {
    vec![
        (-320, [0x7A, 0x6C, 0x86, 0x00]),
        (0, [0x7A, 0x6C, 0x86, 0x00]),
        (100, [0x7A, 0x6C, 0x86, 0x7F]),
        (250, [0x1A, 0xB7, 0x6A, 0xFF]),
        (350, [0x0B, 0x51, 0x0D, 0xFF]),
        (420, [0xDF, 0xCA, 0x1A, 0xFF]),
        (500, [0xB8, 0x08, 0x10, 0xFF]),
        (550, [0x85, 0x09, 0x0A, 0xFF]),
        (620, [0xCB, 0x1C, 0xE5, 0xFF]),
        (700, [0x39, 0x9C, 0xCC, 0xFF]),
        (800, [0xFF, 0xFF, 0xFF, 0xFF]),
        (1000, [0xFF, 0xFF, 0xFF, 0xFF]),
    ]
});

/// Look up the color for a reflectivity value, interpolating each channel
/// linearly between the bracketing breakpoints. Values outside the table
/// saturate at its ends.
fn lookup(value_dbz: f32) -> Rgba {
    let table = &*REFLECTIVITY_TABLE;
    let key = (value_dbz * 10.0).round() as i32;

    let (first_key, first_color) = table[0];
    if key <= first_key {
        return first_color;
    }
    let (last_key, last_color) = table[table.len() - 1];
    if key >= last_key {
        return last_color;
    }

    let upper = table.partition_point(|(breakpoint, _)| *breakpoint < key);
    let (upper_key, upper_color) = table[upper];
    if upper_key == key {
        return upper_color;
    }
    let (lower_key, lower_color) = table[upper - 1];

    let mu = (key - lower_key) as f32 / (upper_key - lower_key) as f32;
    let mut color = [0u8; 4];
    for (channel, value) in color.iter_mut().enumerate() {
        *value = (lower_color[channel] as f32 * (1.0 - mu) + upper_color[channel] as f32 * mu)
            as u8;
    }
    color
}

/// Map a sampled radar value to a pixel. The table's alpha is additionally
/// scaled by the sample's validity, rounded to eight bits, so coverage edges
/// fade out.
pub fn tone_map(rv: RadarValue) -> Rgba {
    let mut color = lookup(rv.value);
    color[3] = (color[3] as f32 * rv.validity).round() as u8;
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(value: f32) -> RadarValue {
        RadarValue {
            value,
            validity: 1.0,
        }
    }

    #[test]
    fn breakpoints_map_exactly() {
        assert_eq!(tone_map(valid(25.0)), [0x1A, 0xB7, 0x6A, 0xFF]);
        assert_eq!(tone_map(valid(50.0)), [0xB8, 0x08, 0x10, 0xFF]);
        assert_eq!(tone_map(valid(0.0)), [0x7A, 0x6C, 0x86, 0x00]);
    }

    #[test]
    fn values_saturate_at_the_ends() {
        assert_eq!(tone_map(valid(-50.0)), [0x7A, 0x6C, 0x86, 0x00]);
        assert_eq!(tone_map(valid(150.0)), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn channels_interpolate_between_breakpoints() {
        // Halfway between 42.0 (DF CA 1A) and 50.0 (B8 08 10).
        let color = tone_map(valid(46.0));
        assert_eq!(color[0] as u32, (0xDF + 0xB8) / 2);
        assert_eq!(color[1] as u32, (0xCA + 0x08) / 2);
        assert_eq!(color[2] as u32, (0x1A + 0x10) / 2);
        assert_eq!(color[3], 0xFF);
    }

    #[test]
    fn alpha_fades_in_between_zero_and_ten_dbz() {
        // Alpha ramps 0x00 -> 0x7F across [0, 10] dBZ.
        let low = tone_map(valid(2.5));
        let high = tone_map(valid(7.5));
        assert!(low[3] < high[3]);
        assert!(high[3] < 0x7F);
    }

    #[test]
    fn alpha_scales_with_validity_rounded() {
        let rv = RadarValue {
            value: 35.0,
            validity: 0.5,
        };
        assert_eq!(tone_map(rv)[3], 128); // round(255 * 0.5)

        let rv = RadarValue {
            value: 35.0,
            validity: 0.0,
        };
        assert_eq!(tone_map(rv)[3], 0);
    }

    #[test]
    fn invalid_samples_are_transparent() {
        assert_eq!(tone_map(RadarValue::INVALID)[3], 0);
    }
}
