//!
//! Resamples a cut's polar data at an arbitrary geographic point.
//!
//! For a target lat/lon the sampler computes the bearing and angular distance
//! from the radar site, corrects each nearby radial for slant range along the
//! inclined beam, and evaluates a separable Gaussian filter across the
//! radials in an azimuth window and the gates in a range window. The result
//! carries a validity weight alongside the measurement so coverage edges fade
//! out instead of snapping to transparent.
//!

use crate::gaussian::gaussian_power;
use crate::geo::{central_angle, inclined_slant_range, initial_bearing_deg, MEAN_EARTH_RADIUS_METERS};
use radtile_model::data::{Cut, Radial};

/// Angular distance between radials the filter is tuned for, degrees.
const ANGULAR_RESOLUTION_DEGREES: f32 = 0.5;

/// Gate spacing the filter is tuned for, meters.
const RANGE_RESOLUTION_METERS: f32 = 250.0;

/// Maximum ratio between the azimuth and range extents of the filter.
const MAX_FILTER_ASPECT: f32 = 2.0;

/// Cap on the azimuth filter scale; the angular width of a fixed ground
/// distance becomes singular approaching the radar site.
const MAX_AZIMUTH_FILTER_SCALE: f32 = 20.0;

/// The kernel needs two samples of washout on each side of its center.
const WASHOUT_ALLOWANCE: f32 = 2.0;

/// A sampled radar value: the measurement in dBZ and a validity weight, where
/// 0.0 is invalid and 1.0 is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarValue {
    /// The filtered measurement in dBZ.
    pub value: f32,
    /// The filtered validity weight in [0, 1].
    pub validity: f32,
}

impl RadarValue {
    /// A fully invalid sample.
    pub const INVALID: RadarValue = RadarValue {
        value: 0.0,
        validity: 0.0,
    };
}

/// The interpreted value of one gate of a radial.
///
/// A gate position inside the cone of silence or beyond the radar's range
/// reports the measurement of the nearest in-range gate with zero validity.
/// Interpolation across a coverage edge then fades from a valid to an invalid
/// value with the same measurement, instead of the measurement spuriously
/// falling off to zero and punching a visible hole.
fn gate_val(radial: &Radial, gate_index: i64) -> RadarValue {
    let gate_count = radial.gate_count() as i64;
    if gate_count == 0 {
        return RadarValue::INVALID;
    }

    let mut validity = 1.0;
    let mut index = gate_index;
    if index < 0 {
        index = 0;
        validity = 0.0;
    } else if index > gate_count - 1 {
        index = gate_count - 1;
        validity = 0.0;
    }

    let gate = radial.gates()[index as usize];
    if gate == 0 || gate == 1 {
        RadarValue::INVALID
    } else {
        RadarValue {
            value: (gate as f32 - radial.offset()) / radial.scale(),
            validity,
        }
    }
}

/// Sample one radial with a Gaussian filter of the given width at the given
/// central angle from the radar site. The central angle is used instead of a
/// ground distance because each radial is individually corrected for slant
/// range along its inclined beam.
pub fn sample_radial_gaussian(
    radial: &Radial,
    central_angle: f64,
    filter_width_meters: f32,
) -> RadarValue {
    let range = inclined_slant_range(
        central_angle,
        (radial.elevation_degrees() as f64).to_radians(),
    ) as f32;

    let gate_interval = radial.gate_interval_meters();
    let filter_scale = if filter_width_meters > gate_interval {
        filter_width_meters / gate_interval
    } else {
        1.0
    };
    let position = (range - radial.first_gate_range_meters()) / gate_interval;

    let gate_count = radial.gate_count() as i64;
    let reach = (filter_scale * WASHOUT_ALLOWANCE).ceil();
    let mut near_index = (position - reach) as i64;
    let mut far_index = (position + reach) as i64;
    if near_index < 0 {
        near_index = 0;
    }
    if far_index < 0 {
        far_index = 0;
    }
    if far_index > gate_count {
        far_index = gate_count;
    }

    if near_index > gate_count {
        return gate_val(radial, near_index);
    }

    let mut value_accum = 0.0;
    let mut validity_accum = 0.0;
    let mut coef_accum = 0.0;
    for gate_index in near_index..=far_index {
        let rv = gate_val(radial, gate_index);
        let coef = gaussian_power((gate_index as f32 - position) / filter_scale);
        value_accum += coef * rv.value;
        validity_accum += coef * rv.validity;
        coef_accum += coef;
    }

    if coef_accum == 0.0 {
        return RadarValue::INVALID;
    }
    RadarValue {
        value: value_accum / coef_accum,
        validity: validity_accum / coef_accum,
    }
}

/// Sample the cut at the given lat/lon in radians, filtering with a Gaussian
/// kernel at least `filter_width_meters` wide. Sampling never fails; where
/// the cut has no usable data the result degrades to zero validity.
pub fn sample_gaussian(
    cut: &Cut,
    lat: f64,
    lon: f64,
    filter_width_meters: f32,
) -> RadarValue {
    let radials = cut.radials();
    let radial_count = radials.len();
    if radial_count == 0 {
        return RadarValue::INVALID;
    }

    let site_lat = (cut.latitude_degrees() as f64).to_radians();
    let site_lon = (cut.longitude_degrees() as f64).to_radians();

    let theta_deg = initial_bearing_deg(site_lat, site_lon, lat, lon) as f32;
    let angular_distance = central_angle(site_lat, site_lon, lat, lon);
    let ground_range = (angular_distance * MEAN_EARTH_RADIUS_METERS) as f32;

    // Azimuth filter width indicated by the range distance, then widened to
    // whichever of the requested width and the range resolution is larger.
    let calculated_filter_width = ANGULAR_RESOLUTION_DEGREES.to_radians() * ground_range;
    let mut effective_filter_width = calculated_filter_width;
    if effective_filter_width < filter_width_meters {
        effective_filter_width = filter_width_meters;
    }
    if effective_filter_width < RANGE_RESOLUTION_METERS / MAX_FILTER_ASPECT {
        effective_filter_width = RANGE_RESOLUTION_METERS / MAX_FILTER_ASPECT;
    }

    // The azimuth scale this computes comes out twice as wide as it should,
    // very visibly, so correct by half. Capped to tame the singularity at the
    // radar site.
    let width_ratio = if effective_filter_width > ground_range {
        effective_filter_width / ground_range
    } else {
        1.0
    };
    let calculated_az_filter_scale = width_ratio * 0.5;
    let az_filter_scale = if calculated_az_filter_scale < MAX_AZIMUTH_FILTER_SCALE {
        calculated_az_filter_scale
    } else {
        MAX_AZIMUTH_FILTER_SCALE
    };

    let mut range_filter_width = effective_filter_width / MAX_FILTER_ASPECT;
    if range_filter_width < filter_width_meters {
        range_filter_width = filter_width_meters;
    }

    // Azimuth extent of the kernel, wrapped onto [0, 360).
    let mut theta_start = theta_deg - az_filter_scale * WASHOUT_ALLOWANCE;
    let mut theta_stop = theta_deg + az_filter_scale * WASHOUT_ALLOWANCE;
    if theta_start < 0.0 {
        theta_start += 360.0;
    }
    if theta_stop >= 360.0 {
        theta_stop -= 360.0;
    }

    // The window runs from the radial just below the start angle up to (but
    // not including) the first radial at or past the stop angle, continuing
    // through the 0/360 seam when needed.
    let start = (radials.lower_bound(theta_start) + radial_count - 1) % radial_count;
    let stop = radials.lower_bound(theta_stop) % radial_count;
    let window = (stop + radial_count - start) % radial_count;

    let mut value_accum = 0.0;
    let mut validity_accum = 0.0;
    let mut coef_accum = 0.0;
    for (azimuth, radial) in radials.iter_wrapped(start).take(window) {
        let rv = sample_radial_gaussian(radial, angular_distance, range_filter_width);

        let mut delta = azimuth - theta_deg;
        if delta > 180.0 {
            delta -= 360.0;
        }
        if delta < -180.0 {
            delta += 360.0;
        }

        let coef = gaussian_power(delta / az_filter_scale);
        value_accum += coef * rv.value;
        validity_accum += coef * rv.validity;
        coef_accum += coef;
    }

    if coef_accum == 0.0 {
        return RadarValue::INVALID;
    }
    RadarValue {
        value: value_accum / coef_accum,
        validity: validity_accum / coef_accum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_radial(azimuth: f32, code: u8, gate_count: usize) -> Radial {
        Radial::new(
            1,
            azimuth,
            0.5,
            2125.0,
            250.0,
            2.0,
            66.0,
            vec![code; gate_count],
        )
    }

    fn uniform_cut(code: u8) -> Cut {
        let mut cut = Cut::new("KLVX".to_string(), 38.0, -85.9, 224.0, 212, 0);
        let mut azimuth = 0.0f32;
        while azimuth < 360.0 {
            cut.push(0, uniform_radial(azimuth, code, 460))
                .expect("azimuths are distinct");
            azimuth += 0.5;
        }
        cut
    }

    /// A point roughly 50 km east of the site.
    fn target() -> (f64, f64) {
        (38.0f64.to_radians(), (-85.9 + 0.57f64).to_radians())
    }

    #[test]
    fn gate_values_clamp_at_coverage_edges() {
        let radial = uniform_radial(0.0, 100, 8);

        let inside = gate_val(&radial, 4);
        assert_eq!(inside.value, (100.0 - 66.0) / 2.0);
        assert_eq!(inside.validity, 1.0);

        let before = gate_val(&radial, -3);
        assert_eq!(before.value, inside.value);
        assert_eq!(before.validity, 0.0);

        let beyond = gate_val(&radial, 12);
        assert_eq!(beyond.value, inside.value);
        assert_eq!(beyond.validity, 0.0);
    }

    #[test]
    fn threshold_gates_are_invalid() {
        let radial = uniform_radial(0.0, 0, 8);
        assert_eq!(gate_val(&radial, 2), RadarValue::INVALID);

        let folded = uniform_radial(0.0, 1, 8);
        assert_eq!(gate_val(&folded, 2), RadarValue::INVALID);
    }

    #[test]
    fn uniform_radial_samples_to_its_value() {
        let radial = uniform_radial(0.0, 100, 460);
        let angle = 50_000.0 / MEAN_EARTH_RADIUS_METERS;

        let rv = sample_radial_gaussian(&radial, angle, 250.0);
        assert!((rv.value - 17.0).abs() < 1e-3);
        assert!((rv.validity - 1.0).abs() < 1e-3);
    }

    #[test]
    fn sample_beyond_radar_range_has_no_validity() {
        let radial = uniform_radial(0.0, 100, 460);
        // 460 gates at 250 m reach 115 km from a 2.125 km start.
        let angle = 400_000.0 / MEAN_EARTH_RADIUS_METERS;

        let rv = sample_radial_gaussian(&radial, angle, 250.0);
        assert_eq!(rv.validity, 0.0);
        // The measurement holds the edge value rather than collapsing.
        assert!((rv.value - 17.0).abs() < 1e-3);
    }

    #[test]
    fn uniform_cut_samples_to_its_value() {
        let cut = uniform_cut(100);
        let (lat, lon) = target();

        let rv = sample_gaussian(&cut, lat, lon, 250.0);
        assert!((rv.value - 17.0).abs() < 0.01, "value {}", rv.value);
        assert!((rv.validity - 1.0).abs() < 0.01, "validity {}", rv.validity);
    }

    #[test]
    fn all_threshold_cut_is_invalid_everywhere() {
        let cut = uniform_cut(0);
        let (lat, lon) = target();

        let rv = sample_gaussian(&cut, lat, lon, 250.0);
        assert_eq!(rv.validity, 0.0);
        assert_eq!(rv.value, 0.0);
    }

    #[test]
    fn kernel_windows_cross_the_azimuth_seam() {
        let cut = uniform_cut(100);
        // Due north of the site, bearing ~0, so the window spans 359.x/0.x.
        let lat = (38.0 + 0.45f64).to_radians();
        let lon = (-85.9f64).to_radians();

        let rv = sample_gaussian(&cut, lat, lon, 250.0);
        assert!((rv.value - 17.0).abs() < 0.01);
        assert!(rv.validity > 0.99);
    }

    #[test]
    fn empty_cut_degrades_to_invalid() {
        let cut = Cut::new("KLVX".to_string(), 38.0, -85.9, 224.0, 212, 0);
        let (lat, lon) = target();

        assert_eq!(sample_gaussian(&cut, lat, lon, 250.0), RadarValue::INVALID);
    }
}
