//!
//! Great-circle geometry on a spherical earth.
//!
//! Distances use the haversine formula. The sphere radius approximates the
//! geoid's radius of curvature at 39 degrees latitude, an eyeballed center of
//! the continental US; geodesic exactness is not needed at radar ranges.
//!

/// Radius of curvature of the geoid at 39 degrees latitude, in meters.
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_364_784.3;

/// The haversine function, `sin^2(theta / 2)`.
pub fn haversin(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// The central angle in radians between two points given as lat/lon pairs in
/// radians.
pub fn central_angle(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let delta_lat = lat_b - lat_a;
    let delta_lon = lon_b - lon_a;

    let h = haversin(delta_lat) + lat_a.cos() * lat_b.cos() * haversin(delta_lon);
    2.0 * h.sqrt().asin()
}

/// The great-circle distance in meters between two points given as lat/lon
/// pairs in radians.
pub fn great_circle_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    MEAN_EARTH_RADIUS_METERS * central_angle(lat_a, lon_a, lat_b, lon_b)
}

/// The initial bearing in degrees [0, 360) from a starting point to a
/// destination, both given as lat/lon pairs in radians.
pub fn initial_bearing_deg(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let delta_lon = lon_b - lon_a;
    let opposite = delta_lon.sin() * lat_b.cos();
    let adjacent = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * delta_lon.cos();

    let bearing = opposite.atan2(adjacent);
    if bearing >= 0.0 {
        bearing.to_degrees()
    } else {
        bearing.to_degrees() + 360.0
    }
}

/// The slant range in meters along an inclined radar beam to the point on the
/// beam directly above a ground target at the given central angle from the
/// site. `inclination` is the beam elevation in radians.
pub fn inclined_slant_range(central_angle: f64, inclination: f64) -> f64 {
    let phi = central_angle;
    let theta = inclination;
    // R sin(phi) / (cos(theta) cos(phi) - sin(theta) sin(phi)), folded
    // through the angle-sum identity to save two trig calls.
    (MEAN_EARTH_RADIUS_METERS * phi.sin()) / (theta + phi).cos()
}
