//! Spatial math for distance calculations.

use crate::models::GeoPoint;

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// This is the standard formula for calculating great-circle distance
/// between two points on a sphere given their latitudes and longitudes.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Straight-line combination of ground arc length and vertical offset.
///
/// Good enough for ranking nearby traffic; it is not a true geodesic with
/// altitude. A candidate without altitude is treated as sitting at 0 m.
pub fn distance_3d(target: &GeoPoint, target_altitude_m: f64, candidate: &GeoPoint) -> f64 {
    let ground_m = haversine_distance(target.lat, target.lon, candidate.lat, candidate.lon);
    let altitude_diff_m = (candidate.altitude_or_zero() - target_altitude_m).abs();
    ground_m.hypot(altitude_diff_m)
}
