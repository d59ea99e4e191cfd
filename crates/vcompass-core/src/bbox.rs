//! Search-radius to bounding-box conversion.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};
use crate::models::GeoPoint;

/// Flat approximation of one degree of latitude, no ellipsoid correction.
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Centers closer to a pole than this are rejected; the longitude span
/// diverges as cos(lat) goes to zero.
pub const MAX_CENTER_LATITUDE_DEG: f64 = 89.0;

/// Widest longitude half-span a box may have.
const MAX_LON_HALF_SPAN_DEG: f64 = 180.0;

/// Latitude/longitude rectangle in degrees. Does not wrap at the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Query pairs in the `lamin/lomin/lamax/lomax` convention used by
    /// flight-tracking APIs.
    pub fn query_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("lamin", self.lat_min),
            ("lomin", self.lon_min),
            ("lamax", self.lat_max),
            ("lomax", self.lon_max),
        ]
    }
}

/// Build the box spanning `radius_km` in every direction from `center`.
///
/// The longitude half-span is widened by `1 / cos(lat)` to account for
/// meridians converging toward the poles.
pub fn compute_bounding_box(center: &GeoPoint, radius_km: f64) -> Result<BoundingBox> {
    center.validate()?;
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::invalid(
            "radius_km",
            radius_km,
            "must be a positive finite number",
        ));
    }
    if center.lat.abs() > MAX_CENTER_LATITUDE_DEG {
        return Err(GeoError::invalid(
            "lat",
            center.lat,
            "too close to a pole for a bounding box",
        ));
    }

    let lat_span = radius_km / KM_PER_DEGREE_LAT;
    let lon_span =
        (radius_km / (KM_PER_DEGREE_LAT * center.lat.to_radians().cos())).min(MAX_LON_HALF_SPAN_DEG);

    Ok(BoundingBox {
        lat_min: center.lat - lat_span,
        lat_max: center.lat + lat_span,
        lon_min: center.lon - lon_span,
        lon_max: center.lon + lon_span,
    })
}
