//! Request-scoped data models.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};

/// A position on the globe, optionally with altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub altitude_m: Option<f64>,
}

impl GeoPoint {
    /// Create a validated point without altitude.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let point = Self {
            lat,
            lon,
            altitude_m: None,
        };
        point.validate()?;
        Ok(point)
    }

    /// Create a validated point at the given altitude.
    pub fn with_altitude(lat: f64, lon: f64, altitude_m: f64) -> Result<Self> {
        let altitude_m = check_altitude("altitude_m", altitude_m)?;
        let mut point = Self::new(lat, lon)?;
        point.altitude_m = Some(altitude_m);
        Ok(point)
    }

    /// Check latitude/longitude ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoError::invalid(
                "lat",
                self.lat,
                "must be within [-90, 90]",
            ));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(GeoError::invalid(
                "lon",
                self.lon,
                "must be within [-180, 180]",
            ));
        }
        Ok(())
    }

    /// Altitude with absence treated as sea level.
    pub fn altitude_or_zero(&self) -> f64 {
        self.altitude_m.unwrap_or(0.0)
    }
}

/// Reject NaN and infinite altitudes, which would poison every distance.
pub fn check_altitude(field: &'static str, altitude_m: f64) -> Result<f64> {
    if altitude_m.is_finite() {
        Ok(altitude_m)
    } else {
        Err(GeoError::invalid(field, altitude_m, "must be finite"))
    }
}

/// One aircraft observed by the upstream provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    /// ICAO24 transponder address
    pub icao24: String,
    pub callsign: Option<String>,
    pub position: GeoPoint,
    /// Ground speed in meters/second
    pub ground_speed_mps: Option<f64>,
    #[serde(default)]
    pub origin_country: Option<String>,
    /// Track angle, clockwise from north
    #[serde(default)]
    pub true_track_deg: Option<f64>,
}

impl AircraftRecord {
    pub fn new(icao24: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            icao24: icao24.into(),
            callsign: None,
            position,
            ground_speed_mps: None,
            origin_country: None,
            true_track_deg: None,
        }
    }

    /// Set the callsign, trimming whitespace. Blank callsigns are dropped.
    pub fn with_callsign(mut self, callsign: Option<&str>) -> Self {
        self.callsign = normalize_callsign(callsign);
        self
    }

    pub fn with_ground_speed(mut self, ground_speed_mps: Option<f64>) -> Self {
        self.ground_speed_mps = ground_speed_mps;
        self
    }
}

fn normalize_callsign(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
