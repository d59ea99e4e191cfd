//! V-Compass CLI - terminal lookups against OpenSky.
//!
//! Provides the `nearest-plane` binary and the formatting it shares with
//! its tests.

pub mod report;

pub use report::{describe, describe_with_distance};

use vcompass_core::{check_altitude, GeoPoint, GeoError};

/// Validate the observer given on the command line.
pub fn observer(lat: f64, lon: f64, alt: f64) -> Result<(GeoPoint, f64), GeoError> {
    let altitude_m = check_altitude("alt", alt)?;
    let position = GeoPoint::new(lat, lon)?;
    Ok((position, altitude_m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_rejects_non_finite_altitude() {
        assert_eq!(observer(40.0, -74.0, f64::NAN).unwrap_err().field(), "alt");
        assert!(observer(40.0, -74.0, f64::INFINITY).is_err());
    }

    #[test]
    fn observer_rejects_bad_coordinates() {
        assert_eq!(observer(91.0, -74.0, 0.0).unwrap_err().field(), "lat");
    }

    #[test]
    fn observer_keeps_valid_input() {
        let (position, altitude_m) = observer(40.0, -74.0, 120.0).unwrap();
        assert_eq!(position.lat, 40.0);
        assert_eq!(altitude_m, 120.0);
    }
}
