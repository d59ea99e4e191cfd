//! Nearest-aircraft resolution by combined ground and altitude distance.

use serde::Serialize;

use crate::models::{AircraftRecord, GeoPoint};
use crate::spatial::distance_3d;

/// The closest candidate and its distance from the target in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestResult<'a> {
    pub aircraft: &'a AircraftRecord,
    pub distance_m: f64,
}

/// A candidate paired with its distance from the target.
pub type RankedAircraft<'a> = NearestResult<'a>;

/// Find the candidate closest to `target` at `target_altitude_m`.
///
/// Ties go to the candidate that appears first. Returns `None` for an empty
/// slice. Candidates are assumed to carry validated coordinates.
pub fn find_nearest<'a>(
    target: &GeoPoint,
    target_altitude_m: f64,
    candidates: &'a [AircraftRecord],
) -> Option<NearestResult<'a>> {
    let mut nearest: Option<NearestResult<'a>> = None;

    for aircraft in candidates {
        let distance_m = distance_3d(target, target_altitude_m, &aircraft.position);
        let closer = match &nearest {
            Some(best) => distance_m < best.distance_m,
            None => true,
        };
        if closer {
            nearest = Some(NearestResult {
                aircraft,
                distance_m,
            });
        }
    }

    nearest
}

/// Every candidate with its distance, closest first. Equal distances keep
/// their input order.
pub fn rank_by_distance<'a>(
    target: &GeoPoint,
    target_altitude_m: f64,
    candidates: &'a [AircraftRecord],
) -> Vec<RankedAircraft<'a>> {
    let mut ranked: Vec<RankedAircraft<'a>> = candidates
        .iter()
        .map(|aircraft| NearestResult {
            aircraft,
            distance_m: distance_3d(target, target_altitude_m, &aircraft.position),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft(icao24: &str, lat: f64, lon: f64, altitude_m: f64) -> AircraftRecord {
        AircraftRecord::new(icao24, GeoPoint::with_altitude(lat, lon, altitude_m).unwrap())
    }

    #[test]
    fn empty_candidates_yield_none() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        assert!(find_nearest(&target, 0.0, &[]).is_none());
        assert!(rank_by_distance(&target, 0.0, &[]).is_empty());
    }

    #[test]
    fn single_candidate_is_returned() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        let candidates = vec![aircraft("abc123", 40.0, -74.0, 500.0)];

        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(nearest.aircraft.icao24, "abc123");
        assert!((nearest.distance_m - 500.0).abs() < 1e-9);
    }

    #[test]
    fn overhead_aircraft_beats_low_one_further_away() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        let candidates = vec![
            aircraft("b00001", 40.1, -74.0, 0.0),
            aircraft("a00001", 40.0, -74.0, 1000.0),
        ];

        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(nearest.aircraft.icao24, "a00001");
        assert!((nearest.distance_m - 1000.0).abs() < 1e-9);

        let ranked = rank_by_distance(&target, 0.0, &candidates);
        assert_eq!(ranked[0].aircraft.icao24, "a00001");
        assert!((ranked[1].distance_m - 11_119.5).abs() < 0.5);
    }

    #[test]
    fn ties_go_to_first_seen() {
        let target = GeoPoint::new(0.0, 0.0).unwrap();
        // Mirror images across the target's meridian sit at identical distance.
        let candidates = vec![
            aircraft("first", 0.0, 0.05, 1000.0),
            aircraft("second", 0.0, -0.05, 1000.0),
        ];

        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(nearest.aircraft.icao24, "first");

        let ranked = rank_by_distance(&target, 0.0, &candidates);
        assert_eq!(ranked[0].aircraft.icao24, "first");
        assert_eq!(ranked[1].aircraft.icao24, "second");
    }

    #[test]
    fn identical_candidates_keep_first() {
        let target = GeoPoint::new(52.0, 13.0).unwrap();
        let candidates = vec![
            aircraft("one", 52.2, 13.1, 3000.0),
            aircraft("two", 52.2, 13.1, 3000.0),
        ];
        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(nearest.aircraft.icao24, "one");
    }

    #[test]
    fn antipodal_candidate_does_not_shadow_closer_one() {
        let target = GeoPoint::new(45.3, 0.3).unwrap();
        let candidates = vec![
            aircraft("far", -45.3, -179.7, 0.0),
            aircraft("near", 45.0, 0.0, 0.0),
        ];

        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(nearest.aircraft.icao24, "near");
        assert!(nearest.distance_m.is_finite());

        let ranked = rank_by_distance(&target, 0.0, &candidates);
        assert!(ranked.iter().all(|entry| entry.distance_m.is_finite()));
    }

    #[test]
    fn target_altitude_shifts_the_winner() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        let candidates = vec![
            aircraft("low", 40.0, -74.0, 0.0),
            aircraft("high", 40.0, -74.0, 10_000.0),
        ];

        let from_ground = find_nearest(&target, 0.0, &candidates).expect("nearest");
        assert_eq!(from_ground.aircraft.icao24, "low");

        let from_cruise = find_nearest(&target, 9_500.0, &candidates).expect("nearest");
        assert_eq!(from_cruise.aircraft.icao24, "high");
        assert!((from_cruise.distance_m - 500.0).abs() < 1e-9);
    }

    #[test]
    fn missing_altitude_does_not_fail() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        let mut record = aircraft("noalt", 40.0, -74.0, 0.0);
        record.position.altitude_m = None;
        let candidates = vec![record];

        let nearest = find_nearest(&target, 120.0, &candidates).expect("nearest");
        assert!((nearest.distance_m - 120.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_with_aircraft_inline() {
        let target = GeoPoint::new(40.0, -74.0).unwrap();
        let candidates = vec![aircraft("abc123", 40.0, -74.0, 800.0)];
        let nearest = find_nearest(&target, 0.0, &candidates).expect("nearest");

        let json = serde_json::to_value(nearest).unwrap();
        assert_eq!(json["aircraft"]["icao24"], "abc123");
        assert_eq!(json["distance_m"], 800.0);
    }
}
