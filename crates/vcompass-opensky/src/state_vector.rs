//! OpenSky state-vector decoding.
//!
//! `/states/all` answers with `{"time": <unix secs>, "states": [[...], ...]}`
//! where each row is a positional array. Only the columns listed below are
//! read; rows missing a position or altitude, or reported on the ground,
//! are dropped.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use vcompass_core::{AircraftRecord, GeoPoint};

const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const ORIGIN_COUNTRY: usize = 2;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
/// Barometric altitude in meters
const BARO_ALTITUDE: usize = 7;
const ON_GROUND: usize = 8;
/// Ground speed in meters/second
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatesResponse {
    #[serde(default)]
    pub time: Option<i64>,
    /// `null` when nothing is in the box
    #[serde(default)]
    pub states: Option<Vec<Vec<Value>>>,
}

impl StatesResponse {
    pub fn snapshot_time(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Decode every usable airborne aircraft in the response.
pub fn parse_states(response: &StatesResponse) -> Vec<AircraftRecord> {
    let Some(rows) = response.states.as_ref() else {
        return Vec::new();
    };

    let aircraft: Vec<AircraftRecord> = rows.iter().filter_map(|row| parse_state(row)).collect();
    let dropped = rows.len() - aircraft.len();
    if dropped > 0 {
        tracing::debug!(kept = aircraft.len(), dropped, "filtered OpenSky state vectors");
    }
    aircraft
}

/// Decode one state-vector row.
pub fn parse_state(row: &[Value]) -> Option<AircraftRecord> {
    let icao24 = row
        .get(ICAO24)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())?;

    if row.get(ON_GROUND).and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let lat = number(row, LATITUDE)?;
    let lon = number(row, LONGITUDE)?;
    let altitude_m = number(row, BARO_ALTITUDE)?;
    let position = GeoPoint::with_altitude(lat, lon, altitude_m).ok()?;

    let mut record = AircraftRecord::new(icao24, position)
        .with_callsign(row.get(CALLSIGN).and_then(Value::as_str))
        .with_ground_speed(number(row, VELOCITY));
    record.origin_country = row
        .get(ORIGIN_COUNTRY)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    record.true_track_deg = number(row, TRUE_TRACK);
    Some(record)
}

fn number(row: &[Value], index: usize) -> Option<f64> {
    row.get(index)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}
