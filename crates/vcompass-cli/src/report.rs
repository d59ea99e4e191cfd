//! Human-readable lines for aircraft lookups.

use vcompass_core::AircraftRecord;

/// One line describing an aircraft, without distance.
pub fn describe(aircraft: &AircraftRecord) -> String {
    let callsign = aircraft.callsign.as_deref().unwrap_or("--------");
    let speed = aircraft
        .ground_speed_mps
        .map(|mps| format!("{:.0} m/s", mps))
        .unwrap_or_else(|| "? m/s".to_string());
    format!(
        "{:<8} {:<8} {:>9.4} {:>10.4} {:>7.0} m {:>8}",
        aircraft.icao24,
        callsign,
        aircraft.position.lat,
        aircraft.position.lon,
        aircraft.position.altitude_or_zero(),
        speed
    )
}

/// [`describe`] followed by the distance in kilometers, one decimal.
pub fn describe_with_distance(aircraft: &AircraftRecord, distance_m: f64) -> String {
    format!("{}  {:>7.1} km", describe(aircraft), distance_m / 1000.0)
}
