//! Aircraft lookup endpoints.
//!
//! Both endpoints query OpenSky for a box around the caller sized by the
//! configured search radius. `/api/planes` returns every airborne aircraft
//! in that box; `/api/planes/nearest` returns the closest one by combined
//! ground and altitude distance.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use vcompass_core::{
    check_altitude, compute_bounding_box, find_nearest, rank_by_distance, AircraftRecord, GeoPoint,
};
use vcompass_opensky::Snapshot;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanesQuery {
    /// Caller latitude
    pub lat: f64,
    /// Caller longitude
    pub lon: f64,
    /// Order planes closest first and include their distance
    #[serde(default)]
    pub sort: bool,
}

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,
    /// Caller altitude in meters, sea level when omitted
    pub alt: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PlaneView {
    pub icao24: String,
    pub callsign: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: f64,
    pub velocity_ms: Option<f64>,
    pub origin_country: Option<String>,
    pub true_track_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<&AircraftRecord> for PlaneView {
    fn from(aircraft: &AircraftRecord) -> Self {
        Self {
            icao24: aircraft.icao24.clone(),
            callsign: aircraft.callsign.clone(),
            lat: aircraft.position.lat,
            lon: aircraft.position.lon,
            altitude_m: aircraft.position.altitude_or_zero(),
            velocity_ms: aircraft.ground_speed_mps,
            origin_country: aircraft.origin_country.clone(),
            true_track_deg: aircraft.true_track_deg,
            distance_km: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanesResponse {
    pub planes: Vec<PlaneView>,
    /// OpenSky's timestamp for the snapshot
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub plane: PlaneView,
    pub distance_km: f64,
}

/// List every airborne aircraft around the caller.
pub async fn list_planes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlanesQuery>,
) -> Result<Json<PlanesResponse>, ApiError> {
    let center = GeoPoint::new(query.lat, query.lon)?;
    let snapshot = fetch_around(&state, &center).await?;

    let planes = if query.sort {
        rank_by_distance(&center, 0.0, &snapshot.aircraft)
            .into_iter()
            .map(|ranked| PlaneView {
                distance_km: Some(meters_to_display_km(ranked.distance_m)),
                ..PlaneView::from(ranked.aircraft)
            })
            .collect()
    } else {
        snapshot.aircraft.iter().map(PlaneView::from).collect()
    };

    Ok(Json(PlanesResponse {
        planes,
        time: snapshot.time,
    }))
}

/// The single aircraft closest to the caller, or 204 when the sky is empty.
pub async fn nearest_plane(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearestQuery>,
) -> Result<Response, ApiError> {
    let center = GeoPoint::new(query.lat, query.lon)?;
    let altitude_m = check_altitude("alt", query.alt.unwrap_or(0.0))?;

    let snapshot = fetch_around(&state, &center).await?;
    let Some(nearest) = find_nearest(&center, altitude_m, &snapshot.aircraft) else {
        tracing::debug!("No aircraft around {:.4},{:.4}", center.lat, center.lon);
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    tracing::debug!(
        icao24 = %nearest.aircraft.icao24,
        distance_m = nearest.distance_m,
        candidates = snapshot.aircraft.len(),
        "Nearest aircraft resolved"
    );

    Ok(Json(NearestResponse {
        plane: PlaneView::from(nearest.aircraft),
        distance_km: meters_to_display_km(nearest.distance_m),
    })
    .into_response())
}

async fn fetch_around(state: &AppState, center: &GeoPoint) -> Result<Snapshot, ApiError> {
    let bbox = compute_bounding_box(center, state.config().search_radius_km)?;
    tracing::debug!(
        lat_span_deg = bbox.lat_span(),
        lon_span_deg = bbox.lon_span(),
        "Querying OpenSky around {:.4},{:.4}",
        center.lat,
        center.lon
    );
    let snapshot = state.opensky().aircraft_in(&bbox).await?;
    Ok(snapshot)
}

/// Kilometers rounded to one decimal place.
fn meters_to_display_km(meters: f64) -> f64 {
    (meters / 100.0).round() / 10.0
}
