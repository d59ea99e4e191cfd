//! Mapping of core and upstream failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vcompass_core::GeoError;
use vcompass_opensky::OpenSkyError;

pub const UPSTREAM_UNAVAILABLE: &str = "Could not fetch data from OpenSky Network.";
pub const INTERNAL_ERROR: &str = "An internal server error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidInput(#[from] GeoError),
    #[error(transparent)]
    Upstream(#[from] OpenSkyError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Upstream(err) if err.is_unavailable() => {
                tracing::warn!("Error fetching from OpenSky Network: {}", err);
                (StatusCode::SERVICE_UNAVAILABLE, UPSTREAM_UNAVAILABLE.to_string())
            }
            ApiError::Upstream(err) => {
                tracing::error!("Unexpected upstream failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
