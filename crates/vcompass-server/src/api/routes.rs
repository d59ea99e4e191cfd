//! REST API routes.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::planes;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(status))
        .route("/health", get(|| async { "OK" }))
        .route("/api/planes", get(planes::list_planes))
        .route("/api/planes/nearest", get(planes::nearest_plane))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "V-Compass Backend is running" }))
}
