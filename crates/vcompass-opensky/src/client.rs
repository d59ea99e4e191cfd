//! OpenSky REST client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use vcompass_core::{AircraftRecord, BoundingBox};

use crate::backoff::Backoff;
use crate::error::{OpenSkyError, Result};
use crate::state_vector::{parse_states, StatesResponse};

pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org/api";

#[derive(Debug, Clone)]
pub struct OpenSkyConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Total tries per query, including the first one
    pub max_attempts: u32,
    pub retry_base: Duration,
    pub retry_max: Duration,
}

impl Default for OpenSkyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: 2,
            retry_base: Duration::from_millis(250),
            retry_max: Duration::from_secs(2),
        }
    }
}

/// Aircraft decoded from one `/states/all` answer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Upstream's timestamp for the state vectors
    pub time: Option<DateTime<Utc>>,
    pub aircraft: Vec<AircraftRecord>,
}

/// HTTP client for the OpenSky Network API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenSkyClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
    retry_base: Duration,
    retry_max: Duration,
}

impl OpenSkyClient {
    pub fn new(config: OpenSkyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OpenSkyError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_attempts: config.max_attempts.max(1),
            retry_base: config.retry_base,
            retry_max: config.retry_max,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode the airborne aircraft inside `bbox`.
    ///
    /// Rows reported outside the box are dropped.
    pub async fn aircraft_in(&self, bbox: &BoundingBox) -> Result<Snapshot> {
        let response = self.fetch_states(bbox).await?;
        let mut aircraft = parse_states(&response);
        let parsed = aircraft.len();
        aircraft.retain(|record| bbox.contains(&record.position));
        if aircraft.len() < parsed {
            tracing::debug!(
                outside = parsed - aircraft.len(),
                "dropped aircraft outside the query box"
            );
        }
        Ok(Snapshot {
            time: response.snapshot_time(),
            aircraft,
        })
    }

    /// Raw `/states/all` query, retried on transient failures.
    pub async fn fetch_states(&self, bbox: &BoundingBox) -> Result<StatesResponse> {
        let mut backoff = Backoff::new(self.retry_base, self.retry_max);
        let mut attempt = 1;

        loop {
            match self.fetch_once(bbox).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "OpenSky query failed, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, bbox: &BoundingBox) -> Result<StatesResponse> {
        let url = format!("{}/states/all", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&bbox.query_pairs()[..])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenSkyError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let states: StatesResponse = serde_json::from_slice(&body)?;
        tracing::debug!(
            rows = states.states.as_ref().map_or(0, Vec::len),
            "OpenSky states received"
        );
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use vcompass_core::{compute_bounding_box, GeoPoint};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String, max_attempts: u32) -> OpenSkyClient {
        OpenSkyClient::new(OpenSkyConfig {
            base_url,
            timeout: Duration::from_secs(2),
            max_attempts,
            retry_base: Duration::from_millis(1),
            retry_max: Duration::from_millis(5),
        })
        .unwrap()
    }

    fn bbox() -> BoundingBox {
        compute_bounding_box(&GeoPoint::new(40.0, -74.0).unwrap(), 111.0).unwrap()
    }

    #[tokio::test]
    async fn sends_bounding_box_and_decodes_states() {
        let router = Router::new().route(
            "/states/all",
            get(|Query(params): Query<HashMap<String, f64>>| async move {
                assert!((params["lamin"] - 39.0).abs() < 1e-9);
                assert!((params["lamax"] - 41.0).abs() < 1e-9);
                assert!(params["lomin"] < -75.0);
                assert!(params["lomax"] > -73.0);
                Json(json!({
                    "time": 1700000000,
                    "states": [
                        ["abc123", "DAL42   ", "United States", 0, 0, -74.1, 40.2, 5000.0, false, 200.0, 45.0],
                        ["def456", "", "United States", 0, 0, -74.0, 40.0, 0.0, true, 0.0, 0.0],
                        ["0f0f0f", "AFR7", "France", 0, 0, 2.35, 48.85, 9000.0, false, 230.0, 300.0]
                    ]
                }))
            }),
        );
        let client = client_for(spawn_stub(router).await, 1);

        let snapshot = client.aircraft_in(&bbox()).await.unwrap();
        assert_eq!(snapshot.aircraft.len(), 1);
        assert_eq!(snapshot.aircraft[0].callsign.as_deref(), Some("DAL42"));
        assert_eq!(snapshot.time.map(|t| t.timestamp()), Some(1700000000));
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/states/all",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::SERVICE_UNAVAILABLE, Json(Value::Null))
                    } else {
                        (StatusCode::OK, Json(json!({"time": 1, "states": null})))
                    }
                }
            }),
        );
        let client = client_for(spawn_stub(router).await, 3);

        let response = client.fetch_states(&bbox()).await.unwrap();
        assert!(response.states.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/states/all",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::BAD_GATEWAY }
            }),
        );
        let client = client_for(spawn_stub(router).await, 2);

        let err = client.fetch_states(&bbox()).await.unwrap_err();
        assert!(matches!(err, OpenSkyError::Status { status: 502 }));
        assert!(err.is_unavailable());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/states/all",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::BAD_REQUEST }
            }),
        );
        let client = client_for(spawn_stub(router).await, 3);

        assert!(client.fetch_states(&bbox()).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let router = Router::new().route("/states/all", get(|| async { "<html>maintenance</html>" }));
        let client = client_for(spawn_stub(router).await, 3);

        let err = client.fetch_states(&bbox()).await.unwrap_err();
        assert!(matches!(err, OpenSkyError::Decode(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/", addr), 2);
        let err = client.fetch_states(&bbox()).await.unwrap_err();
        assert!(matches!(err, OpenSkyError::Transport(_)));
        assert!(err.is_unavailable());
    }
}
