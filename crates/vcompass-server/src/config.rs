//! Server configuration from environment.

use std::env;
use std::time::Duration;

use vcompass_opensky::{OpenSkyConfig, DEFAULT_BASE_URL};

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:5173",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub opensky_url: String,
    /// Radius of the area queried around the caller
    pub search_radius_km: f64,
    pub upstream_timeout_s: u64,
    pub upstream_max_attempts: u32,
    /// Browser origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("VCOMPASS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            opensky_url: env::var("VCOMPASS_OPENSKY_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            // 111 km is one degree of latitude either side of the caller
            search_radius_km: env::var("VCOMPASS_SEARCH_RADIUS_KM")
                .ok()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r > 0.0)
                .unwrap_or(111.0),
            upstream_timeout_s: env::var("VCOMPASS_UPSTREAM_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            upstream_max_attempts: env::var("VCOMPASS_UPSTREAM_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            cors_origins: env::var("VCOMPASS_CORS_ORIGINS")
                .ok()
                .map(|raw| parse_origins(&raw))
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(|| {
                    DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
                }),
        }
    }

    pub fn opensky(&self) -> OpenSkyConfig {
        OpenSkyConfig {
            base_url: self.opensky_url.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_s.max(1)),
            max_attempts: self.upstream_max_attempts,
            ..OpenSkyConfig::default()
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
