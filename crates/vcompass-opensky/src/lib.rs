//! OpenSky Network client.
//!
//! Queries the `/states/all` endpoint for a bounding box and turns the raw
//! state-vector rows into [`vcompass_core::AircraftRecord`] values.

pub mod backoff;
pub mod client;
pub mod error;
pub mod state_vector;

pub use client::{OpenSkyClient, OpenSkyConfig, Snapshot, DEFAULT_BASE_URL};
pub use error::{OpenSkyError, Result};
pub use state_vector::{parse_state, parse_states, StatesResponse};
