//! Shared, read-only application state.

use vcompass_opensky::{OpenSkyClient, OpenSkyError};

use crate::config::Config;

pub struct AppState {
    config: Config,
    opensky: OpenSkyClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, OpenSkyError> {
        let opensky = OpenSkyClient::new(config.opensky())?;
        Ok(Self { config, opensky })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn opensky(&self) -> &OpenSkyClient {
        &self.opensky
    }
}
