//! Application state for the HTTP server.

use std::sync::Arc;

use super::cors::CorsPolicy;
use crate::config::ServerConfig;
use crate::ephemeris::{self, Ephemeris};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ephemeris every request is computed against
    pub ephemeris: Arc<dyn Ephemeris>,
    /// Which origins get echoed back
    pub cors: Arc<CorsPolicy>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state with the given ephemeris.
    pub fn new(ephemeris: Arc<dyn Ephemeris>, config: ServerConfig) -> Self {
        Self {
            ephemeris,
            cors: Arc::new(CorsPolicy::from_origins(&config.cors_allowed_origins)),
            config: Arc::new(config),
        }
    }

    /// Build the ephemeris named in `config` and wrap it in state.
    pub fn from_config(config: ServerConfig) -> Self {
        let ephemeris = ephemeris::for_dataset(config.ephemeris);
        Self::new(ephemeris, config)
    }
}
