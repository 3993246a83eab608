//! Server configuration from a TOML file and environment variables.
//!
//! Resolution order: built-in defaults, then the TOML file named by
//! `SKY_CONFIG` (if set), then individual environment variables.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ephemeris::EphemerisDataset;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
    /// Ephemeris dataset used for every computation
    pub ephemeris: EphemerisDataset,
    /// Origins echoed in CORS responses; empty echoes every origin
    pub cors_allowed_origins: Vec<String>,
    /// Directory served for paths the API does not handle
    pub static_dir: Option<PathBuf>,
    /// Largest accepted request body in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            ephemeris: EphemerisDataset::default(),
            cors_allowed_origins: Vec::new(),
            static_dir: None,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Defaults overlaid with environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 8080)
    /// - `EPHEMERIS`: `vsop87` or `de432s` (default: vsop87)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins (default: echo any)
    /// - `STATIC_DIR`: directory for the static fallback (default: none)
    /// - `BODY_LIMIT_BYTES` (default: 65536)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Read `SKY_CONFIG` if set, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var("SKY_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Apply any set environment variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.port = port.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                name: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Ok(dataset) = env::var("EPHEMERIS") {
            self.ephemeris = dataset.parse().map_err(|e: crate::ephemeris::EphemerisError| {
                ConfigError::InvalidVar {
                    name: "EPHEMERIS",
                    value: dataset.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") {
            self.cors_allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(dir) = env::var("STATIC_DIR") {
            self.static_dir = (!dir.trim().is_empty()).then(|| PathBuf::from(dir.trim()));
        }
        if let Ok(limit) = env::var("BODY_LIMIT_BYTES") {
            self.body_limit_bytes =
                limit.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                    name: "BODY_LIMIT_BYTES",
                    value: limit.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(self)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
                name: "HOST",
                value: self.host.clone(),
                reason: e.to_string(),
            })
    }
}
