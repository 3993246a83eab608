//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/get-obj`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetObjRequest {
    /// Observer latitude, degrees
    pub lat: f64,
    /// Observer longitude, degrees east
    pub lon: f64,
    /// Body name, case-insensitive
    pub target: String,
    /// UTC timestamp
    pub time: String,
    /// `"day"` selects the 24-hour series; anything else is a single point
    #[serde(default)]
    pub timespan: Option<serde_json::Value>,
}

impl GetObjRequest {
    /// The timespan as a string, if it was one.
    pub fn timespan_str(&self) -> Option<&str> {
        self.timespan.as_ref().and_then(|v| v.as_str())
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ephemeris: String,
}
