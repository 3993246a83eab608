//! # Sky Position Service
//!
//! Where is a solar-system body in an observer's sky? Given a latitude,
//! longitude, target body and UTC time, this crate computes the apparent
//! altitude, azimuth and angular radius of the body, or a 24-hour
//! altitude/azimuth series at half-hour steps. An axum server exposes the
//! computation as `POST /api/get-obj`.
//!
//! ## Architecture
//!
//! - [`models`]: observer locations, target bodies, timestamps and results
//! - [`ephemeris`]: the [`ephemeris::Ephemeris`] capability and its analytic backend
//! - [`services`]: request validation and point/series computation
//! - [`config`]: server settings from TOML and the environment
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use sky_position::ephemeris::{for_dataset, EphemerisDataset};
//! use sky_position::services::{compute_position, PositionRequest};
//!
//! let ephemeris = for_dataset(EphemerisDataset::Vsop87);
//! let request = PositionRequest::parse(51.48, 0.0, "moon", "2025-09-22 23:22", None).unwrap();
//! let position = compute_position(ephemeris.as_ref(), &request).unwrap();
//! # let _ = position;
//! ```

pub mod config;
pub mod ephemeris;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
