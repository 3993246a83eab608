//! Service layer for business logic.
//!
//! Services sit between the HTTP handlers and the ephemeris. They validate
//! request values, pick the computation mode and assemble results.

pub mod sky_position;

pub use sky_position::{
    compute_position, warm_up, PositionError, PositionRequest, SERIES_SAMPLES,
    SERIES_STEP_SECONDS,
};
