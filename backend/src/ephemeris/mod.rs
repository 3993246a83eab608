//! Ephemeris capability: where a body is, as seen from a place on Earth.
//!
//! The dataset is chosen explicitly when an [`Ephemeris`] is built and is
//! carried by that instance. Nothing in here is process-global, so two
//! ephemerides configured differently can serve side by side.
//!
//! - [`analytic`]: VSOP87 planets and ELP-2000/82 Moon through the `astro` crate
//! - [`horizon`]: sidereal time and the equatorial → horizontal transform

pub mod analytic;
pub mod horizon;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use qtty::{Kilometers, Radians};
use serde::{Deserialize, Serialize};

use crate::models::{ObserverLocation, TargetBody, Timestamp};

pub use analytic::AnalyticEphemeris;
pub use horizon::{apparent_sidereal_time, to_horizontal};

/// Named ephemeris dataset.
///
/// `de432s` and `analytic` are accepted as aliases of `vsop87`: configuring
/// `de432s` computes with the analytic series, and `/health` reports
/// `vsop87`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum EphemerisDataset {
    /// Truncated VSOP87 planetary theory with ELP-2000/82 for the Moon.
    #[default]
    Vsop87,
}

impl EphemerisDataset {
    pub fn label(&self) -> &'static str {
        match self {
            EphemerisDataset::Vsop87 => "vsop87",
        }
    }
}

impl FromStr for EphemerisDataset {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // de432s is the reduced-precision choice the service was first
            // deployed with; the analytic series fill the same role.
            "vsop87" | "analytic" | "de432s" => Ok(EphemerisDataset::Vsop87),
            other => Err(EphemerisError::UnknownDataset(other.to_string())),
        }
    }
}

impl TryFrom<String> for EphemerisDataset {
    type Error = EphemerisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EphemerisDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EphemerisError {
    #[error("unknown ephemeris dataset '{0}' (expected vsop87 or de432s)")]
    UnknownDataset(String),
    #[error("ephemeris produced a non-finite {quantity} for {body} at {time}")]
    NonFinite {
        body: TargetBody,
        quantity: &'static str,
        time: String,
    },
}

/// Apparent topocentric equatorial position (true equator and equinox of date).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricPosition {
    pub right_ascension: Radians,
    pub declination: Radians,
    /// Observer-to-body distance
    pub distance: Kilometers,
}

/// Resolves solar-system bodies for an observer at an instant.
pub trait Ephemeris: Send + Sync {
    /// Dataset this instance was built with.
    fn dataset(&self) -> EphemerisDataset;

    /// Apparent position of `body` as seen from `location` at `time`.
    fn topocentric(
        &self,
        body: TargetBody,
        location: &ObserverLocation,
        time: &Timestamp,
    ) -> Result<TopocentricPosition, EphemerisError>;
}

/// Build the ephemeris backing `dataset`.
pub fn for_dataset(dataset: EphemerisDataset) -> Arc<dyn Ephemeris> {
    match dataset {
        EphemerisDataset::Vsop87 => Arc::new(AnalyticEphemeris::new(dataset)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_str() {
        assert_eq!("vsop87".parse::<EphemerisDataset>().unwrap(), EphemerisDataset::Vsop87);
        assert_eq!("DE432S".parse::<EphemerisDataset>().unwrap(), EphemerisDataset::Vsop87);
        assert!(matches!(
            "de440".parse::<EphemerisDataset>(),
            Err(EphemerisError::UnknownDataset(_))
        ));
    }

    #[test]
    fn test_dataset_serde() {
        let parsed: EphemerisDataset = serde_json::from_str("\"de432s\"").unwrap();
        assert_eq!(parsed, EphemerisDataset::Vsop87);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"vsop87\"");
        assert!(serde_json::from_str::<EphemerisDataset>("\"bogus\"").is_err());
    }

    #[test]
    fn test_for_dataset_reports_its_dataset() {
        let eph = for_dataset(EphemerisDataset::Vsop87);
        assert_eq!(eph.dataset(), EphemerisDataset::Vsop87);
    }
}
