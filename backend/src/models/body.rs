use std::fmt;
use std::str::FromStr;

use qtty::Kilometers;
use serde::{Deserialize, Serialize};

/// A solar-system body that can be targeted by a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetBody {
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Sun,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target body '{0}'")]
pub struct UnknownBodyError(pub String);

impl TargetBody {
    pub const ALL: [TargetBody; 10] = [
        TargetBody::Mercury,
        TargetBody::Venus,
        TargetBody::Earth,
        TargetBody::Moon,
        TargetBody::Mars,
        TargetBody::Jupiter,
        TargetBody::Saturn,
        TargetBody::Uranus,
        TargetBody::Neptune,
        TargetBody::Sun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TargetBody::Mercury => "mercury",
            TargetBody::Venus => "venus",
            TargetBody::Earth => "earth",
            TargetBody::Moon => "moon",
            TargetBody::Mars => "mars",
            TargetBody::Jupiter => "jupiter",
            TargetBody::Saturn => "saturn",
            TargetBody::Uranus => "uranus",
            TargetBody::Neptune => "neptune",
            TargetBody::Sun => "sun",
        }
    }

    /// Mean physical radius used for the angular-size approximation.
    ///
    /// Earth has no entry: the observer stands on it.
    pub fn radius_km(&self) -> Option<Kilometers> {
        let km = match self {
            TargetBody::Mercury => 2439.7,
            TargetBody::Venus => 6051.8,
            TargetBody::Moon => 1737.4,
            TargetBody::Mars => 3389.5,
            TargetBody::Jupiter => 69911.0,
            TargetBody::Saturn => 58232.0,
            TargetBody::Uranus => 25362.0,
            TargetBody::Neptune => 24622.0,
            TargetBody::Sun => 696340.0,
            TargetBody::Earth => return None,
        };
        Some(Kilometers::new(km))
    }
}

impl FromStr for TargetBody {
    type Err = UnknownBodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TargetBody::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBodyError(s.to_string()))
    }
}

impl fmt::Display for TargetBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
