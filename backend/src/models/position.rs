use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Local horizontal coordinates. Azimuth runs from north through east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoords {
    pub alt: Degrees,
    pub az: Degrees,
}

/// Single-instant result: horizontal coordinates plus angular radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApparentPosition {
    pub alt: Degrees,
    pub az: Degrees,
    pub radius: Degrees,
}

/// 24-hour sampled track. Entries never carry a radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySeries {
    pub series: Vec<HorizontalCoords>,
}

/// Whatever a position request produced, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SkyPosition {
    Point(ApparentPosition),
    Series(DaySeries),
}

/// Request time selector: one instant, or a day of samples starting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSpan {
    #[default]
    Instant,
    Day,
}

impl TimeSpan {
    /// Only the literal `"day"` selects series mode.
    pub fn from_request(value: Option<&str>) -> Self {
        match value {
            Some("day") => TimeSpan::Day,
            _ => TimeSpan::Instant,
        }
    }
}
