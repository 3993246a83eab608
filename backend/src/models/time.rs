use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Julian Date of the MJD origin (1858-11-17 00:00:00 UTC).
pub const MJD_EPOCH_JD: f64 = 2_400_000.5;

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_MJD: f64 = 40587.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT = TAI + 32.184 s.
const TT_MINUS_TAI_SECS: f64 = 32.184;

/// Leap-second table: (JD of insertion at 00:00 UTC, cumulative TAI−UTC after).
/// Source: IERS Bulletin C.
const LEAP_SECONDS: [(f64, f64); 28] = [
    (2_441_317.5, 10.0), // 1972-01-01
    (2_441_499.5, 11.0), // 1972-07-01
    (2_441_683.5, 12.0), // 1973-01-01
    (2_442_048.5, 13.0), // 1974-01-01
    (2_442_413.5, 14.0), // 1975-01-01
    (2_442_778.5, 15.0), // 1976-01-01
    (2_443_144.5, 16.0), // 1977-01-01
    (2_443_509.5, 17.0), // 1978-01-01
    (2_443_874.5, 18.0), // 1979-01-01
    (2_444_239.5, 19.0), // 1980-01-01
    (2_444_786.5, 20.0), // 1981-07-01
    (2_445_151.5, 21.0), // 1982-07-01
    (2_445_516.5, 22.0), // 1983-07-01
    (2_446_247.5, 23.0), // 1985-07-01
    (2_447_161.5, 24.0), // 1988-01-01
    (2_447_892.5, 25.0), // 1990-01-01
    (2_448_257.5, 26.0), // 1991-01-01
    (2_448_804.5, 27.0), // 1992-07-01
    (2_449_169.5, 28.0), // 1993-07-01
    (2_449_534.5, 29.0), // 1994-07-01
    (2_450_083.5, 30.0), // 1996-01-01
    (2_450_630.5, 31.0), // 1997-07-01
    (2_451_179.5, 32.0), // 1999-01-01
    (2_453_736.5, 33.0), // 2006-01-01
    (2_454_832.5, 34.0), // 2009-01-01
    (2_456_109.5, 35.0), // 2012-07-01
    (2_457_204.5, 36.0), // 2015-07-01
    (2_457_754.5, 37.0), // 2017-01-01
];

/// Naive layouts accepted in addition to RFC 3339. Naive values are UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Days since 1858-11-17 00:00 UTC, on the UTC axis.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(pub qtty::Days);

impl ModifiedJulianDate {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let unix_days = dt.timestamp() as f64 / SECONDS_PER_DAY
            + f64::from(dt.timestamp_subsec_nanos()) / 1e9 / SECONDS_PER_DAY;
        Self(qtty::Days::new(UNIX_EPOCH_MJD + unix_days))
    }

    pub fn julian_day(&self) -> f64 {
        self.0.value() + MJD_EPOCH_JD
    }
}

/// Cumulative TAI−UTC in seconds for a JD on the UTC axis.
///
/// Before 1972 the initial offset of 10 s is returned.
pub fn tai_minus_utc(jd_utc: f64) -> f64 {
    let idx = LEAP_SECONDS.partition_point(|(jd, _)| *jd <= jd_utc);
    if idx == 0 {
        10.0
    } else {
        LEAP_SECONDS[idx - 1].1
    }
}

/// Error returned when a request timestamp cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("timestamp is empty")]
    Empty,
    #[error("unrecognized timestamp '{0}', expected ISO-8601 such as '2025-09-22 23:22'")]
    Unrecognized(String),
}

/// A UTC instant supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts RFC 3339 (with offset or `Z`), `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]`
    /// and a bare `YYYY-MM-DD` (midnight). Values without an offset are UTC.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(TimeParseError::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| TimeParseError::Unrecognized(s.to_string()))
    }

    /// The instant `seconds` later (or earlier, if negative).
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        Self(self.0 + chrono::Duration::seconds(seconds))
    }

    /// Seconds from `self` to `other`.
    pub fn seconds_until(&self, other: &Timestamp) -> i64 {
        (other.0 - self.0).num_seconds()
    }

    pub fn mjd(&self) -> ModifiedJulianDate {
        ModifiedJulianDate::from_datetime(self.0)
    }

    /// Julian Date on the UTC axis (used as UT1 for sidereal time).
    pub fn julian_day_utc(&self) -> f64 {
        self.mjd().julian_day()
    }

    /// Julian Ephemeris Day (Terrestrial Time): JD(UTC) + (TAI−UTC + 32.184 s).
    pub fn julian_day_tt(&self) -> f64 {
        let jd_utc = self.julian_day_utc();
        jd_utc + (tai_minus_utc(jd_utc) + TT_MINUS_TAI_SECS) / SECONDS_PER_DAY
    }
}

impl FromStr for Timestamp {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
