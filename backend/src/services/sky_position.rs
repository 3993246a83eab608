//! Sky-position computation: one instant, or a day of half-hour samples.
//!
//! Every call is a pure function of its inputs and the ephemeris passed in.

use qtty::{Degrees, Kilometers};
use tracing::{debug, info};

use crate::ephemeris::{to_horizontal, Ephemeris, EphemerisError};
use crate::models::{
    ApparentPosition, DaySeries, HorizontalCoords, LocationError, ObserverLocation, SkyPosition,
    TargetBody, TimeParseError, TimeSpan, Timestamp, UnknownBodyError,
};

/// Number of samples in a day series.
pub const SERIES_SAMPLES: usize = 48;

/// Spacing between day-series samples, in seconds.
pub const SERIES_STEP_SECONDS: i64 = 1800;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("invalid time: {0}")]
    InvalidTime(#[from] TimeParseError),
    #[error(transparent)]
    UnknownTarget(#[from] UnknownBodyError),
    #[error("invalid location: {0}")]
    InvalidLocation(#[from] LocationError),
    #[error("no physical radius is known for {0}, angular radius is undefined")]
    NoRadius(TargetBody),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// A validated position request.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRequest {
    pub location: ObserverLocation,
    pub target: TargetBody,
    pub time: Timestamp,
    pub span: TimeSpan,
}

impl PositionRequest {
    /// Validate raw request fields.
    pub fn parse(
        lat: f64,
        lon: f64,
        target: &str,
        time: &str,
        timespan: Option<&str>,
    ) -> Result<Self, PositionError> {
        Ok(Self {
            location: ObserverLocation::new(lat, lon)?,
            target: target.parse()?,
            time: Timestamp::parse(time)?,
            span: TimeSpan::from_request(timespan),
        })
    }
}

/// Compute the position requested.
pub fn compute_position(
    ephemeris: &dyn Ephemeris,
    request: &PositionRequest,
) -> Result<SkyPosition, PositionError> {
    debug!(
        target = %request.target,
        lat = request.location.latitude.value(),
        lon = request.location.longitude.value(),
        time = %request.time,
        dataset = %ephemeris.dataset(),
        "computing position"
    );

    match request.span {
        TimeSpan::Instant => {
            compute_point(ephemeris, request.target, &request.location, &request.time)
                .map(SkyPosition::Point)
        }
        TimeSpan::Day => {
            compute_series(ephemeris, request.target, &request.location, &request.time)
                .map(SkyPosition::Series)
        }
    }
}

/// Altitude, azimuth and angular radius at one instant.
pub fn compute_point(
    ephemeris: &dyn Ephemeris,
    target: TargetBody,
    location: &ObserverLocation,
    time: &Timestamp,
) -> Result<ApparentPosition, PositionError> {
    let body_radius = target.radius_km().ok_or(PositionError::NoRadius(target))?;

    let position = ephemeris.topocentric(target, location, time)?;
    let horizontal = to_horizontal(&position, location, time);

    Ok(ApparentPosition {
        alt: horizontal.alt,
        az: horizontal.az,
        radius: angular_radius(body_radius, position.distance),
    })
}

/// Altitude and azimuth every [`SERIES_STEP_SECONDS`] for [`SERIES_SAMPLES`] samples.
pub fn compute_series(
    ephemeris: &dyn Ephemeris,
    target: TargetBody,
    location: &ObserverLocation,
    start: &Timestamp,
) -> Result<DaySeries, PositionError> {
    let series = series_times(start)
        .map(|time| -> Result<HorizontalCoords, PositionError> {
            let position = ephemeris.topocentric(target, location, &time)?;
            Ok(to_horizontal(&position, location, &time))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DaySeries { series })
}

/// Sample instants of a day series, starting at `start`.
pub fn series_times(start: &Timestamp) -> impl Iterator<Item = Timestamp> + '_ {
    (0..SERIES_SAMPLES as i64).map(move |k| start.plus_seconds(k * SERIES_STEP_SECONDS))
}

/// Apparent angular radius: atan(radius / distance), in degrees.
pub fn angular_radius(body_radius: Kilometers, distance: Kilometers) -> Degrees {
    Degrees::new((body_radius.value() / distance.value()).atan().to_degrees())
}

/// Compute one known position so a broken ephemeris fails at startup
/// rather than on the first request.
pub fn warm_up(ephemeris: &dyn Ephemeris) -> Result<ApparentPosition, PositionError> {
    let request = PositionRequest::parse(51.4769, 0.0, "jupiter", "2025-09-22 23:22", None)?;
    let position = compute_point(ephemeris, request.target, &request.location, &request.time)?;

    info!(
        dataset = %ephemeris.dataset(),
        alt = position.alt.value(),
        az = position.az.value(),
        "ephemeris warm-up complete"
    );

    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{EphemerisDataset, TopocentricPosition};
    use qtty::Radians;

    /// Fixed-distance ephemeris that places every body on the celestial equator.
    struct FixedEphemeris {
        distance_km: f64,
    }

    impl Ephemeris for FixedEphemeris {
        fn dataset(&self) -> EphemerisDataset {
            EphemerisDataset::Vsop87
        }

        fn topocentric(
            &self,
            _body: TargetBody,
            _location: &ObserverLocation,
            _time: &Timestamp,
        ) -> Result<TopocentricPosition, EphemerisError> {
            Ok(TopocentricPosition {
                right_ascension: Radians::new(0.0),
                declination: Radians::new(0.0),
                distance: Kilometers::new(self.distance_km),
            })
        }
    }

    fn request(target: &str, span: Option<&str>) -> PositionRequest {
        PositionRequest::parse(51.48, 0.0, target, "2025-09-22 23:22", span).unwrap()
    }

    #[test]
    fn test_angular_radius_formula() {
        let r = angular_radius(Kilometers::new(58232.0), Kilometers::new(1.3e9));
        let expected = (58232.0_f64 / 1.3e9).atan() * 180.0 / std::f64::consts::PI;
        assert!((r.value() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_point_uses_radius_table() {
        let eph = FixedEphemeris { distance_km: 384_400.0 };
        let result = compute_position(&eph, &request("moon", None)).unwrap();
        match result {
            SkyPosition::Point(p) => {
                let expected = (1737.4_f64 / 384_400.0).atan().to_degrees();
                assert!((p.radius.value() - expected).abs() < 1e-12);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_day_series_has_48_entries() {
        let eph = FixedEphemeris { distance_km: 1.0e9 };
        let result = compute_position(&eph, &request("saturn", Some("day"))).unwrap();
        match result {
            SkyPosition::Series(s) => assert_eq!(s.series.len(), SERIES_SAMPLES),
            other => panic!("expected series, got {:?}", other),
        }
    }

    #[test]
    fn test_series_times_spacing() {
        let start = Timestamp::parse("2025-09-22 23:22").unwrap();
        let times: Vec<Timestamp> = series_times(&start).collect();
        assert_eq!(times.len(), 48);
        assert_eq!(times[0], start);
        for pair in times.windows(2) {
            assert_eq!(pair[0].seconds_until(&pair[1]), SERIES_STEP_SECONDS);
        }
        assert_eq!(start.seconds_until(&times[47]), 47 * 1800);
    }

    #[test]
    fn test_earth_point_has_no_radius() {
        let eph = FixedEphemeris { distance_km: 6371.0 };
        let err = compute_position(&eph, &request("earth", None)).unwrap_err();
        assert_eq!(err, PositionError::NoRadius(TargetBody::Earth));
    }

    #[test]
    fn test_earth_series_is_allowed() {
        let eph = FixedEphemeris { distance_km: 6371.0 };
        assert!(compute_position(&eph, &request("earth", Some("day"))).is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PositionRequest::parse(0.0, 0.0, "pluto", "2025-09-22", None),
            Err(PositionError::UnknownTarget(_))
        ));
        assert!(matches!(
            PositionRequest::parse(0.0, 0.0, "moon", "not a time", None),
            Err(PositionError::InvalidTime(_))
        ));
        assert!(matches!(
            PositionRequest::parse(123.0, 0.0, "moon", "2025-09-22", None),
            Err(PositionError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_warm_up_with_analytic_ephemeris() {
        let eph = crate::ephemeris::for_dataset(EphemerisDataset::Vsop87);
        let position = warm_up(eph.as_ref()).unwrap();
        assert!(position.radius.value() > 0.0);
        assert!((0.0..360.0).contains(&position.az.value()));
    }
}
