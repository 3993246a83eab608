//! Analytic ephemeris built on the `astro` crate.
//!
//! Planets come from the VSOP87 heliocentric series with a light-time
//! iteration, the Moon from the truncated ELP-2000/82 theory, the Sun from
//! the negated heliocentric Earth vector. Geocentric ecliptic coordinates are
//! corrected for nutation, rotated to the true equator of date, and shifted
//! from the geocenter to the observer so that lunar parallax is honoured.
//!
//! Positional accuracy is a few arcseconds for the planets and roughly ten
//! arcseconds for the Moon over the current century, comparable to a
//! short-span JPL kernel for the purpose of pointing and rise/set plots.

use astro::coords::{asc_frm_ecl, dec_frm_ecl};
use astro::ecliptic::mn_oblq_IAU;
use astro::lunar;
use astro::nutation::nutation;
use astro::planet::{self, Planet};
use qtty::{Kilometers, Radians};
use tracing::trace;

use super::horizon::local_sidereal_time;
use super::{Ephemeris, EphemerisDataset, EphemerisError, TopocentricPosition};
use crate::models::{ObserverLocation, TargetBody, Timestamp};

/// Astronomical unit in kilometers (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Light travel time across one AU, in days.
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Constant of aberration applied to the Sun, in radians (20.4898").
const SOLAR_ABERRATION_RAD: f64 = 20.4898 / 3600.0 * std::f64::consts::PI / 180.0;

/// Geocentric ecliptic coordinates of date (radians, km).
#[derive(Debug, Clone, Copy)]
struct GeocentricEcliptic {
    longitude: f64,
    latitude: f64,
    distance_km: f64,
}

/// Ephemeris backed by analytic series; holds no mutable state.
#[derive(Debug, Clone)]
pub struct AnalyticEphemeris {
    dataset: EphemerisDataset,
}

impl AnalyticEphemeris {
    pub fn new(dataset: EphemerisDataset) -> Self {
        Self { dataset }
    }

    fn geocentric_ecliptic(&self, body: TargetBody, jde: f64) -> Option<GeocentricEcliptic> {
        match body {
            TargetBody::Earth => None,
            TargetBody::Moon => {
                let (point, distance_km) = lunar::geocent_ecl_pos(jde);
                Some(GeocentricEcliptic {
                    longitude: point.long,
                    latitude: point.lat,
                    distance_km,
                })
            }
            TargetBody::Sun => {
                let earth = heliocentric_xyz(&Planet::Earth, jde);
                let mut sun = from_xyz([-earth[0], -earth[1], -earth[2]]);
                sun.longitude -= SOLAR_ABERRATION_RAD / (sun.distance_km / AU_KM);
                Some(sun)
            }
            TargetBody::Mercury => Some(planet_geocentric(&Planet::Mercury, jde)),
            TargetBody::Venus => Some(planet_geocentric(&Planet::Venus, jde)),
            TargetBody::Mars => Some(planet_geocentric(&Planet::Mars, jde)),
            TargetBody::Jupiter => Some(planet_geocentric(&Planet::Jupiter, jde)),
            TargetBody::Saturn => Some(planet_geocentric(&Planet::Saturn, jde)),
            TargetBody::Uranus => Some(planet_geocentric(&Planet::Uranus, jde)),
            TargetBody::Neptune => Some(planet_geocentric(&Planet::Neptune, jde)),
        }
    }
}

impl Default for AnalyticEphemeris {
    fn default() -> Self {
        Self::new(EphemerisDataset::Vsop87)
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn dataset(&self) -> EphemerisDataset {
        self.dataset
    }

    fn topocentric(
        &self,
        body: TargetBody,
        location: &ObserverLocation,
        time: &Timestamp,
    ) -> Result<TopocentricPosition, EphemerisError> {
        let jde = time.julian_day_tt();

        let geocentric = match self.geocentric_ecliptic(body, jde) {
            Some(ecl) => {
                let (nut_in_long, nut_in_oblq) = nutation(jde);
                let true_oblq = mn_oblq_IAU(jde) + nut_in_oblq;
                let longitude = ecl.longitude + nut_in_long;

                let ra = asc_frm_ecl(longitude, ecl.latitude, true_oblq);
                let dec = dec_frm_ecl(longitude, ecl.latitude, true_oblq);
                spherical_to_xyz(ra, dec, ecl.distance_km)
            }
            // The observer looks at the geocenter.
            None => [0.0; 3],
        };

        let observer = location.geocentric_km(local_sidereal_time(location, time));
        let topo = [
            geocentric[0] - observer[0],
            geocentric[1] - observer[1],
            geocentric[2] - observer[2],
        ];

        let distance_km = norm(&topo);
        let right_ascension = topo[1].atan2(topo[0]);
        let declination = (topo[2] / distance_km).asin();

        for (quantity, value) in [
            ("right ascension", right_ascension),
            ("declination", declination),
            ("distance", distance_km),
        ] {
            if !value.is_finite() {
                return Err(EphemerisError::NonFinite {
                    body,
                    quantity,
                    time: time.to_string(),
                });
            }
        }

        trace!(
            body = %body,
            ra_deg = right_ascension.to_degrees(),
            dec_deg = declination.to_degrees(),
            distance_km,
            "topocentric position"
        );

        Ok(TopocentricPosition {
            right_ascension: Radians::new(right_ascension),
            declination: Radians::new(declination),
            distance: Kilometers::new(distance_km),
        })
    }
}

/// Heliocentric ecliptic rectangular coordinates of date, in AU.
fn heliocentric_xyz(planet: &Planet, jde: f64) -> [f64; 3] {
    let (long, lat, rad_vec) = planet::heliocent_coords(planet, jde);
    spherical_to_xyz(long, lat, rad_vec)
}

/// Geocentric position of a planet, corrected for light time.
fn planet_geocentric(planet: &Planet, jde: f64) -> GeocentricEcliptic {
    let earth = heliocentric_xyz(&Planet::Earth, jde);

    let relative_at = |t: f64| {
        let body = heliocentric_xyz(planet, t);
        [body[0] - earth[0], body[1] - earth[1], body[2] - earth[2]]
    };

    // Two light-time passes converge well below the series precision.
    let mut relative = relative_at(jde);
    for _ in 0..2 {
        relative = relative_at(jde - LIGHT_DAYS_PER_AU * norm(&relative));
    }

    from_xyz(relative)
}

fn from_xyz(v_au: [f64; 3]) -> GeocentricEcliptic {
    let distance_au = norm(&v_au);
    GeocentricEcliptic {
        longitude: v_au[1].atan2(v_au[0]),
        latitude: v_au[2].atan2(v_au[0].hypot(v_au[1])),
        distance_km: distance_au * AU_KM,
    }
}

fn spherical_to_xyz(lon: f64, lat: f64, r: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    [r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat]
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::to_horizontal;

    fn greenwich() -> ObserverLocation {
        ObserverLocation::new(51.4769, 0.0).unwrap()
    }

    fn at(ts: &str) -> Timestamp {
        Timestamp::parse(ts).unwrap()
    }

    #[test]
    fn test_moon_distance_within_orbit_bounds() {
        let eph = AnalyticEphemeris::default();
        for day in ["2025-01-10 00:00", "2025-04-03 06:00", "2025-09-22 23:22"] {
            let pos = eph.topocentric(TargetBody::Moon, &greenwich(), &at(day)).unwrap();
            let d = pos.distance.value();
            assert!(d > 345_000.0 && d < 415_000.0, "moon distance {} on {}", d, day);
        }
    }

    #[test]
    fn test_sun_distance_near_one_au() {
        let eph = AnalyticEphemeris::default();
        let pos = eph
            .topocentric(TargetBody::Sun, &greenwich(), &at("2025-07-04 12:00"))
            .unwrap();
        let au = pos.distance.value() / AU_KM;
        // Aphelion is early July
        assert!((au - 1.0167).abs() < 0.001, "sun distance {} AU", au);
    }

    #[test]
    fn test_sun_high_at_summer_noon_and_below_horizon_at_midnight() {
        let eph = AnalyticEphemeris::default();
        let loc = greenwich();

        let noon = at("2025-06-21 12:00");
        let hz = to_horizontal(&eph.topocentric(TargetBody::Sun, &loc, &noon).unwrap(), &loc, &noon);
        // 90 - 51.48 + 23.44
        assert!((hz.alt.value() - 61.96).abs() < 0.5, "noon alt {}", hz.alt.value());
        assert!((hz.az.value() - 180.0).abs() < 3.0, "noon az {}", hz.az.value());

        let midnight = at("2025-06-21 00:00");
        let hz = to_horizontal(
            &eph.topocentric(TargetBody::Sun, &loc, &midnight).unwrap(),
            &loc,
            &midnight,
        );
        assert!(hz.alt.value() < -10.0, "midnight alt {}", hz.alt.value());
    }

    #[test]
    fn test_sun_declination_at_solstice() {
        let eph = AnalyticEphemeris::default();
        let pos = eph
            .topocentric(TargetBody::Sun, &greenwich(), &at("2025-06-21 02:42"))
            .unwrap();
        assert!((pos.declination.value().to_degrees() - 23.44).abs() < 0.05);
    }

    #[test]
    fn test_planet_distances_are_plausible() {
        let eph = AnalyticEphemeris::default();
        let time = at("2025-09-22 23:22");
        let bounds = [
            (TargetBody::Mercury, 0.5, 1.5),
            (TargetBody::Venus, 0.25, 1.75),
            (TargetBody::Mars, 0.35, 2.7),
            (TargetBody::Jupiter, 3.9, 6.5),
            (TargetBody::Saturn, 8.0, 11.1),
            (TargetBody::Uranus, 17.2, 21.2),
            (TargetBody::Neptune, 28.7, 31.4),
        ];
        for (body, min_au, max_au) in bounds {
            let au = eph.topocentric(body, &greenwich(), &time).unwrap().distance.value() / AU_KM;
            assert!(au > min_au && au < max_au, "{} at {} AU", body, au);
        }
    }

    #[test]
    fn test_earth_is_straight_down() {
        let eph = AnalyticEphemeris::default();
        let loc = greenwich();
        let time = at("2025-09-22 23:22");
        let pos = eph.topocentric(TargetBody::Earth, &loc, &time).unwrap();
        assert!((pos.distance.value() - 6365.0).abs() < 10.0);

        let hz = to_horizontal(&pos, &loc, &time);
        assert!((hz.alt.value() + 90.0).abs() < 0.5, "earth alt {}", hz.alt.value());
    }

    #[test]
    fn test_lunar_parallax_shifts_declination() {
        let eph = AnalyticEphemeris::default();
        let time = at("2025-09-22 23:22");
        let north = eph
            .topocentric(TargetBody::Moon, &ObserverLocation::new(60.0, 0.0).unwrap(), &time)
            .unwrap();
        let south = eph
            .topocentric(TargetBody::Moon, &ObserverLocation::new(-60.0, 0.0).unwrap(), &time)
            .unwrap();
        let shift = (north.declination.value() - south.declination.value()).to_degrees().abs();
        assert!(shift > 0.5 && shift < 2.0, "parallax shift {}", shift);
    }

    #[test]
    fn test_deterministic() {
        let eph = AnalyticEphemeris::default();
        let time = at("2024-02-29 18:45:30");
        let a = eph.topocentric(TargetBody::Saturn, &greenwich(), &time).unwrap();
        let b = eph.topocentric(TargetBody::Saturn, &greenwich(), &time).unwrap();
        assert_eq!(a, b);
    }
}
