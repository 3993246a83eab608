use std::f64::consts::PI;

use astro::angle::limit_to_two_PI;
use astro::coords::{alt_frm_eq, az_frm_eq};
use astro::ecliptic::mn_oblq_IAU;
use astro::nutation::nutation;
use astro::time::mn_sidr;
use qtty::Degrees;

use super::TopocentricPosition;
use crate::models::{HorizontalCoords, ObserverLocation, Timestamp};

/// Greenwich apparent sidereal time in radians, 0..2π.
///
/// Mean sidereal time from JD(UTC) plus the equation of the equinoxes.
pub fn apparent_sidereal_time(time: &Timestamp) -> f64 {
    let jde = time.julian_day_tt();
    let (nut_in_long, nut_in_oblq) = nutation(jde);
    let true_oblq = mn_oblq_IAU(jde) + nut_in_oblq;

    limit_to_two_PI(mn_sidr(time.julian_day_utc()) + nut_in_long * true_oblq.cos())
}

/// Local apparent sidereal time in radians, 0..2π.
pub fn local_sidereal_time(location: &ObserverLocation, time: &Timestamp) -> f64 {
    limit_to_two_PI(apparent_sidereal_time(time) + location.longitude_rad())
}

/// Transform a topocentric equatorial position into altitude/azimuth.
///
/// No refraction is applied. Azimuth is clockwise from north, 0..360.
pub fn to_horizontal(
    position: &TopocentricPosition,
    location: &ObserverLocation,
    time: &Timestamp,
) -> HorizontalCoords {
    let ra = position.right_ascension.value();
    let dec = position.declination.value();
    let lat = location.latitude_rad();

    let hour_angle = local_sidereal_time(location, time) - ra;

    // Meeus measures azimuth westward from south.
    let meeus_az = az_frm_eq(hour_angle, dec, lat);
    let az = limit_to_two_PI(meeus_az + PI);

    HorizontalCoords {
        alt: Degrees::new(alt_frm_eq(hour_angle, dec, lat).to_degrees()),
        az: Degrees::new(az.to_degrees()),
    }
}
