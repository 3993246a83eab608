use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// WGS-84 equatorial radius in kilometers.
pub const WGS84_EQUATORIAL_RADIUS_KM: f64 = 6378.137;

/// WGS-84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("latitude must be finite and within [-90, 90] degrees, got {0}")]
    Latitude(f64),
    #[error("longitude must be finite, got {0}")]
    Longitude(f64),
}

/// Geodetic observer position on the reference ellipsoid.
///
/// Height above the ellipsoid is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    /// Geodetic latitude, north positive
    pub latitude: Degrees,
    /// Longitude, east positive, wrapped into (-180, 180]
    pub longitude: Degrees,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::Latitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(LocationError::Longitude(longitude));
        }

        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(wrap_longitude(longitude)),
        })
    }

    pub fn height_m(&self) -> f64 {
        0.0
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude.value().to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude.value().to_radians()
    }

    /// Geocentric position of the observer in km, in the true equatorial frame
    /// of date, for the given local apparent sidereal time (radians).
    pub fn geocentric_km(&self, local_sidereal_time: f64) -> [f64; 3] {
        let phi = self.latitude_rad();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let b_over_a = 1.0 - WGS84_FLATTENING;

        let c = 1.0 / (cos_phi * cos_phi + b_over_a * b_over_a * sin_phi * sin_phi).sqrt();
        let s = b_over_a * b_over_a * c;

        let rho_cos = WGS84_EQUATORIAL_RADIUS_KM * c * cos_phi;
        let rho_sin = WGS84_EQUATORIAL_RADIUS_KM * s * sin_phi;

        [
            rho_cos * local_sidereal_time.cos(),
            rho_cos * local_sidereal_time.sin(),
            rho_sin,
        ]
    }
}

/// Wrap into (-180, 180]. In-range values are returned unchanged.
fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > -180.0 && longitude <= 180.0 {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}
