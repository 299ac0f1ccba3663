use crate::{error::InvalidArgument, Angle, Point};
use float_eq::float_eq;
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
};

/// Epsilon of ~0.1mm in degrees.
const EPSILON_DEG: f64 = 0.000000001;

/// Same as `EPSILON_DEG`, but in radians.
const EPSILON_RAD: f64 = EPSILON_DEG * PI / 180.0;

/// Latitude/longitude.
///
/// Note that the `Display` impl prints the values as degrees, while the
/// `Debug` impl prints both degrees and radians.
#[derive(Clone, Copy, Default)]
pub struct LatLng {
    /// Latitude, in radians.
    lat: f64,
    /// Longitude, in radians.
    lng: f64,
}

impl LatLng {
    /// Initializes a new coordinate from degrees.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] when one (or both) components is not a finite
    /// number.
    ///
    /// # Example
    ///
    /// ```
    /// let ll = s2o::LatLng::new(48.864716, 2.349014)?;
    ///
    /// assert!(s2o::LatLng::new(f64::NAN, 10.).is_err());
    /// # Ok::<(), s2o::error::InvalidArgument>(())
    /// ```
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidArgument> {
        Self::from_radians(lat.to_radians(), lng.to_radians())
    }

    /// Initializes a new coordinate from radians.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] when one (or both) components is not a finite
    /// number.
    pub fn from_radians(lat: f64, lng: f64) -> Result<Self, InvalidArgument> {
        if !lat.is_finite() {
            return Err(InvalidArgument::new("latitude must be finite"));
        }
        if !lng.is_finite() {
            return Err(InvalidArgument::new("longitude must be finite"));
        }

        Ok(Self { lat, lng })
    }

    /// Initializes a new coordinate from radian values known to be finite.
    pub(crate) const fn from_radians_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Initializes a new coordinate from degrees, without checking the
    /// values.
    ///
    /// Convenient for test fixtures and literals; the values must be finite.
    #[must_use]
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        Self {
            lat: lat.to_radians(),
            lng: lng.to_radians(),
        }
    }

    /// Latitude, in degrees.
    #[must_use]
    pub fn lat(self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude, in degrees.
    #[must_use]
    pub fn lng(self) -> f64 {
        self.lng.to_degrees()
    }

    /// Latitude, in radians.
    #[must_use]
    pub const fn lat_radians(self) -> f64 {
        self.lat
    }

    /// Longitude, in radians.
    #[must_use]
    pub const fn lng_radians(self) -> f64 {
        self.lng
    }

    /// Returns true if the latitude is in `[-π/2, π/2]` and the longitude
    /// in `[-π, π]`.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lat.abs() <= FRAC_PI_2 && self.lng.abs() <= PI
    }

    /// The coordinate with latitude clamped to `[-π/2, π/2]` and longitude
    /// wrapped to `(-π, π]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let lat = self.lat.clamp(-FRAC_PI_2, FRAC_PI_2);
        let mut lng = self.lng % crate::TWO_PI;
        if lng <= -PI {
            lng += crate::TWO_PI;
        } else if lng > PI {
            lng -= crate::TWO_PI;
        }
        Self { lat, lng }
    }

    /// The great circle distance between two coordinates.
    ///
    /// This function uses the Haversine formula.
    #[must_use]
    pub fn distance(self, other: Self) -> Angle {
        let sin_lat = ((other.lat - self.lat) / 2.).sin();
        let sin_lng = ((other.lng - self.lng) / 2.).sin();

        let a = sin_lat.mul_add(
            sin_lat,
            self.lat.cos() * other.lat.cos() * sin_lng * sin_lng,
        );

        Angle::from_radians(2. * a.sqrt().atan2((1. - a).sqrt()))
    }
}

impl From<Point> for LatLng {
    /// Computes the latitude and longitude of a point on the unit sphere.
    ///
    /// The result is valid (normalized) for any non-zero input vector.
    fn from(value: Point) -> Self {
        Self {
            lat: value.z.atan2(value.x.hypot(value.y)),
            lng: value.y.atan2(value.x),
        }
    }
}

impl PartialEq for LatLng {
    fn eq(&self, other: &Self) -> bool {
        float_eq!(self.lat, other.lat, abs <= EPSILON_RAD)
            && float_eq!(self.lng, other.lng, abs <= EPSILON_RAD)
    }
}

impl Eq for LatLng {}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // For display purpose, 10 decimals be more than enough.
        // See https://gis.stackexchange.com/a/8674
        write!(f, "({:.10}, {:.10})", self.lat(), self.lng())
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatLng")
            .field("lat_rad", &self.lat)
            .field("lat_deg", &self.lat())
            .field("lng_rad", &self.lng)
            .field("lng_deg", &self.lng())
            .finish()
    }
}

#[cfg(test)]
#[path = "./latlng_tests.rs"]
mod tests;
