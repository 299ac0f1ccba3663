use crate::{
    coord::LatLng,
    interval::{R1Interval, S1Interval},
};
use std::f64::consts::FRAC_PI_2;

/// A rectangle in latitude-longitude space: a latitude interval crossed
/// with a (possibly wrapping) longitude interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngRect {
    lat: R1Interval,
    lng: S1Interval,
}

impl LatLngRect {
    /// The canonical empty rectangle.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lat: R1Interval::EMPTY,
            lng: S1Interval::EMPTY,
        }
    }

    /// The rectangle covering the whole sphere.
    #[must_use]
    pub fn full() -> Self {
        Self {
            lat: R1Interval::new(-FRAC_PI_2, FRAC_PI_2),
            lng: S1Interval::FULL,
        }
    }

    pub(crate) const fn from_intervals(lat: R1Interval, lng: S1Interval) -> Self {
        Self { lat, lng }
    }

    /// Returns true if the rectangle contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// Returns true if the rectangle covers the whole sphere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lat == R1Interval::new(-FRAC_PI_2, FRAC_PI_2)
            && self.lng.is_full()
    }

    /// The low corner of the rectangle.
    #[must_use]
    pub fn lo(&self) -> LatLng {
        LatLng::from_degrees(
            self.lat.lo.to_degrees(),
            self.lng.lo.to_degrees(),
        )
    }

    /// The high corner of the rectangle.
    #[must_use]
    pub fn hi(&self) -> LatLng {
        LatLng::from_degrees(
            self.lat.hi.to_degrees(),
            self.lng.hi.to_degrees(),
        )
    }

    /// Returns true if the rectangle contains the given coordinate (which
    /// must be normalized).
    #[must_use]
    pub fn contains(&self, ll: LatLng) -> bool {
        self.lat.contains(ll.lat_radians())
            && self.lng.contains(ll.lng_radians())
    }

    /// The minimal rectangle additionally containing the given coordinate.
    #[must_use]
    pub fn add_point(&self, ll: LatLng) -> Self {
        Self {
            lat: self.lat.add_point(ll.lat_radians()),
            lng: self.lng.add_point(ll.lng_radians()),
        }
    }

    /// The smallest rectangle containing the union of the two rectangles.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            lat: self.lat.union(other.lat),
            lng: self.lng.union(other.lng),
        }
    }

    /// The rectangle grown by the given margins (non-negative), in
    /// latitude and longitude directions respectively.
    #[must_use]
    pub fn expanded(&self, margin: LatLng) -> Self {
        debug_assert!(margin.lat_radians() >= 0.);
        debug_assert!(margin.lng_radians() >= 0.);
        if self.is_empty() {
            return *self;
        }
        let lat = self
            .lat
            .expanded(margin.lat_radians())
            .intersection(R1Interval::new(-FRAC_PI_2, FRAC_PI_2));
        let lng = self.lng.expanded(margin.lng_radians());
        Self { lat, lng }
    }

    /// The rectangle with full longitude span whenever it touches a pole.
    ///
    /// All longitudes coincide at the poles, so any rectangle containing a
    /// pole must contain it at every longitude.
    #[must_use]
    pub fn polar_closure(&self) -> Self {
        if self.lat.lo == -FRAC_PI_2 || self.lat.hi == FRAC_PI_2 {
            return Self {
                lat: self.lat,
                lng: S1Interval::FULL,
            };
        }
        *self
    }

    /// Returns true if the rectangles have any point in common.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.lat.intersects(other.lat) && self.lng.intersects(other.lng)
    }
}

impl Default for LatLngRect {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "./latlng_rect_tests.rs"]
mod tests;
