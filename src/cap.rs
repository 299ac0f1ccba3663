use crate::{ChordAngle, Point};

/// A spherical cap: the locus of points within a given chord distance of a
/// center.
///
/// Used as a cheap conservative bound around cells and shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cap {
    center: Point,
    radius: ChordAngle,
}

impl Cap {
    /// The cap containing no points.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            center: Point::new(1., 0., 0.),
            radius: ChordAngle::NEGATIVE,
        }
    }

    /// The cap containing the whole sphere.
    #[must_use]
    pub fn full() -> Self {
        Self {
            center: Point::new(1., 0., 0.),
            radius: ChordAngle::STRAIGHT,
        }
    }

    /// The cap containing the single given point.
    #[must_use]
    pub const fn from_point(center: Point) -> Self {
        Self {
            center,
            radius: ChordAngle::ZERO,
        }
    }

    /// The cap with the given center and radius.
    #[must_use]
    pub const fn new(center: Point, radius: ChordAngle) -> Self {
        Self { center, radius }
    }

    /// The center of the cap.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// The radius of the cap.
    #[must_use]
    pub const fn radius(&self) -> ChordAngle {
        self.radius
    }

    /// Returns true if the cap contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radius < ChordAngle::ZERO
    }

    /// Returns true if the cap contains the whole sphere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.radius == ChordAngle::STRAIGHT
    }

    /// Returns true if the cap contains the given point.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        ChordAngle::between_points(self.center, p) <= self.radius
    }

    /// The minimal cap additionally containing the given point.
    #[must_use]
    pub fn add_point(&self, p: Point) -> Self {
        if self.is_empty() {
            return Self::from_point(p);
        }
        // The radius grows to the chord distance, which is what the
        // containment test compares against.
        let distance = ChordAngle::between_points(self.center, p);
        Self {
            center: self.center,
            radius: self.radius.max(distance),
        }
    }

    /// Returns true if the two caps share any point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let between = ChordAngle::between_points(self.center, other.center);
        between <= (self.radius + other.radius).expanded(
            self.radius.max_point_error() + other.radius.max_point_error(),
        )
    }
}

#[cfg(test)]
#[path = "./cap_tests.rs"]
mod tests;
