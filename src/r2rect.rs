use crate::interval::R1Interval;
use std::ops::{Add, Mul, Sub};

/// A point in `(u,v)` coordinates on a cube face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct R2Point {
    /// `x` (or `u`) coordinate.
    pub x: f64,
    /// `y` (or `v`) coordinate.
    pub y: f64,
}

impl R2Point {
    /// Initializes a new point with the specified coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate at the given axis (0 = x, 1 = y).
    #[must_use]
    pub const fn axis(self, axis: usize) -> f64 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }
}

impl Add for R2Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for R2Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for R2Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// -----------------------------------------------------------------------------

/// An axis-aligned rectangle in `(u,v)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct R2Rect {
    pub(crate) x: R1Interval,
    pub(crate) y: R1Interval,
}

impl R2Rect {
    /// The canonical empty rectangle.
    pub(crate) const EMPTY: Self = Self {
        x: R1Interval::EMPTY,
        y: R1Interval::EMPTY,
    };

    pub(crate) const fn from_intervals(x: R1Interval, y: R1Interval) -> Self {
        Self { x, y }
    }

    /// The minimal rectangle containing both given points.
    pub(crate) fn from_point_pair(a: R2Point, b: R2Point) -> Self {
        Self {
            x: R1Interval::from_point_pair(a.x, b.x),
            y: R1Interval::from_point_pair(a.y, b.y),
        }
    }

    /// Returns true if the rectangle contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The low corner of the rectangle.
    #[must_use]
    pub fn lo(&self) -> R2Point {
        R2Point::new(self.x.lo, self.y.lo)
    }

    /// The high corner of the rectangle.
    #[must_use]
    pub fn hi(&self) -> R2Point {
        R2Point::new(self.x.hi, self.y.hi)
    }

    /// The center of the rectangle.
    #[must_use]
    pub fn center(&self) -> R2Point {
        R2Point::new(self.x.center(), self.y.center())
    }

    /// The vertex at the given corner, in CCW order starting from the low
    /// corner.
    #[must_use]
    pub fn vertex(&self, k: usize) -> R2Point {
        debug_assert!(k < 4);
        // Vertices 1 and 2 are on the high side of x, 2 and 3 on the high
        // side of y.
        let x = if k == 1 || k == 2 { self.x.hi } else { self.x.lo };
        let y = if k == 2 || k == 3 { self.y.hi } else { self.y.lo };
        R2Point::new(x, y)
    }

    /// Returns true if the rectangle contains the given point.
    #[must_use]
    pub fn contains_point(&self, point: R2Point) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Returns true if the rectangles have any point in common.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x.intersects(other.x) && self.y.intersects(other.y)
    }

    /// Returns true if `self` contains `other`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.x.contains_interval(other.x) && self.y.contains_interval(other.y)
    }

    /// The rectangle with all four sides moved outwards by `margin`.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let expanded = Self {
            x: self.x.expanded(margin),
            y: self.y.expanded(margin),
        };
        if expanded.is_empty() || expanded.y.is_empty() {
            Self::EMPTY
        } else {
            expanded
        }
    }

    /// The closest point of the rectangle to the given point.
    #[must_use]
    pub fn clamp_point(&self, point: R2Point) -> R2Point {
        R2Point::new(self.x.clamp_point(point.x), self.y.clamp_point(point.y))
    }
}

#[cfg(test)]
#[path = "./r2rect_tests.rs"]
mod tests;
