use std::f64::consts::PI;

/// A closed interval on the real line.
///
/// The interval `[1, 0]` (and any interval with `lo > hi`) is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct R1Interval {
    pub lo: f64,
    pub hi: f64,
}

impl R1Interval {
    /// The canonical empty interval.
    pub const EMPTY: Self = Self { lo: 1., hi: 0. };

    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// The interval containing the single given point.
    pub const fn from_point(point: f64) -> Self {
        Self {
            lo: point,
            hi: point,
        }
    }

    /// The minimal interval containing both given points.
    pub fn from_point_pair(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn is_empty(self) -> bool {
        self.lo > self.hi
    }

    /// The endpoint at the given index (0 = lo, 1 = hi).
    pub const fn bound(self, i: usize) -> f64 {
        if i == 0 {
            self.lo
        } else {
            self.hi
        }
    }

    pub fn center(self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn length(self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(self, point: f64) -> bool {
        point >= self.lo && point <= self.hi
    }

    pub fn contains_interval(self, other: Self) -> bool {
        if other.is_empty() {
            return true;
        }
        other.lo >= self.lo && other.hi <= self.hi
    }

    pub fn interior_contains(self, point: f64) -> bool {
        point > self.lo && point < self.hi
    }

    pub fn intersects(self, other: Self) -> bool {
        if self.lo <= other.lo {
            other.lo <= self.hi && other.lo <= other.hi
        } else {
            self.lo <= other.hi && self.lo <= self.hi
        }
    }

    pub fn intersection(self, other: Self) -> Self {
        Self {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        }
    }

    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    pub fn add_point(self, point: f64) -> Self {
        if self.is_empty() {
            Self::from_point(point)
        } else {
            Self {
                lo: self.lo.min(point),
                hi: self.hi.max(point),
            }
        }
    }

    /// The closest point of the interval to the given point.
    ///
    /// The interval must be non-empty.
    pub fn clamp_point(self, point: f64) -> f64 {
        debug_assert!(!self.is_empty());
        point.clamp(self.lo, self.hi)
    }

    /// The interval with both endpoints moved outwards by `margin` (inwards
    /// when negative). An expansion that empties the interval returns the
    /// canonical empty interval.
    pub fn expanded(self, margin: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        let expanded = Self {
            lo: self.lo - margin,
            hi: self.hi + margin,
        };
        if expanded.is_empty() {
            Self::EMPTY
        } else {
            expanded
        }
    }
}

// -----------------------------------------------------------------------------

/// A closed interval on the unit circle, in radians.
///
/// Endpoints lie in `[-π, π]`; an interval with `lo > hi` is inverted and
/// wraps through ±π. Two irreducible sentinels: `[-π, π]` is full and
/// `[π, -π]` is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct S1Interval {
    pub lo: f64,
    pub hi: f64,
}

impl S1Interval {
    pub const EMPTY: Self = Self { lo: PI, hi: -PI };
    pub const FULL: Self = Self { lo: -PI, hi: PI };

    /// Initializes an interval from its endpoints, remapping −π to π.
    pub fn new(lo: f64, hi: f64) -> Self {
        let mut interval = Self { lo, hi };
        if lo == -PI && hi != PI {
            interval.lo = PI;
        }
        if hi == -PI && lo != PI {
            interval.hi = PI;
        }
        interval
    }

    /// The minimal interval containing both given points, each in
    /// `[-π, π]`.
    pub fn from_point_pair(mut a: f64, mut b: f64) -> Self {
        if a == -PI {
            a = PI;
        }
        if b == -PI {
            b = PI;
        }
        if positive_distance(a, b) <= PI {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn is_empty(self) -> bool {
        self.lo == PI && self.hi == -PI
    }

    pub fn is_full(self) -> bool {
        self.lo == -PI && self.hi == PI
    }

    pub fn is_inverted(self) -> bool {
        self.lo > self.hi
    }

    pub fn center(self) -> f64 {
        let center = 0.5 * (self.lo + self.hi);
        if self.is_inverted() {
            if center <= 0. {
                center + PI
            } else {
                center - PI
            }
        } else {
            center
        }
    }

    pub fn length(self) -> f64 {
        let mut length = self.hi - self.lo;
        if length < 0. {
            length += 2. * PI;
        }
        // An inverted interval that folds to non-negative length is actually
        // empty.
        if length >= 0. && !self.is_empty() {
            length
        } else {
            -1.
        }
    }

    pub fn contains(self, point: f64) -> bool {
        debug_assert!(point.abs() <= PI);
        let point = if point == -PI { PI } else { point };
        self.fast_contains(point)
    }

    /// Containment for a point already known to be in `(-π, π]`.
    pub fn fast_contains(self, point: f64) -> bool {
        if self.is_inverted() {
            (point >= self.lo || point <= self.hi) && !self.is_empty()
        } else {
            point >= self.lo && point <= self.hi
        }
    }

    pub fn contains_interval(self, other: Self) -> bool {
        if self.is_inverted() {
            if other.is_inverted() {
                return other.lo >= self.lo && other.hi <= self.hi;
            }
            (other.lo >= self.lo || other.hi <= self.hi) && !self.is_empty()
        } else {
            if other.is_inverted() {
                return self.is_full() || other.is_empty();
            }
            other.lo >= self.lo && other.hi <= self.hi
        }
    }

    pub fn intersects(self, other: Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.is_inverted() {
            other.is_inverted()
                || other.lo <= self.hi
                || other.hi >= self.lo
        } else if other.is_inverted() {
            other.lo <= self.hi || other.hi >= self.lo
        } else {
            other.lo <= self.hi && other.hi >= self.lo
        }
    }

    pub fn add_point(self, mut point: f64) -> Self {
        debug_assert!(point.abs() <= PI);
        if point == -PI {
            point = PI;
        }
        if self.fast_contains(point) {
            return self;
        }
        if self.is_empty() {
            return Self {
                lo: point,
                hi: point,
            };
        }
        // Extend on whichever side yields the smaller interval.
        if positive_distance(point, self.lo) < positive_distance(self.hi, point)
        {
            Self {
                lo: point,
                hi: self.hi,
            }
        } else {
            Self {
                lo: self.lo,
                hi: point,
            }
        }
    }

    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.fast_contains(other.lo) {
            if self.fast_contains(other.hi) {
                // Either one contains the other, or their union is full.
                if self.contains_interval(other) {
                    return self;
                }
                return Self::FULL;
            }
            return Self {
                lo: self.lo,
                hi: other.hi,
            };
        }
        if self.fast_contains(other.hi) {
            return Self {
                lo: other.lo,
                hi: self.hi,
            };
        }
        // Disjoint, or this interval is empty.
        if self.is_empty() || other.fast_contains(self.lo) {
            return other;
        }
        // Join through the closer pair of endpoints.
        if positive_distance(other.hi, self.lo)
            < positive_distance(self.hi, other.lo)
        {
            Self {
                lo: other.lo,
                hi: self.hi,
            }
        } else {
            Self {
                lo: self.lo,
                hi: other.hi,
            }
        }
    }

    /// The interval with both endpoints moved outwards by `margin`
    /// (non-negative).
    pub fn expanded(self, margin: f64) -> Self {
        debug_assert!(margin >= 0.);
        if self.is_empty() {
            return self;
        }
        // Check whether the expansion covers the whole circle.
        if self.length() + 2. * margin + 2. * f64::EPSILON >= 2. * PI {
            return Self::FULL;
        }
        let mut lo = (self.lo - margin) % (2. * PI);
        if lo <= -PI {
            lo += 2. * PI;
        } else if lo > PI {
            lo -= 2. * PI;
        }
        let mut hi = (self.hi + margin) % (2. * PI);
        if hi <= -PI {
            hi += 2. * PI;
        } else if hi > PI {
            hi -= 2. * PI;
        }
        let mut interval = Self { lo, hi };
        if interval.lo == -PI {
            interval.lo = PI;
        }
        interval
    }
}

/// Distance from `a` to `b` counterclockwise, in `[0, 2π)`.
fn positive_distance(a: f64, b: f64) -> f64 {
    let distance = b - a;
    if distance >= 0. {
        distance
    } else {
        (b + PI) - (a - PI)
    }
}

#[cfg(test)]
#[path = "./interval_tests.rs"]
mod tests;
