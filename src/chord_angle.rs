use crate::{Angle, Point, DBL_EPSILON};
use std::{cmp::Ordering, ops};

/// The squared length of the longest possible chord (between two antipodal
/// points).
const MAX_LENGTH2: f64 = 4.;

/// The angle subtended by a chord, stored as the squared chord length.
///
/// The squared length of the straight line segment between two points on the
/// sphere is a monotonic proxy for their spherical distance, with cheap
/// arithmetic and no trigonometry in hot paths. Conversion to [`Angle`]
/// happens only at result boundaries.
///
/// Only angles in `[0, π]` are representable; two sentinels extend the
/// range: [`ChordAngle::NEGATIVE`] compares less than any finite angle and
/// [`ChordAngle::INFINITY`] greater than any finite angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChordAngle {
    /// Squared chord length, in `[0, 4]`, or a sentinel.
    length2: f64,
}

impl ChordAngle {
    /// The zero chord angle.
    pub const ZERO: Self = Self { length2: 0. };

    /// A chord angle smaller than the zero angle.
    ///
    /// The only valid operations on it are comparisons and conversions.
    pub const NEGATIVE: Self = Self { length2: -1. };

    /// A chord angle of 90 degrees.
    pub const RIGHT: Self = Self { length2: 2. };

    /// A chord angle of 180 degrees, the maximum finite chord angle.
    pub const STRAIGHT: Self = Self {
        length2: MAX_LENGTH2,
    };

    /// A chord angle larger than any finite chord angle.
    ///
    /// The only valid operations on it are comparisons and conversions.
    pub const INFINITY: Self = Self {
        length2: f64::INFINITY,
    };

    /// Initializes a chord angle from the squared chord length.
    ///
    /// Note that this value is `4 * sin²(θ/2)` for a subtended angle `θ`.
    #[must_use]
    pub const fn from_length2(length2: f64) -> Self {
        Self { length2 }
    }

    /// Initializes the chord angle subtended by the two given points.
    #[must_use]
    pub fn between_points(x: Point, y: Point) -> Self {
        Self {
            length2: MAX_LENGTH2.min(x.distance2(y)),
        }
    }

    /// The squared chord length.
    #[must_use]
    pub const fn length2(self) -> f64 {
        self.length2
    }

    /// Returns true for the two sentinel values.
    #[must_use]
    pub fn is_special(self) -> bool {
        self.length2 < 0. || self.length2.is_infinite()
    }

    /// Returns true for the zero chord angle.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.length2 == 0.
    }

    /// Converts the chord angle to an [`Angle`].
    #[must_use]
    pub fn to_angle(self) -> Angle {
        if self.length2 < 0. {
            return Angle::from_radians(-1.);
        }
        if self.length2.is_infinite() {
            return Angle::INFINITY;
        }
        Angle::from_radians(2. * (0.5 * self.length2.sqrt()).asin())
    }

    /// Returns a new chord angle whose squared length has been increased by
    /// `error`, clamped into the representable range.
    ///
    /// Comparing against the expanded value gives a conservative answer in
    /// the presence of the caller's accumulated numerical error. Sentinels
    /// are returned unchanged.
    #[must_use]
    pub fn expanded(self, error: f64) -> Self {
        if self.is_special() {
            return self;
        }
        Self {
            length2: MAX_LENGTH2.min((self.length2 + error).max(0.)),
        }
    }

    /// A bound on the error of [`ChordAngle::between_points`], given that
    /// the two points are within `1e-15` of being unit length.
    #[must_use]
    pub fn max_point_error(self) -> f64 {
        2.5f64.mul_add(DBL_EPSILON * self.length2, 16. * DBL_EPSILON * DBL_EPSILON)
    }

    /// A bound on the error of converting an [`Angle`] to a `ChordAngle`.
    #[must_use]
    pub fn max_angle_error(self) -> f64 {
        DBL_EPSILON * self.length2
    }

    /// The squared sine of the subtended angle.
    #[must_use]
    pub fn sin2(self) -> f64 {
        // sin²(θ) = l²·(1 − l²/4), from the double angle formula applied to
        // l = 2·sin(θ/2).
        self.length2 * 0.25f64.mul_add(-self.length2, 1.)
    }

    /// The smallest representable chord angle larger than this one.
    #[must_use]
    pub fn successor(self) -> Self {
        if self.length2 >= MAX_LENGTH2 {
            return Self::INFINITY;
        }
        if self.length2 < 0. {
            return Self::ZERO;
        }
        Self {
            length2: next_after_up(self.length2),
        }
    }

    /// The largest representable chord angle smaller than this one.
    #[must_use]
    pub fn predecessor(self) -> Self {
        if self.length2 <= 0. {
            return Self::NEGATIVE;
        }
        if self.length2.is_infinite() {
            return Self::STRAIGHT;
        }
        Self {
            length2: next_after_down(self.length2),
        }
    }
}

/// The next representable `f64` toward positive infinity.
fn next_after_up(value: f64) -> f64 {
    debug_assert!(value.is_finite());
    let bits = value.to_bits();
    f64::from_bits(if value >= 0. { bits + 1 } else { bits - 1 })
}

/// The next representable `f64` toward negative infinity.
fn next_after_down(value: f64) -> f64 {
    debug_assert!(value.is_finite() && value != 0.);
    let bits = value.to_bits();
    f64::from_bits(if value > 0. { bits - 1 } else { bits + 1 })
}

impl From<Angle> for ChordAngle {
    fn from(value: Angle) -> Self {
        let radians = value.radians();
        if radians < 0. {
            Self::NEGATIVE
        } else if radians.is_infinite() {
            Self::INFINITY
        } else {
            let length = 2. * (0.5 * radians.min(std::f64::consts::PI)).sin();
            Self {
                length2: length * length,
            }
        }
    }
}

impl ops::Add for ChordAngle {
    type Output = Self;

    /// The chord angle of the sum of the two subtended angles.
    ///
    /// The result errs on the low side, within roughly `4.5e-16` of the
    /// exact squared length; use [`ChordAngle::expanded`] for a conservative
    /// comparison.
    fn add(self, rhs: Self) -> Self {
        debug_assert!(!self.is_special() && !rhs.is_special());

        if rhs.length2 == 0. {
            return self;
        }
        // Clamp the angle sum to 180 degrees.
        if self.length2 + rhs.length2 >= MAX_LENGTH2 {
            return Self::STRAIGHT;
        }

        // Sum of angles, through chords: with a = 2·sin(α/2), b = 2·sin(β/2),
        // the chord of α+β is |a·cos(β/2) + b·cos(α/2)| and cos²(θ/2) is
        // 1 − θ²/4.
        let x = self.length2 * 0.25f64.mul_add(-rhs.length2, 1.);
        let y = rhs.length2 * 0.25f64.mul_add(-self.length2, 1.);
        Self {
            length2: MAX_LENGTH2.min(2.0f64.mul_add((x * y).sqrt(), x + y)),
        }
    }
}

impl ops::Sub for ChordAngle {
    type Output = Self;

    /// The chord angle of the difference of the two subtended angles.
    fn sub(self, rhs: Self) -> Self {
        debug_assert!(!self.is_special() && !rhs.is_special());

        if rhs.length2 == 0. {
            return self;
        }
        if self <= rhs {
            return Self::ZERO;
        }
        let x = self.length2 * 0.25f64.mul_add(-rhs.length2, 1.);
        let y = rhs.length2 * 0.25f64.mul_add(-self.length2, 1.);
        Self {
            length2: (-2.0f64).mul_add((x * y).sqrt(), x + y).max(0.),
        }
    }
}

impl Eq for ChordAngle {}

impl PartialOrd for ChordAngle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChordAngle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length2.total_cmp(&other.length2)
    }
}

#[cfg(test)]
#[path = "./chord_angle_tests.rs"]
mod tests;
