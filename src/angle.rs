use std::{cmp::Ordering, fmt, ops};

/// A 1D angle, stored in radians.
///
/// Note that the `Display` impl prints the value in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Angle {
    /// Angle, in radians.
    radians: f64,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self { radians: 0. };

    /// An angle larger than any finite angle.
    pub const INFINITY: Self = Self {
        radians: f64::INFINITY,
    };

    /// Initializes a new angle from radians.
    #[must_use]
    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Initializes a new angle from degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Initializes a new angle from a number of hundred-thousandths of
    /// degrees.
    #[must_use]
    pub fn from_e5(e5: i32) -> Self {
        Self::from_degrees(f64::from(e5) * 1e-5)
    }

    /// Initializes a new angle from a number of millionths of degrees.
    #[must_use]
    pub fn from_e6(e6: i32) -> Self {
        Self::from_degrees(f64::from(e6) * 1e-6)
    }

    /// Initializes a new angle from a number of ten-millionths of degrees.
    #[must_use]
    pub fn from_e7(e7: i32) -> Self {
        Self::from_degrees(f64::from(e7) * 1e-7)
    }

    /// The angle, in radians.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.radians
    }

    /// The angle, in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// The absolute value of the angle.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_radians(self.radians.abs())
    }
}

impl ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_radians(self.radians + rhs.radians)
    }
}

impl ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_radians(self.radians - rhs.radians)
    }
}

impl ops::Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_radians(self.radians * rhs)
    }
}

impl ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_radians(-self.radians)
    }
}

impl Eq for Angle {}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Angle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.radians.total_cmp(&other.radians)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7}", self.degrees())
    }
}
