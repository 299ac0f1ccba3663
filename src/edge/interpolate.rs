use super::robust_cross;
use crate::{point::Point, Angle};

/// The point at parameter `t` along the edge AB, where `t = 0` is `a` and
/// `t = 1` is `b`.
///
/// The parameter measures arc length, and may lie outside `[0, 1]` to
/// extrapolate along the great circle. The endpoints are returned exactly
/// at `t = 0` and `t = 1`.
#[must_use]
pub fn interpolate(t: f64, a: Point, b: Point) -> Point {
    if t == 0. {
        return a;
    }
    if t == 1. {
        return b;
    }
    interpolate_at_distance(a.angle(b) * t, a, b)
}

/// The point at the given arc distance along the edge AB, starting from
/// `a`.
#[must_use]
pub fn interpolate_at_distance(ax: Angle, a: Point, b: Point) -> Point {
    let radians = ax.radians();

    // The tangent at a towards b stays perpendicular to a even for
    // degenerate or antipodal edges.
    let normal = robust_cross(a, b);
    let tangent = normal.cross(a);

    // With exact arithmetic the combination would be unit length already;
    // normalize to absorb the rounding drift.
    (a * radians.cos() + tangent * (radians.sin() / tangent.norm()))
        .normalize()
}

#[cfg(test)]
#[path = "./interpolate_tests.rs"]
mod tests;
