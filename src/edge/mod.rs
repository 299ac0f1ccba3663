//! Predicates and constructions on great-circle edges: crossings,
//! distances, interpolation, and clipping to cube faces.

pub mod clip;
pub mod crosser;
pub mod distance;
pub mod interpolate;

use crate::point::Point;

/// A cross product that never vanishes for distinct points.
///
/// The computation is stable for nearly-parallel inputs; exactly equal or
/// antipodal points fall back to an arbitrary orthogonal direction, which
/// keeps downstream constructions (tangents, interpolation) well-defined.
#[must_use]
pub(crate) fn robust_cross(a: Point, b: Point) -> Point {
    let result = a.stable_cross(b);
    if result != Point::new(0., 0., 0.) {
        return result;
    }
    a.ortho()
}
