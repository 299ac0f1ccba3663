//! The S2 face coordinate systems.
//!
//! Every point on the sphere is addressed through the face of the
//! circumscribed cube it projects onto, using a ladder of coordinate
//! systems:
//!
//! - `(face, u, v)`: gnomonic projection onto the face, in `[-1, 1]²`.
//! - `(face, s, t)`: `(u, v)` remapped through a quadratic transform that
//!   makes cell areas nearly uniform, in `[0, 1]²`.
//! - `(face, i, j)`: leaf cell coordinates, integers in `[0, 2³⁰)`.
//! - `(face, si, ti)`: half-leaf coordinates in `[0, 2³¹]`, able to address
//!   both leaf centers (odd values) and leaf corners (even values).

mod latlng;

pub use latlng::LatLng;

use crate::{point::Point, MAX_SIZE};

/// The number of half-leaf (si/ti) units spanning the width of a face.
pub const MAX_SI_TI: u32 = 2 * MAX_SIZE;

/// Converts an s- or t-value in `[0, 1]` to the corresponding u- or
/// v-value in `[-1, 1]`.
///
/// The quadratic transform evens out cell areas across a face at about 2/3
/// of the cost of the exact tangent transform.
#[must_use]
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1. / 3.) * 4.0f64.mul_add(s * s, -1.)
    } else {
        (1. / 3.) * (1. - 4. * (1. - s) * (1. - s))
    }
}

/// Inverse of [`st_to_uv`]. Exact for all representable inputs.
#[must_use]
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0. {
        0.5 * 3.0f64.mul_add(u, 1.).sqrt()
    } else {
        1. - 0.5 * 3.0f64.mul_add(-u, 1.).sqrt()
    }
}

/// Converts an s-value to the i-coordinate of the leaf cell containing it.
///
/// Values outside `[0, 1]` clamp to the first/last leaf cell.
#[must_use]
pub fn st_to_ij(s: f64) -> i32 {
    let ij = (f64::from(MAX_SIZE).mul_add(s, -0.5)).round() as i64;
    ij.clamp(0, i64::from(MAX_SIZE) - 1) as i32
}

/// The s-value of the lower edge of leaf column `i` (`i` may be
/// `MAX_SIZE`, addressing the upper face boundary).
#[must_use]
pub fn ij_to_st_min(i: i32) -> f64 {
    debug_assert!(i >= 0 && i <= MAX_SIZE as i32);
    f64::from(i) / f64::from(MAX_SIZE)
}

/// Converts an si-value in `[0, 2³¹]` to the corresponding s-value.
#[must_use]
pub fn siti_to_st(si: u32) -> f64 {
    debug_assert!(si <= MAX_SI_TI);
    f64::from(si) / f64::from(MAX_SI_TI)
}

// -----------------------------------------------------------------------------

/// Unit normal of each face (also the face center direction).
const FACE_NORMS: [Point; 6] = [
    Point::new(1., 0., 0.),
    Point::new(0., 1., 0.),
    Point::new(0., 0., 1.),
    Point::new(-1., 0., 0.),
    Point::new(0., -1., 0.),
    Point::new(0., 0., -1.),
];

/// Direction of increasing u on each face.
const FACE_U_AXES: [Point; 6] = [
    Point::new(0., 1., 0.),
    Point::new(-1., 0., 0.),
    Point::new(-1., 0., 0.),
    Point::new(0., 0., -1.),
    Point::new(0., 0., -1.),
    Point::new(0., 1., 0.),
];

/// Direction of increasing v on each face.
const FACE_V_AXES: [Point; 6] = [
    Point::new(0., 0., 1.),
    Point::new(0., 0., 1.),
    Point::new(0., -1., 0.),
    Point::new(0., -1., 0.),
    Point::new(1., 0., 0.),
    Point::new(1., 0., 0.),
];

/// Converts `(face, u, v)` coordinates to a direction vector.
///
/// The result is not unit length: it lies on the cube, not the sphere.
#[must_use]
pub fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Point {
    match face {
        0 => Point::new(1., u, v),
        1 => Point::new(-u, 1., v),
        2 => Point::new(-u, -v, 1.),
        3 => Point::new(-1., -v, -u),
        4 => Point::new(v, -1., -u),
        _ => Point::new(v, u, -1.),
    }
}

/// Projects a point known to be on the given face to `(u, v)` coordinates.
///
/// The point must have a non-zero component along the face normal.
#[must_use]
pub fn valid_face_xyz_to_uv(face: u8, p: Point) -> (f64, f64) {
    debug_assert!(p.dot(FACE_NORMS[usize::from(face)]) > 0.);
    match face {
        0 => (p.y / p.x, p.z / p.x),
        1 => (-p.x / p.y, p.z / p.y),
        2 => (-p.x / p.z, -p.y / p.z),
        3 => (p.z / p.x, p.y / p.x),
        4 => (p.z / p.y, -p.x / p.y),
        _ => (-p.y / p.z, -p.x / p.z),
    }
}

/// The face containing the given direction vector.
///
/// For points on face boundaries the result is arbitrary but deterministic.
#[must_use]
pub fn face(p: Point) -> u8 {
    let axis = p.largest_abs_component();
    let face = if p.component(axis) < 0. { axis + 3 } else { axis };
    face as u8
}

/// Projects a direction vector to `(face, u, v)` coordinates.
#[must_use]
pub fn xyz_to_face_uv(p: Point) -> (u8, f64, f64) {
    let face = face(p);
    let (u, v) = valid_face_xyz_to_uv(face, p);
    (face, u, v)
}

/// Projects onto the given face, if the point is on its hemisphere.
#[must_use]
pub fn face_xyz_to_uv(face: u8, p: Point) -> Option<(f64, f64)> {
    if p.dot(FACE_NORMS[usize::from(face)]) <= 0. {
        return None;
    }
    Some(valid_face_xyz_to_uv(face, p))
}

/// The right-handed normal to the great circle `u = const` on the given
/// face, pointing toward increasing u.
#[must_use]
pub const fn u_norm(face: u8, u: f64) -> Point {
    match face {
        0 => Point::new(u, -1., 0.),
        1 => Point::new(1., u, 0.),
        2 => Point::new(1., 0., u),
        3 => Point::new(-u, 0., 1.),
        4 => Point::new(0., -u, 1.),
        _ => Point::new(0., -1., -u),
    }
}

/// The right-handed normal to the great circle `v = const` on the given
/// face, pointing toward increasing v.
#[must_use]
pub const fn v_norm(face: u8, v: f64) -> Point {
    match face {
        0 => Point::new(-v, 0., 1.),
        1 => Point::new(0., -v, 1.),
        2 => Point::new(0., -1., -v),
        3 => Point::new(v, -1., 0.),
        4 => Point::new(1., v, 0.),
        _ => Point::new(1., 0., v),
    }
}

/// The direction of increasing u on the given face.
#[must_use]
pub const fn u_axis(face: u8) -> Point {
    FACE_U_AXES[face as usize]
}

/// The direction of increasing v on the given face.
#[must_use]
pub const fn v_axis(face: u8) -> Point {
    FACE_V_AXES[face as usize]
}

/// The outward normal of the given face.
#[must_use]
pub const fn unit_norm(face: u8) -> Point {
    FACE_NORMS[face as usize]
}

#[cfg(test)]
#[path = "./coord_tests.rs"]
mod tests;
