use super::robust_cross;
use crate::{
    coord,
    interval::R1Interval,
    point::Point,
    r2rect::{R2Point, R2Rect},
    DBL_EPSILON,
};
use std::f64::consts::FRAC_1_SQRT_2;

/// The maximum error in the u- or v-coordinate of a clipped endpoint
/// produced by [`clip_edge`] and the bound-clipping helpers.
pub const EDGE_CLIP_ERROR_UV_COORD: f64 = 2.25 * DBL_EPSILON;

/// The maximum distance of a clipped point to the original edge, for the
/// 2D clipping helpers.
pub const EDGE_CLIP_ERROR_UV_DIST: f64 = 2.25 * DBL_EPSILON;

/// The maximum angular displacement of a point clipped by
/// [`clip_to_padded_face`].
pub const FACE_CLIP_ERROR_RADIANS: f64 = 3. * DBL_EPSILON;

/// The same displacement as a (u,v) distance on the face.
pub const FACE_CLIP_ERROR_UV_DIST: f64 = 9. * DBL_EPSILON;

/// The same displacement as a bound on each (u,v) coordinate.
pub const FACE_CLIP_ERROR_UV_COORD: f64 = 9. * FRAC_1_SQRT_2 * DBL_EPSILON;

/// The maximum error in [`edge_intersects_rect`] tests.
pub const INTERSECTS_RECT_ERROR_UV_DIST: f64 = 3. * std::f64::consts::SQRT_2 * DBL_EPSILON;

/// Which coordinate axis a line exits the face square through.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Axis {
    U,
    V,
}

/// Clips the edge AB to the given face, returning the `(u,v)` endpoints
/// of the clipped portion, or `None` if the edge misses the face.
#[must_use]
pub fn clip_to_face(a: Point, b: Point, face: u8) -> Option<(R2Point, R2Point)> {
    clip_to_padded_face(a, b, face, 0.)
}

/// Clips the edge AB to the given face padded outward by `padding` in
/// `(u,v)` coordinates.
///
/// Every clipped point is within [`FACE_CLIP_ERROR_RADIANS`] of the true
/// edge, and the clipped segment misses no part of the edge that comes
/// within `padding − `[`FACE_CLIP_ERROR_UV_DIST`] of the face square.
#[must_use]
pub fn clip_to_padded_face(
    a: Point,
    b: Point,
    f: u8,
    padding: f64,
) -> Option<(R2Point, R2Point)> {
    debug_assert!(padding >= 0.);

    // Fast path: both endpoints are on the requested face.
    if coord::face(a) == f && coord::face(b) == f {
        let (au, av) = coord::valid_face_xyz_to_uv(f, a);
        let (bu, bv) = coord::valid_face_xyz_to_uv(f, b);
        return Some((R2Point::new(au, av), R2Point::new(bu, bv)));
    }

    // Convert everything into the (u,v,w) frame of this face. The cross
    // product must be taken in (x,y,z) so that it agrees with the
    // orientation predicates regardless of the face.
    let norm_uvw = face_xyz_to_uvw(f, robust_cross(a, b));
    let a_uvw = face_xyz_to_uvw(f, a);
    let b_uvw = face_xyz_to_uvw(f, b);

    // Padding is handled by scaling the u- and v-components of the normal:
    // dot products against face corners then behave as if the corners were
    // at (±(1+padding), ±(1+padding), 1).
    let scale_uv = 1. + padding;
    let scaled_n = Point::new(
        scale_uv * norm_uvw.x,
        scale_uv * norm_uvw.y,
        norm_uvw.z,
    );
    if !intersects_face(scaled_n) {
        return None;
    }

    // Rescale extremely small normals to avoid underflow in the
    // normalization below.
    let norm_uvw = if norm_uvw
        .x
        .abs()
        .max(norm_uvw.y.abs())
        .max(norm_uvw.z.abs())
        < f64::MIN_POSITIVE.sqrt()
    {
        norm_uvw * 2.0f64.powi(563)
    } else {
        norm_uvw
    };

    let norm_uvw = norm_uvw.normalize();
    let a_tan = norm_uvw.cross(a_uvw);
    let b_tan = b_uvw.cross(norm_uvw);

    // Clip each endpoint independently; if the combined score reaches 3
    // the edge does not actually intersect the face.
    let (a_uv, a_score) =
        clip_destination(b_uvw, a_uvw, -scaled_n, b_tan, a_tan, scale_uv);
    let (b_uv, b_score) =
        clip_destination(a_uvw, b_uvw, scaled_n, a_tan, b_tan, scale_uv);

    (a_score + b_score < 3).then_some((a_uv, b_uv))
}

/// Transforms a point in `(x,y,z)` to the `(u,v,w)` frame of the face.
fn face_xyz_to_uvw(face: u8, p: Point) -> Point {
    Point::new(
        p.dot(coord::u_axis(face)),
        p.dot(coord::v_axis(face)),
        p.dot(coord::unit_norm(face)),
    )
}

/// Returns true if the great circle with the given normal (in the face's
/// `(u,v,w)` frame) intersects the face square.
fn intersects_face(n: Point) -> bool {
    // The circle's plane meets the square iff the dot products of N with
    // the four corners (±1, ±1, 1) do not all share a sign, which is
    // exactly |Nu| + |Nv| >= |Nw|. Evaluated without rounding.
    let u = n.x.abs();
    let v = n.y.abs();
    let w = n.z.abs();
    v >= w - u && u >= w - v
}

/// Returns true if the line additionally crosses two opposite edges of
/// the square.
fn intersects_opposite_edges(n: Point) -> bool {
    // Crossing both u = ±1 edges requires |Nv| >= |Nu| + |Nw|, crossing
    // both v = ±1 edges |Nu| >= |Nv| + |Nw|; together |Nu − Nv| >= |Nw|.
    let u = n.x.abs();
    let v = n.y.abs();
    let w = n.z.abs();
    (u - v).abs() >= w
}

/// The axis the directed line (CCW around its normal) exits the square
/// through.
fn exit_axis(n: Point) -> Axis {
    debug_assert!(intersects_face(n));
    if intersects_opposite_edges(n) {
        // Exits through v = ±1 if the u-component of N dominates.
        return if n.x.abs() >= n.y.abs() { Axis::V } else { Axis::U };
    }

    // The line exits through two adjacent edges; which pair follows from
    // the parity of the normal's sign bits.
    let parity = u32::from(n.x.is_sign_negative())
        ^ u32::from(n.y.is_sign_negative())
        ^ u32::from(n.z.is_sign_negative());
    if parity == 0 {
        Axis::V
    } else {
        Axis::U
    }
}

/// The `(u,v)` point where the directed line exits the square through the
/// given axis.
fn exit_point(n: Point, axis: Axis) -> R2Point {
    match axis {
        Axis::U => {
            let u = if n.y > 0. { 1. } else { -1. };
            R2Point::new(u, (-u * n.x - n.z) / n.y)
        }
        Axis::V => {
            let v = if n.x > 0. { -1. } else { 1. };
            R2Point::new((-v * n.y - n.z) / n.x, v)
        }
    }
}

/// Projects the destination endpoint `b` of the (UVW-frame) edge AB onto
/// the face, clipping it to the square boundary when it lies beyond.
///
/// The score grades how far outside the segment the clipped point is: 0
/// when b projects onto the face, 1 when the exit point lands beyond b, 2
/// when it lands before a, 3 when b cannot be projected at all. An edge
/// whose endpoint scores sum to 3 or more misses the face.
fn clip_destination(
    a: Point,
    b: Point,
    scaled_n: Point,
    a_tan: Point,
    b_tan: Point,
    scale_uv: f64,
) -> (R2Point, i32) {
    debug_assert!(intersects_face(scaled_n));

    // Optimization: if b is safely interior to the face, project directly.
    let max_safe_uv = 1. - FACE_CLIP_ERROR_UV_COORD;
    if b.z > 0. {
        let uv = R2Point::new(b.x / b.z, b.y / b.z);
        if uv.x.abs().max(uv.y.abs()) <= max_safe_uv {
            return (uv, 0);
        }
    }

    // Otherwise clip to where the great circle exits the (padded) square.
    let uv = exit_point(scaled_n, exit_axis(scaled_n)) * scale_uv;
    let p = Point::new(uv.x, uv.y, 1.);

    // Check whether the exit point lies within the wedge of the segment,
    // via the inward tangents at both endpoints.
    let mut score = 0;
    if (p - a).dot(a_tan) < 0. {
        score = 2; // The exit point is on the wrong side of a.
    } else if (p - b).dot(b_tan) < 0. {
        score = 1; // The exit point is on the wrong side of b.
    }

    if score > 0 {
        if b.z <= 0. {
            return (uv, 3); // b cannot be projected onto this face.
        }
        return (R2Point::new(b.x / b.z, b.y / b.z), score);
    }

    (uv, score)
}

// ---- 2D clipping ------------------------------------------------------------

/// A linear interpolation that is exact at both endpoints.
///
/// Returns the value with the same relation to `a1` and `b1` as `x` has to
/// `a` and `b`.
#[must_use]
pub fn interpolate_f64(x: f64, a: f64, b: f64, a1: f64, b1: f64) -> f64 {
    debug_assert!(a != b);
    // Starting from the closer endpoint keeps the result accurate near
    // both.
    if (a - x).abs() <= (b - x).abs() {
        a1 + (b1 - a1) * ((x - a) / (b - a))
    } else {
        b1 + (a1 - b1) * ((x - b) / (a - b))
    }
}

/// Moves one endpoint of the interval to `value`, failing if that would
/// invert the interval.
fn update_endpoint(
    bound: R1Interval,
    high: bool,
    value: f64,
) -> Option<R1Interval> {
    if high {
        if bound.lo > value {
            return None;
        }
        Some(R1Interval::new(bound.lo, bound.hi.min(value)))
    } else {
        if bound.hi < value {
            return None;
        }
        Some(R1Interval::new(bound.lo.max(value), bound.hi))
    }
}

/// Clips the bounding intervals of edge `(a0,a1)`-`(b0,b1)` along axis 0,
/// updating the axis-1 bound to match.
#[allow(clippy::too_many_arguments)]
fn clip_bound_axis(
    a0: f64,
    b0: f64,
    mut bound0: R1Interval,
    a1: f64,
    b1: f64,
    mut bound1: R1Interval,
    neg_slope: bool,
    clip: R1Interval,
) -> Option<(R1Interval, R1Interval)> {
    if bound0.lo < clip.lo {
        if bound0.hi < clip.lo {
            return None;
        }
        let x = interpolate_f64(clip.lo, a0, b0, a1, b1);
        bound0 = R1Interval::new(clip.lo, bound0.hi);
        bound1 = update_endpoint(bound1, neg_slope, x)?;
    }
    if bound0.hi > clip.hi {
        if bound0.lo > clip.hi {
            return None;
        }
        let x = interpolate_f64(clip.hi, a0, b0, a1, b1);
        bound0 = R1Interval::new(bound0.lo, clip.hi);
        bound1 = update_endpoint(bound1, !neg_slope, x)?;
    }
    Some((bound0, bound1))
}

/// Clips a tight bound of the edge AB to the given rectangle, returning
/// the clipped bound, or `None` if the clipped edge is empty.
///
/// The bound shrinks monotonically; the error of each output coordinate
/// is at most [`EDGE_CLIP_ERROR_UV_COORD`].
#[must_use]
pub fn clip_edge_bound(
    a: R2Point,
    b: R2Point,
    clip: &R2Rect,
    bound: R2Rect,
) -> Option<R2Rect> {
    // The bound spans one of the two diagonals depending on the slope
    // sign; this determines which corner each clipped value updates.
    let neg_slope = (a.x > b.x) != (a.y > b.y);

    let (bound_x, bound_y) = clip_bound_axis(
        a.x,
        b.x,
        bound.x,
        a.y,
        b.y,
        bound.y,
        neg_slope,
        clip.x,
    )?;
    let (bound_y, bound_x) = clip_bound_axis(
        a.y,
        b.y,
        bound_y,
        a.x,
        b.x,
        bound_x,
        neg_slope,
        clip.y,
    )?;
    Some(R2Rect::from_intervals(bound_x, bound_y))
}

/// Clips the edge AB to the given rectangle, returning the clipped
/// endpoints.
#[must_use]
pub fn clip_edge(a: R2Point, b: R2Point, clip: &R2Rect) -> Option<(R2Point, R2Point)> {
    // Clip the bounding rectangle of AB, then read the new endpoints off
    // the corners the edge spans.
    let bound = R2Rect::from_point_pair(a, b);
    let bound = clip_edge_bound(a, b, clip, bound)?;
    let ai = usize::from(a.x > b.x);
    let aj = usize::from(a.y > b.y);
    Some((vertex_ij(&bound, ai, aj), vertex_ij(&bound, 1 - ai, 1 - aj)))
}

/// The corner of the rectangle selected by low/high flags per axis.
fn vertex_ij(rect: &R2Rect, i: usize, j: usize) -> R2Point {
    R2Point::new(rect.x.bound(i), rect.y.bound(j))
}

/// Returns true if the edge AB intersects the given (closed) rectangle.
#[must_use]
pub fn edge_intersects_rect(a: R2Point, b: R2Point, rect: &R2Rect) -> bool {
    // The bounding boxes must overlap.
    if !rect.intersects(&R2Rect::from_point_pair(a, b)) {
        return false;
    }

    // Then AB misses the rectangle iff all four vertices are on the same
    // side of its supporting line.
    let direction = b - a;
    let normal = R2Point::new(-direction.y, direction.x);
    let i = usize::from(normal.x >= 0.);
    let j = usize::from(normal.y >= 0.);
    let max = dot(normal, vertex_ij(rect, i, j) - a);
    let min = dot(normal, vertex_ij(rect, 1 - i, 1 - j) - a);
    max >= 0. && min <= 0.
}

fn dot(a: R2Point, b: R2Point) -> f64 {
    a.x.mul_add(b.x, a.y * b.y)
}

#[cfg(test)]
#[path = "./clip_tests.rs"]
mod tests;
