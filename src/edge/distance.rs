use super::{
    crosser::{crossing_sign, Crossing},
    robust_cross,
};
use crate::{chord_angle::ChordAngle, point::Point, Angle};

/// The distance from point `x` to the edge AB.
#[must_use]
pub fn distance(x: Point, a: Point, b: Point) -> Angle {
    let mut dist = ChordAngle::INFINITY;
    update_min_distance(x, a, b, &mut dist);
    dist.to_angle()
}

/// Lowers `min_dist` to the distance from `x` to edge AB if that distance
/// is smaller. Returns true if an update happened.
pub fn update_min_distance(
    x: Point,
    a: Point,
    b: Point,
    min_dist: &mut ChordAngle,
) -> bool {
    if let Some(dist) = interior_dist(x, a, b, *min_dist) {
        *min_dist = dist;
        return true;
    }

    // The closest point is one of the two vertices.
    let dist = ChordAngle::from_length2(x.distance2(a).min(x.distance2(b)));
    if dist >= *min_dist {
        return false;
    }
    *min_dist = dist;
    true
}

/// Raises `max_dist` to the distance from `x` to the furthest point of
/// edge AB if that distance is larger. Returns true if an update happened.
pub fn update_max_distance(
    x: Point,
    a: Point,
    b: Point,
    max_dist: &mut ChordAngle,
) -> bool {
    let mut dist = ChordAngle::between_points(x, a)
        .max(ChordAngle::between_points(x, b));
    if dist > ChordAngle::RIGHT {
        // If the edge passes through the hemisphere opposite x, the
        // furthest point is antipodal to the closest point from -x.
        let mut min = ChordAngle::INFINITY;
        update_min_distance(-x, a, b, &mut min);
        dist = ChordAngle::STRAIGHT - min;
    }
    if dist <= *max_dist {
        return false;
    }
    *max_dist = dist;
    true
}

/// Lowers `min_dist` to the minimum distance between the edges A0A1 and
/// B0B1. Crossing edges are at distance zero.
pub fn update_edge_pair_min_distance(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
    min_dist: &mut ChordAngle,
) -> bool {
    if *min_dist == ChordAngle::ZERO {
        return false;
    }
    if crossing_sign(a0, a1, b0, b1) == Crossing::Cross {
        *min_dist = ChordAngle::ZERO;
        return true;
    }

    // Otherwise the minimum is attained at an endpoint of one of the two
    // edges.
    let mut updated = update_min_distance(a0, b0, b1, min_dist);
    updated |= update_min_distance(a1, b0, b1, min_dist);
    updated |= update_min_distance(b0, a0, a1, min_dist);
    updated |= update_min_distance(b1, a0, a1, min_dist);
    updated
}

/// Raises `max_dist` to the maximum distance between the edges A0A1 and
/// B0B1.
pub fn update_edge_pair_max_distance(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
    max_dist: &mut ChordAngle,
) -> bool {
    if *max_dist == ChordAngle::STRAIGHT {
        return false;
    }
    // An edge crossing the reflection of the other means some pair of
    // points is exactly antipodal.
    if crossing_sign(a0, a1, -b0, -b1) == Crossing::Cross {
        *max_dist = ChordAngle::STRAIGHT;
        return true;
    }

    let mut updated = update_max_distance(a0, b0, b1, max_dist);
    updated |= update_max_distance(a1, b0, b1, max_dist);
    updated |= update_max_distance(b0, a0, a1, max_dist);
    updated |= update_max_distance(b1, a0, a1, max_dist);
    updated
}

/// The distance from `x` to the interior of edge AB, when the closest
/// point lies in the interior and improves on `min_dist`.
fn interior_dist(
    x: Point,
    a: Point,
    b: Point,
    min_dist: ChordAngle,
) -> Option<ChordAngle> {
    // Let C = A×B. If X is in the spherical wedge extending from A to B
    // around the axis through C, the closest point to X is its projection
    // onto the great circle through AB.
    let c = robust_cross(a, b);
    let c2 = c.norm2();
    let x_dot_c = x.dot(c);
    let x_dot_c2 = x_dot_c * x_dot_c;
    if !min_dist.is_special() && x_dot_c2 > c2 * min_dist.length2() {
        // The distance to the great circle itself is already too large.
        return None;
    }

    // The wedge test: the projection must fall strictly between A and B.
    let cx = c.cross(x);
    if (a - x).dot(cx) >= 0. || (b - x).dot(cx) <= 0. {
        return None;
    }

    // The squared chord to the projection decomposes into the out-of-plane
    // part plus the in-plane chord.
    let cpx2 = cx.norm2();
    let qr = 1. - (cpx2 / c2).sqrt();
    let dist = ChordAngle::from_length2((x_dot_c2 / c2) + qr * qr);
    if dist >= min_dist {
        return None;
    }
    Some(dist)
}

#[cfg(test)]
#[path = "./distance_tests.rs"]
mod tests;
