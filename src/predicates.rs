//! Robust orientation predicates.
//!
//! The sign of the determinant `(a × b) · c` decides which side of the
//! great circle through `a` and `b` the point `c` lies on. The fast path
//! is a plain floating-point evaluation with a proven error bound; results
//! inside the uncertainty band fall through to an error-free evaluation
//! over floating-point expansions, and exactly-degenerate triples are
//! resolved by symbolic perturbation so that the predicate never returns
//! zero for distinct points.

use crate::{Point, DBL_EPSILON};
use std::cmp::Ordering;

/// Maximum error of the plain determinant evaluation, for unit-length
/// inputs.
const MAX_DETERMINANT_ERROR: f64 = 1.8274 * DBL_EPSILON;

/// Relative error multiplier of the stable determinant evaluation.
const DET_ERROR_MULTIPLIER: f64 = 3.2321 * DBL_EPSILON;

/// Returns `+1` if the points `a`, `b`, `c` are counterclockwise, `-1` if
/// they are clockwise, deciding degenerate cases by symbolic perturbation.
///
/// The result is antisymmetric under argument swaps and never zero unless
/// two of the points are equal (component-wise).
#[must_use]
pub fn sign(a: Point, b: Point, c: Point) -> i32 {
    let sign = triage_sign(a, b, c);
    if sign != 0 {
        return sign;
    }
    expensive_sign(a, b, c)
}

/// The fast evaluation: reliable whenever the determinant is clear of the
/// error band.
fn triage_sign(a: Point, b: Point, c: Point) -> i32 {
    let det = a.cross(b).dot(c);
    if det > MAX_DETERMINANT_ERROR {
        return 1;
    }
    if det < -MAX_DETERMINANT_ERROR {
        return -1;
    }
    0
}

/// The slow path: a better-conditioned evaluation, then exact arithmetic.
fn expensive_sign(a: Point, b: Point, c: Point) -> i32 {
    // Equal points have no orientation.
    if a == b || b == c || c == a {
        return 0;
    }

    let sign = stable_sign(a, b, c);
    if sign != 0 {
        return sign;
    }
    exact_sign(a, b, c)
}

/// Recomputes the determinant from edge differences, which is much more
/// accurate when the triangle is small but not degenerate.
fn stable_sign(a: Point, b: Point, c: Point) -> i32 {
    let ab = b - a;
    let bc = c - b;
    let ca = a - c;
    let ab2 = ab.norm2();
    let bc2 = bc.norm2();
    let ca2 = ca.norm2();

    // Compute the two shortest edges, pointing away from the vertex
    // opposite the longest one.
    let (e1, e2, op) = if ab2 >= bc2 && ab2 >= ca2 {
        (ca, bc, c)
    } else if bc2 >= ca2 {
        (ab, ca, a)
    } else {
        (bc, ab, b)
    };

    let det = e1.cross(e2).dot(op);
    let max_error = DET_ERROR_MULTIPLIER * (e1.norm2() * e2.norm2()).sqrt();
    if det > max_error {
        1
    } else if det < -max_error {
        -1
    } else {
        0
    }
}

/// Error-free evaluation over floating-point expansions, with symbolic
/// perturbation of exact zeros.
fn exact_sign(a: Point, b: Point, c: Point) -> i32 {
    // Sort the points lexicographically, tracking the permutation parity,
    // so that the perturbation is consistent across argument orders.
    let (mut pa, mut pb, mut pc) = (a, b, c);
    let mut perm_sign = 1;
    if pa.cmp_components(pb) == Ordering::Greater {
        std::mem::swap(&mut pa, &mut pb);
        perm_sign = -perm_sign;
    }
    if pb.cmp_components(pc) == Ordering::Greater {
        std::mem::swap(&mut pb, &mut pc);
        perm_sign = -perm_sign;
    }
    if pa.cmp_components(pb) == Ordering::Greater {
        std::mem::swap(&mut pa, &mut pb);
        perm_sign = -perm_sign;
    }
    debug_assert!(
        pa.cmp_components(pb) == Ordering::Less
            && pb.cmp_components(pc) == Ordering::Less
    );

    let det_sign = det3_sign(pa, pb, pc);
    if det_sign != 0 {
        return perm_sign * det_sign;
    }
    perm_sign * symbolically_perturbed_sign(pa, pb, pc)
}

/// Decides the orientation of an exactly-degenerate triple by perturbing
/// the points by infinitesimals of decreasing order (in the sorted order
/// established by the caller) and taking the first non-vanishing term.
fn symbolically_perturbed_sign(a: Point, b: Point, c: Point) -> i32 {
    // Each test is the sign of a minor of the perturbed determinant, taken
    // in an order that guarantees termination; see "Simulation of
    // Simplicity" (Edelsbrunner & Mücke).
    let sign = det2_sign(b.x, b.y, c.x, c.y); // (b × c).z
    if sign != 0 {
        return sign;
    }
    let sign = det2_sign(b.z, b.x, c.z, c.x); // (b × c).y
    if sign != 0 {
        return sign;
    }
    let sign = det2_sign(b.y, b.z, c.y, c.z); // (b × c).x
    if sign != 0 {
        return sign;
    }

    let sign = det2_sign(c.x, c.y, a.x, a.y); // c[0]·a[1] − c[1]·a[0]
    if sign != 0 {
        return sign;
    }
    let sign = sign_of(c.x);
    if sign != 0 {
        return sign;
    }
    let sign = -sign_of(c.y);
    if sign != 0 {
        return sign;
    }
    let sign = det2_sign(c.z, c.x, a.z, a.x); // c[2]·a[0] − c[0]·a[2]
    if sign != 0 {
        return sign;
    }
    let sign = sign_of(c.z);
    if sign != 0 {
        return sign;
    }
    // The remaining minors all vanish identically; the lowest-order
    // perturbation term is positive.
    1
}

/// Returns true if the edge `o`-`b` is between edges `o`-`a` and `o`-`c`
/// when sweeping counterclockwise from `a` to `c`.
///
/// Requires that the three edges are distinct and `a != -c`; ties are
/// broken consistently via [`sign`].
#[must_use]
pub fn ordered_ccw(a: Point, b: Point, c: Point, o: Point) -> bool {
    // At most one of the three orderings can be violated for the sweep to
    // pass through b.
    let mut sum = 0;
    if sign(b, o, a) >= 0 {
        sum += 1;
    }
    if sign(c, o, b) >= 0 {
        sum += 1;
    }
    if sign(a, o, c) > 0 {
        sum += 1;
    }
    sum >= 2
}

// ---- Floating-point expansions ----------------------------------------------
//
// An expansion is a sum of floating-point values of strictly increasing
// magnitude with non-overlapping mantissas, so that the exact value of the
// sum is representable and its sign is the sign of the largest component.

fn sign_of(x: f64) -> i32 {
    if x > 0. {
        1
    } else if x < 0. {
        -1
    } else {
        0
    }
}

/// Error-free sum: returns `(s, e)` with `s + e == a + b` exactly.
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bv = s - a;
    let av = s - bv;
    (s, (a - av) + (b - bv))
}

/// Error-free product via FMA: returns `(p, e)` with `p + e == a · b`
/// exactly.
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Adds a scalar into an expansion, keeping it exact.
fn grow_expansion(e: &mut Vec<f64>, scalar: f64) {
    let mut q = scalar;
    let mut out = Vec::with_capacity(e.len() + 1);
    for &term in e.iter() {
        let (sum, err) = two_sum(q, term);
        if err != 0. {
            out.push(err);
        }
        q = sum;
    }
    out.push(q);
    *e = out;
}

/// The exact sign of an expansion: the sign of its largest component.
fn expansion_sign(e: &[f64]) -> i32 {
    sign_of(*e.last().unwrap_or(&0.))
}

/// The exact sign of the 2×2 determinant `a·d − b·c`.
fn det2_sign(a: f64, b: f64, c: f64, d: f64) -> i32 {
    let (p, pe) = two_prod(a, d);
    let (q, qe) = two_prod(b, c);
    let mut e = Vec::with_capacity(4);
    grow_expansion(&mut e, pe);
    grow_expansion(&mut e, -qe);
    grow_expansion(&mut e, p);
    grow_expansion(&mut e, -q);
    expansion_sign(&e)
}

/// The exact sign of `(b × c) · a`.
fn det3_sign(a: Point, b: Point, c: Point) -> i32 {
    let mut e = Vec::with_capacity(24);

    // (b × c) · a expands into three 2×2 minors, each scaled by one
    // coordinate of a.
    let mut minor = |p: f64, q: f64, r: f64, s: f64, scale: f64| {
        let (d1, d1e) = two_prod(p, q);
        let (d2, d2e) = two_prod(r, s);
        for term in [d1, d1e, -d2, -d2e] {
            let (prod, err) = two_prod(term, scale);
            if err != 0. {
                grow_expansion(&mut e, err);
            }
            if prod != 0. {
                grow_expansion(&mut e, prod);
            }
        }
    };

    minor(b.y, c.z, b.z, c.y, a.x);
    minor(b.z, c.x, b.x, c.z, a.y);
    minor(b.x, c.y, b.y, c.x, a.z);

    expansion_sign(&e)
}

#[cfg(test)]
#[path = "./predicates_tests.rs"]
mod tests;
