use super::robust_cross;
use crate::{point::Point, predicates, DBL_EPSILON};

/// The outcome of an edge crossing test.
///
/// `Maybe` means the edges share a vertex; whether that counts as a
/// crossing depends on the caller's convention (see [`vertex_crossing`]).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Crossing {
    /// The edges cross at an interior point of both.
    Cross,
    /// The edges share a vertex (and cross nowhere else).
    Maybe,
    /// The edges do not cross.
    DoNotCross,
}

/// Reports whether edge AB crosses edge CD at an interior point.
///
/// Properties: symmetric in (AB, CD), in (A, B) and in (C, D); returns
/// [`Crossing::Maybe`] exactly when the edges share a vertex; degenerate
/// edges never cross (but a shared vertex with one still reports `Maybe`).
#[must_use]
pub fn crossing_sign(a: Point, b: Point, c: Point, d: Point) -> Crossing {
    let mut crosser = EdgeCrosser::new_chain(a, b, c);
    crosser.chain_crossing_sign(d)
}

/// Decides whether two edges sharing a vertex count as crossing.
///
/// Defined so that for any four edges forming two paths through a shared
/// vertex, exactly one of the two pairings is considered crossing. This
/// makes parity counts over closed boundaries consistent.
#[must_use]
pub fn vertex_crossing(a: Point, b: Point, c: Point, d: Point) -> bool {
    // A degenerate edge yields no crossing.
    if a == b || c == d {
        return false;
    }

    // The edge CD crosses iff it is "further counterclockwise" around the
    // shared vertex than AB, measured from a fixed reference direction.
    if a == d {
        return predicates::ordered_ccw(a.ortho(), c, b, a);
    }
    if b == c {
        return predicates::ordered_ccw(b.ortho(), d, a, b);
    }
    if a == c {
        return predicates::ordered_ccw(a.ortho(), d, b, a);
    }
    if b == d {
        return predicates::ordered_ccw(b.ortho(), c, a, b);
    }
    false
}

/// A crossing test that treats shared-vertex cases via
/// [`vertex_crossing`], suitable for parity counting.
#[must_use]
pub fn edge_or_vertex_crossing(a: Point, b: Point, c: Point, d: Point) -> bool {
    match crossing_sign(a, b, c, d) {
        Crossing::Cross => true,
        Crossing::DoNotCross => false,
        Crossing::Maybe => vertex_crossing(a, b, c, d),
    }
}

// -----------------------------------------------------------------------------

/// A stateful crossing tester for one fixed edge AB against a chain of
/// edges.
///
/// Testing consecutive chain edges reuses the orientation computed for the
/// shared vertex, roughly halving the cost in the index-build and
/// containment hot paths.
#[derive(Debug, Clone)]
pub struct EdgeCrosser {
    a: Point,
    b: Point,
    a_cross_b: Point,

    /// Outward-facing tangents at a and b, for the quick rejection test.
    a_tangent: Point,
    b_tangent: Point,

    /// The previous chain vertex and the orientation of triangle ACB.
    c: Point,
    acb: i32,
}

impl EdgeCrosser {
    /// Initializes a crosser for the edge AB.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        let norm = robust_cross(a, b).normalize();
        Self {
            a,
            b,
            a_cross_b: a.cross(b),
            a_tangent: a.cross(norm),
            b_tangent: norm.cross(b),
            c: Point::default(),
            acb: 0,
        }
    }

    /// Initializes a crosser for AB whose first chain vertex is `c`.
    #[must_use]
    pub fn new_chain(a: Point, b: Point, c: Point) -> Self {
        let mut crosser = Self::new(a, b);
        crosser.restart_at(c);
        crosser
    }

    /// Restarts the chain at the given vertex.
    pub fn restart_at(&mut self, c: Point) {
        self.c = c;
        self.acb = -triage_sign_with(c, self.a_cross_b);
    }

    /// Tests the edge from the previous chain vertex to `d`, advancing the
    /// chain.
    pub fn chain_crossing_sign(&mut self, d: Point) -> Crossing {
        // The common case: the two triangles have opposite orientations,
        // so the chain edge stays on one side of AB.
        let bda = triage_sign_with(d, self.a_cross_b);
        if self.acb == -bda && bda != 0 {
            self.c = d;
            self.acb = -bda;
            return Crossing::DoNotCross;
        }
        self.crossing_sign_internal(d, bda)
    }

    /// Tests the edge CD, restarting the chain at `c` if needed.
    pub fn crossing_sign(&mut self, c: Point, d: Point) -> Crossing {
        if self.c != c {
            self.restart_at(c);
        }
        self.chain_crossing_sign(d)
    }

    /// Tests the edge CD for parity counting, restarting the chain at `c`
    /// if needed.
    pub fn edge_or_vertex_crossing(&mut self, c: Point, d: Point) -> bool {
        if self.c != c {
            self.restart_at(c);
        }
        self.chain_edge_or_vertex_crossing(d)
    }

    /// Same as [`EdgeCrosser::chain_crossing_sign`] folded through
    /// [`vertex_crossing`] for parity counting.
    pub fn chain_edge_or_vertex_crossing(&mut self, d: Point) -> bool {
        let c = self.c;
        match self.chain_crossing_sign(d) {
            Crossing::Cross => true,
            Crossing::DoNotCross => false,
            Crossing::Maybe => vertex_crossing(self.a, self.b, c, d),
        }
    }

    fn crossing_sign_internal(&mut self, d: Point, bda: i32) -> Crossing {
        let result = self.crossing_sign_body(d, bda);
        self.c = d;
        // bda may have been refined by the body; recompute the cached
        // orientation the same way the next call expects it.
        self.acb = -triage_sign_with(d, self.a_cross_b);
        result
    }

    fn crossing_sign_body(&mut self, d: Point, mut bda: i32) -> Crossing {
        // When AB does not overlap CD, both C and D usually lie beyond one
        // of the two outward tangents; this rejection is much cheaper than
        // the exact predicates.
        let error = (1.5 + 1. / 3.0f64.sqrt()) * DBL_EPSILON;
        if (self.c.dot(self.a_tangent) > error && d.dot(self.a_tangent) > error)
            || (self.c.dot(self.b_tangent) > error
                && d.dot(self.b_tangent) > error)
        {
            return Crossing::DoNotCross;
        }

        // Shared vertices are resolved by the caller's vertex convention.
        if self.a == self.c || self.a == d || self.b == self.c || self.b == d {
            return Crossing::Maybe;
        }

        // Degenerate edges cross nothing.
        if self.a == self.b || self.c == d {
            return Crossing::DoNotCross;
        }

        // All four triangles must have the same orientation for the edges
        // to cross.
        if self.acb == 0 {
            self.acb = -predicates::sign(self.a, self.b, self.c);
        }
        if bda == 0 {
            bda = predicates::sign(self.a, self.b, d);
        }
        if bda != self.acb {
            return Crossing::DoNotCross;
        }

        let cbd = -predicates::sign(self.c, d, self.b);
        if cbd != self.acb {
            return Crossing::DoNotCross;
        }
        let dac = predicates::sign(self.c, d, self.a);
        if dac != self.acb {
            return Crossing::DoNotCross;
        }
        Crossing::Cross
    }
}

/// Triage orientation with a precomputed cross product.
fn triage_sign_with(c: Point, a_cross_b: Point) -> i32 {
    const MAX_DET_ERROR: f64 = 1.8274 * DBL_EPSILON;
    let det = a_cross_b.dot(c);
    if det > MAX_DET_ERROR {
        return 1;
    }
    if det < -MAX_DET_ERROR {
        return -1;
    }
    0
}

#[cfg(test)]
#[path = "./crosser_tests.rs"]
mod tests;
