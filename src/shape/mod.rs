//! The polymorphic shape interface and its concrete variants.
//!
//! A [`Shape`] is a collection of edges, grouped into chains, with a
//! dimension and an optional interior. Shapes are the unit of insertion
//! into a [`crate::ShapeIndex`]; the index borrows them by id and never
//! inspects anything beyond this interface.

mod lax_loop;
mod lax_polygon;
mod point_vector;
mod polyline;

pub use lax_loop::LaxLoop;
pub use lax_polygon::LaxPolygon;
pub use point_vector::PointVector;
pub use polyline::LaxPolyline;

use crate::{point::Point, predicates};
use std::cmp::Ordering;

/// Identifier of a shape within a shape index.
pub type ShapeId = i32;

/// The dimension of a shape's geometry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Dimension {
    /// A set of points.
    Point = 0,
    /// A set of polylines.
    Polyline = 1,
    /// A set of polygons, with interiors.
    Polygon = 2,
}

/// A directed edge: the shorter great-circle arc from `v0` to `v1`
/// (degenerate when the two are equal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Start vertex.
    pub v0: Point,
    /// End vertex.
    pub v1: Point,
}

impl Edge {
    /// Initializes an edge from its endpoints.
    #[must_use]
    pub const fn new(v0: Point, v1: Point) -> Self {
        Self { v0, v1 }
    }

    /// Returns true if the two endpoints are equal.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.v0 == self.v1
    }

    /// The edge with its endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v1,
            v1: self.v0,
        }
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.v0
            .cmp_components(other.v0)
            .then_with(|| self.v1.cmp_components(other.v1))
    }
}

/// A contiguous run of edges within a shape, identified by the id of its
/// first edge and its length.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Chain {
    /// Id of the first edge of the chain.
    pub start: i32,
    /// Number of edges in the chain.
    pub length: i32,
}

/// The position of an edge within a shape: which chain, and the offset
/// within it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ChainPosition {
    /// The chain the edge belongs to.
    pub chain_id: i32,
    /// The edge's offset within that chain.
    pub offset: i32,
}

/// A point paired with the shape's claim about containing it.
///
/// Seeds interior classification: the index propagates containment from
/// this point to cell centers by counting edge crossings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    /// The reference point.
    pub point: Point,
    /// Whether the shape contains it.
    pub contained: bool,
}

impl ReferencePoint {
    /// A reference point at the fixed origin with the given containment.
    #[must_use]
    pub const fn origin(contained: bool) -> Self {
        Self {
            point: Point::origin(),
            contained,
        }
    }
}

/// The interface that all shapes expose to the index and query engines.
///
/// Edges are numbered `0..num_edges` and are the concatenation of the
/// shape's chains in order. For dimension-2 shapes the interior is on the
/// left of every directed edge.
///
/// Shapes are immutable once built; requiring `Send + Sync` lets a built
/// index be shared freely across threads.
pub trait Shape: Send + Sync {
    /// The number of edges in the shape.
    fn num_edges(&self) -> i32;

    /// The edge with the given id, in `[0, num_edges)`.
    fn edge(&self, edge_id: i32) -> Edge;

    /// The number of chains the edges are grouped into.
    fn num_chains(&self) -> i32;

    /// The chain with the given id, in `[0, num_chains)`.
    fn chain(&self, chain_id: i32) -> Chain;

    /// The edge at the given offset within the given chain.
    fn chain_edge(&self, chain_id: i32, offset: i32) -> Edge;

    /// The chain and offset corresponding to an edge id.
    fn chain_position(&self, edge_id: i32) -> ChainPosition;

    /// The dimension of the shape's geometry.
    fn dimension(&self) -> Dimension;

    /// A point with known containment status.
    fn reference_point(&self) -> ReferencePoint;

    /// Returns true if the shape contains no points.
    fn is_empty(&self) -> bool {
        self.num_edges() == 0
            && (self.dimension() != Dimension::Polygon || self.num_chains() == 0)
    }

    /// Returns true if the shape contains all points of the sphere.
    fn is_full(&self) -> bool {
        self.num_edges() == 0
            && self.dimension() == Dimension::Polygon
            && self.num_chains() > 0
    }
}

// -----------------------------------------------------------------------------

/// Computes a reference point for an arbitrary dimension-2 shape.
///
/// Finds a vertex with an unmatched edge (one with no reversed twin) and
/// tests containment of the region immediately to its left; a shape whose
/// edges all come in sibling pairs has no boundary, and is full exactly
/// when it contains an empty chain.
pub(crate) fn reference_point_for_shape<S: Shape + ?Sized>(
    shape: &S,
) -> ReferencePoint {
    if shape.num_edges() == 0 {
        return ReferencePoint::origin(shape.num_chains() > 0);
    }

    // Often every vertex is unbalanced, so try an arbitrary one first.
    let edge = shape.edge(0);
    if let Some(reference) = reference_point_at_vertex(shape, edge.v0) {
        return reference;
    }

    // Pair up edges with reversed edges; the first mismatch in sorted
    // order is guaranteed to be unmatched.
    let n = shape.num_edges() as usize;
    let mut edges = Vec::with_capacity(n);
    let mut rev_edges = Vec::with_capacity(n);
    for i in 0..shape.num_edges() {
        let edge = shape.edge(i);
        edges.push(edge);
        rev_edges.push(edge.reversed());
    }
    edges.sort_unstable();
    rev_edges.sort_unstable();

    for i in 0..n {
        if edges[i] < rev_edges[i] {
            if let Some(reference) =
                reference_point_at_vertex(shape, edges[i].v0)
            {
                return reference;
            }
        }
        if rev_edges[i] < edges[i] {
            if let Some(reference) =
                reference_point_at_vertex(shape, rev_edges[i].v0)
            {
                return reference;
            }
        }
    }

    // Every vertex is balanced: the shape is empty or full. By convention
    // it is full if it contains any empty chain.
    for chain_id in 0..shape.num_chains() {
        if shape.chain(chain_id).length == 0 {
            return ReferencePoint::origin(true);
        }
    }
    ReferencePoint::origin(false)
}

/// Tests whether the given vertex is contained by the shape, unless its
/// incident edges all pair up into siblings.
fn reference_point_at_vertex<S: Shape + ?Sized>(
    shape: &S,
    vertex: Point,
) -> Option<ReferencePoint> {
    let mut query = ContainsVertexQuery::new(vertex);
    for e in 0..shape.num_edges() {
        let edge = shape.edge(e);
        if edge.v0 == vertex {
            query.add_outgoing(edge.v1);
        }
        if edge.v1 == vertex {
            query.add_incoming(edge.v0);
        }
    }

    match query.contains_vertex() {
        0 => None,
        sign => Some(ReferencePoint {
            point: vertex,
            contained: sign > 0,
        }),
    }
}

/// Decides whether a target vertex is contained by the region whose
/// boundary edges touch it.
///
/// Each incident edge votes `+1` (outgoing) or `-1` (incoming) on its far
/// vertex; the vertex is contained iff the unmatched edge immediately
/// clockwise from a fixed reference direction is outgoing.
pub(crate) struct ContainsVertexQuery {
    target: Point,
    edges: Vec<(Point, i32)>,
}

impl ContainsVertexQuery {
    pub(crate) fn new(target: Point) -> Self {
        Self {
            target,
            edges: Vec::new(),
        }
    }

    pub(crate) fn add_outgoing(&mut self, v: Point) {
        self.add(v, 1);
    }

    pub(crate) fn add_incoming(&mut self, v: Point) {
        self.add(v, -1);
    }

    fn add(&mut self, v: Point, direction: i32) {
        if let Some(entry) =
            self.edges.iter_mut().find(|(p, _)| p.cmp_components(v) == Ordering::Equal)
        {
            entry.1 += direction;
        } else {
            self.edges.push((v, direction));
        }
    }

    /// Returns `+1` if the target vertex is contained, `-1` if not, and
    /// `0` if the incident edges consist entirely of matched sibling pairs.
    pub(crate) fn contains_vertex(&self) -> i32 {
        let reference_dir = self.target.ortho();

        let mut best_point = reference_dir;
        let mut best_dir = 0;
        for &(v, dir) in &self.edges {
            if dir == 0 {
                // Balanced: an equal number of edges in each direction.
                continue;
            }
            if predicates::ordered_ccw(reference_dir, best_point, v, self.target)
            {
                best_point = v;
                best_dir = dir;
            }
        }
        best_dir
    }
}

#[cfg(test)]
#[path = "./shape_tests.rs"]
mod tests;
