use super::{cell::ClippedShape, IndexState, ShapeIndex};
use crate::{
    edge::crosser::EdgeCrosser,
    point::Point,
    shape::{Dimension, Shape, ShapeId},
};
use std::sync::Arc;

/// Point containment tests against the shapes of an index.
///
/// Containment is decided by parity: the known classification at the
/// covering cell's center is carried to the query point across the edges
/// clipped to that cell. Boundaries follow the semi-open model, so every
/// point of the sphere is inside a well-defined set of shapes.
pub struct ContainsPointQuery {
    state: Arc<IndexState>,
}

impl ContainsPointQuery {
    /// Initializes a query against the given index, rebuilding it first
    /// if stale.
    #[must_use]
    pub fn new(index: &ShapeIndex) -> Self {
        Self {
            state: index.snapshot(),
        }
    }

    /// Returns true if any indexed shape contains the given point.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let mut iter = super::iterator::ShapeIndexIterator::new(Arc::clone(
            &self.state,
        ));
        if !iter.locate_point(p) {
            return false;
        }
        let center = iter.center();
        iter.index_cell()
            .is_some_and(|cell| {
                cell.clipped().iter().any(|clipped| {
                    self.clipped_contains(clipped, center, p)
                })
            })
    }

    /// Returns true if the shape with the given id contains the point.
    #[must_use]
    pub fn shape_contains(&self, shape_id: ShapeId, p: Point) -> bool {
        let mut iter = super::iterator::ShapeIndexIterator::new(Arc::clone(
            &self.state,
        ));
        if !iter.locate_point(p) {
            return false;
        }
        let center = iter.center();
        iter.index_cell()
            .and_then(|cell| cell.find(shape_id))
            .is_some_and(|clipped| self.clipped_contains(clipped, center, p))
    }

    /// Visits the ids of all shapes containing the point, in ascending
    /// order. Stops early if the visitor returns false.
    pub fn visit_containing_shapes(
        &self,
        p: Point,
        mut visit: impl FnMut(ShapeId) -> bool,
    ) -> bool {
        let mut iter = super::iterator::ShapeIndexIterator::new(Arc::clone(
            &self.state,
        ));
        if !iter.locate_point(p) {
            return true;
        }
        let center = iter.center();
        if let Some(cell) = iter.index_cell() {
            for clipped in cell.clipped() {
                if self.clipped_contains(clipped, center, p)
                    && !visit(clipped.shape_id)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Carries the center classification of a cell to `p` by counting
    /// crossings with the clipped edges.
    fn clipped_contains(
        &self,
        clipped: &ClippedShape,
        center: Point,
        p: Point,
    ) -> bool {
        let mut inside = clipped.contains_center;
        if clipped.num_edges() == 0 {
            return inside;
        }
        let Some(shape) = self.state.shape(clipped.shape_id) else {
            return false;
        };
        if shape.dimension() != Dimension::Polygon {
            return false;
        }

        let mut crosser = EdgeCrosser::new(center, p);
        for &e in &clipped.edges {
            let edge = shape.edge(e);
            inside ^= crosser.edge_or_vertex_crossing(edge.v0, edge.v1);
        }
        inside
    }
}

/// Containment test running over all edges of a single shape, without an
/// index.
///
/// Linear in the number of edges; the index build uses it once per shape
/// to classify the tracker's starting focus.
pub(crate) fn contains_brute_force(shape: &dyn Shape, point: Point) -> bool {
    if shape.dimension() != Dimension::Polygon {
        return false;
    }

    let reference = shape.reference_point();
    if reference.point == point {
        return reference.contained;
    }

    let mut crosser = EdgeCrosser::new(reference.point, point);
    let mut inside = reference.contained;
    for e in 0..shape.num_edges() {
        let edge = shape.edge(e);
        inside ^= crosser.edge_or_vertex_crossing(edge.v0, edge.v1);
    }
    inside
}
