use crate::shape::ShapeId;
use smallvec::SmallVec;

/// The intersection of one shape with one index cell: the ids of the
/// shape's edges that intersect the cell, plus whether the cell's center
/// is in the shape's interior.
#[derive(Debug, Clone, Default)]
pub struct ClippedShape {
    /// The shape this clip belongs to.
    pub shape_id: ShapeId,
    /// True if the center of the cell is inside the shape.
    pub contains_center: bool,
    /// Ids of the shape's edges that intersect the cell.
    pub edges: SmallVec<[i32; 8]>,
}

impl ClippedShape {
    pub(crate) fn new(shape_id: ShapeId, num_edges: usize) -> Self {
        Self {
            shape_id,
            contains_center: false,
            edges: SmallVec::with_capacity(num_edges),
        }
    }

    /// The number of clipped edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the clip contains the given edge id.
    #[must_use]
    pub fn contains_edge(&self, edge_id: i32) -> bool {
        // Edge ids are sorted, but linear search is faster for the short
        // lists the subdivision produces.
        self.edges.iter().any(|&e| e == edge_id)
    }
}

/// The contents of one index cell: the clipped shapes intersecting it,
/// sorted by shape id.
#[derive(Debug, Clone, Default)]
pub struct IndexCell {
    shapes: Vec<ClippedShape>,
}

impl IndexCell {
    pub(crate) fn with_capacity(num_shapes: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(num_shapes),
        }
    }

    pub(crate) fn push(&mut self, clipped: ClippedShape) {
        debug_assert!(self
            .shapes
            .last()
            .map_or(true, |last| last.shape_id < clipped.shape_id));
        self.shapes.push(clipped);
    }

    /// The number of clipped shapes in the cell.
    #[must_use]
    pub fn num_clipped(&self) -> usize {
        self.shapes.len()
    }

    /// The clipped shapes, in ascending shape id order.
    #[must_use]
    pub fn clipped(&self) -> &[ClippedShape] {
        &self.shapes
    }

    /// The clip belonging to the given shape, if any.
    #[must_use]
    pub fn find(&self, shape_id: ShapeId) -> Option<&ClippedShape> {
        self.shapes
            .binary_search_by_key(&shape_id, |c| c.shape_id)
            .ok()
            .map(|i| &self.shapes[i])
    }
}
