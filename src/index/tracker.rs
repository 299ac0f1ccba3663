use crate::{
    point::Point,
    shape::{Edge, ShapeId},
};
use ahash::{HashMap, HashMapExt};
use smallvec::SmallVec;

/// A vertex identity key: exact bit-level equality, no tolerance.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
struct VertexKey(u64, u64, u64);

impl From<Point> for VertexKey {
    fn from(p: Point) -> Self {
        Self(p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
    }
}

/// Tracks shape vertices touched by three or more edges of the same
/// shape during index population.
///
/// Two incident edges at a vertex is the ordinary chain case (one in, one
/// out) and is discarded; higher degrees indicate degeneracies or
/// self-touching boundaries that later polygon operations must know
/// about. State accumulates across shapes until [`IncidentEdgeTracker::reset`].
#[derive(Default)]
pub struct IncidentEdgeTracker {
    /// The shape currently being added.
    current_shape: Option<ShapeId>,
    /// Vertex/edge pairs seen for the current shape.
    nursery: Vec<(Point, i32)>,
    /// Finished groups of three or more incident edges.
    incident: HashMap<(ShapeId, VertexKey), SmallVec<[i32; 4]>>,
    /// The vertex values backing the keys, for iteration.
    vertices: HashMap<(ShapeId, VertexKey), Point>,
}

impl IncidentEdgeTracker {
    /// Initializes an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins collecting edges for the given shape.
    pub fn start_shape(&mut self, shape_id: ShapeId) {
        debug_assert!(self.current_shape.is_none());
        self.current_shape = Some(shape_id);
        self.nursery.clear();
    }

    /// Registers an edge of the current shape.
    ///
    /// Both endpoints enter the nursery, except that a degenerate edge
    /// counts only once.
    pub fn add_edge(&mut self, edge_id: i32, edge: &Edge) {
        debug_assert!(self.current_shape.is_some());
        self.nursery.push((edge.v0, edge_id));
        if !edge.is_degenerate() {
            self.nursery.push((edge.v1, edge_id));
        }
    }

    /// Finishes the current shape: groups the nursery by vertex and
    /// records every group of three or more incident edges.
    pub fn finish_shape(&mut self) {
        let Some(shape_id) = self.current_shape.take() else {
            return;
        };

        // Group by exact vertex value; sorting brings equal vertices
        // together and edge ids into order.
        self.nursery.sort_unstable_by(|(pa, ea), (pb, eb)| {
            pa.cmp_components(*pb).then_with(|| ea.cmp(eb))
        });

        let mut begin = 0;
        while begin < self.nursery.len() {
            let vertex = self.nursery[begin].0;
            let mut end = begin + 1;
            while end < self.nursery.len()
                && self.nursery[end].0 == vertex
            {
                end += 1;
            }

            // The in-and-out chain case (degree <= 2) carries no
            // information.
            if end - begin >= 3 {
                let key = (shape_id, VertexKey::from(vertex));
                let edges = self.incident.entry(key).or_default();
                for &(_, edge_id) in &self.nursery[begin..end] {
                    if !edges.contains(&edge_id) {
                        edges.push(edge_id);
                    }
                }
                edges.sort_unstable();
                self.vertices.insert(key, vertex);
            }
            begin = end;
        }
        self.nursery.clear();
    }

    /// The edges incident to the given shape vertex, if three or more
    /// were recorded.
    #[must_use]
    pub fn incident_edges(
        &self,
        shape_id: ShapeId,
        vertex: Point,
    ) -> Option<&[i32]> {
        self.incident
            .get(&(shape_id, VertexKey::from(vertex)))
            .map(SmallVec::as_slice)
    }

    /// Visits every recorded `(shape, vertex, edge ids)` group.
    pub fn visit(
        &self,
        mut visitor: impl FnMut(ShapeId, Point, &[i32]),
    ) {
        for (key, edges) in &self.incident {
            let vertex = self.vertices[key];
            visitor(key.0, vertex, edges);
        }
    }

    /// Returns true if no groups have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incident.is_empty()
    }

    /// Discards all state.
    pub fn reset(&mut self) {
        self.current_shape = None;
        self.nursery.clear();
        self.incident.clear();
        self.vertices.clear();
    }
}

#[cfg(test)]
#[path = "./tracker_tests.rs"]
mod tests;
