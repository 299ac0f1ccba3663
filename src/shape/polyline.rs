use super::{
    Chain, ChainPosition, Dimension, Edge, ReferencePoint, Shape,
};
use crate::point::Point;

/// A dimension-1 shape: a single polyline.
///
/// Duplicate consecutive vertices are permitted (producing degenerate
/// edges), which makes this type suitable for representing the output of
/// edge-snapping operations without cleanup.
#[derive(Debug, Clone, Default)]
pub struct LaxPolyline {
    vertices: Vec<Point>,
}

impl LaxPolyline {
    /// Initializes a polyline from the given vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// The number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex with the given index.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }
}

impl Shape for LaxPolyline {
    fn num_edges(&self) -> i32 {
        (self.vertices.len() as i32 - 1).max(0)
    }

    fn edge(&self, edge_id: i32) -> Edge {
        let e = edge_id as usize;
        Edge::new(self.vertices[e], self.vertices[e + 1])
    }

    fn num_chains(&self) -> i32 {
        self.num_edges().min(1)
    }

    fn chain(&self, chain_id: i32) -> Chain {
        debug_assert_eq!(chain_id, 0);
        Chain {
            start: 0,
            length: self.num_edges(),
        }
    }

    fn chain_edge(&self, chain_id: i32, offset: i32) -> Edge {
        debug_assert_eq!(chain_id, 0);
        self.edge(offset)
    }

    fn chain_position(&self, edge_id: i32) -> ChainPosition {
        ChainPosition {
            chain_id: 0,
            offset: edge_id,
        }
    }

    fn dimension(&self) -> Dimension {
        Dimension::Polyline
    }

    fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::origin(false)
    }
}
