use super::{
    reference_point_for_shape, Chain, ChainPosition, Dimension, Edge,
    ReferencePoint, Shape,
};
use crate::point::Point;

/// A dimension-2 shape: a single closed loop, with the interior on the
/// left of its edges.
///
/// A loop of `n` vertices defines `n` edges, the last closing back to the
/// first vertex. Degenerate edges are permitted. The empty and full loops
/// both have zero vertices and are told apart by a flag.
#[derive(Debug, Clone)]
pub struct LaxLoop {
    vertices: Vec<Point>,
    full: bool,
}

impl LaxLoop {
    /// Initializes a loop from the given vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            full: false,
        }
    }

    /// The loop containing no points.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            full: false,
        }
    }

    /// The loop containing the whole sphere.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            vertices: Vec::new(),
            full: true,
        }
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

impl Shape for LaxLoop {
    fn num_edges(&self) -> i32 {
        self.vertices.len() as i32
    }

    fn edge(&self, edge_id: i32) -> Edge {
        let e = edge_id as usize;
        let next = if e + 1 == self.vertices.len() { 0 } else { e + 1 };
        Edge::new(self.vertices[e], self.vertices[next])
    }

    fn num_chains(&self) -> i32 {
        if self.vertices.is_empty() {
            // The full loop is a single empty chain, the empty loop none.
            i32::from(self.full)
        } else {
            1
        }
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
        Dimension::Polygon
    }

    fn reference_point(&self) -> ReferencePoint {
        reference_point_for_shape(self)
    }
}
