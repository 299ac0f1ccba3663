use super::{
    reference_point_for_shape, Chain, ChainPosition, Dimension, Edge,
    ReferencePoint, Shape,
};
use crate::point::Point;

/// A dimension-2 shape: a polygon with any number of loops.
///
/// Shells wind counterclockwise and holes clockwise, so that the interior
/// is always on the left of the directed edges. Degenerate edges and
/// sibling pairs are permitted, which allows representing degenerate
/// shells and holes.
#[derive(Debug, Clone, Default)]
pub struct LaxPolygon {
    /// All loop vertices, concatenated.
    vertices: Vec<Point>,
    /// Index of each loop's first vertex, plus a trailing total.
    cumulative: Vec<i32>,
}

impl LaxPolygon {
    /// Initializes a polygon from its loops.
    #[must_use]
    pub fn new(loops: Vec<Vec<Point>>) -> Self {
        let mut cumulative = Vec::with_capacity(loops.len() + 1);
        cumulative.push(0);
        let mut vertices = Vec::new();
        for l in loops {
            vertices.extend_from_slice(&l);
            cumulative.push(vertices.len() as i32);
        }
        Self {
            vertices,
            cumulative,
        }
    }

    /// The polygon containing no points.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The polygon containing the whole sphere, represented as a single
    /// empty loop.
    #[must_use]
    pub fn full() -> Self {
        Self::new(vec![Vec::new()])
    }

    /// The number of loops.
    #[must_use]
    pub fn num_loops(&self) -> usize {
        self.cumulative.len() - 1
    }

    /// The number of vertices of the given loop.
    #[must_use]
    pub fn num_loop_vertices(&self, i: usize) -> usize {
        (self.cumulative[i + 1] - self.cumulative[i]) as usize
    }

    /// The `j`-th vertex of loop `i`.
    #[must_use]
    pub fn loop_vertex(&self, i: usize, j: usize) -> Point {
        debug_assert!(j < self.num_loop_vertices(i));
        self.vertices[self.cumulative[i] as usize + j]
    }
}

impl Shape for LaxPolygon {
    fn num_edges(&self) -> i32 {
        self.vertices.len() as i32
    }

    fn edge(&self, edge_id: i32) -> Edge {
        let position = self.chain_position(edge_id);
        self.chain_edge(position.chain_id, position.offset)
    }

    fn num_chains(&self) -> i32 {
        self.num_loops() as i32
    }

    fn chain(&self, chain_id: i32) -> Chain {
        let i = chain_id as usize;
        Chain {
            start: self.cumulative[i],
            length: self.cumulative[i + 1] - self.cumulative[i],
        }
    }

    fn chain_edge(&self, chain_id: i32, offset: i32) -> Edge {
        let i = chain_id as usize;
        let j = offset as usize;
        let n = self.num_loop_vertices(i);
        let next = if j + 1 == n { 0 } else { j + 1 };
        Edge::new(self.loop_vertex(i, j), self.loop_vertex(i, next))
    }

    fn chain_position(&self, edge_id: i32) -> ChainPosition {
        debug_assert!(edge_id < self.num_edges());
        // The first loop whose end lies beyond the edge id.
        let chain_id =
            self.cumulative.partition_point(|&start| start <= edge_id) - 1;
        ChainPosition {
            chain_id: chain_id as i32,
            offset: edge_id - self.cumulative[chain_id],
        }
    }

    fn dimension(&self) -> Dimension {
        Dimension::Polygon
    }

    fn reference_point(&self) -> ReferencePoint {
        reference_point_for_shape(self)
    }
}
