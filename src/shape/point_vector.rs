use super::{
    Chain, ChainPosition, Dimension, Edge, ReferencePoint, Shape,
};
use crate::point::Point;

/// A dimension-0 shape: a set of points, represented as degenerate edges.
///
/// Each point is its own chain of length 1. The points are not required
/// to be distinct.
#[derive(Debug, Clone, Default)]
pub struct PointVector {
    points: Vec<Point>,
}

impl PointVector {
    /// Initializes a shape from the given points.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The point with the given index.
    #[must_use]
    pub fn point(&self, i: usize) -> Point {
        self.points[i]
    }
}

impl Shape for PointVector {
    fn num_edges(&self) -> i32 {
        self.points.len() as i32
    }

    fn edge(&self, edge_id: i32) -> Edge {
        let p = self.points[edge_id as usize];
        Edge::new(p, p)
    }

    fn num_chains(&self) -> i32 {
        self.points.len() as i32
    }

    fn chain(&self, chain_id: i32) -> Chain {
        Chain {
            start: chain_id,
            length: 1,
        }
    }

    fn chain_edge(&self, chain_id: i32, offset: i32) -> Edge {
        debug_assert_eq!(offset, 0);
        self.edge(chain_id)
    }

    fn chain_position(&self, edge_id: i32) -> ChainPosition {
        ChainPosition {
            chain_id: edge_id,
            offset: 0,
        }
    }

    fn dimension(&self) -> Dimension {
        Dimension::Point
    }

    fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::origin(false)
    }
}
