//! Arc-length interpolation along shape chains.

use crate::{
    edge::interpolate::interpolate_at_distance,
    error::{EmptyChain, InvalidArgument},
    point::Point,
    shape::Shape,
    Angle,
};

/// The outcome of a distance or fraction lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationResult {
    /// The point at the requested distance along the chain.
    pub point: Point,
    /// The id of the edge the point lies on.
    pub edge_id: i32,
    /// The distance actually used, after clamping into the chain.
    pub distance: Angle,
}

/// Cumulative-arc-length lookup on the chain of a shape.
///
/// The table is built once; lookups are a binary search plus one edge
/// interpolation. Degenerate edges contribute zero length, and a query
/// landing exactly on a run of them resolves to the first.
pub struct ChainInterpolation<'a> {
    shape: &'a dyn Shape,
    /// Cumulative length through each edge boundary; empty for a chain
    /// with no edges.
    cumulative: Vec<Angle>,
    first_edge_id: i32,
    last_edge_id: i32,
}

impl<'a> ChainInterpolation<'a> {
    /// Initializes a lookup over one chain of the shape, or over the
    /// concatenation of all its edges when `chain_id` is negative.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`] when `chain_id` is not a chain of the shape.
    pub fn new(
        shape: &'a dyn Shape,
        chain_id: i32,
    ) -> Result<Self, InvalidArgument> {
        if chain_id >= shape.num_chains() {
            return Err(InvalidArgument::new("chain id out of range"));
        }
        let (first, last) = if chain_id >= 0 {
            let chain = shape.chain(chain_id);
            (chain.start, chain.start + chain.length - 1)
        } else {
            (0, shape.num_edges() - 1)
        };

        let mut cumulative = Vec::new();
        if first <= last {
            cumulative.reserve((last - first + 2) as usize);
            let mut total = Angle::ZERO;
            for e in first..=last {
                cumulative.push(total);
                let edge = shape.edge(e);
                total = total + edge.v0.angle(edge.v1);
            }
            cumulative.push(total);
        }

        Ok(Self {
            shape,
            cumulative,
            first_edge_id: first,
            last_edge_id: last,
        })
    }

    /// The total length of the chain.
    ///
    /// # Errors
    ///
    /// [`EmptyChain`] when the chain has no edges.
    pub fn length(&self) -> Result<Angle, EmptyChain> {
        self.cumulative.last().copied().ok_or(EmptyChain)
    }

    /// The cumulative length through the end of the given edge;
    /// [`Angle::INFINITY`] for edges outside the chain.
    ///
    /// # Errors
    ///
    /// [`EmptyChain`] when the chain has no edges.
    pub fn length_at_edge_end(&self, edge_id: i32) -> Result<Angle, EmptyChain> {
        if self.cumulative.is_empty() {
            return Err(EmptyChain);
        }
        if edge_id < self.first_edge_id || edge_id > self.last_edge_id {
            return Ok(Angle::INFINITY);
        }
        Ok(self.cumulative[(edge_id - self.first_edge_id + 1) as usize])
    }

    /// The point at the given distance from the start of the chain.
    ///
    /// The distance is clamped into `[0, length]`; the result reports the
    /// clamped value.
    ///
    /// # Errors
    ///
    /// [`EmptyChain`] when the chain has no edges.
    pub fn at_distance(
        &self,
        distance: Angle,
    ) -> Result<InterpolationResult, EmptyChain> {
        if self.cumulative.is_empty() {
            return Err(EmptyChain);
        }
        let total = *self.cumulative.last().expect("nonempty");

        // The chain ends are returned exactly, including for out-of-range
        // distances (which clamp). The start takes precedence so that a
        // fully degenerate chain resolves to its first edge.
        if distance <= Angle::ZERO {
            return Ok(InterpolationResult {
                point: self.shape.edge(self.first_edge_id).v0,
                edge_id: self.first_edge_id,
                distance: Angle::ZERO,
            });
        }
        if distance >= total {
            return Ok(InterpolationResult {
                point: self.shape.edge(self.last_edge_id).v1,
                edge_id: self.last_edge_id,
                distance: total,
            });
        }

        // The first cumulative boundary at or past the distance; the
        // guards above pin it strictly inside the table.
        let position =
            self.cumulative.partition_point(|&v| v < distance);
        debug_assert!(position >= 1 && position < self.cumulative.len());

        let edge_id = self.first_edge_id + position as i32 - 1;
        let edge = self.shape.edge(edge_id);
        let offset = distance - self.cumulative[position - 1];
        Ok(InterpolationResult {
            point: interpolate_at_distance(offset, edge.v0, edge.v1),
            edge_id,
            distance,
        })
    }

    /// The point at the given fraction of the chain's total length.
    ///
    /// Fractions outside `[0, 1]` clamp to the chain ends.
    ///
    /// # Errors
    ///
    /// [`EmptyChain`] when the chain has no edges.
    pub fn at_fraction(
        &self,
        fraction: f64,
    ) -> Result<InterpolationResult, EmptyChain> {
        let length = self.length()?;
        self.at_distance(length * fraction)
    }

    /// The points of the chain between two fractions: the interpolated
    /// endpoints plus every chain vertex in between.
    ///
    /// When `begin_fraction > end_fraction` the slice is reversed. An
    /// empty chain yields an empty slice.
    #[must_use]
    pub fn slice(&self, begin_fraction: f64, end_fraction: f64) -> Vec<Point> {
        let mut points = Vec::new();
        let reverse = begin_fraction > end_fraction;
        let (lo, hi) = if reverse {
            (end_fraction, begin_fraction)
        } else {
            (begin_fraction, end_fraction)
        };

        let Ok(begin) = self.at_fraction(lo) else {
            return points;
        };
        let Ok(end) = self.at_fraction(hi) else {
            return points;
        };

        points.push(begin.point);
        let mut last = begin.point;
        for edge_id in begin.edge_id..end.edge_id {
            let vertex = self.shape.edge(edge_id).v1;
            if last != vertex {
                last = vertex;
                points.push(vertex);
            }
        }
        points.push(end.point);

        if reverse {
            points.reverse();
        }
        points
    }

    /// Exactly `divisions` evenly spaced points along the slice between
    /// the two fractions.
    ///
    /// Chain vertices falling on sample positions are reproduced exactly.
    #[must_use]
    pub fn slice_divided(
        &self,
        begin_fraction: f64,
        end_fraction: f64,
        divisions: usize,
    ) -> Vec<Point> {
        debug_assert!(divisions >= 2);
        let mut points = Vec::with_capacity(divisions);
        if self.cumulative.is_empty() {
            return points;
        }

        let step = (end_fraction - begin_fraction) / (divisions - 1) as f64;
        for k in 0..divisions {
            let fraction = if k + 1 == divisions {
                end_fraction
            } else {
                (k as f64).mul_add(step, begin_fraction)
            };
            match self.at_fraction(fraction) {
                Ok(result) => points.push(result.point),
                Err(EmptyChain) => return Vec::new(),
            }
        }
        points
    }
}

#[cfg(test)]
#[path = "./chain_tests.rs"]
mod tests;
