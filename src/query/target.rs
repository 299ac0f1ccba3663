use crate::{
    cell::Cell,
    chord_angle::ChordAngle,
    edge::distance as edge_distance,
    index::{ContainsPointQuery, ShapeIndex},
    point::Point,
    shape::{Edge, ShapeId},
};

/// A distance measurement target for edge queries.
///
/// A target updates a running best distance against single edges and
/// whole cells; an update reports `Some(d)` only when `d` strictly
/// improves on the current best in the target's sense (smaller for
/// closest targets, larger for furthest ones).
pub trait DistanceTarget {
    /// The improved distance from the target to the edge, if any.
    fn update_distance_to_edge(
        &mut self,
        edge: &Edge,
        best: ChordAngle,
    ) -> Option<ChordAngle>;

    /// The improved distance bound from the target to the cell (interior
    /// included), if any.
    fn update_distance_to_cell(
        &mut self,
        cell: &Cell,
        best: ChordAngle,
    ) -> Option<ChordAngle>;

    /// Returns true when larger distances are better (furthest-edge
    /// targets).
    fn prefers_larger(&self) -> bool {
        false
    }

    /// Visits the shapes of `index` whose interior trivially attains the
    /// best possible distance to this target (containment for closest
    /// targets, antipodal containment for furthest ones). Stops early if
    /// the visitor returns false.
    fn visit_containing_shapes(
        &mut self,
        index: &ShapeIndex,
        visit: &mut dyn FnMut(ShapeId) -> bool,
    ) -> bool;
}

/// Whether a target measures closest or furthest distances.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Mode {
    Closest,
    Furthest,
}

fn improves(mode: Mode, d: ChordAngle, best: ChordAngle) -> bool {
    match mode {
        Mode::Closest => d < best,
        Mode::Furthest => d > best,
    }
}

// -----------------------------------------------------------------------------

/// Measures distances to a fixed point.
#[derive(Debug, Clone, Copy)]
pub struct PointTarget {
    point: Point,
    mode: Mode,
}

impl PointTarget {
    /// A target measuring closest distances to `point`.
    #[must_use]
    pub const fn new(point: Point) -> Self {
        Self {
            point,
            mode: Mode::Closest,
        }
    }

    /// A target measuring furthest distances to `point`.
    #[must_use]
    pub const fn furthest(point: Point) -> Self {
        Self {
            point,
            mode: Mode::Furthest,
        }
    }

    /// The target point.
    #[must_use]
    pub const fn point(&self) -> Point {
        self.point
    }
}

impl DistanceTarget for PointTarget {
    fn update_distance_to_edge(
        &mut self,
        edge: &Edge,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let mut dist = best;
        let updated = match self.mode {
            Mode::Closest => edge_distance::update_min_distance(
                self.point, edge.v0, edge.v1, &mut dist,
            ),
            Mode::Furthest => edge_distance::update_max_distance(
                self.point, edge.v0, edge.v1, &mut dist,
            ),
        };
        updated.then_some(dist)
    }

    fn update_distance_to_cell(
        &mut self,
        cell: &Cell,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let dist = match self.mode {
            Mode::Closest => cell.distance_to_point(self.point),
            Mode::Furthest => cell.max_distance_to_point(self.point),
        };
        improves(self.mode, dist, best).then_some(dist)
    }

    fn prefers_larger(&self) -> bool {
        self.mode == Mode::Furthest
    }

    fn visit_containing_shapes(
        &mut self,
        index: &ShapeIndex,
        visit: &mut dyn FnMut(ShapeId) -> bool,
    ) -> bool {
        // For furthest targets the distance is maximal (π) exactly when a
        // shape contains the antipode.
        let probe = match self.mode {
            Mode::Closest => self.point,
            Mode::Furthest => -self.point,
        };
        ContainsPointQuery::new(index).visit_containing_shapes(probe, visit)
    }
}

// -----------------------------------------------------------------------------

/// Measures distances to a fixed edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTarget {
    a: Point,
    b: Point,
    mode: Mode,
}

impl EdgeTarget {
    /// A target measuring closest distances to the edge AB.
    #[must_use]
    pub const fn new(a: Point, b: Point) -> Self {
        Self {
            a,
            b,
            mode: Mode::Closest,
        }
    }

    /// A target measuring furthest distances to the edge AB.
    #[must_use]
    pub const fn furthest(a: Point, b: Point) -> Self {
        Self {
            a,
            b,
            mode: Mode::Furthest,
        }
    }
}

impl DistanceTarget for EdgeTarget {
    fn update_distance_to_edge(
        &mut self,
        edge: &Edge,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let mut dist = best;
        let updated = match self.mode {
            Mode::Closest => edge_distance::update_edge_pair_min_distance(
                self.a, self.b, edge.v0, edge.v1, &mut dist,
            ),
            Mode::Furthest => edge_distance::update_edge_pair_max_distance(
                self.a, self.b, edge.v0, edge.v1, &mut dist,
            ),
        };
        updated.then_some(dist)
    }

    fn update_distance_to_cell(
        &mut self,
        cell: &Cell,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let dist = match self.mode {
            Mode::Closest => cell.distance_to_edge(self.a, self.b),
            Mode::Furthest => cell.max_distance_to_edge(self.a, self.b),
        };
        improves(self.mode, dist, best).then_some(dist)
    }

    fn prefers_larger(&self) -> bool {
        self.mode == Mode::Furthest
    }

    fn visit_containing_shapes(
        &mut self,
        index: &ShapeIndex,
        visit: &mut dyn FnMut(ShapeId) -> bool,
    ) -> bool {
        // A shape attains the best distance when it contains either
        // endpoint (or, for furthest targets, either antipode).
        let (a, b) = match self.mode {
            Mode::Closest => (self.a, self.b),
            Mode::Furthest => (-self.a, -self.b),
        };
        let query = ContainsPointQuery::new(index);
        query.visit_containing_shapes(a, &mut *visit)
            && query.visit_containing_shapes(b, &mut *visit)
    }
}

// -----------------------------------------------------------------------------

/// Measures distances to a cell (its interior included).
#[derive(Debug, Clone, Copy)]
pub struct CellTarget {
    cell: Cell,
    mode: Mode,
}

impl CellTarget {
    /// A target measuring closest distances to the cell.
    #[must_use]
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            mode: Mode::Closest,
        }
    }

    /// A target measuring furthest distances to the cell.
    #[must_use]
    pub const fn furthest(cell: Cell) -> Self {
        Self {
            cell,
            mode: Mode::Furthest,
        }
    }
}

impl DistanceTarget for CellTarget {
    fn update_distance_to_edge(
        &mut self,
        edge: &Edge,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let dist = match self.mode {
            Mode::Closest => self.cell.distance_to_edge(edge.v0, edge.v1),
            Mode::Furthest => self.cell.max_distance_to_edge(edge.v0, edge.v1),
        };
        improves(self.mode, dist, best).then_some(dist)
    }

    fn update_distance_to_cell(
        &mut self,
        cell: &Cell,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let dist = match self.mode {
            Mode::Closest => self.cell.distance_to_cell(cell),
            Mode::Furthest => self.cell.max_distance_to_cell(cell),
        };
        improves(self.mode, dist, best).then_some(dist)
    }

    fn prefers_larger(&self) -> bool {
        self.mode == Mode::Furthest
    }

    fn visit_containing_shapes(
        &mut self,
        index: &ShapeIndex,
        visit: &mut dyn FnMut(ShapeId) -> bool,
    ) -> bool {
        // Testing the cell center covers the "target inside shape" case;
        // shapes intersecting only part of the cell still get found
        // through their edges.
        let probe = match self.mode {
            Mode::Closest => self.cell.center(),
            Mode::Furthest => -self.cell.center(),
        };
        ContainsPointQuery::new(index).visit_containing_shapes(probe, visit)
    }
}

// -----------------------------------------------------------------------------

/// Measures distances to all the shapes of another index.
pub struct ShapeIndexTarget<'a> {
    index: &'a ShapeIndex,
    mode: Mode,
    include_interiors: bool,
}

impl<'a> ShapeIndexTarget<'a> {
    /// A target measuring closest distances to the given index.
    #[must_use]
    pub fn new(index: &'a ShapeIndex) -> Self {
        Self {
            index,
            mode: Mode::Closest,
            include_interiors: false,
        }
    }

    /// A target measuring furthest distances to the given index.
    #[must_use]
    pub fn furthest(index: &'a ShapeIndex) -> Self {
        Self {
            index,
            mode: Mode::Furthest,
            include_interiors: false,
        }
    }

    /// Sets whether distances to this target account for shape interiors.
    #[must_use]
    pub fn include_interiors(mut self, include: bool) -> Self {
        self.include_interiors = include;
        self
    }

    /// The best distance from the given sub-target to this index, via a
    /// nested single-result query.
    fn distance_via_query(
        &self,
        target: &mut dyn DistanceTarget,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let options = super::EdgeQueryOptions::new()
            .max_results(1)
            .distance_limit(best)
            .include_interiors(self.include_interiors);
        let result = super::engine::find_edges(self.index, target, &options)
            .into_iter()
            .next()?;
        Some(result.distance)
    }
}

impl DistanceTarget for ShapeIndexTarget<'_> {
    fn update_distance_to_edge(
        &mut self,
        edge: &Edge,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let mut target = match self.mode {
            Mode::Closest => EdgeTarget::new(edge.v0, edge.v1),
            Mode::Furthest => EdgeTarget::furthest(edge.v0, edge.v1),
        };
        self.distance_via_query(&mut target, best)
    }

    fn update_distance_to_cell(
        &mut self,
        cell: &Cell,
        best: ChordAngle,
    ) -> Option<ChordAngle> {
        let mut target = match self.mode {
            Mode::Closest => CellTarget::new(*cell),
            Mode::Furthest => CellTarget::furthest(*cell),
        };
        self.distance_via_query(&mut target, best)
    }

    fn prefers_larger(&self) -> bool {
        self.mode == Mode::Furthest
    }

    fn visit_containing_shapes(
        &mut self,
        query_index: &ShapeIndex,
        visit: &mut dyn FnMut(ShapeId) -> bool,
    ) -> bool {
        // It suffices to probe one vertex per connected component of the
        // target index, plus a representative point of any full shape.
        let query = ContainsPointQuery::new(query_index);
        for id in 0..self.index.num_shape_ids() {
            let Some(shape) = self.index.shape(id) else {
                continue;
            };
            if shape.num_edges() > 0 {
                for chain_id in 0..shape.num_chains() {
                    if shape.chain(chain_id).length == 0 {
                        continue;
                    }
                    let start = shape.chain_edge(chain_id, 0).v0;
                    let probe = match self.mode {
                        Mode::Closest => start,
                        Mode::Furthest => -start,
                    };
                    if !query.visit_containing_shapes(probe, &mut *visit) {
                        return false;
                    }
                }
            } else if shape.is_full() {
                let probe = shape.reference_point().point;
                let probe = match self.mode {
                    Mode::Closest => probe,
                    Mode::Furthest => -probe,
                };
                if !query.visit_containing_shapes(probe, &mut *visit) {
                    return false;
                }
            }
        }
        true
    }
}
