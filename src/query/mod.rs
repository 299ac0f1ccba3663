//! Best-first proximity queries over a shape index.

mod target;

pub use target::{
    CellTarget, DistanceTarget, EdgeTarget, PointTarget, ShapeIndexTarget,
};

use crate::{
    chord_angle::ChordAngle, index::ShapeIndex, shape::ShapeId, Angle,
};

/// The edge id reported for interior (zero- or straight-distance) results
/// produced by [`EdgeQueryOptions::include_interiors`].
pub const INTERIOR_EDGE_ID: i32 = -1;

/// One query result: an edge (or interior sentinel) at its distance from
/// the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryResult {
    /// The distance from the target.
    pub distance: ChordAngle,
    /// The shape the edge belongs to.
    pub shape_id: ShapeId,
    /// The edge within the shape, or [`INTERIOR_EDGE_ID`] for a result
    /// produced by a shape interior.
    pub edge_id: i32,
}

impl QueryResult {
    /// Returns true for results produced by a shape interior rather than
    /// an edge.
    #[must_use]
    pub const fn is_interior(&self) -> bool {
        self.edge_id == INTERIOR_EDGE_ID
    }

    /// The distance as an angle.
    #[must_use]
    pub fn angle(&self) -> Angle {
        self.distance.to_angle()
    }
}

/// Options for edge queries, as a fluent builder.
#[derive(Debug, Clone, Copy)]
pub struct EdgeQueryOptions {
    pub(crate) max_results: usize,
    pub(crate) distance_limit: Option<ChordAngle>,
    pub(crate) max_error: ChordAngle,
    pub(crate) include_interiors: bool,
    pub(crate) use_brute_force: bool,
}

impl EdgeQueryOptions {
    /// The default options: unlimited results, no distance limit, exact
    /// distances, edges only, indexed search.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_results: usize::MAX,
            distance_limit: None,
            max_error: ChordAngle::ZERO,
            include_interiors: false,
            use_brute_force: false,
        }
    }

    /// Returns at most `n` results.
    #[must_use]
    pub const fn max_results(mut self, n: usize) -> Self {
        self.max_results = if n == 0 { 1 } else { n };
        self
    }

    /// Rejects results beyond this distance (closest queries) or within
    /// it (furthest queries).
    #[must_use]
    pub const fn distance_limit(mut self, limit: ChordAngle) -> Self {
        self.distance_limit = Some(limit);
        self
    }

    /// Same, from an angle.
    #[must_use]
    pub fn distance_limit_angle(self, limit: Angle) -> Self {
        self.distance_limit(ChordAngle::from(limit))
    }

    /// Permits early termination when further work cannot improve any
    /// result by more than this much.
    ///
    /// With a non-zero error each returned result is within `max_error`
    /// of the exact k-th best, but the set is not guaranteed to be
    /// exactly the k best.
    #[must_use]
    pub const fn max_error(mut self, error: ChordAngle) -> Self {
        self.max_error = error;
        self
    }

    /// Reports a sentinel result for dimension-2 shapes whose interior
    /// attains the best possible distance to the target.
    #[must_use]
    pub const fn include_interiors(mut self, include: bool) -> Self {
        self.include_interiors = include;
        self
    }

    /// Bypasses the index and scans every edge. Intended for correctness
    /// checks.
    #[must_use]
    pub const fn use_brute_force(mut self, brute: bool) -> Self {
        self.use_brute_force = brute;
        self
    }
}

impl Default for EdgeQueryOptions {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------

/// Finds the edges of an index closest to a target.
///
/// Results are sorted by ascending distance, then shape id, then edge id,
/// with duplicates removed.
pub struct ClosestEdgeQuery<'a> {
    index: &'a ShapeIndex,
    options: EdgeQueryOptions,
}

impl<'a> ClosestEdgeQuery<'a> {
    /// Initializes a query against the given index.
    #[must_use]
    pub fn new(index: &'a ShapeIndex, options: EdgeQueryOptions) -> Self {
        Self { index, options }
    }

    /// The query options.
    #[must_use]
    pub const fn options(&self) -> &EdgeQueryOptions {
        &self.options
    }

    /// The closest edges to the target, best first.
    #[must_use]
    pub fn find_edges(
        &self,
        target: &mut dyn DistanceTarget,
    ) -> Vec<QueryResult> {
        debug_assert!(!target.prefers_larger());
        engine::find_edges(self.index, target, &self.options)
    }

    /// The single closest edge to the target, if any satisfies the
    /// options.
    #[must_use]
    pub fn find_closest_edge(
        &self,
        target: &mut dyn DistanceTarget,
    ) -> Option<QueryResult> {
        let options = self.options.max_results(1);
        engine::find_edges(self.index, target, &options)
            .into_iter()
            .next()
    }

    /// The distance to the closest edge, or [`ChordAngle::INFINITY`].
    #[must_use]
    pub fn distance(&self, target: &mut dyn DistanceTarget) -> ChordAngle {
        self.find_closest_edge(target)
            .map_or(ChordAngle::INFINITY, |r| r.distance)
    }

    /// Returns true if any edge (or interior) is closer than the given
    /// limit.
    #[must_use]
    pub fn is_distance_less(
        &self,
        target: &mut dyn DistanceTarget,
        limit: ChordAngle,
    ) -> bool {
        let options = self
            .options
            .max_results(1)
            .distance_limit(limit)
            .max_error(ChordAngle::STRAIGHT);
        !engine::find_edges(self.index, target, &options).is_empty()
    }
}

/// Finds the edges of an index furthest from a target.
///
/// Results are sorted by descending distance, then ascending shape id and
/// edge id, with duplicates removed. Targets must be constructed with
/// their `furthest` constructors.
pub struct FurthestEdgeQuery<'a> {
    index: &'a ShapeIndex,
    options: EdgeQueryOptions,
}

impl<'a> FurthestEdgeQuery<'a> {
    /// Initializes a query against the given index.
    #[must_use]
    pub fn new(index: &'a ShapeIndex, options: EdgeQueryOptions) -> Self {
        Self { index, options }
    }

    /// The furthest edges from the target, best (furthest) first.
    #[must_use]
    pub fn find_edges(
        &self,
        target: &mut dyn DistanceTarget,
    ) -> Vec<QueryResult> {
        debug_assert!(target.prefers_larger());
        engine::find_edges(self.index, target, &self.options)
    }

    /// The single furthest edge from the target, if any satisfies the
    /// options.
    #[must_use]
    pub fn find_furthest_edge(
        &self,
        target: &mut dyn DistanceTarget,
    ) -> Option<QueryResult> {
        let options = self.options.max_results(1);
        engine::find_edges(self.index, target, &options)
            .into_iter()
            .next()
    }
}

// -----------------------------------------------------------------------------

pub(crate) mod engine {
    use super::{
        DistanceTarget, EdgeQueryOptions, QueryResult, INTERIOR_EDGE_ID,
    };
    use crate::{
        cell::{Cell, CellId},
        chord_angle::ChordAngle,
        index::{ClippedShape, IndexCell, ShapeIndex, ShapeIndexIterator},
        shape::ShapeId,
    };
    use ahash::{HashSet, HashSetExt};
    use std::{cmp::Ordering, collections::BinaryHeap, sync::Arc};

    /// Index cells at or below this edge count are processed on the spot
    /// instead of being enqueued.
    const MIN_EDGES_TO_ENQUEUE: usize = 10;

    /// A queue entry: a cell and the best-possible distance bound to it.
    struct QueueEntry {
        bound: ChordAngle,
        prefer_larger: bool,
        id: CellId,
        /// Position of the cell's contents in the index, when the cell is
        /// an index cell (cells above the index carry `None`).
        contents: Option<usize>,
    }

    impl PartialEq for QueueEntry {
        fn eq(&self, other: &Self) -> bool {
            self.bound == other.bound
        }
    }
    impl Eq for QueueEntry {}
    impl PartialOrd for QueueEntry {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for QueueEntry {
        fn cmp(&self, other: &Self) -> Ordering {
            // The heap pops its maximum; rank the best bound highest.
            let ord = self.bound.cmp(&other.bound);
            if self.prefer_larger {
                ord
            } else {
                ord.reverse()
            }
        }
    }

    /// A kept result, ranked so that better results order first and the
    /// heap's maximum is the worst one kept.
    struct RankedResult {
        result: QueryResult,
        prefer_larger: bool,
    }

    impl PartialEq for RankedResult {
        fn eq(&self, other: &Self) -> bool {
            self.result == other.result
        }
    }
    impl Eq for RankedResult {}
    impl PartialOrd for RankedResult {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for RankedResult {
        fn cmp(&self, other: &Self) -> Ordering {
            let dist = if self.prefer_larger {
                other.result.distance.cmp(&self.result.distance)
            } else {
                self.result.distance.cmp(&other.result.distance)
            };
            dist.then_with(|| {
                self.result.shape_id.cmp(&other.result.shape_id)
            })
            .then_with(|| self.result.edge_id.cmp(&other.result.edge_id))
        }
    }

    /// Runs a query, returning results best-first.
    pub(crate) fn find_edges(
        index: &ShapeIndex,
        target: &mut dyn DistanceTarget,
        options: &EdgeQueryOptions,
    ) -> Vec<QueryResult> {
        let prefer_larger = target.prefers_larger();
        let limit = options.distance_limit.unwrap_or(if prefer_larger {
            ChordAngle::NEGATIVE
        } else {
            ChordAngle::INFINITY
        });

        let mut engine = Engine {
            index,
            target,
            options,
            prefer_larger,
            limit,
            results: BinaryHeap::new(),
            tested: HashSet::new(),
        };
        engine.run();

        // The heap's sorted order is ascending by rank, i.e. best-first.
        let mut results: Vec<QueryResult> = engine
            .results
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.result)
            .collect();
        results.dedup();
        results
    }

    struct Engine<'a> {
        index: &'a ShapeIndex,
        target: &'a mut dyn DistanceTarget,
        options: &'a EdgeQueryOptions,
        prefer_larger: bool,

        /// The current acceptability cutoff: a result must improve on
        /// this to be kept.
        limit: ChordAngle,
        /// Kept results; the heap's maximum is the worst kept.
        results: BinaryHeap<RankedResult>,
        /// Edges already measured, to avoid duplicates across cells.
        tested: HashSet<(ShapeId, i32)>,
    }

    impl Engine<'_> {
        fn improves_limit(&self, d: ChordAngle) -> bool {
            if self.prefer_larger {
                d > self.limit
            } else {
                d < self.limit
            }
        }

        fn run(&mut self) {
            if self.options.include_interiors {
                self.add_interior_results();
            }

            if self.options.use_brute_force {
                self.brute_force();
            } else {
                self.best_first();
            }
        }

        /// Shapes whose interior attains the best possible distance yield
        /// sentinel results up front.
        fn add_interior_results(&mut self) {
            let best = if self.prefer_larger {
                ChordAngle::STRAIGHT
            } else {
                ChordAngle::ZERO
            };

            let mut ids = Vec::new();
            self.target.visit_containing_shapes(self.index, &mut |id| {
                ids.push(id);
                true
            });
            ids.sort_unstable();
            ids.dedup();
            for shape_id in ids {
                self.add_result(QueryResult {
                    distance: best,
                    shape_id,
                    edge_id: INTERIOR_EDGE_ID,
                });
            }
        }

        fn brute_force(&mut self) {
            let state = self.index.snapshot();
            for (id, shape) in state.shapes.iter().enumerate() {
                let Some(shape) = shape else { continue };
                for e in 0..shape.num_edges() {
                    let edge = shape.edge(e);
                    if let Some(distance) =
                        self.target.update_distance_to_edge(&edge, self.limit)
                    {
                        self.add_result(QueryResult {
                            distance,
                            shape_id: id as ShapeId,
                            edge_id: e,
                        });
                    }
                }
            }
        }

        fn best_first(&mut self) {
            let state = self.index.snapshot();
            let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();
            let mut iter = ShapeIndexIterator::new(Arc::clone(&state));

            // Seed the queue with a covering of the index: for each face
            // holding index cells, the lowest common ancestor of its
            // cells.
            for covering_id in index_covering(&mut iter) {
                iter.seek(covering_id.range_min());
                self.process_or_enqueue(covering_id, &mut iter, &mut queue);
            }

            while let Some(entry) = queue.pop() {
                if !self.improves_limit(entry.bound) {
                    // Nothing left can beat the current result set.
                    break;
                }

                if let Some(contents) = entry.contents {
                    let cell = &state.contents[contents];
                    self.process_cell(cell);
                    continue;
                }

                // The cell is subdivided in the index: descend to the
                // children that contain any index cells.
                let id = entry.id;
                let children = id.children();

                iter.seek(children[1].range_min());
                if !iter.done() && iter.cell_id() <= children[1].range_max() {
                    self.process_or_enqueue(children[1], &mut iter, &mut queue);
                }
                if iter.prev() && iter.cell_id() >= id.range_min() {
                    self.process_or_enqueue(children[0], &mut iter, &mut queue);
                }
                iter.seek(children[3].range_min());
                if !iter.done() && iter.cell_id() <= children[3].range_max() {
                    self.process_or_enqueue(children[3], &mut iter, &mut queue);
                }
                if iter.prev() && iter.cell_id() >= children[2].range_min() {
                    self.process_or_enqueue(children[2], &mut iter, &mut queue);
                }
            }
        }

        /// Processes a small index cell directly, or enqueues the cell
        /// keyed by its distance bound.
        ///
        /// The iterator must be positioned at the first index cell with
        /// id `>= id.range_min()`.
        fn process_or_enqueue(
            &mut self,
            id: CellId,
            iter: &mut ShapeIndexIterator,
            queue: &mut BinaryHeap<QueueEntry>,
        ) {
            let contents = if iter.cell_id() == id {
                // An index cell; tiny ones are cheaper to scan than to
                // bound.
                let cell = iter.index_cell().expect("index cell").clone();
                let num_edges: usize =
                    cell.clipped().iter().map(ClippedShape::num_edges).sum();
                if num_edges <= MIN_EDGES_TO_ENQUEUE {
                    self.process_cell(&cell);
                    return;
                }
                Some(iter.position())
            } else {
                None
            };

            let Some(bound) = self
                .target
                .update_distance_to_cell(&Cell::from(id), self.limit)
            else {
                return;
            };
            queue.push(QueueEntry {
                bound,
                prefer_larger: self.prefer_larger,
                id,
                contents,
            });
        }

        fn process_cell(&mut self, cell: &IndexCell) {
            for clipped in cell.clipped() {
                let shape_id = clipped.shape_id;
                for &e in &clipped.edges {
                    self.test_edge(shape_id, e);
                }
            }
        }

        fn test_edge(&mut self, shape_id: ShapeId, edge_id: i32) {
            if !self.tested.insert((shape_id, edge_id)) {
                return;
            }
            let Some(shape) = self.index.shape(shape_id) else {
                return;
            };
            let edge = shape.edge(edge_id);
            if let Some(distance) =
                self.target.update_distance_to_edge(&edge, self.limit)
            {
                self.add_result(QueryResult {
                    distance,
                    shape_id,
                    edge_id,
                });
            }
        }

        fn add_result(&mut self, result: QueryResult) {
            if !self.improves_limit(result.distance) {
                return;
            }
            let ranked = RankedResult {
                result,
                prefer_larger: self.prefer_larger,
            };

            if self.options.max_results == usize::MAX {
                self.results.push(ranked);
                return;
            }

            if self.results.len() >= self.options.max_results {
                // Replace the worst kept result if the new one outranks
                // it.
                let replaces = self
                    .results
                    .peek()
                    .map_or(false, |worst| ranked.cmp(worst) == Ordering::Less);
                if !replaces {
                    return;
                }
                self.results.pop();
                self.results.push(ranked);
            } else {
                self.results.push(ranked);
            }

            // With a full result set, further work must beat the worst
            // kept result (minus the permitted error).
            if self.results.len() >= self.options.max_results {
                let worst = self
                    .results
                    .peek()
                    .expect("results nonempty")
                    .result
                    .distance;
                self.limit = if self.prefer_larger {
                    worst + self.options.max_error
                } else {
                    worst - self.options.max_error
                };
            }
        }
    }

    /// Up to six cells covering all the index cells: per occupied face,
    /// the lowest common ancestor of its first and last cells.
    fn index_covering(iter: &mut ShapeIndexIterator) -> Vec<CellId> {
        let mut covering = Vec::with_capacity(6);
        iter.begin();
        while !iter.done() {
            let first = iter.cell_id();
            let face_end = CellId::from_face(first.face()).range_max();

            // Find the last cell on this face.
            iter.seek(face_end.next());
            iter.prev();
            let last = iter.cell_id();

            let level = first
                .common_ancestor_level(last)
                .expect("cells on one face share the face cell");
            covering.push(first.parent(level));
            iter.next();
        }
        covering
    }
}

#[cfg(test)]
#[path = "./query_tests.rs"]
mod tests;
