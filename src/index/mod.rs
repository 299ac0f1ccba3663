//! The shape index: a partition of the sphere into cells recording which
//! shape edges intersect each cell.

mod build;
mod cell;
mod iterator;
mod point_query;
mod tracker;

pub use cell::{ClippedShape, IndexCell};
pub use iterator::{CellRelation, ShapeIndexIterator};
pub use point_query::ContainsPointQuery;
pub use tracker::IncidentEdgeTracker;

use crate::{
    cell::CellId,
    edge::clip::{EDGE_CLIP_ERROR_UV_COORD, FACE_CLIP_ERROR_UV_COORD},
    shape::{Shape, ShapeId},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

/// The amount by which cells are padded during indexing, covering the
/// worst-case clipping error at both build and query time.
pub(crate) const CELL_PADDING: f64 =
    2. * (FACE_CLIP_ERROR_UV_COORD + EDGE_CLIP_ERROR_UV_COORD);

/// Default maximum number of edges per index cell.
const DEFAULT_MAX_EDGES_PER_CELL: usize = 10;

/// The built contents of an index: a snapshot shared by iterators and
/// queries, immutable once published.
#[derive(Default)]
pub(crate) struct IndexState {
    /// The ids of the index cells, ascending; a disjoint covering of the
    /// sphere (together with the implicit empty cells between them).
    pub cells: Vec<CellId>,
    /// The contents of each cell, parallel to `cells`.
    pub contents: Vec<IndexCell>,
    /// The shapes at build time, by shape id (`None` for removed ids).
    pub shapes: Vec<Option<Arc<dyn Shape>>>,
}

impl IndexState {
    pub(crate) fn shape(&self, id: ShapeId) -> Option<&Arc<dyn Shape>> {
        self.shapes.get(id as usize).and_then(Option::as_ref)
    }
}

/// A spatial index over a collection of shapes.
///
/// The sphere is partitioned into cells such that each contained shape
/// has a bounded number of edges per cell; each cell records the clipped
/// shapes intersecting it. Mutations ([`ShapeIndex::add`],
/// [`ShapeIndex::remove`], [`ShapeIndex::reset`]) mark the index stale;
/// the first query afterwards rebuilds it. A built index is freely
/// shareable across threads for querying.
pub struct ShapeIndex {
    /// The shapes, by id. Removed ids stay as `None` so ids are stable.
    shapes: Vec<Option<Arc<dyn Shape>>>,
    /// Maximum number of edges per cell before subdividing.
    max_edges_per_cell: usize,
    /// The published build; queries snapshot this.
    state: RwLock<Arc<IndexState>>,
    /// False when `state` no longer reflects `shapes`.
    fresh: AtomicBool,
}

impl ShapeIndex {
    /// Initializes an empty index with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            max_edges_per_cell: DEFAULT_MAX_EDGES_PER_CELL,
            state: RwLock::new(Arc::new(IndexState::default())),
            fresh: AtomicBool::new(true),
        }
    }

    /// Initializes an empty index that subdivides until each shape has at
    /// most `max_edges_per_cell` edges per cell.
    ///
    /// Reasonable values are between 10 and 50; the default is 10.
    #[must_use]
    pub fn with_max_edges_per_cell(max_edges_per_cell: usize) -> Self {
        let mut index = Self::new();
        index.max_edges_per_cell = max_edges_per_cell.max(1);
        index
    }

    /// Adds the given shape to the index, returning its id.
    ///
    /// The index is marked stale; it rebuilds on the next query.
    pub fn add(&mut self, shape: Arc<dyn Shape>) -> ShapeId {
        let id = self.shapes.len() as ShapeId;
        self.shapes.push(Some(shape));
        self.fresh.store(false, Ordering::Release);
        id
    }

    /// Removes the shape with the given id, returning it.
    ///
    /// Ids of other shapes are unaffected.
    pub fn remove(&mut self, id: ShapeId) -> Option<Arc<dyn Shape>> {
        let slot = self.shapes.get_mut(id as usize)?;
        let shape = slot.take();
        if shape.is_some() {
            self.fresh.store(false, Ordering::Release);
        }
        shape
    }

    /// Removes all shapes and resets the index to its initial state.
    pub fn reset(&mut self) {
        self.shapes.clear();
        *self.state.write().expect("index lock poisoned") =
            Arc::new(IndexState::default());
        self.fresh.store(true, Ordering::Release);
    }

    /// The shape with the given id, if present.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<Arc<dyn Shape>> {
        self.shapes.get(id as usize).and_then(Clone::clone)
    }

    /// One more than the largest shape id ever issued.
    #[must_use]
    pub fn num_shape_ids(&self) -> i32 {
        self.shapes.len() as i32
    }

    /// Returns true if the built cells reflect all mutations.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.fresh.load(Ordering::Acquire)
    }

    /// Returns true if the index holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Option::is_none)
    }

    /// An iterator over the index cells in ascending id order, rebuilding
    /// first if stale.
    #[must_use]
    pub fn iterator(&self) -> ShapeIndexIterator {
        ShapeIndexIterator::new(self.snapshot())
    }

    /// The current build, rebuilding under the write lock if stale.
    ///
    /// Queries never observe a partially-built state: the rebuild happens
    /// entirely before the new snapshot is published.
    pub(crate) fn snapshot(&self) -> Arc<IndexState> {
        if self.is_fresh() {
            return Arc::clone(&self.state.read().expect("index lock poisoned"));
        }

        let mut guard = self.state.write().expect("index lock poisoned");
        // Another writer may have rebuilt while we waited.
        if !self.is_fresh() {
            *guard = Arc::new(build::build(
                &self.shapes,
                self.max_edges_per_cell,
            ));
            self.fresh.store(true, Ordering::Release);
        }
        Arc::clone(&guard)
    }
}

impl Default for ShapeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShapeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeIndex")
            .field("num_shape_ids", &self.num_shape_ids())
            .field("fresh", &self.is_fresh())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "./index_tests.rs"]
mod tests;
