use super::{cell::IndexCell, IndexState};
use crate::{cell::CellId, point::Point};
use std::sync::Arc;

/// The relation of a query cell to the cells of an index.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellRelation {
    /// The target is equal to or descended from an index cell.
    Indexed,
    /// The target strictly contains at least one index cell.
    Subdivided,
    /// The target shares no leaf with any index cell.
    Disjoint,
}

/// An external iterator over the cells of a [`crate::ShapeIndex`], in
/// ascending cell id order.
///
/// The iterator holds a snapshot of the index contents: it stays valid
/// (and unchanged) even if the index is mutated after its creation.
#[derive(Clone)]
pub struct ShapeIndexIterator {
    state: Arc<IndexState>,
    pos: usize,
}

impl ShapeIndexIterator {
    pub(crate) fn new(state: Arc<IndexState>) -> Self {
        Self { state, pos: 0 }
    }

    /// The id of the current cell.
    ///
    /// Past the last cell this is [`CellId::SENTINEL`], which sorts after
    /// every valid id.
    #[must_use]
    pub fn cell_id(&self) -> CellId {
        self.state
            .cells
            .get(self.pos)
            .copied()
            .unwrap_or(CellId::SENTINEL)
    }

    /// The contents of the current cell.
    #[must_use]
    pub fn index_cell(&self) -> Option<&IndexCell> {
        self.state.contents.get(self.pos)
    }

    /// The center of the current cell.
    #[must_use]
    pub fn center(&self) -> Point {
        self.cell_id().to_point()
    }

    /// Returns true if the iterator is past the last cell.
    #[must_use]
    pub fn done(&self) -> bool {
        self.pos >= self.state.cells.len()
    }

    /// Returns true if the iterator is at the first cell.
    #[must_use]
    pub fn at_begin(&self) -> bool {
        self.pos == 0
    }

    /// Repositions at the first cell.
    pub fn begin(&mut self) {
        self.pos = 0;
    }

    /// Repositions past the last cell.
    pub fn end(&mut self) {
        self.pos = self.state.cells.len();
    }

    /// Advances to the next cell.
    pub fn next(&mut self) {
        debug_assert!(!self.done());
        self.pos += 1;
    }

    /// Moves back to the previous cell. Returns false (and stays put) at
    /// the first cell.
    pub fn prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }

    /// Positions at the first cell with id `>= target`, or past the end.
    pub fn seek(&mut self, target: CellId) {
        self.pos = self.state.cells.partition_point(|&id| id < target);
    }

    /// Like [`ShapeIndexIterator::seek`], but never moves backwards.
    pub fn seek_forward(&mut self, target: CellId) {
        if !self.done() && self.cell_id() < target {
            self.seek(target);
        }
    }

    /// Positions at the unique cell containing the given point.
    ///
    /// Returns false iff no index cell covers it (possible only where no
    /// shape is nearby).
    pub fn locate_point(&mut self, p: Point) -> bool {
        // The cell containing the target leaf, if any, is either the first
        // cell at or past it, or the one before that.
        let target = CellId::from_point(p);
        self.seek(target);
        if !self.done() && self.cell_id().range_min() <= target {
            return true;
        }
        if !self.at_begin() {
            self.prev();
            if self.cell_id().range_max() >= target {
                return true;
            }
        }
        false
    }

    /// Positions at the first cell intersecting the target, classifying
    /// the relation.
    ///
    /// On [`CellRelation::Indexed`] the iterator is at the cell covering
    /// the target; on [`CellRelation::Subdivided`] at the first indexed
    /// descendant; on [`CellRelation::Disjoint`] the position is
    /// unspecified.
    pub fn locate_cell(&mut self, target: CellId) -> CellRelation {
        self.seek(target.range_min());
        if !self.done() {
            if self.cell_id() >= target
                && self.cell_id().range_min() <= target
            {
                return CellRelation::Indexed;
            }
            if self.cell_id() <= target.range_max() {
                return CellRelation::Subdivided;
            }
        }
        if !self.at_begin() {
            self.prev();
            if self.cell_id().range_max() >= target {
                return CellRelation::Indexed;
            }
        }
        CellRelation::Disjoint
    }

    /// The position of the current cell within the index.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}
