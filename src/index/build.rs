//! The index build: recursive subdivision of the six faces with edge
//! clipping and interior tracking.

use super::{
    cell::{ClippedShape, IndexCell},
    point_query::contains_brute_force,
    IndexState, CELL_PADDING,
};
use crate::{
    cell::id::{IJ_TO_POS, POS_TO_IJ, POS_TO_ORIENTATION},
    cell::CellId,
    coord::{self, siti_to_st, st_to_ij, st_to_uv, uv_to_st},
    edge::{
        clip::{clip_to_padded_face, interpolate_f64},
        crosser::EdgeCrosser,
    },
    interval::R1Interval,
    point::Point,
    r2rect::{R2Point, R2Rect},
    shape::{Dimension, Edge, Shape, ShapeId},
    DBL_EPSILON, MAX_LEVEL,
};
use std::sync::Arc;

/// The maximum cell size, relative to an edge's length, for which the
/// edge is considered "long" and no longer forces subdivision.
const CELL_SIZE_TO_LONG_EDGE_RATIO: f64 = 1.0;

/// Derivative of the average-edge-length metric (dimension 1).
const AVG_EDGE_DERIV: f64 = 1.459213746386106;

/// An edge of some shape projected onto one face.
struct FaceEdge {
    shape_id: ShapeId,
    edge_id: i32,
    /// Level beyond which this edge no longer forces subdivision.
    max_level: u8,
    /// The clipped endpoints on this face, in (u,v) coordinates.
    a: R2Point,
    b: R2Point,
    /// The original edge vertices.
    edge: Edge,
}

/// A face edge narrowed to a cell during subdivision: the index of its
/// [`FaceEdge`] plus the bound of the portion intersecting the cell.
#[derive(Clone, Copy)]
struct ClippedEdge {
    fe: usize,
    bound: R2Rect,
}

/// Builds the index contents for the given shapes.
pub(super) fn build(
    shapes: &[Option<Arc<dyn Shape>>],
    max_edges_per_cell: usize,
) -> IndexState {
    let mut builder = Builder {
        max_edges_per_cell,
        face_edges: Vec::new(),
        cells: Vec::new(),
        contents: Vec::new(),
    };
    let mut tracker = InteriorTracker::new();

    // Project every edge of every shape onto the faces it touches.
    let mut all_edges: [Vec<usize>; 6] = Default::default();
    for (id, shape) in shapes.iter().enumerate() {
        let Some(shape) = shape else { continue };
        let shape_id = id as ShapeId;

        if shape.dimension() == Dimension::Polygon {
            tracker.add_shape(
                shape_id,
                contains_brute_force(shape.as_ref(), tracker.focus()),
            );
        }

        for e in 0..shape.num_edges() {
            let edge = shape.edge(e);
            builder.add_face_edge(shape_id, e, edge, &mut all_edges);
        }
    }

    for (face, edges) in all_edges.into_iter().enumerate() {
        builder.update_face_edges(face as u8, &edges, &mut tracker);
    }

    debug_assert!(builder.cells.windows(2).all(|w| w[0] < w[1]));
    IndexState {
        cells: builder.cells,
        contents: builder.contents,
        shapes: shapes.to_vec(),
    }
}

/// The level at which cells become at least as small as the given edge.
fn max_level_for_edge(edge: &Edge) -> u8 {
    // An approximate length is plenty here; the choice only tunes where
    // subdivision stops helping.
    let cell_size =
        (edge.v0 - edge.v1).norm() * CELL_SIZE_TO_LONG_EDGE_RATIO;
    if cell_size <= 0. {
        return MAX_LEVEL;
    }
    // First level whose average edge length drops below cell_size.
    let level = -ilogb(cell_size / AVG_EDGE_DERIV);
    level.clamp(0, i32::from(MAX_LEVEL)) as u8
}

/// The binary exponent of a positive, normal `f64`.
fn ilogb(x: f64) -> i32 {
    debug_assert!(x > 0. && x.is_finite());
    (((x.to_bits() >> 52) & 0x7ff) as i32) - 1023
}

struct Builder {
    max_edges_per_cell: usize,
    /// All face edges of the face currently being subdivided.
    face_edges: Vec<FaceEdge>,
    /// Finalised cells, in ascending id order.
    cells: Vec<CellId>,
    contents: Vec<IndexCell>,
}

impl Builder {
    /// Clips one shape edge onto the faces it touches, registering a
    /// [`FaceEdge`] per intersected face.
    fn add_face_edge(
        &mut self,
        shape_id: ShapeId,
        edge_id: i32,
        edge: Edge,
        all_edges: &mut [Vec<usize>; 6],
    ) {
        let max_level = max_level_for_edge(&edge);

        // Most edges sit comfortably within one face.
        let a_face = coord::face(edge.v0);
        if a_face == coord::face(edge.v1) {
            let (au, av) = coord::valid_face_xyz_to_uv(a_face, edge.v0);
            let (bu, bv) = coord::valid_face_xyz_to_uv(a_face, edge.v1);
            let max_uv = 1. - CELL_PADDING;
            if au.abs() <= max_uv
                && av.abs() <= max_uv
                && bu.abs() <= max_uv
                && bv.abs() <= max_uv
            {
                all_edges[usize::from(a_face)].push(self.face_edges.len());
                self.face_edges.push(FaceEdge {
                    shape_id,
                    edge_id,
                    max_level,
                    a: R2Point::new(au, av),
                    b: R2Point::new(bu, bv),
                    edge,
                });
                return;
            }
        }

        // Otherwise clip against all six padded faces.
        for face in 0..6 {
            if let Some((a, b)) =
                clip_to_padded_face(edge.v0, edge.v1, face, CELL_PADDING)
            {
                all_edges[usize::from(face)].push(self.face_edges.len());
                self.face_edges.push(FaceEdge {
                    shape_id,
                    edge_id,
                    max_level,
                    a,
                    b,
                    edge,
                });
            }
        }
    }

    fn update_face_edges(
        &mut self,
        face: u8,
        edges: &[usize],
        tracker: &mut InteriorTracker,
    ) {
        if edges.is_empty() && tracker.shape_ids().is_empty() {
            return;
        }

        let mut clipped = Vec::with_capacity(edges.len());
        let mut bound = R2Rect::EMPTY;
        for &fe in edges {
            let edge_bound = R2Rect::from_point_pair(
                self.face_edges[fe].a,
                self.face_edges[fe].b,
            );
            bound = union_rect(&bound, &edge_bound);
            clipped.push(ClippedEdge {
                fe,
                bound: edge_bound,
            });
        }

        let face_id = CellId::from_face(face);
        let pcell = PaddedCell::new(face_id, CELL_PADDING);

        if !edges.is_empty() {
            let shrunk = pcell.shrink_to_fit(&bound);
            if shrunk != pcell.id {
                // All edges fit in a small subcell: skip straight to it,
                // still indexing any interior-only cells along the way.
                self.skip_cell_range(
                    face_id.range_min(),
                    shrunk.range_min(),
                    tracker,
                );
                self.update_edges(
                    &PaddedCell::new(shrunk, CELL_PADDING),
                    &clipped,
                    tracker,
                );
                self.skip_cell_range(
                    shrunk.range_max().next(),
                    face_id.range_max().next(),
                    tracker,
                );
                return;
            }
        }

        self.update_edges(&pcell, &clipped, tracker);
    }

    /// Indexes the (edge-free) leaf range `[begin, end)`, which matters
    /// only while inside the interior of some shape.
    fn skip_cell_range(
        &mut self,
        begin: CellId,
        end: CellId,
        tracker: &mut InteriorTracker,
    ) {
        if tracker.shape_ids().is_empty() {
            return;
        }
        let mut id = begin.maximum_tile(end);
        while id != end {
            self.update_edges(&PaddedCell::new(id, CELL_PADDING), &[], tracker);
            id = id.next().maximum_tile(end);
        }
    }

    /// Recursively subdivides until cells hold few enough edges, clipping
    /// the candidate set at each step.
    fn update_edges(
        &mut self,
        pcell: &PaddedCell,
        edges: &[ClippedEdge],
        tracker: &mut InteriorTracker,
    ) {
        if edges.is_empty() && tracker.shape_ids().is_empty() {
            return;
        }
        if self.make_index_cell(pcell, edges, tracker) {
            return;
        }

        // Distribute the edges among the four children, clipping against
        // the one-cell-wide middle cross.
        let middle = pcell.middle();
        let mut child_edges: [[Vec<ClippedEdge>; 2]; 2] = Default::default();
        for &edge in edges {
            if edge.bound.x.hi <= middle.x.lo {
                // Entirely within the two left children.
                let (lower, upper) = self.clip_v_axis(&edge, middle.y);
                if let Some(e) = lower {
                    child_edges[0][0].push(e);
                }
                if let Some(e) = upper {
                    child_edges[0][1].push(e);
                }
            } else if edge.bound.x.lo >= middle.x.hi {
                // Entirely within the two right children.
                let (lower, upper) = self.clip_v_axis(&edge, middle.y);
                if let Some(e) = lower {
                    child_edges[1][0].push(e);
                }
                if let Some(e) = upper {
                    child_edges[1][1].push(e);
                }
            } else {
                let left = self.clip_u_bound(&edge, 1, middle.x.hi);
                let (lower, upper) = self.clip_v_axis(&left, middle.y);
                if let Some(e) = lower {
                    child_edges[0][0].push(e);
                }
                if let Some(e) = upper {
                    child_edges[0][1].push(e);
                }
                let right = self.clip_u_bound(&edge, 0, middle.x.lo);
                let (lower, upper) = self.clip_v_axis(&right, middle.y);
                if let Some(e) = lower {
                    child_edges[1][0].push(e);
                }
                if let Some(e) = upper {
                    child_edges[1][1].push(e);
                }
            }
        }

        // Recurse in curve order so the tracker advances monotonically.
        for pos in 0..4 {
            let (i, j) = pcell.child_ij(pos);
            let child = &child_edges[usize::from(i)][usize::from(j)];
            if !child.is_empty() || !tracker.shape_ids().is_empty() {
                self.update_edges(&pcell.child(i, j), child, tracker);
            }
        }
    }

    /// Finalises the cell if subdivision would not pay off; returns false
    /// if the caller should descend instead.
    fn make_index_cell(
        &mut self,
        pcell: &PaddedCell,
        edges: &[ClippedEdge],
        tracker: &mut InteriorTracker,
    ) -> bool {
        if edges.is_empty() && tracker.shape_ids().is_empty() {
            return true;
        }

        // Count the edges that could still be isolated by subdividing;
        // edges past their max level no longer force a split.
        let mut count = 0;
        for edge in edges {
            if pcell.level < self.face_edges[edge.fe].max_level {
                count += 1;
                if count > self.max_edges_per_cell {
                    return false;
                }
            }
        }

        // Walk the interior tracker to the center of this cell, flipping
        // shape containment at each crossing.
        if tracker.is_active() && !edges.is_empty() {
            if !tracker.at_cell_id(pcell.id) {
                tracker.move_to(pcell.entry_vertex());
            }
            tracker.draw_to(pcell.center_point());
            for edge in edges {
                let fe = &self.face_edges[edge.fe];
                tracker.test_edge(fe.shape_id, &fe.edge);
            }
        }

        // Merge the shapes contributing edges with the shapes whose
        // interior covers the whole cell.
        let containing = tracker.shape_ids().to_vec();
        let sentinel = ShapeId::MAX;
        let mut cell = IndexCell::with_capacity(containing.len() + 1);
        let mut e_next = 0;
        let mut c_next = 0;
        while e_next < edges.len() || c_next < containing.len() {
            let e_shape = edges
                .get(e_next)
                .map_or(sentinel, |e| self.face_edges[e.fe].shape_id);
            let c_shape = containing.get(c_next).copied().unwrap_or(sentinel);

            if c_shape < e_shape {
                // The cell is entirely inside this shape.
                let mut clipped = ClippedShape::new(c_shape, 0);
                clipped.contains_center = true;
                cell.push(clipped);
                c_next += 1;
                continue;
            }

            let begin = e_next;
            while e_next < edges.len()
                && self.face_edges[edges[e_next].fe].shape_id == e_shape
            {
                e_next += 1;
            }
            let mut clipped = ClippedShape::new(e_shape, e_next - begin);
            for edge in &edges[begin..e_next] {
                clipped.edges.push(self.face_edges[edge.fe].edge_id);
            }
            if c_shape == e_shape {
                clipped.contains_center = true;
                c_next += 1;
            }
            cell.push(clipped);
        }

        self.cells.push(pcell.id);
        self.contents.push(cell);

        // Continue the walk out through the exit vertex.
        if tracker.is_active() && !edges.is_empty() {
            tracker.draw_to(pcell.exit_vertex());
            for edge in edges {
                let fe = &self.face_edges[edge.fe];
                tracker.test_edge(fe.shape_id, &fe.edge);
            }
            tracker.set_next_cell_id(pcell.id.next());
        }
        true
    }

    /// Clips the given endpoint (0 = lo, 1 = hi) of the u-axis bound to
    /// `u`, tightening the v-bound to match.
    fn clip_u_bound(
        &self,
        edge: &ClippedEdge,
        u_end: usize,
        u: f64,
    ) -> ClippedEdge {
        if u_end == 0 {
            if edge.bound.x.lo >= u {
                return *edge;
            }
        } else if edge.bound.x.hi <= u {
            return *edge;
        }

        let fe = &self.face_edges[edge.fe];
        let v = interpolate_f64(u, fe.a.x, fe.b.x, fe.a.y, fe.b.y);

        // A positive slope means the same corner moves on both axes.
        let positive_slope = (fe.a.x > fe.b.x) == (fe.a.y > fe.b.y);
        let v_end = usize::from((u_end == 1) == positive_slope);
        clip_bound(edge, u_end, u, v_end, v)
    }

    /// The v-axis counterpart of [`Builder::clip_u_bound`].
    fn clip_v_bound(
        &self,
        edge: &ClippedEdge,
        v_end: usize,
        v: f64,
    ) -> ClippedEdge {
        if v_end == 0 {
            if edge.bound.y.lo >= v {
                return *edge;
            }
        } else if edge.bound.y.hi <= v {
            return *edge;
        }

        let fe = &self.face_edges[edge.fe];
        let u = interpolate_f64(v, fe.a.y, fe.b.y, fe.a.x, fe.b.x);

        let positive_slope = (fe.a.x > fe.b.x) == (fe.a.y > fe.b.y);
        let u_end = usize::from((v_end == 1) == positive_slope);
        clip_bound(edge, u_end, u, v_end, v)
    }

    /// Splits an edge across the middle v-interval into its lower and/or
    /// upper parts.
    fn clip_v_axis(
        &self,
        edge: &ClippedEdge,
        middle: R1Interval,
    ) -> (Option<ClippedEdge>, Option<ClippedEdge>) {
        if edge.bound.y.hi <= middle.lo {
            return (Some(*edge), None);
        }
        if edge.bound.y.lo >= middle.hi {
            return (None, Some(*edge));
        }
        (
            Some(self.clip_v_bound(edge, 1, middle.hi)),
            Some(self.clip_v_bound(edge, 0, middle.lo)),
        )
    }
}

/// A clipped edge with the requested endpoints replaced.
fn clip_bound(
    edge: &ClippedEdge,
    u_end: usize,
    u: f64,
    v_end: usize,
    v: f64,
) -> ClippedEdge {
    let x = if u_end == 0 {
        R1Interval::new(u, edge.bound.x.hi)
    } else {
        R1Interval::new(edge.bound.x.lo, u)
    };
    let y = if v_end == 0 {
        R1Interval::new(v, edge.bound.y.hi)
    } else {
        R1Interval::new(edge.bound.y.lo, v)
    };
    ClippedEdge {
        fe: edge.fe,
        bound: R2Rect::from_intervals(x, y),
    }
}

fn union_rect(a: &R2Rect, b: &R2Rect) -> R2Rect {
    R2Rect::from_intervals(a.x.union(b.x), a.y.union(b.y))
}

// -----------------------------------------------------------------------------

/// A cell expanded by a padding on all sides, with the bookkeeping needed
/// to subdivide cheaply.
struct PaddedCell {
    id: CellId,
    padding: f64,
    /// The padded (u,v) bound.
    bound: R2Rect,
    /// The (i,j) coordinates of the cell's low corner, in leaf units.
    i_lo: i32,
    j_lo: i32,
    orientation: u8,
    level: u8,
}

impl PaddedCell {
    fn new(id: CellId, padding: f64) -> Self {
        if id.is_face() {
            let limit = 1. + padding;
            return Self {
                id,
                padding,
                bound: R2Rect::from_intervals(
                    R1Interval::new(-limit, limit),
                    R1Interval::new(-limit, limit),
                ),
                i_lo: 0,
                j_lo: 0,
                orientation: id.face() & 1,
                level: 0,
            };
        }

        let (_, mut i, mut j, orientation) = id.to_face_ij_orientation();
        let level = id.level();
        let ij_size = CellId::size_ij(level) as i32;
        i &= -ij_size;
        j &= -ij_size;
        Self {
            id,
            padding,
            bound: CellId::ij_level_to_bound_uv(i, j, level)
                .expanded(padding),
            i_lo: i,
            j_lo: j,
            orientation,
            level,
        }
    }

    /// The child at `(i, j)`, inheriting this cell's bookkeeping.
    fn child(&self, i: u8, j: u8) -> Self {
        debug_assert!(i < 2 && j < 2);
        let pos = IJ_TO_POS[usize::from(self.orientation)]
            [usize::from(2 * i + j)];
        let level = self.level + 1;
        let ij_size = CellId::size_ij(level) as i32;

        // One corner of the child's bound comes from the parent, the
        // opposite one from the middle cross.
        let middle = self.middle();
        let mut bound = self.bound;
        if i == 1 {
            bound.x = R1Interval::new(middle.x.lo, bound.x.hi);
        } else {
            bound.x = R1Interval::new(bound.x.lo, middle.x.hi);
        }
        if j == 1 {
            bound.y = R1Interval::new(middle.y.lo, bound.y.hi);
        } else {
            bound.y = R1Interval::new(bound.y.lo, middle.y.hi);
        }

        Self {
            id: self.id.child(pos),
            padding: self.padding,
            bound,
            i_lo: self.i_lo + i32::from(i) * ij_size,
            j_lo: self.j_lo + i32::from(j) * ij_size,
            orientation: self.orientation
                ^ POS_TO_ORIENTATION[usize::from(pos)],
            level,
        }
    }

    /// The `(i, j)` quadrant of the child at the given traversal
    /// position.
    fn child_ij(&self, pos: u8) -> (u8, u8) {
        let ij = POS_TO_IJ[usize::from(self.orientation)][usize::from(pos)];
        (ij >> 1, ij & 1)
    }

    /// The one-padded-cell-wide cross in the middle of this cell, shared
    /// by all four padded children.
    fn middle(&self) -> R2Rect {
        let ij_size = i64::from(CellId::size_ij(self.level));
        let u = st_to_uv(siti_to_st((2 * i64::from(self.i_lo) + ij_size) as u32));
        let v = st_to_uv(siti_to_st((2 * i64::from(self.j_lo) + ij_size) as u32));
        R2Rect::from_intervals(
            R1Interval::new(u - self.padding, u + self.padding),
            R1Interval::new(v - self.padding, v + self.padding),
        )
    }

    /// The center of the (unpadded) cell.
    fn center_point(&self) -> Point {
        let ij_size = i64::from(CellId::size_ij(self.level));
        let u = st_to_uv(siti_to_st((2 * i64::from(self.i_lo) + ij_size) as u32));
        let v = st_to_uv(siti_to_st((2 * i64::from(self.j_lo) + ij_size) as u32));
        coord::face_uv_to_xyz(self.id.face(), u, v).normalize()
    }

    /// The vertex where the space-filling curve enters this cell.
    fn entry_vertex(&self) -> Point {
        // The curve enters at the (0,0) vertex unless the axis directions
        // are reversed.
        let mut i = self.i_lo;
        let mut j = self.j_lo;
        if self.orientation & crate::cell::id::INVERT_MASK != 0 {
            let ij_size = CellId::size_ij(self.level) as i32;
            i += ij_size;
            j += ij_size;
        }
        self.vertex_at(i, j)
    }

    /// The vertex where the space-filling curve exits this cell.
    fn exit_vertex(&self) -> Point {
        // The curve exits at the (1,0) vertex unless the axes are swapped
        // or inverted, but not both.
        let mut i = self.i_lo;
        let mut j = self.j_lo;
        let ij_size = CellId::size_ij(self.level) as i32;
        if self.orientation == 0
            || self.orientation
                == crate::cell::id::SWAP_MASK | crate::cell::id::INVERT_MASK
        {
            i += ij_size;
        } else {
            j += ij_size;
        }
        self.vertex_at(i, j)
    }

    fn vertex_at(&self, i: i32, j: i32) -> Point {
        coord::face_uv_to_xyz(
            self.id.face(),
            st_to_uv(siti_to_st((2 * i64::from(i)) as u32)),
            st_to_uv(siti_to_st((2 * i64::from(j)) as u32)),
        )
        .normalize()
    }

    /// The smallest cell containing all the given bound, or this cell if
    /// no single child does.
    fn shrink_to_fit(&self, rect: &R2Rect) -> CellId {
        // If the bound straddles the middle of this cell no shrinking is
        // possible.
        if self.level == 0 {
            if rect.x.contains(0.) || rect.y.contains(0.) {
                return self.id;
            }
        } else {
            let ij_size = i64::from(CellId::size_ij(self.level));
            let u = st_to_uv(siti_to_st(
                (2 * i64::from(self.i_lo) + ij_size) as u32,
            ));
            let v = st_to_uv(siti_to_st(
                (2 * i64::from(self.j_lo) + ij_size) as u32,
            ));
            if rect.x.contains(u) || rect.y.contains(v) {
                return self.id;
            }
        }

        // Find the leaf span of the padded bound, then the first level at
        // which that span splits.
        let padded = rect.expanded(self.padding + 1.5 * DBL_EPSILON);
        let ij_size = CellId::size_ij(self.level) as i32;

        let i_min = self.i_lo.max(st_to_ij(uv_to_st(padded.x.lo)));
        let i_max = (self.i_lo + ij_size - 1)
            .min(st_to_ij(uv_to_st(padded.x.hi)));
        let i_xor = i_min ^ i_max;

        let j_min = self.j_lo.max(st_to_ij(uv_to_st(padded.y.lo)));
        let j_max = (self.j_lo + ij_size - 1)
            .min(st_to_ij(uv_to_st(padded.y.hi)));
        let j_xor = j_min ^ j_max;

        // The highest differing bit position gives the deepest level at
        // which both extremes share one cell.
        let level_msb = ((i_xor | j_xor) as u64) << 1 | 1;
        let level = MAX_LEVEL - (63 - level_msb.leading_zeros()) as u8;
        if level <= self.level {
            return self.id;
        }
        CellId::from_face_ij(self.id.face(), i_min, j_min).parent(level)
    }
}

// -----------------------------------------------------------------------------

/// Tracks which shapes contain the "focus", a point moved along the
/// space-filling curve during the build so that each finalised cell can
/// record interior containment at its center.
pub(super) struct InteriorTracker {
    active: bool,
    /// Previous and current focus.
    a: Point,
    b: Point,
    next_cell_id: CellId,
    crosser: EdgeCrosser,
    /// Sorted ids of the shapes currently containing the focus.
    shape_ids: Vec<ShapeId>,
}

impl InteriorTracker {
    fn new() -> Self {
        // The focus starts at the beginning of the space-filling curve.
        let origin = curve_start();
        Self {
            active: false,
            a: origin,
            b: origin,
            next_cell_id: CellId::from_face(0).child_begin(MAX_LEVEL),
            crosser: EdgeCrosser::new(origin, origin),
            shape_ids: Vec::new(),
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn focus(&self) -> Point {
        self.b
    }

    fn shape_ids(&self) -> &[ShapeId] {
        &self.shape_ids
    }

    /// Registers a shape with an interior; tracking becomes active.
    fn add_shape(&mut self, shape_id: ShapeId, contains_focus: bool) {
        self.active = true;
        if contains_focus {
            self.toggle_shape(shape_id);
        }
    }

    /// Moves the focus without testing for crossings (the caller
    /// guarantees no boundary is crossed).
    fn move_to(&mut self, b: Point) {
        self.b = b;
    }

    /// Moves the focus, preparing to test edges against the traversed
    /// segment.
    fn draw_to(&mut self, b: Point) {
        self.a = self.b;
        self.b = b;
        self.crosser = EdgeCrosser::new(self.a, self.b);
    }

    /// Toggles the shape's containment if its edge crosses the segment of
    /// the last `draw_to`.
    fn test_edge(&mut self, shape_id: ShapeId, edge: &Edge) {
        if self.crosser.edge_or_vertex_crossing(edge.v0, edge.v1) {
            self.toggle_shape(shape_id);
        }
    }

    /// Records that the focus will next be at the entry of `next`.
    fn set_next_cell_id(&mut self, next: CellId) {
        self.next_cell_id = next.range_min();
    }

    /// Returns true if the focus is already at the entry of `cell`.
    fn at_cell_id(&self, cell: CellId) -> bool {
        cell.range_min() == self.next_cell_id
    }

    fn toggle_shape(&mut self, shape_id: ShapeId) {
        match self.shape_ids.binary_search(&shape_id) {
            Ok(i) => {
                self.shape_ids.remove(i);
            }
            Err(i) => self.shape_ids.insert(i, shape_id),
        }
    }
}

/// The start of the space-filling curve: the (-1,-1) corner of face 0.
fn curve_start() -> Point {
    coord::face_uv_to_xyz(0, -1., -1.).normalize()
}
