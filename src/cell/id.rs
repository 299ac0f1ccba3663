use crate::{
    coord::{
        self, ij_to_st_min, siti_to_st, st_to_ij, st_to_uv, uv_to_st, LatLng,
    },
    interval::R1Interval,
    point::Point,
    r2rect::R2Rect,
    MAX_LEVEL, MAX_SIZE, NUM_FACES, POS_BITS,
};
use std::fmt;

/// Bit masks encoding the orientation of the space-filling curve within a
/// subcell: axes swapped, and/or i/j inverted.
pub(crate) const SWAP_MASK: u8 = 0x01;
pub(crate) const INVERT_MASK: u8 = 0x02;

/// `(i,j)` offset of each subcell in Hilbert traversal order, for each of
/// the four curve orientations (packed as `i << 1 | j`).
#[rustfmt::skip]
pub(crate) const POS_TO_IJ: [[u8; 4]; 4] = [
  // 0  1  2  3
    [0, 1, 3, 2], // canonical order:    (0,0), (0,1), (1,1), (1,0)
    [0, 2, 3, 1], // axes swapped:       (0,0), (1,0), (1,1), (0,1)
    [3, 2, 0, 1], // bits inverted:      (1,1), (1,0), (0,0), (0,1)
    [3, 1, 0, 2], // swapped & inverted: (1,1), (0,1), (0,0), (1,0)
];

/// Inverse of [`POS_TO_IJ`]: traversal position of each `(i,j)` subcell.
#[rustfmt::skip]
pub(crate) const IJ_TO_POS: [[u8; 4]; 4] = [
  // (0,0) (0,1) (1,0) (1,1)
    [0, 1, 3, 2], // canonical order
    [0, 3, 1, 2], // axes swapped
    [2, 3, 1, 0], // bits inverted
    [2, 1, 3, 0], // swapped & inverted
];

/// Orientation adjustment applied when descending into each subcell.
pub(crate) const POS_TO_ORIENTATION: [u8; 4] =
    [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];

/// The lookup tables below convert between 4 levels of `(i,j)` cell indexes
/// and the corresponding positions along the space-filling curve in one
/// step. Each entry maps 8 position (or `i`/`j`) bits plus 2 orientation
/// bits to 8 `i`/`j` (or position) bits plus the new orientation.
const LOOKUP_BITS: u32 = 4;
const LOOKUP_TABLE_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

const LOOKUP_POS: [u16; LOOKUP_TABLE_SIZE] = build_lookup_tables().0;
const LOOKUP_IJ: [u16; LOOKUP_TABLE_SIZE] = build_lookup_tables().1;

const fn build_lookup_tables(
) -> ([u16; LOOKUP_TABLE_SIZE], [u16; LOOKUP_TABLE_SIZE]) {
    let mut lookup_pos = [0u16; LOOKUP_TABLE_SIZE];
    let mut lookup_ij = [0u16; LOOKUP_TABLE_SIZE];

    let mut orig_orientation: usize = 0;
    while orig_orientation < 4 {
        let mut pos: usize = 0;
        while pos < 1 << (2 * LOOKUP_BITS) {
            // Walk the four levels encoded in `pos`, accumulating the
            // (i,j) offsets and tracking the curve orientation.
            let mut orientation = orig_orientation;
            let mut i: usize = 0;
            let mut j: usize = 0;
            let mut level = 0;
            while level < LOOKUP_BITS {
                let subpos = (pos >> (2 * (LOOKUP_BITS - 1 - level))) & 3;
                let ij = POS_TO_IJ[orientation][subpos] as usize;
                i = (i << 1) | (ij >> 1);
                j = (j << 1) | (ij & 1);
                orientation ^= POS_TO_ORIENTATION[subpos] as usize;
                level += 1;
            }

            let ij = (i << LOOKUP_BITS) | j;
            lookup_pos[(ij << 2) | orig_orientation] =
                ((pos << 2) | orientation) as u16;
            lookup_ij[(pos << 2) | orig_orientation] =
                ((ij << 2) | orientation) as u16;

            pos += 1;
        }
        orig_orientation += 1;
    }

    (lookup_pos, lookup_ij)
}

/// First invalid id beyond the last valid cell of face 5; also the length
/// of the full Hilbert order, used for wrapping.
const WRAP_OFFSET: u64 = (NUM_FACES as u64) << POS_BITS;

// -----------------------------------------------------------------------------

/// A 64-bit identifier of a cell in the hierarchical decomposition of the
/// sphere.
///
/// The id encodes a 3-bit cube face, the position of the cell center along
/// the space-filling curve over that face, and the subdivision level:
///
/// ```text
///  ┏━━━━┳━━━━━━━━━━━━━━━┳━┳━┈┈┈┈┈━┓
///  ┃ F  ┃ C₁ C₂ … Cₗ    ┃1┃ 0 … 0 ┃
///  ┗━━━━┻━━━━━━━━━━━━━━━┻━┻━┈┈┈┈┈━┛
///  64  61               2·(30−L)+1
/// ```
///
/// Where:
/// - `F` is the face, in `[0; 6)`, coded on 3 bits (61-63).
/// - `Cₖ` selects one of the four children at level `k`, 2 bits each.
/// - The trailing `1` bit marks the level: a cell at level `L` has its
///   lowest set bit at position `2·(30−L)`.
///
/// Sequentially increasing ids follow a continuous space-filling curve over
/// the entire sphere, and the id of a parent is at the midpoint of the
/// range of ids spanned by its children.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CellId(u64);

impl CellId {
    /// The invalid (zero) cell id.
    pub const NONE: Self = Self(0);

    /// An invalid cell id guaranteed to be larger than any valid one.
    pub const SENTINEL: Self = Self(u64::MAX);

    /// Initializes a cell id from its raw 64-bit value.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw 64-bit value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true if the id represents a valid cell.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & 0x1555555555555555) != 0
    }

    /// The cube face of the cell, in `[0; 6)`.
    #[must_use]
    pub const fn face(self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// The position of the cell center along the space-filling curve over
    /// its face, in `[0; 2⁶¹)`.
    #[must_use]
    pub const fn pos(self) -> u64 {
        self.0 & (u64::MAX >> 3)
    }

    /// The subdivision level of the cell, in `[0; 30]`.
    #[must_use]
    pub const fn level(self) -> u8 {
        debug_assert!(self.0 != 0);
        MAX_LEVEL - (self.0.trailing_zeros() as u8 >> 1)
    }

    /// Returns true for leaf cells (level 30).
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        self.0 & 1 != 0
    }

    /// Returns true for the six face cells (level 0).
    #[must_use]
    pub const fn is_face(self) -> bool {
        self.0 & (Self::lsb_for_level(0) - 1) == 0
    }

    /// The lowest set bit of the id, `1 << (2·(30 − level))`.
    #[must_use]
    pub const fn lsb(self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// The lowest set bit of any id at the given level.
    #[must_use]
    pub const fn lsb_for_level(level: u8) -> u64 {
        1 << (2 * (MAX_LEVEL - level))
    }

    /// The cell covering the entire given face.
    #[must_use]
    pub const fn from_face(face: u8) -> Self {
        debug_assert!(face < NUM_FACES);
        Self(((face as u64) << POS_BITS) + Self::lsb_for_level(0))
    }

    /// The cell at the given level containing the given position along the
    /// face's space-filling curve.
    ///
    /// The position's low bits are discarded as the level dictates.
    #[must_use]
    pub fn from_face_pos_level(face: u8, pos: u64, level: u8) -> Self {
        debug_assert!(face < NUM_FACES && level <= MAX_LEVEL);
        Self(((face as u64) << POS_BITS) + (pos | 1)).parent(level)
    }

    /// The ancestor cell at the given level.
    #[must_use]
    pub fn parent(self, level: u8) -> Self {
        debug_assert!(self.is_valid() && level <= self.level());
        let lsb = Self::lsb_for_level(level);
        Self((self.0 & lsb.wrapping_neg()) | lsb)
    }

    /// The ancestor cell one level up.
    #[must_use]
    pub fn immediate_parent(self) -> Self {
        debug_assert!(self.is_valid() && !self.is_face());
        let lsb = self.lsb() << 2;
        Self((self.0 & lsb.wrapping_neg()) | lsb)
    }

    /// The position of the level-`level` ancestor within its parent, in
    /// `[0; 4)`.
    #[must_use]
    pub const fn child_position(self, level: u8) -> u8 {
        debug_assert!(level >= 1 && level <= MAX_LEVEL);
        ((self.0 >> (2 * (MAX_LEVEL - level) + 1)) & 3) as u8
    }

    /// The `k`-th child of the cell, in traversal order.
    #[must_use]
    pub fn child(self, k: u8) -> Self {
        debug_assert!(!self.is_leaf() && k < 4);
        let new_lsb = self.lsb() >> 2;
        Self(
            self.0
                .wrapping_add((2 * u64::from(k) + 1).wrapping_sub(4).wrapping_mul(new_lsb)),
        )
    }

    /// The four children of the cell, in traversal order.
    #[must_use]
    pub fn children(self) -> [Self; 4] {
        debug_assert!(!self.is_leaf());
        let new_lsb = self.lsb() >> 2;
        let first = Self(self.0 - new_lsb * 3);
        [
            first,
            Self(first.0 + 2 * new_lsb),
            Self(first.0 + 4 * new_lsb),
            Self(first.0 + 6 * new_lsb),
        ]
    }

    /// The first descendant cell at the given level, in traversal order.
    #[must_use]
    pub fn child_begin(self, level: u8) -> Self {
        debug_assert!(self.is_valid() && level >= self.level());
        Self(self.0 - self.lsb() + Self::lsb_for_level(level))
    }

    /// One past the last descendant cell at the given level.
    #[must_use]
    pub fn child_end(self, level: u8) -> Self {
        debug_assert!(self.is_valid() && level >= self.level());
        Self(self.0 + self.lsb() + Self::lsb_for_level(level))
    }

    /// The first cell of the whole traversal order at the given level.
    #[must_use]
    pub fn begin(level: u8) -> Self {
        Self::from_face(0).child_begin(level)
    }

    /// One past the last cell of the whole traversal order at the given
    /// level.
    #[must_use]
    pub fn end(level: u8) -> Self {
        Self::from_face(5).child_end(level)
    }

    /// The smallest leaf cell id descending from this cell.
    #[must_use]
    pub const fn range_min(self) -> Self {
        Self(self.0 - (self.lsb() - 1))
    }

    /// The largest leaf cell id descending from this cell.
    #[must_use]
    pub const fn range_max(self) -> Self {
        Self(self.0 + (self.lsb() - 1))
    }

    /// Returns true if `self` is equal to or an ancestor of `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 >= self.range_min().0 && other.0 <= self.range_max().0
    }

    /// Returns true if the two cells share any point.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        other.range_min().0 <= self.range_max().0
            && other.range_max().0 >= self.range_min().0
    }

    /// The next cell at the same level, in traversal order.
    ///
    /// Walking past the last cell of face 5 yields an invalid id.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(self.lsb() << 1))
    }

    /// The previous cell at the same level, in traversal order.
    ///
    /// Walking before the first cell of face 0 yields an invalid id.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self(self.0.wrapping_sub(self.lsb() << 1))
    }

    /// Advances by the given number of cells at the current level (which
    /// may be negative), wrapping from the end of face 5 back to the start
    /// of face 0.
    #[must_use]
    pub fn advance(self, steps: i64) -> Self {
        if steps == 0 {
            return self;
        }

        // Each step moves the id by twice the lsb; work in step units to
        // keep the arithmetic within i64.
        let step_shift = 2 * u32::from(MAX_LEVEL - self.level()) + 1;
        let mut steps = steps;
        if steps < 0 {
            let min_steps = -((self.0 >> step_shift) as i64);
            if steps < min_steps {
                let step_wrap = (WRAP_OFFSET >> step_shift) as i64;
                steps %= step_wrap;
                if steps < min_steps {
                    steps += step_wrap;
                }
            }
        } else {
            let max_steps = ((WRAP_OFFSET - self.0) >> step_shift) as i64;
            if steps > max_steps {
                let step_wrap = (WRAP_OFFSET >> step_shift) as i64;
                steps %= step_wrap;
                if steps > max_steps {
                    steps -= step_wrap;
                }
            }
        }
        Self(self.0.wrapping_add((steps as u64) << step_shift))
    }

    /// The largest cell with the same `range_min` as this one whose
    /// `range_max` stays below `limit`.
    ///
    /// Repeatedly tiling from a start cell produces the minimal covering
    /// of the leaf range up to `limit`.
    #[must_use]
    pub fn maximum_tile(self, limit: Self) -> Self {
        let mut id = self;
        let start = id.range_min();
        if start >= limit.range_min() {
            return limit;
        }
        if id.range_max() >= limit {
            // Too large: descend along the first children until it fits.
            loop {
                id = id.child(0);
                if id.range_max() < limit {
                    return id;
                }
            }
        }
        // Possibly too small: grow while the parent still fits.
        while !id.is_face() {
            let parent = id.immediate_parent();
            if parent.range_min() != start || parent.range_max() >= limit {
                break;
            }
            id = parent;
        }
        id
    }

    /// The level of the closest common ancestor of the two cells, if any.
    ///
    /// Cells on different faces have no common ancestor.
    #[must_use]
    pub fn common_ancestor_level(self, other: Self) -> Option<u8> {
        let bits = (self.0 ^ other.0).max(self.lsb().max(other.lsb()));
        debug_assert!(bits != 0);

        let msb_pos = 63 - bits.leading_zeros();
        if msb_pos > 60 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        Some(((60 - msb_pos) >> 1) as u8)
    }

    /// The number of leaf cells spanned by a cell edge at the given level.
    #[must_use]
    pub const fn size_ij(level: u8) -> u32 {
        1 << (MAX_LEVEL - level)
    }

    /// The edge length of cells at the given level, in `(s,t)` units.
    #[must_use]
    pub fn size_st(level: u8) -> f64 {
        f64::from(Self::size_ij(level)) / f64::from(MAX_SIZE)
    }

    // ---- Coordinate conversions ---------------------------------------------

    /// The leaf cell containing the given `(face, i, j)` coordinates.
    #[must_use]
    pub fn from_face_ij(face: u8, i: i32, j: i32) -> Self {
        // Process the (i,j) bits in 4-bit batches, looking up the curve
        // position of each batch while threading the orientation through.
        let mut n = u64::from(face) << (POS_BITS - 1);
        let mut bits = u64::from(face & SWAP_MASK);

        let mask = (1u64 << LOOKUP_BITS) - 1;
        for k in (0..8u32).rev() {
            let shift = k * LOOKUP_BITS;
            bits += ((i as u64 >> shift) & mask) << (LOOKUP_BITS + 2);
            bits += ((j as u64 >> shift) & mask) << 2;
            bits = u64::from(LOOKUP_POS[bits as usize]);
            n |= (bits >> 2) << (k * 2 * LOOKUP_BITS);
            bits &= u64::from(SWAP_MASK | INVERT_MASK);
        }

        Self(n * 2 + 1)
    }

    /// The leaf cell at the given `(face, i, j)`, reprojecting onto the
    /// appropriate neighbouring face when the coordinates lie beyond the
    /// face boundary.
    fn from_face_ij_wrap(face: u8, i: i32, j: i32) -> Self {
        // Clamp to a leaf cell just beyond the boundary, then project
        // through 3D and back. A linear u=2·s−1 projection suffices here
        // since only the neighbouring face assignment matters; the clamp to
        // barely outside [-1,1] keeps the reprojection division from
        // drifting into the wrong leaf cell.
        let i = i.clamp(-1, MAX_SIZE as i32);
        let j = j.clamp(-1, MAX_SIZE as i32);

        let scale = 1. / f64::from(MAX_SIZE);
        let limit = 1.0 + f64::EPSILON;
        let u = (scale * f64::from(2 * (i - MAX_SIZE as i32 / 2) + 1))
            .clamp(-limit, limit);
        let v = (scale * f64::from(2 * (j - MAX_SIZE as i32 / 2) + 1))
            .clamp(-limit, limit);

        let (face, u, v) =
            coord::xyz_to_face_uv(coord::face_uv_to_xyz(face, u, v));
        Self::from_face_ij(face, st_to_ij(0.5 * (u + 1.)), st_to_ij(0.5 * (v + 1.)))
    }

    /// Dispatches on whether the `(i,j)` coordinates landed on the original
    /// face.
    fn from_face_ij_same(face: u8, i: i32, j: i32, same_face: bool) -> Self {
        if same_face {
            Self::from_face_ij(face, i, j)
        } else {
            Self::from_face_ij_wrap(face, i, j)
        }
    }

    /// Decomposes the id into its face, `(i,j)` coordinates and curve
    /// orientation at the cell's level.
    #[must_use]
    pub fn to_face_ij_orientation(self) -> (u8, i32, i32, u8) {
        let face = self.face();
        let mut bits = u64::from(face & SWAP_MASK);
        let mut i: i32 = 0;
        let mut j: i32 = 0;

        // Each batch unpacks 4 levels (2 on the first, which also holds the
        // face and sentinel bits).
        for k in (0..8u32).rev() {
            let nbits = if k == 7 {
                u32::from(MAX_LEVEL) - 7 * LOOKUP_BITS
            } else {
                LOOKUP_BITS
            };
            bits += ((self.0 >> (u64::from(k) * 2 * u64::from(LOOKUP_BITS) + 1))
                & ((1 << (2 * nbits)) - 1))
                << 2;
            bits = u64::from(LOOKUP_IJ[bits as usize]);
            let shift = k * LOOKUP_BITS;
            i += ((bits >> (LOOKUP_BITS + 2)) as i32) << shift;
            j += (((bits >> 2) & ((1 << LOOKUP_BITS) - 1)) as i32) << shift;
            bits &= u64::from(SWAP_MASK | INVERT_MASK);
        }

        // The curve inverts its orientation in the two quadrants where the
        // accumulated position bits are odd.
        debug_assert_eq!(0, POS_TO_ORIENTATION[2]);
        debug_assert_eq!(SWAP_MASK, POS_TO_ORIENTATION[0]);
        let orientation = if self.lsb() & 0x1111111111111110 != 0 {
            (bits as u8) ^ SWAP_MASK
        } else {
            bits as u8
        };

        (face, i, j, orientation)
    }

    /// The leaf cell containing the given point.
    #[must_use]
    pub fn from_point(p: Point) -> Self {
        let (face, u, v) = coord::xyz_to_face_uv(p);
        Self::from_face_ij(face, st_to_ij(uv_to_st(u)), st_to_ij(uv_to_st(v)))
    }

    /// The leaf cell containing the given coordinate.
    #[must_use]
    pub fn from_latlng(ll: LatLng) -> Self {
        Self::from_point(Point::from(ll))
    }

    /// The face and `(si, ti)` coordinates of the cell center.
    #[must_use]
    pub fn center_siti(self) -> (u8, u32, u32) {
        let (face, i, j, _) = self.to_face_ij_orientation();

        // The center of a leaf cell sits at an odd half-leaf coordinate;
        // coarser cells center on the boundary between their middle
        // children, whose parity follows the curve position.
        let delta = if self.is_leaf() {
            1
        } else if ((i as i64 ^ (self.0 >> 2) as i64) & 1) != 0 {
            2
        } else {
            0
        };

        (face, (2 * i as u32) + delta, (2 * j as u32) + delta)
    }

    /// The direction vector of the cell center (not unit length).
    #[must_use]
    pub fn to_point_raw(self) -> Point {
        let (face, si, ti) = self.center_siti();
        coord::face_uv_to_xyz(
            face,
            st_to_uv(siti_to_st(si)),
            st_to_uv(siti_to_st(ti)),
        )
    }

    /// The unit vector of the cell center.
    #[must_use]
    pub fn to_point(self) -> Point {
        self.to_point_raw().normalize()
    }

    /// The coordinate of the cell center.
    #[must_use]
    pub fn to_latlng(self) -> LatLng {
        LatLng::from(self.to_point_raw())
    }

    /// The `(u,v)` rectangle covered by the cell on its face.
    #[must_use]
    pub fn bound_uv(self) -> R2Rect {
        let (_, i, j, _) = self.to_face_ij_orientation();
        Self::ij_level_to_bound_uv(i, j, self.level())
    }

    /// The bound in `(u,v)`-space of the cell at `level` containing the
    /// leaf cell with the given `(i,j)`-coordinates.
    #[must_use]
    pub fn ij_level_to_bound_uv(i: i32, j: i32, level: u8) -> R2Rect {
        let cell_size = Self::size_ij(level) as i32;
        let bound = |ij: i32| {
            let ij_lo = ij & -cell_size;
            let ij_hi = ij_lo + cell_size;
            R1Interval::new(
                st_to_uv(ij_to_st_min(ij_lo)),
                st_to_uv(ij_to_st_min(ij_hi)),
            )
        };
        R2Rect::from_intervals(bound(i), bound(j))
    }

    // ---- Neighbours ---------------------------------------------------------

    /// The four cells adjacent across the cell's edges.
    ///
    /// Edges 0, 1, 2, 3 are down, right, up, left, in `(i,j)` terms; at
    /// face boundaries the neighbour lies on the adjacent face.
    #[must_use]
    pub fn edge_neighbors(self) -> [Self; 4] {
        let level = self.level();
        let size = Self::size_ij(level) as i32;
        let (face, i, j, _) = self.to_face_ij_orientation();
        let max = MAX_SIZE as i32;

        [
            Self::from_face_ij_same(face, i, j - size, j - size >= 0)
                .parent(level),
            Self::from_face_ij_same(face, i + size, j, i + size < max)
                .parent(level),
            Self::from_face_ij_same(face, i, j + size, j + size < max)
                .parent(level),
            Self::from_face_ij_same(face, i - size, j, i - size >= 0)
                .parent(level),
        ]
    }

    /// The cells at the given (strictly coarser) level sharing the vertex
    /// of this cell's center closest quadrant corner: three or four cells
    /// depending on face boundaries.
    #[must_use]
    pub fn vertex_neighbors(self, level: u8) -> Vec<Self> {
        debug_assert!(level < self.level());
        let (face, i, j, _) = self.to_face_ij_orientation();
        let max = MAX_SIZE as i32;

        // The next bit of i and j tells which quadrant of parent(level)
        // the cell lies in, hence which vertex is closest.
        let halfsize = Self::size_ij(level + 1) as i32;
        let size = halfsize << 1;
        let (ioffset, isame) = if i & halfsize != 0 {
            (size, i + size < max)
        } else {
            (-size, i - size >= 0)
        };
        let (joffset, jsame) = if j & halfsize != 0 {
            (size, j + size < max)
        } else {
            (-size, j - size >= 0)
        };

        let mut neighbors = Vec::with_capacity(4);
        neighbors.push(self.parent(level));
        neighbors.push(
            Self::from_face_ij_same(face, i + ioffset, j, isame).parent(level),
        );
        neighbors.push(
            Self::from_face_ij_same(face, i, j + joffset, jsame).parent(level),
        );
        if isame || jsame {
            neighbors.push(
                Self::from_face_ij_same(
                    face,
                    i + ioffset,
                    j + joffset,
                    isame && jsame,
                )
                .parent(level),
            );
        }
        neighbors
    }

    /// All cells at the given level (no finer than this cell's) bordering
    /// this cell on any edge or vertex.
    #[must_use]
    pub fn all_neighbors(self, level: u8) -> Vec<Self> {
        debug_assert!(level >= self.level());
        let (face, mut i, mut j, _) = self.to_face_ij_orientation();
        let max = MAX_SIZE as i32;

        // Align (i,j) on the boundary of this cell.
        let size = Self::size_ij(self.level()) as i32;
        i &= -size;
        j &= -size;

        let nbr_size = Self::size_ij(level) as i32;
        let mut neighbors = Vec::new();

        // Sweep a band of neighbour-sized cells along the bottom and top
        // edges, plus the flanking columns.
        let mut k = -nbr_size;
        loop {
            let same_face = if k < 0 {
                j + k >= 0
            } else if k >= size {
                j + k < max
            } else {
                // North and south neighbours.
                neighbors.push(
                    Self::from_face_ij_same(
                        face,
                        i + k,
                        j - nbr_size,
                        j - size >= 0,
                    )
                    .parent(level),
                );
                neighbors.push(
                    Self::from_face_ij_same(face, i + k, j + size, j + size < max)
                        .parent(level),
                );
                true
            };

            // East, west and diagonal neighbours.
            neighbors.push(
                Self::from_face_ij_same(
                    face,
                    i - nbr_size,
                    j + k,
                    same_face && i - size >= 0,
                )
                .parent(level),
            );
            neighbors.push(
                Self::from_face_ij_same(
                    face,
                    i + size,
                    j + k,
                    same_face && i + size < max,
                )
                .parent(level),
            );

            if k >= size {
                break;
            }
            k += nbr_size;
        }

        neighbors
    }

    // ---- Tokens -------------------------------------------------------------

    /// Serializes the id as a hex token, trimmed of trailing zeros.
    ///
    /// The invalid id serializes as `"X"`.
    #[must_use]
    pub fn to_token(self) -> String {
        if self.0 == 0 {
            return "X".to_owned();
        }
        let hex = format!("{:016x}", self.0);
        hex.trim_end_matches('0').to_owned()
    }

    /// Parses a token back into a cell id.
    ///
    /// Malformed tokens (longer than 16 characters, or containing any
    /// non-hex character) decode to the invalid id, as does `"X"`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.is_empty()
            || token.len() > 16
            || !token.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Self::NONE;
        }
        let mut id: u64 = 0;
        for byte in token.bytes() {
            let digit = match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                _ => byte - b'A' + 10,
            };
            id = (id << 4) | u64::from(digit);
        }
        // Tokens are left-aligned: pad the remainder with zeros.
        Self(id << (4 * (16 - token.len() as u32)))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "CellId(invalid: {:#x})", self.0);
        }
        write!(
            f,
            "CellId(face: {}, level: {}, token: {})",
            self.face(),
            self.level(),
            self.to_token()
        )
    }
}

#[cfg(test)]
#[path = "./id_tests.rs"]
mod tests;
