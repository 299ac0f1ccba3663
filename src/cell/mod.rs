//! Materialised cells.

pub(crate) mod id;

pub use id::CellId;

use crate::{
    cap::Cap,
    chord_angle::ChordAngle,
    coord::{self, LatLng},
    edge::distance,
    interval::{R1Interval, S1Interval},
    latlng_rect::LatLngRect,
    point::Point,
    r2rect::{R2Point, R2Rect},
    DBL_EPSILON,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// The minimum latitude reached by the four faces touching the poles,
/// shrunk by the projection rounding error.
const POLE_MIN_LAT: f64 = 0.615479708670387 - 0.5 * DBL_EPSILON; // asin(sqrt(1/3)) - eps

/// A cell of the sphere decomposition, materialised for repeated vertex,
/// edge, bound and distance queries.
///
/// Where [`CellId`] is a compact address, `Cell` caches the face, level,
/// orientation and `(u,v)` rectangle so that geometric queries avoid
/// re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    id: CellId,
    face: u8,
    level: u8,
    orientation: u8,
    uv: R2Rect,
}

impl Cell {
    /// The cell's id.
    #[must_use]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// The cube face the cell lives on.
    #[must_use]
    pub const fn face(&self) -> u8 {
        self.face
    }

    /// The subdivision level.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// The orientation of the space-filling curve within the cell.
    #[must_use]
    pub const fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Returns true for leaf cells.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.level == crate::MAX_LEVEL
    }

    /// The `(u,v)` rectangle covered by the cell on its face.
    #[must_use]
    pub const fn bound_uv(&self) -> R2Rect {
        self.uv
    }

    /// The center of the cell.
    #[must_use]
    pub fn center(&self) -> Point {
        self.id.to_point()
    }

    /// The `k`-th vertex of the cell (CCW order), normalized.
    #[must_use]
    pub fn vertex(&self, k: usize) -> Point {
        let corner = self.uv.vertex(k);
        coord::face_uv_to_xyz(self.face, corner.x, corner.y).normalize()
    }

    /// The inward-facing normal of the great circle through the `k`-th
    /// edge (from vertex `k` to vertex `k+1`), normalized.
    #[must_use]
    pub fn edge(&self, k: usize) -> Point {
        self.edge_raw(k).normalize()
    }

    /// Same as [`Cell::edge`], without normalization.
    #[must_use]
    pub fn edge_raw(&self, k: usize) -> Point {
        match k {
            0 => coord::v_norm(self.face, self.uv.y.lo), // Bottom
            1 => coord::u_norm(self.face, self.uv.x.hi), // Right
            2 => -coord::v_norm(self.face, self.uv.y.hi), // Top
            _ => -coord::u_norm(self.face, self.uv.x.lo), // Left
        }
    }

    /// Returns true if the cell contains the given point.
    ///
    /// Points on the boundary between two cells are contained by both, so
    /// that `Cell::from(CellId::from_point(p)).contains_point(p)` always
    /// holds.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        let Some((u, v)) = coord::face_xyz_to_uv(self.face, p) else {
            return false;
        };
        // The expansion covers the (u,v) to (s,t) conversion error, keeping
        // containment consistent with CellId::from_point.
        self.uv.expanded(DBL_EPSILON).contains_point(R2Point::new(u, v))
    }

    /// The average area of cells at the given level, in steradians.
    #[must_use]
    pub fn average_area(level: u8) -> f64 {
        // The six faces split 4π evenly, and each level quarters the area.
        (4. * PI / 6.) / (1u64 << (2 * u32::from(level))) as f64
    }

    /// The area of the cell, in steradians, accurate to 6 digits even for
    /// leaf cells.
    #[must_use]
    pub fn exact_area(&self) -> f64 {
        let v0 = self.vertex(0);
        let v1 = self.vertex(1);
        let v2 = self.vertex(2);
        let v3 = self.vertex(3);
        point_area(v0, v1, v2) + point_area(v0, v2, v3)
    }

    /// A spherical cap containing the cell.
    #[must_use]
    pub fn cap_bound(&self) -> Cap {
        // Centering the cap on the (u,v) center (rather than the true cell
        // center) keeps the bound within a couple percent of optimal.
        let center = self.uv.center();
        let axis =
            coord::face_uv_to_xyz(self.face, center.x, center.y).normalize();
        let mut cap = Cap::from_point(axis);
        for k in 0..4 {
            cap = cap.add_point(self.vertex(k));
        }
        cap
    }

    /// A latitude-longitude rectangle containing the cell.
    #[must_use]
    pub fn rect_bound(&self) -> LatLngRect {
        if self.level == 0 {
            // The 4 cells around the equator extend to +/-45 degrees
            // latitude, while the two polar cells extend down to +/-35.26
            // degrees (rounded conservatively).
            return match self.face {
                0 => rect(-FRAC_PI_4, FRAC_PI_4, -FRAC_PI_4, FRAC_PI_4),
                1 => rect(-FRAC_PI_4, FRAC_PI_4, FRAC_PI_4, 3. * FRAC_PI_4),
                2 => LatLngRect::from_intervals(
                    R1Interval::new(POLE_MIN_LAT, FRAC_PI_2),
                    S1Interval::FULL,
                ),
                3 => rect(-FRAC_PI_4, FRAC_PI_4, 3. * FRAC_PI_4, -3. * FRAC_PI_4),
                4 => rect(-FRAC_PI_4, FRAC_PI_4, -3. * FRAC_PI_4, -FRAC_PI_4),
                _ => LatLngRect::from_intervals(
                    R1Interval::new(-FRAC_PI_2, -POLE_MIN_LAT),
                    S1Interval::FULL,
                ),
            };
        }

        // Below level 0 the latitude and longitude extremes are attained at
        // the vertices; which pair depends on where the face sits relative
        // to the poles.
        let u = self.uv.x.center();
        let v = self.uv.y.center();
        let i = usize::from(if coord::u_axis(self.face).z == 0. {
            u < 0.
        } else {
            u > 0.
        });
        let j = usize::from(if coord::v_axis(self.face).z == 0. {
            v < 0.
        } else {
            v > 0.
        });

        let lat = R1Interval::from_point_pair(
            self.latitude(i, j),
            self.latitude(1 - i, 1 - j),
        );
        let lng = S1Interval::from_point_pair(
            self.longitude(i, 1 - j),
            self.longitude(1 - i, j),
        );

        // The expansion covers the vertex rounding error; the polar closure
        // accounts for all longitudes collapsing at the poles.
        LatLngRect::from_intervals(lat, lng)
            .expanded(LatLng::from_radians_unchecked(
                2. * DBL_EPSILON,
                2. * DBL_EPSILON,
            ))
            .polar_closure()
    }

    /// The minimum distance from the cell (interior included) to the given
    /// point.
    #[must_use]
    pub fn distance_to_point(&self, target: Point) -> ChordAngle {
        if self.contains_point(target) {
            return ChordAngle::ZERO;
        }
        let mut min = ChordAngle::INFINITY;
        for k in 0..4 {
            distance::update_min_distance(
                target,
                self.vertex(k),
                self.vertex((k + 1) & 3),
                &mut min,
            );
        }
        min
    }

    /// The maximum distance from the cell to the given point.
    #[must_use]
    pub fn max_distance_to_point(&self, target: Point) -> ChordAngle {
        // If all four vertices lie in the hemisphere around the target the
        // maximum is attained at one of them; otherwise it wraps past the
        // antipode.
        let mut max = ChordAngle::ZERO;
        for k in 0..4 {
            max = max.max(ChordAngle::between_points(target, self.vertex(k)));
        }
        if max <= ChordAngle::RIGHT {
            return max;
        }
        ChordAngle::STRAIGHT - self.distance_to_point(-target)
    }

    /// The minimum distance from the cell to the given edge.
    #[must_use]
    pub fn distance_to_edge(&self, a: Point, b: Point) -> ChordAngle {
        // Containment of either endpoint means distance zero; so does an
        // edge crossing, which the edge-pair distance detects.
        if self.contains_point(a) || self.contains_point(b) {
            return ChordAngle::ZERO;
        }

        let mut min = ChordAngle::INFINITY;
        for k in 0..4 {
            distance::update_edge_pair_min_distance(
                a,
                b,
                self.vertex(k),
                self.vertex((k + 1) & 3),
                &mut min,
            );
        }
        min
    }

    /// The maximum distance from the cell to the given edge.
    #[must_use]
    pub fn max_distance_to_edge(&self, a: Point, b: Point) -> ChordAngle {
        // If the whole edge stays within the hemisphere around the cell,
        // the maximum is attained at an endpoint; otherwise it wraps past
        // the antipodal edge.
        let max = self
            .max_distance_to_point(a)
            .max(self.max_distance_to_point(b));
        if max <= ChordAngle::RIGHT {
            return max;
        }
        ChordAngle::STRAIGHT - self.distance_to_edge(-a, -b)
    }

    /// The maximum distance between the two cells.
    #[must_use]
    pub fn max_distance_to_cell(&self, other: &Self) -> ChordAngle {
        // Touching the antipode of the other cell means a straight angle.
        if self.distance_to_point(-other.center()) == ChordAngle::ZERO {
            return ChordAngle::STRAIGHT;
        }
        let mut max = ChordAngle::ZERO;
        for k in 0..4 {
            let a = other.vertex(k);
            let b = other.vertex((k + 1) & 3);
            max = max.max(self.max_distance_to_edge(a, b));
        }
        max
    }

    /// The minimum distance between the two cells.
    #[must_use]
    pub fn distance_to_cell(&self, other: &Self) -> ChordAngle {
        // Intersection (including one containing the other) means zero.
        if self.id.intersects(other.id) {
            return ChordAngle::ZERO;
        }

        let mut min = ChordAngle::INFINITY;
        for k in 0..4 {
            let a = other.vertex(k);
            let b = other.vertex((k + 1) & 3);
            min = min.min(self.distance_to_edge(a, b));
        }
        min
    }

    /// The latitude of the `(i, j)` corner of the `(u,v)` rectangle.
    fn latitude(&self, i: usize, j: usize) -> f64 {
        let p = coord::face_uv_to_xyz(
            self.face,
            self.uv.x.bound(i),
            self.uv.y.bound(j),
        );
        p.z.atan2(p.x.hypot(p.y))
    }

    /// The longitude of the `(i, j)` corner of the `(u,v)` rectangle.
    fn longitude(&self, i: usize, j: usize) -> f64 {
        let p = coord::face_uv_to_xyz(
            self.face,
            self.uv.x.bound(i),
            self.uv.y.bound(j),
        );
        p.y.atan2(p.x)
    }
}

impl From<CellId> for Cell {
    fn from(id: CellId) -> Self {
        let (face, i, j, orientation) = id.to_face_ij_orientation();
        Self {
            id,
            face,
            level: id.level(),
            orientation,
            uv: CellId::ij_level_to_bound_uv(i, j, id.level()),
        }
    }
}

/// A latitude-longitude rectangle from endpoint radians.
fn rect(lat_lo: f64, lat_hi: f64, lng_lo: f64, lng_hi: f64) -> LatLngRect {
    LatLngRect::from_intervals(
        R1Interval::new(lat_lo, lat_hi),
        S1Interval::new(lng_lo, lng_hi),
    )
}

// -----------------------------------------------------------------------------

/// The area of the spherical triangle `(a, b, c)`, in steradians.
///
/// Uses l'Huilier's formula, falling back to Girard's when it is more
/// accurate (nearly-degenerate long thin triangles).
fn point_area(a: Point, b: Point, c: Point) -> f64 {
    let sa = b.angle(c).radians();
    let sb = c.angle(a).radians();
    let sc = a.angle(b).radians();
    let s = 0.5 * (sa + sb + sc);

    if s >= 3e-4 {
        let s2 = s * s;
        let dmin = s - sa.max(sb).max(sc);
        if dmin < 1e-2 * s * s2 * s2 {
            let area = girard_area(a, b, c);
            if dmin < s * (0.1 * (area + 5e-15)) {
                return area;
            }
        }
    }

    4. * ((0.5 * s).tan()
        * (0.5 * (s - sa)).tan()
        * (0.5 * (s - sb)).tan()
        * (0.5 * (s - sc)).tan())
    .max(0.)
    .sqrt()
    .atan()
}

/// The area of the triangle via Girard's formula; less accurate than
/// l'Huilier for small triangles but stable for degenerate ones.
fn girard_area(a: Point, b: Point, c: Point) -> f64 {
    let ab = a.stable_cross(b);
    let bc = b.stable_cross(c);
    let ac = a.stable_cross(c);
    (ab.angle(ac).radians() - ab.angle(bc).radians()
        + bc.angle(ac).radians())
    .max(0.)
}

#[cfg(test)]
#[path = "./cell_tests.rs"]
mod tests;
