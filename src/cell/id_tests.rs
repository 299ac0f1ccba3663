use super::*;
use float_eq::assert_float_eq;

#[test]
fn default_is_invalid() {
    assert!(!CellId::NONE.is_valid());
    assert!(!CellId::SENTINEL.is_valid());
    assert!(CellId::NONE < CellId::SENTINEL);
}

#[test]
fn face_cells() {
    for face in 0..6 {
        let id = CellId::from_face(face);

        assert!(id.is_valid());
        assert!(id.is_face());
        assert!(!id.is_leaf());
        assert_eq!(id.face(), face);
        assert_eq!(id.level(), 0);
        assert_eq!(id.pos(), 1 << 60);
    }
}

#[test]
fn from_face_pos_level() {
    // Scenario from the original library: building at a coarse level
    // discards the low position bits.
    let id = CellId::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);

    assert!(id.is_valid());
    assert_eq!(id.face(), 3);
    assert_eq!(id.level(), 26);
    assert_eq!(id.child_begin(27).pos(), 0x12345640);
    assert_eq!(id.parent(24).pos(), 0x12345000);
}

#[test]
fn parent_child_round_trip() {
    let ids = [
        CellId::from_face(2),
        CellId::from_latlng(LatLng::from_degrees(48.86, 2.34)).parent(12),
        CellId::from_latlng(LatLng::from_degrees(-33.87, 151.21)).parent(27),
    ];

    for id in ids {
        let level = id.level();
        for (k, child) in id.children().into_iter().enumerate() {
            assert_eq!(child.level(), level + 1);
            assert_eq!(child.parent(level), id, "child {k} points back");
            assert_eq!(child.immediate_parent(), id);
            assert_eq!(child.child_position(level + 1), k as u8);
            assert!(id.contains(child));
            assert!(id.intersects(child));
        }

        assert_eq!(id.children()[0], id.child_begin(level + 1));
        assert_eq!(id.children()[3].next(), id.child_end(level + 1));
    }
}

#[test]
fn containment_is_range_inclusion() {
    let a = CellId::from_latlng(LatLng::from_degrees(10., 20.)).parent(8);
    let inside = a.child(2).child(1);
    let outside = a.next();

    assert!(a.contains(inside));
    assert!(inside >= a.range_min() && inside <= a.range_max());
    assert!(!a.contains(outside));
    assert!(outside > a.range_max());
    assert!(a.intersects(a.parent(3)));
    assert!(!a.intersects(outside));
}

#[test]
fn level_arithmetic() {
    let leaf = CellId::from_point(Point::new(1., 0.5, -0.25).normalize());

    assert!(leaf.is_leaf());
    assert_eq!(leaf.level(), MAX_LEVEL);
    assert_eq!(leaf.range_min(), leaf);
    assert_eq!(leaf.range_max(), leaf);

    for level in (0..MAX_LEVEL).rev() {
        let parent = leaf.parent(level);
        assert_eq!(parent.level(), level);
        assert!(parent.contains(leaf));
    }
}

#[test]
fn hilbert_round_trip() {
    let points = [
        Point::new(1., 0., 0.),
        Point::new(-1., 0.003, 0.004).normalize(),
        Point::new(0.3, -0.9, 0.1).normalize(),
        Point::new(0., 0., -1.),
    ];

    for p in points {
        let cell = CellId::from_point(p);
        assert_eq!(
            CellId::from_face_pos_level(cell.face(), cell.pos(), cell.level()),
            cell
        );

        let (face, i, j, _) = cell.to_face_ij_orientation();
        assert_eq!(CellId::from_face_ij(face, i, j), cell);
    }
}

#[test]
fn from_point_accuracy() {
    // A leaf cell is ~0.7cm wide; the center of the leaf containing a point
    // is within 1e-9 degrees of it.
    for &(lat, lng) in &[
        (0., 0.),
        (48.864716, 2.349014),
        (-33.8688, 151.2093),
        (62.3, -149.1),
    ] {
        let ll = LatLng::from_degrees(lat, lng);
        let round = CellId::from_latlng(ll).to_latlng();

        assert_float_eq!(round.lat(), lat, abs <= 1e-9);
        assert_float_eq!(round.lng(), lng, abs <= 1e-9);
    }
}

#[test]
fn face_centers() {
    for face in 0..6 {
        let center = CellId::from_face(face).to_point();
        assert_eq!(center, coord::unit_norm(face), "center of face {face}");
        assert_eq!(CellId::from_point(center).face(), face);
    }
}

#[test]
fn tokens() {
    // Tokens trim trailing zeros.
    let id = CellId::from_raw(0x3fec000000000000);
    assert_eq!(id.to_token(), "3fec");
    assert_eq!(CellId::from_token("3fec"), id);

    let leaf = CellId::from_raw(0x3fec1234567890a1);
    assert_eq!(leaf.to_token(), "3fec1234567890a1");
    assert_eq!(CellId::from_token("3fec1234567890a1"), leaf);

    // The invalid cell uses a dedicated token.
    assert_eq!(CellId::NONE.to_token(), "X");
    assert_eq!(CellId::from_token("X"), CellId::NONE);
    assert_eq!(CellId::from_token("x"), CellId::NONE);

    // Malformed tokens decode to the invalid cell.
    assert_eq!(CellId::from_token("876b e99"), CellId::NONE);
    assert_eq!(CellId::from_token("876[ee99"), CellId::NONE);
    assert_eq!(CellId::from_token(" 876bee99"), CellId::NONE);
    assert_eq!(CellId::from_token(""), CellId::NONE);
    assert_eq!(CellId::from_token("123456789012345678"), CellId::NONE);
}

#[test]
fn token_round_trip_at_all_levels() {
    let leaf = CellId::from_latlng(LatLng::from_degrees(10.12, -42.35));

    for level in 0..=MAX_LEVEL {
        let id = leaf.parent(level);
        assert_eq!(CellId::from_token(&id.to_token()), id, "level {level}");
    }
}

#[test]
fn next_prev_advance() {
    let id = CellId::from_face_pos_level(1, 0, 10);

    assert_eq!(id.next().prev(), id);
    assert_eq!(id.advance(0), id);
    assert_eq!(id.advance(4), id.next().next().next().next());
    assert_eq!(id.advance(13).advance(-13), id);

    // Advancing wraps across the end of the curve.
    assert_eq!(CellId::from_face(5).advance(1), CellId::from_face(0));
    assert_eq!(CellId::from_face(0).advance(-1), CellId::from_face(5));
    assert_eq!(CellId::from_face(0).advance(6), CellId::from_face(0));
    assert_eq!(
        CellId::begin(MAX_LEVEL).advance(-1),
        CellId::end(MAX_LEVEL).prev()
    );
}

#[test]
fn edge_neighbors_of_face_one() {
    // The face adjacency is fixed: face 1 touches 5, 3, 2, 0 across its
    // four edges.
    let faces = [5, 3, 2, 0];
    for (i, nbr) in CellId::from_face_ij(1, 0, 0)
        .parent(0)
        .edge_neighbors()
        .into_iter()
        .enumerate()
    {
        assert!(nbr.is_face());
        assert_eq!(nbr.face(), faces[i]);
    }
}

#[test]
fn edge_neighbors_of_corner_cells() {
    // Corner cells project onto adjacent faces.
    let max_ij = MAX_SIZE as i32 - 1;
    for level in [1, 2, 10, MAX_LEVEL] {
        let id = CellId::from_face_ij(1, 0, 0).parent(level);
        let size = CellId::size_ij(level) as i32;
        let want = [
            CellId::from_face_ij(5, max_ij, max_ij).parent(level),
            CellId::from_face_ij(1, size, 0).parent(level),
            CellId::from_face_ij(1, 0, size).parent(level),
            CellId::from_face_ij(0, max_ij, 0).parent(level),
        ];

        assert_eq!(id.edge_neighbors(), want, "level {level}");
    }
}

#[test]
fn vertex_neighbors() {
    // The vertex neighbors of the center of face 2 at level 5.
    let id = CellId::from_point(Point::new(0., 0., 1.));
    let mut neighbors = id.vertex_neighbors(5);
    neighbors.sort_unstable();

    for (n, nbr) in neighbors.into_iter().enumerate() {
        let mut i = 1 << 29;
        let mut j = 1 << 29;
        if n < 2 {
            i -= 1;
        }
        if n == 0 || n == 3 {
            j -= 1;
        }
        assert_eq!(nbr, CellId::from_face_ij(2, i, j).parent(5), "corner {n}");
    }
}

#[test]
fn all_neighbors_contains_edge_neighbors() {
    let id = CellId::from_latlng(LatLng::from_degrees(12., 34.)).parent(6);
    let all = id.all_neighbors(6);

    assert_eq!(all.len(), 8, "same-level neighbors form a ring of 8");
    for nbr in id.edge_neighbors() {
        assert!(all.contains(&nbr));
    }
    assert!(!all.contains(&id));
}

#[test]
fn common_ancestor_level() {
    let id = CellId::from_face(0).child_begin(30);
    let other = CellId::from_face(5).child_end(30).prev();

    assert_eq!(id.common_ancestor_level(id), Some(30));
    assert_eq!(id.common_ancestor_level(id.parent(7)), Some(7));
    assert_eq!(id.parent(3).common_ancestor_level(id), Some(3));
    assert_eq!(id.common_ancestor_level(other), None, "different faces");

    let a = CellId::from_latlng(LatLng::from_degrees(10., 10.));
    let b = a.parent(20).child(0).child_begin(30);
    let c = a.parent(20).child(3).child_begin(30);
    assert_eq!(a.common_ancestor_level(b), Some(20));
    assert!(b.common_ancestor_level(c) >= Some(20));
}

#[test]
fn bound_uv() {
    // A face cell covers the whole [-1,1]² square.
    let bound = CellId::from_face(0).bound_uv();
    assert_eq!(bound.lo(), crate::r2rect::R2Point::new(-1., -1.));
    assert_eq!(bound.hi(), crate::r2rect::R2Point::new(1., 1.));

    // Every cell's bound contains its center and its children's bounds.
    let id = CellId::from_latlng(LatLng::from_degrees(41., 2.)).parent(14);
    let bound = id.bound_uv();
    for child in id.children() {
        let child_bound = child.bound_uv();
        assert!(bound.contains(&child_bound));
    }
}

#[test]
fn size_st() {
    assert_float_eq!(CellId::size_st(0), 1., abs <= f64::EPSILON);
    assert_float_eq!(
        CellId::size_st(MAX_LEVEL),
        1. / f64::from(MAX_SIZE),
        abs <= f64::EPSILON
    );
}

#[test]
fn display() {
    let id = CellId::from_raw(0x3fec000000000000);
    assert_eq!(id.to_string(), "3fec");
    assert_eq!(CellId::NONE.to_string(), "X");
}
