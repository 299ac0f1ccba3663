use float_eq::assert_float_eq;
use s2o::{CellId, LatLng, Point};

#[test]
fn token_round_trip() {
    let id = CellId::from_raw(0x3fec000000000000);
    assert_eq!(id.to_token(), "3fec");
    assert_eq!(CellId::from_token("3fec"), id);

    assert_eq!(CellId::NONE.to_token(), "X");
    assert_eq!(CellId::from_token("X"), CellId::NONE);
}

#[test]
fn malformed_tokens_decode_to_none() {
    for token in ["876b e99", "876[ee99", " 876bee99", "", "z", "0123456789abcdef0"] {
        assert_eq!(CellId::from_token(token), CellId::NONE, "token {token:?}");
    }
}

#[test]
fn face_pos_level() {
    let id = CellId::from_face_pos_level(3, 0x12345678, 26);

    assert_eq!(id.level(), 26);
    assert_eq!(id.face(), 3);
    assert_eq!(id.child_begin(27).pos(), 0x12345640);
    assert_eq!(id.parent(24).pos(), 0x12345000);
}

#[test]
fn children_partition_parents() {
    let id = CellId::from_latlng(LatLng::from_degrees(47.38, 8.54)).parent(15);

    for child in id.children() {
        assert_eq!(child.parent(15), id);
        assert!(id.contains(child));
        assert!(
            child >= id.range_min() && child <= id.range_max(),
            "containment is range inclusion"
        );
    }
}

#[test]
fn point_round_trip_accuracy() {
    // Leaf cells are small enough that the center of the leaf containing
    // a point stays within a billionth of a degree of it.
    for &(lat, lng) in &[
        (0., 0.),
        (37.7749, -122.4194),
        (-90., 0.),
        (0.0000001, 179.9999999),
    ] {
        let ll = LatLng::from_degrees(lat, lng);
        let round = CellId::from_latlng(ll).to_latlng();

        assert_float_eq!(round.lat(), lat, abs <= 1e-9);
        if lat.abs() < 90. {
            assert_float_eq!(round.lng(), lng, abs <= 1e-9);
        }
    }
}

#[test]
fn hilbert_curve_is_continuous() {
    // Centers of consecutive leaf-level cells at a coarse level stay
    // adjacent (within the diameter of two cells).
    let start = CellId::from_latlng(LatLng::from_degrees(10., 10.)).parent(8);
    let mut id = start;
    for _ in 0..32 {
        let next = id.advance(1);
        let gap = Point::from(id.to_latlng())
            .angle(Point::from(next.to_latlng()))
            .degrees();
        assert!(gap < 2., "consecutive cells stay close, gap {gap}");
        id = next;
    }
}

#[test]
fn neighbors_share_boundaries() {
    let id = CellId::from_latlng(LatLng::from_degrees(20., 120.)).parent(11);

    for neighbor in id.edge_neighbors() {
        assert_eq!(neighbor.level(), id.level());
        assert_ne!(neighbor, id);
        assert!(!id.contains(neighbor));
    }

    for neighbor in id.vertex_neighbors(7) {
        assert_eq!(neighbor.level(), 7);
        assert!(neighbor.contains(id) || !id.intersects(neighbor));
    }
}

#[test]
fn display_is_token() {
    let id = CellId::from_face(2);
    assert_eq!(id.to_string(), id.to_token());
}
