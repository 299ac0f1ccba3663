use float_eq::assert_float_eq;
use s2o::{Cell, CellId, ChordAngle, LatLng, Point};

#[test]
fn from_id_caches_the_geometry() {
    let id = CellId::from_latlng(LatLng::from_degrees(35., -100.)).parent(9);
    let cell = Cell::from(id);

    assert_eq!(cell.id(), id);
    assert_eq!(cell.level(), 9);
    assert_eq!(cell.face(), id.face());
    assert!(!cell.is_leaf());
}

#[test]
fn contains_its_own_region() {
    let cell = Cell::from(
        CellId::from_latlng(LatLng::from_degrees(-12., 57.)).parent(6),
    );

    assert!(cell.contains_point(cell.center()));
    for k in 0..4 {
        assert!(cell.contains_point(cell.vertex(k)));
    }
    assert!(!cell.contains_point(-cell.center()));
}

#[test]
fn bounds_are_conservative() {
    for &(lat, lng, level) in &[
        (0., 0., 3),
        (80., 170., 7),
        (-45., -45., 1),
        (89.9, 0., 12),
    ] {
        let cell = Cell::from(
            CellId::from_latlng(LatLng::from_degrees(lat, lng)).parent(level),
        );
        let cap = cell.cap_bound();
        let rect = cell.rect_bound();

        for k in 0..4 {
            let vertex = cell.vertex(k);
            assert!(cap.contains_point(vertex), "cap at {lat}:{lng}/{level}");
            assert!(
                rect.contains(LatLng::from(vertex).normalized()),
                "rect at {lat}:{lng}/{level}"
            );
        }
    }
}

#[test]
fn areas_sum() {
    // The whole sphere has area 4π.
    let total: f64 = (0..6)
        .map(|face| Cell::from(CellId::from_face(face)).exact_area())
        .sum();

    assert_float_eq!(total, 4. * std::f64::consts::PI, rmax <= 1e-9);
}

#[test]
fn distances() {
    let cell = Cell::from(
        CellId::from_latlng(LatLng::from_degrees(0., 0.)).parent(8),
    );

    assert_eq!(cell.distance_to_point(cell.center()), ChordAngle::ZERO);

    let far = Point::from(LatLng::from_degrees(0., 45.));
    let distance = cell.distance_to_point(far);
    assert!(distance > ChordAngle::ZERO);
    assert!(
        cell.max_distance_to_point(far) > distance,
        "max dominates min"
    );
}
