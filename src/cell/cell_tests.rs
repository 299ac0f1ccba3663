use super::*;
use float_eq::assert_float_eq;

#[test]
fn faces() {
    for face in 0..6 {
        let cell = Cell::from(CellId::from_face(face));

        assert_eq!(cell.face(), face);
        assert_eq!(cell.level(), 0);
        assert!(!cell.is_leaf());
        assert_eq!(cell.center(), coord::unit_norm(face));
        assert!(cell.contains_point(coord::unit_norm(face)));
    }
}

#[test]
fn vertices_are_ccw_and_unit() {
    let cell = Cell::from(
        CellId::from_latlng(LatLng::from_degrees(12., 34.)).parent(9),
    );

    for k in 0..4 {
        assert!(cell.vertex(k).is_unit());
        // Consecutive vertices wind counterclockwise around the center.
        let next = cell.vertex((k + 1) & 3);
        assert!(
            cell.vertex(k).cross(next).dot(cell.center()) > 0.,
            "edge {k} turns left"
        );
    }
}

#[test]
fn edge_normals_point_inward() {
    let cell = Cell::from(
        CellId::from_latlng(LatLng::from_degrees(-25., 130.)).parent(7),
    );

    for k in 0..4 {
        assert!(
            cell.edge(k).dot(cell.center()) > 0.,
            "edge normal {k} faces the interior"
        );
        // The two endpoints of edge k lie on its great circle.
        assert_float_eq!(
            cell.edge(k).dot(cell.vertex(k)),
            0.,
            abs <= 1e-15
        );
        assert_float_eq!(
            cell.edge(k).dot(cell.vertex((k + 1) & 3)),
            0.,
            abs <= 1e-15
        );
    }
}

#[test]
fn contains_point() {
    let id = CellId::from_latlng(LatLng::from_degrees(45., 45.)).parent(10);
    let cell = Cell::from(id);

    assert!(cell.contains_point(cell.center()));
    for k in 0..4 {
        assert!(cell.contains_point(cell.vertex(k)), "vertices included");
    }
    assert!(!cell.contains_point(-cell.center()));

    // The leaf containing any point must contain it.
    let p = Point::new(0.3, -0.7, 0.65).normalize();
    assert!(Cell::from(CellId::from_point(p)).contains_point(p));
}

#[test]
fn children_partition_their_parent() {
    let id = CellId::from_latlng(LatLng::from_degrees(-10., 80.)).parent(4);
    let parent = Cell::from(id);

    let child_area: f64 = id
        .children()
        .iter()
        .map(|&child| Cell::from(child).exact_area())
        .sum();

    assert_float_eq!(
        child_area,
        parent.exact_area(),
        rmax <= 1e-9,
        "children cover the parent exactly once"
    );
}

#[test]
fn areas() {
    // All six faces are congruent.
    let face_area = Cell::from(CellId::from_face(0)).exact_area();
    assert_float_eq!(
        face_area,
        4. * PI / 6.,
        rmax <= 1e-10,
        "face area is a sixth of the sphere"
    );
    assert_float_eq!(face_area, Cell::average_area(0), rmax <= 1e-10);

    // Average area is exact in aggregate.
    assert_float_eq!(
        Cell::average_area(5),
        Cell::average_area(4) / 4.,
        rmax <= 1e-15
    );
}

#[test]
fn cap_and_rect_bounds_contain_the_cell() {
    let ids = [
        CellId::from_face(3),
        CellId::from_latlng(LatLng::from_degrees(1., 1.)).parent(12),
        CellId::from_latlng(LatLng::from_degrees(89., 42.)).parent(8),
        CellId::from_latlng(LatLng::from_degrees(-45., -179.9)).parent(5),
    ];

    for id in ids {
        let cell = Cell::from(id);
        let cap = cell.cap_bound();
        let rect = cell.rect_bound();

        for k in 0..4 {
            assert!(cap.contains_point(cell.vertex(k)), "{id:?} cap");
            assert!(
                rect.contains(LatLng::from(cell.vertex(k)).normalized()),
                "{id:?} rect"
            );
        }
        assert!(cap.contains_point(cell.center()));
        assert!(rect.contains(LatLng::from(cell.center()).normalized()));
    }
}

#[test]
fn polar_cell_rect_bound_has_full_longitude() {
    let cell = Cell::from(CellId::from_point(Point::new(0., 0., 1.)).parent(2));
    let rect = cell.rect_bound();

    if rect.contains(LatLng::from_degrees(90., 0.)) {
        assert!(rect.contains(LatLng::from_degrees(90., 137.)));
    }
}

#[test]
fn distance_to_point() {
    let cell = Cell::from(
        CellId::from_latlng(LatLng::from_degrees(0., 0.)).parent(5),
    );

    assert_eq!(
        cell.distance_to_point(cell.center()),
        ChordAngle::ZERO,
        "interior point"
    );

    let far = Point::from(LatLng::from_degrees(0., 90.));
    let distance = cell.distance_to_point(far).to_angle().degrees();
    assert!(distance > 45. && distance < 90., "got {distance}");

    // Max distance to a nearby point reaches the far corner of the cell.
    let max = cell.max_distance_to_point(cell.center());
    assert!(max > ChordAngle::ZERO && max < ChordAngle::RIGHT);
    assert!(
        cell.max_distance_to_point(-cell.center()) > ChordAngle::RIGHT,
        "antipodal targets wrap past 90 degrees"
    );
}

#[test]
fn distance_to_cell() {
    let a = Cell::from(CellId::from_latlng(LatLng::from_degrees(0., 0.)).parent(6));
    let b = Cell::from(CellId::from_latlng(LatLng::from_degrees(0., 10.)).parent(6));

    assert_eq!(a.distance_to_cell(&a), ChordAngle::ZERO);
    assert_eq!(
        a.distance_to_cell(&Cell::from(a.id().parent(2))),
        ChordAngle::ZERO,
        "nested cells touch"
    );

    let d = a.distance_to_cell(&b).to_angle().degrees();
    assert!(d > 0. && d < 10., "got {d}");
}
