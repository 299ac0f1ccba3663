use float_eq::assert_float_eq;
use s2o::{
    Angle, ChordAngle, ClosestEdgeQuery, EdgeQueryOptions, EdgeTarget,
    FurthestEdgeQuery, LatLng, LaxPolyline, Point, PointTarget, PointVector,
    ShapeIndex, ShapeIndexTarget,
};
use std::sync::Arc;

fn ll(lat: f64, lng: f64) -> Point {
    Point::from(LatLng::from_degrees(lat, lng))
}

#[test]
fn closest_point_in_a_point_set() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![
        ll(0., 0.),
        ll(1., 0.),
        ll(2., 0.),
        ll(3., 0.),
    ])));

    let query =
        ClosestEdgeQuery::new(&index, EdgeQueryOptions::new().max_results(1));
    let mut target = PointTarget::new(ll(4., 0.));
    let results = query.find_edges(&mut target);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].shape_id, 0);
    assert_eq!(results[0].edge_id, 3);
    assert_float_eq!(results[0].angle().degrees(), 1., abs <= 1e-13);
}

#[test]
fn ordering_guarantee() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(
        (0..8).map(|k| ll(0., f64::from(k * 10))).collect(),
    )));
    index.add(Arc::new(LaxPolyline::new(vec![ll(5., 0.), ll(5., 40.)])));

    let query = ClosestEdgeQuery::new(&index, EdgeQueryOptions::new());
    let results = query.find_edges(&mut PointTarget::new(ll(2., 15.)));

    for pair in results.windows(2) {
        let a = (pair[0].distance, pair[0].shape_id, pair[0].edge_id);
        let b = (pair[1].distance, pair[1].shape_id, pair[1].edge_id);
        assert!(a < b, "ascending (distance, shape, edge) with no duplicates");
    }
}

#[test]
fn brute_force_agreement() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(LaxPolyline::new(
        (0..60)
            .map(|k| ll((f64::from(k) * 1.7) % 80. - 40., f64::from(k * 6) - 180.))
            .collect(),
    )));

    for &(lat, lng) in &[(7., 3.), (-20., 100.), (60., -60.)] {
        let mut target = PointTarget::new(ll(lat, lng));
        let indexed =
            ClosestEdgeQuery::new(&index, EdgeQueryOptions::new().max_results(4))
                .find_edges(&mut target);
        let brute = ClosestEdgeQuery::new(
            &index,
            EdgeQueryOptions::new().max_results(4).use_brute_force(true),
        )
        .find_edges(&mut target);

        assert_eq!(indexed, brute);
    }
}

#[test]
fn distance_limit_and_edge_target() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![ll(0., 0.), ll(0., 30.)])));

    let query = ClosestEdgeQuery::new(
        &index,
        EdgeQueryOptions::new().distance_limit_angle(Angle::from_degrees(10.)),
    );
    let mut target = EdgeTarget::new(ll(-5., 0.), ll(5., 0.));
    let results = query.find_edges(&mut target);

    assert_eq!(results.len(), 1, "the distant point is rejected");
    assert_eq!(results[0].distance, ChordAngle::ZERO, "edge passes through");
}

#[test]
fn furthest_edges() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![
        ll(0., 0.),
        ll(0., 120.),
        ll(0., -120.),
    ])));

    let query = FurthestEdgeQuery::new(
        &index,
        EdgeQueryOptions::new().max_results(2),
    );
    let results =
        query.find_edges(&mut PointTarget::furthest(ll(0., 0.)));

    assert_eq!(results.len(), 2);
    assert!(results[0].distance >= results[1].distance, "furthest first");
    assert!(results.iter().all(|r| r.edge_id != 0), "the target itself is closest");
}

#[test]
fn index_to_index_distance() {
    let mut a = ShapeIndex::new();
    a.add(Arc::new(PointVector::new(vec![ll(0., 0.)])));
    let mut b = ShapeIndex::new();
    b.add(Arc::new(PointVector::new(vec![ll(0., 7.), ll(20., 50.)])));

    let query = ClosestEdgeQuery::new(&a, EdgeQueryOptions::new());
    let distance = query.distance(&mut ShapeIndexTarget::new(&b));

    assert_float_eq!(distance.to_angle().degrees(), 7., abs <= 1e-9);
}
