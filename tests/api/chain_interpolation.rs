use float_eq::assert_float_eq;
use s2o::{Angle, ChainInterpolation, LatLng, LaxPolyline, Point};

fn ll(lat: f64, lng: f64) -> Point {
    Point::from(LatLng::from_degrees(lat, lng))
}

#[test]
fn meridian_chain() {
    let shape = LaxPolyline::new(vec![ll(0., 0.), ll(1., 0.), ll(2.5, 0.)]);
    let query = ChainInterpolation::new(&shape, 0).expect("valid chain");

    assert_float_eq!(
        query.length().expect("ok").degrees(),
        2.5,
        abs <= 1e-12
    );

    let mid = query.at_fraction(0.4).expect("ok");
    let at = LatLng::from(mid.point);
    assert_float_eq!(at.lat(), 1., abs <= 1e-9);
    assert_float_eq!(at.lng(), 0., abs <= 1e-9);

    let clamped = query
        .at_distance(Angle::from_degrees(1e6))
        .expect("clamps");
    assert_float_eq!(LatLng::from(clamped.point).lat(), 2.5, abs <= 1e-9);

    let clamped = query.at_fraction(-0.1).expect("clamps");
    assert_float_eq!(LatLng::from(clamped.point).lat(), 0., abs <= 1e-9);
}

#[test]
fn fraction_matches_distance() {
    let shape = LaxPolyline::new(vec![ll(0., 0.), ll(0., 30.), ll(30., 30.)]);
    let query = ChainInterpolation::new(&shape, 0).expect("valid chain");
    let length = query.length().expect("ok");

    for f in [0.2, 0.5, 0.9] {
        let result = query.at_fraction(f).expect("ok");
        assert_float_eq!(
            result.distance.radians(),
            (length * f).radians(),
            abs <= 1e-8
        );
    }
}

#[test]
fn slice_reversal_is_pointwise() {
    let shape = LaxPolyline::new(vec![
        ll(0., 0.),
        ll(0., 4.),
        ll(4., 4.),
        ll(4., 8.),
    ]);
    let query = ChainInterpolation::new(&shape, 0).expect("valid chain");

    let forward = query.slice(0.1, 0.9);
    let mut backward = query.slice(0.9, 0.1);
    backward.reverse();

    assert_eq!(forward.len(), backward.len());
    for (f, b) in forward.iter().zip(&backward) {
        assert_float_eq!(f.angle(*b).radians(), 0., abs <= 1e-12);
    }
}

#[test]
fn divided_slice_has_exactly_n_points() {
    let shape = LaxPolyline::new(vec![ll(0., 0.), ll(0., 10.)]);
    let query = ChainInterpolation::new(&shape, 0).expect("valid chain");

    for divisions in [2, 3, 7] {
        assert_eq!(
            query.slice_divided(0., 1., divisions).len(),
            divisions
        );
    }
}

#[test]
fn empty_chain_is_an_error() {
    let shape = LaxPolyline::new(Vec::new());
    let query = ChainInterpolation::new(&shape, -1).expect("valid chain");

    assert_eq!(query.length(), Err(s2o::error::EmptyChain));
}
