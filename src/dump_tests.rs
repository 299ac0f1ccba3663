use super::*;
use crate::shape::{LaxLoop, LaxPolygon, LaxPolyline, PointVector};
use std::sync::Arc;

fn ll(lat: f64, lng: f64) -> Point {
    Point::from(LatLng::from_degrees(lat, lng))
}

#[test]
fn empty_index() {
    assert_eq!(dump(&ShapeIndex::new()), " #  # ");
}

#[test]
fn points_only() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![ll(0., 0.), ll(1., 2.)])));

    assert_eq!(dump(&index), "0:0 | 1:2 #  # ");
}

#[test]
fn polyline() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(LaxPolyline::new(vec![
        ll(0., 0.),
        ll(1., 0.),
        ll(1., 1.),
    ])));

    assert_eq!(dump(&index), " # 0:0, 1:0, 1:1 # ");
}

#[test]
fn polygon_with_hole() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(LaxPolygon::new(vec![
        vec![ll(0., 0.), ll(0., 10.), ll(10., 10.)],
        vec![ll(2., 2.), ll(6., 5.), ll(2., 5.)],
    ])));

    assert_eq!(
        dump(&index),
        " #  # 0:0, 0:10, 10:10; 2:2, 6:5, 2:5"
    );
}

#[test]
fn special_polygons() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(LaxPolygon::empty()));
    index.add(Arc::new(LaxLoop::full()));

    assert_eq!(dump(&index), " #  # empty | full");
}

#[test]
fn mixed_dimensions() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![ll(5., 5.)])));
    index.add(Arc::new(LaxPolyline::new(vec![ll(0., 0.), ll(0., 5.)])));
    index.add(Arc::new(LaxLoop::new(vec![
        ll(20., 20.),
        ll(20., 30.),
        ll(30., 30.),
    ])));

    assert_eq!(
        dump(&index),
        "5:5 # 0:0, 0:5 # 20:20, 20:30, 30:30"
    );
}
