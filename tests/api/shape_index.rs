use s2o::{
    dump, CellRelation, ContainsPointQuery, LatLng, LaxLoop, LaxPolygon,
    LaxPolyline, Point, PointVector, Shape, ShapeIndex,
};
use std::sync::Arc;

fn ll(lat: f64, lng: f64) -> Point {
    Point::from(LatLng::from_degrees(lat, lng))
}

#[test]
fn lifecycle() {
    let mut index = ShapeIndex::new();
    assert!(index.is_empty());

    let id = index.add(Arc::new(PointVector::new(vec![ll(3., 4.)])));
    assert!(!index.is_fresh(), "mutation marks the index stale");

    // The first query rebuilds.
    let mut iter = index.iterator();
    assert!(index.is_fresh());
    assert!(iter.locate_point(ll(3., 4.)));

    index.remove(id);
    index.reset();
    assert!(index.is_empty());
}

#[test]
fn heterogeneous_collection() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![ll(1., 1.)])));
    index.add(Arc::new(LaxPolyline::new(vec![ll(0., 0.), ll(0., 10.)])));
    index.add(Arc::new(LaxLoop::new(vec![
        ll(20., 20.),
        ll(20., 40.),
        ll(40., 40.),
        ll(40., 20.),
    ])));

    assert_eq!(index.num_shape_ids(), 3);
    assert_eq!(
        index.shape(2).expect("loop").dimension(),
        s2o::Dimension::Polygon
    );

    // Each shape is reachable through the cells covering it.
    let mut iter = index.iterator();
    assert!(iter.locate_point(ll(1., 1.)));
    assert!(iter.index_cell().expect("cell").find(0).is_some());

    let query = ContainsPointQuery::new(&index);
    assert!(query.contains(ll(30., 30.)), "inside the loop");
    assert!(!query.contains(ll(50., 50.)));
}

#[test]
fn iterators_traverse_in_order() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(LaxPolyline::new(
        (0..30).map(|k| ll(f64::from(k * 2) - 30., f64::from(k * 7) - 105.)).collect(),
    )));

    let mut iter = index.iterator();
    let mut previous = None;
    let mut count = 0;
    while !iter.done() {
        let id = iter.cell_id();
        if let Some(previous) = previous {
            assert!(id > previous);
        }
        previous = Some(id);
        count += 1;
        iter.next();
    }
    assert!(count > 0);

    // locate_cell classifies a covering cell of the whole index.
    let mut iter = index.iterator();
    iter.begin();
    let top = iter.cell_id().parent(0);
    assert_ne!(iter.locate_cell(top), CellRelation::Disjoint);
}

#[test]
fn dump_round_trips_the_structure() {
    let mut index = ShapeIndex::new();
    index.add(Arc::new(PointVector::new(vec![ll(0., 0.)])));
    index.add(Arc::new(LaxPolyline::new(vec![ll(1., 0.), ll(1., 5.)])));
    index.add(Arc::new(LaxPolygon::full()));

    assert_eq!(dump(&index), "0:0 # 1:0, 1:5 # full");
}
