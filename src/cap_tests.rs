use super::*;
use crate::Angle;

#[test]
fn sentinels() {
    assert!(Cap::empty().is_empty());
    assert!(!Cap::empty().is_full());
    assert!(Cap::full().is_full());
    assert!(!Cap::full().is_empty());
    assert!(Cap::full().contains_point(Point::new(0., 0., -1.)));
}

#[test]
fn from_point() {
    let p = Point::new(0., 1., 0.);
    let cap = Cap::from_point(p);

    assert!(cap.contains_point(p));
    assert!(!cap.contains_point(Point::new(1., 0., 0.)));
}

#[test]
fn add_point_grows() {
    let x = Point::new(1., 0., 0.);
    let y = Point::new(0., 1., 0.);
    let cap = Cap::from_point(x).add_point(y);

    assert!(cap.contains_point(x));
    assert!(cap.contains_point(y));
    assert!(
        !cap.contains_point(-x),
        "the antipode is further than the added point"
    );

    assert_eq!(Cap::empty().add_point(y), Cap::from_point(y));
}

#[test]
fn intersects() {
    let x = Point::new(1., 0., 0.);
    let y = Point::new(0., 1., 0.);
    let quarter = ChordAngle::from(Angle::from_degrees(46.));
    let narrow = ChordAngle::from(Angle::from_degrees(1.));

    assert!(Cap::new(x, quarter).intersects(&Cap::new(y, quarter)));
    assert!(!Cap::new(x, narrow).intersects(&Cap::new(y, narrow)));
    assert!(!Cap::empty().intersects(&Cap::full()));
}
