use float_eq::assert_float_eq;
use s2o::{LatLng, Point};

#[test]
fn validation() {
    assert!(LatLng::new(45., 90.).is_ok());
    assert!(LatLng::new(f64::NAN, 0.).is_err());
    assert!(LatLng::from_radians(0., f64::INFINITY).is_err());
}

#[test]
fn normalization() {
    let ll = LatLng::from_degrees(100., 370.).normalized();

    assert_float_eq!(ll.lat(), 90., abs <= 1e-12);
    assert_float_eq!(ll.lng(), 10., abs <= 1e-12);
    assert!(ll.is_valid());
}

#[test]
fn point_conversions_are_inverse() {
    let ll = LatLng::from_degrees(48.8566, 2.3522);
    let round = LatLng::from(Point::from(ll));

    assert_float_eq!(round.lat(), ll.lat(), abs <= 1e-12);
    assert_float_eq!(round.lng(), ll.lng(), abs <= 1e-12);
}

#[test]
fn distance_between_cities() {
    let paris = LatLng::from_degrees(48.8566, 2.3522);
    let sydney = LatLng::from_degrees(-33.8688, 151.2093);

    // Roughly 16,960 km on the unit sphere in radians.
    assert_float_eq!(
        paris.distance(sydney).radians(),
        2.6622,
        abs <= 1e-3
    );
}
