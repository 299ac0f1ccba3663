use super::*;
use float_eq::assert_float_eq;

#[test]
fn r1_basics() {
    let unit = R1Interval::new(0., 1.);
    let empty = R1Interval::EMPTY;

    assert!(!unit.is_empty());
    assert!(empty.is_empty());
    assert_float_eq!(unit.center(), 0.5, abs <= f64::EPSILON);
    assert_float_eq!(unit.length(), 1., abs <= f64::EPSILON);

    assert!(unit.contains(0.5));
    assert!(unit.contains(0.) && unit.contains(1.));
    assert!(!unit.interior_contains(0.));
    assert!(!unit.contains(1.5));
}

#[test]
fn r1_set_operations() {
    let a = R1Interval::new(0., 1.);
    let b = R1Interval::new(0.5, 2.);
    let c = R1Interval::new(3., 4.);

    assert!(a.intersects(b));
    assert!(!a.intersects(c));
    assert_eq!(a.intersection(b), R1Interval::new(0.5, 1.));
    assert!(a.intersection(c).is_empty());
    assert_eq!(a.union(b), R1Interval::new(0., 2.));
    assert_eq!(a.union(R1Interval::EMPTY), a);

    assert_eq!(a.add_point(2.), R1Interval::new(0., 2.));
    assert_eq!(R1Interval::EMPTY.add_point(2.), R1Interval::from_point(2.));

    assert_float_eq!(a.clamp_point(1.5), 1., abs <= f64::EPSILON);
    assert_float_eq!(a.clamp_point(-3.), 0., abs <= f64::EPSILON);
}

#[test]
fn r1_expanded() {
    let a = R1Interval::new(0., 1.);

    assert_eq!(a.expanded(0.5), R1Interval::new(-0.5, 1.5));
    assert!(a.expanded(-0.6).is_empty(), "over-shrinking empties");
    assert!(R1Interval::EMPTY.expanded(1.).is_empty());
}

#[test]
fn s1_sentinels() {
    assert!(S1Interval::EMPTY.is_empty());
    assert!(!S1Interval::EMPTY.is_full());
    assert!(S1Interval::FULL.is_full());
    assert!(!S1Interval::FULL.is_empty());
    assert_float_eq!(S1Interval::FULL.length(), 2. * PI, abs <= f64::EPSILON);
}

#[test]
fn s1_inverted_contains() {
    // An interval through the date line.
    let wrap = S1Interval::new(3., -3.);

    assert!(wrap.is_inverted());
    assert!(wrap.contains(PI));
    assert!(wrap.contains(-PI), "-π is the same point as π");
    assert!(wrap.contains(3.1));
    assert!(!wrap.contains(0.));
    assert_float_eq!(wrap.length(), 2. * PI - 6., abs <= 1e-15);
    assert_float_eq!(wrap.center().abs(), PI, abs <= 1e-15);
}

#[test]
fn s1_add_point() {
    let mut interval = S1Interval::EMPTY;
    interval = interval.add_point(0.);
    interval = interval.add_point(1.);

    assert_eq!(interval, S1Interval::new(0., 1.));

    // Adding on the short side keeps the interval minimal.
    interval = interval.add_point(-0.5);
    assert_eq!(interval, S1Interval::new(-0.5, 1.));
}

#[test]
fn s1_union() {
    let a = S1Interval::new(0., 1.);
    let b = S1Interval::new(2., 3.);
    let joined = a.union(b);

    assert!(joined.contains(0.) && joined.contains(3.));
    assert!(
        !joined.contains(-2.),
        "union joins through the shorter gap"
    );

    assert_eq!(a.union(S1Interval::EMPTY), a);
    assert!(S1Interval::new(-2., 2.)
        .union(S1Interval::new(1.9, -1.9))
        .is_full());
}

#[test]
fn s1_expanded() {
    let a = S1Interval::new(0., 1.);

    assert!(a.expanded(0.1).contains(-0.05));
    assert!(a.expanded(4.).is_full());
    assert!(S1Interval::EMPTY.expanded(1.).is_empty());
}
