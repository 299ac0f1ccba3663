use super::*;

#[test]
fn clear_orientations() {
    let x = Point::new(1., 0., 0.);
    let y = Point::new(0., 1., 0.);
    let z = Point::new(0., 0., 1.);

    assert_eq!(sign(x, y, z), 1, "right-handed frame is CCW");
    assert_eq!(sign(y, x, z), -1);
    assert_eq!(sign(z, y, x), -1);
    assert_eq!(sign(y, z, x), 1, "cyclic permutations preserve the sign");
}

#[test]
fn antisymmetry() {
    let a = Point::new(0.72, 0.30, 0.62).normalize();
    let b = Point::new(0.71, 0.31, 0.62).normalize();
    let c = Point::new(0.72, 0.31, 0.62).normalize();

    assert_eq!(sign(a, b, c), -sign(b, a, c));
    assert_eq!(sign(a, b, c), -sign(a, c, b));
    assert_eq!(sign(a, b, c), sign(b, c, a));
}

#[test]
fn collinear_points_get_a_consistent_sign() {
    // Three distinct points on the equator are exactly degenerate; the
    // symbolic perturbation must still pick a consistent non-zero answer.
    let a = Point::new(1., 0., 0.);
    let b = Point::new(0., 1., 0.);
    let c = Point::new(-1. / 2.0f64.sqrt(), 1. / 2.0f64.sqrt(), 0.);

    let s = sign(a, b, c);
    assert_ne!(s, 0, "distinct points never report zero");
    assert_eq!(sign(b, a, c), -s, "still antisymmetric");
    assert_eq!(sign(c, a, b), s, "still cyclic");
}

#[test]
fn equal_points_are_indeterminate() {
    let a = Point::new(1., 0., 0.);
    let b = Point::new(0., 1., 0.);

    assert_eq!(sign(a, a, b), 0);
    assert_eq!(sign(a, b, b), 0);
    assert_eq!(sign(b, a, b), 0);
}

#[test]
fn nearly_degenerate_triples_are_stable() {
    // Points a tiny rotation apart along a great circle; the triage stage
    // cannot decide these, but the sign must stay antisymmetric.
    let a = Point::new(1., 1e-15, 0.).normalize();
    let b = Point::new(1., 0., 1e-15).normalize();
    let c = Point::new(1., -1e-15, -1e-15).normalize();

    let s = sign(a, b, c);
    assert_ne!(s, 0);
    assert_eq!(sign(b, a, c), -s);
    assert_eq!(sign(a, c, b), -s);
    assert_eq!(sign(c, a, b), s);
}

#[test]
fn det2_sign_is_exact() {
    // These products differ only beyond double precision.
    let big = 1.0 + DBL_EPSILON;
    assert_eq!(det2_sign(big, 1., 1., big), 1, "big² − 1 > 0");
    assert_eq!(det2_sign(1., big, big, 1.), -1, "1 − big² < 0");
    assert_eq!(det2_sign(big, big, 1., 1.), 0, "big − big = 0");
}

#[test]
fn ordered_ccw_basics() {
    let o = Point::new(0., 0., 1.);
    let a = Point::new(1., 0., 0.);
    let b = Point::new(1., 1., 0.).normalize();
    let c = Point::new(0., 1., 0.);

    assert!(ordered_ccw(a, b, c, o), "b is inside the sweep from a to c");
    assert!(!ordered_ccw(a, c, b, o), "c is not between a and b");
    assert!(ordered_ccw(c, b, a, -o), "reversed pole reverses the sweep");
}
