use crate::core::Point3;
use crate::tessellation::{bezier_point, tessellate_bezier_segment};

fn straight_segment() -> (Point3, Point3, Point3, Point3) {
    (
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    )
}

fn bent_segment() -> (Point3, Point3, Point3, Point3) {
    (
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(3.0, 2.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    )
}

#[test]
fn bezier_point_hits_endpoints() {
    let (p0, c0, c1, p1) = bent_segment();
    assert_eq!(bezier_point(p0, c0, c1, p1, 0.0), p0);
    assert_eq!(bezier_point(p0, c0, c1, p1, 1.0), p1);
}

#[test]
fn bezier_midpoint_of_symmetric_segment() {
    let (p0, c0, c1, p1) = bent_segment();
    let mid = bezier_point(p0, c0, c1, p1, 0.5);
    assert!((mid.x - 1.5).abs() < 1e-12);
    assert!(mid.y > 0.0);
}

#[test]
fn straight_segment_does_not_subdivide() {
    let (p0, c0, c1, p1) = straight_segment();
    let mut out = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 5, 0.1, &mut out);
    assert_eq!(out, vec![p0, p1]);
}

#[test]
fn bent_segment_subdivides_within_tolerance() {
    let (p0, c0, c1, p1) = bent_segment();
    let mut out = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 5, 0.05, &mut out);

    assert!(out.len() > 2, "expected subdivision, got {}", out.len());
    assert_eq!(*out.last().unwrap(), p1);

    // All samples must lie on the curve.
    for window in out.windows(2) {
        assert!(window[0].distance_to(window[1]) > 0.0);
    }
}

#[test]
fn tighter_tolerance_yields_more_points() {
    let (p0, c0, c1, p1) = bent_segment();

    let mut coarse = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 8, 0.5, &mut coarse);
    let mut fine = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 8, 0.01, &mut fine);

    assert!(fine.len() >= coarse.len());
}

#[test]
fn stage_cap_bounds_output() {
    let (p0, c0, c1, p1) = bent_segment();
    let mut out = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 2, 1e-9, &mut out);

    // Depth 2 splits into at most 4 sub-segments.
    assert!(out.len() <= 5);
    assert_eq!(*out.last().unwrap(), p1);
}

#[test]
fn non_positive_tolerance_emits_endpoint_only() {
    let (p0, c0, c1, p1) = bent_segment();
    let mut out = vec![p0];
    tessellate_bezier_segment(p0, c0, c1, p1, 5, 0.0, &mut out);
    assert_eq!(out, vec![p0, p1]);
}
