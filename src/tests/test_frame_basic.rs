use std::f64::consts::SQRT_2;

use crate::core::{Point3, Tolerance, Vec3};
use crate::curve::{BakedCurve3, ConstantWidth, WidthProfile};
use crate::frame::build_center_line;
use crate::sweep::{SweepError, SweepOptions, TessellationMode};

fn options_disabled() -> SweepOptions {
    SweepOptions {
        tessellation: TessellationMode::Disabled,
        ..SweepOptions::default()
    }
}

fn right_angle() -> BakedCurve3 {
    BakedCurve3::from_polyline(
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 2.0),
        ],
        false,
    )
}

#[test]
fn tangents_and_lengths_along_open_polyline() {
    let curve = right_angle();
    let line = build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom())
        .expect("finite curve")
        .expect("enough samples");

    assert_eq!(line.points.len(), 3);
    assert!(!line.closed);
    assert!((line.total_length - 4.0).abs() < 1e-12);

    let first = &line.points[0];
    assert_eq!(first.tangent_prev, first.tangent_next);
    assert!((first.tangent_next.x - 1.0).abs() < 1e-12);

    let corner = &line.points[1];
    assert!((corner.tangent_prev.x - 1.0).abs() < 1e-12);
    assert!((corner.tangent_next.z - 1.0).abs() < 1e-12);
    assert!((corner.partial_length - 2.0).abs() < 1e-12);

    let last = &line.points[2];
    assert_eq!(last.tangent_prev, last.tangent_next);
    assert!((last.partial_length - 4.0).abs() < 1e-12);
}

#[test]
fn right_angle_corner_is_sharp_with_sqrt2_correction() {
    let curve = right_angle();
    let line = build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom())
        .unwrap()
        .unwrap();

    let corner = &line.points[1];
    assert!(corner.no_interleave, "90 degree turn exceeds 0.5 rad");
    assert!((corner.width_correction - SQRT_2).abs() < 1e-9);

    // Straight interior of a longer run stays smooth; here only endpoints.
    assert!(line.points[0].no_interleave);
    assert!(line.points[2].no_interleave);
}

#[test]
fn wide_corner_threshold_keeps_interior_smooth() {
    let curve = right_angle();
    let options = SweepOptions {
        corner_threshold: 3.0,
        ..options_disabled()
    };
    let line = build_center_line(&curve, None, &options, Tolerance::default_geom())
        .unwrap()
        .unwrap();

    assert!(!line.points[1].no_interleave);
    // Open-curve endpoints are always exempt from interleaving.
    assert!(line.points[0].no_interleave);
    assert!(line.points[2].no_interleave);
}

#[test]
fn closed_curve_wraps_tangents_across_seam() {
    let curve = BakedCurve3::from_polyline(
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        ],
        true,
    );
    let line = build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom())
        .unwrap()
        .unwrap();

    assert!(line.closed);
    assert_eq!(line.points.len(), 4);
    assert!((line.total_length - 8.0).abs() < 1e-12);

    // The first point's incoming tangent comes across the seam.
    let first = &line.points[0];
    assert!((first.tangent_prev.z + 1.0).abs() < 1e-12);
    assert!((first.tangent_next.x - 1.0).abs() < 1e-12);
    // No endpoint forcing on closed curves: every corner classified alike.
    assert!(line.points.iter().all(|p| p.no_interleave));
}

#[test]
fn baked_mode_drops_closed_seam_duplicate() {
    let square = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 2.0),
        Point3::new(0.0, 0.0, 2.0),
    ];
    let curve = BakedCurve3::from_polyline(&square, true);
    let line = build_center_line(
        &curve,
        None,
        &SweepOptions::default(),
        Tolerance::default_geom(),
    )
    .unwrap()
    .unwrap();

    // Baked sampling ends with the wrap duplicate, which must not survive.
    assert_eq!(line.points.len(), 4);
}

#[test]
fn extend_edges_shifts_endpoints_outward() {
    let curve = BakedCurve3::from_polyline(
        &[Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
        false,
    );
    let options = SweepOptions {
        extend_edges: true,
        width: 1.0,
        ..options_disabled()
    };
    let line = build_center_line(&curve, None, &options, Tolerance::default_geom())
        .unwrap()
        .unwrap();

    assert!((line.points[0].position.x + 0.5).abs() < 1e-12);
    assert!((line.points[1].position.x - 4.5).abs() < 1e-12);
    assert!((line.total_length - 5.0).abs() < 1e-12);
}

#[test]
fn extend_edges_respects_width_profile_ends() {
    let curve = BakedCurve3::from_polyline(
        &[Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
        false,
    );
    let options = SweepOptions {
        extend_edges: true,
        width: 2.0,
        ..options_disabled()
    };
    let profile = ConstantWidth(0.5);
    let line = build_center_line(
        &curve,
        Some(&profile as &dyn WidthProfile),
        &options,
        Tolerance::default_geom(),
    )
    .unwrap()
    .unwrap();

    // Half width 1.0 scaled by the profile factor 0.5.
    assert!((line.points[0].position.x + 0.5).abs() < 1e-12);
    assert!((line.points[1].position.x - 4.5).abs() < 1e-12);
}

#[test]
fn single_point_curve_yields_no_line() {
    let curve = BakedCurve3::from_polyline(&[Point3::new(1.0, 2.0, 3.0)], false);
    let line =
        build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom()).unwrap();
    assert!(line.is_none());
}

#[test]
fn up_parallel_to_tangent_falls_back_with_warning() {
    let curve = BakedCurve3::from_polyline(
        &[Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 4.0, 0.0)],
        false,
    );
    let line = build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom())
        .unwrap()
        .unwrap();

    // Default up is +Y, the curve runs along +Y.
    assert!(!line.warnings.is_empty());
    for point in &line.points {
        assert!((point.local_up.length() - 1.0).abs() < 1e-9);
        assert!(point.local_up.dot(Vec3::Y).abs() < 1e-9);
    }
}

#[test]
fn degenerate_segment_reuses_previous_tangent() {
    let curve = BakedCurve3::from_polyline(
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ],
        false,
    );
    let line = build_center_line(&curve, None, &options_disabled(), Tolerance::default_geom())
        .unwrap()
        .unwrap();

    assert!(!line.warnings.is_empty());
    for point in &line.points {
        assert!((point.tangent_next.length() - 1.0).abs() < 1e-9);
        assert!((point.tangent_prev.length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn zero_up_vector_is_rejected() {
    let curve = right_angle();
    let options = SweepOptions {
        up_vector: Vec3::ZERO,
        ..options_disabled()
    };
    let err = build_center_line(&curve, None, &options, Tolerance::default_geom()).unwrap_err();
    assert_eq!(err, SweepError::InvalidUpVector);
}
