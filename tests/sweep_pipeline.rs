use curve_sweep::{
    BakedCurve3, CurvePoint, CurveSource, Point3, Profile, SweepOptions, TessellationMode, Vec3,
    WidthCurve, WidthProfile, lightmap_size_hint, sweep_curve,
};

fn s_curve() -> BakedCurve3 {
    let points = vec![
        CurvePoint::with_handles(
            Point3::new(0.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 2.0),
        ),
        CurvePoint::with_handles(
            Point3::new(6.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::ZERO,
        )
        .with_tilt(0.4),
    ];
    BakedCurve3::new(points, false, 0.2)
}

#[test]
fn adaptive_tube_pipeline_end_to_end() {
    let curve = s_curve();
    let width_curve = WidthCurve::new(vec![(0.0, 1.0), (0.5, 0.6), (1.0, 1.0)]);
    let options = SweepOptions {
        profile: Profile::Tube,
        segments: 8,
        width: 0.5,
        tessellation: TessellationMode::Adaptive,
        tessellation_tolerance: 0.05,
        add_uv2: true,
        ..SweepOptions::default()
    };

    let (mesh, diag) = sweep_curve(
        &curve,
        Some(&width_curve as &dyn WidthProfile),
        &options,
    )
    .expect("sweep");

    mesh.validate().expect("valid mesh");
    assert!(!diag.degenerate_fallback);
    assert!(diag.center_point_count >= 2);
    assert_eq!(diag.vertex_count, mesh.vertex_count());
    assert_eq!(diag.triangle_count, mesh.triangle_count());

    let uv2s = mesh.uv2s.as_ref().expect("uv2 channel requested");
    assert_eq!(uv2s.len(), mesh.vertex_count());
    assert!(uv2s.iter().all(|uv| uv[0] > 0.0 && uv[0] < 1.0));

    // Flat buffer views stay in sync with the typed buffers.
    assert_eq!(mesh.positions_flat().len(), mesh.vertex_count() * 3);
    assert_eq!(mesh.tangents_flat().len(), mesh.vertex_count() * 4);

    let hint = lightmap_size_hint(
        &curve,
        Some(&width_curve as &dyn WidthProfile),
        &options,
    )
    .expect("uv2 enabled");
    assert!(hint.0 >= 1 && hint.1 >= 1);
}

fn circle(n: u32, radius: f64) -> BakedCurve3 {
    let points: Vec<Point3> = (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            Point3::new(radius * a.cos(), 0.0, radius * a.sin())
        })
        .collect();
    BakedCurve3::from_polyline(&points, true)
}

#[test]
fn cleanup_passes_compose_on_a_closed_loop() {
    let curve = circle(24, 3.0);

    let options = SweepOptions {
        profile: Profile::Tube,
        segments: 6,
        width: 0.4,
        tessellation: TessellationMode::Disabled,
        interleave_vertices: true,
        filter_overlaps: true,
        ..SweepOptions::default()
    };

    let (mesh, diag) = sweep_curve(&curve, None, &options).expect("sweep");

    mesh.validate().expect("valid mesh");
    assert!(diag.interleaved_removed_count > 0);
    assert!(diag.removed_point_count() >= diag.interleaved_removed_count);
    assert!(mesh.vertex_count() < 24 * 6);
    assert!(diag.is_manifold());
}

#[test]
fn interleaved_closed_cross_circle_stays_valid() {
    let curve = circle(24, 3.0);

    let options = SweepOptions {
        profile: Profile::Cross,
        segments: 2,
        width: 0.4,
        tessellation: TessellationMode::Disabled,
        interleave_vertices: true,
        ..SweepOptions::default()
    };

    let (mesh, diag) = sweep_curve(&curve, None, &options).expect("sweep");

    mesh.validate().expect("valid mesh");
    assert!(!diag.degenerate_fallback);
    assert!(diag.interleaved_removed_count > 0);
    assert!(mesh.has_valid_indices());
    // 24 centers x 2 edges x 2 radial slots before thinning.
    assert!(mesh.vertex_count() < 24 * 2 * 2);
    assert_eq!(diag.vertex_count, mesh.vertex_count());
    assert_eq!(diag.triangle_count, mesh.triangle_count());
}

#[test]
fn tilt_rolls_the_section_around_the_tangent() {
    let flat = BakedCurve3::from_polyline(
        &[Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
        false,
    );
    let rolled = BakedCurve3::new(
        vec![
            CurvePoint::new(Point3::new(0.0, 0.0, 0.0)).with_tilt(std::f64::consts::FRAC_PI_2),
            CurvePoint::new(Point3::new(4.0, 0.0, 0.0)).with_tilt(std::f64::consts::FRAC_PI_2),
        ],
        false,
        f64::MAX,
    );
    let options = SweepOptions {
        tessellation: TessellationMode::Disabled,
        smooth_shaded_corners: true,
        ..SweepOptions::default()
    };

    let (mesh_flat, _) = sweep_curve(&flat, None, &options).expect("sweep");
    let (mesh_rolled, _) = sweep_curve(&rolled, None, &options).expect("sweep");

    // The untilted ribbon lies in the XZ plane; a quarter-turn tilt stands
    // it up into XY.
    assert!(mesh_flat.positions.iter().all(|p| p[1].abs() < 1e-9));
    assert!(mesh_rolled.positions.iter().any(|p| p[1].abs() > 0.4));
    assert_eq!(flat.baked_length(), rolled.baked_length());
}
