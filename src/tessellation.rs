//! Adaptive tessellation of cubic Bezier segments.
//!
//! The subdivision is deviation-driven: a segment is split at its midpoint
//! while the true curve midpoint strays further than the tolerance from the
//! chord midpoint, up to a recursion-depth cap. The cap guarantees bounded
//! output regardless of tolerance.

use super::core::Point3;

/// Evaluates a cubic Bezier at parameter `t`.
#[must_use]
pub(crate) fn bezier_point(p0: Point3, c0: Point3, c1: Point3, p1: Point3, t: f64) -> Point3 {
    let q0 = p0.lerp(c0, t);
    let q1 = c0.lerp(c1, t);
    let q2 = c1.lerp(p1, t);
    let r0 = q0.lerp(q1, t);
    let r1 = q1.lerp(q2, t);
    r0.lerp(r1, t)
}

/// Appends adaptively subdivided points for one Bezier segment to `out`.
///
/// The segment's start point is assumed to already be in `out`; every call
/// appends at least the segment end point, so consecutive segments chain
/// without duplicates.
pub(crate) fn tessellate_bezier_segment(
    p0: Point3,
    c0: Point3,
    c1: Point3,
    p1: Point3,
    max_stages: usize,
    tolerance: f64,
    out: &mut Vec<Point3>,
) {
    if max_stages == 0 || !tolerance.is_finite() || tolerance <= 0.0 {
        out.push(p1);
        return;
    }

    // De Casteljau split at t = 0.5; r is both the left end and right start.
    let q0 = p0.lerp(c0, 0.5);
    let q1 = c0.lerp(c1, 0.5);
    let q2 = c1.lerp(p1, 0.5);
    let r0 = q0.lerp(q1, 0.5);
    let r1 = q1.lerp(q2, 0.5);
    let mid = r0.lerp(r1, 0.5);

    let chord_mid = p0.lerp(p1, 0.5);
    if mid.distance_to(chord_mid) <= tolerance {
        out.push(p1);
        return;
    }

    tessellate_bezier_segment(p0, q0, r0, mid, max_stages - 1, tolerance, out);
    tessellate_bezier_segment(mid, r1, q2, p1, max_stages - 1, tolerance, out);
}
