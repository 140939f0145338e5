//! Frame builder: per-sample sweep frames along the curve.
//!
//! Samples the curve according to the tessellation mode, then derives for
//! every sample the incoming/outgoing tangents, the up vector projected
//! perpendicular to the tangent, cumulative arc length, the corner width
//! correction, and the sharp-corner classification that drives seam
//! duplication downstream.

use super::core::{Point3, Tolerance, Vec3};
use super::curve::{CurveSource, WidthProfile};
use super::sweep::{SweepError, SweepOptions, TessellationMode};

/// Subdivision depth passed to [`CurveSource::tessellate`] in adaptive mode.
const ADAPTIVE_MAX_STAGES: usize = 5;

/// Lower bound on the adaptive tessellation tolerance.
pub(crate) const MIN_TESSELLATION_TOLERANCE: f64 = 0.001;

/// One curve sample with its sweep frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CenterPoint {
    pub position: Point3,
    pub tangent_next: Vec3,
    pub tangent_prev: Vec3,
    pub local_up: Vec3,
    /// Cumulative arc length from the curve start.
    pub partial_length: f64,
    /// `sqrt(2/(1+cosθ))`: keeps the cross-section width visually constant
    /// through a bend by inflating the spoke along the wedge bisector.
    pub width_correction: f64,
    pub tilt: f64,
    /// Sharp corner (or open-curve endpoint): gets duplicated geometry and
    /// is exempt from interleaving and overlap filtering.
    pub no_interleave: bool,
}

impl Default for CenterPoint {
    fn default() -> Self {
        Self {
            position: Point3::ORIGIN,
            tangent_next: Vec3::ZERO,
            tangent_prev: Vec3::ZERO,
            local_up: Vec3::ZERO,
            partial_length: 0.0,
            width_correction: 1.0,
            tilt: 0.0,
            no_interleave: false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct CenterLine {
    pub points: Vec<CenterPoint>,
    pub total_length: f64,
    pub closed: bool,
    pub warnings: Vec<String>,
}

/// Builds the center line for a sweep.
///
/// Returns `Ok(None)` when the curve yields fewer than two samples; the
/// caller emits the degenerate fallback mesh in that case.
pub(crate) fn build_center_line(
    curve: &impl CurveSource,
    width_profile: Option<&dyn WidthProfile>,
    options: &SweepOptions,
    tol: Tolerance,
) -> Result<Option<CenterLine>, SweepError> {
    let closed = curve.is_closed();

    let (mut positions, mut tilts): (Vec<Point3>, Vec<f64>) = match options.tessellation {
        TessellationMode::Baked => (curve.baked_points(), curve.baked_tilts()),
        TessellationMode::Adaptive => {
            let tolerance = options
                .tessellation_tolerance
                .max(MIN_TESSELLATION_TOLERANCE);
            let pts = curve.tessellate(ADAPTIVE_MAX_STAGES, tolerance);
            let tilts = pts
                .iter()
                .map(|p| curve.sample_baked_tilt(curve.closest_offset(*p)))
                .collect();
            (pts, tilts)
        }
        TessellationMode::Disabled => {
            let count = curve.point_count();
            (
                (0..count).map(|i| curve.point_position(i)).collect(),
                (0..count).map(|i| curve.point_tilt(i)).collect(),
            )
        }
    };

    if positions.iter().any(|p| !p.is_finite()) {
        return Err(SweepError::NonFiniteCurve);
    }

    // Baked and adaptive samplings of a closed curve end with the seam
    // duplicate of the first sample; drop it.
    let mut point_count = positions.len();
    if closed
        && point_count > 0
        && !matches!(options.tessellation, TessellationMode::Disabled)
    {
        point_count -= 1;
    }
    if point_count < 2 {
        return Ok(None);
    }
    positions.truncate(point_count);
    tilts.truncate(point_count);

    let mut points: Vec<CenterPoint> = positions
        .iter()
        .zip(tilts.iter())
        .map(|(p, t)| CenterPoint {
            position: *p,
            tilt: *t,
            ..CenterPoint::default()
        })
        .collect();

    let mut warnings = Vec::new();
    let mut degenerate_segments = false;
    let n = point_count;

    // First point.
    let next_dir = points[1]
        .position
        .sub_point(points[0].position)
        .normalized()
        .unwrap_or_else(|| {
            degenerate_segments = true;
            Vec3::X
        });
    let mut prev_dir = next_dir;
    if closed {
        prev_dir = points[0]
            .position
            .sub_point(points[n - 1].position)
            .normalized()
            .unwrap_or_else(|| {
                degenerate_segments = true;
                next_dir
            });
    }
    points[0].tangent_prev = prev_dir;
    points[0].tangent_next = next_dir;

    let mut total_length = 0.0;
    points[0].partial_length = total_length;

    if options.extend_edges && !closed {
        let mut extra_width = options.width * 0.5;
        if let Some(wp) = width_profile {
            extra_width *= wp.sample(0.0);
        }
        points[0].position = points[0].position.sub_vec(next_dir.mul_scalar(extra_width));
        total_length += extra_width;
    }

    // Interior points.
    for i in 1..n - 1 {
        let prev_vec = points[i].position.sub_point(points[i - 1].position);
        let prev_length = prev_vec.length();
        let prev_dir = prev_vec.normalized().unwrap_or_else(|| {
            degenerate_segments = true;
            points[i - 1].tangent_next
        });
        let next_dir = points[i + 1]
            .position
            .sub_point(points[i].position)
            .normalized()
            .unwrap_or_else(|| {
                degenerate_segments = true;
                prev_dir
            });
        total_length += prev_length;
        points[i].partial_length = total_length;
        points[i].tangent_prev = prev_dir;
        points[i].tangent_next = next_dir;
    }

    // Last point.
    let prev_vec = points[n - 1].position.sub_point(points[n - 2].position);
    let prev_length = prev_vec.length();
    let prev_dir = prev_vec.normalized().unwrap_or_else(|| {
        degenerate_segments = true;
        points[n - 2].tangent_next
    });
    let mut next_dir = prev_dir;
    total_length += prev_length;
    points[n - 1].partial_length = total_length;
    if closed {
        let wrap = points[0].position.sub_point(points[n - 1].position);
        let extra_length = wrap.length();
        if extra_length > 0.0 {
            next_dir = wrap.mul_scalar(1.0 / extra_length);
        }
        total_length += extra_length;
    }
    points[n - 1].tangent_prev = prev_dir;
    points[n - 1].tangent_next = next_dir;

    if options.extend_edges && !closed {
        let mut extra_width = options.width * 0.5;
        if let Some(wp) = width_profile {
            extra_width *= wp.sample(1.0);
        }
        points[n - 1].position = points[n - 1].position.add_vec(next_dir.mul_scalar(extra_width));
        total_length += extra_width;
        points[n - 1].partial_length += extra_width;
    }

    // Corner classification and local frames.
    let corner_scalar_threshold = options.corner_threshold.cos();
    let zero_width = options.width == 0.0;
    let up_vector = options
        .up_vector
        .normalized()
        .ok_or(SweepError::InvalidUpVector)?;
    let mut up_fallback_used = false;

    for point in &mut points {
        let corner_cosine = point
            .tangent_prev
            .dot(point.tangent_next)
            .clamp(-1.0, 1.0);
        point.no_interleave = corner_cosine < corner_scalar_threshold;
        if !zero_width {
            point.local_up = match up_vector.slide(point.tangent_next).normalized() {
                Some(up) => up,
                None => {
                    up_fallback_used = true;
                    point.tangent_next.any_perpendicular()
                }
            };
            point.width_correction = (2.0 / (1.0 + corner_cosine).max(tol.eps)).sqrt();
        }
    }

    // Open-curve endpoints always keep full resolution and faceted seams.
    if !closed {
        points[0].no_interleave = true;
        points[n - 1].no_interleave = true;
    }

    if degenerate_segments {
        warnings.push("curve has a degenerate segment; reusing previous tangent".to_string());
    }
    if up_fallback_used {
        warnings.push("up vector parallel to tangent; using perpendicular fallback".to_string());
    }

    Ok(Some(CenterLine {
        points,
        total_length,
        closed,
        warnings,
    }))
}
