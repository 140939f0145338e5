//! Curve sweep entry points.
//!
//! [`sweep_curve`] extrudes a cross-section profile along a curve and
//! returns the packed triangle mesh together with diagnostics about the
//! run. The pipeline: sample the curve into sweep frames, emit ring-linked
//! edge points per frame, optionally thin them out (interleave pass,
//! overlap filter), then pack survivors into vertex buffers and
//! triangulate.

use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::assemble::assemble;
use super::core::{Tolerance, Vec3};
use super::curve::{CurveSource, WidthProfile};
use super::diagnostics::SweepDiagnostics;
use super::frame::build_center_line;
use super::interleave::interleave_rings;
use super::mesh::SweptMesh;
use super::overlap::filter_overlaps;
use super::ring::EdgeArena;
use super::section::{SectionLayout, close_seam, emit_edge_points};

/// Cross-section shape swept along the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Single two-sided ribbon.
    #[default]
    Flat,
    /// Several two-sided blades fanned over a half turn.
    Cross,
    /// Closed one-sided ring.
    Tube,
}

/// How curve samples are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TessellationMode {
    /// Use the curve's pre-baked sample points.
    #[default]
    Baked,
    /// Adaptive subdivision bounded by `tessellation_tolerance`.
    Adaptive,
    /// One sample per control point, no subdivision.
    Disabled,
}

/// Sweep parameters.
///
/// `segments` is a request; the effective radial segment count is clamped
/// per profile via [`SweepOptions::effective_segments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    pub width: f64,
    pub profile: Profile,
    pub segments: usize,
    pub up_vector: Vec3,
    pub tessellation: TessellationMode,
    /// Max chord deviation for [`TessellationMode::Adaptive`]; values below
    /// 0.001 are treated as 0.001.
    pub tessellation_tolerance: f64,
    /// Turn angle in radians above which a curve point counts as a sharp
    /// corner and gets duplicated, faceted geometry.
    pub corner_threshold: f64,
    /// Average the shading tangent through sharp corners instead of
    /// splitting it.
    pub smooth_shaded_corners: bool,
    /// Halve the longitudinal resolution of straight stretches.
    pub interleave_vertices: bool,
    /// Remove points that fold backwards through tight bends.
    pub filter_overlaps: bool,
    /// Extend open-curve ends by half the local width.
    pub extend_edges: bool,
    /// Multiply the U coordinate by the curve's baked length.
    pub scale_uv_by_length: bool,
    /// Modulate the V extent by the local width profile value.
    pub scale_uv_by_width: bool,
    /// Generate a second UV channel with lightmap seam padding.
    pub add_uv2: bool,
    /// Lightmap padding in texels.
    pub uv2_padding: f64,
    /// World size of one lightmap texel.
    pub texel_size: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            profile: Profile::Flat,
            segments: 1,
            up_vector: Vec3::Y,
            tessellation: TessellationMode::Baked,
            tessellation_tolerance: 0.1,
            corner_threshold: 0.5,
            smooth_shaded_corners: false,
            interleave_vertices: false,
            filter_overlaps: false,
            extend_edges: false,
            scale_uv_by_length: false,
            scale_uv_by_width: false,
            add_uv2: false,
            uv2_padding: 2.0,
            texel_size: 0.2,
        }
    }
}

impl SweepOptions {
    /// Radial segment count after per-profile clamping: flat is always 1,
    /// cross needs at least 2 blades, a tube ring at least 3 sides.
    #[must_use]
    pub fn effective_segments(&self) -> usize {
        match self.profile {
            Profile::Flat => 1,
            Profile::Cross => self.segments.max(2),
            Profile::Tube => self.segments.max(3),
        }
    }
}

/// Errors for invalid sweep input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("curve contains a non-finite point")]
    NonFiniteCurve,
    #[error("width must be finite and non-negative, got {0}")]
    InvalidWidth(f64),
    #[error("up vector must be finite and non-zero")]
    InvalidUpVector,
    #[error("corner threshold must be finite, got {0}")]
    InvalidCornerThreshold(f64),
}

/// Sweeps `options.profile` along `curve` with the default tolerance.
pub fn sweep_curve(
    curve: &impl CurveSource,
    width_profile: Option<&dyn WidthProfile>,
    options: &SweepOptions,
) -> Result<(SweptMesh, SweepDiagnostics), SweepError> {
    sweep_curve_with_tolerance(curve, width_profile, options, Tolerance::default_geom())
}

/// Sweeps with an explicit [`Tolerance`] for the degenerate-angle guards.
pub fn sweep_curve_with_tolerance(
    curve: &impl CurveSource,
    width_profile: Option<&dyn WidthProfile>,
    options: &SweepOptions,
    tol: Tolerance,
) -> Result<(SweptMesh, SweepDiagnostics), SweepError> {
    if !options.width.is_finite() || options.width < 0.0 {
        return Err(SweepError::InvalidWidth(options.width));
    }
    if !options.up_vector.is_finite() {
        return Err(SweepError::InvalidUpVector);
    }
    if !options.corner_threshold.is_finite() {
        return Err(SweepError::InvalidCornerThreshold(options.corner_threshold));
    }

    let mut diagnostics = SweepDiagnostics::default();

    let Some(line) = build_center_line(curve, width_profile, options, tol)? else {
        return Ok(degenerate_fallback(options, diagnostics));
    };
    diagnostics.center_point_count = line.points.len();
    diagnostics.sharp_corner_count = line.points.iter().filter(|p| p.no_interleave).count();
    for warning in &line.warnings {
        diagnostics.add_warning(warning.clone());
    }

    let layout = SectionLayout::new(options, width_profile, line.total_length);
    let mut arena =
        EdgeArena::with_capacity(line.points.len() * layout.edge_count * layout.radial_segments);
    emit_edge_points(
        &mut arena,
        &line,
        &layout,
        options,
        width_profile,
        curve.baked_length(),
    );
    close_seam(&mut arena, &layout, line.closed);

    if options.interleave_vertices {
        diagnostics.interleaved_removed_count =
            interleave_rings(&mut arena, &line, layout.radial_segments);
    }
    if options.filter_overlaps {
        let stats = filter_overlaps(&mut arena, &line, layout.radial_segments, line.closed);
        diagnostics.overlap_removed_count = stats.removed;
        diagnostics.overlap_pass_count = stats.passes;
    }

    let mesh = assemble(&mut arena, &layout);
    if mesh.indices.is_empty() {
        return Ok(degenerate_fallback(options, diagnostics));
    }

    diagnostics.vertex_count = mesh.vertex_count();
    diagnostics.triangle_count = mesh.triangle_count();
    let (open, non_manifold) = mesh.edge_topology();
    diagnostics.open_edge_count = open;
    diagnostics.non_manifold_edge_count = non_manifold;

    debug!(
        "sweep: {} center points, {} vertices, {} triangles, {} interleaved, {} overlaps in {} passes",
        diagnostics.center_point_count,
        diagnostics.vertex_count,
        diagnostics.triangle_count,
        diagnostics.interleaved_removed_count,
        diagnostics.overlap_removed_count,
        diagnostics.overlap_pass_count,
    );

    Ok((mesh, diagnostics))
}

/// Lightmap atlas size hint in texels, `(length, width)`.
///
/// `None` when UV2 generation is off or the curve has fewer than two
/// control points.
#[must_use]
pub fn lightmap_size_hint(
    curve: &impl CurveSource,
    width_profile: Option<&dyn WidthProfile>,
    options: &SweepOptions,
) -> Option<(u32, u32)> {
    if !options.add_uv2 || curve.point_count() < 2 {
        return None;
    }

    let padding = options.uv2_padding;

    let mut lightmap_length = curve.baked_length();
    if options.extend_edges && !curve.is_closed() {
        let mut extra_length = 1.0;
        if let Some(wp) = width_profile {
            extra_length += wp.sample(0.0);
            extra_length += wp.sample(1.0);
        }
        lightmap_length += extra_length * options.width;
    }
    let size_x = (lightmap_length / options.texel_size).max(1.0) + 2.0 * padding;

    let mut lightmap_width = options.width;
    if let Some(wp) = width_profile {
        lightmap_width *= wp.max_value().max(wp.min_value());
    }
    let mut width_padding = 1.0;
    match options.profile {
        Profile::Flat => {}
        Profile::Cross => {
            let blades = options.effective_segments() as f64;
            lightmap_width *= blades;
            width_padding *= blades;
        }
        Profile::Tube => {
            lightmap_width *= PI;
            width_padding = 0.0;
        }
    }
    let size_y = (lightmap_width / options.texel_size).max(1.0) + width_padding * padding;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((size_x as u32, size_y as u32))
}

/// Single zero-area triangle emitted when no real geometry can be built.
fn degenerate_fallback(
    options: &SweepOptions,
    mut diagnostics: SweepDiagnostics,
) -> (SweptMesh, SweepDiagnostics) {
    let mut mesh = SweptMesh {
        positions: vec![[0.0, 0.0, 0.0]],
        normals: vec![[0.0, 1.0, 0.0]],
        tangents: vec![[1.0, 0.0, 0.0, 1.0]],
        uvs: vec![[0.0, 0.0]],
        uv2s: None,
        indices: vec![0, 0, 0],
    };
    if options.add_uv2 {
        mesh.uv2s = Some(vec![[0.0, 0.0]]);
    }

    diagnostics.degenerate_fallback = true;
    diagnostics.vertex_count = 1;
    diagnostics.triangle_count = 1;
    diagnostics.add_warning("curve produced no geometry; emitting fallback triangle".to_string());

    (mesh, diagnostics)
}
