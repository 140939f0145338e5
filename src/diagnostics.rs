//! Diagnostics for sweep mesh generation.
//!
//! A [`SweepDiagnostics`] is returned alongside the mesh from every sweep.
//! It records how much geometry the cleanup passes removed, how the corner
//! classifier saw the curve, and the edge topology of the final mesh.

use serde::Serialize;

/// Diagnostics collected while generating a swept mesh.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SweepDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Number of curve samples the sweep was built from.
    pub center_point_count: usize,

    /// Number of centers classified as sharp corners (including forced
    /// open-curve endpoints).
    pub sharp_corner_count: usize,

    /// Number of edge points removed by the vertex interleaver.
    pub interleaved_removed_count: usize,

    /// Number of edge points removed by the overlap filter.
    pub overlap_removed_count: usize,

    /// Number of sweeps the overlap filter ran before reaching a fixed point.
    /// Zero when the filter was disabled.
    pub overlap_pass_count: usize,

    /// Number of open (boundary) edges in the mesh.
    ///
    /// A watertight mesh has zero open edges. Open ends of flat and cross
    /// profiles always contribute some.
    pub open_edge_count: usize,

    /// Number of non-manifold edges (more than two adjacent triangles).
    pub non_manifold_edge_count: usize,

    /// Whether the degenerate single-triangle fallback was emitted instead
    /// of real geometry.
    pub degenerate_fallback: bool,

    /// Human-readable warnings about guarded degeneracies.
    ///
    /// Examples:
    /// - "up vector parallel to tangent; using perpendicular fallback"
    /// - "curve has a degenerate segment; reusing previous tangent"
    pub warnings: Vec<String>,
}

impl SweepDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh is watertight (no open edges).
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0
    }

    /// Returns `true` if the mesh is manifold (no non-manifold edges).
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    /// Returns `true` if any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total number of edge points removed by the cleanup passes.
    #[must_use]
    pub fn removed_point_count(&self) -> usize {
        self.interleaved_removed_count + self.overlap_removed_count
    }

    /// Adds a warning message to the diagnostics.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
