//! Output mesh container for swept geometry.
//!
//! [`SweptMesh`] holds the packed vertex attribute buffers and the triangle
//! index list produced by a sweep. All attribute buffers are mandatory except
//! UV2, which is only present when lightmap coordinates were requested.

use serde::Serialize;

/// Triangle mesh produced by sweeping a profile along a curve.
///
/// Tangents are 4-component: the xyz direction of increasing U plus a
/// handedness component `w`, which this generator always emits as `1.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SweptMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub tangents: Vec<[f64; 4]>,
    pub uvs: Vec<[f64; 2]>,
    /// Lightmap UVs with seam padding; present only when requested.
    pub uv2s: Option<Vec<[f64; 2]>>,
    pub indices: Vec<u32>,
}

impl SweptMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Returns true if all vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n
            && self.tangents.len() == n
            && self.uvs.len() == n
            && self.uv2s.as_ref().is_none_or(|uv2s| uv2s.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Counts `(open, non_manifold)` edges over the index list.
    ///
    /// An open edge borders exactly one triangle, a non-manifold edge more
    /// than two. Degenerate triangles (repeated indices) are ignored. A
    /// watertight mesh reports zero open edges.
    #[must_use]
    pub fn edge_topology(&self) -> (usize, usize) {
        use std::collections::HashMap;

        let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0];
            let i1 = tri[1];
            let i2 = tri[2];

            if i0 == i1 || i1 == i2 || i0 == i2 {
                continue;
            }

            let edges = [(i0, i1), (i1, i2), (i2, i0)];
            for (ea, eb) in edges {
                let (lo, hi) = if ea <= eb { (ea, eb) } else { (eb, ea) };
                *edge_counts.entry((lo, hi)).or_insert(0) += 1;
            }
        }

        let mut open_edge_count = 0usize;
        let mut non_manifold_edge_count = 0usize;
        for (_edge, count) in edge_counts {
            if count == 1 {
                open_edge_count += 1;
            } else if count > 2 {
                non_manifold_edge_count += 1;
            }
        }

        (open_edge_count, non_manifold_edge_count)
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for adapters that
    /// expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Returns the normal buffer as a flat slice.
    #[must_use]
    pub fn normals_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.normals)
    }

    /// Returns the tangent buffer as a flat slice: `[tx0, ty0, tz0, tw0, ...]`.
    #[must_use]
    pub fn tangents_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<4>(&self.tangents)
    }

    /// Returns the UV buffer as a flat slice: `[u0, v0, u1, v1, ...]`.
    #[must_use]
    pub fn uvs_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<2>(&self.uvs)
    }

    /// Returns the UV2 buffer as a flat slice when present.
    #[must_use]
    pub fn uv2s_flat(&self) -> Option<&[f64]> {
        self.uv2s.as_deref().map(flatten_f64_array_slice::<2>)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}
