//! Cross-section emitter.
//!
//! For every center point, emits `edge_count x radial_segments` edge points
//! into the arena: tilt-rotated spokes with anisotropic width correction
//! along the wedge bisector, per-point normals/tangents, and UV/UV2
//! coordinates. Sharp corners emit a duplicated point set with
//! discontinuous normals so the assembler produces a faceted seam.
//!
//! Linking is by stride: every pushed point hooks to the point
//! `radial_segments` slots earlier, which threads one ring per radial slot
//! through the whole curve (alternating edge sides for two-sided profiles).
//! [`close_seam`] ties the last block back to the first, making each ring a
//! true cycle; open curves additionally drop the connected flags across the
//! seam.

use std::f64::consts::{PI, TAU};

use super::core::Vec3;
use super::curve::WidthProfile;
use super::frame::CenterLine;
use super::ring::{EdgeArena, EdgePoint};
use super::sweep::{Profile, SweepOptions};

/// Precomputed per-sweep layout constants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SectionLayout {
    pub radial_segments: usize,
    pub segment_angle: f64,
    pub edge_count: usize,
    pub tube: bool,
    pub zero_width: bool,
    pub add_uv2: bool,
    pub length_h: f64,
    pub padding_h: f64,
    pub length_v: f64,
    pub edge_padding: f64,
}

impl SectionLayout {
    pub fn new(
        options: &SweepOptions,
        width_profile: Option<&dyn WidthProfile>,
        total_length: f64,
    ) -> Self {
        let radial_segments = options.effective_segments();
        let segment_angle = match options.profile {
            Profile::Flat => PI,
            Profile::Cross => PI / radial_segments as f64,
            Profile::Tube => TAU / radial_segments as f64,
        };
        let tube = options.profile == Profile::Tube;
        let edge_count = if tube { 1 } else { 2 };

        let uv2_padding = options.uv2_padding * options.texel_size;
        let horizontal_total = total_length + 2.0 * uv2_padding;
        let (length_h, padding_h) = if horizontal_total > 0.0 {
            (
                total_length / horizontal_total,
                uv2_padding / horizontal_total,
            )
        } else {
            (1.0, 0.0)
        };

        let mut max_width = options.width;
        if let Some(wp) = width_profile {
            max_width *= wp.max_value().max(wp.min_value());
        }

        let length_v = 1.0 / radial_segments as f64;
        let mut edge_padding = length_v;
        if !tube {
            let denom = max_width + uv2_padding;
            if denom > 0.0 {
                edge_padding *= max_width / denom;
            }
        }

        Self {
            radial_segments,
            segment_angle,
            edge_count,
            tube,
            zero_width: options.width == 0.0,
            add_uv2: options.add_uv2,
            length_h,
            padding_h,
            length_v,
            edge_padding,
        }
    }
}

/// Emits all edge points for the center line into `arena`.
pub(crate) fn emit_edge_points(
    arena: &mut EdgeArena,
    line: &CenterLine,
    layout: &SectionLayout,
    options: &SweepOptions,
    width_profile: Option<&dyn WidthProfile>,
    curve_baked_length: f64,
) {
    let total_length = line.total_length.max(f64::MIN_POSITIVE);
    let radial_segments = layout.radial_segments;

    for (i, center) in line.points.iter().enumerate() {
        let mut u = center.partial_length / total_length;
        let local_width = width_profile.map_or(1.0, |wp| wp.sample(u));

        let tangent_avg = center
            .tangent_next
            .add(center.tangent_prev)
            .normalized()
            .unwrap_or(center.tangent_next);

        let (binormal, spoke) = if layout.zero_width {
            (Vec3::Z, Vec3::ZERO)
        } else {
            let binormal = tangent_avg
                .cross(center.local_up)
                .normalized()
                .unwrap_or_else(|| center.tangent_next.any_perpendicular())
                .rotated(tangent_avg, center.tilt);
            let spoke = binormal.mul_scalar(options.width * local_width * 0.5);
            (binormal, spoke)
        };

        // Wedge bisector: the direction the corner squeezes the section in.
        let wc_dir = center.tangent_prev.sub(center.tangent_next).normalized();

        if options.scale_uv_by_length {
            u *= curve_baked_length;
        }

        let mut v_offset = 0.5;
        if options.scale_uv_by_width {
            v_offset *= local_width;
        }

        let sharp = !options.smooth_shaded_corners && center.no_interleave;
        let tangent = if sharp {
            center.tangent_prev
        } else {
            tangent_avg
        };
        let normal = section_normal(tangent, binormal, center.local_up);

        let uv_x = u;
        let uv2_x = layout.padding_h + u * layout.length_h;

        for e in 0..layout.edge_count {
            let edge_sign = (e as f64) * 2.0 - 1.0;
            for j in 0..radial_segments {
                let mut point = EdgePoint {
                    tangent,
                    center: i,
                    edge: e as u8,
                    ..EdgePoint::default()
                };

                if layout.zero_width {
                    point.position = center.position;
                    point.normal = normal;
                } else {
                    let angle = j as f64 * layout.segment_angle;
                    let mut spoke_rotated = spoke.rotated(tangent_avg, angle);

                    if let Some(wc_dir) = wc_dir {
                        let stretched = wc_dir.mul_scalar(spoke_rotated.dot(wc_dir));
                        let fixed = spoke_rotated.sub(stretched);
                        spoke_rotated = stretched
                            .mul_scalar(center.width_correction)
                            .add(fixed);
                    }

                    point.position = center.position.add_vec(spoke_rotated.mul_scalar(edge_sign));
                    point.normal =
                        rotated_section_normal(normal, tangent, edge_sign, angle, layout.tube);
                }

                point.uv = [uv_x, 0.5 + edge_sign * v_offset];
                if layout.add_uv2 {
                    point.uv2 = [
                        uv2_x,
                        (e as f64) * layout.edge_padding + (j as f64) * layout.length_v,
                    ];
                }

                let index = arena.len();
                if index >= radial_segments {
                    point.prev = index - radial_segments;
                    arena.pts[point.prev].next = index;
                }
                arena.push(point);
            }
        }

        if sharp {
            // Duplicate the point set with outgoing-tangent shading: the
            // first copy closes the previous segment flat, this one opens
            // the next. The pair is disconnected so the assembler keeps a
            // hard seam between the coincident vertices.
            let tangent = center.tangent_next;
            let normal = section_normal(tangent, binormal, center.local_up);

            for e in 0..layout.edge_count {
                let edge_sign = (e as f64) * 2.0 - 1.0;
                for j in 0..radial_segments {
                    let duplicated_index = arena.len() - radial_segments * layout.edge_count;
                    let mut point = arena.pts[duplicated_index].clone();
                    point.tangent = tangent;
                    point.normal = rotated_section_normal(
                        normal,
                        tangent,
                        edge_sign,
                        j as f64 * layout.segment_angle,
                        layout.tube,
                    );

                    let index = arena.len();
                    point.prev = index - radial_segments;
                    arena.pts[point.prev].next = index;
                    arena.pts[duplicated_index].next_connected = false;
                    point.prev_connected = false;
                    arena.push(point);
                }
            }
        }
    }
}

/// Ties each radial-slot ring into a cycle across the curve seam. For open
/// curves the links still close (walks stay bounded) but the connected
/// flags are dropped so no faces wrap the boundary.
pub(crate) fn close_seam(arena: &mut EdgeArena, layout: &SectionLayout, closed: bool) {
    let size = arena.len();
    let radial_segments = layout.radial_segments;

    for j in 0..radial_segments {
        arena.pts[size - radial_segments + j].next = j;
        arena.pts[j].prev = size - radial_segments + j;
        if !closed {
            for e in 0..layout.edge_count {
                arena.pts[j + e * radial_segments].prev_connected = false;
                arena.pts[size - (layout.edge_count - e) * radial_segments + j].next_connected =
                    false;
            }
        }
    }
}

fn section_normal(tangent: Vec3, binormal: Vec3, fallback: Vec3) -> Vec3 {
    tangent
        .cross(binormal)
        .neg()
        .normalized()
        .unwrap_or(fallback)
}

/// Base normal per profile, rotated into the radial slot. Tube normals spin
/// around the ring; flat/cross normals are shared by the whole blade.
fn rotated_section_normal(normal: Vec3, tangent: Vec3, edge_sign: f64, angle: f64, tube: bool) -> Vec3 {
    let base = if tube {
        normal.cross(tangent).mul_scalar(-edge_sign)
    } else {
        normal
    };
    base.rotated(tangent, angle)
}
