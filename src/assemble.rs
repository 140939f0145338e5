//! Mesh assembly: packs surviving edge points into vertex buffers and walks
//! the rings to produce triangle indices.
//!
//! Two-sided profiles (flat, cross) triangulate by walking each blade's
//! combined ring with the last-seen point per edge side; the tube profile
//! triangulates per emission block, hopping over spliced-out points via the
//! ring links. Faces are skipped across hard seams and open-curve ends
//! according to the connected flags.

use super::mesh::SweptMesh;
use super::ring::EdgeArena;
use super::section::SectionLayout;

pub(crate) fn assemble(arena: &mut EdgeArena, layout: &SectionLayout) -> SweptMesh {
    let mut mesh = SweptMesh::default();
    if layout.add_uv2 {
        mesh.uv2s = Some(Vec::new());
    }

    for point in &mut arena.pts {
        if point.removed {
            continue;
        }
        point.out_index = u32::try_from(mesh.positions.len()).unwrap_or(u32::MAX);
        mesh.positions.push(point.position.to_array());
        mesh.normals.push(point.normal.to_array());
        mesh.tangents
            .push([point.tangent.x, point.tangent.y, point.tangent.z, 1.0]);
        mesh.uvs.push(point.uv);
        if let Some(uv2s) = mesh.uv2s.as_mut() {
            uv2s.push(point.uv2);
        }
    }

    if layout.tube {
        triangulate_tube(arena, layout, &mut mesh.indices);
    } else {
        triangulate_blades(arena, layout, &mut mesh.indices);
    }

    mesh
}

/// Flat and cross profiles: each radial slot's ring alternates between the
/// two edge sides along the curve; a face is emitted per ring step using
/// the last-seen point of each side.
fn triangulate_blades(arena: &EdgeArena, layout: &SectionLayout, indices: &mut Vec<u32>) {
    let pts = &arena.pts;

    for j in 0..layout.radial_segments {
        let mut point = j;

        // Advance to the first edge transition; the ring alternates sides,
        // so this terminates within one ring lap.
        let mut stop_index = pts[point].next;
        let mut guard = pts.len();
        while pts[stop_index].edge == pts[point].edge && guard > 0 {
            point = stop_index;
            stop_index = pts[point].next;
            guard -= 1;
        }
        if guard == 0 {
            continue;
        }

        let mut last_edge = [0usize; 2];
        last_edge[pts[point].edge as usize] = point;
        last_edge[pts[stop_index].edge as usize] = stop_index;
        point = stop_index;

        // The anchor slot may itself have been spliced out; its frozen
        // links reach the live ring but the live ring never revisits it,
        // so cap the walk at one full arena lap.
        let mut laps = pts.len();
        loop {
            let point_index = pts[point].next;
            point = point_index;

            let mut skip_face = false;
            if !pts[last_edge[0]].next_connected && !pts[last_edge[1]].next_connected {
                skip_face = true;
            }
            let edge = pts[point].edge as usize;
            if !pts[point].prev_connected && !pts[last_edge[1 - edge]].prev_connected {
                skip_face = true;
            }

            if !skip_face {
                indices.push(pts[last_edge[1]].out_index);
                indices.push(pts[last_edge[0]].out_index);
                indices.push(pts[point].out_index);
            }

            last_edge[edge] = point_index;
            laps -= 1;
            if point_index == stop_index || laps == 0 {
                break;
            }
        }
    }
}

/// Tube profile: two triangles per surviving point, one towards the next
/// radial slot and one towards the next section, with removed neighbors
/// replaced by their surviving ring predecessors/successors.
fn triangulate_tube(arena: &EdgeArena, layout: &SectionLayout, indices: &mut Vec<u32>) {
    let pts = &arena.pts;
    let radial_segments = layout.radial_segments;

    let mut i = 0;
    while i < pts.len() {
        for j in 0..radial_segments {
            let point_index = i + j;
            if pts[point_index].removed {
                continue;
            }
            let next_index = pts[point_index].next;

            let mut top = i + (j + 1) % radial_segments;
            while pts[top].removed {
                top = pts[top].prev;
            }
            // The next_connected gate keeps open-curve seams and the
            // degenerate quads between corner-duplicate blocks face-free.
            if pts[point_index].next_connected
                && (pts[next_index].prev_connected || pts[top].prev_connected)
            {
                indices.push(pts[point_index].out_index);
                indices.push(pts[next_index].out_index);
                indices.push(pts[top].out_index);
            }

            let mut bottom = next_index - j + (j + radial_segments - 1) % radial_segments;
            while pts[bottom].removed {
                bottom = pts[bottom].next;
            }
            if pts[point_index].next_connected || pts[bottom].prev_connected {
                indices.push(pts[point_index].out_index);
                indices.push(pts[bottom].out_index);
                indices.push(pts[next_index].out_index);
            }
        }
        i += radial_segments;
    }
}
