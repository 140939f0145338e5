//! Overlap filter: removes edge points that fold backwards through a bend.
//!
//! A point pair on the same edge overlaps when the direction between the
//! two edge points opposes the direction between their center points; both
//! get marked, then a sweep splices out every marked point that is still
//! safe to drop. Marking and sweeping repeat until a pass removes nothing.
//! Every pass either removes at least one point or is the last, so the
//! fixed-point loop is bounded by the arena size.

use super::frame::CenterLine;
use super::ring::EdgeArena;

/// Result of the overlap filter.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct OverlapStats {
    pub removed: usize,
    pub passes: usize,
}

pub(crate) fn filter_overlaps(
    arena: &mut EdgeArena,
    line: &CenterLine,
    radial_segments: usize,
    closed: bool,
) -> OverlapStats {
    let mut stats = OverlapStats::default();

    let mut points_removed = true;
    while points_removed {
        points_removed = false;
        stats.passes += 1;

        for j in 0..radial_segments {
            mark_ring(arena, line, j, closed);
        }

        for k in 0..arena.len() {
            if !arena.pts[k].filter {
                continue;
            }
            arena.pts[k].filter = false;

            // Sharp-corner points stay, and a ring of two must not collapse.
            if line.points[arena.pts[k].center].no_interleave
                || arena.pts[k].next == arena.pts[k].prev
            {
                continue;
            }

            arena.splice(k);
            arena.pts[k].removed = true;
            stats.removed += 1;
            points_removed = true;
        }
    }

    stats
}

/// Marks overlapping same-edge pairs along one radial-slot ring.
///
/// The walk advances `point` only on same-edge comparisons and stops once
/// the ring wraps (`next` index drops below `point`) on open curves, or
/// once the watermark stops advancing.
fn mark_ring(arena: &mut EdgeArena, line: &CenterLine, start: usize, closed: bool) {
    let mut last_index: isize = -1;
    let mut point_index = start;
    let mut next_index = arena.pts[point_index].next;

    while point_index as isize > last_index {
        if next_index < point_index && !closed {
            break;
        }

        if arena.pts[next_index].edge != arena.pts[point_index].edge {
            next_index = arena.pts[next_index].next;
            continue;
        }

        let center_dir = line.points[arena.pts[next_index].center]
            .position
            .sub_point(line.points[arena.pts[point_index].center].position);
        let next_dir = arena.pts[next_index]
            .position
            .sub_point(arena.pts[point_index].position);
        if next_dir.dot(center_dir) < 0.0 {
            arena.pts[point_index].filter = true;
            arena.pts[next_index].filter = true;
        }

        last_index = point_index as isize;
        point_index = arena.pts[point_index].next;
        next_index = arena.pts[point_index].next;
    }
}
