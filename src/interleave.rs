//! Vertex interleaving: halves the longitudinal resolution of straight
//! stretches by splicing out adjacent point pairs.
//!
//! Each radial-slot ring is walked once with a monotonic watermark, so the
//! pass touches every ring point at most a constant number of times. Points
//! emitted from sharp corners (and open-curve endpoints) are never removed,
//! and two points from the same cross-section never collapse into each
//! other.

use super::frame::CenterLine;
use super::ring::EdgeArena;

/// Runs the interleave pass over every radial-slot ring.
///
/// Returns the number of points spliced out.
pub(crate) fn interleave_rings(
    arena: &mut EdgeArena,
    line: &CenterLine,
    radial_segments: usize,
) -> usize {
    let mut removed = 0usize;

    for j in 0..radial_segments {
        let mut point = j;
        let mut watermark = 0usize;
        while arena.pts[point].next >= watermark {
            watermark = arena.pts[point].next;
            let next = arena.pts[point].next;

            if line.points[arena.pts[point].center].no_interleave
                || line.points[arena.pts[next].center].no_interleave
                || arena.pts[point].center == arena.pts[next].center
            {
                point = next;
                continue;
            }

            arena.splice(point);
            arena.splice(next);
            arena.pts[point].removed = true;
            arena.pts[next].removed = true;
            removed += 2;

            // Skip two surviving points before the next candidate pair, so
            // removals alternate and the ring keeps half its density.
            point = arena.pts[next].next;
            point = arena.pts[point].next;
            point = arena.pts[point].next;
        }
    }

    removed
}
