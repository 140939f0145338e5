//! Index-linked edge point storage.
//!
//! Edge points live in a flat growable arena; ring topology is expressed as
//! integer `next`/`prev` links into the same arena, so growing the store
//! never invalidates the topology. Removal is a tombstone splice: the point
//! keeps its slot (and its own links) but is unhooked from its neighbors,
//! so no index ever needs rewriting.

use super::core::{Point3, Vec3};

/// One emitted cross-section point.
#[derive(Debug, Clone)]
pub(crate) struct EdgePoint {
    pub position: Point3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub uv: [f64; 2],
    pub uv2: [f64; 2],
    /// Index of the center point this was emitted from.
    pub center: usize,
    /// Position in the final vertex buffers, assigned during assembly.
    pub out_index: u32,
    /// Ring link to the next point in the same radial slot.
    pub next: usize,
    /// Ring link to the previous point in the same radial slot.
    pub prev: usize,
    /// Which side of a two-sided profile (0 or 1); always 0 for tube.
    pub edge: u8,
    /// Transient mark used by the overlap filter.
    pub filter: bool,
    /// Tombstone: excluded from emission, slot retained for link stability.
    pub removed: bool,
    /// False across a hard seam or at the end of an open curve.
    pub next_connected: bool,
    /// False across a hard seam or at the start of an open curve.
    pub prev_connected: bool,
}

impl Default for EdgePoint {
    fn default() -> Self {
        Self {
            position: Point3::ORIGIN,
            normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
            uv: [0.0, 0.0],
            uv2: [0.0, 0.0],
            center: 0,
            out_index: 0,
            next: 0,
            prev: 0,
            edge: 0,
            filter: false,
            removed: false,
            next_connected: true,
            prev_connected: true,
        }
    }
}

/// Flat arena of [`EdgePoint`]s with tombstone splice removal.
#[derive(Debug, Default)]
pub(crate) struct EdgeArena {
    pub pts: Vec<EdgePoint>,
}

impl EdgeArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pts: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn push(&mut self, point: EdgePoint) -> usize {
        let index = self.pts.len();
        self.pts.push(point);
        index
    }

    /// Unhooks point `i` from its ring: `prev.next = i.next`,
    /// `next.prev = i.prev`. The point's own links are left intact so
    /// in-flight walks through it can still escape.
    pub fn splice(&mut self, i: usize) {
        let next = self.pts[i].next;
        let prev = self.pts[i].prev;
        self.pts[prev].next = next;
        self.pts[next].prev = prev;
    }
}
