//! Curve sampling collaborators for the sweep pipeline.
//!
//! The sweep core consumes curves through the [`CurveSource`] trait: an
//! ordered sequence of baked positions and tilts, an adaptive tessellation,
//! and offset-based tilt lookup. [`BakedCurve3`] is the bundled
//! implementation: a cubic-Bezier control curve with a uniform bake
//! interval and a per-point roll angle ("tilt") around the tangent.
//!
//! Width modulation along the sweep goes through [`WidthProfile`], sampled
//! with the normalized arc-length parameter `u in [0, 1]`.

use super::core::{Point3, Tolerance, Vec3};
use super::tessellation::{bezier_point, tessellate_bezier_segment};

/// Ordered curve sampler consumed by the sweep pipeline.
///
/// `baked_points`/`baked_tilts` return the fixed-interval sampling; for a
/// closed curve both end with a duplicate of the first sample (the seam
/// wrap), which the consumer drops. `tessellate` returns an adaptive
/// sampling with the same wrap convention.
pub trait CurveSource {
    /// Fixed-interval sampling of the curve.
    fn baked_points(&self) -> Vec<Point3>;

    /// Tilt angles matching `baked_points` one-to-one.
    fn baked_tilts(&self) -> Vec<f64>;

    /// Adaptive sampling: subdivision up to `max_stages` levels, refined
    /// while the chord deviation exceeds `tolerance`.
    fn tessellate(&self, max_stages: usize, tolerance: f64) -> Vec<Point3>;

    fn is_closed(&self) -> bool;

    /// Number of control points.
    fn point_count(&self) -> usize;

    fn point_position(&self, i: usize) -> Point3;

    fn point_tilt(&self, i: usize) -> f64;

    /// Arc-length offset of the baked sample closest to `point`.
    fn closest_offset(&self, point: Point3) -> f64;

    /// Tilt at an arc-length offset, interpolated between baked samples.
    fn sample_baked_tilt(&self, offset: f64) -> f64;

    /// Total baked arc length.
    fn baked_length(&self) -> f64;
}

/// One control point of a [`BakedCurve3`].
///
/// Handles are offsets relative to `position`; a zero handle pair makes the
/// adjacent segments straight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Point3,
    pub handle_in: Vec3,
    pub handle_out: Vec3,
    /// Roll angle around the tangent, in radians.
    pub tilt: f64,
}

impl CurvePoint {
    #[must_use]
    pub const fn new(position: Point3) -> Self {
        Self {
            position,
            handle_in: Vec3::ZERO,
            handle_out: Vec3::ZERO,
            tilt: 0.0,
        }
    }

    #[must_use]
    pub const fn with_handles(position: Point3, handle_in: Vec3, handle_out: Vec3) -> Self {
        Self {
            position,
            handle_in,
            handle_out,
            tilt: 0.0,
        }
    }

    #[must_use]
    pub const fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }
}

/// Default spacing of baked samples along the curve.
pub const DEFAULT_BAKE_INTERVAL: f64 = 0.2;

/// Cap on baked subdivisions per Bezier segment.
const MAX_BAKE_DIVISIONS: usize = 512;

/// Cubic-Bezier control curve with cached fixed-interval bake data.
///
/// The bake (points, tilts, cumulative lengths) is computed once at
/// construction; the struct is immutable afterwards, so every query is pure.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedCurve3 {
    points: Vec<CurvePoint>,
    closed: bool,
    bake_interval: f64,
    baked_points: Vec<Point3>,
    baked_tilts: Vec<f64>,
    /// Cumulative arc length per baked point; first entry is 0.
    baked_lengths: Vec<f64>,
}

impl BakedCurve3 {
    #[must_use]
    pub fn new(points: Vec<CurvePoint>, closed: bool, bake_interval: f64) -> Self {
        let bake_interval = if bake_interval.is_finite() && bake_interval > 0.0 {
            bake_interval
        } else {
            DEFAULT_BAKE_INTERVAL
        };

        let mut curve = Self {
            points,
            closed,
            bake_interval,
            baked_points: Vec::new(),
            baked_tilts: Vec::new(),
            baked_lengths: Vec::new(),
        };
        curve.bake();
        curve
    }

    /// Builds a curve whose segments are straight lines between `positions`.
    ///
    /// The bake interval is chosen large enough that the baked sampling is
    /// exactly the control points, so all three tessellation modes agree.
    #[must_use]
    pub fn from_polyline(positions: &[Point3], closed: bool) -> Self {
        Self::new(
            positions.iter().copied().map(CurvePoint::new).collect(),
            closed,
            f64::MAX,
        )
    }

    #[must_use]
    pub fn bake_interval(&self) -> f64 {
        self.bake_interval
    }

    fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    fn segment_control_points(&self, s: usize) -> (Point3, Point3, Point3, Point3) {
        let n = self.points.len();
        let a = &self.points[s];
        let b = &self.points[(s + 1) % n];
        let p0 = a.position;
        let c0 = p0.add_vec(a.handle_out);
        let c1 = b.position.add_vec(b.handle_in);
        (p0, c0, c1, b.position)
    }

    fn bake(&mut self) {
        self.baked_points.clear();
        self.baked_tilts.clear();
        self.baked_lengths.clear();

        if self.points.is_empty() {
            return;
        }

        self.baked_points.push(self.points[0].position);
        self.baked_tilts.push(self.points[0].tilt);

        let n = self.points.len();
        for s in 0..self.segment_count() {
            let (p0, c0, c1, p1) = self.segment_control_points(s);
            let tilt_a = self.points[s].tilt;
            let tilt_b = self.points[(s + 1) % n].tilt;

            // Coarse length estimate drives the division count.
            let mut estimate = 0.0;
            let mut prev = p0;
            for k in 1..=8 {
                let q = bezier_point(p0, c0, c1, p1, f64::from(k) / 8.0);
                estimate += prev.distance_to(q);
                prev = q;
            }

            let divisions = if estimate.is_finite() && estimate > self.bake_interval {
                ((estimate / self.bake_interval).ceil() as usize).clamp(1, MAX_BAKE_DIVISIONS)
            } else {
                1
            };

            for k in 1..=divisions {
                let t = k as f64 / divisions as f64;
                self.baked_points.push(bezier_point(p0, c0, c1, p1, t));
                self.baked_tilts.push(tilt_a + (tilt_b - tilt_a) * t);
            }
        }

        let mut cumulative = 0.0;
        self.baked_lengths.push(cumulative);
        for i in 1..self.baked_points.len() {
            let step = self.baked_points[i].distance_to(self.baked_points[i - 1]);
            if step.is_finite() {
                cumulative += step;
            }
            self.baked_lengths.push(cumulative);
        }
    }
}

impl CurveSource for BakedCurve3 {
    fn baked_points(&self) -> Vec<Point3> {
        self.baked_points.clone()
    }

    fn baked_tilts(&self) -> Vec<f64> {
        self.baked_tilts.clone()
    }

    fn tessellate(&self, max_stages: usize, tolerance: f64) -> Vec<Point3> {
        if self.points.is_empty() {
            return Vec::new();
        }

        let mut out = vec![self.points[0].position];
        for s in 0..self.segment_count() {
            let (p0, c0, c1, p1) = self.segment_control_points(s);
            tessellate_bezier_segment(p0, c0, c1, p1, max_stages, tolerance, &mut out);
        }
        out
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point_position(&self, i: usize) -> Point3 {
        self.points[i].position
    }

    fn point_tilt(&self, i: usize) -> f64 {
        self.points[i].tilt
    }

    fn closest_offset(&self, point: Point3) -> f64 {
        if self.baked_points.len() < 2 {
            return 0.0;
        }

        let mut best_offset = 0.0;
        let mut best_dist_sq = f64::MAX;

        for i in 0..self.baked_points.len() - 1 {
            let a = self.baked_points[i];
            let b = self.baked_points[i + 1];
            let ab = b.sub_point(a);
            let len_sq = ab.length_squared();

            let t = if len_sq > 0.0 {
                (point.sub_point(a).dot(ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let proj = a.lerp(b, t);
            let dist_sq = point.distance_squared_to(proj);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best_offset =
                    self.baked_lengths[i] + (self.baked_lengths[i + 1] - self.baked_lengths[i]) * t;
            }
        }

        best_offset
    }

    fn sample_baked_tilt(&self, offset: f64) -> f64 {
        if self.baked_tilts.is_empty() {
            return 0.0;
        }
        if self.baked_tilts.len() == 1 {
            return self.baked_tilts[0];
        }

        let total = self.baked_length();
        let target = offset.clamp(0.0, total);

        let idx = match self
            .baked_lengths
            .binary_search_by(|value| value.total_cmp(&target))
        {
            Ok(i) => i.min(self.baked_lengths.len() - 2),
            Err(i) => i.max(1) - 1,
        };

        let seg_len = self.baked_lengths[idx + 1] - self.baked_lengths[idx];
        if seg_len <= 0.0 {
            return self.baked_tilts[idx];
        }
        let t = ((target - self.baked_lengths[idx]) / seg_len).clamp(0.0, 1.0);
        self.baked_tilts[idx] + (self.baked_tilts[idx + 1] - self.baked_tilts[idx]) * t
    }

    fn baked_length(&self) -> f64 {
        self.baked_lengths.last().copied().unwrap_or(0.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Width profiles
// ─────────────────────────────────────────────────────────────────────────────

/// Scalar width modulation sampled along the sweep.
pub trait WidthProfile {
    /// Width factor at normalized arc-length parameter `u in [0, 1]`.
    fn sample(&self, u: f64) -> f64;

    fn min_value(&self) -> f64;

    fn max_value(&self) -> f64;
}

/// A width profile that returns the same factor everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantWidth(pub f64);

impl WidthProfile for ConstantWidth {
    fn sample(&self, _u: f64) -> f64 {
        self.0
    }

    fn min_value(&self) -> f64 {
        self.0
    }

    fn max_value(&self) -> f64 {
        self.0
    }
}

/// Piecewise-linear width profile over `(u, factor)` keys.
///
/// Keys are sorted at construction; nearly coincident parameters are merged
/// keeping the later factor. Sampling clamps to the first/last key outside
/// the keyed range.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthCurve {
    keys: Vec<(f64, f64)>,
}

impl WidthCurve {
    #[must_use]
    pub fn new(keys: Vec<(f64, f64)>) -> Self {
        let tol = Tolerance::default_geom();
        let mut keys: Vec<(f64, f64)> = keys
            .into_iter()
            .filter(|(u, v)| u.is_finite() && v.is_finite())
            .collect();
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f64, f64)> = Vec::with_capacity(keys.len());
        for (u, v) in keys {
            if let Some((last_u, last_v)) = merged.last_mut() {
                if (u - *last_u).abs() <= tol.eps {
                    *last_v = v;
                    continue;
                }
            }
            merged.push((u, v));
        }

        if merged.is_empty() {
            merged.push((0.0, 1.0));
        }

        Self { keys: merged }
    }
}

impl WidthProfile for WidthCurve {
    fn sample(&self, u: f64) -> f64 {
        let keys = &self.keys;
        if keys.len() == 1 {
            return keys[0].1;
        }
        if u <= keys[0].0 {
            return keys[0].1;
        }
        if u >= keys[keys.len() - 1].0 {
            return keys[keys.len() - 1].1;
        }

        let mut lo = 0usize;
        let mut hi = keys.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if u < keys[mid].0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let (u0, v0) = keys[lo];
        let (u1, v1) = keys[hi];
        let denom = u1 - u0;
        if denom <= 0.0 {
            return v0;
        }
        let t = ((u - u0) / denom).clamp(0.0, 1.0);
        v0 + (v1 - v0) * t
    }

    fn min_value(&self) -> f64 {
        self.keys.iter().map(|(_, v)| *v).fold(f64::MAX, f64::min)
    }

    fn max_value(&self) -> f64 {
        self.keys.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max)
    }
}
