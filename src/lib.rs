#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Procedural mesh generation by sweeping a cross-section profile along a
//! 3D curve.
//!
//! The entry point is [`sweep_curve`]: it samples a [`CurveSource`],
//! builds a sweep frame per sample, extrudes the selected [`Profile`]
//! (flat ribbon, cross blades, or tube) and returns a packed
//! [`SweptMesh`] together with [`SweepDiagnostics`] describing what the
//! cleanup passes did.
//!
//! ```
//! use curve_sweep::{BakedCurve3, Point3, Profile, SweepOptions, sweep_curve};
//!
//! let curve = BakedCurve3::from_polyline(
//!     &[Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
//!     false,
//! );
//! let options = SweepOptions {
//!     profile: Profile::Tube,
//!     segments: 6,
//!     ..SweepOptions::default()
//! };
//! let (mesh, diagnostics) = sweep_curve(&curve, None, &options).unwrap();
//! assert!(mesh.triangle_count() > 0);
//! assert!(!diagnostics.degenerate_fallback);
//! ```

mod assemble;
pub mod core;
pub mod curve;
pub mod diagnostics;
mod frame;
mod interleave;
pub mod mesh;
mod overlap;
mod ring;
mod section;
pub mod sweep;
mod tessellation;

pub use crate::core::{Point3, Tolerance, Vec3};
pub use curve::{
    BakedCurve3, ConstantWidth, CurvePoint, CurveSource, DEFAULT_BAKE_INTERVAL, WidthCurve,
    WidthProfile,
};
pub use diagnostics::SweepDiagnostics;
pub use mesh::SweptMesh;
pub use sweep::{
    Profile, SweepError, SweepOptions, TessellationMode, lightmap_size_hint, sweep_curve,
    sweep_curve_with_tolerance,
};

#[cfg(test)]
mod tests;
