//! # rawlook-math
//!
//! Numeric primitives for develop-preset conversion.
//!
//! This crate provides the pure math the conversion engine is built on:
//!
//! - Range remapping ([`remap`], [`lerp`]) with the shared no-op and snap
//!   thresholds
//! - Bounded asymmetric percentage deltas ([`apply`], [`apply_constrained`])
//!   used by shadow/highlight/black/white-style sliders
//! - Exact interpolating B-splines ([`BSpline`]) used to refit arbitrary
//!   tone-curve point lists onto a fixed 5-point grid
//!
//! # Design
//!
//! Everything here is a pure function of its inputs: no state, no
//! configuration, no I/O. Callers own their domain constants (a clarity
//! slider divides by 100, a sharpening slider by 50); this crate only
//! supplies the mechanics.
//!
//! # Usage
//!
//! ```rust
//! use rawlook_math::{remap, apply_constrained};
//!
//! // Map a [-100, 100] slider to [-1, 1]
//! assert_eq!(remap(50.0, -100.0, 100.0, -1.0, 1.0), 0.5);
//!
//! // Move a curve point 20% of the way toward its lower bound
//! assert_eq!(apply_constrained(25.0, -20.0, 40.0, 10.0), 22.0);
//! ```
//!
//! # Used By
//!
//! - `rawlook-convert` - curve fitting and slider mapping

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod delta;
mod range;
mod spline;

pub use delta::*;
pub use range::*;
pub use spline::*;
