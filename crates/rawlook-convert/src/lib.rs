//! # rawlook-convert
//!
//! The develop-settings conversion engine.
//!
//! Takes a flat set of camera-raw develop parameters (behind the
//! [`PropertySource`](rawlook_core::PropertySource) capability) and
//! produces a [`PresetDocument`](rawlook_core::PresetDocument): an ordered
//! list of typed filter invocations replayable by an image pipeline.
//!
//! ## How a conversion works
//!
//! [`convert`] runs a fixed sequence of stages. Simple sliders (exposure,
//! clarity, sharpening, ...) map straight to one filter each, with a no-op
//! threshold suppressing untouched sliders. Tonal adjustments funnel into
//! a shared 5-point [`ToneCurve`] accumulator — negative contrast, the
//! shadow/highlight/black/white endpoint sliders, the parametric curve,
//! and explicit curve properties all touch the same curve, which is
//! emitted once at the end if anything changed. Per-band color adjustments
//! from two property families (modern HSV sliders, legacy calibration
//! sliders) merge in a [`ColorBandState`] accumulator the same way.
//!
//! ```
//! use rawlook_core::PropertyMap;
//! use rawlook_convert::convert;
//!
//! let props = PropertyMap::new()
//!     .with("WhiteBalance", "Tungsten")
//!     .with("Exposure2012", "+0.35");
//! let doc = convert(&props, "warm_lift");
//! assert_eq!(doc.len(), 2);
//! ```
//!
//! ## Failure model
//!
//! Nothing here aborts a conversion. Missing properties skip their stage;
//! malformed curve data fails only its own stage with a logged warning;
//! out-of-range values clamp. The engine always returns a document.
//!
//! ## Dependencies
//!
//! - [`rawlook-core`] - document model and property access
//! - [`rawlook-math`] - range mapping, bounded deltas, spline fitting
//! - [`tracing`] - stage diagnostics
//! - [`thiserror`] - the stage-local error enum

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bands;
pub mod curve;
pub mod error;
pub mod filters;
pub mod keys;
mod pipeline;

pub use bands::{Band, BandAdjust, ColorBandState};
pub use curve::{CurveState, ToneCurve};
pub use error::{ConvertError, ConvertResult};
pub use pipeline::convert;
