//! # rawlook-core
//!
//! Core types for develop-preset conversion.
//!
//! This crate provides the foundational types used throughout the rawlook
//! workspace:
//!
//! - [`PresetDocument`], [`FilterDescriptor`], [`FilterParameter`] - The
//!   ordered filter-invocation document produced by a conversion
//! - [`ParamValue`], [`ParamKind`] - Typed parameter payloads and their wire
//!   attribute types
//! - [`PropertySource`] - Capability trait for querying develop settings by
//!   name, independent of the markup format they were stored in
//!
//! ## Design Philosophy
//!
//! The document model is **write-once, ordered**: filters are appended in
//! pipeline order and never reordered, because the downstream replayer
//! applies them sequentially. Parameter payload and wire type are paired at
//! construction so a scalar can never be serialized with a vector type tag:
//!
//! ```
//! use rawlook_core::FilterParameter;
//!
//! let p = FilterParameter::scalar("inputEV", 0.5);
//! assert_eq!(p.kind.attribute_type(), "CIAttributeTypeScalar");
//! ```
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! rawlook-core (this crate)
//!    ^
//!    |
//!    +-- rawlook-math (remap, deltas, spline fitting)
//!    +-- rawlook-xmp (camera-raw sidecar parsing)
//!    +-- rawlook-convert (stage pipeline, accumulators)
//!    +-- rawlook-cli (command-line front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod props;

// Re-exports for convenience
pub use document::*;
pub use error::*;
pub use props::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use rawlook_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::document::{
        FilterDescriptor, FilterParameter, ParamKind, ParamValue, PresetDocument, PresetInfo,
    };
    pub use crate::error::{Error, Result};
    pub use crate::props::PropertySource;
}
