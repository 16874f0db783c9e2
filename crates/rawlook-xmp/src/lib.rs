//! # rawlook-xmp
//!
//! Camera-raw XMP sidecar parsing.
//!
//! Raw developers store develop settings in XMP sidecars as a flat set of
//! properties in the camera-raw namespace
//! (`http://ns.adobe.com/camera-raw-settings/1.0/`). This crate reads those
//! sidecars into a [`Sidecar`], which implements
//! [`PropertySource`](rawlook_core::PropertySource) so the conversion
//! engine can query settings without knowing anything about XML.
//!
//! # Property shapes
//!
//! Sidecars mix three property encodings, all handled here:
//!
//! - Attribute form: `crs:Exposure2012="+0.50"` on the `rdf:Description`
//! - Element form: `<crs:Exposure2012>+0.50</crs:Exposure2012>`
//! - Structured form: `rdf:Seq`/`rdf:Bag` arrays (tone-curve point lists)
//!   and `rdf:Alt` localized text (preset name and group)
//!
//! # Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use rawlook_core::PropertySource;
//! use rawlook_xmp::Sidecar;
//!
//! let xml = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
//!  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
//!   <rdf:Description rdf:about=""
//!     xmlns:crs="http://ns.adobe.com/camera-raw-settings/1.0/"
//!     crs:Exposure2012="+0.50"/>
//!  </rdf:RDF>
//! </x:xmpmeta>"#;
//!
//! let sidecar = Sidecar::parse(Cursor::new(xml)).unwrap();
//! assert_eq!(sidecar.float("Exposure2012"), Some(0.5));
//! ```
//!
//! # Dependencies
//!
//! - [`rawlook-core`] - the `PropertySource` trait and property storage
//! - [`quick-xml`] - streaming XML parsing
//! - [`thiserror`] - error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod sidecar;

pub use error::{XmpError, XmpResult};
pub use sidecar::{Sidecar, CAMERA_RAW_NS};
