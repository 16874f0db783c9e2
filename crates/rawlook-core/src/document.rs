//! The preset document model.
//!
//! A conversion produces a [`PresetDocument`]: an ordered list of filter
//! invocations plus descriptive metadata, serialized as JSON for the
//! downstream image pipeline. The wire shape is fixed by the replayer:
//!
//! ```json
//! {
//!   "key": "portra_400",
//!   "info": { "name": "Portra 400", "group": "Film" },
//!   "filters": [
//!     { "key": "CIExposureAdjust",
//!       "parameters": [
//!         { "key": "inputEV", "val": 0.5, "type": "CIAttributeTypeScalar" }
//!       ] }
//!   ]
//! }
//! ```
//!
//! Filters are applied by the replayer in list order, so the document is
//! append-only: stages push descriptors and nothing ever reorders them.

use std::io::Write;

use serde::{Serialize, Serializer};

use crate::error::Result;

// ============================================================================
// Parameter values
// ============================================================================

/// A typed filter-parameter payload.
///
/// Serializes untagged: scalars as bare numbers, everything else as a JSON
/// array of numbers. The semantic distinction (offset vs. position vs.
/// free-length vector) travels in the paired [`ParamKind`], not in the
/// payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single number.
    Scalar(f64),
    /// A two-component value (curve point, image-space position).
    Pair([f64; 2]),
    /// A three-component value (per-band hue/saturation/luminance).
    Triple([f64; 3]),
    /// A free-length vector (per-channel curve ordinates).
    Vector(Vec<f64>),
}

impl ParamValue {
    /// Returns the scalar payload, if this is one.
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload as a flat slice of components.
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::Pair(v) => v,
            Self::Triple(v) => v,
            Self::Vector(v) => v,
        }
    }
}

/// The wire attribute type of a filter parameter.
///
/// The downstream replayer dispatches on these strings to decide how a
/// payload becomes a filter argument (number, vector, image-space point,
/// image-relative distance). `Offset2` and `VectorN` share a wire string:
/// the replayer folds both into its generic-vector branch, but the enum
/// keeps them apart so constructors can enforce payload arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A bare number.
    Scalar,
    /// A two-component offset (tone-curve control point).
    Offset2,
    /// A two-component position, rescaled by the replayer into image space.
    Position2,
    /// A three-component positional vector.
    Position3,
    /// A free-length numeric vector.
    VectorN,
    /// A scalar distance, rescaled by the replayer relative to image size.
    Distance,
}

impl ParamKind {
    /// The wire string written into the `type` field.
    pub fn attribute_type(&self) -> &'static str {
        match self {
            Self::Scalar => "CIAttributeTypeScalar",
            Self::Offset2 | Self::VectorN => "CIAttributeTypeOffset",
            Self::Position2 => "CIAttributeTypePosition",
            Self::Position3 => "CIAttributeTypePosition3",
            Self::Distance => "CIAttributeTypeDistance",
        }
    }
}

impl Serialize for ParamKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.attribute_type())
    }
}

// ============================================================================
// Filter descriptors
// ============================================================================

/// One named parameter of a filter invocation.
///
/// Payload and wire type are paired at construction; use the typed
/// constructors rather than building the struct literally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterParameter {
    /// Parameter name as the target filter declares it (e.g. `inputEV`).
    pub key: String,
    /// The payload.
    pub val: ParamValue,
    /// The wire attribute type.
    #[serde(rename = "type")]
    pub kind: ParamKind,
}

impl FilterParameter {
    /// A scalar parameter.
    pub fn scalar(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Scalar(value),
            kind: ParamKind::Scalar,
        }
    }

    /// A two-component offset parameter (curve control point).
    pub fn offset2(key: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Pair([x, y]),
            kind: ParamKind::Offset2,
        }
    }

    /// A two-component position parameter.
    pub fn position2(key: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Pair([x, y]),
            kind: ParamKind::Position2,
        }
    }

    /// A three-component position parameter.
    pub fn position3(key: impl Into<String>, value: [f64; 3]) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Triple(value),
            kind: ParamKind::Position3,
        }
    }

    /// A free-length vector parameter.
    pub fn vector(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Vector(values),
            kind: ParamKind::VectorN,
        }
    }

    /// A distance parameter.
    pub fn distance(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            val: ParamValue::Scalar(value),
            kind: ParamKind::Distance,
        }
    }
}

/// One filter invocation: the filter's registry key plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDescriptor {
    /// Filter registry key (e.g. `CIExposureAdjust`).
    pub key: String,
    /// Parameters in declaration order. May be empty for parameterless
    /// filters.
    pub parameters: Vec<FilterParameter>,
}

impl FilterDescriptor {
    /// Creates a descriptor with no parameters.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn with(mut self, param: FilterParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Looks up a parameter by key.
    pub fn param(&self, key: &str) -> Option<&FilterParameter> {
        self.parameters.iter().find(|p| p.key == key)
    }
}

// ============================================================================
// Document
// ============================================================================

/// Descriptive metadata carried alongside the filter list.
///
/// Absent fields are omitted from the output rather than serialized as
/// null, matching what the replayer expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PresetInfo {
    /// Human-readable preset name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Preset group or collection name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// The complete conversion output: identity, metadata, and the ordered
/// filter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetDocument {
    /// Unique preset key, typically derived from the sidecar file stem.
    pub key: String,
    /// Descriptive metadata.
    pub info: PresetInfo,
    /// Filter invocations in application order.
    pub filters: Vec<FilterDescriptor>,
}

impl PresetDocument {
    /// Creates an empty document for the given preset key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            info: PresetInfo::default(),
            filters: Vec::new(),
        }
    }

    /// Appends a filter. Order is preserved through serialization.
    pub fn push(&mut self, filter: FilterDescriptor) {
        self.filters.push(filter);
    }

    /// Number of filters in the document.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if no filters were emitted.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Looks up the first filter with the given registry key.
    pub fn filter(&self, key: &str) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Serializes the document as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the document as human-readable JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as compact JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer(writer, self)?)
    }

    /// Writes the document as human-readable JSON.
    pub fn write_json_pretty<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_parameter_wire_shape() {
        let p = FilterParameter::scalar("inputEV", 0.5);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(
            v,
            json!({ "key": "inputEV", "val": 0.5, "type": "CIAttributeTypeScalar" })
        );
    }

    #[test]
    fn test_offset_and_vector_share_wire_type() {
        let a = FilterParameter::offset2("inputPoint0", 0.0, 0.0);
        let b = FilterParameter::vector("inputRedXvalues", vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(a.kind.attribute_type(), b.kind.attribute_type());
        assert_ne!(a.kind, b.kind);
    }

    #[test]
    fn test_position3_wire_shape() {
        let p = FilterParameter::position3("inputRedShift", [0.125, 1.3, 1.0]);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["val"], json!([0.125, 1.3, 1.0]));
        assert_eq!(v["type"], json!("CIAttributeTypePosition3"));
    }

    #[test]
    fn test_document_shape_and_order() {
        let mut doc = PresetDocument::new("portra_400");
        doc.info.name = Some("Portra 400".to_string());
        doc.push(
            FilterDescriptor::new("CIExposureAdjust").with(FilterParameter::scalar("inputEV", 0.5)),
        );
        doc.push(FilterDescriptor::new("CIPhotoEffectMono"));

        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["key"], json!("portra_400"));
        assert_eq!(v["info"], json!({ "name": "Portra 400" }));
        assert_eq!(v["filters"][0]["key"], json!("CIExposureAdjust"));
        assert_eq!(v["filters"][1]["key"], json!("CIPhotoEffectMono"));
        assert_eq!(v["filters"][1]["parameters"], json!([]));
    }

    #[test]
    fn test_empty_info_serializes_empty_object() {
        let doc = PresetDocument::new("plain");
        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["info"], json!({}));
    }

    #[test]
    fn test_filter_lookup() {
        let mut doc = PresetDocument::new("x");
        doc.push(FilterDescriptor::new("CIVibrance").with(FilterParameter::scalar(
            "inputAmount",
            0.3,
        )));
        let f = doc.filter("CIVibrance").unwrap();
        assert_eq!(f.param("inputAmount").unwrap().val.as_scalar(), Some(0.3));
        assert!(doc.filter("GrainFilter").is_none());
    }
}
