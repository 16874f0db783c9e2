//! Full sidecar-to-document conversions over embedded XMP samples.

use std::io::Cursor;

use approx::assert_abs_diff_eq;
use rawlook_convert::convert;
use rawlook_xmp::Sidecar;
use serde_json::{json, Value};

/// A develop exercising most of the pipeline: white balance, global
/// sliders, an explicit tone curve, per-band color, split toning, grain
/// and vignette.
const FULL_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="XMP Core 5.6.0">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:crs="http://ns.adobe.com/camera-raw-settings/1.0/"
   crs:ProcessVersion="11.0"
   crs:WhiteBalance="Cloudy"
   crs:Exposure2012="+0.40"
   crs:Contrast2012="+25"
   crs:Clarity2012="+15"
   crs:Vibrance="+20"
   crs:Sharpness="50"
   crs:SplitToningShadowHue="220"
   crs:SplitToningShadowSaturation="30"
   crs:GrainAmount="25"
   crs:GrainSize="40"
   crs:HueAdjustmentOrange="-10"
   crs:LuminanceAdjustmentBlue="+30"
   crs:PostCropVignetteAmount="-35">
   <crs:ToneCurvePV2012>
    <rdf:Seq>
     <rdf:li>0, 0</rdf:li>
     <rdf:li>64, 56</rdf:li>
     <rdf:li>128, 131</rdf:li>
     <rdf:li>192, 201</rdf:li>
     <rdf:li>255, 255</rdf:li>
    </rdf:Seq>
   </crs:ToneCurvePV2012>
   <crs:Name>
    <rdf:Alt>
     <rdf:li xml:lang="x-default">Coastal Morning</rdf:li>
    </rdf:Alt>
   </crs:Name>
   <crs:Cluster>Landscape</crs:Cluster>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>"#;

/// A black-and-white develop relying on legacy property names.
const MONO_SAMPLE: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:crs="http://ns.adobe.com/camera-raw-settings/1.0/"
   crs:Exposure="+0.20"
   crs:Contrast="-20"
   crs:ConvertToGrayscale="True"
   crs:ToneCurveName="Strong Contrast"/>
 </rdf:RDF>
</x:xmpmeta>"#;

fn convert_sample(xml: &str, key: &str) -> Value {
    let sidecar = Sidecar::parse(Cursor::new(xml)).unwrap();
    let doc = convert(&sidecar, key);
    serde_json::to_value(&doc).unwrap()
}

fn filter<'a>(doc: &'a Value, key: &str) -> &'a Value {
    doc["filters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["key"] == key)
        .unwrap_or_else(|| panic!("no filter {key}"))
}

fn param<'a>(filter: &'a Value, key: &str) -> &'a Value {
    filter["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["key"] == key)
        .unwrap_or_else(|| panic!("no parameter {key}"))
}

#[test]
fn full_sidecar_produces_expected_filter_order() {
    let doc = convert_sample(FULL_SAMPLE, "coastal_morning");
    let keys: Vec<&str> = doc["filters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "WhiteBalanceFilter",
            "CIExposureAdjust",
            "ContrastFilter",
            "ClarityFilter",
            "CIVibrance",
            "SplitToningFilter",
            "CISharpenLuminance",
            "GrainFilter",
            "MultiBandHSV",
            "CIToneCurve",
            "CIVignetteEffect",
        ]
    );
}

#[test]
fn full_sidecar_metadata_and_values() {
    let doc = convert_sample(FULL_SAMPLE, "coastal_morning");
    assert_eq!(doc["key"], json!("coastal_morning"));
    assert_eq!(
        doc["info"],
        json!({ "name": "Coastal Morning", "group": "Landscape" })
    );

    let wb = filter(&doc, "WhiteBalanceFilter");
    assert_eq!(param(wb, "inputTemperature")["val"], json!(6500.0));
    assert_eq!(param(wb, "inputTint")["val"], json!(10.0));

    let exposure = filter(&doc, "CIExposureAdjust");
    let p = param(exposure, "inputEV");
    assert_eq!(p["val"], json!(0.4));
    assert_eq!(p["type"], json!("CIAttributeTypeScalar"));

    // Contrast +25 maps to 1 + 25 * 3 / 100.
    let contrast = filter(&doc, "ContrastFilter");
    assert_eq!(param(contrast, "inputContrast")["val"], json!(1.75));

    let grain = filter(&doc, "GrainFilter");
    assert_eq!(param(grain, "inputAmount")["val"], json!(0.25));
    assert_eq!(param(grain, "inputSize")["val"], json!(0.4));
}

#[test]
fn full_sidecar_tone_curve_passes_five_points_through() {
    let doc = convert_sample(FULL_SAMPLE, "coastal_morning");
    let curve = filter(&doc, "CIToneCurve");
    let p1 = param(curve, "inputPoint1");
    assert_eq!(p1["type"], json!("CIAttributeTypeOffset"));
    let pair = p1["val"].as_array().unwrap();
    assert_abs_diff_eq!(pair[0].as_f64().unwrap(), 64.0 / 255.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pair[1].as_f64().unwrap(), 56.0 / 255.0, epsilon = 1e-9);
    let p4 = param(curve, "inputPoint4");
    assert_eq!(p4["val"], json!([1.0, 1.0]));
}

#[test]
fn full_sidecar_band_triples() {
    let doc = convert_sample(FULL_SAMPLE, "coastal_morning");
    let hsv = filter(&doc, "MultiBandHSV");
    assert_eq!(hsv["parameters"].as_array().unwrap().len(), 8);

    let orange = param(hsv, "inputOrangeShift");
    assert_eq!(orange["type"], json!("CIAttributeTypePosition3"));
    let triple = orange["val"].as_array().unwrap();
    assert!((triple[0].as_f64().unwrap() + 0.0125).abs() < 1e-9);
    assert_eq!(triple[1], json!(1.0));

    let blue = param(hsv, "inputBlueShift");
    let triple = blue["val"].as_array().unwrap();
    assert!((triple[2].as_f64().unwrap() - 1.3).abs() < 1e-9);

    // Untouched bands carry the no-op triple.
    assert_eq!(param(hsv, "inputMagentaShift")["val"], json!([0.0, 1.0, 1.0]));
}

#[test]
fn mono_sidecar_uses_legacy_keys_and_ends_grayscale() {
    let doc = convert_sample(MONO_SAMPLE, "mono");
    let keys: Vec<&str> = doc["filters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["CIExposureAdjust", "CIToneCurve", "CIPhotoEffectMono"]);

    assert_eq!(
        param(filter(&doc, "CIExposureAdjust"), "inputEV")["val"],
        json!(0.2)
    );

    // Negative contrast never emits ContrastFilter; the curve carries it,
    // and the named preset then overwrites the curve wholesale.
    let curve = filter(&doc, "CIToneCurve");
    assert_eq!(param(curve, "inputPoint1")["val"], json!([0.25, 0.19]));
    assert_eq!(param(curve, "inputPoint3")["val"], json!([0.75, 0.79]));
}

#[test]
fn empty_sidecar_still_yields_a_document() {
    let xml = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:crs="http://ns.adobe.com/camera-raw-settings/1.0/"/>
 </rdf:RDF>
</x:xmpmeta>"#;
    let doc = convert_sample(xml, "empty");
    assert_eq!(doc, json!({ "key": "empty", "info": {}, "filters": [] }));
}
