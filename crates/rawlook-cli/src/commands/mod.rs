//! Subcommand implementations.

pub mod batch;
pub mod convert;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use rawlook_core::PresetDocument;
use rawlook_xmp::Sidecar;

/// Reads a sidecar and converts it under the given preset key.
pub fn convert_sidecar(input: &Path, key: Option<&str>) -> Result<PresetDocument> {
    let sidecar = Sidecar::from_path(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let key = match key {
        Some(k) => k.to_string(),
        None => file_stem(input),
    };
    Ok(rawlook_convert::convert(&sidecar, &key))
}

/// Preset key derived from the input file name.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("preset")
        .to_string()
}

/// Serializes a document, compact or pretty.
pub fn render(doc: &PresetDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        doc.to_json_pretty()?
    } else {
        doc.to_json()?
    };
    Ok(json)
}
