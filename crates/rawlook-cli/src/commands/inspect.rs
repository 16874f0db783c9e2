//! Sidecar property listing, for debugging preset packs.

use anyhow::{Context, Result};
use rawlook_core::PropertySource;
use rawlook_xmp::Sidecar;

use crate::InspectArgs;

pub fn run(args: InspectArgs) -> Result<()> {
    let sidecar = Sidecar::from_path(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let props = sidecar.properties();

    println!("{}: {} properties", args.input.display(), props.len());
    for key in props.keys() {
        if let Some(len) = sidecar.array_len(key) {
            let preview: Vec<String> = (0..len.min(3))
                .filter_map(|i| sidecar.array_item(key, i))
                .collect();
            let ellipsis = if len > 3 { ", ..." } else { "" };
            println!("  {key} = [{}{ellipsis}] ({len} items)", preview.join("; "));
        } else if let Some(text) = sidecar.localized_text(key, "", "x-default") {
            println!("  {key} = \"{text}\" (localized)");
        } else if let Some(value) = sidecar.string(key) {
            println!("  {key} = {value}");
        }
    }
    Ok(())
}
