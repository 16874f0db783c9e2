//! Single-sidecar conversion command.

use anyhow::{Context, Result};
use tracing::info;

use crate::ConvertArgs;

pub fn run(args: ConvertArgs) -> Result<()> {
    let doc = super::convert_sidecar(&args.input, args.key.as_deref())?;
    info!(key = %doc.key, filters = doc.len(), "converted sidecar");

    let json = super::render(&doc, args.pretty)?;
    match &args.output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
