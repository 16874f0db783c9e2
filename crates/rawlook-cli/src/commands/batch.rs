//! Batch conversion over a glob of sidecars.
//!
//! Preset packs ship dozens of sidecars; one bad file must not stop the
//! rest. Failures are reported per file and the command only exits
//! nonzero after everything else has been converted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::BatchArgs;

pub fn run(args: BatchArgs) -> Result<()> {
    let files: Vec<PathBuf> = glob::glob(&args.pattern)
        .context("invalid glob pattern")?
        .filter_map(|r| r.ok())
        .collect();
    if files.is_empty() {
        bail!("no files match pattern: {}", args.pattern);
    }
    info!(files = files.len(), pattern = %args.pattern, "starting batch conversion");

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let mut success = 0;
    let mut failed = 0;
    for input in &files {
        match convert_one(input, &args) {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                warn!(input = %input.display(), error = %e, "conversion failed");
                eprintln!("error: {}: {e:#}", input.display());
            }
        }
    }

    info!(success, failed, "batch conversion complete");
    println!("Converted: {success} ok, {failed} failed");
    if failed > 0 {
        bail!("{failed} files failed");
    }
    Ok(())
}

fn convert_one(input: &Path, args: &BatchArgs) -> Result<()> {
    let doc = super::convert_sidecar(input, None)?;
    let output = args
        .output_dir
        .join(format!("{}.json", super::file_stem(input)));
    let json = super::render(&doc, args.pretty)?;
    std::fs::write(&output, json + "\n")
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
