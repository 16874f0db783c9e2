//! rawlook - develop-sidecar to filter-preset converter
//!
//! Reads camera-raw XMP sidecars and writes replayable filter-pipeline
//! preset documents as JSON.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rawlook")]
#[command(author, version, about = "Convert camera-raw develop sidecars into filter presets")]
#[command(long_about = "
Translates the develop settings of camera-raw XMP sidecars into ordered
filter-pipeline preset documents (JSON) for replay by an image pipeline.

Examples:
  rawlook convert portra.xmp                    # Print the preset document
  rawlook convert portra.xmp -o portra.json -p  # Pretty JSON to a file
  rawlook convert portra.xmp --key film_01      # Override the preset key
  rawlook batch 'presets/*.xmp' -o looks/       # Convert a whole pack
  rawlook inspect portra.xmp                    # List develop properties
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one sidecar into a preset document
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Convert every sidecar matching a glob pattern
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// List the develop properties found in a sidecar
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Input sidecar (.xmp)
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preset key (defaults to the input file stem)
    #[arg(short, long)]
    key: Option<String>,

    /// Human-readable JSON
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Glob pattern of input sidecars
    pattern: String,

    /// Output directory for the .json documents
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Human-readable JSON
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Input sidecar (.xmp)
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
