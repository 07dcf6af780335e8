//! sanctuary-check - validate a sound asset manifest
//!
//! Prints each valid entry as a normalized JSON record on stdout and each
//! rejected entry as `entry N: <error>` on stderr. Exits non-zero when any
//! entry is rejected.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sanctuary_check::{check_entries, load_manifest, CheckOptions, Summary};
use sanctuary_common::config::AssetRootResolver;
use sanctuary_common::logging;
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for sanctuary-check
#[derive(Parser, Debug)]
#[command(name = "sanctuary-check")]
#[command(about = "Validate and normalize a sound asset manifest")]
#[command(version)]
struct Args {
    /// Manifest file (.json array or .toml with [[asset]] tables)
    manifest: PathBuf,

    /// Folder that asset file paths are relative to (overrides SANCTUARY_ASSET_ROOT)
    #[arg(short, long)]
    asset_root: Option<PathBuf>,

    /// Config file (default: <config dir>/sanctuary/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Require every asset file to exist under the asset root
    #[arg(long)]
    verify_files: bool,

    /// Pretty-print records instead of one JSON object per line
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut resolver = AssetRootResolver::new().with_cli_arg(args.asset_root.clone());
    if let Some(config) = &args.config {
        resolver = resolver.with_config_file(config);
    }
    let (config, config_load) = resolver.read_config();

    logging::init_tracing(&config.logging, &["sanctuary-check", "sanctuary-common"])
        .context("Failed to initialize logging")?;
    config_load.log();

    info!("Starting sanctuary-check v{}", env!("CARGO_PKG_VERSION"));

    let asset_root = resolver.resolve_with(&config);
    let entries = load_manifest(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    let options = CheckOptions {
        asset_root,
        verify_files: args.verify_files,
    };
    let outcomes = check_entries(&entries, &options);

    for outcome in &outcomes {
        match &outcome.result {
            Ok(asset) => {
                let json = if args.pretty {
                    asset.to_json_pretty()?
                } else {
                    serde_json::to_string(asset)?
                };
                println!("{}", json);
            }
            Err(e) => eprintln!("entry {}: {}", outcome.index, e),
        }
    }

    let summary = Summary::from_outcomes(&outcomes);
    info!("{}", summary);

    if !summary.all_valid() {
        bail!("{} of {} manifest entries failed validation", summary.invalid, summary.total);
    }
    Ok(())
}
