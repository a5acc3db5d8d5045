//! # Get Command Implementation
//!
//! This module implements the `get` subcommand, which brings the view up to
//! date for the configured branch (or a label) and optionally exports it.
//!
//! ## Functionality
//!
//! - **Whole View**: Without a path, loads every root and updates the view
//! - **Subtree**: With a path, loads only that root and updates the path
//! - **Labels**: `--label` selects labeled versions instead of the latest
//! - **Export**: `--dest` copies the updated content to a directory

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use vobsync::output::{emoji, OutputConfig};

use crate::cli::GlobalArgs;

/// Update the view and optionally copy files out of it
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path to fetch, e.g. `VOB1\src`. Fetches every root when omitted.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Fetch the versions carrying this label instead of the latest ones.
    #[arg(short, long, value_name = "LABEL")]
    pub label: Option<String>,

    /// Copy the fetched files into this directory.
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let sync = global.synchronizer()?;
    let dest = args.dest.as_deref();

    let result = match &args.label {
        Some(label) => sync.fetch_labeled(label, &args.path, dest),
        None => sync.fetch_latest(&args.path, dest),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to fetch '{}': {}", args.path, e))?;

    let source = if args.path.is_empty() {
        "all roots"
    } else {
        args.path.as_str()
    };
    match dest {
        Some(dir) => println!(
            "{} Fetched {} into {}",
            emoji(&out, "✅", "[OK]"),
            source,
            dir.display()
        ),
        None => println!("{} Updated {} in the view", emoji(&out, "✅", "[OK]"), source),
    }
    Ok(())
}
