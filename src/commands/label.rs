//! # Label Command Implementation
//!
//! This module implements the `label` subcommand. It refreshes the view to
//! the tip of the configured branch, creates the label type and attaches the
//! label recursively to everything under the path.

use anyhow::Result;
use clap::Args;

use vobsync::output::{emoji, OutputConfig};

use crate::cli::GlobalArgs;

/// Apply a label to the latest versions under a path
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Name of the label to apply.
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Path to label, e.g. `VOB1`. Labels the whole view when omitted.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,
}

/// Execute the `label` command.
pub fn execute(args: LabelArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let sync = global.synchronizer()?;
    sync.apply_label(&args.label, &args.path)
        .map_err(|e| anyhow::anyhow!("Failed to apply label '{}': {}", args.label, e))?;

    println!(
        "{} Applied label {} to {}",
        emoji(&out, "🏷️", "[OK]"),
        args.label,
        if args.path.is_empty() {
            "the view"
        } else {
            args.path.as_str()
        }
    );
    Ok(())
}
