//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks that the
//! configured `cleartool` executable and snapshot view are usable.
//!
//! ## Functionality
//!
//! - **Settings Check**: Tool path and view path must be set
//! - **Filesystem Check**: The tool must be an executable file and the view
//!   an existing directory
//! - **Tool Probe**: Runs `hostinfo` and `lsvob -short`
//!
//! This command is a safe, read-only operation.

use anyhow::Result;
use clap::Args;

use vobsync::output::{emoji, OutputConfig};

use crate::cli::GlobalArgs;

/// Check that cleartool and the view are reachable
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also list the roots visible to the tool.
    #[arg(long)]
    pub show_roots: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let sync = global.synchronizer()?;

    let settings = sync.settings();
    println!(
        "{} Checking {} against view {}",
        emoji(&out, "🔍", "[SCAN]"),
        settings.tool_path.display(),
        settings.view_path.display()
    );

    if let Err(e) = sync.validate_connection() {
        println!("{} {}", emoji(&out, "❌", "[ERR]"), e);
        anyhow::bail!("Provider is not available");
    }
    println!("{} Connection is valid", emoji(&out, "✅", "[OK]"));

    if args.show_roots {
        for root in sync.list_roots()? {
            println!("  {}", root);
        }
    }
    Ok(())
}
