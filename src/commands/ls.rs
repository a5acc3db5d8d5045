//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists one directory of
//! the virtual tree.
//!
//! ## Functionality
//!
//! - **Root Listing**: Without a path, lists every root (VOB)
//! - **Directory Listing**: With a path, loads that root into the view and
//!   lists the directory, directories first
//! - **Tree Output**: `--tree` renders the listing as a hierarchy
//!
//! Listing changes the view configuration but never touches file contents.

use anyhow::Result;
use clap::Args;

use vobsync::output::{format_listing, ListingNode, OutputConfig};

use crate::cli::GlobalArgs;

/// List roots or the contents of a directory
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to list, e.g. `VOB1` or `VOB1\src`. Lists the roots when omitted.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Render the listing as a tree.
    #[arg(short, long)]
    pub tree: bool,

    /// Show only the number of entries.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, global: &GlobalArgs) -> Result<()> {
    let sync = global.synchronizer()?;
    let tree = sync
        .list_directory(&args.path)
        .map_err(|e| anyhow::anyhow!("Failed to list '{}': {}", args.path, e))?;

    if args.count {
        println!("{}", tree.subdirectories.len() + tree.files.len());
        return Ok(());
    }

    if args.tree {
        let out = OutputConfig::from_env_and_flag(&global.color);
        ptree::print_tree(&ListingNode::from_tree(&tree, &out))
            .map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
        return Ok(());
    }

    for line in format_listing(&tree) {
        println!("{}", line);
    }
    Ok(())
}
