//! # Cat Command Implementation
//!
//! This module implements the `cat` subcommand, which loads one file into the
//! view and writes its bytes to standard output unchanged.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalArgs;

/// Print the contents of a file
#[derive(Args, Debug)]
pub struct CatArgs {
    /// File to read, e.g. `VOB1\src\main.c`.
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Execute the `cat` command.
pub fn execute(args: CatArgs, global: &GlobalArgs) -> Result<()> {
    let sync = global.synchronizer()?;
    let bytes = sync
        .read_file(&args.path)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", args.path, e))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}
