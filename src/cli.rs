//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use vobsync::defaults::{default_user_config, DEFAULT_CONFIG_FILENAME};
use vobsync::settings::{self, Settings};
use vobsync::sync::Synchronizer;

use crate::commands;

/// vobsync - Browse, fetch and label ClearCase snapshot views
#[derive(Parser, Debug)]
#[command(name = "vobsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Settings file (defaults to ./.vobsync.yaml, then the user config file).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Full path to the cleartool executable.
    #[arg(long, global = true, value_name = "PATH", env = "VOBSYNC_TOOL_PATH")]
    pub tool_path: Option<PathBuf>,

    /// Root directory of the snapshot view.
    #[arg(long, global = true, value_name = "DIR", env = "VOBSYNC_VIEW_PATH")]
    pub view_path: Option<PathBuf>,

    /// Branch to work against (defaults to main).
    #[arg(long, global = true, value_name = "BRANCH", env = "VOBSYNC_BRANCH")]
    pub branch: Option<String>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl GlobalArgs {
    /// Resolve settings: the settings file first, then flags and environment.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => settings::from_file(path)?,
            None => load_default_settings()?,
        };

        let overrides = Settings {
            tool_path: self.tool_path.clone().unwrap_or_default(),
            view_path: self.view_path.clone().unwrap_or_default(),
            branch_name: self.branch.clone(),
        };
        Ok(base.merge(overrides))
    }

    pub fn synchronizer(&self) -> Result<Synchronizer> {
        Ok(Synchronizer::new(self.settings()?))
    }
}

fn load_default_settings() -> Result<Settings> {
    let local = Path::new(DEFAULT_CONFIG_FILENAME);
    if local.is_file() {
        return Ok(settings::from_file(local)?);
    }
    let user = default_user_config();
    if user.is_file() {
        return Ok(settings::from_file(&user)?);
    }
    Ok(Settings::default())
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the roots, or the contents of a directory inside a root
    Ls(commands::ls::LsArgs),

    /// Print the contents of a file
    Cat(commands::cat::CatArgs),

    /// Update the view and optionally copy files out of it
    Get(commands::get::GetArgs),

    /// Apply a label to the latest versions under a path
    Label(commands::label::LabelArgs),

    /// Check that cleartool and the view are reachable
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.global.log_level);

        match self.command {
            Commands::Ls(args) => commands::ls::execute(args, &self.global),
            Commands::Cat(args) => commands::cat::execute(args, &self.global),
            Commands::Get(args) => commands::get::execute(args, &self.global),
            Commands::Label(args) => commands::label::execute(args, &self.global),
            Commands::Validate(args) => commands::validate::execute(args, &self.global),
        }
    }
}

fn init_logging(level: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp(None)
        .try_init();
}
