//! # Output
//!
//! Helpers the CLI uses to print results: color/emoji selection based on the
//! terminal and user preferences, and rendering of a `DirectoryTree` either
//! as a flat listing or as a `ptree` hierarchy.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::borrow::Cow;
use std::env;
use std::io;

use ptree::{Style, TreeItem};

use crate::defaults::DIRECTORY_SEPARATOR;
use crate::listing::DirectoryTree;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the `--color` flag: "always", "never", or "auto"
    ///
    /// `always` wins over `NO_COLOR`; `never` disables colors and emoji
    /// labels in `ls --tree`. Any other value detects support (see
    /// `detect_color_support`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    ///
    /// Colors are off when `NO_COLOR` is set, `CLICOLOR=0`, or `TERM=dumb`,
    /// and forced on by `CLICOLOR_FORCE`. Otherwise stdout must be a
    /// color-capable terminal.
    fn detect_color_support() -> bool {
        // Presence alone disables colors, even when empty.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // TTY and color capability of stdout
        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
///
/// Used for the `[D]`/`[F]` markers of the tree view.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// One line per entry: directories first (with a trailing separator), then
/// files, each as its full caller-facing path.
pub fn format_listing(tree: &DirectoryTree) -> Vec<String> {
    let directories = tree
        .subdirectories
        .iter()
        .map(|dir| format!("{}{}", dir.path, DIRECTORY_SEPARATOR));
    let files = tree.files.iter().map(|file| file.path.to_string());
    directories.chain(files).collect()
}

/// Node of a `ptree` rendering of a listing.
#[derive(Debug, Clone)]
pub struct ListingNode {
    label: String,
    children: Vec<ListingNode>,
}

impl ListingNode {
    /// Builds a one-level hierarchy: the listed directory and its entries.
    pub fn from_tree(tree: &DirectoryTree, config: &OutputConfig) -> Self {
        let label = if tree.path.is_top_level() {
            DIRECTORY_SEPARATOR.to_string()
        } else {
            tree.path.to_string()
        };

        let leaf = |label: String| ListingNode {
            label,
            children: Vec::new(),
        };
        let directories = tree.subdirectories.iter().map(|dir| {
            leaf(format!(
                "{} {}",
                emoji(config, "📁", "[D]"),
                dir.name
            ))
        });
        let files = tree
            .files
            .iter()
            .map(|file| leaf(format!("{} {}", emoji(config, "📄", "[F]"), file.name)));

        Self {
            label,
            children: directories.chain(files).collect(),
        }
    }
}

impl TreeItem for ListingNode {
    type Child = ListingNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
