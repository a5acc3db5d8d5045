//! Default values and fixed vocabulary for vobsync.
//!
//! This module provides centralized constants used across the library and
//! the CLI, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Separator used in caller-facing path strings.
pub const DIRECTORY_SEPARATOR: char = '\\';

/// Characters accepted as separators when parsing path strings.
pub const ACCEPTED_SEPARATORS: [char; 2] = ['\\', '/'];

/// Branch selected when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Label selected when none is requested.
pub const DEFAULT_LABEL: &str = "LATEST";

/// Glob for the log files the tool leaves behind in the view root.
pub const TOOL_LOG_PATTERN: &str = "*.updt";

/// Entry name the listing never reports.
pub const RESERVED_ENTRY_NAME: &str = "lost+found";

/// Default settings file looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".vobsync.yaml";

/// Returns the per-user settings file used when no local one exists.
///
/// Uses the platform configuration directory:
/// - Linux: `~/.config/vobsync/config.yaml`
/// - macOS: `~/Library/Application Support/vobsync/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\vobsync\config.yaml`
///
/// Falls back to `.vobsync.yaml` in the current directory if the platform
/// directory cannot be determined.
pub fn default_user_config() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("vobsync").join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}
