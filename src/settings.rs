//! # Provider Settings
//!
//! The three values a host supplies to the synchronization engine: the path
//! of the `cleartool` executable, the root of the local snapshot view, and
//! the branch to work against.
//!
//! Settings can be read from a YAML file:
//!
//! ```yaml
//! tool-path: /opt/rational/clearcase/bin/cleartool
//! view-path: /views/build_snap
//! branch: release_2
//! ```
//!
//! Values given on the command line or in the environment override what the
//! file provides (see `Settings::merge`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Host-supplied configuration for a `Synchronizer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Full path to the `cleartool` executable.
    #[serde(default)]
    pub tool_path: PathBuf,

    /// Root directory of the snapshot view.
    #[serde(default)]
    pub view_path: PathBuf,

    /// Branch to select; `main` when unset or empty.
    #[serde(default, rename = "branch")]
    pub branch_name: Option<String>,
}

impl Settings {
    pub fn new(
        tool_path: impl Into<PathBuf>,
        view_path: impl Into<PathBuf>,
        branch_name: Option<&str>,
    ) -> Self {
        Self {
            tool_path: tool_path.into(),
            view_path: view_path.into(),
            branch_name: branch_name.map(str::to_string),
        }
    }

    /// The configured branch, treating an empty string as unset.
    pub fn branch(&self) -> Option<&str> {
        self.branch_name.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Checks that both paths are present.
    ///
    /// Existence on disk is not checked here; that is the job of connection
    /// validation.
    pub fn validate(&self) -> Result<()> {
        if self.tool_path.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "Executable path is required.".to_string(),
                hint: Some("Set 'tool-path' or pass --tool-path".to_string()),
            });
        }
        if self.view_path.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "View path is required.".to_string(),
                hint: Some("Set 'view-path' or pass --view-path".to_string()),
            });
        }
        Ok(())
    }

    /// Overlays non-empty values from `overrides`.
    pub fn merge(mut self, overrides: Settings) -> Self {
        if !overrides.tool_path.as_os_str().is_empty() {
            self.tool_path = overrides.tool_path;
        }
        if !overrides.view_path.as_os_str().is_empty() {
            self.view_path = overrides.view_path;
        }
        if overrides.branch_name.is_some() {
            self.branch_name = overrides.branch_name;
        }
        self
    }
}

/// Parse settings from a YAML string.
pub fn parse(yaml: &str) -> Result<Settings> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::Config {
        message: format!("Invalid settings: {}", e),
        hint: None,
    })
}

/// Load settings from a YAML file.
pub fn from_file(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
        hint: Some("Create the file or pass --tool-path and --view-path".to_string()),
    })?;
    parse(&content)
}
