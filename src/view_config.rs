//! # View Configuration
//!
//! A snapshot view only shows what its configuration ("config spec") selects.
//! This module renders the configuration for a branch, a label and a set of
//! roots, and applies it to a view through a `ToolRunner`.
//!
//! The document always has the same shape:
//!
//! ```text
//! element * CHECKEDOUT
//! element * /<branch>/<label>
//! load \<root>
//! ```
//!
//! with one `load` line per root, in the order given.

use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::defaults::{DEFAULT_BRANCH, DEFAULT_LABEL, DIRECTORY_SEPARATOR};
use crate::error::Result;
use crate::tool::{ToolInvocation, ToolRunner};

/// Branch, label and visible roots for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfiguration {
    branch: Option<String>,
    label: Option<String>,
    roots: Vec<String>,
}

impl ViewConfiguration {
    /// Builds a configuration. Empty branch or label strings count as absent.
    pub fn new<S: AsRef<str>>(branch: Option<&str>, label: Option<&str>, roots: &[S]) -> Self {
        let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            branch: non_empty(branch),
            label: non_empty(label),
            roots: roots.iter().map(|r| r.as_ref().to_string()).collect(),
        }
    }

    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Renders the configuration document.
    pub fn render(&self) -> String {
        let mut document = String::from("element * CHECKEDOUT\n");
        document.push_str(&format!("element * /{}/{}\n", self.branch(), self.label()));
        for root in &self.roots {
            document.push_str(&format!("load {}{}\n", DIRECTORY_SEPARATOR, root));
        }
        document
    }

    /// Writes the document to a temporary file and runs `setcs -force` on it
    /// from `view_root`.
    ///
    /// The temporary file is removed once the call returns, whether or not
    /// the tool succeeded; failing to remove it is ignored. A tool failure is
    /// returned unchanged.
    pub fn apply(&self, runner: &dyn ToolRunner, view_root: &Path) -> Result<()> {
        let document = self.render();
        debug!("Applying view configuration:\n{}", document);

        let mut file = NamedTempFile::new()?;
        file.write_all(document.as_bytes())?;
        file.flush()?;
        // Close the handle so the tool can open the file on every platform;
        // the path still deletes itself on drop.
        let config_path = file.into_temp_path();

        let config_arg = config_path.to_string_lossy().into_owned();
        let invocation =
            ToolInvocation::new("setcs", &["-force", config_arg.as_str()]).in_dir(view_root);
        runner.run(&invocation)?;
        Ok(())
    }
}
