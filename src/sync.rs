//! # Snapshot Synchronization
//!
//! This module provides the `Synchronizer`, the high-level interface the host
//! uses to browse, read, fetch and label content of a ClearCase snapshot
//! view as if it were a plain path-addressed tree.
//!
//! ## Design
//!
//! Every operation follows the same outline:
//!
//! 1.  Resolve the caller's path string into a `RootPath`.
//! 2.  Apply a view configuration that loads only the roots the operation
//!     needs.
//! 3.  Run `update` (or `ls -long`) through the `ToolRunner`.
//! 4.  Read, parse or copy what ended up in the local view.
//!
//! The local view and its configuration are one shared, mutable resource, so
//! a `Synchronizer` serializes its public operations behind a mutex. Nothing
//! is cached between calls; each call goes back to the tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use walkdir::WalkDir;

use crate::defaults::DIRECTORY_SEPARATOR;
use crate::error::{Error, Result};
use crate::listing::DirectoryTree;
use crate::path::RootPath;
use crate::settings::Settings;
use crate::tool::{ClearTool, ExecutionListener, ToolRunner};
use crate::view_config::ViewConfiguration;

const DESCRIPTION: &str =
    "Provides functionality for getting files, browsing folders, and applying labels in Rational ClearCase.";

/// The main entry point for working with a snapshot view.
pub struct Synchronizer {
    settings: Settings,
    runner: Box<dyn ToolRunner>,
    lock: Mutex<()>,
}

impl Synchronizer {
    /// Creates a `Synchronizer` that runs the configured `cleartool` and
    /// reports executions through the `log` facade.
    pub fn new(settings: Settings) -> Self {
        let runner = ClearTool::new(&settings.tool_path, Some(settings.view_path.clone()));
        Self::with_runner(settings, Box::new(runner))
    }

    /// Creates a `Synchronizer` whose executions are reported to `listener`.
    pub fn with_listener(settings: Settings, listener: Arc<dyn ExecutionListener>) -> Self {
        let runner = ClearTool::new(&settings.tool_path, Some(settings.view_path.clone()))
            .with_listener(listener);
        Self::with_runner(settings, Box::new(runner))
    }

    /// Creates a `Synchronizer` on top of a custom `ToolRunner`.
    pub fn with_runner(settings: Settings, runner: Box<dyn ToolRunner>) -> Self {
        Self {
            settings,
            runner,
            lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn describe(&self) -> &'static str {
        DESCRIPTION
    }

    /// Always true; use `validate_connection` to actually probe the tool.
    pub fn is_available(&self) -> bool {
        true
    }

    pub fn directory_separator(&self) -> char {
        DIRECTORY_SEPARATOR
    }

    /// Lists the names of all repository roots (VOBs).
    pub fn list_roots(&self) -> Result<Vec<String>> {
        let _guard = self.acquire()?;
        self.settings.validate()?;
        self.discover_roots()
    }

    /// Lists one directory of the virtual tree.
    ///
    /// An empty `source_path` lists the roots themselves, each as a directory
    /// with no contents filled in.
    pub fn list_directory(&self, source_path: &str) -> Result<DirectoryTree> {
        let _guard = self.acquire()?;
        self.settings.validate()?;

        let path = RootPath::parse(source_path);
        if path.is_top_level() {
            let roots = self.discover_roots()?;
            return Ok(DirectoryTree::top_level(&roots));
        }

        ViewConfiguration::new(None, None, &[path.root()])
            .apply(self.runner.as_ref(), self.view_root())?;

        let local_root = path.local_root(self.view_root());
        fs::create_dir_all(&local_root)?;

        let relative = path.native_relative();
        let mut args = vec!["-long"];
        if !relative.is_empty() {
            args.push(relative.as_str());
        }
        let lines = self
            .runner
            .run_command(Some(local_root.as_path()), "ls", &args)?;

        Ok(DirectoryTree::from_listing(&path, &lines))
    }

    /// Loads one file into the view and returns its contents.
    pub fn read_file(&self, file_path: &str) -> Result<Vec<u8>> {
        let _guard = self.acquire()?;
        self.settings.validate()?;

        let path = RootPath::parse(file_path);
        if path.relative().is_empty() {
            return Err(Error::Usage {
                message: format!("'{}' does not name a file inside a root", file_path),
            });
        }

        ViewConfiguration::new(None, None, &[path.root()])
            .apply(self.runner.as_ref(), self.view_root())?;

        let local_root = path.local_root(self.view_root());
        let relative = path.native_relative();
        self.runner
            .run_command(Some(local_root.as_path()), "update", &[relative.as_str()])?;

        let local_path = path.local_path(self.view_root());
        debug!("Reading {}", local_path.display());
        Ok(fs::read(local_path)?)
    }

    /// Updates the view to the latest version on the configured branch and
    /// copies `source_path` to `destination` when one is given.
    ///
    /// Without a destination only the local view is refreshed.
    pub fn fetch_latest(&self, source_path: &str, destination: Option<&Path>) -> Result<()> {
        let _guard = self.acquire()?;
        self.settings.validate()?;
        self.get_files(source_path, destination, None)
    }

    /// Same as `fetch_latest`, selecting the versions carrying `label`.
    pub fn fetch_labeled(
        &self,
        label: &str,
        source_path: &str,
        destination: Option<&Path>,
    ) -> Result<()> {
        let _guard = self.acquire()?;
        self.settings.validate()?;
        let label = (!label.is_empty()).then_some(label);
        self.get_files(source_path, destination, label)
    }

    /// Labels everything under `source_path` at the tip of the configured
    /// branch.
    pub fn apply_label(&self, label: &str, source_path: &str) -> Result<()> {
        if label.is_empty() {
            return Err(Error::Usage {
                message: "A label is required.".to_string(),
            });
        }

        let _guard = self.acquire()?;
        self.settings.validate()?;

        self.get_files(source_path, None, None)?;

        let local_path = RootPath::parse(source_path).local_path(self.view_root());
        self.runner
            .run_command(Some(local_path.as_path()), "mklbtype", &["-nc", label])?;
        self.runner
            .run_command(Some(local_path.as_path()), "mklabel", &["-recurse", label, "."])?;
        Ok(())
    }

    /// Checks that the tool and the view are usable.
    ///
    /// Every failure is reported as `Error::NotAvailable`.
    pub fn validate_connection(&self) -> Result<()> {
        let _guard = self.acquire()?;

        let tool_path = &self.settings.tool_path;
        let view_path = &self.settings.view_path;

        if tool_path.as_os_str().is_empty() {
            return Err(not_available("Executable path is required."));
        }
        if view_path.as_os_str().is_empty() {
            return Err(not_available("View path is required."));
        }
        if !is_executable(tool_path) {
            return Err(not_available(&format!(
                "The file '{}' either does not exist or is not an accessible executable.",
                tool_path.display()
            )));
        }
        if !view_path.is_dir() {
            return Err(not_available(&format!(
                "The view path '{}' either does not exist or is not accessible.",
                view_path.display()
            )));
        }

        self.runner
            .run_command(None, "hostinfo", &[])
            .and_then(|_| self.runner.run_command(None, "lsvob", &["-short"]))
            .map_err(|e| not_available(&e.to_string()))?;
        Ok(())
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| Error::LockPoisoned {
            context: "view operation lock".to_string(),
        })
    }

    fn view_root(&self) -> &Path {
        &self.settings.view_path
    }

    fn discover_roots(&self) -> Result<Vec<String>> {
        let lines = self.runner.run_command(None, "lsvob", &["-short"])?;
        Ok(lines
            .iter()
            .map(|line| line.trim_matches(['\\', '/']).to_string())
            .filter(|root| !root.is_empty())
            .collect())
    }

    fn get_files(
        &self,
        source_path: &str,
        destination: Option<&Path>,
        label: Option<&str>,
    ) -> Result<()> {
        let destination = destination.filter(|d| !d.as_os_str().is_empty());
        if let Some(dest) = destination {
            fs::create_dir_all(dest)?;
            ensure_outside_view(self.view_root(), dest)?;
        }

        let branch = self.settings.branch();
        let path = RootPath::parse(source_path);

        if path.is_top_level() {
            let roots = self.discover_roots()?;
            ViewConfiguration::new(branch, label, &roots)
                .apply(self.runner.as_ref(), self.view_root())?;
            self.runner
                .run_command(Some(self.view_root()), "update", &["."])?;

            if let Some(dest) = destination {
                copy_tree(self.view_root(), dest)?;
            }
            return Ok(());
        }

        ViewConfiguration::new(branch, label, &[path.root()])
            .apply(self.runner.as_ref(), self.view_root())?;

        let local_root = path.local_root(self.view_root());
        let relative = path.native_relative();
        let target = if relative.is_empty() { "." } else { relative.as_str() };
        self.runner
            .run_command(Some(local_root.as_path()), "update", &[target])?;

        if let Some(dest) = destination {
            copy_tree(&path.local_path(self.view_root()), dest)?;
        }
        Ok(())
    }
}

fn not_available(message: &str) -> Error {
    Error::NotAvailable {
        message: message.to_string(),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Copies `src` into the directory `dst`.
///
/// A directory has its contents copied recursively; a single file is copied
/// into `dst` under its own name.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fn copy_error(from: &Path, to: &Path, message: String) -> Error {
        Error::Copy {
            src: from.display().to_string(),
            dst: to.display().to_string(),
            message,
        }
    }

    if src.is_file() {
        let file_name = src
            .file_name()
            .ok_or_else(|| copy_error(src, dst, "source has no file name".to_string()))?;
        let target = dst.join(file_name);
        fs::copy(src, &target).map_err(|e| copy_error(src, &target, e.to_string()))?;
        return Ok(());
    }

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| copy_error(src, dst, e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| copy_error(entry.path(), dst, e.to_string()))?;
        let target: PathBuf = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| copy_error(entry.path(), &target, e.to_string()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| copy_error(entry.path(), parent, e.to_string()))?;
        }
        // Links are not followed while walking; recreate them as links.
        let copied = if entry.file_type().is_symlink() {
            copy_link(entry.path(), &target)
        } else {
            fs::copy(entry.path(), &target).map(|_| ())
        };
        copied.map_err(|e| copy_error(entry.path(), &target, e.to_string()))?;
    }
    Ok(())
}

fn copy_link(src: &Path, dst: &Path) -> std::io::Result<()> {
    let link_target = fs::read_link(src)?;
    if fs::symlink_metadata(dst).is_ok() {
        fs::remove_file(dst)?;
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&link_target, dst)
    }
    #[cfg(windows)]
    {
        if src.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, dst)
        } else {
            std::os::windows::fs::symlink_file(&link_target, dst)
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("cannot recreate link to {}", link_target.display()),
        ))
    }
}

/// Fails when `destination` lies inside the view, where exporting the view
/// would copy its own output.
fn ensure_outside_view(view_root: &Path, destination: &Path) -> Result<()> {
    let (Ok(view), Ok(dest)) = (fs::canonicalize(view_root), fs::canonicalize(destination))
    else {
        return Ok(());
    };
    if dest.starts_with(&view) {
        return Err(Error::Usage {
            message: format!(
                "Destination '{}' is inside the view '{}'",
                destination.display(),
                view_root.display()
            ),
        });
    }
    Ok(())
}
