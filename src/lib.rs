//! # vobsync
//!
//! This library lets a release-automation host treat a ClearCase snapshot
//! view as a path-addressable tree: browse roots and directories, read single
//! files, refresh or export the view for a branch or label, and apply labels.
//! It is used by the `vobsync` command-line tool but can be embedded directly.
//!
//! ## Quick Example
//!
//! ```
//! use vobsync::listing::DirectoryTree;
//! use vobsync::path::RootPath;
//!
//! // Caller-facing paths are "root" or "root\relative\path"
//! let path = RootPath::parse("VOB1\\src\\main.c");
//! assert_eq!(path.root(), "VOB1");
//! assert_eq!(path.relative(), "src\\main.c");
//!
//! // Turn `cleartool ls -long` output into a typed tree
//! let lines = [
//!     "directory version      lib@@/main/3         Rule: element * /main/LATEST",
//!     "version                main.c@@/main/7      Rule: element * /main/LATEST",
//! ];
//! let tree = DirectoryTree::from_listing(&RootPath::parse("VOB1"), &lines);
//! assert_eq!(tree.subdirectories[0].name, "lib");
//! assert_eq!(tree.files[0].path.to_string(), "VOB1\\main.c");
//! ```
//!
//! ## Core Concepts
//!
//! - **Paths (`path`)**: split path strings into a root (VOB) and a relative
//!   path, and map them onto the local view.
//! - **Tool invocation (`tool`)**: run `cleartool`, stream its output and
//!   clean up its log files.
//! - **View configuration (`view_config`)**: choose branch, label and loaded
//!   roots for the view.
//! - **Listings (`listing`)**: parse long-format listings into directories and
//!   files.
//! - **Synchronization (`sync`)**: the `Synchronizer` operations the host
//!   calls.
//! - **Settings (`settings`)**: tool path, view path and branch supplied by
//!   the host.

pub mod defaults;
pub mod error;
pub mod listing;
pub mod output;
pub mod path;
pub mod settings;
pub mod sync;
pub mod tool;
pub mod view_config;

#[cfg(test)]
mod path_proptest;
