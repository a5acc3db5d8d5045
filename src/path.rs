//! Root path model for vobsync
//!
//! Caller-facing path strings address a repository root (the first segment)
//! and an optional path inside that root, e.g. `VOB1` or `VOB1\src\main.c`.
//! Both `\` and `/` are accepted when parsing; `\` is used when formatting.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::defaults::{ACCEPTED_SEPARATORS, DIRECTORY_SEPARATOR};

/// A repository root plus a path relative to it.
///
/// The empty value (both fields empty) addresses the top level, above all
/// roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RootPath {
    root: String,
    relative: String,
}

impl RootPath {
    /// Build a `RootPath` from its two parts without any normalization.
    pub fn new(root: impl Into<String>, relative: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            relative: relative.into(),
        }
    }

    /// Parse a path string, splitting off the first non-empty segment as the
    /// root.
    ///
    /// Empty components are dropped, so leading and duplicated separators
    /// vanish. An empty input yields the top-level path.
    pub fn parse(path: &str) -> Self {
        let mut segments = path.split(ACCEPTED_SEPARATORS).filter(|s| !s.is_empty());

        let root = match segments.next() {
            Some(root) => root.to_string(),
            None => return Self::default(),
        };

        let relative = segments
            .collect::<Vec<_>>()
            .join(&DIRECTORY_SEPARATOR.to_string());

        Self { root, relative }
    }

    /// Build a `RootPath` under `root` from a relative path that may use
    /// either separator.
    pub fn under(root: impl Into<String>, relative: &str) -> Self {
        Self {
            root: root.into(),
            relative: normalize_relative(relative),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// True for the top-level path that names no root.
    pub fn is_top_level(&self) -> bool {
        self.root.is_empty()
    }

    /// True when the path names a root but nothing inside it.
    pub fn is_root_only(&self) -> bool {
        !self.root.is_empty() && self.relative.is_empty()
    }

    /// Last segment of the path, or the root itself for root-only paths.
    pub fn name(&self) -> &str {
        if self.relative.is_empty() {
            return &self.root;
        }
        last_segment(&self.relative)
    }

    /// Relative part using the host platform's separator, as handed to the
    /// tool.
    pub fn native_relative(&self) -> String {
        self.relative
            .split(ACCEPTED_SEPARATORS)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(std::path::MAIN_SEPARATOR_STR)
    }

    /// Location of the root's directory inside a local view. The top-level
    /// path maps to the view root itself.
    pub fn local_root(&self, view_root: &Path) -> PathBuf {
        if self.root.is_empty() {
            return view_root.to_path_buf();
        }
        view_root.join(&self.root)
    }

    /// Location of this path inside a local view.
    pub fn local_path(&self, view_root: &Path) -> PathBuf {
        let mut path = self.local_root(view_root);
        for segment in self
            .relative
            .split(ACCEPTED_SEPARATORS)
            .filter(|s| !s.is_empty())
        {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for RootPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative.is_empty() {
            write!(f, "{}", self.root)
        } else {
            write!(f, "{}{}{}", self.root, DIRECTORY_SEPARATOR, self.relative)
        }
    }
}

impl From<&str> for RootPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Rewrite a relative path with `\` separators and no empty components.
pub fn normalize_relative(path: &str) -> String {
    path.split(ACCEPTED_SEPARATORS)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(&DIRECTORY_SEPARATOR.to_string())
}

/// Final segment of a path string, accepting either separator.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches(ACCEPTED_SEPARATORS)
        .rsplit(ACCEPTED_SEPARATORS)
        .next()
        .unwrap_or_default()
}
