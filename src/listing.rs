//! # Directory Listings
//!
//! Parses the output of `cleartool ls -long` into typed entries and groups
//! them into a `DirectoryTree`.
//!
//! A long listing line looks like:
//!
//! ```text
//! directory version      src@@/main/4                 Rule: element * /main/LATEST
//! version                Makefile@@/main/12           Rule: element * /main/LATEST
//! ```
//!
//! The line is split into an attribute prefix (whitespace separated words,
//! then at least one more whitespace) and a name that runs up to the `@@`
//! version marker. Anything after the marker is ignored. Lines that do not
//! have that shape produce no entry.

use std::sync::LazyLock;

use regex::Regex;

use crate::defaults::RESERVED_ENTRY_NAME;
use crate::path::{last_segment, RootPath};

static LS_LONG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:\S+\s)+)\s+(\S+)@@\S*").expect("listing pattern is a valid regex")
});

/// A directory found in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: RootPath,
}

/// A file found in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: RootPath,
}

/// One parsed listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory(DirectoryEntry),
    File(FileEntry),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Directory(dir) => &dir.name,
            Entry::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &RootPath {
        match self {
            Entry::Directory(dir) => &dir.path,
            Entry::File(file) => &file.path,
        }
    }
}

/// Parse one `ls -long` line taken under `root`.
///
/// Returns `None` when the line does not match the listing grammar.
pub fn parse_line(line: &str, root: &str) -> Option<Entry> {
    let captures = LS_LONG_LINE.captures(line)?;
    let attributes = captures.get(1)?.as_str();
    let name_token = captures.get(2)?.as_str();

    let name = last_segment(name_token).to_string();
    let path = RootPath::under(root, name_token);

    if attributes.contains("directory") {
        Some(Entry::Directory(DirectoryEntry { name, path }))
    } else {
        Some(Entry::File(FileEntry { name, path }))
    }
}

/// Contents of one directory of the virtual tree.
///
/// `subdirectories` are returned without contents of their own; list them
/// again to descend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    pub name: String,
    pub path: RootPath,
    pub subdirectories: Vec<DirectoryEntry>,
    pub files: Vec<FileEntry>,
}

impl DirectoryTree {
    /// The top level of the virtual tree: one directory per root, no files.
    pub fn top_level<S: AsRef<str>>(roots: &[S]) -> Self {
        let subdirectories = roots
            .iter()
            .map(|root| DirectoryEntry {
                name: root.as_ref().to_string(),
                path: RootPath::new(root.as_ref(), ""),
            })
            .collect();

        Self {
            subdirectories,
            ..Self::default()
        }
    }

    /// Builds the tree for `path` from raw listing lines.
    ///
    /// Unparsable lines are skipped and `lost+found` never appears. Entries
    /// keep their listing order.
    pub fn from_listing<S: AsRef<str>>(path: &RootPath, lines: &[S]) -> Self {
        let mut tree = Self {
            name: path.name().to_string(),
            path: path.clone(),
            ..Self::default()
        };

        for entry in lines
            .iter()
            .filter_map(|line| parse_line(line.as_ref(), path.root()))
        {
            if entry.name() == RESERVED_ENTRY_NAME {
                continue;
            }
            match entry {
                Entry::Directory(dir) => tree.subdirectories.push(dir),
                Entry::File(file) => tree.files.push(file),
            }
        }

        tree
    }

    pub fn is_empty(&self) -> bool {
        self.subdirectories.is_empty() && self.files.is_empty()
    }
}
