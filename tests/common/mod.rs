//! Shared test utilities for the CLI end-to-end tests.
//!
//! The fixture lays out a temporary directory as:
//!
//! ```text
//! tools/cleartool   fake tool (shell script) plus its state files
//! repo/<ROOT>/...   content the fake tool "loads" into the view
//! view/             the snapshot view
//! ```
//!
//! The fake tool answers the commands vobsync issues (`hostinfo`, `lsvob`,
//! `setcs`, `update`, `ls`, `mklbtype`, `mklabel`), records every call in
//! `tools/calls.log`, and fails a command when `tools/fail_<command>` exists.

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::ViewFixture;
}

const FAKE_CLEARTOOL: &str = r#"#!/bin/sh
STATE="$(cd "$(dirname "$0")" && pwd -P)"
REPO="$STATE/../repo"
cmd="$1"
shift
echo "$cmd $*" >> "$STATE/calls.log"

if [ -f "$STATE/fail_$cmd" ]; then
    echo "partial output for $cmd"
    echo "cleartool: Error: $cmd failed" >&2
    exit 1
fi

case "$cmd" in
hostinfo)
    echo "buildhost: ClearCase 9.0.2.0 (Linux)"
    ;;
lsvob)
    for vob in "$REPO"/*; do
        [ -d "$vob" ] && printf '\\%s\n' "$(basename "$vob")"
    done
    exit 0
    ;;
setcs)
    cp "$2" "$STATE/configspec"
    pwd -P > "$STATE/view_root"
    sed -n 's/^load \\//p' "$2" | while read -r root; do
        mkdir -p "$root"
    done
    touch setcs.updt
    ;;
update)
    if [ "$(pwd -P)" = "$(cat "$STATE/view_root")" ]; then
        sed -n 's/^load \\//p' "$STATE/configspec" | while read -r root; do
            mkdir -p "$root"
            cp -R "$REPO/$root/." "$root/"
        done
    else
        root="$(basename "$(pwd -P)")"
        cp -R "$REPO/$root/." ./
    fi
    echo "Done loading \"$1\""
    touch "$(cat "$STATE/view_root")/update.updt"
    ;;
ls)
    root="$(basename "$(pwd -P)")"
    if [ -n "$2" ]; then
        dir="$REPO/$root/$2"
        prefix="$2/"
    else
        dir="$REPO/$root"
        prefix=""
        echo "directory version      lost+found@@/main/0          Rule: element * /main/LATEST"
    fi
    echo "Listing of $root"
    for entry in "$dir"/*; do
        [ -e "$entry" ] || continue
        name="$prefix$(basename "$entry")"
        if [ -d "$entry" ]; then
            echo "directory version      $name@@/main/1          Rule: element * /main/LATEST"
        else
            echo "version                $name@@/main/2          Rule: element * /main/LATEST"
        fi
    done
    ;;
mklbtype|mklabel)
    echo "$cmd $* in $(pwd -P)" >> "$STATE/labels.log"
    echo "Created $cmd \"$2\"."
    ;;
*)
    echo "cleartool: Error: Unrecognized command: \"$cmd\"" >&2
    exit 1
    ;;
esac
"#;

/// A temporary snapshot view driven by a fake `cleartool`.
pub struct ViewFixture {
    temp_dir: assert_fs::TempDir,
}

impl ViewFixture {
    /// Create the fixture with an empty repository.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("view")
            .create_dir_all()
            .expect("Failed to create view");
        temp_dir
            .child("repo")
            .create_dir_all()
            .expect("Failed to create repo");

        let tool = temp_dir.child("tools/cleartool");
        tool.write_str(FAKE_CLEARTOOL)
            .expect("Failed to write fake cleartool");
        make_executable(tool.path());

        Self { temp_dir }
    }

    /// Add a file under `repo/`, e.g. `VOB1/src/main.c`.
    pub fn with_repo_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("repo")
            .child(path)
            .write_str(content)
            .expect("Failed to write repo file");
        self
    }

    /// Make `command` exit with an error.
    #[allow(dead_code)]
    pub fn failing(self, command: &str) -> Self {
        self.temp_dir
            .child(format!("tools/fail_{}", command))
            .touch()
            .expect("Failed to create failure marker");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn tool_path(&self) -> PathBuf {
        self.path().join("tools").join("cleartool")
    }

    pub fn view_path(&self) -> PathBuf {
        self.path().join("view")
    }

    /// Commands the fake tool received, one per line.
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.path().join("tools").join("calls.log"))
    }

    /// The configuration document most recently applied.
    #[allow(dead_code)]
    pub fn config_spec(&self) -> String {
        fs::read_to_string(self.path().join("tools").join("configspec")).unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn label_log(&self) -> Vec<String> {
        read_lines(&self.path().join("tools").join("labels.log"))
    }

    /// A `vobsync` command wired to this fixture's tool and view.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = vobsync_cmd();
        cmd.current_dir(self.path())
            .arg("--tool-path")
            .arg(self.tool_path())
            .arg("--view-path")
            .arg(self.view_path());
        cmd
    }
}

impl Default for ViewFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A `vobsync` command with no settings inherited from the environment.
pub fn vobsync_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("vobsync").expect("vobsync binary is built");
    cmd.env_remove("VOBSYNC_TOOL_PATH")
        .env_remove("VOBSYNC_VIEW_PATH")
        .env_remove("VOBSYNC_BRANCH")
        .env("NO_COLOR", "1");
    cmd
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake cleartool executable");
}
