//! # External Tool Invocation
//!
//! This module runs the version-control command-line tool (`cleartool`) as a
//! child process and turns its output into lines the rest of the library can
//! consume.
//!
//! ## Design
//!
//! Invocations go through the `ToolRunner` trait so the synchronization logic
//! can be exercised against a recording mock in tests. The production runner,
//! `ClearTool`:
//!
//! 1. Announces the invocation to an `ExecutionListener` (audit hook).
//! 2. Spawns the tool with piped standard output and standard error, without
//!    an intermediate shell.
//! 3. Streams standard output line by line on the calling thread while a
//!    dedicated thread drains standard error, so neither pipe can fill up and
//!    stall the child.
//! 4. Waits for the process only after standard output reached end of file,
//!    then checks the exit code.
//! 5. Sweeps the tool's `*.updt` log files out of the view root on every exit
//!    path, ignoring any error while doing so.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use log::{debug, info, trace};

use crate::defaults::TOOL_LOG_PATTERN;
use crate::error::{Error, Result};

/// One call of the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Directory the tool runs in; inherits the caller's when `None`.
    pub working_dir: Option<PathBuf>,
    /// Command verb, passed as the first argument.
    pub command: String,
    /// Positional arguments following the verb.
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new<S: AsRef<str>>(command: &str, args: &[S]) -> Self {
        Self {
            working_dir: None,
            command: command.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    /// Run the invocation in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Printable command line: the verb followed by each argument in double
    /// quotes.
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote_arg(arg));
        }
        line
    }
}

/// Wrap an argument in double quotes, escaping embedded quotes.
pub fn quote_arg(arg: &str) -> String {
    format!("\"{}\"", arg.replace('"', "\\\""))
}

/// Receives a notification before every tool process is started.
pub trait ExecutionListener: Send + Sync {
    fn command_executing(&self, exe_path: &Path, invocation: &ToolInvocation);
}

/// Listener that reports executions through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl ExecutionListener for LogListener {
    fn command_executing(&self, exe_path: &Path, invocation: &ToolInvocation) {
        match &invocation.working_dir {
            Some(dir) => info!(
                "Executing {} {} (in {})",
                exe_path.display(),
                invocation.command_line(),
                dir.display()
            ),
            None => info!("Executing {} {}", exe_path.display(), invocation.command_line()),
        }
    }
}

/// Trait for running the external tool - allows mocking in tests
pub trait ToolRunner: Send + Sync {
    /// Runs one invocation and returns its non-empty, trimmed output lines in
    /// order.
    fn run(&self, invocation: &ToolInvocation) -> Result<Vec<String>>;

    /// Convenience wrapper building the invocation in place.
    fn run_command(
        &self,
        working_dir: Option<&Path>,
        command: &str,
        args: &[&str],
    ) -> Result<Vec<String>> {
        let mut invocation = ToolInvocation::new(command, args);
        if let Some(dir) = working_dir {
            invocation = invocation.in_dir(dir);
        }
        self.run(&invocation)
    }
}

/// Runs the real `cleartool` executable.
///
/// Invocations block until the process exits; there is no timeout.
pub struct ClearTool {
    exe_path: PathBuf,
    view_path: Option<PathBuf>,
    listener: Arc<dyn ExecutionListener>,
}

impl ClearTool {
    /// Creates a runner for the executable at `exe_path`. Log files are swept
    /// from `view_path` after each invocation when it is given.
    pub fn new(exe_path: impl Into<PathBuf>, view_path: Option<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
            view_path,
            listener: Arc::new(LogListener),
        }
    }

    /// Replaces the default logging listener.
    pub fn with_listener(mut self, listener: Arc<dyn ExecutionListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe_path
    }

    fn execute(&self, invocation: &ToolInvocation) -> Result<Vec<String>> {
        let mut command = Command::new(&self.exe_path);
        command
            .arg(&invocation.command)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        self.listener.command_executing(&self.exe_path, invocation);

        let launch_error = |message: String| Error::ToolLaunch {
            command: invocation.command.clone(),
            message,
        };

        let mut child = command
            .spawn()
            .map_err(|e| launch_error(format!("{}: {}", self.exe_path.display(), e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| launch_error("standard output was not captured".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| launch_error("standard error was not captured".to_string()))?;

        let stderr_reader = thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stderr.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        });

        let mut lines = Vec::new();
        let mut read_error = None;
        for chunk in BufReader::new(stdout).split(b'\n') {
            match chunk {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let line = text.trim();
                    if !line.is_empty() {
                        debug!("{}: {}", invocation.command, line);
                        lines.push(line.to_string());
                    }
                }
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }
        }

        let status = child.wait()?;
        let stderr_text = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            let mut output = lines.concat();
            output.push_str(&stderr_text.replace(['\r', '\n'], ""));
            return Err(Error::ToolFailed {
                command: invocation.command.clone(),
                exit_code: status.code(),
                output,
            });
        }

        if let Some(e) = read_error {
            return Err(e.into());
        }

        Ok(lines)
    }
}

impl ToolRunner for ClearTool {
    fn run(&self, invocation: &ToolInvocation) -> Result<Vec<String>> {
        let _sweeper = LogSweeper {
            view_root: self.view_path.as_deref(),
        };
        self.execute(invocation)
    }
}

/// Removes tool log files from the view root when dropped.
struct LogSweeper<'a> {
    view_root: Option<&'a Path>,
}

impl Drop for LogSweeper<'_> {
    fn drop(&mut self) {
        if let Some(root) = self.view_root {
            sweep_tool_logs(root);
        }
    }
}

/// Deletes `*.updt` files directly under `view_root`. Every failure is
/// ignored.
pub fn sweep_tool_logs(view_root: &Path) {
    let Some(root) = view_root.to_str() else {
        return;
    };
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(root.trim_end_matches(['/', '\\'])),
        TOOL_LOG_PATTERN
    );

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            trace!("Skipping log sweep of {}: {}", view_root.display(), e);
            return;
        }
    };

    for log_file in entries.flatten() {
        if let Err(e) = fs::remove_file(&log_file) {
            trace!("Could not remove {}: {}", log_file.display(), e);
        }
    }
}
