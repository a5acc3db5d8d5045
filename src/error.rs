//! # Error Handling
//!
//! This module defines the centralized error type for `vobsync`. It uses the
//! `thiserror` library to create an `Error` enum covering every failure mode
//! of the synchronization engine, with enough context in each variant to
//! explain what went wrong.
//!
//! ## Taxonomy
//!
//! - **Configuration errors** (`Config`, `Usage`): detected before any
//!   subprocess is launched and never retried.
//! - **Tool failures** (`ToolLaunch`, `ToolFailed`): the external tool could not
//!   be started or exited with a non-zero code. `ToolFailed` carries the raw
//!   combined diagnostic text of the invocation.
//! - **Availability failures** (`NotAvailable`): produced only by connection
//!   validation so a host can report "provider unavailable" instead of an
//!   operation-specific error.
//! - **Export failures** (`Copy`): copying the local view to a destination.
//! - Wrapped I/O errors (`Io`).
//!
//! Cleanup failures (temporary configuration files, tool log files) never
//! become an `Error`.

use thiserror::Error;

/// Main error type for vobsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The provider settings are missing or invalid.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the settings
        hint: Option<String>,
    },

    /// A required argument was missing or malformed.
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// The external tool could not be started.
    #[error("Failed to launch tool for '{command}': {message}")]
    ToolLaunch { command: String, message: String },

    /// The external tool exited with a non-zero code.
    ///
    /// `output` is every collected output line followed by standard error with
    /// line breaks removed.
    #[error("Tool command '{command}' failed{}: {output}", exit_code.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    ToolFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The provider cannot reach the tool or the local view.
    #[error("Provider unavailable: {message}")]
    NotAvailable { message: String },

    /// Copying files out of the local view failed.
    #[error("Copy error: {src} -> {dst}: {message}")]
    Copy {
        src: String,
        dst: String,
        message: String,
    },

    /// The per-instance operation lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true when this error signals that the provider is unavailable.
    pub fn is_not_available(&self) -> bool {
        matches!(self, Error::NotAvailable { .. })
    }

    /// Returns true for errors raised before any tool invocation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::Usage { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
