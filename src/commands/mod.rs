//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `vobsync`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments, derived
//!   using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global
//!   options, builds a `Synchronizer` and calls into the `vobsync` library.

pub mod cat;
pub mod get;
pub mod label;
pub mod ls;
pub mod validate;
