//! Support library for the `chainconf` command-line tool.
//!
//! Loads the optional TOML settings file and renders resolver output for the
//! terminal.

pub mod config;
pub mod report;
