//! CLI command implementations for herakles-sysinfo.
//!
//! This module provides implementations for all CLI subcommands:
//! - `check`: Source and configuration validation
//! - `show`: Record printing for every other subcommand

pub mod check;
pub mod show;

// Re-export command functions
pub use check::command_check;
pub use show::command_show;
