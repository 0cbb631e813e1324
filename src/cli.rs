//! CLI arguments and subcommands for herakles-sysinfo.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Output format for collected records
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Configuration format options for --show-config
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-sysinfo",
    about = "Print typed Linux host metrics parsed from /proc and kernel syscalls",
    long_about = "Print typed Linux host metrics parsed from /proc and kernel syscalls.\n\n\
                  Reads memory, CPU, load, uptime, network, disk, process and kernel \
                  information in a single pass and prints it as JSON or YAML.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (logs go to stderr, default: warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Root of the proc pseudo-filesystem
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Output format for collected records
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands selecting which record to print
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Every record in one document (default)
    Snapshot,

    /// /proc/meminfo
    Memory,

    /// /proc/stat (per-CPU time buckets and usage)
    Stat,

    /// /proc/cpuinfo
    Cpuinfo,

    /// /proc/loadavg
    Load,

    /// /proc/uptime
    Uptime,

    /// /proc/vmstat
    Vmstat,

    /// /proc/net/dev
    Network,

    /// /proc/diskstats
    Disks {
        /// Skip loop, ram and zram devices
        #[arg(long)]
        physical_only: bool,
    },

    /// Process IDs under the proc root
    Pids {
        /// Sort ascending instead of directory order
        #[arg(long)]
        sorted: bool,
    },

    /// Kernel identity from uname(2)
    Kernel,

    /// System counters from sysinfo(2)
    System,

    /// Network interfaces and addresses
    Interfaces,

    /// Filesystem capacity from statvfs(3)
    Filesystem {
        /// Paths to query (defaults to the configured filesystem_paths)
        paths: Vec<String>,
    },

    /// Try every reader and report which ones work
    Check,
}
