//! Configuration management for herakles-sysinfo.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use clap::ValueEnum;
use herakles_sysinfo::DEFAULT_PROC_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_FILESYSTEM_PATH: &str = "/";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the proc pseudo-filesystem
    #[serde(alias = "proc-root")]
    pub proc_root: Option<String>,

    /// Mount points reported by the snapshot and filesystem commands
    #[serde(alias = "filesystem-paths")]
    pub filesystem_paths: Option<Vec<String>>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(DEFAULT_PROC_ROOT.to_string()),
            filesystem_paths: Some(vec![DEFAULT_FILESYSTEM_PATH.to_string()]),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    pub fn proc_root(&self) -> &str {
        self.proc_root.as_deref().unwrap_or(DEFAULT_PROC_ROOT)
    }

    pub fn filesystem_paths(&self) -> Vec<String> {
        self.filesystem_paths
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_FILESYSTEM_PATH.to_string()])
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.proc_root().trim().is_empty() {
        return Err("proc_root must not be empty".into());
    }

    for path in cfg.filesystem_paths.iter().flatten() {
        if !Path::new(path).is_absolute() {
            return Err(format!("filesystem path '{}' must be absolute", path).into());
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_str(level, true).is_err() {
            return Err(format!(
                "Invalid log_level '{}', expected off/error/warn/info/debug/trace",
                level
            )
            .into());
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.to_string_lossy().to_string());
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        if !p.exists() {
            return Err(format!("Config file not found: {}", p.display()).into());
        }
        p.to_path_buf()
    } else {
        // Try default locations
        let defaults = [
            "/etc/herakles/sysinfo.yaml",
            "/etc/herakles/sysinfo.yml",
            "/etc/herakles/sysinfo.json",
            "./herakles-sysinfo.yaml",
            "./herakles-sysinfo.yml",
            "./herakles-sysinfo.json",
        ];

        match defaults.iter().find(|p| Path::new(p).exists()) {
            Some(found) => PathBuf::from(found),
            None => return Ok(Config::default()),
        }
    };

    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content, path.extension().and_then(|s| s.to_str()))?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses config text; the extension picks the format, YAML otherwise.
pub fn parse_config(
    content: &str,
    extension: Option<&str>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match extension {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Renders configuration in requested format
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}
