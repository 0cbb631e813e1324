//! Raw byte acquisition from the proc pseudo-filesystem.
//!
//! Parsers never touch the filesystem themselves. They receive the bytes a
//! [`ProcReader`] produced, which keeps them testable with plain strings and
//! lets the root be redirected (containers with a host `/proc` bind mount,
//! fixture trees in tests).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SysinfoError};

/// Default mount point of the proc pseudo-filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Reads whole pseudo-files and lists the pseudo-directory root.
pub trait ProcReader: Send + Sync {
    /// Returns the full content of `name`, relative to the root (e.g. `"net/dev"`).
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Returns the names of the root's immediate entries in enumeration order.
    fn list(&self) -> io::Result<Vec<String>>;

    /// Human-readable location of `name`, used in error messages.
    fn describe(&self, name: &str) -> String {
        name.to_string()
    }
}

/// [`ProcReader`] backed by the real filesystem under a root directory.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcReader for ProcFs {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(name))
    }

    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            // Non-UTF-8 names can never be PIDs
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn describe(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }
}

/// Reads `name` through `reader`, mapping OS failures to `SourceUnavailable`.
pub(crate) fn read_source(reader: &dyn ProcReader, name: &str) -> Result<Vec<u8>> {
    let bytes = reader
        .read(name)
        .map_err(|e| SysinfoError::unavailable(reader.describe(name), e))?;
    debug!("Read {} bytes from {}", bytes.len(), reader.describe(name));
    Ok(bytes)
}
