//! Filesystem capacity collector.
//!
//! This module queries `statvfs(3)` for a path and converts the block counts
//! into byte counts.

use std::ffi::CString;
use std::io;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SysinfoError};

/// Capacity of the filesystem containing `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemCapacity {
    pub path: String,
    /// Fragment size used to scale the block counts.
    pub block_size: u64,
    pub total_bytes: u64,
    pub free_bytes: u64,
    /// Free bytes available to unprivileged users.
    pub available_bytes: u64,
    pub inodes: u64,
    pub free_inodes: u64,
}

impl FilesystemCapacity {
    /// Builds a record from raw `statvfs` block and inode counts.
    pub fn from_blocks(
        path: &str,
        block_size: u64,
        blocks: u64,
        blocks_free: u64,
        blocks_available: u64,
        inodes: u64,
        free_inodes: u64,
    ) -> Self {
        Self {
            path: path.to_string(),
            block_size,
            total_bytes: blocks.saturating_mul(block_size),
            free_bytes: blocks_free.saturating_mul(block_size),
            available_bytes: blocks_available.saturating_mul(block_size),
            inodes,
            free_inodes,
        }
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }
}

/// Reads the capacity of the filesystem mounted at or containing `path`.
pub fn read_filesystem_capacity(path: &str) -> Result<FilesystemCapacity> {
    let c_path = CString::new(path).map_err(|e| {
        SysinfoError::unavailable(
            format!("statvfs({})", path),
            io::Error::new(io::ErrorKind::InvalidInput, e),
        )
    })?;

    // SAFETY: libc::statvfs is plain integer data, valid when zeroed
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is writable
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        return Err(SysinfoError::unavailable(
            format!("statvfs({})", path),
            io::Error::last_os_error(),
        ));
    }

    let capacity = FilesystemCapacity::from_blocks(
        path,
        stat.f_frsize as u64,
        stat.f_blocks as u64,
        stat.f_bfree as u64,
        stat.f_bavail as u64,
        stat.f_files as u64,
        stat.f_ffree as u64,
    );
    debug!(
        "statvfs({}): total={} available={}",
        path, capacity.total_bytes, capacity.available_bytes
    );
    Ok(capacity)
}
