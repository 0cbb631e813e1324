//! Process scanning utilities for discovering process entries in /proc.
//!
//! Every running process has a directory named after its PID under the
//! proc root. Everything else there (`self`, `thread-self`, `meminfo`, ...)
//! is skipped.

use tracing::debug;

use crate::error::{Result, SysinfoError};
use crate::source::ProcReader;

/// Lists the PIDs of all processes visible under the proc root.
///
/// The order is the directory enumeration order, which is not sorted.
pub fn list_process_ids(reader: &dyn ProcReader) -> Result<Vec<u32>> {
    let names = reader
        .list()
        .map_err(|e| SysinfoError::unavailable(reader.describe(""), e))?;
    let pids = filter_process_ids(names.iter().map(String::as_str));
    debug!("Found {} process entries out of {}", pids.len(), names.len());
    Ok(pids)
}

/// Keeps the names that are entirely a non-negative base-10 integer.
pub fn filter_process_ids<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<u32> {
    names
        .into_iter()
        .filter(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|name| name.parse().ok())
        .collect()
}
