//! `/proc/meminfo` parser.
//!
//! Format: one `Key:   value kB` pair per line. Only the keys listed in
//! [`MemoryInfo`] are read; everything else the kernel adds is skipped.

use serde::{Deserialize, Serialize};

use super::{as_text, malformed, parse_int, split_key_value};
use crate::error::Result;

const FILE: &str = "meminfo";

/// Memory counters in kilobytes as reported by `/proc/meminfo`.
///
/// A counter is `None` when its key did not appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub total: Option<i64>,
    pub free: Option<i64>,
    /// Estimate of memory available for new workloads without swapping.
    pub available: Option<i64>,
    pub buffered: Option<i64>,
    pub cached: Option<i64>,
    pub swap_cached: Option<i64>,
    pub swap_total: Option<i64>,
    pub swap_free: Option<i64>,
}

impl MemoryInfo {
    fn slot(&mut self, key: &str) -> Option<&mut Option<i64>> {
        match key {
            "MemTotal" => Some(&mut self.total),
            "MemFree" => Some(&mut self.free),
            "MemAvailable" => Some(&mut self.available),
            "Buffers" => Some(&mut self.buffered),
            "Cached" => Some(&mut self.cached),
            "SwapCached" => Some(&mut self.swap_cached),
            "SwapTotal" => Some(&mut self.swap_total),
            "SwapFree" => Some(&mut self.swap_free),
            _ => None,
        }
    }
}

/// Parses the content of `/proc/meminfo`.
pub fn parse_meminfo(data: &[u8]) -> Result<MemoryInfo> {
    let text = as_text(FILE, data)?;
    let mut mem = MemoryInfo::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = split_key_value(FILE, line)?;
        let Some(slot) = mem.slot(key) else {
            continue;
        };

        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(malformed(
                FILE,
                format!(
                    "{}: expected value and unit, got {} fields",
                    key,
                    fields.len()
                ),
            ));
        }
        *slot = Some(parse_int(FILE, key, fields[0])?);
    }

    Ok(mem)
}
