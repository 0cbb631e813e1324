//! `/proc/uptime` parser.
//!
//! Format: `"<uptime_seconds> <idle_seconds>"`. Idle time is summed over all
//! logical processors, so it can exceed the uptime.

use serde::{Deserialize, Serialize};

use super::{as_text, leading_floats};
use crate::error::Result;

const FILE: &str = "uptime";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uptime {
    /// Seconds since boot.
    pub total: f64,
    /// Cumulative idle seconds across all processors.
    pub idle: f64,
}

/// Parses the content of `/proc/uptime`.
pub fn parse_uptime(data: &[u8]) -> Result<Uptime> {
    let [total, idle] = leading_floats(FILE, ["total", "idle"], as_text(FILE, data)?)?;
    Ok(Uptime { total, idle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uptime() {
        let uptime = parse_uptime(b"350735.47 234388.90\n").unwrap();
        assert!((uptime.total - 350735.47).abs() < 1e-6);
        assert!((uptime.idle - 234388.90).abs() < 1e-6);
    }

    #[test]
    fn test_parse_uptime_single_field() {
        assert!(parse_uptime(b"350735.47\n").unwrap_err().is_malformed());
    }

    #[test]
    fn test_parse_uptime_garbage() {
        assert!(parse_uptime(b"up idle\n").unwrap_err().is_malformed());
    }
}
