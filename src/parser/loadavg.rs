//! `/proc/loadavg` parser.
//!
//! Format: `"0.00 0.01 0.05 1/234 5678"`. Only the three load averages are
//! read; the running/total task count and the last PID are ignored.

use serde::{Deserialize, Serialize};

use super::{as_text, leading_floats};
use crate::error::Result;

const FILE: &str = "loadavg";

/// Run-queue load averaged over 1, 5 and 15 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAverage {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

/// Parses the content of `/proc/loadavg`.
pub fn parse_loadavg(data: &[u8]) -> Result<LoadAverage> {
    let [load1, load5, load15] =
        leading_floats(FILE, ["load1", "load5", "load15"], as_text(FILE, data)?)?;
    Ok(LoadAverage {
        load1,
        load5,
        load15,
    })
}
