//! `/proc/diskstats` parser.
//!
//! Format: `major minor name` followed by the I/O counters documented in
//! the kernel's `Documentation/admin-guide/iostats.rst`. Kernels since 4.18
//! report the four discard counters (18 columns); 5.5 added two flush
//! counters (20 columns).

use serde::{Deserialize, Serialize};

use super::{as_text, malformed, parse_int};
use crate::error::Result;

const FILE: &str = "diskstats";

const REQUIRED_COLUMNS: usize = 18;
const FLUSH_COLUMNS: usize = 20;

/// I/O counters of one block device. Times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStat {
    pub major: i64,
    pub minor: i64,
    pub device: String,
    pub reads_completed: i64,
    pub reads_merged: i64,
    pub sectors_read: i64,
    pub time_reading_ms: i64,
    pub writes_completed: i64,
    pub writes_merged: i64,
    pub sectors_written: i64,
    pub time_writing_ms: i64,
    pub ios_in_progress: i64,
    pub time_io_ms: i64,
    pub weighted_time_io_ms: i64,
    pub discards_completed: i64,
    pub discards_merged: i64,
    pub sectors_discarded: i64,
    pub time_discarding_ms: i64,
    pub flushes_completed: Option<i64>,
    pub time_flushing_ms: Option<i64>,
}

/// Parses the content of `/proc/diskstats`, one entry per row in file order.
///
/// Every row is parsed on its own; a row with fewer than 18 columns fails
/// the whole call.
pub fn parse_diskstats(data: &[u8]) -> Result<Vec<DiskStat>> {
    let text = as_text(FILE, data)?;
    let mut stats = Vec::new();

    for line in text.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        if parts.len() < REQUIRED_COLUMNS {
            return Err(malformed(
                FILE,
                format!(
                    "expected at least {} columns, got {} in line {:?}",
                    REQUIRED_COLUMNS,
                    parts.len(),
                    line.trim()
                ),
            ));
        }

        let col = |idx: usize, name: &str| parse_int(FILE, name, parts[idx]);
        let (flushes_completed, time_flushing_ms) = if parts.len() >= FLUSH_COLUMNS {
            (
                Some(col(18, "flushes completed")?),
                Some(col(19, "time flushing")?),
            )
        } else {
            (None, None)
        };

        stats.push(DiskStat {
            major: col(0, "major")?,
            minor: col(1, "minor")?,
            device: parts[2].to_string(),
            reads_completed: col(3, "reads completed")?,
            reads_merged: col(4, "reads merged")?,
            sectors_read: col(5, "sectors read")?,
            time_reading_ms: col(6, "time reading")?,
            writes_completed: col(7, "writes completed")?,
            writes_merged: col(8, "writes merged")?,
            sectors_written: col(9, "sectors written")?,
            time_writing_ms: col(10, "time writing")?,
            ios_in_progress: col(11, "I/Os in progress")?,
            time_io_ms: col(12, "time doing I/O")?,
            weighted_time_io_ms: col(13, "weighted time doing I/O")?,
            discards_completed: col(14, "discards completed")?,
            discards_merged: col(15, "discards merged")?,
            sectors_discarded: col(16, "sectors discarded")?,
            time_discarding_ms: col(17, "time discarding")?,
            flushes_completed,
            time_flushing_ms,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eighteen_columns() {
        let text = "   8       0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15\n";
        let stats = parse_diskstats(text.as_bytes()).unwrap();
        assert_eq!(stats.len(), 1);

        let sda = &stats[0];
        assert_eq!((sda.major, sda.minor), (8, 0));
        assert_eq!(sda.device, "sda");
        assert_eq!(sda.reads_completed, 1);
        assert_eq!(sda.time_writing_ms, 8);
        assert_eq!(sda.ios_in_progress, 9);
        assert_eq!(sda.weighted_time_io_ms, 11);
        assert_eq!(sda.time_discarding_ms, 15);
        assert_eq!(sda.flushes_completed, None);
        assert_eq!(sda.time_flushing_ms, None);
    }

    #[test]
    fn test_parse_twenty_columns_fills_flush_counters() {
        let text = "259 0 nvme0n1 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17\n";
        let stats = parse_diskstats(text.as_bytes()).unwrap();
        assert_eq!(stats[0].flushes_completed, Some(16));
        assert_eq!(stats[0].time_flushing_ms, Some(17));
    }

    #[test]
    fn test_rows_are_independent() {
        let text = "8 0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17\n\
                    8 1 sda1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n";
        let stats = parse_diskstats(text.as_bytes()).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].device, "sda1");
        assert_eq!(stats[1].reads_completed, 0);
        assert_eq!(stats[1].flushes_completed, None);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let text = "8 0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15\n\
                    8 1 sda1 1 2 3 4 5 6 7 8 9 10 11\n";
        assert!(parse_diskstats(text.as_bytes()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_non_numeric_counter_is_malformed() {
        let text = "8 0 sda 1 2 3 x 5 6 7 8 9 10 11 12 13 14 15\n";
        assert!(parse_diskstats(text.as_bytes()).unwrap_err().is_malformed());
    }
}
