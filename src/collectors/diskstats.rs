//! Disk I/O statistics collector.
//!
//! This module reads block device statistics from /proc/diskstats.

use crate::error::Result;
use crate::parser::diskstats::{parse_diskstats, DiskStat};
use crate::source::{read_source, ProcReader};

/// Reads disk statistics from /proc/diskstats.
///
/// Returns one entry per device row, in kernel order. Partitions, loop and
/// ram devices are included; filtering is left to the caller.
pub fn read_disk_stats(reader: &dyn ProcReader) -> Result<Vec<DiskStat>> {
    parse_diskstats(&read_source(reader, "diskstats")?)
}

/// Returns true for virtual devices that carry no physical I/O.
pub fn is_virtual_device(device: &str) -> bool {
    device.starts_with("loop") || device.starts_with("ram") || device.starts_with("zram")
}
