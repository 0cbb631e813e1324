//! System-wide snapshots from /proc files and kernel syscalls.
//!
//! The `read_*` functions taking a [`ProcReader`] fetch one pseudo-file and
//! hand it to the matching parser. The syscall-backed readers
//! ([`read_system_information`], [`read_kernel_identity`]) map the kernel's
//! structs onto serializable records.

use std::io;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SysinfoError};
use crate::parser::cpuinfo::{parse_cpuinfo, CpuInformation};
use crate::parser::loadavg::{parse_loadavg, LoadAverage};
use crate::parser::meminfo::{parse_meminfo, MemoryInfo};
use crate::parser::stat::{parse_stat, SystemStat};
use crate::parser::uptime::{parse_uptime, Uptime};
use crate::parser::vmstat::{parse_vmstat, VmStat};
use crate::source::{read_source, ProcReader};

/// Fixed-point scale of the load averages returned by `sysinfo(2)`.
const LOAD_SCALE: f64 = (1u64 << 16) as f64;

/// Reads `/proc/meminfo`.
pub fn read_memory_info(reader: &dyn ProcReader) -> Result<MemoryInfo> {
    parse_meminfo(&read_source(reader, "meminfo")?)
}

/// Reads `/proc/stat`.
pub fn read_stat(reader: &dyn ProcReader) -> Result<SystemStat> {
    parse_stat(&read_source(reader, "stat")?)
}

/// Reads `/proc/cpuinfo`.
pub fn read_cpu_info(reader: &dyn ProcReader) -> Result<CpuInformation> {
    parse_cpuinfo(&read_source(reader, "cpuinfo")?)
}

/// Reads `/proc/loadavg`.
pub fn read_load_average(reader: &dyn ProcReader) -> Result<LoadAverage> {
    parse_loadavg(&read_source(reader, "loadavg")?)
}

/// Reads `/proc/uptime`.
pub fn read_uptime(reader: &dyn ProcReader) -> Result<Uptime> {
    parse_uptime(&read_source(reader, "uptime")?)
}

/// Reads `/proc/vmstat`.
pub fn read_vmstat(reader: &dyn ProcReader) -> Result<VmStat> {
    parse_vmstat(&read_source(reader, "vmstat")?)
}

/// Counters returned by `sysinfo(2)`. Memory values are in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInformation {
    /// Seconds since boot.
    pub uptime: i64,
    /// Uptime rendered as e.g. `"26h3m12s"`.
    pub uptime_text: String,
    pub total_ram: u64,
    pub available_ram: u64,
    pub total_swap: u64,
    pub available_swap: u64,
    pub processes: u64,
    pub loads: LoadAverage,
}

impl From<&libc::sysinfo> for SystemInformation {
    fn from(si: &libc::sysinfo) -> Self {
        let unit = u64::from(si.mem_unit.max(1));
        let uptime = si.uptime as i64;
        Self {
            uptime,
            uptime_text: format_uptime(uptime),
            total_ram: si.totalram as u64 * unit,
            available_ram: si.freeram as u64 * unit,
            total_swap: si.totalswap as u64 * unit,
            available_swap: si.freeswap as u64 * unit,
            processes: u64::from(si.procs),
            loads: LoadAverage {
                load1: si.loads[0] as f64 / LOAD_SCALE,
                load5: si.loads[1] as f64 / LOAD_SCALE,
                load15: si.loads[2] as f64 / LOAD_SCALE,
            },
        }
    }
}

/// Calls `sysinfo(2)`.
pub fn read_system_information() -> Result<SystemInformation> {
    // SAFETY: libc::sysinfo is plain integer data, valid when zeroed
    let mut si: libc::sysinfo = unsafe { std::mem::zeroed() };
    // SAFETY: si is a valid, writable sysinfo struct
    if unsafe { libc::sysinfo(&mut si) } != 0 {
        return Err(SysinfoError::unavailable(
            "sysinfo(2)",
            io::Error::last_os_error(),
        ));
    }
    let info = SystemInformation::from(&si);
    debug!(
        "sysinfo: uptime={}s procs={} total_ram={}",
        info.uptime, info.processes, info.total_ram
    );
    Ok(info)
}

/// Formats seconds as hours, minutes and seconds: `"3s"`, `"2m3s"`, `"26h0m5s"`.
pub fn format_uptime(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (h, m, s) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Kernel identity strings returned by `uname(2)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelIdentity {
    pub sys_name: String,
    pub node_name: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub domain_name: String,
}

impl From<&libc::utsname> for KernelIdentity {
    fn from(uts: &libc::utsname) -> Self {
        Self {
            sys_name: decode_c_chars(&uts.sysname),
            node_name: decode_c_chars(&uts.nodename),
            release: decode_c_chars(&uts.release),
            version: decode_c_chars(&uts.version),
            machine: decode_c_chars(&uts.machine),
            domain_name: decode_c_chars(&uts.domainname),
        }
    }
}

/// Calls `uname(2)`.
pub fn read_kernel_identity() -> Result<KernelIdentity> {
    // SAFETY: libc::utsname is a C struct with only arrays of c_char
    // which are valid for zeroed memory initialization
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: uts is a valid, writable utsname struct
    if unsafe { libc::uname(&mut uts) } != 0 {
        return Err(SysinfoError::unavailable(
            "uname(2)",
            io::Error::last_os_error(),
        ));
    }
    Ok(KernelIdentity::from(&uts))
}

/// Decodes a fixed-capacity, null-padded byte buffer.
///
/// Takes bytes up to the first NUL (or the whole buffer when there is none)
/// and decodes them as UTF-8, replacing invalid sequences.
pub fn decode_fixed(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

fn decode_c_chars(buf: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = buf.iter().map(|&c| c as u8).collect();
    decode_fixed(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fixed_stops_at_nul() {
        assert_eq!(decode_fixed(b"Linux\0\0\0"), "Linux");
        assert_eq!(decode_fixed(b"x86_64"), "x86_64");
        assert_eq!(decode_fixed(b"\0garbage"), "");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59), "59s");
        assert_eq!(format_uptime(123), "2m3s");
        assert_eq!(format_uptime(93605), "26h0m5s");
    }

    #[test]
    fn test_system_information_from_raw() {
        // SAFETY: plain integer struct
        let mut raw: libc::sysinfo = unsafe { std::mem::zeroed() };
        raw.uptime = 3661;
        raw.loads = [65536, 32768, 98304];
        raw.totalram = 1000;
        raw.freeram = 250;
        raw.totalswap = 40;
        raw.freeswap = 10;
        raw.procs = 321;
        raw.mem_unit = 4096;

        let info = SystemInformation::from(&raw);
        assert_eq!(info.uptime, 3661);
        assert_eq!(info.uptime_text, "1h1m1s");
        assert_eq!(info.total_ram, 1000 * 4096);
        assert_eq!(info.available_ram, 250 * 4096);
        assert_eq!(info.total_swap, 40 * 4096);
        assert_eq!(info.available_swap, 10 * 4096);
        assert_eq!(info.processes, 321);
        assert_eq!(info.loads.load1, 1.0);
        assert_eq!(info.loads.load5, 0.5);
        assert_eq!(info.loads.load15, 1.5);
    }

    #[test]
    fn test_zero_mem_unit_treated_as_bytes() {
        // SAFETY: plain integer struct
        let mut raw: libc::sysinfo = unsafe { std::mem::zeroed() };
        raw.totalram = 77;
        assert_eq!(SystemInformation::from(&raw).total_ram, 77);
    }

    #[test]
    fn test_kernel_identity_from_utsname() {
        // SAFETY: arrays of c_char, valid when zeroed
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        for (dst, src) in uts.sysname.iter_mut().zip(b"Linux") {
            *dst = *src as libc::c_char;
        }
        for (dst, src) in uts.machine.iter_mut().zip(b"aarch64") {
            *dst = *src as libc::c_char;
        }

        let kernel = KernelIdentity::from(&uts);
        assert_eq!(kernel.sys_name, "Linux");
        assert_eq!(kernel.machine, "aarch64");
        assert_eq!(kernel.domain_name, "");
    }

    #[test]
    fn test_read_kernel_identity_live() {
        let kernel = read_kernel_identity().unwrap();
        assert_eq!(kernel.sys_name, "Linux");
        assert!(!kernel.release.is_empty());
    }

    #[test]
    fn test_read_system_information_live() {
        let info = read_system_information().unwrap();
        assert!(info.total_ram > 0);
        assert!(info.total_ram >= info.available_ram);
    }
}
