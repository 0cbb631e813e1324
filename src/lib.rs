//! Herakles System Information Library
//!
//! This library turns Linux kernel pseudo-files and system calls into typed,
//! serializable snapshots: memory, CPU statistics and identity, load,
//! uptime, network and disk counters, process IDs, kernel identity and
//! filesystem capacity.
//!
//! # Features
//!
//! - **Strict Parsers**: One parser per `/proc` grammar; malformed input is
//!   rejected with [`SysinfoError::MalformedInput`] and never yields a
//!   partial record
//! - **Pluggable Source**: All file access goes through [`ProcReader`], so a
//!   different proc root (e.g. a host mount inside a container) can be used
//! - **Stateless**: Every call reads fresh data and returns owned records
//! - **Serializable**: Every record serializes to JSON with camelCase keys
//!
//! # Usage
//!
//! ```rust,no_run
//! use herakles_sysinfo::{read_memory_info, read_stat, ProcFs};
//!
//! let proc_fs = ProcFs::default();
//!
//! let mem = read_memory_info(&proc_fs)?;
//! println!("MemAvailable: {:?} kB", mem.available);
//!
//! let stat = read_stat(&proc_fs)?;
//! for cpu in &stat.cpu_stats {
//!     match cpu.usage_known() {
//!         Some(usage) => println!("{}: {:.1}%", cpu.cpu_id, usage),
//!         None => println!("{}: unknown", cpu.cpu_id),
//!     }
//! }
//! # Ok::<(), herakles_sysinfo::SysinfoError>(())
//! ```
//!
//! The parsers can also be used directly on captured content:
//!
//! ```rust
//! use herakles_sysinfo::parser::loadavg::parse_loadavg;
//!
//! let load = parse_loadavg(b"0.50 0.75 1.00 3/256 1234").unwrap();
//! assert_eq!(load.load5, 0.75);
//! ```

pub mod collectors;
pub mod error;
pub mod parser;
pub mod process;
pub mod snapshot;
pub mod source;
pub mod system;

// Re-export main types for convenience
pub use collectors::diskstats::read_disk_stats;
pub use collectors::filesystem::{read_filesystem_capacity, FilesystemCapacity};
pub use collectors::netdev::{read_network_interfaces, read_network_stats, NetworkInterface};
pub use error::{Result, SysinfoError};
pub use parser::cpuinfo::{CpuInformation, ProcessorInformation};
pub use parser::diskstats::DiskStat;
pub use parser::loadavg::LoadAverage;
pub use parser::meminfo::MemoryInfo;
pub use parser::netdev::NetworkStat;
pub use parser::stat::{CpuStat, SystemStat};
pub use parser::uptime::Uptime;
pub use parser::vmstat::VmStat;
pub use process::list_process_ids;
pub use snapshot::{collect, HostSnapshot};
pub use source::{ProcFs, ProcReader, DEFAULT_PROC_ROOT};
pub use system::{
    read_cpu_info, read_kernel_identity, read_load_average, read_memory_info, read_stat,
    read_system_information, read_uptime, read_vmstat, KernelIdentity, SystemInformation,
};
