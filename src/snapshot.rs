//! Whole-host snapshot assembled from every reader in the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collectors::diskstats::read_disk_stats;
use crate::collectors::filesystem::{read_filesystem_capacity, FilesystemCapacity};
use crate::collectors::netdev::{read_network_interfaces, read_network_stats, NetworkInterface};
use crate::error::Result;
use crate::parser::cpuinfo::CpuInformation;
use crate::parser::diskstats::DiskStat;
use crate::parser::loadavg::LoadAverage;
use crate::parser::meminfo::MemoryInfo;
use crate::parser::netdev::NetworkStat;
use crate::parser::stat::SystemStat;
use crate::parser::uptime::Uptime;
use crate::parser::vmstat::VmStat;
use crate::process::list_process_ids;
use crate::source::ProcReader;
use crate::system::{
    read_cpu_info, read_kernel_identity, read_load_average, read_memory_info, read_stat,
    read_system_information, read_uptime, read_vmstat, KernelIdentity, SystemInformation,
};

/// Every metric this crate knows how to read, taken in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSnapshot {
    pub collected_at: DateTime<Utc>,
    pub kernel: KernelIdentity,
    pub system: SystemInformation,
    pub memory: MemoryInfo,
    pub stat: SystemStat,
    pub cpu_info: CpuInformation,
    pub load: LoadAverage,
    pub uptime: Uptime,
    pub vmstat: VmStat,
    pub network_stats: Vec<NetworkStat>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub disk_stats: Vec<DiskStat>,
    pub filesystems: Vec<FilesystemCapacity>,
    pub process_ids: Vec<u32>,
}

/// Collects a [`HostSnapshot`].
///
/// Pseudo-files are read through `reader`; syscall-backed values come from
/// the running kernel. `filesystem_paths` selects which mount points get a
/// capacity entry. The first failure aborts the whole collection.
pub fn collect(reader: &dyn ProcReader, filesystem_paths: &[String]) -> Result<HostSnapshot> {
    let started = std::time::Instant::now();

    let snapshot = HostSnapshot {
        collected_at: Utc::now(),
        kernel: read_kernel_identity()?,
        system: read_system_information()?,
        memory: read_memory_info(reader)?,
        stat: read_stat(reader)?,
        cpu_info: read_cpu_info(reader)?,
        load: read_load_average(reader)?,
        uptime: read_uptime(reader)?,
        vmstat: read_vmstat(reader)?,
        network_stats: read_network_stats(reader)?,
        network_interfaces: read_network_interfaces()?,
        disk_stats: read_disk_stats(reader)?,
        filesystems: filesystem_paths
            .iter()
            .map(|path| read_filesystem_capacity(path))
            .collect::<Result<Vec<_>>>()?,
        process_ids: list_process_ids(reader)?,
    };

    debug!(
        "Snapshot: {} cpus, {} interfaces, {} disks, {} processes",
        snapshot.stat.cpu_stats.len(),
        snapshot.network_stats.len(),
        snapshot.disk_stats.len(),
        snapshot.process_ids.len()
    );
    info!(
        "Host snapshot collected in {:.2}ms",
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(snapshot)
}
