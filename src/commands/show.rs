//! Record commands.
//!
//! Reads the record selected by the subcommand and prints it to stdout.

use std::io::Write;

use anyhow::Context;
use herakles_sysinfo::collectors::diskstats::is_virtual_device;
use herakles_sysinfo::{
    collect, list_process_ids, read_cpu_info, read_disk_stats, read_filesystem_capacity,
    read_kernel_identity, read_load_average, read_memory_info, read_network_interfaces,
    read_network_stats, read_stat, read_system_information, read_uptime, read_vmstat, ProcFs,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Commands, OutputFormat};
use crate::config::Config;

/// Renders a record in the requested format.
pub fn render<T: Serialize>(record: &T, format: OutputFormat) -> anyhow::Result<String> {
    let mut text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
        OutputFormat::Yaml => serde_yaml::to_string(record)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

fn print_record<T: Serialize>(record: &T, format: OutputFormat) -> anyhow::Result<()> {
    let text = render(record, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Prints the record selected by `command`.
pub fn command_show(
    command: &Commands,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let proc_fs = ProcFs::new(config.proc_root());
    debug!("Reading from proc root {}", proc_fs.root().display());

    match command {
        Commands::Snapshot => {
            let snapshot = collect(&proc_fs, &config.filesystem_paths())
                .context("failed to collect host snapshot")?;
            print_record(&snapshot, format)
        }
        Commands::Memory => print_record(&read_memory_info(&proc_fs)?, format),
        Commands::Stat => print_record(&read_stat(&proc_fs)?, format),
        Commands::Cpuinfo => print_record(&read_cpu_info(&proc_fs)?, format),
        Commands::Load => print_record(&read_load_average(&proc_fs)?, format),
        Commands::Uptime => print_record(&read_uptime(&proc_fs)?, format),
        Commands::Vmstat => print_record(&read_vmstat(&proc_fs)?, format),
        Commands::Network => print_record(&read_network_stats(&proc_fs)?, format),
        Commands::Disks { physical_only } => {
            let mut disks = read_disk_stats(&proc_fs)?;
            if *physical_only {
                disks.retain(|d| !is_virtual_device(&d.device));
            }
            print_record(&disks, format)
        }
        Commands::Pids { sorted } => {
            let mut pids = list_process_ids(&proc_fs)?;
            if *sorted {
                pids.sort_unstable();
            }
            print_record(&pids, format)
        }
        Commands::Kernel => print_record(&read_kernel_identity()?, format),
        Commands::System => print_record(&read_system_information()?, format),
        Commands::Interfaces => print_record(&read_network_interfaces()?, format),
        Commands::Filesystem { paths } => {
            let paths = if paths.is_empty() {
                config.filesystem_paths()
            } else {
                paths.clone()
            };
            let capacities = paths
                .iter()
                .map(|p| {
                    read_filesystem_capacity(p)
                        .with_context(|| format!("failed to query filesystem at {}", p))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            print_record(&capacities, format)
        }
        Commands::Check => anyhow::bail!("check does not print a record"),
    }
}
