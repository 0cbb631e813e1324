//! `/proc/stat` parser.
//!
//! Format:
//! ```text
//! cpu  4705 356 584 3699176 23060 0 277 0 0 0
//! cpu0 1393 280 321 924620 5762 0 201 0 0 0
//! intr 1462898 46 ...
//! ctxt 5381431
//! btime 1700000000
//! processes 26442
//! procs_running 1
//! procs_blocked 0
//! ```
//! Older kernels omit the trailing steal/guest/guest_nice columns of the
//! `cpu` lines; those default to zero.

use serde::{Deserialize, Deserializer, Serialize};

use super::{as_text, malformed, parse_int};
use crate::error::Result;

const FILE: &str = "stat";

/// Tokens on a CPU line including the `cpuN` key: 7 mandatory buckets, 3 optional.
const CPU_MIN_TOKENS: usize = 8;
const CPU_MAX_TOKENS: usize = 11;

const CPU_BUCKETS: [&str; 10] = [
    "user",
    "nice",
    "system",
    "idle",
    "iowait",
    "irq",
    "softirq",
    "steal",
    "guest",
    "guest_nice",
];

/// Cumulative time-bucket counters of one `cpu` line, in clock ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStat {
    /// `cpu` for the aggregate line, `cpuN` for logical processor N.
    pub cpu_id: String,
    pub user: i64,
    pub nice: i64,
    pub system: i64,
    pub idle: i64,
    pub iowait: i64,
    pub irq: i64,
    pub softirq: i64,
    pub steal: i64,
    pub guest: i64,
    pub guest_nice: i64,
    /// Sum of every bucket present on the line.
    pub total: i64,
    /// `(total - idle) / total * 100`. NaN when `total` is zero, written
    /// as `null` in JSON.
    #[serde(deserialize_with = "null_as_nan")]
    pub usage: f64,
}

fn null_as_nan<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl CpuStat {
    fn from_buckets(cpu_id: &str, buckets: [i64; 10]) -> Result<Self> {
        let idle = buckets[3];
        let total = buckets
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
            .ok_or_else(|| malformed(FILE, format!("{}: bucket total overflows", cpu_id)))?;
        let busy = total
            .checked_sub(idle)
            .ok_or_else(|| malformed(FILE, format!("{}: bucket total overflows", cpu_id)))?;
        let usage = busy as f64 / total as f64 * 100.0;

        Ok(Self {
            cpu_id: cpu_id.to_string(),
            user: buckets[0],
            nice: buckets[1],
            system: buckets[2],
            idle,
            iowait: buckets[4],
            irq: buckets[5],
            softirq: buckets[6],
            steal: buckets[7],
            guest: buckets[8],
            guest_nice: buckets[9],
            total,
            usage,
        })
    }

    /// True for the all-cores line.
    pub fn is_aggregate(&self) -> bool {
        self.cpu_id == "cpu"
    }

    /// Usage percentage, or `None` when it could not be computed.
    pub fn usage_known(&self) -> Option<f64> {
        self.usage.is_finite().then_some(self.usage)
    }
}

/// Parsed `/proc/stat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStat {
    /// Aggregate line first, then one entry per logical processor.
    pub cpu_stats: Vec<CpuStat>,
    /// Boot time in seconds since the Unix epoch.
    pub boot_time: Option<i64>,
    /// Processes forked since boot.
    pub processes: Option<i64>,
    pub processes_running: Option<i64>,
    pub processes_blocked: Option<i64>,
    pub context_switches: Option<i64>,
    /// Total interrupts serviced since boot.
    pub interrupts: Option<i64>,
}

impl SystemStat {
    /// The all-cores entry, if the kernel reported one.
    pub fn aggregate(&self) -> Option<&CpuStat> {
        self.cpu_stats.iter().find(|cpu| cpu.is_aggregate())
    }

    /// Per-core entries in kernel order.
    pub fn per_core(&self) -> impl Iterator<Item = &CpuStat> {
        self.cpu_stats.iter().filter(|cpu| !cpu.is_aggregate())
    }

    /// Boot time as a UTC timestamp.
    pub fn boot_time_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.boot_time
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    }
}

/// Parses the content of `/proc/stat`.
pub fn parse_stat(data: &[u8]) -> Result<SystemStat> {
    let text = as_text(FILE, data)?;
    let mut stat = SystemStat::default();

    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(&key) = fields.first() else {
            continue;
        };

        if key.starts_with("cpu") {
            stat.cpu_stats.push(parse_cpu_line(&fields)?);
            continue;
        }

        match key {
            "btime" => stat.boot_time = Some(single_value(&fields)?),
            "processes" => stat.processes = Some(single_value(&fields)?),
            "procs_running" => stat.processes_running = Some(single_value(&fields)?),
            "procs_blocked" => stat.processes_blocked = Some(single_value(&fields)?),
            "ctxt" => stat.context_switches = Some(single_value(&fields)?),
            // intr <total> <per-irq counts...>
            "intr" => {
                let total = fields
                    .get(1)
                    .ok_or_else(|| malformed(FILE, "intr: missing total"))?;
                stat.interrupts = Some(parse_int(FILE, "intr", total)?);
            }
            _ => {}
        }
    }

    Ok(stat)
}

fn parse_cpu_line(fields: &[&str]) -> Result<CpuStat> {
    if !(CPU_MIN_TOKENS..=CPU_MAX_TOKENS).contains(&fields.len()) {
        return Err(malformed(
            FILE,
            format!(
                "{}: expected {} to {} fields, got {}",
                fields[0],
                CPU_MIN_TOKENS,
                CPU_MAX_TOKENS,
                fields.len()
            ),
        ));
    }

    let mut buckets = [0i64; 10];
    for ((slot, name), token) in buckets.iter_mut().zip(CPU_BUCKETS).zip(&fields[1..]) {
        *slot = parse_int(FILE, name, token)?;
    }

    CpuStat::from_buckets(fields[0], buckets)
}

fn single_value(fields: &[&str]) -> Result<i64> {
    if fields.len() != 2 {
        return Err(malformed(
            FILE,
            format!("{}: expected 1 value, got {}", fields[0], fields.len() - 1),
        ));
    }
    parse_int(FILE, fields[0], fields[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "cpu  4705 356 584 3699176 23060 0 277 0 0 0\n\
                          cpu0 1393 280 321 924620 5762 0 201 0 0 0\n\
                          cpu1 1100 20 90 925000 6000 0 30 5 0 0\n\
                          intr 1462898 46 0 0\n\
                          ctxt 5381431\n\
                          btime 1700000000\n\
                          processes 26442\n\
                          procs_running 3\n\
                          procs_blocked 1\n\
                          softirq 100 1 2 3\n";

    #[test]
    fn test_parse_stat_sample() {
        let stat = parse_stat(SAMPLE.as_bytes()).unwrap();
        assert_eq!(stat.cpu_stats.len(), 3);
        assert_eq!(stat.cpu_stats[0].cpu_id, "cpu");
        assert_eq!(stat.cpu_stats[1].cpu_id, "cpu0");
        assert_eq!(stat.cpu_stats[2].cpu_id, "cpu1");
        assert_eq!(stat.cpu_stats[2].steal, 5);
        assert_eq!(stat.boot_time, Some(1700000000));
        assert_eq!(stat.processes, Some(26442));
        assert_eq!(stat.processes_running, Some(3));
        assert_eq!(stat.processes_blocked, Some(1));
        assert_eq!(stat.context_switches, Some(5381431));
        assert_eq!(stat.interrupts, Some(1462898));
        assert_eq!(stat.aggregate().map(|c| c.user), Some(4705));
        assert_eq!(stat.per_core().count(), 2);
    }

    #[test]
    fn test_eight_token_line_defaults_optional_buckets() {
        let stat = parse_stat(b"cpu  100 0 50 850 0 0 0\n").unwrap();
        let cpu = &stat.cpu_stats[0];
        assert_eq!((cpu.steal, cpu.guest, cpu.guest_nice), (0, 0, 0));
        assert_eq!(cpu.total, 1000);
        assert_eq!(cpu.idle, 850);
        assert!((cpu.usage - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_includes_optional_buckets() {
        let stat = parse_stat(b"cpu 10 0 10 70 0 0 0 5 3 2\n").unwrap();
        let cpu = &stat.cpu_stats[0];
        assert_eq!(cpu.total, 100);
        assert_eq!((cpu.steal, cpu.guest, cpu.guest_nice), (5, 3, 2));
        assert!((cpu.usage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_gives_unknown_usage() {
        let stat = parse_stat(b"cpu0 0 0 0 0 0 0 0\n").unwrap();
        assert!(stat.cpu_stats[0].usage.is_nan());
        assert_eq!(stat.cpu_stats[0].usage_known(), None);
    }

    #[test]
    fn test_bucket_total_overflow_is_malformed() {
        let err = parse_stat(b"cpu 9223372036854775807 1 0 0 0 0 0\n").unwrap_err();
        assert!(err.is_malformed());
        assert!(parse_stat(b"cpu 0 0 0 -9223372036854775808 0 0 -1\n")
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_unknown_usage_survives_json_round_trip() {
        let stat = parse_stat(b"cpu 0 0 0 0 0 0 0\ncpu0 100 0 50 850 0 0 0\n").unwrap();
        let json = serde_json::to_string(&stat).unwrap();
        assert!(json.contains("\"usage\":null"));

        let back: SystemStat = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cpu_stats.len(), 2);
        assert!(back.cpu_stats[0].usage.is_nan());
        assert_eq!(back.cpu_stats[0].usage_known(), None);
        assert_eq!(back.cpu_stats[1], stat.cpu_stats[1]);
    }

    #[test]
    fn test_cpu_line_field_count_bounds() {
        assert!(parse_stat(b"cpu 1 2 3 4 5 6\n").unwrap_err().is_malformed());
        assert!(parse_stat(b"cpu 1 2 3 4 5 6 7 8 9 10 11\n")
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_bad_optional_bucket_is_malformed() {
        assert!(parse_stat(b"cpu 1 2 3 4 5 6 7 x\n").unwrap_err().is_malformed());
    }

    #[test]
    fn test_scalar_counter_needs_single_value() {
        assert!(parse_stat(b"btime 1 2\n").unwrap_err().is_malformed());
        assert!(parse_stat(b"procs_running\n").unwrap_err().is_malformed());
    }

    #[test]
    fn test_unknown_keys_and_blank_lines_ignored() {
        let stat = parse_stat(b"\npage 5 6\nswap 0 0\nprocesses 7\n\n").unwrap();
        assert!(stat.cpu_stats.is_empty());
        assert_eq!(stat.processes, Some(7));
        assert_eq!(stat.boot_time, None);
    }

    #[test]
    fn test_boot_time_utc() {
        let stat = parse_stat(b"btime 0\n").unwrap();
        assert_eq!(
            stat.boot_time_utc().map(|t| t.to_rfc3339()),
            Some("1970-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let stat = parse_stat(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_value(&stat).unwrap();
        assert!(json.get("cpuStats").is_some());
        assert_eq!(json["cpuStats"][1]["cpuId"], "cpu0");
        assert!(json["cpuStats"][0].get("guestNice").is_some());
    }
}
