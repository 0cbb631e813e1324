//! `/proc/cpuinfo` parser.
//!
//! The file is a sequence of blank-line separated blocks, one per logical
//! processor. The emitted order is the kernel's enumeration order, which is
//! the same order as the `cpuN` lines of `/proc/stat`.

use serde::{Deserialize, Serialize};

use super::{as_text, parse_int, split_key_value};
use crate::error::Result;

const FILE: &str = "cpuinfo";

/// One logical processor block. Text fields are copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorInformation {
    pub id: i64,
    pub core_id: Option<i64>,
    pub physical_id: Option<i64>,
    pub vendor_id: String,
    pub cpu_family: String,
    pub model_id: String,
    pub model_name: String,
    /// `cpu MHz`, e.g. `"2400.000"`.
    pub cpu_frequency: String,
    pub cpu_cores: String,
    /// `cache size`, e.g. `"8192 KB"`.
    pub cache_size: String,
    pub cache_alignment: String,
}

/// Parsed `/proc/cpuinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInformation {
    pub processors: Vec<ProcessorInformation>,
}

/// Block being accumulated. `id` stays `None` until a `processor` line is seen.
#[derive(Default)]
struct PendingProcessor {
    id: Option<i64>,
    info: ProcessorInformation,
}

impl PendingProcessor {
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let info = &mut self.info;
        match key {
            "processor" => self.id = Some(parse_int(FILE, key, value)?),
            "core id" => info.core_id = Some(parse_int(FILE, key, value)?),
            "physical id" => info.physical_id = Some(parse_int(FILE, key, value)?),
            "vendor_id" => info.vendor_id = value.to_string(),
            "cpu family" => info.cpu_family = value.to_string(),
            "model" => info.model_id = value.to_string(),
            "model name" => info.model_name = value.to_string(),
            "cpu MHz" => info.cpu_frequency = value.to_string(),
            "cpu cores" => info.cpu_cores = value.to_string(),
            "cache size" => info.cache_size = value.to_string(),
            "cache_alignment" => info.cache_alignment = value.to_string(),
            _ => {}
        }
        Ok(())
    }

    /// Emits the block if it named a processor, and resets for the next one.
    fn flush_into(&mut self, out: &mut Vec<ProcessorInformation>) {
        let pending = std::mem::take(self);
        if let Some(id) = pending.id {
            out.push(ProcessorInformation { id, ..pending.info });
        }
    }
}

/// Parses the content of `/proc/cpuinfo`.
pub fn parse_cpuinfo(data: &[u8]) -> Result<CpuInformation> {
    let text = as_text(FILE, data)?;
    let mut info = CpuInformation::default();
    let mut pending = PendingProcessor::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            pending.flush_into(&mut info.processors);
            continue;
        }
        let (key, value) = split_key_value(FILE, line)?;
        pending.apply(key, value)?;
    }
    pending.flush_into(&mut info.processors);

    Ok(info)
}
