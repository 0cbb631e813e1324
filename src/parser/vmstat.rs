//! `/proc/vmstat` record.
//!
//! No counters are extracted yet: the record exists so callers get a stable
//! type and the file's readability is still checked. Fields will be added
//! once a concrete list is agreed on.

use serde::{Deserialize, Serialize};

use super::as_text;
use crate::error::Result;

const FILE: &str = "vmstat";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmStat {}

/// Parses the content of `/proc/vmstat`. Always yields an empty record for
/// valid UTF-8 input.
pub fn parse_vmstat(data: &[u8]) -> Result<VmStat> {
    as_text(FILE, data)?;
    Ok(VmStat {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vmstat_is_empty_record() {
        let vm = parse_vmstat(b"nr_free_pages 12345\npgfault 99\n").unwrap();
        assert_eq!(vm, VmStat {});
        assert_eq!(serde_json::to_string(&vm).unwrap(), "{}");
    }
}
