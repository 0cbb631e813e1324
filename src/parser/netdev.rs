//! `/proc/net/dev` parser.
//!
//! Format (after two header lines):
//! ```text
//!   eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0
//! ```
//! Receive columns 0..8 come first, transmit columns 8..16 after them.

use serde::{Deserialize, Serialize};

use super::{as_text, malformed, parse_int};
use crate::error::Result;

const FILE: &str = "net/dev";

const HEADER_LINES: usize = 2;
const RX_BYTES: usize = 0;
const RX_PACKETS: usize = 1;
const TX_BYTES: usize = 8;
const TX_PACKETS: usize = 9;

/// Traffic counters of one network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStat {
    pub interface: String,
    pub received_bytes: i64,
    pub received_packets: i64,
    pub transmitted_bytes: i64,
    pub transmitted_packets: i64,
}

/// Parses the content of `/proc/net/dev`, one entry per interface in file order.
pub fn parse_netdev(data: &[u8]) -> Result<Vec<NetworkStat>> {
    let text = as_text(FILE, data)?;
    let mut stats = Vec::new();

    for line in text.lines().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        let Some((name, counters)) = line.split_once(':') else {
            return Err(malformed(FILE, format!("missing ':' in line {:?}", line)));
        };
        if counters.contains(':') {
            return Err(malformed(FILE, format!("extra ':' in line {:?}", line)));
        }

        let values: Vec<&str> = counters.split_whitespace().collect();
        if values.len() <= TX_PACKETS {
            return Err(malformed(
                FILE,
                format!(
                    "{}: expected at least {} columns, got {}",
                    name.trim(),
                    TX_PACKETS + 1,
                    values.len()
                ),
            ));
        }

        stats.push(NetworkStat {
            interface: name.trim().to_string(),
            received_bytes: parse_int(FILE, "receive bytes", values[RX_BYTES])?,
            received_packets: parse_int(FILE, "receive packets", values[RX_PACKETS])?,
            transmitted_bytes: parse_int(FILE, "transmit bytes", values[TX_BYTES])?,
            transmitted_packets: parse_int(FILE, "transmit packets", values[TX_PACKETS])?,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Inter-|   Receive                                                |  Transmit\n \
face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n    \
lo: 2776770   11307    0    0    0     0          0         0  2776770   11307    0    0    0     0       0          0\n  \
eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0\n";

    #[test]
    fn test_parse_netdev_sample() {
        let stats = parse_netdev(SAMPLE.as_bytes()).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].interface, "lo");
        assert_eq!(stats[0].received_bytes, 2776770);
        assert_eq!(
            stats[1],
            NetworkStat {
                interface: "eth0".into(),
                received_bytes: 1000,
                received_packets: 10,
                transmitted_bytes: 2000,
                transmitted_packets: 20,
            }
        );
    }

    #[test]
    fn test_headers_only_is_empty() {
        let header: String = SAMPLE.lines().take(2).map(|l| format!("{}\n", l)).collect();
        assert!(parse_netdev(header.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_row_without_colon_is_malformed() {
        let text = "h1\nh2\neth0 1 2 3 4 5 6 7 8 9 10\n";
        assert!(parse_netdev(text.as_bytes()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_row_with_two_colons_is_malformed() {
        let text = "h1\nh2\neth0:1: 1 2 3 4 5 6 7 8 9 10\n";
        assert!(parse_netdev(text.as_bytes()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_short_row_is_malformed() {
        let text = "h1\nh2\neth0: 1 2 3\n";
        assert!(parse_netdev(text.as_bytes()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = parse_netdev(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_value(&stats[1]).unwrap();
        assert_eq!(json["receivedBytes"], 1000);
        assert_eq!(json["transmittedPackets"], 20);
    }
}
