//! Network interface statistics collector.
//!
//! This module reads per-interface traffic counters from /proc/net/dev and
//! enumerates interface addresses through `getifaddrs(3)`.

use std::io;
use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};

use nix::ifaddrs::getifaddrs;
use nix::sys::socket::SockaddrStorage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SysinfoError};
use crate::parser::netdev::{parse_netdev, NetworkStat};
use crate::source::{read_source, ProcReader};

/// Reads network interface statistics from /proc/net/dev.
///
/// Returns one entry per interface in the order the kernel lists them.
pub fn read_network_stats(reader: &dyn ProcReader) -> Result<Vec<NetworkStat>> {
    parse_netdev(&read_source(reader, "net/dev")?)
}

/// Name and addresses of one network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    /// Addresses in CIDR notation, e.g. `192.168.1.10/24` or `fe80::1/64`.
    pub addresses: Vec<String>,
    /// Colon-separated link-layer address; empty when the interface has none.
    #[serde(rename = "mac")]
    pub hardware_address: String,
}

/// One address record as reported by `getifaddrs(3)`.
#[derive(Debug, Clone, PartialEq)]
enum InterfaceEntry {
    Ip { ip: IpAddr, prefix: u32 },
    Link([u8; 6]),
    Other,
}

/// Enumerates network interfaces with their IP and hardware addresses.
pub fn read_network_interfaces() -> Result<Vec<NetworkInterface>> {
    let addrs = getifaddrs()
        .map_err(|e| SysinfoError::unavailable("getifaddrs(3)", io::Error::from(e)))?;

    let entries = addrs.map(|ifaddr| {
        let entry = match ifaddr.address.as_ref() {
            Some(addr) => classify(addr, ifaddr.netmask.as_ref()),
            None => InterfaceEntry::Other,
        };
        (ifaddr.interface_name, entry)
    });

    let interfaces = group_interfaces(entries);
    debug!("Enumerated {} network interfaces", interfaces.len());
    Ok(interfaces)
}

fn classify(addr: &SockaddrStorage, netmask: Option<&SockaddrStorage>) -> InterfaceEntry {
    if let Some(sin) = addr.as_sockaddr_in() {
        let prefix = netmask
            .and_then(|m| m.as_sockaddr_in())
            .map(|m| u32::from(*SocketAddrV4::from(*m).ip()).count_ones())
            .unwrap_or(32);
        return InterfaceEntry::Ip {
            ip: IpAddr::V4(*SocketAddrV4::from(*sin).ip()),
            prefix,
        };
    }
    if let Some(sin6) = addr.as_sockaddr_in6() {
        let prefix = netmask
            .and_then(|m| m.as_sockaddr_in6())
            .map(|m| u128::from(*SocketAddrV6::from(*m).ip()).count_ones())
            .unwrap_or(128);
        return InterfaceEntry::Ip {
            ip: IpAddr::V6(*SocketAddrV6::from(*sin6).ip()),
            prefix,
        };
    }
    if let Some(mac) = addr.as_link_addr().and_then(|link| link.addr()) {
        return InterfaceEntry::Link(mac);
    }
    InterfaceEntry::Other
}

/// Folds per-address records into one entry per interface, in first-seen order.
fn group_interfaces(
    entries: impl IntoIterator<Item = (String, InterfaceEntry)>,
) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = Vec::new();

    for (name, entry) in entries {
        let idx = match interfaces.iter().position(|i| i.name == name) {
            Some(idx) => idx,
            None => {
                interfaces.push(NetworkInterface {
                    name,
                    ..Default::default()
                });
                interfaces.len() - 1
            }
        };
        let iface = &mut interfaces[idx];

        match entry {
            InterfaceEntry::Ip { ip, prefix } => iface.addresses.push(format!("{}/{}", ip, prefix)),
            InterfaceEntry::Link(mac) => iface.hardware_address = format_hardware_address(&mac),
            InterfaceEntry::Other => {}
        }
    }

    interfaces
}

/// Formats a link-layer address as `aa:bb:cc:dd:ee:ff`. All-zero addresses
/// (loopback) render as an empty string.
pub fn format_hardware_address(bytes: &[u8]) -> String {
    if bytes.iter().all(|&b| b == 0) {
        return String::new();
    }
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
