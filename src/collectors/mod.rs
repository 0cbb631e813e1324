//! Collectors for device-level statistics.
//!
//! This module contains readers for per-device metrics: network interface
//! traffic and addresses, block device I/O, and filesystem capacity.

pub mod diskstats;
pub mod filesystem;
pub mod netdev;
