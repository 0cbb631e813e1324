//! Process-related modules.
//!
//! This module provides:
//! - `scanner`: Process discovery under the proc root

pub mod scanner;

pub use scanner::{filter_process_ids, list_process_ids};
