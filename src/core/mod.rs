//! Post-processing of parsed transfers.
//!
//! This module contains:
//! - [`processor`] - Direction bucketing and statistics
//! - [`output`] - Structured export writers (CSV, JSON, JSONL)

pub mod output;
pub mod processor;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::{ParsingStats, group_by_direction};
