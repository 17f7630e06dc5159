//! Structured export writers.
//!
//! This module provides writers for machine-readable output:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter, one row per transfer - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole [`ParsingResult`](crate::ParsingResult) - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one transfer per line - requires `json-output` feature
//!
//! The chat report lives in [`report`](crate::report).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> transfersort::Result<()> {
//! use transfersort::core::output::{to_csv, write_json, write_jsonl};
//! use transfersort::parse_transfers;
//!
//! let result = parse_transfers("волжский, с б на л", "б-Берлин,л-Ладожская");
//!
//! write_json(&result, "transfers.json")?;
//! write_jsonl(&result, "transfers.jsonl")?;
//! let csv_string = to_csv(&result)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
