//! # transfersort
//!
//! A Rust library for turning free-form stock transfer messages into
//! structured, per-direction transfer lists.
//!
//! ## Overview
//!
//! Shop staff post messages like
//!
//! ```text
//! Lucky Vaper
//! Черника, с бк по 1 на л
//! Малина с к на л и на б
//! ```
//!
//! meaning "move one blueberry from Берлин and one from Кулакова to
//! Ладожская, and raspberries from Кулакова to Ладожская and Берлин". Shops
//! are named by single-letter shorthands configured as
//! `б-Берлин,к-Кулакова,л-Ладожская`.
//!
//! The library extracts every transfer, groups them by direction
//! (`Берлин ➡️ Ладожская`), tracks category headers such as `Lucky Vaper`,
//! and keeps every line it could not understand for manual review.
//!
//! ## Quick Start
//!
//! ```rust
//! use transfersort::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TransferParser::from_shorthands("б-Берлин,к-Кулакова,л-Ладожская");
//!     let result = parser.parse("Черника, с бк по 1 на л\nпривет");
//!
//!     assert_eq!(result.transfer_count(), 2);
//!     assert_eq!(result.unparsed, vec!["привет"]);
//!
//!     // Chat-ready report, one block per direction
//!     let report = ReportFormatter::new().format_transfers(&result)?;
//!     assert_eq!(report.blocks.len(), 2);
//!     assert!(report.unparsed_notice.is_some());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TransferParser`], the whole pipeline over a message
//! - [`parsing`] - the individual pipeline stages
//! - [`shops`] - [`ShopBranchMap`](shops::ShopBranchMap) and shop resolution
//! - [`quantity`] - quantity normalization
//! - [`transfer`] - [`Transfer`], [`Category`], [`ParsingResult`]
//! - [`report`] - [`ReportFormatter`](report::ReportFormatter) and markup policies
//! - [`core`] - direction bucketing, statistics, CSV/JSON/JSONL writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`ReportConfig`](config::ReportConfig)
//! - [`cli`] - CLI types (requires the `cli` feature)
//! - [`error`] - [`TransferSortError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod quantity;
pub mod report;
pub mod shops;
pub mod transfer;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TransferSortError};
pub use parser::{TransferParser, parse_transfers};
pub use transfer::{Category, ParsingResult, Transfer};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use transfersort::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::transfer::{Category, ParsingResult, Transfer};

    // Error types
    pub use crate::error::{Result, TransferSortError};

    // Parsing
    pub use crate::parser::{TransferParser, parse_transfers};
    pub use crate::shops::{Resolution, ShopBranchMap};

    // Configuration
    pub use crate::config::{ParserConfig, ReportConfig};

    // Reporting
    pub use crate::report::{Markup, MarkupKind, Report, ReportFormatter};

    // Statistics
    pub use crate::core::processor::ParsingStats;

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
