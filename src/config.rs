//! Configuration types for parsing and reporting.
//!
//! These are plain serde structs without any CLI framework dependencies, so
//! they can be loaded from a file, the environment, or built in code.
//!
//! - [`ParserConfig`] - shop branch shorthands
//! - [`ReportConfig`] - fallback category and markup of the report
//!
//! # Example
//!
//! ```rust
//! use transfersort::config::{ParserConfig, ReportConfig};
//! use transfersort::parser::TransferParser;
//! use transfersort::report::{MarkupKind, ReportFormatter};
//!
//! let parser = TransferParser::with_config(
//!     &ParserConfig::new().with_shorthands("б-Берлин,к-Кулакова"),
//! );
//! let formatter = ReportFormatter::with_config(
//!     &ReportConfig::new().with_markup(MarkupKind::Plain),
//! );
//! # let _ = (parser, formatter);
//! ```

use serde::{Deserialize, Serialize};

use crate::report::{DEFAULT_FALLBACK_CATEGORY, MarkupKind};

/// Environment variable holding the shop shorthands.
pub const BRANCH_DESIGNATIONS_ENV: &str = "BRANCH_DESIGNATIONS";

/// Configuration for [`TransferParser`](crate::parser::TransferParser).
///
/// # Example
///
/// ```rust
/// use transfersort::config::ParserConfig;
///
/// let config = ParserConfig::new().with_shorthands("б-Берлин,л-Ладожская");
/// assert_eq!(config.shorthands(), "б-Берлин,л-Ладожская");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Shop shorthands as `code-Name,code-Name` (default: empty)
    pub shorthands: String,
}

impl ParserConfig {
    /// Creates a configuration with no shops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the shorthands from `BRANCH_DESIGNATIONS`.
    ///
    /// A missing variable gives an empty configuration; the resulting empty
    /// shop map is reported when the report is rendered.
    pub fn from_env() -> Self {
        Self {
            shorthands: std::env::var(BRANCH_DESIGNATIONS_ENV).unwrap_or_default(),
        }
    }

    /// Sets the shop shorthands.
    #[must_use]
    pub fn with_shorthands(mut self, shorthands: impl Into<String>) -> Self {
        self.shorthands = shorthands.into();
        self
    }

    /// The raw shorthand string.
    pub fn shorthands(&self) -> &str {
        &self.shorthands
    }
}

/// Configuration for [`ReportFormatter`](crate::report::ReportFormatter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Section name for transfers outside any category (default: "Без категории")
    pub fallback_category: String,

    /// Markup dialect of the report (default: `MarkdownV2`)
    pub markup: MarkupKind,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
            markup: MarkupKind::default(),
        }
    }
}

impl ReportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback category name.
    #[must_use]
    pub fn with_fallback_category(mut self, name: impl Into<String>) -> Self {
        self.fallback_category = name.into();
        self
    }

    /// Sets the markup dialect.
    #[must_use]
    pub fn with_markup(mut self, markup: MarkupKind) -> Self {
        self.markup = markup;
        self
    }
}
