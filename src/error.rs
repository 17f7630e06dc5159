//! Unified error types for transfersort.
//!
//! The extraction pipeline itself never fails: a line it cannot understand is
//! recorded in [`ParsingResult::unparsed`](crate::ParsingResult::unparsed)
//! instead. The variants below cover the remaining cases:
//!
//! - **Configuration** - no shop shorthands were configured, so nothing the
//!   pipeline produced can be trusted ([`TransferSortError::EmptyBranchMap`])
//! - **Output** - I/O and serialization failures while exporting results
//! - **Input** - unreadable input (bad encoding, unknown output format)

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for transfersort operations.
///
/// # Example
///
/// ```rust
/// use transfersort::error::Result;
/// use transfersort::Transfer;
///
/// fn my_function() -> Result<Vec<Transfer>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TransferSortError>;

/// Message shown to end users when the shop shorthands are missing.
pub const EMPTY_BRANCH_MAP_MESSAGE: &str =
    "Не заданы обозначения филиалов. Проверьте переменную окружения BRANCH_DESIGNATIONS.";

/// The error type for all transfersort operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferSortError {
    /// The shop branch map is empty.
    ///
    /// Happens when the shorthand configuration is absent or every entry in it
    /// is malformed. No shop can be resolved, so the report is withheld.
    #[error("{message}")]
    EmptyBranchMap {
        /// User-facing explanation
        message: &'static str,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The requested output format is unknown or unsupported.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was being selected (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for TransferSortError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TransferSortError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TransferSortError {
    /// Creates the configuration error for an empty shop branch map.
    pub fn empty_branch_map() -> Self {
        TransferSortError::EmptyBranchMap {
            message: EMPTY_BRANCH_MAP_MESSAGE,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TransferSortError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        TransferSortError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is the empty shop map configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TransferSortError::EmptyBranchMap { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TransferSortError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, TransferSortError::InvalidFormat { .. })
    }
}
