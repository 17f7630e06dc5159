//! Output format selection.
//!
//! Library-first format types that don't depend on CLI frameworks.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> transfersort::Result<()> {
//! use transfersort::config::ReportConfig;
//! use transfersort::format::{OutputFormat, to_format_string};
//! use transfersort::parse_transfers;
//!
//! let result = parse_transfers("волжский, с б на л", "б-Берлин,л-Ладожская");
//!
//! let csv = to_format_string(&result, OutputFormat::Csv, &ReportConfig::new())?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("transfers.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::{Result, TransferSortError};
use crate::report::ReportFormatter;
use crate::transfer::ParsingResult;

/// Output format for parsed transfers.
///
/// - [`Report`](OutputFormat::Report) - chat-ready direction blocks (default)
/// - [`Json`](OutputFormat::Json) - the whole parsing result
/// - [`Jsonl`](OutputFormat::Jsonl) - one transfer per line
/// - [`Csv`](OutputFormat::Csv) - flat `;`-delimited table
///
/// # Example
///
/// ```rust
/// use transfersort::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Direction blocks and the unparsed notice, as posted to the chat.
    #[default]
    Report,

    /// Pretty-printed JSON of the whole parsing result.
    Json,

    /// JSON Lines - one transfer per line.
    Jsonl,

    /// CSV with semicolon delimiter.
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// # Example
    ///
    /// ```rust
    /// use transfersort::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Report.extension(), "txt");
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Report => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["report", "json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Report,
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Csv,
        ]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transfersort::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.md").unwrap(), OutputFormat::Report);
    /// assert!(OutputFormat::from_path("out.xml").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "txt" | "md" => Ok(OutputFormat::Report),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(TransferSortError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, md, json, jsonl, csv"),
            )),
        }
    }

    /// Name of the cargo feature this format needs, if any.
    fn required_feature(self) -> Option<&'static str> {
        match self {
            OutputFormat::Report => None,
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
            OutputFormat::Csv => Some("csv-output"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Report => write!(f, "Report"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" => Ok(OutputFormat::Report),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the result to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The format is [`Report`](OutputFormat::Report) and no shop was configured
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_to_format(
    result: &ParsingResult,
    path: &str,
    format: OutputFormat,
    report: &ReportConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(result, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(result, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(result, path),
        OutputFormat::Report => {
            let text = render_report(result, report)?;
            File::create(path)?.write_all(text.as_bytes())?;
            Ok(())
        }
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts the result to a string in the specified format.
///
/// # Errors
///
/// Same as [`write_to_format`], minus the file errors.
pub fn to_format_string(
    result: &ParsingResult,
    format: OutputFormat,
    report: &ReportConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(result),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(result),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(result),
        OutputFormat::Report => render_report(result, report),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

fn render_report(result: &ParsingResult, config: &ReportConfig) -> Result<String> {
    let report = ReportFormatter::with_config(config).format_transfers(result)?;
    Ok(report.to_text())
}

fn missing_feature(format: OutputFormat) -> TransferSortError {
    TransferSortError::invalid_format(
        "output",
        format!(
            "Output format {format:?} requires the '{}' feature to be enabled",
            format.required_feature().unwrap_or("default")
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_transfers;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("report").unwrap(), OutputFormat::Report);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Report.to_string(), "Report");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a.txt").unwrap(), OutputFormat::Report);
        assert_eq!(OutputFormat::from_path("/x/a.JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("a.ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_path("a.csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_path("a.xml").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_format_all_and_default() {
        assert_eq!(OutputFormat::all().len(), 4);
        assert_eq!(OutputFormat::default(), OutputFormat::Report);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"report\"").unwrap();
        assert_eq!(parsed, OutputFormat::Report);
    }

    #[test]
    fn test_report_string_requires_shops() {
        let result = parse_transfers("волжский, с б на л", "");
        let err = to_format_string(&result, OutputFormat::Report, &ReportConfig::new())
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_structured_formats_ignore_empty_map() {
        let result = parse_transfers("волжский, с б на л", "");
        let json = to_format_string(&result, OutputFormat::Json, &ReportConfig::new()).unwrap();
        assert!(json.contains("\"unparsed\""));
    }

    #[test]
    fn test_write_report_file() {
        let result = parse_transfers("волжский, с б на л", "б-Берлин,л-Ладожская");
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_to_format(&result, path, OutputFormat::Report, &ReportConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("*БЕРЛИН ➡️ ЛАДОЖСКАЯ*"));
    }
}
