//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`init_logger`] - stderr `tracing` subscriber for the binary
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use transfersort::cli::Args;
//!
//! let args = Args::parse_from(["transfersort", "message.txt", "-b", "б-Берлин", "-f", "csv"]);
//! assert_eq!(args.input, "message.txt");
//! assert_eq!(args.parser_config().shorthands(), "б-Берлин");
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{ParserConfig, ReportConfig};
use crate::report::MarkupKind;

/// Sort free-form stock transfer messages into per-direction reports.
#[derive(Parser, Debug, Clone)]
#[command(name = "transfersort")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    transfersort message.txt -b 'б-Берлин,к-Кулакова,л-Ладожская'
    BRANCH_DESIGNATIONS='б-Берлин,л-Ладожская' transfersort < message.txt
    transfersort message.txt -f csv -o transfers.csv
    transfersort message.txt --plain -v")]
pub struct Args {
    /// Path to the message file, `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Shop shorthands as `code-Name,code-Name`
    #[arg(short, long, env = "BRANCH_DESIGNATIONS", default_value = "", hide_env_values = true)]
    pub branches: String,

    /// Path to output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "report")]
    pub format: OutputFormat,

    /// Render the report without MarkdownV2 escaping
    #[arg(long)]
    pub plain: bool,

    /// Section name for transfers outside any category
    #[arg(long, value_name = "NAME")]
    pub fallback_category: Option<String>,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether the message is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }

    /// Parser configuration from the flags.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_shorthands(self.branches.clone())
    }

    /// Report configuration from the flags.
    pub fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::new();
        if self.plain {
            config = config.with_markup(MarkupKind::Plain);
        }
        if let Some(name) = &self.fallback_category {
            config = config.with_fallback_category(name.clone());
        }
        config
    }
}

/// Output format options.
///
/// - [`Report`](OutputFormat::Report) - chat-ready direction blocks (default)
/// - [`Json`](OutputFormat::Json) - the whole parsing result
/// - [`Jsonl`](OutputFormat::Jsonl) - one transfer per line
/// - [`Csv`](OutputFormat::Csv) - flat table with semicolon delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Direction blocks as posted to the chat
    #[default]
    Report,

    /// Whole parsing result as JSON
    Json,

    /// One JSON transfer per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Report => crate::format::OutputFormat::Report,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or parser
/// decisions too with `verbose`.
pub fn init_logger(verbose: bool) {
    let default = if verbose {
        "transfersort=debug"
    } else {
        "transfersort=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
