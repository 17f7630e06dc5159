//! Chat-ready transfer reports.
//!
//! [`ReportFormatter`] turns a [`ParsingResult`] into one text block per
//! direction plus an optional notice listing the lines nobody could parse.
//! Chunking blocks into transport-sized messages is left to the caller.
//!
//! ```text
//!
//! 🚚 *БЕРЛИН ➡️ ЛАДОЖСКАЯ*
//!
//! 📦 *Без категории*
//!
//! \(1 шт\)  волжский
//! ```
//!
//! Text is escaped through a [`Markup`] policy, so the same report can be
//! rendered for Telegram `MarkdownV2` or as plain text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::{Result, TransferSortError};
use crate::transfer::{ParsingResult, Transfer};

/// Title of the unparsed-lines notice.
pub const UNPARSED_TITLE: &str = "Не удалось проанализировать (требуется обработка вручную):";

/// Category shown for transfers outside any category group.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Без категории";

/// Escaping policy for report text.
pub trait Markup {
    /// Escapes literal text.
    fn escape(&self, text: &str) -> String;

    /// Escapes `text` and marks it bold.
    fn bold(&self, text: &str) -> String;
}

/// Telegram `MarkdownV2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownV2;

impl MarkdownV2 {
    const RESERVED: &'static [char] = &[
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
        '!',
    ];
}

impl Markup for MarkdownV2 {
    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if Self::RESERVED.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn bold(&self, text: &str) -> String {
        format!("*{}*", self.escape(text))
    }
}

/// Unformatted text. Nothing is escaped and bold is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainText;

impl Markup for PlainText {
    fn escape(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Markup selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    #[default]
    MarkdownV2,
    Plain,
}

impl Markup for MarkupKind {
    fn escape(&self, text: &str) -> String {
        match self {
            MarkupKind::MarkdownV2 => MarkdownV2.escape(text),
            MarkupKind::Plain => PlainText.escape(text),
        }
    }

    fn bold(&self, text: &str) -> String {
        match self {
            MarkupKind::MarkdownV2 => MarkdownV2.bold(text),
            MarkupKind::Plain => PlainText.bold(text),
        }
    }
}

/// A rendered report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// One block per direction, in direction order.
    pub blocks: Vec<String>,
    /// Notice listing unparsed lines, if there were any.
    pub unparsed_notice: Option<String>,
}

impl Report {
    /// Whether the report has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.unparsed_notice.is_none()
    }

    /// All blocks and the notice joined with blank lines.
    pub fn to_text(&self) -> String {
        self.blocks
            .iter()
            .map(String::as_str)
            .chain(self.unparsed_notice.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders parsing results as direction blocks.
///
/// # Example
///
/// ```rust
/// use transfersort::parse_transfers;
/// use transfersort::report::{PlainText, ReportFormatter};
///
/// let result = parse_transfers("волжский, с б на л", "б-Берлин,л-Ладожская");
/// let report = ReportFormatter::new()
///     .with_markup(PlainText)
///     .format_transfers(&result)
///     .unwrap();
///
/// assert_eq!(report.blocks.len(), 1);
/// assert!(report.blocks[0].contains("БЕРЛИН ➡️ ЛАДОЖСКАЯ"));
/// assert!(report.blocks[0].contains("(1 шт)  волжский"));
/// ```
#[derive(Debug, Clone)]
pub struct ReportFormatter<M = MarkupKind> {
    markup: M,
    fallback_category: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter {
    /// `MarkdownV2` output with the default fallback category.
    pub fn new() -> Self {
        Self {
            markup: MarkupKind::default(),
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
        }
    }

    /// Formatter described by configuration.
    pub fn with_config(config: &ReportConfig) -> Self {
        Self {
            markup: config.markup,
            fallback_category: config.fallback_category.clone(),
        }
    }
}

impl<M: Markup> ReportFormatter<M> {
    /// Replaces the markup policy.
    #[must_use]
    pub fn with_markup<N: Markup>(self, markup: N) -> ReportFormatter<N> {
        ReportFormatter {
            markup,
            fallback_category: self.fallback_category,
        }
    }

    /// Sets the category name used for uncategorized transfers.
    #[must_use]
    pub fn with_fallback_category(mut self, name: impl Into<String>) -> Self {
        self.fallback_category = name.into();
        self
    }

    /// Renders `result`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferSortError::EmptyBranchMap`] when the result was
    /// parsed without any shop configured.
    pub fn format_transfers(&self, result: &ParsingResult) -> Result<Report> {
        if result.shop_branch_map.is_empty() {
            return Err(TransferSortError::empty_branch_map());
        }

        let blocks = result
            .transfers_by_direction
            .iter()
            .map(|(direction, transfers)| self.direction_block(direction, transfers))
            .collect();

        Ok(Report {
            blocks,
            unparsed_notice: self.unparsed_notice(&result.unparsed),
        })
    }

    fn direction_block(&self, direction: &str, transfers: &[Transfer]) -> String {
        let sections: Vec<String> = self
            .by_category(transfers)
            .into_iter()
            .map(|(category, products)| self.category_section(category, &products))
            .collect();

        format!(
            "\n🚚 {}\n\n{}\n",
            self.markup.bold(&direction.to_uppercase()),
            sections.join("\n\n")
        )
    }

    /// Fallback section first, then categories in order of appearance.
    fn by_category<'a>(
        &'a self,
        transfers: &'a [Transfer],
    ) -> Vec<(&'a str, Vec<&'a Transfer>)> {
        let mut sections: Vec<(&str, Vec<&Transfer>)> =
            vec![(self.fallback_category.as_str(), Vec::new())];

        for transfer in transfers {
            let category = transfer
                .category
                .as_deref()
                .unwrap_or(self.fallback_category.as_str());
            match sections.iter_mut().find(|(name, _)| *name == category) {
                Some((_, items)) => items.push(transfer),
                None => sections.push((category, vec![transfer])),
            }
        }

        sections.retain(|(_, items)| !items.is_empty());
        sections
    }

    fn category_section(&self, category: &str, transfers: &[&Transfer]) -> String {
        let mut products: BTreeMap<(String, &str), Vec<&Transfer>> = BTreeMap::new();
        for transfer in transfers {
            products
                .entry((transfer.product.to_lowercase(), transfer.product.as_str()))
                .or_default()
                .push(transfer);
        }

        let lines: Vec<String> = products
            .values()
            .flatten()
            .map(|transfer| {
                format!(
                    "{}  {}",
                    self.markup.escape(&format!("({})", transfer.quantity())),
                    self.markup.escape(&transfer.product)
                )
            })
            .collect();

        format!("📦 {}\n\n{}", self.markup.bold(category), lines.join("\n"))
    }

    fn unparsed_notice(&self, unparsed: &[String]) -> Option<String> {
        if unparsed.is_empty() {
            return None;
        }

        let bullets: Vec<String> = unparsed
            .iter()
            .map(|line| format!("• {}", self.markup.escape(line)))
            .collect();

        Some(format!(
            "\n⚠️ {}\n\n{}",
            self.markup.bold(UNPARSED_TITLE),
            bullets.join("\n")
        ))
    }
}

/// Renders `result` with default settings.
///
/// # Errors
///
/// See [`ReportFormatter::format_transfers`].
pub fn format_transfers(result: &ParsingResult) -> Result<Report> {
    ReportFormatter::new().format_transfers(result)
}
