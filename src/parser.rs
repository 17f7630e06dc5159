//! The transfer parser.
//!
//! [`TransferParser`] chains the [`parsing`](crate::parsing) stages over a
//! whole message and aggregates the outcome into a [`ParsingResult`].
//!
//! # Example
//!
//! ```rust
//! use transfersort::parser::TransferParser;
//!
//! let parser = TransferParser::from_shorthands("б-Берлин,к-Кулакова,л-Ладожская");
//! let result = parser.parse("Lucky Vaper\nЧерника, с бк по 1 на л\nМалина, с б на к\nпривет");
//!
//! assert_eq!(result.transfer_count(), 3);
//! assert_eq!(result.unparsed, vec!["привет"]);
//! assert_eq!(result.categories[0].name, "Lucky Vaper");
//! ```
//!
//! Parsing never fails. Lines that cannot be understood end up in
//! [`ParsingResult::unparsed`]; an empty shop map is reported by the
//! [`report`](crate::report) formatter, not here.

use tracing::debug;

use crate::config::ParserConfig;
use crate::core::processor::{ParsingStats, group_by_direction};
use crate::parsing::{
    expand_segments, extract_line, identify_categories, parse_segment, split_groups,
};
use crate::shops::ShopBranchMap;
use crate::transfer::{Category, ParsingResult, Transfer};

/// Parses transfer messages against one shop map.
///
/// The parser holds no per-message state, so one instance can serve any
/// number of messages, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct TransferParser {
    shops: ShopBranchMap,
}

impl TransferParser {
    /// Creates a parser for the given shops.
    pub fn new(shops: ShopBranchMap) -> Self {
        Self { shops }
    }

    /// Creates a parser from a `code-Name,code-Name` string.
    pub fn from_shorthands(shorthands: &str) -> Self {
        Self::new(ShopBranchMap::parse(shorthands))
    }

    /// Creates a parser from configuration.
    pub fn with_config(config: &ParserConfig) -> Self {
        Self::from_shorthands(config.shorthands())
    }

    /// The shop map used for resolution.
    pub fn shops(&self) -> &ShopBranchMap {
        &self.shops
    }

    /// Parses one line into transfers without category information.
    ///
    /// An empty vector means the line is not a transfer line.
    pub fn parse_line(&self, line: &str) -> Vec<Transfer> {
        self.parse_line_in_category(line, None)
    }

    /// Parses one line and stamps `category` on every transfer.
    pub fn parse_line_in_category(&self, line: &str, category: Option<&str>) -> Vec<Transfer> {
        let Some(extraction) = extract_line(line.trim(), &self.shops) else {
            return Vec::new();
        };

        expand_segments(&extraction.segments)
            .iter()
            .flat_map(|segment| parse_segment(&extraction.product, segment, &self.shops))
            .map(|mut transfer| {
                if transfer.raw_quantity.is_empty() {
                    if let Some(quantity) = &extraction.quantity_override {
                        transfer.raw_quantity.clone_from(quantity);
                    }
                }
                transfer.category = category.map(str::to_string);
                transfer
            })
            .collect()
    }

    /// Parses a whole message.
    pub fn parse(&self, input: &str) -> ParsingResult {
        self.parse_with_stats(input).0
    }

    /// Parses a whole message and reports summary statistics.
    pub fn parse_with_stats(&self, input: &str) -> (ParsingResult, ParsingStats) {
        let groups = split_groups(input);
        let headers = identify_categories(&groups);

        let mut transfers = Vec::new();
        let mut unparsed = Vec::new();
        let mut categories: Vec<Category> = Vec::new();
        let mut parsed_lines = 0;

        for group in &groups {
            let category = group
                .first()
                .and_then(|line| headers.get(&line.index))
                .copied();

            for line in &group.lines {
                if headers.contains_key(&line.index) {
                    if !categories.iter().any(|c| c.name == line.text) {
                        categories.push(Category::new(line.text));
                    }
                    continue;
                }

                let line_transfers = self.parse_line_in_category(line.text, category);
                if line_transfers.is_empty() {
                    debug!(index = line.index, line = line.text, "line not parsed");
                    unparsed.push(line.text.to_string());
                    continue;
                }

                if let Some(entry) =
                    category.and_then(|name| categories.iter_mut().find(|c| c.name == name))
                {
                    for transfer in &line_transfers {
                        entry.add_product(&transfer.product);
                    }
                }

                parsed_lines += 1;
                transfers.extend(line_transfers);
            }
        }

        categories.retain(|c| !c.products.is_empty());

        let result = ParsingResult {
            transfers_by_direction: group_by_direction(transfers),
            unparsed,
            shop_branch_map: self.shops.clone(),
            categories,
        };
        let stats = ParsingStats::new(&result, parsed_lines);

        debug!(
            transfers = stats.transfers,
            directions = stats.directions,
            unparsed = stats.unparsed,
            "message parsed"
        );

        (result, stats)
    }
}

/// Parses `input` with shops from a `code-Name,code-Name` string.
///
/// Convenience wrapper around [`TransferParser`].
pub fn parse_transfers(input: &str, shorthands: &str) -> ParsingResult {
    TransferParser::from_shorthands(shorthands).parse(input)
}
