//! Structured transfer records.
//!
//! This module provides [`Transfer`], one movement of one product from one
//! shop branch to another, plus the aggregate types the parser returns:
//! [`Category`] and [`ParsingResult`].
//!
//! # Example
//!
//! ```
//! use transfersort::Transfer;
//!
//! let transfer = Transfer::new("черника", "с б 1 на л")
//!     .with_source("б", "Берлин")
//!     .with_destination("л", "Ладожская")
//!     .with_raw_quantity("1");
//!
//! assert_eq!(transfer.direction(), "Берлин ➡️ Ладожская");
//! assert_eq!(transfer.quantity(), "1 шт");
//! ```
//!
//! # Serialization
//!
//! Field names are camelCase on the wire and `category` is omitted when
//! absent:
//!
//! ```
//! use transfersort::Transfer;
//!
//! let transfer = Transfer::new("малина", "с к на л");
//! let json = serde_json::to_string(&transfer)?;
//!
//! assert!(json.contains("\"rawQuantity\""));
//! assert!(!json.contains("category"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quantity::to_quantity_string;
use crate::shops::ShopBranchMap;

/// Separator between source and destination in a direction label.
pub const DIRECTION_SEPARATOR: &str = " ➡️ ";

/// One unit of movement between two shop branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Trimmed product display name.
    pub product: String,

    /// Category header of the group the line belonged to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub category: Option<String>,

    /// Resolved source code (or the raw letter when unknown).
    pub source: String,

    /// Source full name (or the raw letter when unknown).
    pub source_shop: String,

    /// Resolved destination code.
    pub destination: String,

    /// Destination full name.
    pub destination_shop: String,

    /// Quantity as typed, possibly empty. See [`Transfer::quantity`].
    pub raw_quantity: String,

    /// The segment text this record was derived from.
    pub raw_text: String,
}

impl Transfer {
    /// Creates a transfer for `product` with empty shop and quantity fields.
    pub fn new(product: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            category: None,
            source: String::new(),
            source_shop: String::new(),
            destination: String::new(),
            destination_shop: String::new(),
            raw_quantity: String::new(),
            raw_text: raw_text.into(),
        }
    }

    /// Sets the source code and shop name.
    #[must_use]
    pub fn with_source(mut self, code: impl Into<String>, shop: impl Into<String>) -> Self {
        self.source = code.into();
        self.source_shop = shop.into();
        self
    }

    /// Sets the destination code and shop name.
    #[must_use]
    pub fn with_destination(mut self, code: impl Into<String>, shop: impl Into<String>) -> Self {
        self.destination = code.into();
        self.destination_shop = shop.into();
        self
    }

    /// Sets the raw quantity fragment.
    #[must_use]
    pub fn with_raw_quantity(mut self, raw: impl Into<String>) -> Self {
        self.raw_quantity = raw.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Direction label, `"<source shop> ➡️ <destination shop>"`.
    pub fn direction(&self) -> String {
        format!(
            "{}{}{}",
            self.source_shop, DIRECTION_SEPARATOR, self.destination_shop
        )
    }

    /// Normalized quantity, e.g. `"2 шт"`.
    pub fn quantity(&self) -> String {
        to_quantity_string(&self.raw_quantity)
    }
}

/// A category header and the distinct products recorded under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Header text as typed.
    pub name: String,
    /// Product names in first-seen order, without duplicates.
    pub products: Vec<String>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            products: Vec::new(),
        }
    }

    /// Records a product unless it is already listed.
    pub fn add_product(&mut self, product: &str) {
        if !self.products.iter().any(|p| p == product) {
            self.products.push(product.to_string());
        }
    }
}

/// Everything the parser extracted from one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingResult {
    /// Transfers keyed by direction label, each list in discovery order.
    pub transfers_by_direction: BTreeMap<String, Vec<Transfer>>,
    /// Lines that produced no transfer and were not category headers.
    pub unparsed: Vec<String>,
    /// The shop map the message was parsed with.
    pub shop_branch_map: ShopBranchMap,
    /// Non-empty categories in order of appearance.
    pub categories: Vec<Category>,
}

impl ParsingResult {
    /// Total number of transfers across all directions.
    pub fn transfer_count(&self) -> usize {
        self.transfers_by_direction.values().map(Vec::len).sum()
    }

    /// All transfers, direction by direction.
    pub fn transfers(&self) -> impl Iterator<Item = &Transfer> {
        self.transfers_by_direction.values().flatten()
    }

    /// `true` when nothing at all was extracted and nothing was left over.
    pub fn is_empty(&self) -> bool {
        self.transfers_by_direction.is_empty() && self.unparsed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_builder() {
        let t = Transfer::new("малина", "с к 2 на л")
            .with_source("к", "Кулакова")
            .with_destination("л", "Ладожская")
            .with_raw_quantity("2")
            .with_category("Lucky Vaper");

        assert_eq!(t.product, "малина");
        assert_eq!(t.source_shop, "Кулакова");
        assert_eq!(t.destination, "л");
        assert_eq!(t.category.as_deref(), Some("Lucky Vaper"));
        assert_eq!(t.quantity(), "2 шт");
    }

    #[test]
    fn test_direction_label() {
        let t = Transfer::new("x", "с б на т")
            .with_source("б", "Берлин")
            .with_destination("т", "Терновка");
        assert_eq!(t.direction(), "Берлин ➡️ Терновка");
    }

    #[test]
    fn test_default_quantity() {
        assert_eq!(Transfer::new("x", "").quantity(), "1 шт");
    }

    #[test]
    fn test_category_dedup() {
        let mut c = Category::new("Dojo 12к");
        c.add_product("Табак");
        c.add_product("Киви");
        c.add_product("Табак");
        assert_eq!(c.products, vec!["Табак", "Киви"]);
    }

    #[test]
    fn test_result_counts() {
        let mut result = ParsingResult::default();
        assert!(result.is_empty());

        result.transfers_by_direction.insert(
            "a ➡️ b".into(),
            vec![Transfer::new("x", ""), Transfer::new("y", "")],
        );
        result
            .transfers_by_direction
            .insert("b ➡️ a".into(), vec![Transfer::new("z", "")]);

        assert_eq!(result.transfer_count(), 3);
        assert_eq!(result.transfers().count(), 3);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_serde_camel_case() {
        let t = Transfer::new("x", "с б на л").with_source("б", "Берлин");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["sourceShop"], "Берлин");
        assert!(json.get("category").is_none());

        let back: Transfer = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
