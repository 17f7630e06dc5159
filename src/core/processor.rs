//! Direction bucketing and parse statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::transfer::{ParsingResult, Transfer};

/// Buckets transfers by their direction label.
///
/// Transfers keep their relative order inside each bucket.
///
/// # Example
/// Input:  [Берлин→Кулакова "a", Кулакова→Ладожская "b", Берлин→Кулакова "c"]
/// Output: {"Берлин ➡️ Кулакова": ["a", "c"], "Кулакова ➡️ Ладожская": ["b"]}
pub fn group_by_direction(transfers: Vec<Transfer>) -> BTreeMap<String, Vec<Transfer>> {
    let mut grouped: BTreeMap<String, Vec<Transfer>> = BTreeMap::new();

    for transfer in transfers {
        grouped.entry(transfer.direction()).or_default().push(transfer);
    }

    grouped
}

/// Summary numbers for one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsingStats {
    pub transfers: usize,
    pub directions: usize,
    pub categories: usize,
    pub unparsed: usize,
    /// Lines that produced at least one transfer.
    pub parsed_lines: usize,
}

impl ParsingStats {
    /// Computes statistics for a result.
    ///
    /// The number of lines that produced transfers cannot be recovered from
    /// the buckets, so the parser passes it in.
    pub fn new(result: &ParsingResult, parsed_lines: usize) -> Self {
        Self {
            transfers: result.transfer_count(),
            directions: result.transfers_by_direction.len(),
            categories: result.categories.len(),
            unparsed: result.unparsed.len(),
            parsed_lines,
        }
    }

    /// Share of transfer lines that were understood, in percent.
    pub fn success_rate(&self) -> f64 {
        let total = self.parsed_lines + self.unparsed;
        if total == 0 {
            return 100.0;
        }
        self.parsed_lines as f64 / total as f64 * 100.0
    }
}
