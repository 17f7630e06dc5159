//! Quantity normalization.
//!
//! Quantities arrive in many shapes: `2`, `2шт`, `2 шт.`, `по 2`. The report
//! shows them all as `<N> шт`.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical unit suffix.
pub const UNIT: &str = "шт";

/// Quantity assumed when a transfer names none.
pub const DEFAULT_QUANTITY: &str = "1 шт";

static RATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:по\s+)+").expect("invalid rate prefix regex"));

static UNIT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*шт\.?$").expect("invalid unit suffix regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("invalid number regex"));

/// Normalizes a raw quantity fragment to its display form.
///
/// ```
/// use transfersort::quantity::to_quantity_string;
///
/// assert_eq!(to_quantity_string(""), "1 шт");
/// assert_eq!(to_quantity_string("2шт"), "2 шт");
/// assert_eq!(to_quantity_string("по 3"), "3 шт");
/// assert_eq!(to_quantity_string("4 шт."), "4 шт");
/// ```
pub fn to_quantity_string(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_QUANTITY.to_string();
    }

    let without_rate = RATE_PREFIX_RE.replace(raw, "");
    let without_dots = without_rate.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    let with_unit = UNIT_SUFFIX_RE.replace(without_dots, format!(" {UNIT}").as_str());
    let collapsed = WHITESPACE_RE.replace_all(&with_unit, " ");
    let normalized = collapsed.trim();

    if normalized.is_empty() {
        DEFAULT_QUANTITY.to_string()
    } else if BARE_NUMBER_RE.is_match(normalized) {
        format!("{normalized} {UNIT}")
    } else {
        normalized.to_string()
    }
}
