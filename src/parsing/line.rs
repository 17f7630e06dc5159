//! Per-line transfer extraction.
//!
//! A line looks like `<product>[,] <transfer> [<transfer> ...]` where each
//! transfer is roughly `с <source> [quantity] на <destination>`. Nothing is
//! delimited reliably, so extraction works backwards from destinations:
//!
//! 1. every `на <token>` whose token is a known shop is a destination
//! 2. each destination takes the nearest `с <token>` before it, or failing
//!    that the nearest bare word that is a shop
//! 3. the earliest source marks where the product name ends
//! 4. each pair is rewritten into a canonical segment for [`parse_segment`]
//!
//! Conjunction lists (`с к и б`, `на л и б`) are kept whole inside the
//! segment so [`expand_segments`] can split them.
//!
//! [`parse_segment`]: super::segment::parse_segment
//! [`expand_segments`]: super::expand::expand_segments

use std::sync::LazyLock;

use regex::{Match, Regex};
use tracing::debug;

use crate::shops::{Resolution, ShopBranchMap};

static DESTINATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(на)\s+([^\s.,]+)").expect("invalid destination regex")
});

static LAST_SOURCE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)с\s+([^\s.,]+)[^с]*$").expect("invalid source marker regex")
});

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s.,]+").expect("invalid word regex"));

static TRAILING_SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)с\s+[^\s.,]+\s*$").expect("invalid trailing source regex")
});

static TRAILING_PREPOSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+)\s+с\s*$").expect("invalid preposition regex"));

static RATE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+по\s+([0-9]+)\s+шт$").expect("invalid rate regex"));

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9]+(?:шт)?$").expect("invalid count regex"));

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9A-Za-z_])([0-9]+(?:\s+шт)?)").expect("invalid quantity regex")
});

/// What one line yielded before segment expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineExtraction {
    /// Product name with any trailing `по N шт` removed.
    pub product: String,
    /// Canonical segments, one per source/destination pair, in source order.
    pub segments: Vec<String>,
    /// Quantity from a `по N шт` product suffix, for transfers without one.
    pub quantity_override: Option<String>,
}

/// A shop token and its byte span within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    text: &'a str,
    end: usize,
}

impl<'a> From<Match<'a>> for Token<'a> {
    fn from(m: Match<'a>) -> Self {
        Self {
            text: m.as_str(),
            end: m.end(),
        }
    }
}

/// How a source token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    /// After a `с` marker; may be a merged cluster such as `бк`.
    Marked,
    /// A bare word that starts with a shop code; only that code counts.
    Word,
}

/// A destination paired with the source found for it.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    /// Where the source occurrence starts (including its `с` marker).
    source_start: usize,
    source: Token<'a>,
    source_kind: SourceKind,
    /// Where the `на` marker starts.
    marker_start: usize,
    destination: Token<'a>,
}

/// Extracts the product and canonical segments from one line.
///
/// Returns `None` when no destination has a resolvable source or the product
/// name comes out empty; the caller records the line as unparsed.
///
/// ```
/// use transfersort::parsing::extract_line;
/// use transfersort::shops::ShopBranchMap;
///
/// let shops = ShopBranchMap::parse("б-Берлин,к-Кулакова,л-Ладожская");
/// let extraction = extract_line("алтайский, с б 1 на к. с б 1 на л", &shops).unwrap();
///
/// assert_eq!(extraction.product, "алтайский");
/// assert_eq!(extraction.segments, vec!["с б 1 на к", "с б 1 на л"]);
/// ```
pub fn extract_line(line: &str, shops: &ShopBranchMap) -> Option<LineExtraction> {
    let mut candidates = find_candidates(line, shops);
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by_key(|c| c.source_start);

    let product = product_name(&line[..candidates[0].source_start]);
    let (product, quantity_override) = split_rate_suffix(&product);
    if product.is_empty() {
        debug!(line, "product name is empty");
        return None;
    }

    let segments = candidates
        .iter()
        .map(|candidate| build_segment(line, candidate, shops))
        .collect();

    Some(LineExtraction {
        product,
        segments,
        quantity_override,
    })
}

/// Pairs every valid destination on the line with its nearest source.
fn find_candidates<'a>(line: &'a str, shops: &ShopBranchMap) -> Vec<Candidate<'a>> {
    DESTINATION_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let marker = caps.get(1)?;
            let destination = caps.get(2)?;
            if !shops.is_valid_shop(destination.as_str()) {
                return None;
            }

            let Some((source_start, source, source_kind)) =
                find_source(&line[..marker.start()], shops)
            else {
                // A sibling destination on the same line may still resolve
                debug!(
                    line,
                    destination = destination.as_str(),
                    "dropping destination without a source"
                );
                return None;
            };

            Some(Candidate {
                source_start,
                source,
                source_kind,
                marker_start: marker.start(),
                destination: destination.into(),
            })
        })
        .collect()
}

/// Nearest source before a destination marker: the last `с <shop>` if its
/// token is a shop, otherwise the last bare word that is one.
fn find_source<'a>(
    before: &'a str,
    shops: &ShopBranchMap,
) -> Option<(usize, Token<'a>, SourceKind)> {
    let before = before.trim_end();

    if let Some(caps) = LAST_SOURCE_MARKER_RE.captures(before) {
        if let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) {
            if shops.is_valid_shop(token.as_str()) {
                return Some((whole.start(), token.into(), SourceKind::Marked));
            }
        }
    }

    let words: Vec<Match<'a>> = WORD_RE.find_iter(before).collect();
    words
        .into_iter()
        .rev()
        .find(|word| shops.is_valid_shop(word.as_str()))
        .map(|word| (word.start(), word.into(), SourceKind::Word))
}

/// Product name from the text before the first source.
fn product_name(prefix: &str) -> String {
    let prefix = prefix.trim();
    let end = TRAILING_SOURCE_RE
        .find(prefix)
        .map_or(prefix.len(), |m| m.start());

    let product = prefix[..end].trim();
    let product = product.strip_suffix(',').unwrap_or(product).trim();

    match TRAILING_PREPOSITION_RE.captures(product) {
        Some(caps) => caps[1].trim().to_string(),
        None => product.to_string(),
    }
}

/// Splits a trailing `по N шт` off the product name.
fn split_rate_suffix(product: &str) -> (String, Option<String>) {
    let Some(caps) = RATE_SUFFIX_RE.captures(product) else {
        return (product.to_string(), None);
    };
    let (Some(whole), Some(count)) = (caps.get(0), caps.get(1)) else {
        return (product.to_string(), None);
    };

    let name = product[..whole.start()].trim();
    let name = name.strip_suffix(',').unwrap_or(name).trim();
    (name.to_string(), Some(format!("{} шт", count.as_str())))
}

/// Rewrites a candidate as `с <source> [quantity] на <destination>`.
fn build_segment(line: &str, candidate: &Candidate<'_>, shops: &ShopBranchMap) -> String {
    let between = &line[candidate.source.end..candidate.marker_start];
    let after = &line[candidate.destination.end..];

    let source = source_token(candidate, shops);
    let (source, between) = match conjunction_list(between, shops) {
        Some((list, rest)) => (format!("{source} {list}"), rest),
        None => (source, between),
    };

    let destination = match conjunction_list(after, shops) {
        Some((list, _)) => format!("{} {}", candidate.destination.text, list),
        None => candidate.destination.text.to_string(),
    };

    match first_quantity(between) {
        Some(quantity) => format!("с {source} {quantity} на {destination}"),
        None => format!("с {source} на {destination}"),
    }
}

/// Source as written into the segment. A bare word stands for the shop whose
/// code it starts with unless it is a full shop name.
fn source_token(candidate: &Candidate<'_>, shops: &ShopBranchMap) -> String {
    let text = candidate.source.text;
    match (candidate.source_kind, shops.resolve(text)) {
        (SourceKind::Marked, _) | (SourceKind::Word, Resolution::ExactName { .. }) => {
            text.to_string()
        }
        (SourceKind::Word, resolved) => resolved.code().to_string(),
    }
}

/// First quantity fragment in `text`: a number, optionally with `шт`.
fn first_quantity(text: &str) -> Option<&str> {
    QUANTITY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Reads `[по N | N [шт]] и <shop> [по N] [и <shop> [по N] ...]` from the
/// start of `text`.
///
/// Returns the list in canonical spacing plus the unread remainder, or `None`
/// when the text does not continue with at least one `и <shop>`. `и на ...`
/// is not a list item: that destination is found on its own.
fn conjunction_list<'a>(text: &'a str, shops: &ShopBranchMap) -> Option<(String, &'a str)> {
    let words: Vec<Match<'a>> = WORD_RE.find_iter(text).collect();
    let mut parts: Vec<&str> = Vec::new();
    let mut consumed = 0;
    let mut branches = 0;
    let mut i = 0;

    if let Some(rate) = rate_at(&words, i) {
        parts.extend(rate);
        i += 2;
    } else if let Some(count) = count_at(&words, i) {
        i += count.len();
        parts.extend(count);
    }

    while is_and(&words, i) {
        let Some(shop) = words.get(i + 1) else { break };
        if shop.as_str().to_lowercase() == "на" || !shops.is_valid_shop(shop.as_str()) {
            break;
        }
        parts.extend(["и", shop.as_str()]);
        i += 2;
        branches += 1;
        consumed = i;

        if let Some(rate) = rate_at(&words, i) {
            parts.extend(rate);
            i += 2;
            consumed = i;
        }
    }

    if branches == 0 {
        return None;
    }

    let rest = match words.get(consumed) {
        Some(next) => &text[next.start()..],
        None => "",
    };
    Some((parts.join(" "), rest))
}

fn is_and(words: &[Match<'_>], i: usize) -> bool {
    words
        .get(i)
        .is_some_and(|w| w.as_str().to_lowercase() == "и")
}

/// `по N` at position `i`, as its two words.
fn rate_at<'a>(words: &[Match<'a>], i: usize) -> Option<[&'a str; 2]> {
    let (rate, count) = (words.get(i)?, words.get(i + 1)?);
    let is_rate = rate.as_str().to_lowercase() == "по"
        && count.as_str().chars().all(|c| c.is_ascii_digit());
    is_rate.then(|| [rate.as_str(), count.as_str()])
}

/// A bare `N`, `Nшт` or `N шт` at position `i`, as its words.
fn count_at<'a>(words: &[Match<'a>], i: usize) -> Option<Vec<&'a str>> {
    let count = words.get(i)?.as_str();
    if !COUNT_RE.is_match(count) {
        return None;
    }
    match words.get(i + 1) {
        Some(unit) if unit.as_str().to_lowercase() == "шт" => Some(vec![count, unit.as_str()]),
        _ => Some(vec![count]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shops() -> ShopBranchMap {
        ShopBranchMap::parse("б-Берлин,к-Кулакова,л-Ладожская,т-Терновка")
    }

    fn extract(line: &str) -> Option<LineExtraction> {
        extract_line(line, &shops())
    }

    #[test]
    fn test_simple_line() {
        let e = extract("волжский, с б на л").unwrap();
        assert_eq!(e.product, "волжский");
        assert_eq!(e.segments, vec!["с б на л"]);
        assert_eq!(e.quantity_override, None);
    }

    #[test]
    fn test_quantity_between_source_and_destination() {
        let e = extract("байкалский, с к 4 на л").unwrap();
        assert_eq!(e.segments, vec!["с к 4 на л"]);

        let e = extract("берри вс с б 2шт на л").unwrap();
        assert_eq!(e.product, "берри вс");
        assert_eq!(e.segments, vec!["с б 2 на л"]);
    }

    #[test]
    fn test_product_without_comma() {
        let e = extract("дарксайд шот ванильный 4 с к на т").unwrap();
        assert_eq!(e.product, "дарксайд шот ванильный 4");
        assert_eq!(e.segments, vec!["с к на т"]);
    }

    #[test]
    fn test_two_transfers_on_one_line() {
        let e = extract("бегемот, с б на к. с т на л").unwrap();
        assert_eq!(e.product, "бегемот");
        assert_eq!(e.segments, vec!["с б на к", "с т на л"]);
    }

    #[test]
    fn test_second_transfer_quantity_is_its_own() {
        let e = extract("уральский, с б 2 на к. с л 1 на к").unwrap();
        assert_eq!(e.segments, vec!["с б 2 на к", "с л 1 на к"]);
    }

    #[test]
    fn test_merged_cluster_kept_whole() {
        let e = extract("черника, с бк по 1 на л").unwrap();
        assert_eq!(e.product, "черника");
        assert_eq!(e.segments, vec!["с бк 1 на л"]);
    }

    #[test]
    fn test_source_conjunction_list() {
        let e = extract("невский, с к и б по 1 на л").unwrap();
        assert_eq!(e.segments, vec!["с к и б по 1 на л"]);
    }

    #[test]
    fn test_destination_conjunction_list() {
        let e = extract("малина с к на л и б по 2").unwrap();
        assert_eq!(e.segments, vec!["с к на л и б по 2"]);
    }

    #[test]
    fn test_repeated_destination_marker() {
        let e = extract("малина с к на л и на б по 1").unwrap();
        assert_eq!(e.product, "малина");
        assert_eq!(e.segments, vec!["с к на л", "с к на б"]);
    }

    #[test]
    fn test_rate_suffix_on_product() {
        let e = extract("берри вс, по 2 шт с к и б на л").unwrap();
        assert_eq!(e.product, "берри вс");
        assert_eq!(e.quantity_override.as_deref(), Some("2 шт"));
        assert_eq!(e.segments, vec!["с к и б на л"]);
    }

    #[test]
    fn test_full_shop_names() {
        let e = extract("экспириенс батл эпл, с берлин на кулакова").unwrap();
        assert_eq!(e.segments, vec!["с берлин на кулакова"]);
    }

    #[test]
    fn test_bare_word_source() {
        let e = extract("табак к на л").unwrap();
        assert_eq!(e.product, "табак");
        assert_eq!(e.segments, vec!["с к на л"]);
    }

    #[test]
    fn test_invalid_destination_ignored() {
        // "нв" is a typo, there is no "на" marker at all
        assert!(extract("крымский, с л 2 нв к").is_none());
        // "в" is not a configured shop
        assert!(extract("Киви маракуя гуава с х на в").is_none());
    }

    #[test]
    fn test_unknown_marked_source_falls_back_to_shop_word() {
        let e = extract("Грейпфрутовый чай с медом с л на б с х на к").unwrap();
        // "с х" is not a shop, so the nearest shop word before "на к" is "б"
        assert_eq!(e.segments, vec!["с л на б", "с б на к"]);
    }

    #[test]
    fn test_destination_without_source_is_dropped() {
        // Nothing before "на травах" is a shop, only "на л" survives
        let e = extract("Настойка на травах с б на л").unwrap();
        assert_eq!(e.product, "Настойка на травах");
        assert_eq!(e.segments, vec!["с б на л"]);

        let e = extract("мята, на л с б на к").unwrap();
        assert_eq!(e.segments, vec!["с б на к"]);
    }

    #[test]
    fn test_destination_marker_needs_word_boundary() {
        // "малина клубника" is not "на клубника"
        let e = extract("Лед малина клубника с б на т").unwrap();
        assert_eq!(e.product, "Лед малина клубника");
        assert_eq!(e.segments, vec!["с б на т"]);
    }

    #[test]
    fn test_shop_word_source_uses_its_code() {
        let e = extract("Арбуз клубника с в на л").unwrap();
        assert_eq!(e.product, "Арбуз");
        assert_eq!(e.segments, vec!["с к на л"]);

        let e = extract("табак кулакова на л").unwrap();
        assert_eq!(e.segments, vec!["с кулакова на л"]);
    }

    #[test]
    fn test_quantity_before_source_list() {
        let e = extract("невский, с к 2 и б на л").unwrap();
        assert_eq!(e.segments, vec!["с к 2 и б на л"]);

        let e = extract("невский, с к 2 шт и б по 1 на л").unwrap();
        assert_eq!(e.segments, vec!["с к 2 шт и б по 1 на л"]);
    }

    #[test]
    fn test_no_marker_line() {
        assert!(extract("Lucky Vaper").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_empty_product_fails() {
        assert!(extract("с б на л").is_none());
    }

    #[test]
    fn test_trailing_preposition_stripped() {
        assert_eq!(product_name("Табак с"), "Табак");
        assert_eq!(product_name("Табак,"), "Табак");
        assert_eq!(product_name("Микс"), "Микс");
    }

    #[test]
    fn test_first_quantity_ignores_digits_inside_words() {
        assert_eq!(first_quantity(" 2 шт "), Some("2 шт"));
        assert_eq!(first_quantity(" x12 "), None);
        assert_eq!(first_quantity(" и "), None);
    }
}
