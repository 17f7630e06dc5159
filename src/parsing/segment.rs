//! Simple segment parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::Transfer;
use crate::shops::{Resolution, ShopBranchMap};

static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)с\s+(\S+)([^н]*?)на\s+(\S+)([^с]*?)$")
        .expect("invalid simple segment regex")
});

/// Turns one simple segment into transfers of `product`.
///
/// The segment is `с <source> [quantity] на <destination> [quantity]`; a
/// quantity after the destination wins over one before it. A source that is
/// not a full shop name but several letters without spaces (`бк`) is a
/// merged cluster and yields one transfer per letter. Unknown codes are kept
/// as their raw letter.
///
/// Returns an empty vector when the segment does not have that shape.
///
/// ```
/// use transfersort::parsing::parse_segment;
/// use transfersort::shops::ShopBranchMap;
///
/// let shops = ShopBranchMap::parse("б-Берлин,к-Кулакова,л-Ладожская");
/// let transfers = parse_segment("черника", "с бк 1 на л", &shops);
///
/// assert_eq!(transfers.len(), 2);
/// assert_eq!(transfers[0].source_shop, "Берлин");
/// assert_eq!(transfers[1].source_shop, "Кулакова");
/// assert!(transfers.iter().all(|t| t.destination_shop == "Ладожская"));
/// ```
pub fn parse_segment(product: &str, segment: &str, shops: &ShopBranchMap) -> Vec<Transfer> {
    let Some(caps) = SEGMENT_RE.captures(segment) else {
        return Vec::new();
    };
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let (source_raw, before, destination_raw, after) = (group(1), group(2), group(3), group(4));

    let raw_quantity = match (after.trim(), before.trim()) {
        ("", before) => before,
        (after, _) => after,
    };

    let (destination, destination_shop) = shops.resolve(destination_raw).into_parts();
    let template = Transfer::new(product.trim(), segment.trim())
        .with_destination(destination, destination_shop)
        .with_raw_quantity(raw_quantity);

    source_resolutions(source_raw, shops)
        .into_iter()
        .map(|source| {
            let (code, shop) = source.into_parts();
            template.clone().with_source(code, shop)
        })
        .collect()
}

/// Resolves a source token, expanding merged clusters letter by letter.
fn source_resolutions(token: &str, shops: &ShopBranchMap) -> Vec<Resolution> {
    let resolved = shops.resolve(token);
    let is_cluster = token.chars().count() > 1 && !token.chars().any(char::is_whitespace);

    match resolved {
        Resolution::ExactName { .. } => vec![resolved],
        _ if is_cluster => token.chars().map(|c| shops.resolve_code(c)).collect(),
        _ => vec![resolved],
    }
}
