//! Conjunction expansion.
//!
//! Two shapes are split into simple segments:
//!
//! | Shape | Example | Result |
//! |-------|---------|--------|
//! | several sources, one destination | `с к и б по 1 на л` | `с к 1 на л`, `с б 1 на л` |
//! | one source, several destinations | `с к 2 на л и т по 1` | `с к 2 на л`, `с к 1 на т` |
//!
//! For source lists the quantity after the last source is shared by every
//! source without its own `по N`. For destination lists the quantity between
//! the source and `на` is shared and a `по N` after a destination overrides it
//! for that destination only.
//!
//! Fused clusters such as `бк` have no separator and are left for
//! [`parse_segment`](super::segment::parse_segment).

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*с\s+(.+?)\s+на\s+(.+?)\s*$").expect("invalid segment regex")
});

static CONJUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+и\s+").expect("invalid conjunction regex"));

static DESTINATION_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+и\s+(?:на\s+)?").expect("invalid destination separator regex")
});

static BRANCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\S+)(?:\s+(?:по\s+)?(.+?))?\s*$").expect("invalid branch regex")
});

/// Splits every segment that joins sources or destinations with `и`.
///
/// Segments without a conjunction pass through unchanged.
///
/// ```
/// use transfersort::parsing::expand_segments;
///
/// let expanded = expand_segments(&["с к и б по 1 на л".to_string()]);
/// assert_eq!(expanded, vec!["с к 1 на л", "с б 1 на л"]);
/// ```
pub fn expand_segments(segments: &[String]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|segment| expand_sources(segment))
        .flat_map(|segment| expand_destinations(&segment))
        .collect()
}

/// Shape (a): `с A и B [qty] на D`.
fn expand_sources(segment: &str) -> Vec<String> {
    let Some((sources, destination)) = split_segment(segment) else {
        return vec![segment.to_string()];
    };
    if !CONJUNCTION_RE.is_match(sources) {
        return vec![segment.to_string()];
    }

    let branches: Vec<Branch<'_>> = CONJUNCTION_RE
        .split(sources)
        .filter_map(Branch::parse)
        .collect();
    let shared = branches.last().and_then(|b| b.quantity);

    let expanded: Vec<String> = branches
        .iter()
        .map(|branch| simple_segment(branch.shop, branch.quantity.or(shared), destination))
        .collect();
    trace!(segment, ?expanded, "expanded source list");
    expanded
}

/// Shape (b): `с A [qty] на D1 и [на] D2 [по N]`.
fn expand_destinations(segment: &str) -> Vec<String> {
    let Some((source, destinations)) = split_segment(segment) else {
        return vec![segment.to_string()];
    };
    if !CONJUNCTION_RE.is_match(destinations) {
        return vec![segment.to_string()];
    }
    let Some(source) = Branch::parse(source) else {
        return vec![segment.to_string()];
    };

    let expanded: Vec<String> = DESTINATION_SEPARATOR_RE
        .split(destinations)
        .filter_map(Branch::parse)
        .map(|branch| {
            simple_segment(
                source.shop,
                branch.quantity.or(source.quantity),
                branch.shop,
            )
        })
        .collect();
    trace!(segment, ?expanded, "expanded destination list");
    expanded
}

/// Splits `с <sources> на <destinations>` into its two sides.
fn split_segment(segment: &str) -> Option<(&str, &str)> {
    let caps = SEGMENT_RE.captures(segment)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// One shop of a list with its local quantity.
#[derive(Debug, Clone, Copy)]
struct Branch<'a> {
    shop: &'a str,
    quantity: Option<&'a str>,
}

impl<'a> Branch<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let caps = BRANCH_RE.captures(text.trim())?;
        Some(Self {
            shop: caps.get(1)?.as_str(),
            quantity: caps.get(2).map(|m| m.as_str()),
        })
    }
}

fn simple_segment(source: &str, quantity: Option<&str>, destination: &str) -> String {
    match quantity {
        Some(quantity) => format!("с {source} {quantity} на {destination}"),
        None => format!("с {source} на {destination}"),
    }
}
