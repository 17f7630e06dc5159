//! Blank-line groups and category headers.
//!
//! Messages are written as loose blocks separated by blank lines. A block may
//! start with a short label (a supplier, a box, a product line) that applies
//! to every transfer below it:
//!
//! ```text
//! Охбар 30к
//! Арбуз клубника с в на л
//! Мексиканское манго с к на б
//! ```
//!
//! Header detection runs over the whole message first and reports headers by
//! absolute line index; the parser then looks the header up per group.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Headers are short labels; anything this long or longer is content.
pub const MAX_HEADER_CHARS: usize = 30;

static GROUP_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("invalid group separator regex"));

static FROM_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)с\s+").expect("invalid from marker regex"));

/// A non-blank, trimmed input line and its position among all non-blank
/// lines of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// Consecutive non-blank lines between blank-line separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group<'a> {
    pub lines: Vec<Line<'a>>,
}

impl<'a> Group<'a> {
    /// The group's first line, the only header candidate.
    pub fn first(&self) -> Option<&Line<'a>> {
        self.lines.first()
    }
}

/// Splits a message into groups of trimmed, non-blank lines.
///
/// Line indices run across the whole message, so index `3` is the fourth
/// non-blank line no matter which group it landed in.
pub fn split_groups(input: &str) -> Vec<Group<'_>> {
    let mut next_index = 0;

    GROUP_SEPARATOR_RE
        .split(input)
        .filter_map(|chunk| {
            let lines: Vec<Line<'_>> = chunk
                .lines()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .enumerate()
                .map(|(offset, text)| Line {
                    index: next_index + offset,
                    text,
                })
                .collect();
            next_index += lines.len();
            (!lines.is_empty()).then_some(Group { lines })
        })
        .collect()
}

fn has_transfer_marker(text: &str) -> bool {
    FROM_MARKER_RE.is_match(text) || text.contains("на ")
}

/// Whether the group opens with a category header.
///
/// The first line must carry no `с`/`на` marker and be shorter than
/// [`MAX_HEADER_CHARS`], and the second line must carry one.
pub fn is_category_header(group: &Group<'_>) -> bool {
    let [first, second, ..] = group.lines.as_slice() else {
        return false;
    };

    !has_transfer_marker(first.text)
        && first.text.chars().count() < MAX_HEADER_CHARS
        && has_transfer_marker(second.text)
}

/// Maps the absolute line index of every category header to its text.
pub fn identify_categories<'a>(groups: &[Group<'a>]) -> BTreeMap<usize, &'a str> {
    groups
        .iter()
        .filter(|group| is_category_header(group))
        .filter_map(|group| group.first().map(|line| (line.index, line.text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_groups_indices() {
        let input = "\nпервая\nвторая\n\n\n   \nтретья\n  четвертая  \n";
        let groups = split_groups(input);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[1].lines[0], Line { index: 2, text: "третья" });
        assert_eq!(groups[1].lines[1], Line { index: 3, text: "четвертая" });
    }

    #[test]
    fn test_split_groups_crlf() {
        let groups = split_groups("a с б на к\r\n\r\nb с к на л\r\n");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].lines[0].text, "b с к на л");
    }

    #[test]
    fn test_split_groups_empty() {
        assert!(split_groups("").is_empty());
        assert!(split_groups("\n  \n\n").is_empty());
    }

    #[test]
    fn test_header_detected() {
        let groups = split_groups("Dojo 12к\nКислое яблоко с к на б\nТабак с л на б");
        assert!(is_category_header(&groups[0]));

        let headers = identify_categories(&groups);
        assert_eq!(headers.get(&0), Some(&"Dojo 12к"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_header_rejected_when_first_line_has_marker() {
        let groups = split_groups("ленский, с к на л\nобский, с б на л");
        assert!(!is_category_header(&groups[0]));
    }

    #[test]
    fn test_header_rejected_when_too_long() {
        let groups = split_groups("Очень длинное название поставщика\nТабак с л на б");
        assert!(!is_category_header(&groups[0]));
    }

    #[test]
    fn test_header_rejected_for_single_line_group() {
        let groups = split_groups("Lucky Vaper");
        assert!(!is_category_header(&groups[0]));
    }

    #[test]
    fn test_header_rejected_when_second_line_has_no_marker() {
        let groups = split_groups("Lucky Vaper\nпросто заметка");
        assert!(!is_category_header(&groups[0]));
    }

    #[test]
    fn test_marker_inside_word_is_not_a_marker() {
        // "Микс" ends in "с" but it is not a standalone preposition
        assert!(!has_transfer_marker("Микс ягод"));
        assert!(has_transfer_marker("Микс ягод с б"));
    }

    #[test]
    fn test_headers_use_absolute_indices() {
        let input = "Охбар 30к\nАрбуз клубника с в на л\n\nЛост мери 5к\nЦитрусовый восход с в на б";
        let headers = identify_categories(&split_groups(input));
        assert_eq!(headers.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
    }
}
