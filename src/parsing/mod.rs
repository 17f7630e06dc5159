//! Stages of the transfer extraction pipeline.
//!
//! Each stage is a plain function over borrowed text, so stages can be tested
//! in isolation and the [`TransferParser`](crate::parser::TransferParser)
//! simply chains them:
//!
//! 1. [`groups`] - blank-line groups, absolute line indices, category headers
//! 2. [`line`] - destination/source pairs, product name, canonical segments
//! 3. [`expand`] - conjunction lists (`с к и б`, `на л и б`) split into simple
//!    segments
//! 4. [`segment`] - one simple segment into one or more [`Transfer`]s
//!
//! [`Transfer`]: crate::Transfer

pub mod expand;
pub mod groups;
pub mod line;
pub mod segment;

pub use expand::expand_segments;
pub use groups::{Group, Line, identify_categories, is_category_header, split_groups};
pub use line::{LineExtraction, extract_line};
pub use segment::parse_segment;
