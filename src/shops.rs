//! Shop branch shorthands.
//!
//! Staff refer to branches by a single letter (`б`, `к`, `л`) or, less often,
//! by the full branch name. [`ShopBranchMap`] is built from a configuration
//! string such as `б-Берлин,к-Кулакова` and answers both kinds of lookup.
//!
//! # Example
//!
//! ```
//! use transfersort::shops::{Resolution, ShopBranchMap};
//!
//! let shops = ShopBranchMap::parse("б-Берлин,к-Кулакова");
//!
//! assert_eq!(shops.len(), 2);
//! assert!(shops.is_valid_shop("берлин"));
//! assert!(shops.is_valid_shop("бк"));
//!
//! match shops.resolve("Кулакова") {
//!     Resolution::ExactName { code, .. } => assert_eq!(code, "к"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lookup between lowercase single-letter codes and full shop names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopBranchMap {
    branches: BTreeMap<String, String>,
}

/// Outcome of resolving a raw shop token.
///
/// Resolution always succeeds: a token that is neither a full name nor a
/// known code degrades to [`Resolution::Unresolved`], which carries the raw
/// code so it can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The token equals a full shop name (case-insensitive).
    ExactName { code: String, shop: String },
    /// The token's first character is a configured code.
    ShorthandCode { code: String, shop: String },
    /// Nothing matched; the lowercase first character is used as both code
    /// and display name.
    Unresolved(String),
}

impl Resolution {
    /// The resolved (or raw) shop code.
    pub fn code(&self) -> &str {
        match self {
            Resolution::ExactName { code, .. } | Resolution::ShorthandCode { code, .. } => code,
            Resolution::Unresolved(raw) => raw,
        }
    }

    /// The display name: the full shop name, or the raw code when unknown.
    pub fn shop(&self) -> &str {
        match self {
            Resolution::ExactName { shop, .. } | Resolution::ShorthandCode { shop, .. } => shop,
            Resolution::Unresolved(raw) => raw,
        }
    }

    /// Splits the outcome into owned `(code, shop)` strings.
    pub fn into_parts(self) -> (String, String) {
        match self {
            Resolution::ExactName { code, shop } | Resolution::ShorthandCode { code, shop } => {
                (code, shop)
            }
            Resolution::Unresolved(raw) => (raw.clone(), raw),
        }
    }
}

impl ShopBranchMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `code-FullName,code-FullName` configuration string.
    ///
    /// Entries are split on the first `-`. Surrounding whitespace is trimmed
    /// and entries with an empty code or name are skipped. Codes are
    /// lowercased; a repeated code keeps the last name given for it.
    pub fn parse(shorthands: &str) -> Self {
        let mut map = Self::new();

        for entry in shorthands.split(',') {
            let Some((code, name)) = entry.split_once('-') else {
                continue;
            };
            let (code, name) = (code.trim(), name.trim());
            if !code.is_empty() && !name.is_empty() {
                map.insert(code, name);
            }
        }

        map
    }

    /// Adds or replaces a branch.
    pub fn insert(&mut self, code: &str, shop: impl Into<String>) {
        self.branches.insert(code.to_lowercase(), shop.into());
    }

    /// Number of configured branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// `true` when no branch is configured.
    ///
    /// An empty map is the configuration error state: nothing can be
    /// resolved and the report formatter refuses to render.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Full shop name for a code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&str> {
        self.branches.get(&code.to_lowercase()).map(String::as_str)
    }

    /// Iterates over `(code, shop)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.branches.iter().map(|(c, s)| (c.as_str(), s.as_str()))
    }

    /// Code of the shop whose full name equals `token`, ignoring case.
    pub fn code_for_name(&self, token: &str) -> Option<&str> {
        let token = token.to_lowercase();
        self.branches
            .iter()
            .find(|(_, shop)| shop.to_lowercase() == token)
            .map(|(code, _)| code.as_str())
    }

    /// Whether `word` can denote a shop: its first character is a code, or the
    /// whole word is a full shop name.
    pub fn is_valid_shop(&self, word: &str) -> bool {
        let Some(first) = word.chars().next() else {
            return false;
        };
        self.branches.contains_key(&lower_char(first)) || self.code_for_name(word).is_some()
    }

    /// Resolves a raw token: full name first, then first-letter code, then the
    /// raw first letter as a passthrough.
    pub fn resolve(&self, token: &str) -> Resolution {
        if let Some(code) = self.code_for_name(token) {
            return Resolution::ExactName {
                code: code.to_string(),
                shop: self.branches[code].clone(),
            };
        }
        match token.chars().next() {
            Some(first) => self.resolve_code(first),
            None => Resolution::Unresolved(String::new()),
        }
    }

    /// Resolves a single code letter.
    pub fn resolve_code(&self, code: char) -> Resolution {
        let code = lower_char(code);
        match self.branches.get(&code) {
            Some(shop) => Resolution::ShorthandCode {
                shop: shop.clone(),
                code,
            },
            None => Resolution::Unresolved(code),
        }
    }
}

fn lower_char(c: char) -> String {
    c.to_lowercase().collect()
}
