// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted scope selectors.
//!
//! A selector is a lowercase dotted path such as `text.comment.line.py`
//! identifying a syntactic region of a document. Selectors are immutable
//! value types; containment is token-subsequence, not substring, so
//! `text.code` is not contained in `text.codeblock`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The root selector every textual segment descends from.
pub const ROOT: &str = "text";

/// The document-level pseudo-scope for rules that run over the accumulated
/// prose summary rather than individual segments.
pub const SUMMARY: &str = "summary";

/// A dotted path of lowercase tokens identifying a scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Selector(path.trim().to_ascii_lowercase())
    }

    #[must_use]
    pub fn root() -> Self {
        Selector(ROOT.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|t| !t.is_empty())
    }

    /// `a.contains(b)` iff every token of `b` appears in `a`, in order.
    #[must_use]
    pub fn contains(&self, other: &Selector) -> bool {
        let mut mine = self.tokens();
        other.tokens().all(|want| mine.any(|have| have == want))
    }

    /// Whether `token` is any single token of the path.
    #[must_use]
    pub fn has(&self, token: &str) -> bool {
        self.tokens().any(|t| t == token)
    }

    #[must_use]
    pub fn is_summary(&self) -> bool {
        self.0 == SUMMARY
    }

    /// Extend the path with one more token, e.g. `text.heading` + `h2`.
    #[must_use]
    pub fn join(&self, token: &str) -> Selector {
        Selector(format!("{}.{}", self.0, token.to_ascii_lowercase()))
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::root()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(path: &str) -> Self {
        Selector::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_in_order_subsequence() {
        let py_comment = Selector::new("text.comment.line.py");
        assert!(py_comment.contains(&Selector::new("comment")));
        assert!(py_comment.contains(&Selector::new("text.line")));
        assert!(py_comment.contains(&Selector::new("text.comment.line.py")));
        assert!(!py_comment.contains(&Selector::new("line.comment")));
        assert!(!py_comment.contains(&Selector::new("text.string")));
    }

    #[test]
    fn containment_is_transitive() {
        let a = Selector::new("text.heading.h2");
        let b = Selector::new("text.heading");
        let c = Selector::new("heading");
        assert!(a.contains(&b) && b.contains(&c));
        assert!(a.contains(&c));
    }

    #[test]
    fn has_matches_single_tokens() {
        let sel = Selector::new("text.attr.href");
        assert!(sel.has("href"));
        assert!(!sel.has("hre"));
    }

    #[test]
    fn equality_is_string_equality() {
        assert_eq!(Selector::new("Text.Heading"), Selector::new("text.heading"));
        assert_ne!(Selector::new("text"), Selector::new("text.heading"));
    }

    #[test]
    fn join_appends_lowercased() {
        assert_eq!(
            Selector::new("text.heading").join("H2"),
            Selector::new("text.heading.h2")
        );
    }
}
