// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ten check kinds.
//!
//! Each kind compiles its manifest fields into matcher state once, at
//! load time, and exposes the single `run(text, document)` operation over
//! scope-local text. Alerts come back with rune spans relative to the
//! scope; the dispatcher localizes them.

pub mod capitalization;
pub mod conditional;
pub mod consistency;
pub mod existence;
pub mod occurrence;
pub mod readability;
pub mod repetition;
pub mod sequence;
pub mod spelling;
pub mod substitution;

use fancy_regex::Regex;
use quill_core::{Alert, Document, Error, Result};

use crate::definition::Definition;

pub use capitalization::Capitalization;
pub use conditional::Conditional;
pub use consistency::Consistency;
pub use existence::Existence;
pub use occurrence::Occurrence;
pub use readability::Readability;
pub use repetition::Repetition;
pub use sequence::Sequence;
pub use spelling::Spelling;
pub use substitution::Substitution;

/// A compiled rule: metadata plus kind-specific matcher state.
#[derive(Debug)]
pub enum Check {
    Existence(Existence),
    Substitution(Substitution),
    Occurrence(Occurrence),
    Repetition(Repetition),
    Consistency(Consistency),
    Conditional(Conditional),
    Capitalization(Capitalization),
    Readability(Readability),
    Spelling(Spelling),
    Sequence(Sequence),
}

impl Check {
    #[must_use]
    pub fn definition(&self) -> &Definition {
        match self {
            Check::Existence(c) => &c.def,
            Check::Substitution(c) => &c.def,
            Check::Occurrence(c) => &c.def,
            Check::Repetition(c) => &c.def,
            Check::Consistency(c) => &c.def,
            Check::Conditional(c) => &c.def,
            Check::Capitalization(c) => &c.def,
            Check::Readability(c) => &c.def,
            Check::Spelling(c) => &c.def,
            Check::Sequence(c) => &c.def,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Existence(_) => "existence",
            Check::Substitution(_) => "substitution",
            Check::Occurrence(_) => "occurrence",
            Check::Repetition(_) => "repetition",
            Check::Consistency(_) => "consistency",
            Check::Conditional(_) => "conditional",
            Check::Capitalization(_) => "capitalization",
            Check::Readability(_) => "readability",
            Check::Spelling(_) => "spelling",
            Check::Sequence(_) => "sequence",
        }
    }

    /// Whether the rule runs once over the document summary instead of
    /// per segment.
    #[must_use]
    pub fn is_document_level(&self) -> bool {
        matches!(self, Check::Readability(_) | Check::Sequence(_))
            || self.definition().selector().is_summary()
    }

    /// Whether alerts are held back until the whole file has been seen.
    #[must_use]
    pub fn defers_alerts(&self) -> bool {
        matches!(self, Check::Conditional(_))
    }

    /// Evaluate the rule against scope-local `text`.
    pub fn run(&self, text: &str, doc: &mut Document) -> Vec<Alert> {
        match self {
            Check::Existence(c) => c.run(text),
            Check::Substitution(c) => c.run(text),
            Check::Occurrence(c) => c.run(text),
            Check::Repetition(c) => c.run(text),
            Check::Consistency(c) => c.run(text, doc),
            Check::Conditional(c) => c.run(text, doc),
            Check::Capitalization(c) => c.run(text),
            Check::Readability(c) => c.run(text),
            Check::Spelling(c) => c.run(text),
            Check::Sequence(c) => c.run(text),
        }
    }
}

/// Compile a user pattern, attributing failures to the rule.
pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::rule_load(name, format!("bad pattern: {e}")))
}

/// `(?m)` is the default so `^`/`$` bind to line boundaries; `(?i)` is
/// prepended for case-insensitive rules.
pub(crate) fn assemble(ignorecase: bool, body: &str) -> String {
    if ignorecase {
        format!("(?im){body}")
    } else {
        format!("(?m){body}")
    }
}

/// Wrap alternatives in the word-boundary template unless `nonword`.
pub(crate) fn word_group(tokens: &str, nonword: bool) -> String {
    if nonword {
        format!("(?:{tokens})")
    } else {
        format!(r"\b(?:{tokens})\b")
    }
}

/// Reject source patterns containing capturing groups; the compiled
/// alternation relies on one group per entry for replacement indexing.
pub(crate) fn has_capturing_group(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => {
                // Character classes may contain unescaped parens.
                i += 1;
                while i < bytes.len() && bytes[i] != b']' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'(' if bytes.get(i + 1) != Some(&b'?') => return true,
            _ => {}
        }
        i += 1;
    }
    false
}

/// All non-empty matches as byte ranges, swallowing per-match backtracking
/// errors.
pub(crate) fn find_all(re: &Regex, text: &str) -> Vec<(usize, usize)> {
    re.find_iter(text)
        .filter_map(std::result::Result::ok)
        .filter(|m| !m.as_str().is_empty())
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Keep at most one alert per position; checks that scan overlapping
/// patterns use this before returning.
pub(crate) fn dedup_local(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by_key(|a| (a.span.0, a.span.1));
    alerts.dedup_by_key(|a| a.span);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capturing_group_detection() {
        assert!(has_capturing_group("(foo)"));
        assert!(!has_capturing_group("(?:foo)"));
        assert!(!has_capturing_group(r"\(foo\)"));
        assert!(!has_capturing_group("[(]foo[)]"));
        assert!(!has_capturing_group("(?i)x(?:y)"));
        assert!(has_capturing_group("(?:a)(b)"));
    }

    #[test]
    fn word_group_wraps() {
        assert_eq!(word_group("a|b", false), r"\b(?:a|b)\b");
        assert_eq!(word_group("a|b", true), "(?:a|b)");
    }

    #[test]
    fn find_all_skips_empty_matches() {
        let re = Regex::new("x*").unwrap();
        let got = find_all(&re, "axxb");
        assert_eq!(got, vec![(1, 3)]);
    }
}
