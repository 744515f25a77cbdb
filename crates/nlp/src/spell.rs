// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Word-list spell lookup.
//!
//! The model is a plain accept set loaded from `.dic`-style word lists
//! (one word per line, `#` comments, an optional leading count line as
//! Hunspell dictionaries have). Affix expansion and suggestion machinery
//! are outside the linter core; a model with no lists accepts everything
//! so that a missing dictionary degrades to silence rather than noise.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Filters applied before spell lookup: tokens matching any of these are
/// never spelling candidates.
pub static DEFAULT_FILTERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:\w+)?\.\w{1,4}\b",      // file names and extensions
        r"\b(?:[a-zA-Z]\.){2,}",     // initialisms like e.g., U.S.
        r"0[xX][0-9a-fA-F]+",        // hex literals
        r"\w+-\w+",                  // hyphenated compounds
        r"[A-Z]{1}[a-z]+[A-Z]+\w+",  // camelCase / PascalCase
        r"[0-9]",                    // anything with a digit
        r"^[A-Z]+$",                 // bare acronyms
        r"\w{3,}\.\w{2,}",           // domains
        r"@.*\b",                    // handles and emails
        r"\w+://[^\s]+",             // URLs
    ]
    .iter()
    .map(|p| Regex::new(p).expect("default spelling filter"))
    .collect()
});

/// A word-list-backed spell model, shareable across workers once built.
#[derive(Debug, Default)]
pub struct WordListModel {
    exact: HashSet<String>,
    folded: HashSet<String>,
    loaded: bool,
}

impl WordListModel {
    #[must_use]
    pub fn new() -> Self {
        WordListModel::default()
    }

    /// Add every entry of a word-list file.
    pub fn load_file(&mut self, path: &Path) -> std::io::Result<()> {
        let raw = std::fs::read_to_string(path)?;
        self.extend(raw.lines());
        Ok(())
    }

    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for line in words {
            let word = line.split('/').next().unwrap_or("").trim();
            if word.is_empty() || word.starts_with('#') || word.chars().all(char::is_numeric) {
                continue;
            }
            self.exact.insert(word.to_string());
            self.folded.insert(word.to_lowercase());
            self.loaded = true;
        }
    }

    /// Whether any word list has been loaded. An empty model accepts all
    /// input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.loaded
    }

    /// Accept `word` as spelled correctly. Exact match first, then a
    /// lowercased retry so sentence-initial capitals pass.
    #[must_use]
    pub fn accept(&self, word: &str) -> bool {
        if !self.loaded {
            return true;
        }
        self.exact.contains(word) || self.folded.contains(&word.to_lowercase())
    }
}
