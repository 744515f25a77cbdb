// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Word and sentence tokenizers.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// A word token with its byte offset in the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
}

impl Token {
    /// Exclusive end offset, in bytes.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’_-][\p{L}\p{N}]+)*").expect("word pattern")
});

/// Split `text` into word tokens, dropping punctuation and whitespace.
#[must_use]
pub fn words(text: &str) -> Vec<Token> {
    WORD.find_iter(text)
        .map(|m| Token {
            text: m.as_str().to_string(),
            start: m.start(),
        })
        .collect()
}

/// Abbreviations that end with a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "al", "dr", "mr", "mrs", "ms", "prof", "st", "jr", "sr",
    "fig", "no", "dept", "approx",
];

fn is_abbreviation(prefix: &str) -> bool {
    let last = prefix
        .trim_end_matches('.')
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");
    ABBREVIATIONS.contains(&last.to_ascii_lowercase().as_str())
        // Initialisms like "U.S." keep their final period mid-sentence.
        || last.chars().rev().take(2).all(|c| c == '.' || c.is_uppercase()) && last.contains('.')
}

/// Split `text` into sentences.
///
/// A sentence ends at `.`, `!`, or `?` (optionally followed by closing
/// quotes or brackets) when the next non-space character starts a new
/// sentence and the terminator is not part of a known abbreviation.
#[must_use]
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut i = 0;
    while i < graphemes.len() {
        let (offset, g) = graphemes[i];
        if matches!(g, "." | "!" | "?") {
            let mut end = offset + g.len();
            let mut j = i + 1;
            while j < graphemes.len() && matches!(graphemes[j].1, "\"" | "'" | ")" | "”" | "’") {
                end = graphemes[j].0 + graphemes[j].1.len();
                j += 1;
            }
            let rest = &text[end..];
            let next_opens = rest
                .trim_start()
                .chars()
                .next()
                .is_none_or(|c| c.is_uppercase() || c.is_numeric());
            let boundary = rest.starts_with(char::is_whitespace) || rest.is_empty();
            if boundary && next_opens && !(g == "." && is_abbreviation(&text[start..end])) {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence.to_string());
                }
                start = end;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}
