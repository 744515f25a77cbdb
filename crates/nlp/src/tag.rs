// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A lexicon-plus-suffix part-of-speech tagger over Penn Treebank tags.
//!
//! Accurate enough to drive sequence rules and POS predicates on
//! substitutions; not a parser. The lexicon is built once behind a
//! `LazyLock` so concurrent workers observe exactly one initialization.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// A token with its Penn tag and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub text: String,
    pub tag: String,
    pub start: usize,
}

static LEXICON: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut lex = HashMap::new();
    let entries: &[(&str, &[&str])] = &[
        ("DT", &["the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no", "another"]),
        ("IN", &["of", "in", "to", "for", "with", "on", "at", "by", "from", "about", "into", "over", "after", "under", "between", "through", "during", "before", "against", "among", "within", "without", "upon", "toward", "via", "if", "because", "while", "since", "unless", "although", "whether"]),
        ("CC", &["and", "or", "but", "nor", "so", "yet", "plus"]),
        ("PRP", &["i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "myself", "yourself", "itself", "themselves"]),
        ("PRP$", &["my", "your", "his", "its", "our", "their", "hers", "ours", "theirs"]),
        ("MD", &["can", "could", "may", "might", "must", "shall", "should", "will", "would"]),
        ("VB", &["be", "have", "do", "make", "get", "go", "take", "see", "use", "find", "give", "run", "keep", "let", "put", "set"]),
        ("VBZ", &["is", "has", "does", "makes", "gets", "goes", "takes", "uses"]),
        ("VBP", &["am", "are", "have", "do"]),
        ("VBD", &["was", "were", "had", "did", "made", "got", "went", "took", "saw", "used", "found", "gave", "ran", "kept"]),
        ("VBN", &["been", "done", "made", "gotten", "gone", "taken", "seen", "used", "found", "given", "run", "kept", "written", "known", "shown"]),
        ("VBG", &["being", "having", "doing", "making", "getting", "going", "taking", "using"]),
        ("RB", &["not", "n't", "very", "also", "only", "just", "then", "now", "here", "there", "always", "never", "often", "still", "too", "well", "again", "already", "quite", "rather", "really"]),
        ("JJ", &["good", "new", "first", "last", "long", "great", "little", "own", "other", "old", "right", "big", "high", "small", "large", "next", "early", "same", "few", "public", "able", "simple", "easy"]),
        ("WDT", &["which", "whatever"]),
        ("WP", &["who", "whom", "what"]),
        ("WRB", &["when", "where", "why", "how"]),
        ("EX", &["there"]),
        ("TO", &["to"]),
        ("UH", &["oh", "yes", "okay", "hey"]),
    ];
    for (tag, tokens) in entries {
        for token in *tokens {
            // First tag listed for a token wins ("to" stays TO via the
            // explicit check below; "there" stays RB).
            lex.entry(*token).or_insert(*tag);
        }
    }
    lex.insert("to", "TO");
    lex
});

static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").expect("tag token pattern")
});

fn suffix_tag(lower: &str) -> Option<&'static str> {
    const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ment", "ness", "ance", "ence", "ship", "ism", "ity"];
    const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ish", "ical", "less"];
    if lower.ends_with("ly") {
        return Some("RB");
    }
    if lower.ends_with("ing") && lower.len() > 4 {
        return Some("VBG");
    }
    if lower.ends_with("ed") && lower.len() > 3 {
        return Some("VBD");
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some("NN");
    }
    if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some("JJ");
    }
    if lower.ends_with("ize") || lower.ends_with("ise") || lower.ends_with("ify") {
        return Some("VB");
    }
    None
}

fn tag_word(text: &str, sentence_initial: bool) -> String {
    let lower = text.to_lowercase();
    if text.chars().all(|c| !c.is_alphanumeric()) {
        // Punctuation tags itself, Penn-style.
        return text.to_string();
    }
    if text.chars().any(char::is_numeric) && text.chars().all(|c| !c.is_alphabetic() || c == 'x') {
        return "CD".to_string();
    }
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        return (*tag).to_string();
    }
    if !sentence_initial && text.chars().next().is_some_and(char::is_uppercase) {
        return "NNP".to_string();
    }
    if let Some(tag) = suffix_tag(&lower) {
        return tag.to_string();
    }
    if lower.ends_with('s') && !lower.ends_with("ss") && lower.len() > 3 {
        return "NNS".to_string();
    }
    "NN".to_string()
}

/// Tag every token of `text`, punctuation included.
#[must_use]
pub fn tag(text: &str) -> Vec<TaggedWord> {
    let mut out = Vec::new();
    let mut sentence_initial = true;
    for m in TAG_TOKEN.find_iter(text) {
        let token = m.as_str();
        let tag = tag_word(token, sentence_initial);
        sentence_initial = matches!(token, "." | "!" | "?");
        out.push(TaggedWord {
            text: token.to_string(),
            tag,
            start: m.start(),
        });
    }
    out
}
