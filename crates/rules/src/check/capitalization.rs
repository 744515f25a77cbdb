// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `capitalization`: check a whole segment against a casing convention.
//!
//! Modes: `$title` (AP or Chicago small-word lists), `$sentence`,
//! `$lower`, `$upper`, or a bare regex. Exceptions are left alone
//! wherever they appear; indicator tokens allow the word after them to
//! differ (e.g. a re-capitalized word after a colon).

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Error, Result};

use crate::check::compile_pattern;
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CapitalizationDef {
    #[serde(rename = "match")]
    match_: String,
    /// `AP` or `Chicago`, for `$title`.
    style: String,
    exceptions: Vec<String>,
    indicators: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleStyle {
    Ap,
    Chicago,
}

#[derive(Debug)]
enum Mode {
    Title(TitleStyle),
    Sentence,
    Lower,
    Upper,
    Pattern(Regex),
}

#[derive(Debug)]
pub struct Capitalization {
    pub def: Definition,
    mode: Mode,
    exceptions: Vec<String>,
    indicators: Vec<String>,
}

/// Words AP style leaves lowercase mid-title. Chicago extends the list to
/// prepositions regardless of length.
const AP_SMALL: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "so", "the",
    "to", "up", "yet",
];
const CHICAGO_EXTRA: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "before",
    "behind", "below", "between", "down", "during", "from", "into", "like", "near", "off",
    "onto", "over", "past", "through", "toward", "under", "upon", "with", "within", "without",
];

impl Capitalization {
    pub fn compile(
        def: Definition,
        fields: &serde_yaml::Value,
        accepted: &[String],
    ) -> Result<Self> {
        let spec: CapitalizationDef = crate::compile::fields(&def.name, fields)?;
        let mode = match spec.match_.as_str() {
            "$title" => match spec.style.as_str() {
                "" | "AP" => Mode::Title(TitleStyle::Ap),
                "Chicago" => Mode::Title(TitleStyle::Chicago),
                other => {
                    return Err(Error::rule_load(
                        &def.name,
                        format!("unknown title style '{other}'"),
                    ));
                }
            },
            "$sentence" => Mode::Sentence,
            "$lower" => Mode::Lower,
            "$upper" => Mode::Upper,
            "" => {
                return Err(Error::rule_load(&def.name, "capitalization needs 'match'"));
            }
            pattern => Mode::Pattern(compile_pattern(&def.name, pattern)?),
        };
        let mut exceptions = spec.exceptions;
        exceptions.extend(accepted.iter().cloned());
        Ok(Capitalization {
            def,
            mode,
            exceptions,
            indicators: spec.indicators,
        })
    }

    fn excepted(&self, word: &str) -> bool {
        self.exceptions
            .iter()
            .any(|e| e == word || e.eq_ignore_ascii_case(word))
    }

    /// A word casing never worth flagging: acronyms, versions, file
    /// names.
    fn exempt(word: &str) -> bool {
        word.chars().any(|c| c.is_numeric() || c == '.')
            || word.chars().all(char::is_uppercase)
            || word.chars().count() == 1
    }

    fn passes(&self, text: &str) -> bool {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return true;
        }
        match &self.mode {
            Mode::Pattern(re) => re.is_match(text).unwrap_or(false),
            Mode::Lower => text
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_lowercase),
            Mode::Upper => text
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_uppercase),
            Mode::Sentence => self.passes_sentence(&words),
            Mode::Title(style) => self.passes_title(&words, *style),
        }
    }

    fn passes_sentence(&self, words: &[&str]) -> bool {
        for (i, word) in words.iter().enumerate() {
            let clean = word.trim_matches(|c: char| !c.is_alphanumeric());
            if clean.is_empty() || self.excepted(clean) || Self::exempt(clean) {
                continue;
            }
            let after_indicator = i > 0
                && self
                    .indicators
                    .iter()
                    .any(|ind| words[i - 1].trim_end_matches(':') == ind || words[i - 1].ends_with(':'));
            if i == 0 {
                if clean.chars().next().is_some_and(char::is_lowercase) {
                    return false;
                }
            } else if !after_indicator
                && clean.chars().next().is_some_and(char::is_uppercase)
            {
                return false;
            }
        }
        true
    }

    fn passes_title(&self, words: &[&str], style: TitleStyle) -> bool {
        let last = words.len() - 1;
        for (i, word) in words.iter().enumerate() {
            let clean = word.trim_matches(|c: char| !c.is_alphanumeric());
            if clean.is_empty() || self.excepted(clean) || Self::exempt(clean) {
                continue;
            }
            let lower = clean.to_lowercase();
            let small = AP_SMALL.contains(&lower.as_str())
                || (style == TitleStyle::Chicago && CHICAGO_EXTRA.contains(&lower.as_str()));
            let capitalized = clean.chars().next().is_some_and(char::is_uppercase);
            if i == 0 || i == last {
                if !capitalized {
                    return false;
                }
            } else if small {
                if capitalized {
                    return false;
                }
            } else if !capitalized {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.passes(trimmed) {
            return Vec::new();
        }
        let begin = text.len() - text.trim_start().len();
        vec![self
            .def
            .alert(text, begin, begin + trimmed.len(), &[trimmed])]
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    #[test]
    fn sentence_case() {
        let check = compiled(
            "Style.Headings",
            "extends: capitalization\nmessage: \"'%s' is not sentence-cased\"\nmatch: $sentence\n",
        );
        let mut d = doc();
        assert_eq!(check.run("hello world", &mut d).len(), 1);
        assert!(check.run("Hello world", &mut d).is_empty());
        assert_eq!(check.run("Hello World", &mut d).len(), 1);
        // Acronyms are fine anywhere.
        assert!(check.run("Hello WHO delegates", &mut d).is_empty());
    }

    #[test]
    fn whole_scope_is_the_span() {
        let check = compiled(
            "Style.Headings",
            "extends: capitalization\nmessage: bad case\nmatch: $sentence\n",
        );
        let alerts = check.run("hello world", &mut doc());
        assert_eq!(alerts[0].span, (0, 11));
        assert_eq!(alerts[0].matched, "hello world");
    }

    #[test]
    fn ap_title_case() {
        let check = compiled(
            "Style.Titles",
            "extends: capitalization\nmessage: \"'%s' is not title-cased\"\nmatch: $title\nstyle: AP\n",
        );
        let mut d = doc();
        assert!(check.run("The Art of the Deal", &mut d).is_empty());
        assert_eq!(check.run("The art of the Deal", &mut d).len(), 1);
        // Small words are capitalized in first/last position only.
        assert!(check.run("Of Mice and Men", &mut d).is_empty());
    }

    #[test]
    fn chicago_lowercases_long_prepositions() {
        let check = compiled(
            "Style.Titles",
            "extends: capitalization\nmessage: bad\nmatch: $title\nstyle: Chicago\n",
        );
        let mut d = doc();
        assert!(check.run("A Walk through the Park", &mut d).is_empty());
        assert_eq!(check.run("A Walk Through the Park", &mut d).len(), 1);
    }

    #[test]
    fn upper_lower_and_pattern_modes() {
        let upper = compiled(
            "Style.Upper",
            "extends: capitalization\nmessage: bad\nmatch: $upper\n",
        );
        assert!(upper.run("ALL CAPS", &mut doc()).is_empty());
        assert_eq!(upper.run("Not Caps", &mut doc()).len(), 1);

        let pattern = compiled(
            "Style.Prefix",
            "extends: capitalization\nmessage: bad\nmatch: \"^Step \\\\d\"\n",
        );
        assert!(pattern.run("Step 1: attach", &mut doc()).is_empty());
        assert_eq!(pattern.run("First, attach", &mut doc()).len(), 1);
    }

    #[test]
    fn exceptions_and_indicators() {
        let check = compiled(
            "Style.Headings",
            concat!(
                "extends: capitalization\nmessage: bad\nmatch: $sentence\n",
                "exceptions:\n  - JavaScript\n",
                "indicators:\n  - \"step:\"\n",
            ),
        );
        let mut d = doc();
        assert!(check.run("Using JavaScript here", &mut d).is_empty());
        assert!(check.run("First step: Attach the panel", &mut d).is_empty());
    }
}
