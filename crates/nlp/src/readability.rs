// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grade-level readability metrics.
//!
//! All five metrics are computed from one [`Stats`] pass over the text:
//! SMOG, Gunning fog, Coleman-Liau, Flesch-Kincaid, and Automated
//! Readability. Syllables use a vowel-group heuristic with a silent-e
//! adjustment, which tracks published scores closely enough for
//! threshold checks.

use crate::tokenize;

/// Counts feeding the grade formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub sentences: f64,
    pub words: f64,
    pub characters: f64,
    pub syllables: f64,
    /// Words of three or more syllables.
    pub polysyllables: f64,
}

/// Syllables in a single word, never less than one.
#[must_use]
pub fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let bytes: Vec<char> = lower.chars().collect();
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &bytes {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    // Silent trailing e: "sample" counts two, "see" stays one.
    if lower.ends_with('e')
        && !lower.ends_with("le")
        && count > 1
        && !bytes
            .get(bytes.len().wrapping_sub(2))
            .copied()
            .is_some_and(is_vowel)
    {
        count -= 1;
    }
    count.max(1)
}

impl Stats {
    #[must_use]
    pub fn of(text: &str) -> Stats {
        let mut stats = Stats {
            sentences: tokenize::sentences(text).len().max(1) as f64,
            ..Stats::default()
        };
        for token in tokenize::words(text) {
            let syl = syllables(&token.text);
            stats.words += 1.0;
            stats.characters += token.text.chars().filter(|c| c.is_alphanumeric()).count() as f64;
            stats.syllables += syl as f64;
            if syl >= 3 {
                stats.polysyllables += 1.0;
            }
        }
        stats
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0.0
    }

    #[must_use]
    pub fn flesch_kincaid(&self) -> f64 {
        0.39 * (self.words / self.sentences) + 11.8 * (self.syllables / self.words) - 15.59
    }

    #[must_use]
    pub fn smog(&self) -> f64 {
        1.043 * (self.polysyllables * (30.0 / self.sentences)).sqrt() + 3.1291
    }

    #[must_use]
    pub fn gunning_fog(&self) -> f64 {
        0.4 * ((self.words / self.sentences) + 100.0 * (self.polysyllables / self.words))
    }

    #[must_use]
    pub fn coleman_liau(&self) -> f64 {
        let letters_per_100 = 100.0 * self.characters / self.words;
        let sentences_per_100 = 100.0 * self.sentences / self.words;
        0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8
    }

    #[must_use]
    pub fn automated_readability(&self) -> f64 {
        4.71 * (self.characters / self.words) + 0.5 * (self.words / self.sentences) - 21.43
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_heuristics() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("reading"), 2);
        assert_eq!(syllables("sample"), 2);
        assert_eq!(syllables("organization"), 5);
        assert_eq!(syllables("see"), 1);
    }

    #[test]
    fn short_sentence_scores_low() {
        let stats = Stats::of("The cat sat.");
        assert_eq!(stats.words, 3.0);
        assert_eq!(stats.sentences, 1.0);
        let grade = stats.flesch_kincaid();
        assert!((grade - (-2.62)).abs() < 0.1, "got {grade}");
    }

    #[test]
    fn dense_prose_scores_high() {
        let text = "The organizational infrastructure necessitates comprehensive \
                    administrative coordination, facilitating multidimensional \
                    accountability mechanisms throughout interdependent \
                    institutional hierarchies governing contemporary operational \
                    methodologies and systematically heterogeneous implementation \
                    considerations across governmental jurisdictions.";
        let stats = Stats::of(text);
        assert!(stats.flesch_kincaid() > 12.0);
        assert!(stats.gunning_fog() > 12.0);
    }

    #[test]
    fn empty_text_is_flagged_empty() {
        assert!(Stats::of("   ").is_empty());
    }
}
