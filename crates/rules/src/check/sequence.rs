// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sequence`: an ordered pattern over POS-tagged tokens.
//!
//! The first non-negated token carrying a pattern anchors the search;
//! every anchor occurrence is then extended to both sides against its
//! neighboring sequence tokens. A mandatory miss aborts the candidate,
//! an optional miss moves on without consuming, and `skip: k` replicates
//! its token k extra times as optional. Candidates are judged
//! independently, so repeated anchors in one paragraph can each alert.
//! Always document-level over the summary.

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Error, Result};
use quill_nlp::TaggedWord;

use crate::check::{compile_pattern, dedup_local};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct NlpTokenDef {
    pattern: String,
    tag: String,
    negate: bool,
    skip: usize,
    optional: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SequenceDef {
    tokens: Vec<NlpTokenDef>,
    ignorecase: bool,
}

#[derive(Debug)]
struct SeqToken {
    pattern: Option<Regex>,
    tag: Option<Regex>,
    negate: bool,
    optional: bool,
}

impl SeqToken {
    fn matches(&self, word: &TaggedWord) -> bool {
        let pattern_ok = match &self.pattern {
            None => true,
            Some(re) => {
                let hit = re.is_match(&word.text).unwrap_or(false);
                if self.negate { !hit } else { hit }
            }
        };
        pattern_ok
            && self
                .tag
                .as_ref()
                .is_none_or(|re| re.is_match(&word.tag).unwrap_or(false))
    }
}

#[derive(Debug)]
pub struct Sequence {
    pub def: Definition,
    tokens: Vec<SeqToken>,
    anchor: usize,
}

impl Sequence {
    pub fn compile(mut def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: SequenceDef = crate::compile::fields(&def.name, fields)?;
        if spec.tokens.is_empty() {
            return Err(Error::rule_load(&def.name, "sequence needs 'tokens'"));
        }

        let compile_one = |raw: &NlpTokenDef, optional: bool| -> Result<SeqToken> {
            let wrap = |p: &str, full: bool| -> String {
                let body = if full { format!("^(?:{p})$") } else { p.to_string() };
                if spec.ignorecase {
                    format!("(?i){body}")
                } else {
                    body
                }
            };
            Ok(SeqToken {
                pattern: if raw.pattern.is_empty() {
                    None
                } else {
                    Some(compile_pattern(&def.name, &wrap(&raw.pattern, true))?)
                },
                tag: if raw.tag.is_empty() {
                    None
                } else {
                    Some(compile_pattern(&def.name, &wrap(&raw.tag, false))?)
                },
                negate: raw.negate,
                optional,
            })
        };

        let mut tokens = Vec::new();
        for raw in &spec.tokens {
            tokens.push(compile_one(raw, raw.optional)?);
            for _ in 0..raw.skip {
                tokens.push(compile_one(raw, true)?);
            }
        }

        let anchor = tokens
            .iter()
            .position(|t| !t.negate && t.pattern.is_some())
            .ok_or_else(|| {
                Error::rule_load(&def.name, "sequence needs a non-negated pattern token")
            })?;

        def.scope = "summary".to_string();
        Ok(Sequence { def, tokens, anchor })
    }

    /// Extend a candidate to one side. `seq` and `words` run outward from
    /// the anchor; returns the number of words consumed, or `None` on a
    /// mandatory miss.
    fn walk<'s, 'w>(
        seq: impl Iterator<Item = &'s SeqToken>,
        mut words: impl Iterator<Item = &'w TaggedWord>,
    ) -> Option<usize> {
        let mut consumed = 0;
        let mut current = words.next();
        for token in seq {
            match current {
                Some(word) if token.matches(word) => {
                    consumed += 1;
                    current = words.next();
                }
                _ if token.optional => {}
                _ => return None,
            }
        }
        Some(consumed)
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let tagged = quill_nlp::tag(text);
        let anchor_token = &self.tokens[self.anchor];
        let mut alerts = Vec::new();

        for (i, word) in tagged.iter().enumerate() {
            if !anchor_token.matches(word) {
                continue;
            }
            let Some(right) = Self::walk(
                self.tokens[self.anchor + 1..].iter(),
                tagged[i + 1..].iter(),
            ) else {
                continue;
            };
            let Some(left) = Self::walk(
                self.tokens[..self.anchor].iter().rev(),
                tagged[..i].iter().rev(),
            ) else {
                continue;
            };

            let first = &tagged[i - left];
            let last = &tagged[i + right];
            let begin = first.start;
            let end = last.start + last.text.len();
            alerts.push(self.def.alert(text, begin, end, &[&text[begin..end]]));
        }
        drop_contained(dedup_local(alerts))
    }
}

/// Overlapping candidates from adjacent anchors collapse into the widest
/// match; distinct occurrences elsewhere still alert separately.
fn drop_contained(alerts: Vec<Alert>) -> Vec<Alert> {
    let spans: Vec<(usize, usize)> = alerts.iter().map(|a| a.span).collect();
    alerts
        .into_iter()
        .filter(|a| {
            !spans
                .iter()
                .any(|s| (s.0 < a.span.0 && a.span.1 <= s.1) || (s.0 <= a.span.0 && a.span.1 < s.1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    #[test]
    fn anchor_plus_tag_walk() {
        let check = compiled(
            "Style.Passive",
            concat!(
                "extends: sequence\nmessage: \"'%s' may be passive voice\"\nignorecase: true\n",
                "tokens:\n",
                "  - pattern: \"was|were\"\n",
                "  - tag: VBN\n",
            ),
        );
        let alerts = check.run("The manual was written by hand.", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "was written");
        assert!(check.run("The manual was good.", &mut doc()).is_empty());
    }

    #[test]
    fn left_walk_from_a_later_anchor() {
        let check = compiled(
            "Style.Impact",
            concat!(
                "extends: sequence\nmessage: \"'%s'\"\n",
                "tokens:\n",
                "  - tag: DT\n",
                "  - pattern: impact\n",
            ),
        );
        let alerts = check.run("we saw the impact of it", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "the impact");
        assert!(check.run("we saw impact craters", &mut doc()).is_empty());
    }

    #[test]
    fn skip_replicates_optionally() {
        let check = compiled(
            "Style.Very",
            concat!(
                "extends: sequence\nmessage: \"'%s'\"\n",
                "tokens:\n",
                "  - pattern: very\n",
                "    skip: 2\n",
                "  - pattern: good\n",
            ),
        );
        let mut d = doc();
        assert_eq!(check.run("it is very good", &mut d).len(), 1);
        let stacked = check.run("it is very very very good", &mut d);
        assert_eq!(stacked.len(), 1);
        assert_eq!(stacked[0].matched, "very very very good");
        assert!(check.run("it is very bad", &mut d).is_empty());
    }

    #[test]
    fn negated_tokens_must_not_match() {
        let check = compiled(
            "Style.CareLess",
            concat!(
                "extends: sequence\nmessage: \"'%s'\"\nignorecase: true\n",
                "tokens:\n",
                "  - pattern: could\n",
                "  - pattern: \"not|n't\"\n",
                "    negate: true\n",
                "  - pattern: care\n",
                "",
            ),
        );
        // "could care" passes the negated middle token without consuming it.
        assert!(check.run("I could not care less", &mut doc()).is_empty());
    }

    #[test]
    fn scope_is_summary() {
        let check = compiled(
            "Style.Seq",
            "extends: sequence\nmessage: m\ntokens:\n  - pattern: x\n",
        );
        assert!(check.definition().selector().is_summary());
    }
}
