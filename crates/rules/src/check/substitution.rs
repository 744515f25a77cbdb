// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `substitution`: map observed patterns to preferred replacements.
//!
//! All observed patterns compile into one alternation with exactly one
//! capture group per entry; the matching group's index selects the
//! replacement. Source patterns therefore may not contain capturing
//! groups of their own.

use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

use quill_core::{Alert, Error, Result};

use crate::check::{assemble, compile_pattern, has_capturing_group, word_group};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SubstitutionDef {
    swap: BTreeMap<String, String>,
    ignorecase: bool,
    nonword: bool,
    /// Regex over the Penn tag of the matched token; a non-matching tag
    /// hides the alert.
    pos: String,
}

#[derive(Debug)]
pub struct Substitution {
    pub def: Definition,
    pattern: Regex,
    replacements: Vec<String>,
    pos: Option<Regex>,
}

impl Substitution {
    pub fn compile(def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: SubstitutionDef = crate::compile::fields(&def.name, fields)?;
        if spec.swap.is_empty() {
            return Err(Error::rule_load(&def.name, "substitution needs 'swap'"));
        }

        // Longest patterns first so overlapping alternatives prefer the
        // most specific swap.
        let mut entries: Vec<(String, String)> = spec.swap.into_iter().collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut groups = Vec::with_capacity(entries.len());
        let mut replacements = Vec::with_capacity(entries.len());
        for (observed, expected) in entries {
            if has_capturing_group(&observed) {
                return Err(Error::rule_load(
                    &def.name,
                    format!("pattern '{observed}' must use non-capturing groups"),
                ));
            }
            groups.push(format!("({observed})"));
            replacements.push(expected);
        }
        let body = word_group(&groups.join("|"), spec.nonword);
        let pattern = compile_pattern(&def.name, &assemble(spec.ignorecase, &body))?;
        let pos = if spec.pos.is_empty() {
            None
        } else {
            Some(compile_pattern(&def.name, &spec.pos)?)
        };
        Ok(Substitution {
            def,
            pattern,
            replacements,
            pos,
        })
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let tagged = self
            .pos
            .as_ref()
            .map(|_| quill_nlp::tag(text))
            .unwrap_or_default();

        for caps in self.pattern.captures_iter(text).filter_map(|c| c.ok()) {
            let Some((idx, mat)) = (1..caps.len()).find_map(|i| caps.get(i).map(|m| (i, m))) else {
                continue;
            };
            if mat.as_str().is_empty() {
                continue;
            }
            let observed = mat.as_str();
            let expected = &self.replacements[idx - 1];
            // Matching the preferred form exactly is not an offense; this
            // is what lets vocabulary terms assert casing.
            if observed == expected {
                continue;
            }
            let mut alert =
                self.def
                    .alert(text, mat.start(), mat.end(), &[expected.as_str(), observed]);
            if let Some(pos) = &self.pos {
                let tag = tagged
                    .iter()
                    .find(|t| t.start >= mat.start() && t.start < mat.end())
                    .map_or("", |t| t.tag.as_str());
                if !pos.is_match(tag).unwrap_or(false) {
                    alert.hide = true;
                }
            }
            alerts.push(alert);
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::tests::{compiled, doc};

    #[test]
    fn swaps_report_expected_and_observed() {
        let check = compiled(
            "Style.Terms",
            "extends: substitution\nmessage: \"Use '%s' instead of '%s'.\"\nswap:\n  smart phone: smartphone\n",
        );
        let alerts = check.run("my smart phone", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].span, (3, 14));
        assert_eq!(alerts[0].matched, "smart phone");
        assert_eq!(
            alerts[0].message,
            "Use 'smartphone' instead of 'smart phone'."
        );
    }

    #[test]
    fn exact_preferred_form_is_silent() {
        let check = compiled(
            "Style.Terms",
            "extends: substitution\nmessage: \"Use '%s', not '%s'.\"\nignorecase: true\nswap:\n  javascript: JavaScript\n",
        );
        assert_eq!(check.run("I like JavaScript", &mut doc()).len(), 0);
        assert_eq!(check.run("I like javascript", &mut doc()).len(), 1);
    }

    #[test]
    fn capturing_groups_in_sources_are_rejected() {
        let err = crate::compile::compile_manifest(
            "Style.Bad",
            "extends: substitution\nmessage: m\nswap:\n  \"(smart) phone\": smartphone\n",
            &crate::compile::CompileCtx::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-capturing"));
    }

    #[test]
    fn longer_patterns_win() {
        let check = compiled(
            "Style.Terms",
            "extends: substitution\nmessage: \"%s over %s\"\nswap:\n  cat: feline\n  cat nap: catnap\n",
        );
        let alerts = check.run("a cat nap", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "cat nap");
    }
}
