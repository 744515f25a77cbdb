// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `consistency`: either form is fine, mixing them is not.
//!
//! Sightings accumulate in the document's sequence set, so the two forms
//! may appear in different scopes. Once both members of a pair have been
//! seen, the scan of a scope that contains either form ends with one
//! alert at the pair's last match in that scope.

use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

use quill_core::{Alert, Document, Error, Result};

use crate::check::{assemble, compile_pattern, word_group};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConsistencyDef {
    either: BTreeMap<String, String>,
    ignorecase: bool,
    nonword: bool,
}

#[derive(Debug)]
struct Pair {
    pattern: Regex,
}

#[derive(Debug)]
pub struct Consistency {
    pub def: Definition,
    pairs: Vec<Pair>,
}

impl Consistency {
    pub fn compile(def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: ConsistencyDef = crate::compile::fields(&def.name, fields)?;
        if spec.either.is_empty() {
            return Err(Error::rule_load(&def.name, "consistency needs 'either'"));
        }
        let mut pairs = Vec::with_capacity(spec.either.len());
        for (first, second) in &spec.either {
            let body = format!(
                "{}|{}",
                word_group(&format!("({first})"), spec.nonword),
                word_group(&format!("({second})"), spec.nonword)
            );
            pairs.push(Pair {
                pattern: compile_pattern(&def.name, &assemble(spec.ignorecase, &body))?,
            });
        }
        Ok(Consistency { def, pairs })
    }

    #[must_use]
    pub fn run(&self, text: &str, doc: &mut Document) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for (idx, pair) in self.pairs.iter().enumerate() {
            let mut last: Option<(usize, usize)> = None;
            for caps in pair.pattern.captures_iter(text).filter_map(|c| c.ok()) {
                let (member, mat) = if let Some(m) = caps.get(1) {
                    ("a", m)
                } else if let Some(m) = caps.get(2) {
                    ("b", m)
                } else {
                    continue;
                };
                if mat.as_str().is_empty() {
                    continue;
                }
                doc.sequences
                    .insert(format!("{}\u{1}{idx}\u{1}{member}", self.def.name));
                last = Some((mat.start(), mat.end()));
            }
            let both = doc
                .sequences
                .contains(&format!("{}\u{1}{idx}\u{1}a", self.def.name))
                && doc
                    .sequences
                    .contains(&format!("{}\u{1}{idx}\u{1}b", self.def.name));
            if both {
                if let Some((begin, end)) = last {
                    let matched = &text[begin..end];
                    alerts.push(self.def.alert(text, begin, end, &[matched]));
                }
            }
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    fn check() -> crate::check::Check {
        compiled(
            "Style.Spelling",
            "extends: consistency\nmessage: \"inconsistent spelling of '%s'\"\nignorecase: true\neither:\n  advisor: adviser\n",
        )
    }

    #[test]
    fn single_form_is_consistent() {
        let mut d = doc();
        assert!(check().run("my advisor and another advisor", &mut d).is_empty());
    }

    #[test]
    fn mixed_forms_alert_at_the_last_match() {
        let mut d = doc();
        let alerts = check().run("an advisor but an adviser too", &mut d);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "adviser");
        assert_eq!(alerts[0].span, (18, 25));
    }

    #[test]
    fn sightings_persist_across_scopes() {
        let c = check();
        let mut d = doc();
        assert!(c.run("the advisor agrees", &mut d).is_empty());
        let alerts = c.run("the adviser disagrees", &mut d);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "adviser");
    }
}
