// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `conditional`: the antecedent may only appear once the consequent has
//! defined it, anywhere in the file.
//!
//! Consequent captures land in the document's sequence set; antecedent
//! matches come back as alerts that the dispatcher defers, and the final
//! pass drops every deferred alert whose text was defined by then.

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Document, Error, Result};

use crate::check::{assemble, compile_pattern, dedup_local};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConditionalDef {
    first: String,
    second: String,
    exceptions: Vec<String>,
    ignorecase: bool,
}

#[derive(Debug)]
pub struct Conditional {
    pub def: Definition,
    antecedent: Regex,
    consequent: Regex,
    exceptions: Option<Regex>,
}

impl Conditional {
    pub fn compile(
        def: Definition,
        fields: &serde_yaml::Value,
        accepted: &[String],
    ) -> Result<Self> {
        let spec: ConditionalDef = crate::compile::fields(&def.name, fields)?;
        if spec.first.is_empty() || spec.second.is_empty() {
            return Err(Error::rule_load(
                &def.name,
                "conditional needs 'first' and 'second'",
            ));
        }
        let antecedent = compile_pattern(&def.name, &assemble(spec.ignorecase, &spec.first))?;
        let consequent = compile_pattern(&def.name, &assemble(spec.ignorecase, &spec.second))?;
        // Vocabulary-accepted terms are pre-approved antecedents.
        let mut exception_list = spec.exceptions;
        exception_list.extend(accepted.iter().cloned());
        let exceptions = if exception_list.is_empty() {
            None
        } else {
            let body = format!("^(?:{})$", exception_list.join("|"));
            Some(compile_pattern(&def.name, &body)?)
        };
        Ok(Conditional {
            def,
            antecedent,
            consequent,
            exceptions,
        })
    }

    /// The sequence-set key recording that `text` has been defined.
    #[must_use]
    pub fn defined_key(check: &str, text: &str) -> String {
        format!("{check}\u{1}{text}")
    }

    #[must_use]
    pub fn run(&self, text: &str, doc: &mut Document) -> Vec<Alert> {
        for caps in self.consequent.captures_iter(text).filter_map(|c| c.ok()) {
            if let Some(definition) = caps.get(1).or_else(|| caps.get(0)) {
                doc.sequences
                    .insert(Self::defined_key(&self.def.name, definition.as_str()));
            }
        }

        let mut alerts = Vec::new();
        for m in self.antecedent.find_iter(text).filter_map(|m| m.ok()) {
            if m.as_str().is_empty() {
                continue;
            }
            let excepted = self
                .exceptions
                .as_ref()
                .is_some_and(|re| re.is_match(m.as_str()).unwrap_or(false));
            if excepted {
                continue;
            }
            alerts.push(self.def.alert(text, m.start(), m.end(), &[m.as_str()]));
        }
        dedup_local(alerts)
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    fn check() -> crate::check::Check {
        compiled(
            "Style.Acronyms",
            concat!(
                "extends: conditional\n",
                "message: \"'%s' has no definition\"\n",
                "first: \"\\\\b([A-Z]{3,5})\\\\b\"\n",
                "second: \"(?:\\\\b[A-Z][a-z]+ )+\\\\(([A-Z]{3,5})\\\\)\"\n",
                "exceptions:\n  - API\n",
            ),
        )
    }

    #[test]
    fn candidates_and_definitions_accumulate() {
        let mut d = doc();
        let text = "The World Health Organization (WHO) and WHO agree.";
        let alerts = check().run(text, &mut d);
        // Both WHO sightings come back; the deferral pass consults the
        // sequence set, which now holds the definition.
        assert_eq!(alerts.len(), 2);
        assert!(d.sequences.iter().any(|s| s.ends_with("\u{1}WHO")));
    }

    #[test]
    fn undefined_candidates_survive() {
        let mut d = doc();
        let alerts = check().run("WHO says hello.", &mut d);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].span, (0, 3));
        assert!(d.sequences.is_empty());
    }

    #[test]
    fn exceptions_never_alert() {
        let mut d = doc();
        assert!(check().run("use the API now", &mut d).is_empty());
    }
}
