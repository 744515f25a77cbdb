// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `repetition`: flag adjacent equal matches, e.g. "the the".

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Error, Result};

use crate::check::{assemble, compile_pattern, find_all};
use crate::definition::Definition;

fn default_max() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RepetitionDef {
    tokens: Vec<String>,
    /// Permitted run length before alerting.
    max: usize,
    ignorecase: bool,
    /// Restrict the check to letter-only tokens.
    alpha: bool,
}

impl Default for RepetitionDef {
    fn default() -> Self {
        RepetitionDef {
            tokens: Vec::new(),
            max: default_max(),
            ignorecase: false,
            alpha: false,
        }
    }
}

#[derive(Debug)]
pub struct Repetition {
    pub def: Definition,
    pattern: Regex,
    max: usize,
    ignorecase: bool,
    alpha: bool,
}

impl Repetition {
    pub fn compile(def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: RepetitionDef = crate::compile::fields(&def.name, fields)?;
        if spec.tokens.is_empty() {
            return Err(Error::rule_load(&def.name, "repetition needs 'tokens'"));
        }
        let body = format!("(?:{})", spec.tokens.join("|"));
        let pattern = compile_pattern(&def.name, &assemble(spec.ignorecase, &body))?;
        Ok(Repetition {
            def,
            pattern,
            max: spec.max.max(1),
            ignorecase: spec.ignorecase,
            alpha: spec.alpha,
        })
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let mut prev: Option<String> = None;
        let mut streak_start = 0;
        let mut streak_end = 0;
        let mut count = 0;

        for (begin, end) in find_all(&self.pattern, text) {
            let mut token = text[begin..end].to_string();
            if self.ignorecase {
                token = token.to_lowercase();
            }
            if self.alpha && !token.chars().all(char::is_alphabetic) {
                continue;
            }
            // A newline between occurrences breaks the run.
            let adjacent = prev.as_deref() == Some(token.as_str())
                && !text[streak_end..begin].contains('\n');
            if adjacent {
                count += 1;
            } else {
                if count > self.max {
                    alerts.push(self.emit(text, streak_start, streak_end));
                }
                count = 1;
                streak_start = begin;
            }
            streak_end = end;
            prev = Some(token);
        }
        if count > self.max {
            alerts.push(self.emit(text, streak_start, streak_end));
        }
        alerts
    }

    fn emit(&self, text: &str, begin: usize, end: usize) -> Alert {
        let matched = &text[begin..end];
        self.def.alert(text, begin, end, &[matched])
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    fn check() -> crate::check::Check {
        compiled(
            "Style.Repetition",
            "extends: repetition\nmessage: \"'%s' is repeated\"\nalpha: true\ntokens:\n  - \"[^\\\\s]+\"\n",
        )
    }

    #[test]
    fn adjacent_duplicates_alert_once_per_run() {
        let alerts = check().run("This is is a test.", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "is is");
        assert_eq!(alerts[0].span, (5, 10));
    }

    #[test]
    fn newlines_break_runs() {
        assert!(check().run("the\nthe plan", &mut doc()).is_empty());
    }

    #[test]
    fn case_folding_is_opt_in() {
        assert!(check().run("The the plan", &mut doc()).is_empty());
        let folded = compiled(
            "Style.Repetition",
            "extends: repetition\nmessage: \"'%s' again\"\nignorecase: true\ntokens:\n  - \"[^\\\\s]+\"\n",
        );
        assert_eq!(folded.run("The the plan", &mut doc()).len(), 1);
    }

    #[test]
    fn triple_runs_stay_one_alert() {
        let alerts = check().run("go go go now", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "go go go");
    }
}
