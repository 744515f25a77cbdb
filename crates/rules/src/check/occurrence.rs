// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `occurrence`: bound how often a pattern may appear in a scope.

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Error, Result};

use crate::check::{assemble, compile_pattern, find_all};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OccurrenceDef {
    token: String,
    max: Option<usize>,
    min: Option<usize>,
    ignorecase: bool,
}

#[derive(Debug)]
pub struct Occurrence {
    pub def: Definition,
    pattern: Regex,
    max: Option<usize>,
    min: Option<usize>,
}

impl Occurrence {
    pub fn compile(def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: OccurrenceDef = crate::compile::fields(&def.name, fields)?;
        if spec.token.is_empty() {
            return Err(Error::rule_load(&def.name, "occurrence needs 'token'"));
        }
        if spec.max.is_none() && spec.min.is_none() {
            return Err(Error::rule_load(&def.name, "occurrence needs 'max' or 'min'"));
        }
        let pattern = compile_pattern(&def.name, &assemble(spec.ignorecase, &spec.token))?;
        Ok(Occurrence {
            def,
            pattern,
            max: spec.max,
            min: spec.min,
        })
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let matches = find_all(&self.pattern, text);
        let count = matches.len();
        let over = self.max.is_some_and(|max| count > max);
        let under = self.min.is_some_and(|min| count < min);
        if !(over || under) {
            return Vec::new();
        }
        // The span attaches to the first match; with no match at all the
        // alert anchors at the head of the scope.
        let (begin, end) = matches.first().copied().unwrap_or((0, 0));
        let mut alert = self.def.alert(text, begin, end, &[&count.to_string()]);
        if alert.matched.is_empty() {
            alert.span = (0, text.chars().take_while(|c| *c != '\n').count());
        }
        vec![alert]
    }
}
