// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `existence`: fail for every match of the compiled pattern.

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Result};

use crate::check::{assemble, compile_pattern, find_all, word_group};
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ExistenceDef {
    tokens: Vec<String>,
    raw: Vec<String>,
    ignorecase: bool,
    nonword: bool,
    append: bool,
}

#[derive(Debug)]
pub struct Existence {
    pub def: Definition,
    pattern: Regex,
}

impl Existence {
    pub fn compile(def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: ExistenceDef = crate::compile::fields(&def.name, fields)?;
        let mut body = String::new();
        if !spec.tokens.is_empty() {
            body = word_group(&spec.tokens.join("|"), spec.nonword);
        }
        let raw = spec.raw.concat();
        // `append` puts the raw fragment in front of the token group,
        // otherwise it trails it.
        let combined = if spec.append {
            format!("{raw}{body}")
        } else {
            format!("{body}{raw}")
        };
        if combined.is_empty() {
            return Err(quill_core::Error::rule_load(
                &def.name,
                "existence needs 'tokens' or 'raw'",
            ));
        }
        let pattern = compile_pattern(&def.name, &assemble(spec.ignorecase, &combined))?;
        Ok(Existence { def, pattern })
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        find_all(&self.pattern, text)
            .into_iter()
            .map(|(begin, end)| {
                let matched = &text[begin..end];
                self.def.alert(text, begin, end, &[matched])
            })
            .collect()
    }
}
