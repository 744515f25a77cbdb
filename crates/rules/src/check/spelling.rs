// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `spelling`: reject tokens the spell model does not accept.
//!
//! Tokens pass through the default filters (URLs, acronyms, hex,
//! camel case, anything with a digit) plus the rule's own `filters`
//! before lookup; `custom: true` drops the defaults. `ignore` files add
//! project words, and vocabulary-accepted terms never alert.

use fancy_regex::Regex;
use serde::Deserialize;

use quill_core::{Alert, Result};
use quill_nlp::WordListModel;
use quill_nlp::spell::DEFAULT_FILTERS;

use crate::check::compile_pattern;
use crate::compile::CompileCtx;
use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SpellingDef {
    /// Word-list files (relative to the styles directory) whose entries
    /// are accepted.
    ignore: Vec<String>,
    /// Dictionary word lists to load into the model.
    dictionaries: Vec<String>,
    /// Additional filter patterns.
    filters: Vec<String>,
    /// Drop the default filters.
    custom: bool,
}

#[derive(Debug)]
pub struct Spelling {
    pub def: Definition,
    model: WordListModel,
    filters: Vec<Regex>,
    use_default_filters: bool,
    accepted: Vec<String>,
}

impl Spelling {
    pub fn compile(def: Definition, fields: &serde_yaml::Value, ctx: &CompileCtx) -> Result<Self> {
        let spec: SpellingDef = crate::compile::fields(&def.name, fields)?;
        let mut model = WordListModel::new();
        for rel in spec.dictionaries.iter().chain(spec.ignore.iter()) {
            let path = ctx.styles_path.join(rel);
            if let Err(e) = model.load_file(&path) {
                log::warn!("{}: cannot load word list {}: {e}", def.name, path.display());
            }
        }
        if !model.is_open() {
            log::warn!(
                "{}: no word list loaded; every token will be accepted",
                def.name
            );
        }
        let mut filters = Vec::new();
        for pattern in &spec.filters {
            filters.push(compile_pattern(&def.name, pattern)?);
        }
        Ok(Spelling {
            def,
            model,
            filters,
            use_default_filters: !spec.custom,
            accepted: ctx.accepted.clone(),
        })
    }

    fn filtered(&self, token: &str) -> bool {
        if self.use_default_filters && DEFAULT_FILTERS.iter().any(|f| f.is_match(token)) {
            return true;
        }
        self.filters
            .iter()
            .any(|f| f.is_match(token).unwrap_or(false))
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        // Filters see whole whitespace-delimited chunks first, so URLs and
        // domains are masked before the word tokenizer splits them apart.
        let mut masked = text.to_string();
        let mut offset = 0;
        for chunk in text.split_inclusive(char::is_whitespace) {
            let trimmed = chunk.trim_end();
            if !trimmed.is_empty() && self.filtered(trimmed) {
                let blank: String = trimmed
                    .chars()
                    .map(|c| " ".repeat(c.len_utf8()))
                    .collect();
                masked.replace_range(offset..offset + trimmed.len(), &blank);
            }
            offset += chunk.len();
        }

        let mut alerts = Vec::new();
        for token in quill_nlp::words(&masked) {
            if self.filtered(&token.text) {
                continue;
            }
            if self
                .accepted
                .iter()
                .any(|a| a.eq_ignore_ascii_case(&token.text))
            {
                continue;
            }
            if self.model.accept(&token.text) {
                continue;
            }
            alerts.push(
                self.def
                    .alert(text, token.start, token.end(), &[&token.text]),
            );
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::compile::{CompileCtx, compile_manifest};

    fn ctx_with_dictionary(words: &str) -> (tempfile::TempDir, CompileCtx) {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("en.wl")).unwrap();
        writeln!(f, "{words}").unwrap();
        let ctx = CompileCtx {
            styles_path: dir.path().to_path_buf(),
            accepted: vec!["Quill".to_string()],
        };
        (dir, ctx)
    }

    #[test]
    fn unknown_words_alert() {
        let (_dir, ctx) = ctx_with_dictionary("the\nquick\nfox");
        let check = compile_manifest(
            "Style.Spelling",
            "extends: spelling\nmessage: \"'%s' is a typo\"\ndictionaries:\n  - en.wl\n",
            &ctx,
        )
        .unwrap();
        let alerts = check.run("the qwick fox", &mut crate::compile::tests::doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "qwick");
        assert_eq!(alerts[0].message, "'qwick' is a typo");
    }

    #[test]
    fn default_filters_and_vocab_are_respected() {
        let (_dir, ctx) = ctx_with_dictionary("plain");
        let check = compile_manifest(
            "Style.Spelling",
            "extends: spelling\nmessage: \"'%s'?\"\ndictionaries:\n  - en.wl\n",
            &ctx,
        )
        .unwrap();
        let mut d = crate::compile::tests::doc();
        // URL and acronym fall to the default filters; Quill is vocabulary.
        assert!(check.run("plain HTTP https://x.test Quill", &mut d).is_empty());
    }

    #[test]
    fn user_filters_extend_the_defaults() {
        let (_dir, ctx) = ctx_with_dictionary("plain");
        let check = compile_manifest(
            "Style.Spelling",
            "extends: spelling\nmessage: \"'%s'?\"\ndictionaries:\n  - en.wl\nfilters:\n  - \"^qz\"\n",
            &ctx,
        )
        .unwrap();
        let mut d = crate::compile::tests::doc();
        assert!(check.run("plain qzword", &mut d).is_empty());
        assert_eq!(check.run("plain zqword", &mut d).len(), 1);
    }
}
