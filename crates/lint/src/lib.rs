// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The linting driver.
//!
//! One [`Linter`] owns a read-only view of the configuration and the
//! compiled registry and lints any number of files, in parallel across
//! files and strictly in order within one. Results are independent of
//! scheduling: every document is processed in isolation and output is
//! ordered explicitly.

mod dispatch;
pub mod output;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use quill_core::{Config, Document, Error, Result, RuleToggle};
use quill_rules::Registry;
use quill_scope::{prose, route, scope_document};

pub use output::{found_problems, to_json, to_lines};

pub struct Linter<'a> {
    config: &'a Config,
    registry: &'a Registry,
}

impl<'a> Linter<'a> {
    #[must_use]
    pub fn new(config: &'a Config, registry: &'a Registry) -> Self {
        Linter { config, registry }
    }

    /// Which rules are active for `path`, before in-text overrides.
    fn activate(&self, doc: &mut Document) {
        let styles = self.config.styles_for(&doc.path);
        let overrides = self.config.overrides_for(&doc.path);
        for check in self.registry.iter() {
            let def = check.definition();
            let style = def.name.split('.').next().unwrap_or_default();
            // Synthesized vocabulary rules are always on once loaded.
            let mut enabled = styles.iter().any(|s| s == style) || style == "Quill";
            match overrides.get(&def.name) {
                Some(RuleToggle::Enabled) => enabled = true,
                Some(RuleToggle::Disabled) => enabled = false,
                Some(RuleToggle::Level(level)) => {
                    doc.level_overrides.insert(def.name.clone(), *level);
                }
                None => {}
            }
            doc.active_checks.insert(def.name.clone(), enabled);
        }
    }

    /// Lint in-memory source as if read from `path`.
    #[must_use]
    pub fn lint_source(&self, path: &str, raw: &str) -> Document {
        let r = route(path, self.config);
        let mut doc = Document::new(path, raw, &r.real_ext, &r.norm_ext, r.format.class());
        self.activate(&mut doc);

        let segments = match scope_document(&mut doc, self.config) {
            Ok(segments) => segments,
            Err(e) => {
                // Transform and parse failures downgrade to plain prose.
                log::warn!("{e}; linting {path} as plain prose");
                prose::scope(&doc.content)
            }
        };
        dispatch::run(&mut doc, &segments, self.registry);

        doc.alerts
            .retain(|a| a.severity >= self.config.min_alert_level);
        doc.sort_alerts();
        doc
    }

    /// Lint one file from disk.
    pub fn lint_file(&self, path: &Path) -> Result<Document> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::SourceRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(self.lint_source(&path.display().to_string(), &raw))
    }

    /// Lint many files with a bounded worker pool. A read failure skips
    /// that file and is reported alongside the results. With `sort`,
    /// output is in lexicographic path order; otherwise input order.
    #[must_use]
    pub fn lint_paths(&self, paths: &[PathBuf], sort: bool) -> (Vec<Document>, Vec<Error>) {
        let mut results: Vec<(usize, Result<Document>)> = paths
            .par_iter()
            .enumerate()
            .map(|(i, path)| (i, self.lint_file(path)))
            .collect();
        if sort {
            results.sort_by(|a, b| {
                let key = |r: &(usize, Result<Document>)| match &r.1 {
                    Ok(doc) => doc.path.clone(),
                    Err(_) => String::new(),
                };
                key(a).cmp(&key(b))
            });
        } else {
            results.sort_by_key(|(i, _)| *i);
        }

        let mut docs = Vec::new();
        let mut errors = Vec::new();
        for (_, result) in results {
            match result {
                Ok(doc) => docs.push(doc),
                Err(e) => errors.push(e),
            }
        }
        (docs, errors)
    }
}
