// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule compilation and the rule registry.
//!
//! A style is a directory of YAML manifests under the styles path; the
//! registry compiles every manifest once at startup and is read-only
//! during evaluation. Load errors accumulate per manifest instead of
//! aborting the run.

pub mod check;
pub mod compile;
pub mod definition;
pub mod vocab;

use std::collections::BTreeMap;
use std::path::Path;

use quill_core::{Config, Error};

pub use check::Check;
pub use compile::{CompileCtx, EXTENSION_POINTS, compile_manifest};
pub use definition::Definition;
pub use vocab::Vocabulary;

/// The compiled rule set, keyed by qualified name.
#[derive(Debug, Default)]
pub struct Registry {
    checks: BTreeMap<String, Check>,
    /// Accumulated load errors, surfaced before output.
    pub errors: Vec<Error>,
    /// Accepted vocabulary terms, for downstream exception handling.
    pub accepted: Vec<String>,
}

impl Registry {
    /// Compile every style under the configuration's styles path, plus
    /// the synthesized vocabulary rules.
    #[must_use]
    pub fn load(config: &Config) -> Registry {
        let mut registry = Registry::default();
        let vocabulary = Vocabulary::load(config);
        let ctx = CompileCtx {
            styles_path: config.styles_path.clone(),
            accepted: vocabulary.accepted.clone(),
        };
        registry.accepted = vocabulary.accepted.clone();

        match vocabulary.synthesize(config, &ctx) {
            Ok(checks) => {
                for check in checks {
                    registry.insert(check);
                }
            }
            Err(e) => registry.errors.push(e),
        }

        let styles = match std::fs::read_dir(&config.styles_path) {
            Ok(entries) => entries,
            Err(e) => {
                if !config.based_on_styles.is_empty() {
                    registry.errors.push(Error::Config(format!(
                        "cannot read styles path {}: {e}",
                        config.styles_path.display()
                    )));
                }
                return registry;
            }
        };
        let mut style_dirs: Vec<_> = styles
            .filter_map(std::result::Result::ok)
            .filter(|e| e.path().is_dir())
            .collect();
        style_dirs.sort_by_key(std::fs::DirEntry::file_name);

        for style in style_dirs {
            let style_name = style.file_name().to_string_lossy().to_string();
            if style_name == "vocab" {
                continue;
            }
            registry.load_style(&style_name, &style.path(), &ctx);
        }
        registry
    }

    fn load_style(&mut self, style: &str, dir: &Path, ctx: &CompileCtx) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            self.errors.push(Error::Config(format!(
                "cannot read style directory {}",
                dir.display()
            )));
            return;
        };
        let mut files: Vec<_> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == "yml" || e == "yaml")
            })
            .collect();
        files.sort();

        for path in files {
            let rule = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let name = format!("{style}.{rule}");
            match std::fs::read_to_string(&path) {
                Ok(manifest) => match compile_manifest(&name, &manifest, ctx) {
                    Ok(check) => self.insert(check),
                    Err(e) => self.errors.push(e),
                },
                Err(e) => self.errors.push(Error::rule_load(&name, e)),
            }
        }
    }

    pub fn insert(&mut self, check: Check) {
        self.checks.insert(check.definition().name.clone(), check);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Check> {
        self.checks.get(name)
    }

    /// Registry-order iteration (stable, by qualified name).
    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
