// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project configuration consumed by the engine.
//!
//! Loaded from `quill.toml`. The global table applies to every file;
//! `[[section]]` tables scoped by a filename glob may add styles, toggle
//! individual rules, or override a rule's level. Syntax-specific sections
//! are applied after the global settings, so they win on conflict.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use globset::{Glob, GlobMatcher};
use serde::Deserialize;

use crate::alert::Severity;
use crate::error::{Error, Result};

/// Per-rule override parsed from a section's `rules` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleToggle {
    Enabled,
    Disabled,
    Level(Severity),
}

impl FromStr for RuleToggle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "YES" | "yes" | "true" => Ok(RuleToggle::Enabled),
            "NO" | "no" | "false" => Ok(RuleToggle::Disabled),
            other => other
                .parse::<Severity>()
                .map(RuleToggle::Level)
                .map_err(|_| format!("expected YES, NO, or an alert level, got '{other}'")),
        }
    }
}

/// A glob-scoped configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub glob: String,
    #[serde(default)]
    pub based_on_styles: Vec<String>,
    #[serde(default)]
    pub block_ignores: Vec<String>,
    #[serde(default)]
    pub token_ignores: Vec<String>,
    /// Rule name → `YES` | `NO` | level name.
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    #[serde(skip)]
    matcher: Option<GlobMatcher>,
}

impl Section {
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let file_name = Path::new(path)
            .file_name()
            .map_or(path, |n| n.to_str().unwrap_or(path));
        self.matcher
            .as_ref()
            .is_some_and(|m| m.is_match(path) || m.is_match(file_name))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub styles_path: PathBuf,
    pub min_alert_level: Severity,
    /// Markup scopes whose content is dropped entirely.
    pub skipped_scopes: Vec<String>,
    /// Markup scopes kept in the tree but emitted empty.
    pub ignored_scopes: Vec<String>,
    /// HTML classes treated like ignored scopes.
    pub ignored_classes: Vec<String>,
    /// Template wrapped around vocabulary terms; one `%s` hole.
    pub word_template: String,
    pub based_on_styles: Vec<String>,
    /// Name of the project vocabulary under `<styles_path>/vocab/`.
    pub vocab: Option<String>,
    /// XSLT applied to markup input before scoping (requires `xsltproc`).
    pub transform: Option<PathBuf>,
    pub block_ignores: Vec<String>,
    pub token_ignores: Vec<String>,
    /// Unknown extension → known extension remapping.
    pub formats: BTreeMap<String, String>,
    #[serde(rename = "section")]
    pub sections: Vec<Section>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            styles_path: PathBuf::from("styles"),
            min_alert_level: Severity::Suggestion,
            skipped_scopes: ["script", "style", "pre", "figure"]
                .map(str::to_string)
                .to_vec(),
            ignored_scopes: ["code", "tt"].map(str::to_string).to_vec(),
            ignored_classes: Vec::new(),
            word_template: r"\b(?:%s)\b".to_string(),
            based_on_styles: Vec::new(),
            vocab: None,
            transform: None,
            block_ignores: Vec::new(),
            token_ignores: Vec::new(),
            formats: BTreeMap::new(),
            sections: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Config::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Config> {
        let mut config: Config =
            toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.compile()?;
        Ok(config)
    }

    /// Compile section globs. Must run before any `*_for` query.
    pub fn compile(&mut self) -> Result<()> {
        for section in &mut self.sections {
            let glob = Glob::new(&section.glob)
                .map_err(|e| Error::Config(format!("bad section glob '{}': {e}", section.glob)))?;
            section.matcher = Some(glob.compile_matcher());
        }
        Ok(())
    }

    /// The styles applied to `path`: global plus any matching sections.
    #[must_use]
    pub fn styles_for(&self, path: &str) -> Vec<String> {
        let mut styles = self.based_on_styles.clone();
        for section in self.sections.iter().filter(|s| s.matches(path)) {
            for style in &section.based_on_styles {
                if !styles.contains(style) {
                    styles.push(style.clone());
                }
            }
        }
        styles
    }

    /// Per-rule overrides for `path`, later sections winning.
    pub fn overrides_for(&self, path: &str) -> BTreeMap<String, RuleToggle> {
        let mut out = BTreeMap::new();
        for section in self.sections.iter().filter(|s| s.matches(path)) {
            for (name, value) in &section.rules {
                match value.parse::<RuleToggle>() {
                    Ok(toggle) => {
                        out.insert(name.clone(), toggle);
                    }
                    Err(message) => log::warn!("ignoring override for {name}: {message}"),
                }
            }
        }
        out
    }

    /// Block-ignore patterns for `path` (global plus matching sections).
    #[must_use]
    pub fn block_ignores_for(&self, path: &str) -> Vec<String> {
        let mut out = self.block_ignores.clone();
        for section in self.sections.iter().filter(|s| s.matches(path)) {
            out.extend(section.block_ignores.iter().cloned());
        }
        out
    }

    /// Token-ignore patterns for `path` (global plus matching sections).
    #[must_use]
    pub fn token_ignores_for(&self, path: &str) -> Vec<String> {
        let mut out = self.token_ignores.clone();
        for section in self.sections.iter().filter(|s| s.matches(path)) {
            out.extend(section.token_ignores.iter().cloned());
        }
        out
    }
}
