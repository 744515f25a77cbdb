// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project vocabularies.
//!
//! A vocabulary is a pair of word lists under
//! `<styles>/vocab/<name>/`: `accept.txt` terms synthesize the
//! `Quill.Terms` substitution (matched case-insensitively, corrected to
//! the listed casing), `reject.txt` terms the `Quill.Avoid` existence
//! rule. Accepted terms additionally become exceptions inside
//! capitalization, conditional, and spelling rules.

use std::path::Path;

use quill_core::{Config, Result, format_message};

use crate::compile::{CompileCtx, compile_manifest};
use crate::check::Check;

/// Terms read from one vocabulary directory.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

fn read_terms(path: &Path) -> Vec<String> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

impl Vocabulary {
    /// Load the vocabulary named by the configuration, if any.
    #[must_use]
    pub fn load(config: &Config) -> Vocabulary {
        let Some(name) = &config.vocab else {
            return Vocabulary::default();
        };
        let base = config.styles_path.join("vocab").join(name);
        let vocab = Vocabulary {
            accepted: read_terms(&base.join("accept.txt")),
            rejected: read_terms(&base.join("reject.txt")),
        };
        if vocab.accepted.is_empty() && vocab.rejected.is_empty() {
            log::warn!("vocabulary '{name}' is empty or missing at {}", base.display());
        }
        vocab
    }

    /// Synthesize the implicit `Quill.Terms` / `Quill.Avoid` rules.
    pub fn synthesize(&self, config: &Config, ctx: &CompileCtx) -> Result<Vec<Check>> {
        let mut checks = Vec::new();
        if !self.accepted.is_empty() {
            let mut manifest = String::from(
                "extends: substitution\nmessage: \"Use '%s' instead of '%s'.\"\nlevel: error\nignorecase: true\nswap:\n",
            );
            for term in &self.accepted {
                let observed = format_message(
                    &config.word_template,
                    &[&regex_escape_preserving(&term.to_lowercase())],
                );
                manifest.push_str(&format!("  \"{}\": \"{}\"\n", yaml_escape(&observed), yaml_escape(term)));
            }
            checks.push(compile_manifest("Quill.Terms", &manifest, ctx)?);
        }
        if !self.rejected.is_empty() {
            let mut manifest = String::from(
                "extends: existence\nmessage: \"Avoid using '%s'.\"\nlevel: error\nignorecase: true\ntokens:\n",
            );
            for term in &self.rejected {
                manifest.push_str(&format!("  - \"{}\"\n", yaml_escape(term)));
            }
            checks.push(compile_manifest("Quill.Avoid", &manifest, ctx)?);
        }
        Ok(checks)
    }
}

/// Escape regex metacharacters in a term while keeping explicit character
/// classes authors may have written.
fn regex_escape_preserving(term: &str) -> String {
    if term.chars().any(|c| matches!(c, '[' | '(' | '\\' | '?' | '*' | '+')) {
        // Already a pattern; trust the author.
        return term.to_string();
    }
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '.' | '^' | '$' | '|' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn yaml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Document, FormatClass};
    use std::io::Write;

    fn setup(accept: &str, reject: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let vocab_dir = dir.path().join("vocab").join("project");
        std::fs::create_dir_all(&vocab_dir).unwrap();
        let mut f = std::fs::File::create(vocab_dir.join("accept.txt")).unwrap();
        writeln!(f, "{accept}").unwrap();
        let mut f = std::fs::File::create(vocab_dir.join("reject.txt")).unwrap();
        writeln!(f, "{reject}").unwrap();
        let mut config = Config::default();
        config.styles_path = dir.path().to_path_buf();
        config.vocab = Some("project".to_string());
        (dir, config)
    }

    fn doc() -> Document {
        Document::new("t.md", "", "md", "md", FormatClass::Markup)
    }

    #[test]
    fn accepted_terms_repair_casing() {
        let (_dir, config) = setup("JavaScript", "cloud-native");
        let vocab = Vocabulary::load(&config);
        let checks = vocab.synthesize(&config, &CompileCtx::default()).unwrap();
        assert_eq!(checks.len(), 2);

        let terms = &checks[0];
        assert_eq!(terms.definition().name, "Quill.Terms");
        let alerts = terms.run("I write javascript daily", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("'JavaScript'"));
        // The canonical casing itself is untouched.
        assert!(terms.run("I write JavaScript daily", &mut doc()).is_empty());
    }

    #[test]
    fn rejected_terms_alert() {
        let (_dir, config) = setup("JavaScript", "cloud-native");
        let vocab = Vocabulary::load(&config);
        let checks = vocab.synthesize(&config, &CompileCtx::default()).unwrap();
        let avoid = &checks[1];
        assert_eq!(avoid.definition().name, "Quill.Avoid");
        let alerts = avoid.run("a cloud-native stack", &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "cloud-native");
    }

    #[test]
    fn missing_vocab_is_empty() {
        let config = Config::default();
        let vocab = Vocabulary::load(&config);
        assert!(vocab.accepted.is_empty());
        assert!(vocab.synthesize(&config, &CompileCtx::default()).unwrap().is_empty());
    }
}
