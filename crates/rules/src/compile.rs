// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest compilation: YAML bytes in, a typed [`Check`] out.
//!
//! The manifest decodes to a neutral value tree first; `extends` and
//! `message` are validated there so the error can name the manifest, and
//! the kind-specific constructor then re-decodes the same tree into its
//! typed fields. Unknown top-level keys are tolerated.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use quill_core::{Error, Result};

use crate::check::{
    Capitalization, Check, Conditional, Consistency, Existence, Occurrence, Readability,
    Repetition, Sequence, Spelling, Substitution,
};
use crate::definition::Definition;

/// The fixed set of extension points.
pub const EXTENSION_POINTS: &[&str] = &[
    "existence",
    "substitution",
    "occurrence",
    "repetition",
    "consistency",
    "conditional",
    "capitalization",
    "readability",
    "spelling",
    "sequence",
];

/// Shared compile-time context: where word lists live and which
/// vocabulary terms are pre-approved.
#[derive(Debug, Clone, Default)]
pub struct CompileCtx {
    pub styles_path: PathBuf,
    /// Accepted vocabulary terms, injected as exceptions into
    /// capitalization, conditional, and spelling rules.
    pub accepted: Vec<String>,
}

/// Decode kind-specific fields from the manifest's value tree.
pub(crate) fn fields<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T> {
    serde_yaml::from_value(value.clone()).map_err(|e| Error::rule_load(name, e))
}

/// Compile one manifest under its qualified `Style.Rule` name.
pub fn compile_manifest(name: &str, manifest: &str, ctx: &CompileCtx) -> Result<Check> {
    let value: Value =
        serde_yaml::from_str(manifest).map_err(|e| Error::rule_load(name, e))?;

    let extends = value
        .get("extends")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::rule_load(name, "missing required key 'extends'"))?
        .to_string();
    if !EXTENSION_POINTS.contains(&extends.as_str()) {
        return Err(Error::rule_load(
            name,
            format!("unknown extension point '{extends}'"),
        ));
    }
    if value.get("message").and_then(Value::as_str).is_none() {
        return Err(Error::rule_load(name, "missing required key 'message'"));
    }

    let mut def: Definition = fields(name, &value)?;
    def.name = name.to_string();

    match extends.as_str() {
        "existence" => Existence::compile(def, &value).map(Check::Existence),
        "substitution" => Substitution::compile(def, &value).map(Check::Substitution),
        "occurrence" => Occurrence::compile(def, &value).map(Check::Occurrence),
        "repetition" => Repetition::compile(def, &value).map(Check::Repetition),
        "consistency" => Consistency::compile(def, &value).map(Check::Consistency),
        "conditional" => {
            Conditional::compile(def, &value, &ctx.accepted).map(Check::Conditional)
        }
        "capitalization" => {
            Capitalization::compile(def, &value, &ctx.accepted).map(Check::Capitalization)
        }
        "readability" => Readability::compile(def, &value).map(Check::Readability),
        "spelling" => Spelling::compile(def, &value, ctx).map(Check::Spelling),
        "sequence" => Sequence::compile(def, &value).map(Check::Sequence),
        _ => unreachable!("extension point validated above"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quill_core::{Document, FormatClass};

    /// Compile a manifest, panicking on error; test helper.
    pub(crate) fn compiled(name: &str, manifest: &str) -> Check {
        compile_manifest(name, manifest, &CompileCtx::default())
            .unwrap_or_else(|e| panic!("manifest for {name} failed: {e}"))
    }

    /// A scratch document for `run` calls.
    pub(crate) fn doc() -> Document {
        Document::new("test.md", "", "md", "md", FormatClass::Markup)
    }

    #[test]
    fn missing_extends_is_rejected() {
        let err = compile_manifest("S.R", "message: hi\n", &CompileCtx::default()).unwrap_err();
        assert!(err.to_string().contains("extends"));
        assert!(err.to_string().contains("S.R"));
    }

    #[test]
    fn unknown_extends_is_rejected() {
        let err = compile_manifest(
            "S.R",
            "extends: telepathy\nmessage: hi\n",
            &CompileCtx::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("telepathy"));
    }

    #[test]
    fn missing_message_is_rejected() {
        let err = compile_manifest(
            "S.R",
            "extends: existence\ntokens:\n  - x\n",
            &CompileCtx::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("message"));
    }

    #[test]
    fn bad_regex_is_surfaced() {
        let err = compile_manifest(
            "S.R",
            "extends: existence\nmessage: hi\ntokens:\n  - \"(unclosed\"\n",
            &CompileCtx::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("pattern"));
    }

    #[test]
    fn unknown_top_level_keys_are_tolerated() {
        let check = compiled(
            "S.R",
            "extends: existence\nmessage: hi\ntokens:\n  - x\nfuture_key: whatever\n",
        );
        assert_eq!(check.kind(), "existence");
    }

    #[test]
    fn level_and_scope_are_honored() {
        let check = compiled(
            "S.R",
            "extends: existence\nmessage: hi\nlevel: error\nscope: heading\ntokens:\n  - x\n",
        );
        let def = check.definition();
        assert_eq!(def.level, quill_core::Severity::Error);
        assert_eq!(def.selector().as_str(), "heading");
    }
}
