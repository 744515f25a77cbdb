// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata common to every rule kind.

use serde::Deserialize;

use quill_core::{Action, Alert, Selector, Severity, format_message};

fn default_level() -> Severity {
    Severity::Warning
}

fn default_scope() -> String {
    "text".to_string()
}

/// Downstream action hint as written in a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionDef {
    pub name: String,
    pub params: Vec<String>,
}

/// The common keys of a rule manifest. Kind-specific keys are decoded
/// separately; unknown keys are tolerated for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    /// Qualified `Style.Rule` name, assigned by the loader.
    #[serde(skip)]
    pub name: String,
    pub extends: String,
    pub message: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_level")]
    pub level: Severity,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub action: ActionDef,
}

impl Definition {
    #[must_use]
    pub fn selector(&self) -> Selector {
        Selector::new(&self.scope)
    }

    /// Build a fully-populated scope-local alert.
    ///
    /// `begin`/`end` are byte offsets within `text`; the alert's span is
    /// converted to rune offsets as the localizer expects.
    #[must_use]
    pub fn alert(&self, text: &str, begin: usize, end: usize, args: &[&str]) -> Alert {
        let begin_rune = text[..begin.min(text.len())].chars().count();
        let end_rune = begin_rune + text[begin.min(text.len())..end.min(text.len())].chars().count();
        Alert {
            check: self.name.clone(),
            severity: self.level,
            line: 0,
            span: (begin_rune, end_rune),
            matched: text[begin.min(text.len())..end.min(text.len())].to_string(),
            message: format_message(&self.message, args),
            description: self.description.clone(),
            link: self.link.clone(),
            action: Action {
                name: self.action.name.clone(),
                params: self.action.params.clone(),
            },
            hide: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in() {
        let def: Definition =
            serde_yaml::from_str("extends: existence\nmessage: found it\n").unwrap();
        assert_eq!(def.level, Severity::Warning);
        assert_eq!(def.scope, "text");
        assert_eq!(def.limit, 0);
    }

    #[test]
    fn alerts_use_rune_offsets() {
        let mut def: Definition =
            serde_yaml::from_str("extends: existence\nmessage: \"got '%s'\"\n").unwrap();
        def.name = "Style.Rule".into();
        // "héllo wörld": 'wörld' begins at byte 7, rune 6.
        let text = "héllo wörld";
        let alert = def.alert(text, 7, 13, &["wörld"]);
        assert_eq!(alert.span, (6, 11));
        assert_eq!(alert.matched, "wörld");
        assert_eq!(alert.message, "got 'wörld'");
    }
}
