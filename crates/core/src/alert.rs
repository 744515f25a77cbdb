// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alerts and their severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rune-column span within a line: 1-based, inclusive begin, exclusive end.
pub type Span = (usize, usize);

/// Severity levels, ordered so that filtering can compare them directly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Suggestion,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suggestion" => Ok(Severity::Suggestion),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown alert level '{other}'")),
        }
    }
}

/// A downstream hint attached to an alert, e.g. `{name: replace, params: [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Params", default)]
    pub params: Vec<String>,
}

impl Action {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.params.is_empty()
    }
}

/// One reported issue with location and severity.
///
/// `line` is 1-based; `span` is in rune columns within that line, 1-based
/// with an exclusive end. The serialized field names follow the stable JSON
/// output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "Check")]
    pub check: String,
    #[serde(rename = "Severity")]
    pub severity: Severity,
    #[serde(rename = "Line")]
    pub line: usize,
    #[serde(rename = "Span")]
    pub span: Span,
    #[serde(rename = "Match")]
    pub matched: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Link", default)]
    pub link: String,
    #[serde(rename = "Action", default)]
    pub action: Action,
    /// Internal filter flag: set when a POS predicate fails, removing the
    /// alert before emission. Never serialized.
    #[serde(skip)]
    pub hide: bool,
}

impl Alert {
    /// A scope-local alert: `line` stays 0 until the localizer assigns the
    /// absolute position, and `span` holds rune offsets within the segment.
    #[must_use]
    pub fn local(check: &str, begin: usize, end: usize, matched: &str) -> Self {
        Alert {
            check: check.to_string(),
            severity: Severity::default(),
            line: 0,
            span: (begin, end),
            matched: matched.to_string(),
            message: String::new(),
            description: String::new(),
            link: String::new(),
            action: Action::default(),
            hide: false,
        }
    }
}
