// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert serialization: the stable JSON map and the one-line-per-alert
//! text form.

use quill_core::{Document, Error};
use serde_json::{Map, Value, json};

/// `{ "<path>": [alert, ...], ... }` in document order, with an `errors`
/// array when diagnostics accumulated.
#[must_use]
pub fn to_json(docs: &[Document], errors: &[Error]) -> Value {
    let mut map = Map::new();
    if !errors.is_empty() {
        map.insert(
            "errors".to_string(),
            Value::Array(errors.iter().map(|e| json!(e.to_string())).collect()),
        );
    }
    for doc in docs {
        map.insert(
            doc.path.clone(),
            serde_json::to_value(&doc.alerts).unwrap_or(Value::Null),
        );
    }
    Value::Object(map)
}

/// `path:line:col:check:message`, one line per alert.
#[must_use]
pub fn to_lines(docs: &[Document]) -> Vec<String> {
    let mut out = Vec::new();
    for doc in docs {
        for alert in &doc.alerts {
            out.push(format!(
                "{}:{}:{}:{}:{}",
                doc.path, alert.line, alert.span.0, alert.check, alert.message
            ));
        }
    }
    out
}

/// Whether any document carries an alert (exit-code driver; alerts are
/// already filtered to the configured minimum level).
#[must_use]
pub fn found_problems(docs: &[Document]) -> bool {
    docs.iter().any(|d| !d.alerts.is_empty())
}
