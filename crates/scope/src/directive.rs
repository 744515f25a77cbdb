// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-text control comments.
//!
//! `<!-- quill off -->` / `<!-- quill on -->` flip the file-wide flag;
//! `<!-- quill Style.Rule = NO -->` toggles one rule. In source code the
//! same payloads are recognized on comment lines (`//`, `#`, `;`, `--`).
//! Directives carry their byte offset; the state at a segment's origin
//! governs the whole segment.

use std::sync::LazyLock;

use quill_core::{ControlDirective, FormatClass};
use regex::Regex;

static MARKUP_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*quill\s+([^>]+?)\s*-->").expect("markup directive"));

static COMMENT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?://|#|;|--|/\*)\s*quill\s+(on|off|[\w.]+\s*=\s*(?:YES|NO))\s*(?:\*/)?\s*$")
        .expect("comment directive")
});

static TOGGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w.]+)\s*=\s*(YES|NO)$").expect("directive toggle"));

fn parse_payload(payload: &str, offset: usize) -> Option<ControlDirective> {
    let payload = payload.trim();
    match payload {
        "off" => return Some(ControlDirective::Global { offset, on: false }),
        "on" => return Some(ControlDirective::Global { offset, on: true }),
        _ => {}
    }
    let caps = TOGGLE.captures(payload)?;
    Some(ControlDirective::Rule {
        offset,
        name: caps[1].to_string(),
        enabled: &caps[2] == "YES",
    })
}

/// Collect control directives from the working copy, in offset order.
#[must_use]
pub fn collect(content: &str, format: FormatClass) -> Vec<ControlDirective> {
    let mut out = Vec::new();
    for caps in MARKUP_DIRECTIVE.captures_iter(content) {
        let whole = caps.get(0).expect("group 0");
        if let Some(d) = parse_payload(&caps[1], whole.start()) {
            out.push(d);
        }
    }
    if format == FormatClass::Code {
        for caps in COMMENT_DIRECTIVE.captures_iter(content) {
            let whole = caps.get(0).expect("group 0");
            if let Some(d) = parse_payload(&caps[1], whole.start()) {
                out.push(d);
            }
        }
    }
    out.sort_by_key(ControlDirective::offset);
    out
}
