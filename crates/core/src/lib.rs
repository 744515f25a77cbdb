// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data model for the Quill prose linter.
//!
//! Everything downstream of the scoper and the rule engine speaks the types
//! defined here: [`Selector`] paths identifying syntactic regions,
//! [`Segment`]s of scoped text, [`Alert`]s produced by checks, and the
//! per-file [`Document`] that accumulates them. Localization from
//! scope-local offsets back to source positions lives in [`location`].

pub mod alert;
pub mod config;
pub mod document;
pub mod error;
pub mod location;
pub mod segment;
pub mod selector;

pub use alert::{Action, Alert, Severity, Span};
pub use config::{Config, RuleToggle, Section};
pub use document::{ControlDirective, Deferred, Document, FormatClass};
pub use error::{Error, Result};
pub use location::{LineIndex, locate, rune_to_byte};
pub use segment::{Chunk, Segment};
pub use selector::Selector;

/// Normalize raw source into the canonical in-memory form.
///
/// One pass: CRLF becomes LF, a leading byte-order mark is dropped, and
/// zero-width spaces are removed. The pass is idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\u{200b}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Fill the `%s` holes of a printf-style message template, left to right.
///
/// Surplus arguments are dropped; unmatched holes are left in place so a
/// malformed template is visible in the output rather than silently eaten.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_crlf_and_bom() {
        assert_eq!(normalize("\u{feff}a\r\nb\u{200b}c"), "a\nbc");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("x\r\ny\u{200b}");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn format_message_fills_holes_in_order() {
        assert_eq!(
            format_message("Use '%s' instead of '%s'.", &["a", "b"]),
            "Use 'a' instead of 'b'."
        );
        assert_eq!(format_message("no holes", &["x"]), "no holes");
        assert_eq!(format_message("%s and %s", &["one"]), "one and %s");
    }
}
