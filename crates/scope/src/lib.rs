// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scoped document pipeline.
//!
//! [`scope_document`] turns a normalized [`Document`] into selector-tagged
//! [`Segment`]s: block and token ignores blank the working copy, control
//! directives are collected, and the format-specific walker emits
//! segments. Skipped scopes are excluded entirely; ignored scopes are
//! emptied. A transform failure (external converter, unparseable markup)
//! downgrades the file to plain prose with a warning rather than skipping
//! it.

pub mod code;
pub mod directive;
pub mod format;
pub mod html;
pub mod ignores;
pub mod markdown;
pub mod prose;

use std::process::Command;

use quill_core::{Config, Document, Error, Result, Segment, Selector};

pub use format::{CodeLang, Format, Route, route};

/// Whether a segment's prose belongs in the document summary consumed by
/// document-level rules.
///
/// Paragraphs inside block quotes already arrive as root-selector
/// segments, so the quote wrapper itself is excluded to avoid doubling.
#[must_use]
pub fn contributes_to_summary(selector: &Selector) -> bool {
    selector.as_str() == "text"
        || selector.has("heading")
        || selector.as_str() == "text.list"
        || selector.as_str() == "text.table.cell"
}

fn filter_scoped(segments: Vec<Segment>, config: &Config) -> Vec<Segment> {
    segments
        .into_iter()
        .filter_map(|mut segment| {
            let skipped = segment
                .selector
                .tokens()
                .any(|t| config.skipped_scopes.iter().any(|s| s == t));
            if skipped {
                return None;
            }
            let ignored = segment
                .selector
                .tokens()
                .any(|t| config.ignored_scopes.iter().any(|s| s == t));
            if ignored {
                segment.text.clear();
                segment.chunks.clear();
            }
            Some(segment)
        })
        .collect()
}

/// Convert reStructuredText or AsciiDoc to HTML with an external tool.
fn convert_markup(content: &str, fmt: Format, path: &str) -> Result<String> {
    let (program, args) = match fmt {
        Format::Rst => ("rst2html", vec!["--quiet".to_string()]),
        Format::Asciidoc => ("asciidoctor", vec!["-o".into(), "-".into(), "-".into()]),
        _ => unreachable!("only external formats convert"),
    };
    run_converter(content, program, &args, path)
}

/// Apply a user-supplied XSLT before scoping (`transform` in the config).
fn apply_transform(content: &str, xslt: &std::path::Path, path: &str) -> Result<String> {
    let args = vec![xslt.display().to_string(), "-".to_string()];
    run_converter(content, "xsltproc", &args, path)
}

fn run_converter(content: &str, program: &str, args: &[String], path: &str) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| Error::Transform {
            path: path.to_string(),
            message: format!("cannot run {program}: {e}"),
        })?;
    if let Some(mut stdin) = child.stdin.take() {
        use std::io::Write;
        stdin.write_all(content.as_bytes()).map_err(|e| Error::Transform {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    }
    let output = child.wait_with_output().map_err(|e| Error::Transform {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    if !output.status.success() {
        return Err(Error::Transform {
            path: path.to_string(),
            message: format!("{program} exited with {}", output.status),
        });
    }
    String::from_utf8(output.stdout).map_err(|e| Error::Transform {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Converted documents lose byte mapping; strip the chunk tables so every
/// alert localizes through the fuzzy fallback against the real source.
fn mark_converted(mut segments: Vec<Segment>) -> Vec<Segment> {
    for segment in &mut segments {
        segment.chunks.clear();
        segment.lossy = true;
    }
    segments
}

/// Produce the scoped segments for `doc`, filling `doc.directives`.
pub fn scope_document(doc: &mut Document, config: &Config) -> Result<Vec<Segment>> {
    let working = ignores::apply(
        &doc.content,
        &config.block_ignores_for(&doc.path),
        &config.token_ignores_for(&doc.path),
    );
    doc.directives = directive::collect(&working, doc.format);

    let fmt = route(&doc.path, config).format;
    let segments = match fmt {
        Format::Markdown => filter_scoped(markdown::scope(&working), config),
        Format::Html => match &config.transform {
            Some(xslt) => match apply_transform(&working, xslt, &doc.path) {
                Ok(converted) => {
                    let scoped = html::scope(&converted, config, &doc.path)?;
                    mark_converted(filter_scoped(scoped, config))
                }
                Err(e) => {
                    log::warn!("{e}; linting {} as plain prose", doc.path);
                    prose::scope(&working)
                }
            },
            None => filter_scoped(html::scope(&working, config, &doc.path)?, config),
        },
        Format::Rst | Format::Asciidoc => match convert_markup(&working, fmt, &doc.path) {
            Ok(converted) => {
                let scoped = html::scope(&converted, config, &doc.path)?;
                mark_converted(filter_scoped(scoped, config))
            }
            Err(e) => {
                log::warn!("{e}; linting {} as plain prose", doc.path);
                prose::scope(&working)
            }
        },
        Format::Code(lang) => code::scope(&working, lang, &doc.path)?,
        Format::Prose => prose::scope(&working),
    };
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::FormatClass;

    fn doc(path: &str, content: &str) -> Document {
        let config = Config::default();
        let r = route(path, &config);
        Document::new(path, content, &r.real_ext, &r.norm_ext, r.format.class())
    }

    #[test]
    fn markdown_code_is_ignored_by_default() {
        let mut d = doc("t.md", "# Hello World\n\nuse `foo`\n");
        let segments = scope_document(&mut d, &Config::default()).unwrap();
        // The inline-code segment survives but is emptied.
        let all: String = segments.iter().map(|s| s.text.clone()).collect();
        assert!(!all.contains("foo"));
        assert!(all.contains("Hello World"));
    }

    #[test]
    fn skipped_scopes_drop_segments_entirely() {
        let mut config = Config::default();
        config.skipped_scopes.push("code".to_string());
        let mut d = doc("t.md", "text\n\n```\nblock\n```\n");
        let segments = scope_document(&mut d, &config).unwrap();
        assert!(!segments.iter().any(|s| s.selector.has("code")));
    }

    #[test]
    fn directives_are_collected_into_the_document() {
        let mut d = doc("t.md", "a\n\n<!-- quill off -->\n\nb\n");
        scope_document(&mut d, &Config::default()).unwrap();
        assert_eq!(d.directives.len(), 1);
    }

    #[test]
    fn token_ignores_blank_before_scoping() {
        let mut config = Config::default();
        config.token_ignores.push(r"`[^`]+`".to_string());
        let mut d = doc("t.txt", "keep `drop this` keep\n");
        let segments = scope_document(&mut d, &config).unwrap();
        assert!(!segments[0].text.contains("drop this"));
        assert!(segments[0].text.starts_with("keep"));
    }

    #[test]
    fn summary_membership() {
        assert!(contributes_to_summary(&Selector::new("text")));
        assert!(contributes_to_summary(&Selector::new("text.heading.h1")));
        assert!(!contributes_to_summary(&Selector::new("text.code.block")));
        assert!(!contributes_to_summary(&Selector::new("text.attr.href")));
        assert!(!contributes_to_summary(&Selector::new("text.blockquote")));
    }
}
