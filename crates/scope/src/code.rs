// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment and string extraction from source code.
//!
//! Each supported language parses with its tree-sitter grammar; comment
//! and string-literal nodes become segments under
//! `text.comment.{line,block}.<lang>` and `text.string.<lang>`. Comment
//! sigils and string delimiters are trimmed with the origin adjusted, so
//! checks see prose and localization stays byte-exact.

use quill_core::{Error, Result, Segment, Selector};
use tree_sitter::{Language, Node, Parser};

use crate::format::CodeLang;

fn grammar(lang: CodeLang) -> Language {
    match lang {
        CodeLang::Rust => tree_sitter_rust::LANGUAGE.into(),
        CodeLang::Python => tree_sitter_python::LANGUAGE.into(),
        CodeLang::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        CodeLang::Go => tree_sitter_go::LANGUAGE.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeClass {
    LineComment,
    BlockComment,
    StringLit,
}

fn classify(lang: CodeLang, kind: &str, raw: &str) -> Option<NodeClass> {
    match (lang, kind) {
        (CodeLang::Rust, "line_comment") => Some(NodeClass::LineComment),
        (CodeLang::Rust, "block_comment") => Some(NodeClass::BlockComment),
        (CodeLang::Rust, "string_literal" | "raw_string_literal") => Some(NodeClass::StringLit),
        (CodeLang::Python, "comment") => Some(NodeClass::LineComment),
        (CodeLang::Python, "string") => Some(NodeClass::StringLit),
        (CodeLang::JavaScript | CodeLang::Go, "comment") => {
            if raw.starts_with("/*") {
                Some(NodeClass::BlockComment)
            } else {
                Some(NodeClass::LineComment)
            }
        }
        (CodeLang::JavaScript, "string" | "template_string") => Some(NodeClass::StringLit),
        (CodeLang::Go, "interpreted_string_literal" | "raw_string_literal") => {
            Some(NodeClass::StringLit)
        }
        _ => None,
    }
}

/// Trim delimiters, returning the inner slice and its byte offset within
/// the raw node text.
fn trim_delimiters(class: NodeClass, raw: &str) -> (&str, usize) {
    match class {
        NodeClass::LineComment => {
            let body = raw
                .trim_start_matches(['/', '#', '!'])
                .trim_start_matches(' ');
            (body.trim_end(), raw.len() - body.len())
        }
        NodeClass::BlockComment => {
            let body = raw
                .strip_prefix("/*")
                .map_or(raw, |r| r.strip_suffix("*/").unwrap_or(r));
            let lead = body.len() - body.trim_start().len();
            (body.trim(), (raw.len() - body.len()).min(2) + lead)
        }
        NodeClass::StringLit => {
            let mut body = raw;
            for quote in ['"', '\'', '`'] {
                if body.len() >= 2 && body.starts_with(quote) && body.ends_with(quote) {
                    body = &body[1..body.len() - 1];
                    break;
                }
            }
            (body, raw.len() - body.len() - usize::from(body.len() < raw.len()))
        }
    }
}

fn selector(lang: CodeLang, class: NodeClass) -> Selector {
    match class {
        NodeClass::LineComment => Selector::new("text.comment.line").join(lang.token()),
        NodeClass::BlockComment => Selector::new("text.comment.block").join(lang.token()),
        NodeClass::StringLit => Selector::new("text.string").join(lang.token()),
    }
}

fn visit(node: Node<'_>, content: &str, lang: CodeLang, segments: &mut Vec<Segment>) {
    let raw = &content[node.byte_range()];
    if let Some(class) = classify(lang, node.kind(), raw) {
        let (body, delta) = trim_delimiters(class, raw);
        if !body.trim().is_empty() {
            segments.push(Segment::verbatim(
                body,
                selector(lang, class),
                node.start_byte() + delta,
            ));
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, content, lang, segments);
    }
}

pub fn scope(content: &str, lang: CodeLang, path: &str) -> Result<Vec<Segment>> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(lang))
        .map_err(|e| Error::Transform {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    let tree = parser.parse(content, None).ok_or_else(|| Error::Transform {
        path: path.to_string(),
        message: "source parse returned no tree".to_string(),
    })?;
    let mut segments = Vec::new();
    visit(tree.root_node(), content, lang, &mut segments);
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_comments_and_strings() {
        let src = "/// A doc comment.\nfn main() {\n    // inline note\n    let s = \"a string value\";\n}\n";
        let got = scope(src, CodeLang::Rust, "main.rs").unwrap();
        let view: Vec<(String, String)> = got
            .iter()
            .map(|s| (s.selector.to_string(), s.text.clone()))
            .collect();
        assert!(view.contains(&("text.comment.line.rs".into(), "A doc comment.".into())));
        assert!(view.contains(&("text.comment.line.rs".into(), "inline note".into())));
        assert!(view.contains(&("text.string.rs".into(), "a string value".into())));
        let doc = &got[0];
        assert_eq!(doc.origin, 4);
    }

    #[test]
    fn python_comments() {
        let src = "# top note\nx = 1  # trailing remark\n";
        let got = scope(src, CodeLang::Python, "x.py").unwrap();
        let texts: Vec<&str> = got.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["top note", "trailing remark"]);
        assert!(got.iter().all(|s| s.selector.as_str() == "text.comment.line.py"));
    }

    #[test]
    fn go_block_comments() {
        let src = "package main\n\n/* a block remark */\nfunc main() {}\n";
        let got = scope(src, CodeLang::Go, "main.go").unwrap();
        let block = got
            .iter()
            .find(|s| s.selector.as_str() == "text.comment.block.go")
            .unwrap();
        assert_eq!(block.text, "a block remark");
        assert_eq!(block.origin, src.find("a block").unwrap());
    }
}
