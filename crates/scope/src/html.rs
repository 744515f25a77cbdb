// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML segmentation over a tree-sitter parse.
//!
//! Walks the DOM: elements named in `skipped_scopes` are excluded with
//! their whole subtree, `ignored_scopes` elements (and elements carrying
//! an ignored class) contribute nothing, and `alt`/`title`/`href`
//! attributes become their own segments. Block elements assemble one
//! segment from their descendant text; inline elements additionally get
//! their own run segment, exactly as the Markdown walker does.

use quill_core::{Config, Error, Result, Segment, Selector};
use tree_sitter::{Node, Parser};

struct Walker<'a> {
    content: &'a str,
    config: &'a Config,
    segments: Vec<Segment>,
}

fn selector_for(name: &str) -> Option<Selector> {
    let path = match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            return Some(Selector::new("text.heading").join(name));
        }
        "p" => "text",
        "li" => "text.list",
        "blockquote" => "text.blockquote",
        "pre" => "text.code.block",
        "code" | "tt" => "text.code.inline",
        "td" | "th" => "text.table.cell",
        "em" | "i" => "text.emphasis",
        "strong" | "b" => "text.strong",
        "a" => "text.link",
        _ => return None,
    };
    Some(Selector::new(path))
}

impl<'a> Walker<'a> {
    fn node_text(&self, node: Node<'a>) -> &'a str {
        &self.content[node.byte_range()]
    }

    fn tag_of(&self, element: Node<'a>) -> Option<(Node<'a>, String)> {
        let mut cursor = element.walk();
        for child in element.children(&mut cursor) {
            if matches!(child.kind(), "start_tag" | "self_closing_tag") {
                let mut inner = child.walk();
                for part in child.children(&mut inner) {
                    if part.kind() == "tag_name" {
                        return Some((child, self.node_text(part).to_ascii_lowercase()));
                    }
                }
            }
        }
        None
    }

    fn attributes(&self, start_tag: Node<'a>) -> Vec<(String, Node<'a>)> {
        let mut out = Vec::new();
        let mut cursor = start_tag.walk();
        for child in start_tag.children(&mut cursor) {
            if child.kind() != "attribute" {
                continue;
            }
            let mut name = None;
            let mut value = None;
            let mut inner = child.walk();
            for part in child.children(&mut inner) {
                match part.kind() {
                    "attribute_name" => name = Some(self.node_text(part).to_ascii_lowercase()),
                    "attribute_value" => value = Some(part),
                    "quoted_attribute_value" => {
                        let mut quoted = part.walk();
                        value = part
                            .children(&mut quoted)
                            .find(|n| n.kind() == "attribute_value");
                    }
                    _ => {}
                }
            }
            if let (Some(name), Some(value)) = (name, value) {
                out.push((name, value));
            }
        }
        out
    }

    fn has_ignored_class(&self, start_tag: Node<'a>) -> bool {
        self.attributes(start_tag).iter().any(|(name, value)| {
            name == "class"
                && self
                    .node_text(*value)
                    .split_whitespace()
                    .any(|class| self.config.ignored_classes.iter().any(|c| c == class))
        })
    }

    fn emit_attr_segments(&mut self, start_tag: Node<'a>) {
        for (name, value) in self.attributes(start_tag) {
            let selector = match name.as_str() {
                "alt" => "text.attr.alt",
                "title" => "text.attr.title",
                "href" => "text.attr.href",
                _ => continue,
            };
            let text = self.node_text(value);
            if !text.is_empty() {
                self.segments.push(Segment::verbatim(
                    text,
                    Selector::new(selector),
                    value.start_byte(),
                ));
            }
        }
    }

    fn visit(&mut self, node: Node<'a>, stack: &mut Vec<MarkupBuilder>) {
        match node.kind() {
            "comment" | "doctype" | "start_tag" | "end_tag" | "self_closing_tag" => {}
            "script_element" | "style_element" => {
                // Default skipped scopes; even when un-skipped their
                // raw_text is code, not prose.
            }
            "element" => {
                let Some((start_tag, name)) = self.tag_of(node) else {
                    self.recurse(node, stack);
                    return;
                };
                if self.config.skipped_scopes.iter().any(|s| s == &name) {
                    return;
                }
                if self.config.ignored_scopes.iter().any(|s| s == &name)
                    || self.has_ignored_class(start_tag)
                {
                    return;
                }
                self.emit_attr_segments(start_tag);
                match selector_for(&name) {
                    Some(selector) => {
                        stack.push(MarkupBuilder::new(selector));
                        self.recurse(node, stack);
                        let builder = stack.pop().expect("balanced builder stack");
                        if let Some(segment) = builder.finish() {
                            self.segments.push(segment);
                        }
                    }
                    None => self.recurse(node, stack),
                }
            }
            "text" | "entity" => {
                let raw = self.node_text(node);
                if stack.is_empty() {
                    let leading = raw.len() - raw.trim_start().len();
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        self.segments.push(Segment::verbatim(
                            trimmed,
                            Selector::root(),
                            node.start_byte() + leading,
                        ));
                    }
                } else {
                    for builder in stack.iter_mut() {
                        builder.push_run(raw, Some(node.start_byte()));
                    }
                }
            }
            _ => self.recurse(node, stack),
        }
    }

    fn recurse(&mut self, node: Node<'a>, stack: &mut Vec<MarkupBuilder>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, stack);
        }
    }
}

/// Shared run-assembling builder for markup walkers.
pub(crate) struct MarkupBuilder {
    selector: Selector,
    text: String,
    chunks: Vec<quill_core::Chunk>,
    lossy: bool,
}

impl MarkupBuilder {
    pub(crate) fn new(selector: Selector) -> Self {
        MarkupBuilder {
            selector,
            text: String::new(),
            chunks: Vec::new(),
            lossy: false,
        }
    }

    pub(crate) fn push_run(&mut self, run: &str, source: Option<usize>) {
        if run.is_empty() {
            return;
        }
        match source {
            Some(src) => self.chunks.push(quill_core::Chunk {
                local: self.text.len(),
                source: src,
                len: run.len(),
            }),
            None => self.lossy = true,
        }
        self.text.push_str(run);
    }

    pub(crate) fn finish(self) -> Option<Segment> {
        if self.text.trim().is_empty() {
            return None;
        }
        Some(Segment::assembled(
            self.text,
            self.selector,
            self.chunks,
            self.lossy,
        ))
    }
}

pub fn scope(content: &str, config: &Config, path: &str) -> Result<Vec<Segment>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| Error::Transform {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    let tree = parser.parse(content, None).ok_or_else(|| Error::Transform {
        path: path.to_string(),
        message: "html parse returned no tree".to_string(),
    })?;

    let mut walker = Walker {
        content,
        config,
        segments: Vec::new(),
    };
    let mut stack = Vec::new();
    walker.visit(tree.root_node(), &mut stack);
    Ok(walker.segments)
}
