// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown segmentation over the pulldown-cmark event stream.
//!
//! Block containers (headings, paragraphs, list items, block quotes, code
//! blocks, table cells) and inline runs (emphasis, strong, link text, code
//! spans) each become a segment. Text events append to every open
//! container, so a paragraph's segment holds its full prose while the
//! emphasis run inside it also gets its own, and the chunk table keeps
//! byte-exact source mapping through the markup.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};
use quill_core::{Chunk, Segment, Selector};

#[derive(Debug)]
struct Builder {
    selector: Selector,
    text: String,
    chunks: Vec<Chunk>,
    lossy: bool,
}

impl Builder {
    fn new(selector: Selector) -> Self {
        Builder {
            selector,
            text: String::new(),
            chunks: Vec::new(),
            lossy: false,
        }
    }

    fn push_run(&mut self, run: &str, source: Option<usize>) {
        if run.is_empty() {
            return;
        }
        match source {
            Some(src) => self.chunks.push(Chunk {
                local: self.text.len(),
                source: src,
                len: run.len(),
            }),
            None => self.lossy = true,
        }
        self.text.push_str(run);
    }

    fn into_segment(self) -> Segment {
        Segment::assembled(self.text, self.selector, self.chunks, self.lossy)
    }
}

/// Find `needle` inside the event's source range for exact mapping.
fn source_of(content: &str, range: &Range<usize>, needle: &str) -> Option<usize> {
    content
        .get(range.clone())
        .and_then(|window| window.find(needle))
        .map(|idx| range.start + idx)
}

fn nearest<'a>(stack: &'a [Option<Builder>]) -> Option<&'a Builder> {
    stack.iter().rev().flatten().next()
}

fn builder_for(tag: &Tag, stack: &[Option<Builder>]) -> Option<Builder> {
    let open = |s: String| Some(Builder::new(Selector::new(&s)));
    match tag {
        // A paragraph inside a list item feeds the item's segment instead
        // of opening its own.
        Tag::Paragraph => {
            if nearest(stack).is_some_and(|b| b.selector.has("list")) {
                None
            } else {
                open("text".to_string())
            }
        }
        Tag::Heading { level, .. } => open(format!("text.heading.h{}", *level as usize)),
        Tag::Item => {
            if nearest(stack).is_some_and(|b| b.selector.has("list")) {
                None
            } else {
                open("text.list".to_string())
            }
        }
        Tag::BlockQuote(_) => open("text.blockquote".to_string()),
        Tag::CodeBlock(_) => open("text.code.block".to_string()),
        Tag::TableCell => open("text.table.cell".to_string()),
        Tag::Emphasis => open("text.emphasis".to_string()),
        Tag::Strong => open("text.strong".to_string()),
        Tag::Link { .. } => open("text.link".to_string()),
        _ => None,
    }
}

fn attr_segment(
    content: &str,
    range: &Range<usize>,
    value: &str,
    selector: &str,
) -> Option<Segment> {
    if value.is_empty() {
        return None;
    }
    Some(match source_of(content, range, value) {
        Some(origin) => Segment::verbatim(value, Selector::new(selector), origin),
        None => Segment::assembled(value.to_string(), Selector::new(selector), Vec::new(), true),
    })
}

#[must_use]
pub fn scope(content: &str) -> Vec<Segment> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let mut segments = Vec::new();
    // One stack entry per Start event; None for containers that collect no
    // segment of their own.
    let mut stack: Vec<Option<Builder>> = Vec::new();

    fn push_all(stack: &mut [Option<Builder>], run: &str, source: Option<usize>) {
        for builder in stack.iter_mut().flatten() {
            builder.push_run(run, source);
        }
    }

    for (event, range) in Parser::new_ext(content, options).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                match &tag {
                    Tag::Link { dest_url, .. } => {
                        segments.extend(attr_segment(content, &range, dest_url, "text.attr.href"));
                    }
                    Tag::Image { dest_url, .. } => {
                        segments.extend(attr_segment(content, &range, dest_url, "text.attr.src"));
                    }
                    Tag::Paragraph => {
                        // Second paragraph folded into a list item: keep a
                        // separator so sentences stay apart.
                        if nearest(&stack).is_some_and(|b| b.selector.has("list") && !b.text.is_empty())
                        {
                            push_all(&mut stack, "\n\n", None);
                        }
                    }
                    _ => {}
                }
                stack.push(builder_for(&tag, &stack));
            }
            Event::End(_) => {
                if let Some(Some(builder)) = stack.pop() {
                    if !builder.text.trim().is_empty() {
                        segments.push(builder.into_segment());
                    }
                }
            }
            Event::Text(text) => {
                let source = source_of(content, &range, &text);
                push_all(&mut stack, &text, source);
            }
            Event::Code(code) => {
                // Inline code is its own scope and stays out of the
                // surrounding prose.
                let selector = Selector::new("text.code.inline");
                match source_of(content, &range, &code) {
                    Some(origin) => segments.push(Segment::verbatim(&code, selector, origin)),
                    None => segments.push(Segment::assembled(
                        code.to_string(),
                        selector,
                        Vec::new(),
                        true,
                    )),
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                let source = source_of(content, &range, "\n");
                push_all(&mut stack, "\n", source);
            }
            _ => {}
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(segments: &[Segment]) -> Vec<(String, String)> {
        segments
            .iter()
            .map(|s| (s.selector.to_string(), s.text.clone()))
            .collect()
    }

    #[test]
    fn headings_carry_their_level() {
        let got = scope("# Hello World\n\nBody text.\n");
        let view = selectors(&got);
        assert!(view.contains(&("text.heading.h1".into(), "Hello World".into())));
        assert!(view.contains(&("text".into(), "Body text.".into())));
        let heading = got.iter().find(|s| s.selector.has("heading")).unwrap();
        assert_eq!(heading.origin, 2);
    }

    #[test]
    fn inline_runs_get_their_own_segments() {
        let got = scope("this *is* very **bold**\n");
        let view = selectors(&got);
        assert!(view.contains(&("text.emphasis".into(), "is".into())));
        assert!(view.contains(&("text.strong".into(), "bold".into())));
        let para = got.iter().find(|s| s.selector == Selector::root()).unwrap();
        assert_eq!(para.text, "this is very bold");
        // The emphasis run maps back through the asterisks.
        assert_eq!(para.to_source(5), Some(6));
    }

    #[test]
    fn code_spans_are_separate_scopes() {
        let got = scope("use `foo` here\n");
        let code = got.iter().find(|s| s.selector.has("code")).unwrap();
        assert_eq!(code.selector.as_str(), "text.code.inline");
        assert_eq!(code.text, "foo");
        assert_eq!(code.origin, 5);
        let para = got.iter().find(|s| s.selector == Selector::root()).unwrap();
        assert!(!para.text.contains("foo"));
    }

    #[test]
    fn links_emit_text_and_href() {
        let got = scope("see [the docs](https://example.com) now\n");
        let view = selectors(&got);
        assert!(view.contains(&("text.link".into(), "the docs".into())));
        assert!(view.contains(&("text.attr.href".into(), "https://example.com".into())));
        let href = got.iter().find(|s| s.selector.has("href")).unwrap();
        assert_eq!(href.origin, 15);
    }

    #[test]
    fn list_items_fold_their_paragraphs() {
        let got = scope("- first point\n- second point\n");
        let items: Vec<&Segment> = got.iter().filter(|s| s.selector.has("list")).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "first point");
        assert_eq!(items[1].text, "second point");
        assert!(!got.iter().any(|s| s.selector == Selector::root()));
    }

    #[test]
    fn block_quotes_and_code_blocks_are_scoped() {
        let got = scope("> quoted words\n\n```\nlet x = 1;\n```\n");
        let view: Vec<String> = got.iter().map(|s| s.selector.to_string()).collect();
        assert!(view.contains(&"text.blockquote".to_string()));
        assert!(view.contains(&"text.code.block".to_string()));
        let block = got.iter().find(|s| s.selector.has("block")).unwrap();
        assert_eq!(block.text.trim(), "let x = 1;");
    }

    #[test]
    fn table_cells_are_scoped() {
        let got = scope("| a1 | b1 |\n|----|----|\n| c1 | d1 |\n");
        let cells: Vec<&str> = got
            .iter()
            .filter(|s| s.selector.as_str() == "text.table.cell")
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(cells, ["a1", "b1", "c1", "d1"]);
    }

    #[test]
    fn soft_breaks_keep_line_mapping() {
        let got = scope("line one\nline two\n");
        let para = &got[0];
        assert_eq!(para.text, "line one\nline two");
        assert_eq!(para.to_source(9), Some(9));
    }
}
