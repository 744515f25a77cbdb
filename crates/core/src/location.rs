// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Localization: scope-local match offsets back to source positions.
//!
//! Checks report rune offsets within a segment's text. The localizer maps
//! those through the segment's chunk table to byte offsets in the
//! normalized source, then to 1-based (line, rune-column) coordinates.
//! Mapped positions are verified against the source; when a scope was
//! transformed lossily the localizer falls back to a closest-match line
//! search, and drops the alert if that fails too.

use crate::document::Document;
use crate::segment::Segment;

/// Precomputed byte offsets of line starts, for byte → (line, column)
/// conversion.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        // A trailing newline opens no new line.
        if starts.len() > 1 && starts.last() == Some(&content.len()) {
            starts.pop();
        }
        LineIndex { starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-based line and rune column for a byte offset.
    #[must_use]
    pub fn position(&self, content: &str, byte: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&s| s <= byte);
        let start = self.starts[line - 1];
        let col = content[start..byte.min(content.len())].chars().count() + 1;
        (line, col)
    }
}

/// Rune offset → byte offset within `text`. Offsets past the end clamp to
/// the text length.
#[must_use]
pub fn rune_to_byte(text: &str, rune: usize) -> usize {
    text.char_indices()
        .nth(rune)
        .map_or(text.len(), |(b, _)| b)
}

/// Localize a scope-local rune span to absolute `(line, span)` coordinates.
///
/// Returns `None` when the match cannot be placed anywhere in the source;
/// the caller drops the alert and records a localization error.
#[must_use]
pub fn locate(
    doc: &Document,
    segment: &Segment,
    begin_rune: usize,
    end_rune: usize,
    matched: &str,
) -> Option<(usize, (usize, usize))> {
    let begin_byte = rune_to_byte(&segment.text, begin_rune);
    let end_byte = rune_to_byte(&segment.text, end_rune);

    if let (Some(src_begin), Some(src_end)) = (
        segment.to_source(begin_byte),
        segment.to_source_end(end_byte),
    ) {
        if verify(doc, src_begin, matched) {
            return Some(span_at(doc, src_begin, src_end));
        }
    }
    find_fuzzy(doc, matched)
}

fn span_at(doc: &Document, src_begin: usize, src_end: usize) -> (usize, (usize, usize)) {
    let (line, col_begin) = doc.index.position(&doc.content, src_begin);
    let (end_line, col_end) = doc.index.position(&doc.content, src_end);
    if end_line > line {
        // Multi-line match: clamp the span to the first line.
        (line, (col_begin, doc.line_width(line) + 1))
    } else {
        (line, (col_begin, col_end))
    }
}

fn verify(doc: &Document, src_begin: usize, matched: &str) -> bool {
    if matched.is_empty() {
        return true;
    }
    doc.content
        .get(src_begin..)
        .is_some_and(|rest| rest.starts_with(matched))
}

/// Closest-match fallback: the first occurrence of `matched` in the source.
///
/// Multi-line match text cannot be recovered this way and is dropped.
fn find_fuzzy(doc: &Document, matched: &str) -> Option<(usize, (usize, usize))> {
    let needle = matched.trim();
    if needle.is_empty() || needle.contains('\n') {
        return None;
    }
    let offset = doc.content.find(needle)?;
    let (line, span) = span_at(doc, offset, offset + needle.len());
    log::debug!(
        "fuzzy-localized '{needle}' in {} at {line}:{}",
        doc.path,
        span.0
    );
    Some((line, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormatClass;
    use crate::selector::Selector;

    fn doc(content: &str) -> Document {
        Document::new("test.txt", content, "txt", "txt", FormatClass::Prose)
    }

    #[test]
    fn line_index_positions_are_one_based() {
        let d = doc("ab\ncd\n");
        assert_eq!(d.index.position(&d.content, 0), (1, 1));
        assert_eq!(d.index.position(&d.content, 1), (1, 2));
        assert_eq!(d.index.position(&d.content, 3), (2, 1));
        assert_eq!(d.index.line_count(), 2);
    }

    #[test]
    fn columns_count_runes_not_bytes() {
        let d = doc("héllo wörld\n");
        // 'wörld' begins after "héllo " = 6 runes, 7 bytes.
        assert_eq!(d.index.position(&d.content, 7), (1, 7));
    }

    #[test]
    fn locate_maps_segment_offsets() {
        let d = doc("my smart phone\n");
        let seg = Segment::verbatim("my smart phone", Selector::root(), 0);
        let (line, span) = locate(&d, &seg, 3, 14, "smart phone").unwrap();
        assert_eq!(line, 1);
        assert_eq!(span, (4, 15));
    }

    #[test]
    fn locate_on_later_line() {
        let d = doc("first\n\nsecond line here\n");
        let seg = Segment::verbatim("second line here", Selector::root(), 7);
        let (line, span) = locate(&d, &seg, 7, 11, "line").unwrap();
        assert_eq!(line, 3);
        assert_eq!(span, (8, 12));
    }

    #[test]
    fn broken_mapping_falls_back_to_search() {
        let d = doc("alpha beta\n");
        // Chunk table points at the wrong place; verification fails.
        let seg = Segment::verbatim("zzzz beta", Selector::root(), 0);
        let (line, span) = locate(&d, &seg, 5, 9, "beta").unwrap();
        assert_eq!((line, span), (1, (7, 11)));
    }

    #[test]
    fn unplaceable_match_is_dropped() {
        let d = doc("alpha beta\n");
        let seg = Segment::verbatim("gamma", Selector::root(), 0);
        assert!(locate(&d, &seg, 0, 5, "gamma").is_none());
    }
}
