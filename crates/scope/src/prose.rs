// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-prose segmentation: one segment per blank-line-separated
//! paragraph, selector `text`.

use quill_core::{Segment, Selector};

#[must_use]
pub fn scope(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut offset = 0;
    let mut para_start: Option<usize> = None;
    let mut para_end = 0;

    for line in content.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(start) = para_start.take() {
                segments.push(paragraph(content, start, para_end));
            }
        } else {
            if para_start.is_none() {
                para_start = Some(offset);
            }
            para_end = offset + line.trim_end_matches('\n').len();
        }
        offset += line.len();
    }
    if let Some(start) = para_start {
        segments.push(paragraph(content, start, para_end));
    }
    segments
}

fn paragraph(content: &str, start: usize, end: usize) -> Segment {
    Segment::verbatim(&content[start..end], Selector::root(), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let got = scope("one two\nthree\n\nfour\n\n\nfive");
        let texts: Vec<&str> = got.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["one two\nthree", "four", "five"]);
        assert_eq!(got[1].origin, 15);
        assert!(got.iter().all(|s| s.selector == Selector::root()));
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(scope("").is_empty());
        assert!(scope("\n\n").is_empty());
    }
}
