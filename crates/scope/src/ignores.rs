// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Block and token ignores.
//!
//! Both operate on the raw normalized source before scoping, replacing
//! matched spans byte-for-byte so every downstream offset stays valid.
//! Block ignores blank to whitespace; token ignores substitute a
//! same-length run of non-word placeholder bytes so word-boundary
//! patterns cannot match across them.

use regex::Regex;

fn blank_span(buf: &mut String, start: usize, end: usize, placeholder: u8) {
    // Replace in place, preserving newlines and multi-byte widths.
    let replaced: String = buf[start..end]
        .chars()
        .map(|c| {
            if c == '\n' {
                "\n".to_string()
            } else {
                std::iter::repeat(placeholder as char)
                    .take(c.len_utf8())
                    .collect()
            }
        })
        .collect();
    buf.replace_range(start..end, &replaced);
}

fn compile(patterns: &[String], what: &str) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("skipping invalid {what} pattern '{p}': {e}");
                None
            }
        })
        .collect()
}

/// Apply block and token ignores, returning the working copy the scoper
/// parses. The output is byte-length-identical to the input.
#[must_use]
pub fn apply(content: &str, block_patterns: &[String], token_patterns: &[String]) -> String {
    let mut working = content.to_string();
    for re in compile(block_patterns, "block-ignore") {
        let spans: Vec<(usize, usize)> = re
            .find_iter(content)
            .map(|m| (m.start(), m.end()))
            .collect();
        for (start, end) in spans {
            blank_span(&mut working, start, end, b' ');
        }
    }
    let after_blocks = working.clone();
    for re in compile(token_patterns, "token-ignore") {
        let spans: Vec<(usize, usize)> = re
            .find_iter(&after_blocks)
            .map(|m| (m.start(), m.end()))
            .collect();
        for (start, end) in spans {
            blank_span(&mut working, start, end, b'*');
        }
    }
    working
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_ignores_blank_whole_regions() {
        let src = "keep\n{{< raw >}}\nskip me\n{{< /raw >}}\nkeep\n";
        let out = apply(
            src,
            &[r"(?s)\{\{< raw >\}\}.*?\{\{< /raw >\}\}".to_string()],
            &[],
        );
        assert_eq!(out.len(), src.len());
        assert!(!out.contains("skip me"));
        assert_eq!(out.matches('\n').count(), src.matches('\n').count());
        assert!(out.starts_with("keep\n"));
    }

    #[test]
    fn token_ignores_use_nonword_placeholders() {
        let src = "see [TOKEN-123] here";
        let out = apply(src, &[], &[r"\[TOKEN-\d+\]".to_string()]);
        assert_eq!(out, "see *********** here");
        assert_eq!(out.len(), src.len());
    }

    #[test]
    fn multibyte_spans_keep_byte_length() {
        let src = "a «é» b";
        let out = apply(src, &[], &["«é»".to_string()]);
        assert_eq!(out.len(), src.len());
        assert!(out.starts_with("a "));
        assert!(out.ends_with(" b"));
    }

    #[test]
    fn invalid_patterns_are_skipped() {
        let src = "unchanged";
        assert_eq!(apply(src, &["(".to_string()], &[]), src);
    }
}
