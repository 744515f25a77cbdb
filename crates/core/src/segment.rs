// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped text segments emitted by the scoper.

use crate::selector::Selector;

/// Maps a byte range of a segment's text back to the normalized source.
///
/// Chunks are stored in increasing `local` order and never overlap. A
/// contiguous segment has exactly one chunk; a segment assembled from
/// multiple source runs (a paragraph with inline markup, the document
/// summary) has one chunk per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Byte offset within the segment's text.
    pub local: usize,
    /// Byte offset within the normalized source.
    pub source: usize,
    /// Length of the run, in bytes.
    pub len: usize,
}

/// A scoped span of text: what the matcher engine actually sees.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub selector: Selector,
    /// Byte offset of the segment's first chunk in the normalized source.
    pub origin: usize,
    pub chunks: Vec<Chunk>,
    /// Set when the text was derived lossily (e.g. entity decoding or an
    /// external converter); localization must verify and may fall back.
    pub lossy: bool,
}

impl Segment {
    /// A segment whose text is a verbatim slice of the source.
    #[must_use]
    pub fn verbatim(text: &str, selector: Selector, origin: usize) -> Self {
        Segment {
            chunks: vec![Chunk {
                local: 0,
                source: origin,
                len: text.len(),
            }],
            text: text.to_string(),
            selector,
            origin,
            lossy: false,
        }
    }

    /// An assembled segment with an explicit chunk table.
    #[must_use]
    pub fn assembled(text: String, selector: Selector, chunks: Vec<Chunk>, lossy: bool) -> Self {
        let origin = chunks.first().map_or(0, |c| c.source);
        Segment {
            text,
            selector,
            origin,
            chunks,
            lossy,
        }
    }

    /// Map a byte offset within `text` to a byte offset in the source.
    ///
    /// Offsets at a chunk boundary resolve to the chunk they begin.
    #[must_use]
    pub fn to_source(&self, local: usize) -> Option<usize> {
        let idx = self.chunks.partition_point(|c| c.local <= local);
        let chunk = self.chunks.get(idx.checked_sub(1)?)?;
        (local <= chunk.local + chunk.len).then(|| chunk.source + (local - chunk.local))
    }

    /// Map an exclusive end offset, resolving boundary offsets to the chunk
    /// they close rather than the one they would begin.
    #[must_use]
    pub fn to_source_end(&self, local: usize) -> Option<usize> {
        let idx = self.chunks.partition_point(|c| c.local < local);
        let chunk = self.chunks.get(idx.checked_sub(1)?)?;
        (local <= chunk.local + chunk.len).then(|| chunk.source + (local - chunk.local))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
