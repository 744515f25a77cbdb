// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language plumbing for the Quill checks.
//!
//! The rule engine treats everything here as a black box behind three
//! operations: `tokenize(text)`, `tag(text)`, and spell lookup. The
//! built-in tagger is a lexicon-plus-suffix tagger over Penn Treebank
//! tags; the spell model is word-list backed. Both are cheap to share
//! across worker threads once built.

pub mod readability;
pub mod spell;
pub mod tag;
pub mod tokenize;

pub use readability::Stats;
pub use spell::WordListModel;
pub use tag::{TaggedWord, tag};
pub use tokenize::{Token, sentences, words};
