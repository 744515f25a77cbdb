// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the linting pipeline.
//!
//! Only a configuration failure at startup is fatal. Rule-load errors
//! accumulate and are reported alongside output; a source-read error skips
//! the file; a transform error downgrades the file to plain prose; a
//! localization failure drops the single alert.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to load rule '{name}': {message}")]
    RuleLoad { name: String, message: String },

    #[error("cannot read source '{path}': {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transform failed for '{path}': {message}")]
    Transform { path: String, message: String },

    #[error("could not localize match '{matched}' in {path}")]
    Localization { path: String, matched: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn rule_load(name: impl Into<String>, message: impl ToString) -> Self {
        Error::RuleLoad {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error aborts the run rather than a single file or rule.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
