// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-file linting state.
//!
//! A [`Document`] is created per input file, owned by exactly one worker,
//! and mutated in segment order: the scoper fills the summary and the
//! directive list, checks append to `sequences` and `deferred`, and the
//! dispatcher pushes localized alerts (deduplicated here, sorted at
//! emission).

use std::collections::{BTreeMap, BTreeSet};

use crate::alert::Alert;
use crate::location::LineIndex;
use crate::normalize;
use crate::segment::{Chunk, Segment};
use crate::selector::{self, Selector};

/// Coarse routing class for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    Prose,
    Markup,
    Code,
}

/// One in-text control comment, positioned by its byte offset in the
/// normalized source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlDirective {
    /// `quill off` / `quill on`
    Global { offset: usize, on: bool },
    /// `quill Style.Rule = YES|NO`
    Rule {
        offset: usize,
        name: String,
        enabled: bool,
    },
}

impl ControlDirective {
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ControlDirective::Global { offset, .. } | ControlDirective::Rule { offset, .. } => {
                *offset
            }
        }
    }
}

/// A candidate alert held back until the whole file has been scanned.
///
/// Conditional rules collect their consequent set file-wide before deciding
/// which antecedent matches to report.
#[derive(Debug, Clone)]
pub struct Deferred {
    pub check: String,
    pub key: String,
    pub alert: Alert,
}

#[derive(Debug)]
pub struct Document {
    pub path: String,
    pub real_ext: String,
    pub norm_ext: String,
    pub format: FormatClass,
    /// Source after the single normalization pass.
    pub content: String,
    /// `content` split after each newline; concatenation is lossless.
    pub lines: Vec<String>,
    pub index: LineIndex,

    pub base_styles: Vec<String>,
    pub active_checks: BTreeMap<String, bool>,
    pub level_overrides: BTreeMap<String, crate::Severity>,
    pub directives: Vec<ControlDirective>,

    summary_text: String,
    summary_chunks: Vec<Chunk>,

    /// Scope-wide match bookkeeping for consistency/conditional rules.
    pub sequences: BTreeSet<String>,
    pub deferred: Vec<Deferred>,
    pub last_match: BTreeMap<String, Alert>,

    history: BTreeSet<(usize, usize, String)>,
    pub alerts: Vec<Alert>,
}

impl Document {
    #[must_use]
    pub fn new(path: &str, raw: &str, real_ext: &str, norm_ext: &str, format: FormatClass) -> Self {
        let content = normalize(raw);
        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
        let index = LineIndex::new(&content);
        Document {
            path: path.to_string(),
            real_ext: real_ext.to_string(),
            norm_ext: norm_ext.to_string(),
            format,
            content,
            lines,
            index,
            base_styles: Vec::new(),
            active_checks: BTreeMap::new(),
            level_overrides: BTreeMap::new(),
            directives: Vec::new(),
            summary_text: String::new(),
            summary_chunks: Vec::new(),
            sequences: BTreeSet::new(),
            deferred: Vec::new(),
            last_match: BTreeMap::new(),
            history: BTreeSet::new(),
            alerts: Vec::new(),
        }
    }

    /// Append a segment's prose to the document summary, keeping the chunk
    /// table so summary-scoped alerts localize exactly.
    pub fn extend_summary(&mut self, segment: &Segment) {
        if segment.is_empty() {
            return;
        }
        if !self.summary_text.is_empty() {
            // The separator is unmapped on purpose; matches never span it.
            self.summary_text.push_str("\n\n");
        }
        let base = self.summary_text.len();
        for chunk in &segment.chunks {
            self.summary_chunks.push(Chunk {
                local: base + chunk.local,
                source: chunk.source,
                len: chunk.len,
            });
        }
        self.summary_text.push_str(&segment.text);
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary_text
    }

    /// The accumulated summary as a dispatchable segment.
    #[must_use]
    pub fn summary_segment(&self) -> Segment {
        Segment::assembled(
            self.summary_text.clone(),
            Selector::new(selector::SUMMARY),
            self.summary_chunks.clone(),
            false,
        )
    }

    /// The comment-state override for `check` at a source offset, if any.
    ///
    /// Later directives win. A rule-specific toggle beats the global
    /// on/off flag.
    #[must_use]
    pub fn comment_gate(&self, check: &str, offset: usize) -> Option<bool> {
        let mut global: Option<bool> = None;
        let mut by_rule: Option<bool> = None;
        for directive in &self.directives {
            if directive.offset() > offset {
                break;
            }
            match directive {
                ControlDirective::Global { on, .. } => global = Some(*on),
                ControlDirective::Rule { name, enabled, .. } if name == check => {
                    by_rule = Some(*enabled);
                }
                ControlDirective::Rule { .. } => {}
            }
        }
        by_rule.or(match global {
            Some(false) => Some(false),
            _ => None,
        })
    }

    /// Append an alert unless an equal `(line, col, check)` already exists.
    pub fn push_alert(&mut self, alert: Alert) -> bool {
        let key = (alert.line, alert.span.0, alert.check.clone());
        if !self.history.insert(key) {
            return false;
        }
        self.alerts.push(alert);
        true
    }

    /// Sort accumulated alerts into emission order.
    pub fn sort_alerts(&mut self) {
        self.alerts
            .sort_by(|a, b| (a.line, a.span.0, &a.check).cmp(&(b.line, b.span.0, &b.check)));
    }

    /// Rune length of a line, not counting its trailing newline.
    #[must_use]
    pub fn line_width(&self, line: usize) -> usize {
        self.lines
            .get(line - 1)
            .map_or(0, |l| l.trim_end_matches('\n').chars().count())
    }
}
