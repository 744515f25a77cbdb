// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing segments to rules and collecting localized alerts.
//!
//! A rule fires for a segment iff the segment's selector contains the
//! rule's scope, the rule is active for the file, and the in-text
//! comment state at the segment's origin does not suppress it.
//! Document-level rules (summary scope) run once after the segment pass;
//! deferred alerts (conditional rules) are resolved last.

use std::collections::BTreeMap;

use quill_core::{Alert, Deferred, Document, Segment, locate};
use quill_rules::check::Conditional;
use quill_rules::{Check, Registry};

#[derive(Debug, Default)]
pub(crate) struct Collector {
    per_rule: BTreeMap<String, usize>,
}

impl Collector {
    /// Localize and record one scope-local alert.
    fn collect(&mut self, doc: &mut Document, segment: &Segment, alert: Alert, check: &Check) {
        if alert.hide {
            return;
        }
        let Some((line, span)) = locate(doc, segment, alert.span.0, alert.span.1, &alert.matched)
        else {
            log::debug!(
                "dropping unlocalizable alert from {} in {}",
                alert.check,
                doc.path
            );
            return;
        };
        let mut alert = alert;
        alert.line = line;
        alert.span = span;
        if let Some(level) = doc.level_overrides.get(&alert.check) {
            alert.severity = *level;
        }

        if check.defers_alerts() {
            doc.deferred.push(Deferred {
                check: alert.check.clone(),
                key: alert.matched.clone(),
                alert,
            });
            return;
        }
        self.push(doc, alert, check);
    }

    fn push(&mut self, doc: &mut Document, alert: Alert, check: &Check) {
        let limit = check.definition().limit;
        let seen = self.per_rule.entry(alert.check.clone()).or_insert(0);
        if limit > 0 && *seen >= limit {
            return;
        }
        if doc.push_alert(alert) {
            *seen += 1;
        }
    }

    fn active(&self, doc: &Document, check: &Check, origin: usize) -> bool {
        let name = &check.definition().name;
        let configured = doc.active_checks.get(name).copied().unwrap_or(false);
        doc.comment_gate(name, origin).unwrap_or(configured)
    }
}

/// Run every per-segment rule over `segments`, then the document-level
/// rules over the summary, then resolve deferred alerts.
pub(crate) fn run(doc: &mut Document, segments: &[Segment], registry: &Registry) {
    let mut collector = Collector::default();

    for segment in segments {
        if quill_scope::contributes_to_summary(&segment.selector) {
            doc.extend_summary(segment);
        }
        if segment.is_empty() {
            continue;
        }
        for check in registry.iter() {
            if check.is_document_level() {
                continue;
            }
            if !segment.selector.contains(&check.definition().selector()) {
                continue;
            }
            if !collector.active(doc, check, segment.origin) {
                continue;
            }
            let text = segment.text.clone();
            for alert in check.run(&text, doc) {
                collector.collect(doc, segment, alert, check);
            }
        }
    }

    let summary = doc.summary_segment();
    if !summary.is_empty() {
        for check in registry.iter() {
            if !check.is_document_level() {
                continue;
            }
            if !collector.active(doc, check, summary.origin) {
                continue;
            }
            let text = summary.text.clone();
            for alert in check.run(&text, doc) {
                collector.collect(doc, &summary, alert, check);
            }
        }
    }

    // Conditional rules: every candidate whose text was never defined.
    for deferred in std::mem::take(&mut doc.deferred) {
        let defined = doc
            .sequences
            .contains(&Conditional::defined_key(&deferred.check, &deferred.key));
        if defined {
            continue;
        }
        if let Some(check) = registry.get(&deferred.check) {
            collector.push(doc, deferred.alert, check);
        }
    }
}
