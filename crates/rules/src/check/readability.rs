// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `readability`: average one or more grade-level metrics over the
//! document summary and alert when the average exceeds `grade`.
//!
//! Always document-level; the scope is forced to `summary` at compile
//! time.

use serde::Deserialize;

use quill_core::{Alert, Error, Result};
use quill_nlp::Stats;

use crate::definition::Definition;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ReadabilityDef {
    metrics: Vec<String>,
    grade: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    FleschKincaid,
    Smog,
    GunningFog,
    ColemanLiau,
    AutomatedReadability,
}

impl Metric {
    fn parse(name: &str) -> Option<Metric> {
        match name.to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
            "fleschkincaid" => Some(Metric::FleschKincaid),
            "smog" => Some(Metric::Smog),
            "gunningfog" => Some(Metric::GunningFog),
            "colemanliau" => Some(Metric::ColemanLiau),
            "automatedreadability" | "ari" => Some(Metric::AutomatedReadability),
            _ => None,
        }
    }

    fn compute(self, stats: &Stats) -> f64 {
        match self {
            Metric::FleschKincaid => stats.flesch_kincaid(),
            Metric::Smog => stats.smog(),
            Metric::GunningFog => stats.gunning_fog(),
            Metric::ColemanLiau => stats.coleman_liau(),
            Metric::AutomatedReadability => stats.automated_readability(),
        }
    }
}

#[derive(Debug)]
pub struct Readability {
    pub def: Definition,
    metrics: Vec<Metric>,
    grade: f64,
}

impl Readability {
    pub fn compile(mut def: Definition, fields: &serde_yaml::Value) -> Result<Self> {
        let spec: ReadabilityDef = crate::compile::fields(&def.name, fields)?;
        let mut metrics = Vec::new();
        for name in &spec.metrics {
            let metric = Metric::parse(name)
                .ok_or_else(|| Error::rule_load(&def.name, format!("unknown metric '{name}'")))?;
            metrics.push(metric);
        }
        if metrics.is_empty() {
            return Err(Error::rule_load(&def.name, "readability needs 'metrics'"));
        }
        def.scope = "summary".to_string();
        Ok(Readability {
            def,
            metrics,
            grade: spec.grade,
        })
    }

    #[must_use]
    pub fn run(&self, text: &str) -> Vec<Alert> {
        let stats = Stats::of(text);
        if stats.is_empty() {
            return Vec::new();
        }
        let total: f64 = self.metrics.iter().map(|m| m.compute(&stats)).sum();
        let average = total / self.metrics.len() as f64;
        if average <= self.grade {
            return Vec::new();
        }
        // Anchor the alert on the summary's first word.
        let first = quill_nlp::words(text)
            .into_iter()
            .next()
            .expect("non-empty stats imply a word");
        vec![self.def.alert(
            text,
            first.start,
            first.end(),
            &[&format!("{average:.2}"), &format!("{:.2}", self.grade)],
        )]
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::tests::{compiled, doc};

    fn check() -> crate::check::Check {
        compiled(
            "Style.Grade",
            "extends: readability\nmessage: \"grade %s is above %s\"\ngrade: 8\nmetrics:\n  - Flesch-Kincaid\n",
        )
    }

    #[test]
    fn scope_is_forced_to_summary() {
        assert!(check().definition().selector().is_summary());
    }

    #[test]
    fn simple_prose_passes() {
        assert!(check().run("The cat sat.", &mut doc()).is_empty());
    }

    #[test]
    fn dense_prose_fails() {
        let text = "The organizational infrastructure necessitates comprehensive \
                    administrative coordination facilitating multidimensional \
                    accountability mechanisms throughout interdependent \
                    institutional hierarchies governing contemporary operational \
                    methodologies and heterogeneous implementation considerations \
                    across intergovernmental jurisdictions everywhere.";
        let alerts = check().run(text, &mut doc());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].matched, "The");
        assert_eq!(alerts[0].span, (0, 3));
    }

    #[test]
    fn unknown_metrics_fail_to_compile() {
        let err = crate::compile::compile_manifest(
            "Style.Bad",
            "extends: readability\nmessage: m\ngrade: 8\nmetrics:\n  - Mystery\n",
            &crate::compile::CompileCtx::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown metric"));
    }
}
