//! The normalization pipeline
//!
//! Runs the stages in order, each stage's output feeding the next. Empty or
//! whitespace-only input short-circuits to an empty string.
//!
//! Later stages can move section boundaries that earlier stages already
//! decided on (a closing heading ends a bullet section, a canonical notes
//! heading stops looking numbered). The stage list is therefore repeated
//! until a pass leaves the text unchanged, so the output is a fixed point
//! and normalizing it again changes nothing.

use crate::rules::{default_rules, CompiledRules};
use crate::stages::{default_stages, Stage};
use once_cell::sync::Lazy;
use serde::Serialize;

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Most passes over the stage list before giving up on settling
pub const MAX_PASSES: usize = 6;

/// What one stage did to the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// Stage name
    pub stage: &'static str,
    /// Whether the output differs from the input
    pub changed: bool,
    /// Input length in bytes
    pub bytes_before: usize,
    /// Output length in bytes
    pub bytes_after: usize,
}

/// Ordered pipeline of stages over a compiled rule set
pub struct Normalizer {
    rules: CompiledRules,
    stages: Vec<Box<dyn Stage>>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(default_rules().clone())
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("stages", &self.stages())
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Pipeline with the built-in stages
    #[inline]
    #[must_use]
    pub fn new(rules: CompiledRules) -> Self {
        Self::with_stages(rules, default_stages())
    }

    /// Pipeline with a custom stage list
    #[inline]
    #[must_use]
    pub fn with_stages(rules: CompiledRules, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { rules, stages }
    }

    /// Rule set in use
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Stage names in execution order
    #[must_use]
    pub fn stages(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Normalize raw markdown-like text
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        self.run(raw, |_, _| {})
    }

    /// Normalize and report what each stage did
    ///
    /// One report per stage; a stage counts as changed if it rewrote the
    /// text on any pass.
    #[must_use]
    pub fn normalize_traced(&self, raw: &str) -> (String, Vec<StageReport>) {
        let mut reports: Vec<StageReport> = Vec::with_capacity(self.stages.len());
        let text = self.run(raw, |index, report| match reports.get_mut(index) {
            Some(existing) => {
                existing.changed |= report.changed;
                existing.bytes_after = report.bytes_after;
            }
            None => reports.push(report),
        });
        (text, reports)
    }

    fn run(&self, raw: &str, mut on_stage: impl FnMut(usize, StageReport)) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let mut text = raw.to_string();
        for pass in 0..MAX_PASSES {
            let mut pass_changed = false;
            for (index, stage) in self.stages.iter().enumerate() {
                if pass > 0 && stage.runs_once() {
                    continue;
                }
                let next = stage.apply(&text, &self.rules);
                let report = StageReport {
                    stage: stage.name(),
                    changed: next != text,
                    bytes_before: text.len(),
                    bytes_after: next.len(),
                };
                if report.changed {
                    pass_changed = true;
                    tracing::debug!(
                        stage = report.stage,
                        pass,
                        before = report.bytes_before,
                        after = report.bytes_after,
                        "stage rewrote text"
                    );
                }
                on_stage(index, report);
                text = next;
            }
            if !pass_changed {
                return text;
            }
        }

        tracing::warn!(passes = MAX_PASSES, "normalization did not settle");
        text
    }
}

/// Normalize with the built-in rules
#[must_use]
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::FnStage;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_short_circuits() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t\n"), "");
    }

    #[test]
    fn stage_names_in_order() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.stages(),
            vec![
                "escape_cleanup",
                "header_strip",
                "heading_normalization",
                "bullet_ization",
                "tab_tables",
                "totals",
                "thank_you",
                "notes_terms",
                "whitespace",
            ]
        );
    }

    #[test]
    fn traced_reports_every_stage() {
        let (text, reports) = Normalizer::default().normalize_traced("Scope of Work\nFrame walls");
        assert_eq!(text, "### Scope of Work\n- Frame walls");
        assert_eq!(reports.len(), 9);
        let changed: Vec<_> = reports.iter().filter(|r| r.changed).map(|r| r.stage).collect();
        assert_eq!(changed, vec!["heading_normalization", "bullet_ization"]);
    }

    #[test]
    fn custom_stage_list() {
        fn shout(text: &str, _: &CompiledRules) -> String {
            text.to_uppercase()
        }
        let normalizer = Normalizer::with_stages(
            default_rules().clone(),
            vec![Box::new(FnStage::new("shout", shout))],
        );
        assert_eq!(normalizer.normalize("quiet"), "QUIET");
    }

    #[test]
    fn passes_repeat_until_settled() {
        fn exclaim(text: &str, _: &CompiledRules) -> String {
            if text.ends_with("!!!") {
                text.to_string()
            } else {
                format!("{text}!")
            }
        }
        let normalizer = Normalizer::with_stages(
            default_rules().clone(),
            vec![Box::new(FnStage::new("exclaim", exclaim))],
        );
        let (text, reports) = normalizer.normalize_traced("hi");
        assert_eq!(text, "hi!!!");
        assert_eq!(reports.len(), 1);
        assert!(reports[0].changed);
        assert_eq!(reports[0].bytes_before, 2);
        assert_eq!(reports[0].bytes_after, 5);
    }

    #[test]
    fn once_stages_skip_settling_passes() {
        fn grow(text: &str, _: &CompiledRules) -> String {
            if text.len() < 4 {
                format!("{text}+")
            } else {
                text.to_string()
            }
        }
        fn mark(text: &str, _: &CompiledRules) -> String {
            format!("{text}*")
        }
        let normalizer = Normalizer::with_stages(
            default_rules().clone(),
            vec![
                Box::new(FnStage::once("mark", mark)),
                Box::new(FnStage::new("grow", grow)),
            ],
        );
        assert_eq!(normalizer.normalize("a"), "a*++");
    }

    #[test]
    fn unsettled_pipeline_stops_at_pass_limit() {
        fn append(text: &str, _: &CompiledRules) -> String {
            format!("{text}.")
        }
        let normalizer = Normalizer::with_stages(
            default_rules().clone(),
            vec![Box::new(FnStage::new("append", append))],
        );
        assert_eq!(normalizer.normalize("x"), format!("x{}", ".".repeat(MAX_PASSES)));
    }
}
