//! Normalization stages
//!
//! Each stage is a pure `fn(&str, &CompiledRules) -> String`. A stage whose
//! trigger is absent returns its input unchanged; a stage whose target shape
//! is already present skips re-wrapping, so stages are safe to re-run.

use crate::rules::CompiledRules;

mod bullets;
mod closing;
mod escape;
mod header;
mod headings;
mod notes;
mod tab_table;
mod totals;
mod whitespace;

pub use bullets::bulletize_sections;
pub use closing::normalize_closing;
pub use escape::unescape_transport;
pub use header::strip_boilerplate_title;
pub use headings::promote_headings;
pub use notes::destyle_notes;
pub use tab_table::synthesize_tab_tables;
pub use totals::format_totals;
pub use whitespace::collapse_whitespace;

/// A single text rewrite in the pipeline
///
/// Implement this trait to add a custom stage to a [`crate::Normalizer`].
pub trait Stage: Send + Sync + 'static {
    /// Stable stage name, used in traces and reports
    fn name(&self) -> &'static str;

    /// Rewrite the text
    fn apply(&self, text: &str, rules: &CompiledRules) -> String;

    /// Run on the first pass only; later settling passes skip the stage
    fn runs_once(&self) -> bool {
        false
    }
}

/// Signature shared by the built-in stages
pub type StageFn = fn(&str, &CompiledRules) -> String;

/// Stage backed by a plain function
#[derive(Clone, Copy)]
pub struct FnStage {
    name: &'static str,
    run: StageFn,
    once: bool,
}

impl FnStage {
    /// Wrap a function as a named stage
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, run: StageFn) -> Self {
        Self {
            name,
            run,
            once: false,
        }
    }

    /// Wrap a function as a stage that only runs on the first pass
    #[inline]
    #[must_use]
    pub const fn once(name: &'static str, run: StageFn) -> Self {
        Self {
            name,
            run,
            once: true,
        }
    }
}

impl std::fmt::Debug for FnStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage")
            .field("name", &self.name)
            .field("once", &self.once)
            .finish()
    }
}

impl Stage for FnStage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: &str, rules: &CompiledRules) -> String {
        (self.run)(text, rules)
    }

    fn runs_once(&self) -> bool {
        self.once
    }
}

/// Built-in stages in their required order
///
/// Escape cleanup undoes transport encoding exactly once; repeating it would
/// peel another level off literal backslashes.
pub const BUILTIN_STAGES: [FnStage; 9] = [
    FnStage::once("escape_cleanup", unescape_transport),
    FnStage::new("header_strip", strip_boilerplate_title),
    FnStage::new("heading_normalization", promote_headings),
    FnStage::new("bullet_ization", bulletize_sections),
    FnStage::new("tab_tables", synthesize_tab_tables),
    FnStage::new("totals", format_totals),
    FnStage::new("thank_you", normalize_closing),
    FnStage::new("notes_terms", destyle_notes),
    FnStage::new("whitespace", collapse_whitespace),
];

/// Built-in stages, boxed for a pipeline
#[must_use]
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    BUILTIN_STAGES
        .iter()
        .map(|s| Box::new(*s) as Box<dyn Stage>)
        .collect()
}
