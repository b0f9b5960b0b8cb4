//! Estimate Markdown Normalizer
//!
//! Rewrites loosely structured, LLM-produced markdown into a consistent
//! document with headings, bullet lists and tables. It does not parse
//! markdown; every stage is a heuristic, regex-driven text rewrite that
//! leaves already-formatted input alone.
//!
//! # Pipeline
//!
//! ```text
//! raw text → escape cleanup → header strip → headings → bullets
//!          → tab tables → totals → thank-you → notes & terms → whitespace
//! ```
//!
//! # Example
//!
//! ```rust
//! use estimate_normalizer::normalize;
//!
//! let md = normalize("Scope of Work\nDemolish deck\nFrame extension");
//! assert_eq!(md, "### Scope of Work\n- Demolish deck\n- Frame extension");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod format;
pub mod pipeline;
pub mod rules;
pub mod sections;
pub mod stages;
pub mod table;

// Re-exports for convenience
pub use error::{RulesError, RulesResult};
pub use format::{load_document, ConfigFormat};
pub use pipeline::{normalize, Normalizer, StageReport};
pub use rules::{
    default_rules, CompiledRules, RuleSet, SectionPolicy, SectionRule, RULES_VERSION,
};
pub use sections::{section_spans, SectionSpan};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the normalizer
    pub use crate::pipeline::{normalize, Normalizer};
    pub use crate::rules::{default_rules, CompiledRules, RuleSet, SectionPolicy};
    pub use crate::stages::Stage;
}
