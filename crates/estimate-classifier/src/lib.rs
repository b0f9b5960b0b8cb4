//! Estimate Response Classifier
//!
//! Decides how a payload from the estimate service should be shown: as
//! markdown, as a structured estimate object, or as the fallback view.
//! Classification is total. Every JSON value maps to exactly one
//! [`Classification`] and nothing here panics or returns an error.
//!
//! # Example
//!
//! ```rust
//! use estimate_classifier::{classify, Classification};
//! use serde_json::json;
//!
//! let payload = json!({ "markdownContent": "### Labor Costs\nCarpenter: $900" });
//! assert!(matches!(classify(&payload), Classification::Markdown(_)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod classification;
pub mod classifier;
pub mod error;
pub mod heuristic;

pub use classification::Classification;
pub use classifier::{classify, Classifier, ClassifierConfig};
pub use error::ClassifyError;
pub use heuristic::{is_estimate_content, HeuristicConfig, Strictness, HEURISTIC_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for classifying payloads
    pub use crate::classification::Classification;
    pub use crate::classifier::{classify, Classifier, ClassifierConfig};
    pub use crate::heuristic::{is_estimate_content, Strictness};
}
