//! Estimate-content heuristic
//!
//! Text counts as estimate content when it carries enough marker substrings,
//! or when it already contains a markdown table (a pipe plus a `---`
//! separator). The marker list and both thresholds are data.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Current heuristic schema version
pub const HEURISTIC_VERSION: u32 = 1;

static DEFAULT_HEURISTIC: Lazy<HeuristicConfig> = Lazy::new(HeuristicConfig::default);

/// How many markers a caller demands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Any single marker is enough
    #[default]
    Lenient,
    /// Several markers are needed unless a table is present
    Strict,
}

/// Marker list and thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Schema version
    pub version: u32,
    /// Case-sensitive substrings that signal estimate content
    pub markers: Vec<String>,
    /// Markers required in lenient mode
    pub lenient_min: usize,
    /// Markers required in strict mode
    pub strict_min: usize,
    /// Accept any text holding a pipe table regardless of markers
    pub table_evidence: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            version: HEURISTIC_VERSION,
            markers: [
                "Total Project Cost",
                "Materials & Cost Breakdown",
                "Labor Costs",
                "Cost Breakdown",
                "Project Timeline",
                "Notes & Terms",
                "| Item |",
                "| Description |",
            ]
            .iter()
            .map(|m| (*m).to_string())
            .collect(),
            lenient_min: 1,
            strict_min: 2,
            table_evidence: true,
        }
    }
}

impl HeuristicConfig {
    /// Marker threshold for a strictness level
    #[inline]
    #[must_use]
    pub fn min_markers(&self, strictness: Strictness) -> usize {
        match strictness {
            Strictness::Lenient => self.lenient_min,
            Strictness::Strict => self.strict_min,
        }
    }

    /// Number of distinct markers present in the text
    #[must_use]
    pub fn marker_count(&self, text: &str) -> usize {
        self.markers
            .iter()
            .filter(|m| !m.is_empty() && text.contains(m.as_str()))
            .count()
    }

    /// Text holds a pipe and a table separator
    #[inline]
    #[must_use]
    pub fn has_table_evidence(text: &str) -> bool {
        text.contains('|') && text.contains("---")
    }

    /// Decide whether text is real estimate content
    #[must_use]
    pub fn is_estimate_content(&self, text: &str, strictness: Strictness) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        if self.table_evidence && Self::has_table_evidence(text) {
            tracing::trace!("table evidence present");
            return true;
        }
        let count = self.marker_count(text);
        let required = self.min_markers(strictness);
        tracing::trace!(count, required, ?strictness, "estimate markers");
        count >= required
    }
}

/// Decide with the built-in marker list
#[must_use]
pub fn is_estimate_content(text: &str, strictness: Strictness) -> bool {
    DEFAULT_HEURISTIC.is_estimate_content(text, strictness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_single_marker() {
        assert!(is_estimate_content("## Labor Costs\nCarpenter", Strictness::Lenient));
        assert!(!is_estimate_content("## Labor Costs\nCarpenter", Strictness::Strict));
    }

    #[test]
    fn test_strict_two_markers() {
        let text = "Project Timeline: 3 weeks\nTotal Project Cost: $900";
        assert!(is_estimate_content(text, Strictness::Strict));
    }

    #[test]
    fn test_table_evidence() {
        let text = "| a | b |\n| --- | --- |";
        assert!(is_estimate_content(text, Strictness::Lenient));
        assert!(is_estimate_content(text, Strictness::Strict));

        let config = HeuristicConfig {
            table_evidence: false,
            ..HeuristicConfig::default()
        };
        assert!(!config.is_estimate_content(text, Strictness::Lenient));
    }

    #[test]
    fn test_pipe_alone_is_not_a_table() {
        assert!(!is_estimate_content("a | b", Strictness::Lenient));
        assert!(!is_estimate_content("---", Strictness::Lenient));
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(!is_estimate_content("Hello, how can I help?", Strictness::Lenient));
        assert!(!is_estimate_content("", Strictness::Lenient));
        assert!(!is_estimate_content("   ", Strictness::Lenient));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(!is_estimate_content("total project cost", Strictness::Lenient));
    }

    #[test]
    fn test_nested_markers_count_separately() {
        let config = HeuristicConfig::default();
        assert_eq!(config.marker_count("Materials & Cost Breakdown"), 2);
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let config = HeuristicConfig {
            lenient_min: 2,
            strict_min: 3,
            ..HeuristicConfig::default()
        };
        assert!(!config.is_estimate_content("Labor Costs", Strictness::Lenient));
        assert!(config.is_estimate_content("Labor Costs\nNotes & Terms", Strictness::Lenient));
        assert_eq!(config.min_markers(Strictness::Strict), 3);
    }

    #[test]
    fn test_strictness_serde() {
        let s: Strictness = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(s, Strictness::Strict);
        assert_eq!(Strictness::default(), Strictness::Lenient);
    }
}
