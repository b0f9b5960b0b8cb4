//! Presentation settings for HTML output

use serde::{Deserialize, Serialize};

/// Colours, class names and labels used when emitting HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTheme {
    /// Accent colour for section headers and number badges
    pub accent_color: String,
    /// Class on accent-coloured section headers
    pub section_heading_class: String,
    /// Class on plain headings
    pub plain_heading_class: String,
    /// Class on number badges
    pub badge_class: String,
    /// Class on plain numbered items
    pub plain_numbered_class: String,
    /// Class on the standalone grand-total line
    pub total_marker_class: String,
    /// Class on tables
    pub table_class: String,
    /// Class on grand-total table rows
    pub total_row_class: String,
    /// Right-align currency columns
    pub align_amounts_right: bool,
    /// Fallback card title
    pub fallback_title: String,
    /// Fallback retry button label
    pub retry_label: String,
    /// Fallback back button label
    pub back_label: String,
}

impl Default for RenderTheme {
    fn default() -> Self {
        Self {
            accent_color: "#1d4ed8".to_string(),
            section_heading_class: "section-header".to_string(),
            plain_heading_class: "plain-heading".to_string(),
            badge_class: "number-badge".to_string(),
            plain_numbered_class: "plain-numbered".to_string(),
            total_marker_class: "total-marker".to_string(),
            table_class: "estimate-table".to_string(),
            total_row_class: "total-row".to_string(),
            align_amounts_right: true,
            fallback_title: "Sorry, the estimate couldn't be generated".to_string(),
            retry_label: "Try again".to_string(),
            back_label: "Go back".to_string(),
        }
    }
}
