//! Estimate Renderer
//!
//! The render boundary for normalized estimate markdown. A document is
//! walked once with pulldown-cmark into styled [`Block`]s, then written as
//! HTML. Numbered items render with a coloured badge, except inside the
//! Notes & Terms section where they render as plain text.
//!
//! # Example
//!
//! ```rust
//! use estimate_render::{render, TextStyle};
//!
//! let blocks = render("### Notes and Terms\n1. Payment due on completion");
//! assert_eq!(blocks[1].text_style(), Some(TextStyle::PlainNumbered));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod block;
pub mod error;
pub mod estimate;
pub mod html;
pub mod notes;
pub mod theme;
mod walk;

pub use block::{Block, HeadingStyle, ListMarker, Span, Table, TableRow, TextStyle};
pub use error::{RenderError, RenderResult};
pub use estimate::estimate_to_markdown;
pub use html::{escape_html, fallback_html, to_html};
pub use notes::NotesState;
pub use theme::RenderTheme;

use estimate_classifier::Classification;
use estimate_normalizer::{default_rules, CompiledRules};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Walk markdown into styled blocks with the built-in rules
#[must_use]
pub fn render(markdown: &str) -> Vec<Block> {
    walk::walk(markdown, default_rules())
}

/// Theme plus the rules used to recognise the notes section
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: RenderTheme,
    rules: CompiledRules,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderTheme::default())
    }
}

impl Renderer {
    /// Renderer with the built-in rules
    #[must_use]
    pub fn new(theme: RenderTheme) -> Self {
        Self::with_rules(theme, default_rules().clone())
    }

    /// Renderer with custom rules
    #[inline]
    #[must_use]
    pub fn with_rules(theme: RenderTheme, rules: CompiledRules) -> Self {
        Self { theme, rules }
    }

    /// Theme in use
    #[inline]
    #[must_use]
    pub fn theme(&self) -> &RenderTheme {
        &self.theme
    }

    /// Walk markdown into styled blocks
    #[must_use]
    pub fn render(&self, markdown: &str) -> Vec<Block> {
        walk::walk(markdown, &self.rules)
    }

    /// Markdown straight to HTML
    ///
    /// # Errors
    /// `RenderError::Fmt` if writing to the buffer fails
    pub fn render_html(&self, markdown: &str) -> RenderResult<String> {
        to_html(&self.render(markdown), &self.theme)
    }

    /// Markdown for any classification; `None` for a fallback
    #[must_use]
    pub fn markdown_for(&self, classification: &Classification) -> Option<String> {
        match classification {
            Classification::Markdown(text) => Some(text.clone()),
            Classification::StructuredEstimate(value) => Some(estimate_to_markdown(value)),
            Classification::Fallback(_) => None,
        }
    }

    /// HTML for any classification, the fallback card included
    ///
    /// # Errors
    /// `RenderError::Fmt` if writing to the buffer fails
    pub fn render_classification(&self, classification: &Classification) -> RenderResult<String> {
        match classification {
            Classification::Fallback(err) => fallback_html(err, &self.theme),
            other => {
                let markdown = self.markdown_for(other).unwrap_or_default();
                tracing::debug!(kind = other.kind(), bytes = markdown.len(), "rendering classification");
                self.render_html(&markdown)
            }
        }
    }
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for rendering
    pub use crate::block::{Block, TextStyle};
    pub use crate::theme::RenderTheme;
    pub use crate::{render, Renderer};
}
