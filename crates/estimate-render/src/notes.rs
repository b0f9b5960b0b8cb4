//! Notes & Terms render state
//!
//! Numbered items normally render with a coloured badge. Inside the notes
//! section they render as plain text. The walk carries a [`NotesState`] and
//! feeds it every heading it meets:
//!
//! ```text
//! Outside ──notes heading──▶ InsideNotes
//!    ▲                           │
//!    └────────any other heading──┘
//! ```
//!
//! Both states are terminal at end of document.

use crate::block::{HeadingStyle, TextStyle};
use estimate_normalizer::CompiledRules;
use serde::Serialize;

/// Whether the walk is inside the notes section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesState {
    /// Ordinary section, or before any heading
    #[default]
    Outside,
    /// Between a notes heading and the next heading
    InsideNotes,
}

impl NotesState {
    /// Transition on a heading
    #[must_use]
    pub fn on_heading(self, title: &str, rules: &CompiledRules) -> Self {
        let next = if rules.is_notes_title(title) {
            Self::InsideNotes
        } else {
            Self::Outside
        };
        if next != self {
            tracing::trace!(from = ?self, to = ?next, title, "notes state changed");
        }
        next
    }

    /// Style for a numbered paragraph or list item
    #[inline]
    #[must_use]
    pub fn numbered_style(self) -> TextStyle {
        match self {
            Self::Outside => TextStyle::Badge,
            Self::InsideNotes => TextStyle::PlainNumbered,
        }
    }

    /// Style for the heading that caused the transition into this state
    #[inline]
    #[must_use]
    pub fn heading_style(self) -> HeadingStyle {
        match self {
            Self::Outside => HeadingStyle::Section,
            Self::InsideNotes => HeadingStyle::Plain,
        }
    }

    /// Inside notes
    #[inline]
    #[must_use]
    pub fn is_inside(self) -> bool {
        self == Self::InsideNotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_normalizer::default_rules;

    #[test]
    fn test_transitions() {
        let rules = default_rules();
        let state = NotesState::default();
        assert_eq!(state, NotesState::Outside);

        let state = state.on_heading("Notes and Terms", rules);
        assert!(state.is_inside());
        let state = state.on_heading("Notes & Terms", rules);
        assert!(state.is_inside());
        let state = state.on_heading("Thank You", rules);
        assert_eq!(state, NotesState::Outside);
        let state = state.on_heading("Labor Costs", rules);
        assert_eq!(state, NotesState::Outside);
    }

    #[test]
    fn test_styles() {
        assert_eq!(NotesState::Outside.numbered_style(), TextStyle::Badge);
        assert_eq!(NotesState::InsideNotes.numbered_style(), TextStyle::PlainNumbered);
        assert_eq!(NotesState::InsideNotes.heading_style(), HeadingStyle::Plain);
    }
}
