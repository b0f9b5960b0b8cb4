//! Classification result

use crate::error::ClassifyError;
use serde::Serialize;
use serde_json::Value;

/// How a payload should be rendered
///
/// Exactly one variant is produced per classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Classification {
    /// Render as markdown
    Markdown(String),
    /// Render a structured estimate object
    StructuredEstimate(Value),
    /// Render the fallback view
    Fallback(ClassifyError),
}

impl Classification {
    /// Stable variant name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Markdown(_) => "markdown",
            Self::StructuredEstimate(_) => "structured_estimate",
            Self::Fallback(_) => "fallback",
        }
    }

    /// User-facing message of a fallback
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Fallback(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Is markdown
    #[inline]
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        matches!(self, Self::Markdown(_))
    }

    /// Is fallback
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Markdown content, if any
    #[inline]
    #[must_use]
    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Self::Markdown(text) => Some(text),
            _ => None,
        }
    }

    /// Structured estimate, if any
    #[inline]
    #[must_use]
    pub fn as_estimate(&self) -> Option<&Value> {
        match self {
            Self::StructuredEstimate(value) => Some(value),
            _ => None,
        }
    }

    /// Fallback reason, if any
    #[inline]
    #[must_use]
    pub fn as_error(&self) -> Option<&ClassifyError> {
        match self {
            Self::Fallback(err) => Some(err),
            _ => None,
        }
    }
}
