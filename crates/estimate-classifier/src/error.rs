//! Classification failure taxonomy
//!
//! These are not returned as `Err`. A payload that cannot be shown as an
//! estimate is classified as [`crate::Classification::Fallback`] carrying one
//! of these values, and the caller renders the fallback view.

use serde::{Serialize, Serializer};

/// Why a payload ended in the fallback view
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// Null payload or empty text
    #[error("No estimation data received from the service.")]
    EmptyInput,

    /// The service reported an error of its own
    #[error("{0}")]
    UpstreamError(String),

    /// Every rule fell through
    #[error("No valid estimation data received from the service.")]
    Unclassifiable,
}

impl ClassifyError {
    /// Create upstream error from a message
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamError(message.into())
    }

    /// Stable kind name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UpstreamError(_) => "upstream_error",
            Self::Unclassifiable => "unclassifiable",
        }
    }
}

impl Serialize for ClassifyError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
