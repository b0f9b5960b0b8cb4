//! Error types for rendering
//!
//! Walking markdown never fails. Only writing the HTML buffer can.

/// Errors raised while emitting HTML
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Formatter failure while writing output
    #[error("failed to write html: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result type alias for rendering
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::from(std::fmt::Error);
        assert!(err.to_string().starts_with("failed to write html"));
    }
}
