//! Error types for rule loading
//!
//! Normalization itself never fails. Everything that can go wrong happens
//! while a rule set is read from disk or compiled into regexes:
//! - Unknown config file extension
//! - IO failure while reading the file
//! - Decode failure for TOML, YAML or JSON documents
//! - A rule pattern that is not a valid regex

use std::path::PathBuf;

/// Errors raised while loading or compiling a rule set
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// No decoder for the file extension
    #[error("unsupported config extension: '{0}'")]
    UnsupportedFormat(String),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML document could not be decoded
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML document could not be decoded
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON document could not be decoded
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule pattern failed to compile
    #[error("invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// Rule set written for a newer schema
    #[error("unsupported rules version {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl RulesError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create pattern error for a named rule
    pub fn invalid_pattern(rule: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            source,
        }
    }
}

/// Result type alias for rule loading
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_display() {
        let err = RulesError::UnsupportedFormat("ini".to_string());
        assert_eq!(err.to_string(), "unsupported config extension: 'ini'");
    }

    #[test]
    fn invalid_pattern_names_rule() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = RulesError::invalid_pattern("Scope of Work", source);
        assert!(err.to_string().contains("Scope of Work"));
    }

    #[test]
    fn version_display() {
        let err = RulesError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert!(err.to_string().contains("version 9"));
    }
}
