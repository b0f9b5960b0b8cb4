//! Config document formats
//!
//! Rule sets (and the CLI's combined config) can be written as TOML, YAML
//! or JSON. The format is picked from the file extension.

use crate::error::{RulesError, RulesResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported config document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Extensions recognised for each format (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Toml => &["toml"],
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
        }
    }

    /// Resolve the format from a path's extension
    ///
    /// # Errors
    /// `RulesError::UnsupportedFormat` when the extension is missing or unknown
    pub fn from_path(path: &Path) -> RulesResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        [Self::Toml, Self::Yaml, Self::Json]
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .ok_or(RulesError::UnsupportedFormat(ext))
    }

    /// Decode a document
    ///
    /// # Errors
    /// Returns the decoder's error wrapped in `RulesError`
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> RulesResult<T> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Read and decode a config document, choosing the decoder by extension
///
/// # Errors
/// IO, extension and decode failures
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> RulesResult<T> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| RulesError::io_error(path, e))?;
    tracing::debug!(path = %path.display(), ?format, "loading config document");
    format.parse(&content)
}
