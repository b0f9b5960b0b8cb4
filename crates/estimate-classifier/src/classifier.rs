//! Response classifier
//!
//! Maps an arbitrary service payload to one [`Classification`]. Rules are
//! checked in precedence order and the first match wins:
//!
//! 1. `null` payload → fallback, empty input
//! 2. array → first `{type: "text", text}` element as markdown, else the
//!    whole array as a fenced JSON block
//! 3. object with a truthy `error` → fallback, upstream error
//! 4. `markdownContent` passing the heuristic → markdown
//! 5. `textLong`, then `textContent`, same gate
//! 6. non-null `estimate` → structured estimate
//! 7. string payload passing the heuristic → markdown
//! 8. first string property passing the heuristic → markdown
//! 9. object or array `data` → classify it recursively
//! 10. non-empty `fallbackContent` → markdown, ungated
//! 11. the whole payload as a fenced JSON block → markdown
//! 12. fallback, unclassifiable
//!
//! An empty string payload is treated as empty input.

use crate::classification::Classification;
use crate::error::ClassifyError;
use crate::heuristic::{HeuristicConfig, Strictness};
use estimate_normalizer::Normalizer;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Text fields tried in order before the structured estimate
const TEXT_FIELDS: [&str; 3] = ["markdownContent", "textLong", "textContent"];

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Marker list and thresholds
    pub heuristic: HeuristicConfig,
    /// Strictness applied to every gated rule
    pub strictness: Strictness,
    /// Deepest `data` wrapper followed
    pub max_depth: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicConfig::default(),
            strictness: Strictness::Lenient,
            max_depth: 8,
        }
    }
}

/// Payload classifier with the normalizer used for markdown results
#[derive(Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
    normalizer: Normalizer,
}

impl Classifier {
    /// Classifier with the default normalizer
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_normalizer(config, Normalizer::default())
    }

    /// Classifier with a custom normalizer
    #[inline]
    #[must_use]
    pub fn with_normalizer(config: ClassifierConfig, normalizer: Normalizer) -> Self {
        Self { config, normalizer }
    }

    /// Settings in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Normalizer used by [`Self::classify_and_normalize`]
    #[inline]
    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Heuristic gate at the configured strictness
    #[must_use]
    pub fn is_estimate_content(&self, text: &str) -> bool {
        self.config
            .heuristic
            .is_estimate_content(text, self.config.strictness)
    }

    /// Classify a payload
    #[must_use]
    pub fn classify(&self, payload: &Value) -> Classification {
        self.match_rules(payload, 0)
            .unwrap_or_else(|| last_resort(payload))
    }

    /// Classify, then normalize a markdown result
    #[must_use]
    pub fn classify_and_normalize(&self, payload: &Value) -> Classification {
        match self.classify(payload) {
            Classification::Markdown(text) => {
                let normalized = self.normalizer.normalize(&text);
                if normalized.is_empty() {
                    Classification::Fallback(ClassifyError::EmptyInput)
                } else {
                    Classification::Markdown(normalized)
                }
            }
            other => other,
        }
    }

    fn match_rules(&self, payload: &Value, depth: usize) -> Option<Classification> {
        match payload {
            Value::Null => Some(matched(
                "null_payload",
                Classification::Fallback(ClassifyError::EmptyInput),
            )),
            Value::Array(items) => Some(classify_array(payload, items)),
            Value::Object(map) => self.classify_object(map, depth),
            Value::String(text) if text.trim().is_empty() => Some(matched(
                "empty_text",
                Classification::Fallback(ClassifyError::EmptyInput),
            )),
            Value::String(text) if self.is_estimate_content(text) => {
                Some(matched("text_payload", Classification::Markdown(text.clone())))
            }
            _ => None,
        }
    }

    fn classify_object(&self, map: &Map<String, Value>, depth: usize) -> Option<Classification> {
        if let Some(err) = map.get("error").filter(|e| is_truthy(e)) {
            return Some(matched(
                "upstream_error",
                Classification::Fallback(ClassifyError::upstream(error_message(err))),
            ));
        }

        for field in TEXT_FIELDS {
            if let Some(text) = map.get(field).and_then(Value::as_str) {
                if !text.trim().is_empty() && self.is_estimate_content(text) {
                    return Some(matched(field, Classification::Markdown(text.to_string())));
                }
            }
        }

        if let Some(estimate) = map.get("estimate").filter(|v| !v.is_null()) {
            return Some(matched(
                "estimate",
                Classification::StructuredEstimate(estimate.clone()),
            ));
        }

        // Covers a string `data` as well
        if let Some(text) = map
            .values()
            .filter_map(Value::as_str)
            .find(|text| self.is_estimate_content(text))
        {
            return Some(matched("property_scan", Classification::Markdown(text.to_string())));
        }

        if let Some(data) = map.get("data").filter(|d| d.is_object() || d.is_array()) {
            if depth >= self.config.max_depth {
                tracing::warn!(depth, "data nesting too deep, not descending");
            } else if let Some(found) = self.match_rules(data, depth + 1) {
                return Some(found);
            }
        }

        map.get("fallbackContent")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(|text| matched("fallback_content", Classification::Markdown(text.to_string())))
    }
}

fn classify_array(payload: &Value, items: &[Value]) -> Classification {
    let text_item = items.iter().find_map(|item| {
        match (item.get("type").and_then(Value::as_str), item.get("text")) {
            (Some("text"), Some(Value::String(text))) => Some(text),
            _ => None,
        }
    });
    match text_item {
        Some(text) => matched("text_item", Classification::Markdown(text.clone())),
        None => match fenced_json(payload) {
            Some(block) => matched("array_dump", Classification::Markdown(block)),
            None => unclassifiable(),
        },
    }
}

fn last_resort(payload: &Value) -> Classification {
    match fenced_json(payload) {
        Some(block) => matched("payload_dump", Classification::Markdown(block)),
        None => unclassifiable(),
    }
}

fn unclassifiable() -> Classification {
    matched(
        "unclassifiable",
        Classification::Fallback(ClassifyError::Unclassifiable),
    )
}

fn matched(rule: &str, classification: Classification) -> Classification {
    tracing::debug!(rule, kind = classification.kind(), "payload classified");
    classification
}

fn fenced_json(value: &Value) -> Option<String> {
    serde_json::to_string_pretty(value)
        .ok()
        .map(|json| format!("```json\n{json}\n```"))
}

/// Truthiness as the service's own clients see it
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn error_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_string),
        other => other.to_string(),
    }
}

/// Classify with the built-in configuration
#[must_use]
pub fn classify(payload: &Value) -> Classification {
    DEFAULT_CLASSIFIER.classify(payload)
}
