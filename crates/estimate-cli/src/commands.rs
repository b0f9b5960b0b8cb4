//! Subcommand bodies
//!
//! Each command takes the input text and returns what goes to stdout, so the
//! binary only deals with argument parsing, reading files and exit codes.

use crate::config::Toolkit;
use anyhow::{Context, Result};
use estimate_classifier::{Classification, ClassifyError, Strictness};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Output of `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Html,
    Json,
    Markdown,
}

impl OutputFormat {
    pub(crate) const NAMES: [&'static str; 3] = ["html", "json", "markdown"];

    pub(crate) fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "markdown" => Self::Markdown,
            _ => Self::Html,
        }
    }
}

/// Read a file, or stdin for `-`
pub(crate) fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    let path = Path::new(source);
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse_payload(input: &str) -> Result<Value> {
    serde_json::from_str(input).context("input is not a JSON payload")
}

/// Classification as `{"kind": ..., "value": ...}`
pub(crate) fn classify(tools: &Toolkit, input: &str) -> Result<String> {
    let classification = tools.classifier.classify(&parse_payload(input)?);
    Ok(serde_json::to_string_pretty(&classification)?)
}

/// Normalized text plus the names of the stages that changed it
pub(crate) fn normalize(tools: &Toolkit, input: &str) -> (String, Vec<&'static str>) {
    let (text, reports) = tools.normalizer.normalize_traced(input);
    let changed = reports
        .iter()
        .filter(|r| r.changed)
        .map(|r| r.stage)
        .collect();
    (text, changed)
}

/// Classify (or take raw text), normalize, render
pub(crate) fn render(
    tools: &Toolkit,
    input: &str,
    format: OutputFormat,
    raw: bool,
) -> Result<String> {
    let classification = if raw {
        let text = tools.normalizer.normalize(input);
        if text.is_empty() {
            Classification::Fallback(ClassifyError::EmptyInput)
        } else {
            Classification::Markdown(text)
        }
    } else {
        tools.classifier.classify_and_normalize(&parse_payload(input)?)
    };
    tracing::debug!(kind = classification.kind(), ?format, "rendering");

    match format {
        OutputFormat::Html => Ok(tools.renderer.render_classification(&classification)?),
        OutputFormat::Markdown => Ok(tools
            .renderer
            .markdown_for(&classification)
            .or_else(|| classification.detail())
            .unwrap_or_default()),
        OutputFormat::Json => {
            let value = match tools.renderer.markdown_for(&classification) {
                Some(markdown) => serde_json::to_value(tools.renderer.render(&markdown))?,
                None => serde_json::to_value(&classification)?,
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}

/// Heuristic verdict; `strict` overrides the configured strictness
pub(crate) fn check(tools: &Toolkit, input: &str, strict: bool) -> bool {
    let heuristic = &tools.classifier.config().heuristic;
    let strictness = if strict {
        Strictness::Strict
    } else {
        tools.classifier.config().strictness
    };
    heuristic.is_estimate_content(input, strictness)
}
