//! Blank-line collapse and document trim

use crate::rules::CompiledRules;
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

/// Collapse runs of blank lines to one and trim the document
#[must_use]
pub fn collapse_whitespace(text: &str, _rules: &CompiledRules) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").trim().to_string()
}
