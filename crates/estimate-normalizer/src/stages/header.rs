//! Boilerplate title removal
//!
//! The renderer supplies its own document header, so a top-level
//! "# Project Cost Estimate" style title is dropped. Only titles that open
//! the document are considered; the same words further down are content.

use crate::rules::CompiledRules;
use crate::sections::is_blank;

/// Remove leading level 1-2 headings that only repeat a boilerplate title
#[must_use]
pub fn strip_boilerplate_title(text: &str, rules: &CompiledRules) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let leading: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .take_while(|(_, line)| rules.is_boilerplate_title(line))
        .map(|(i, _)| i)
        .collect();
    if leading.is_empty() {
        return text.to_string();
    }

    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !leading.contains(i))
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n")
}
