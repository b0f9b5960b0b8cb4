//! Closing remarks
//!
//! A paragraph that opens with a thanks/closing phrase is placed under the
//! canonical closing heading, whatever the upstream phrasing was.

use crate::rules::CompiledRules;
use crate::sections::{fence_mask, heading, is_blank};

/// Put closing paragraphs under the closing heading
#[must_use]
pub fn normalize_closing(text: &str, rules: &CompiledRules) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mask = fence_mask(&lines);
    let closing_heading = format!("### {}", rules.source().closing_heading);
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 1);
    let mut last_heading: Option<&str> = None;
    let mut changed = false;

    for (i, line) in lines.iter().enumerate() {
        if mask[i] {
            out.push((*line).to_string());
            continue;
        }
        if let Some((_, title)) = heading(line) {
            last_heading = Some(title);
            out.push((*line).to_string());
            continue;
        }

        let starts_paragraph =
            i == 0 || is_blank(lines[i - 1]) || heading(lines[i - 1]).is_some();
        let under_closing = last_heading.is_some_and(|t| rules.is_closing_heading(t));
        if starts_paragraph && !under_closing && rules.is_closing_line(line) {
            changed = true;
            out.push(closing_heading.clone());
            last_heading = Some(rules.source().closing_heading.as_str());
        }
        out.push((*line).to_string());
    }

    if changed {
        out.join("\n")
    } else {
        text.to_string()
    }
}
