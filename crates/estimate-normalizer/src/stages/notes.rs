//! Notes & Terms de-styling
//!
//! The notes section title is reduced to one plain canonical heading: bold,
//! numbering and "SECTION n:" decoration are dropped. Body lines keep their
//! numeric markers; only a redundant "SECTION n:" prefix is trimmed.

use crate::rules::CompiledRules;
use crate::sections::{fence_mask, heading};
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

/// Canonicalise the notes heading and trim "SECTION n:" prefixes in its body
#[must_use]
pub fn destyle_notes(text: &str, rules: &CompiledRules) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mask = fence_mask(&lines);
    let notes_heading = format!("### {}", rules.source().notes_heading);
    let mut inside_notes = false;
    let mut changed = false;

    let out: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if mask[i] {
                return (*line).to_string();
            }
            if let Some((_, title)) = heading(line) {
                inside_notes = rules.is_notes_title(title);
                if inside_notes && *line != notes_heading && is_notes_heading(title, rules) {
                    changed = true;
                    return notes_heading.clone();
                }
                return (*line).to_string();
            }
            if inside_notes && rules.has_section_number(line) {
                let stripped = rules.strip_section_number(line);
                if !stripped.trim().is_empty() {
                    changed = true;
                    return stripped.to_string();
                }
            }
            (*line).to_string()
        })
        .collect();

    if changed {
        out.join("\n")
    } else {
        text.to_string()
    }
}

/// Heading text is only a notes title once bold, numbering, "SECTION n:"
/// and a trailing colon are removed
fn is_notes_heading(title: &str, rules: &CompiledRules) -> bool {
    let title = rules.strip_section_number(title);
    let title = title.trim_matches(is_decoration);
    let title = TITLE_NUMBER_RE.replace(title, "");
    rules.is_exact_notes_title(title.trim_matches(|c: char| c == ':' || is_decoration(c)))
}

fn is_decoration(c: char) -> bool {
    c == '*' || c == '_' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> String {
        destyle_notes(text, default_rules())
    }

    #[test]
    fn heading_variants_canonicalised() {
        for heading in [
            "### Notes & Terms",
            "## 5. Notes & Terms",
            "### **NOTES & TERMS**",
            "#### SECTION 5: Notes and Terms:",
            "## 5. **Notes & Terms**",
            "### **Notes & Terms**:",
        ] {
            let text = format!("{heading}\n1. Payment due on completion");
            assert_eq!(
                run(&text),
                "### Notes and Terms\n1. Payment due on completion",
                "heading: {heading}"
            );
        }
    }

    #[test]
    fn section_prefix_trimmed_in_body_only() {
        assert_eq!(
            run("### Notes & Terms\nSECTION 1: Deposit of 30% required\n### Scope of Work\nSECTION 2: Framing"),
            "### Notes and Terms\nDeposit of 30% required\n### Scope of Work\nSECTION 2: Framing"
        );
    }

    #[test]
    fn numbered_lines_keep_markers() {
        let text = "### Notes and Terms\n1. Payment due\n2. Valid 30 days";
        assert_eq!(run(text), text);
    }

    #[test]
    fn longer_titles_keep_their_wording() {
        let text = "### Payment Notes and Terms of Service\nSECTION 1: Net 30";
        assert_eq!(
            run(text),
            "### Payment Notes and Terms of Service\nNet 30"
        );
    }

    #[test]
    fn other_headings_untouched() {
        let text = "### Labor Costs\nSECTION 1: x";
        assert_eq!(run(text), text);
    }
}
