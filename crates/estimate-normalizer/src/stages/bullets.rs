//! Bullet-ization of plain section bodies
//!
//! Sections with the `Bullets` policy get every non-empty line turned into a
//! `- ` item, unless the body already has structure: a bullet, a numbered
//! line, a table row, a tab-delimited row, a "SECTION n:" tag or fenced code.
//! Grand-total and closing lines are never bulleted.

use crate::rules::{CompiledRules, SectionPolicy};
use crate::sections::{
    heading, is_blank, is_bullet, is_fence, is_numbered, is_table_line, rewrite_bodies,
};

/// Rewrite plain lines of bullet sections as `- ` items
#[must_use]
pub fn bulletize_sections(text: &str, rules: &CompiledRules) -> String {
    rewrite_bodies(text, rules, |span, body| {
        if span.policy() != Some(SectionPolicy::Bullets) || has_structure(body, rules) {
            return None;
        }

        let mut changed = false;
        let lines: Vec<String> = body
            .iter()
            .map(|line| {
                if is_blank(line)
                    || heading(line).is_some()
                    || rules.mentions_total(line)
                    || rules.is_closing_line(line)
                {
                    (*line).to_string()
                } else {
                    changed = true;
                    format!("- {}", line.trim())
                }
            })
            .collect();

        changed.then_some(lines)
    })
}

fn has_structure(body: &[&str], rules: &CompiledRules) -> bool {
    body.iter().any(|line| {
        is_bullet(line)
            || is_numbered(line)
            || is_table_line(line)
            || line.contains('\t')
            || is_fence(line)
            || rules.has_section_number(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> String {
        bulletize_sections(text, default_rules())
    }

    #[test]
    fn plain_lines_become_bullets() {
        assert_eq!(
            run("### Scope of Work\nDemolish deck\n  Frame extension\n\n### Labor Costs\nx"),
            "### Scope of Work\n- Demolish deck\n- Frame extension\n\n### Labor Costs\nx"
        );
    }

    #[test]
    fn skips_bodies_with_structure() {
        for body in ["- a\nb", "* a\nb", "1. a\nb", "| a |\nb", "a\tb\nc", "SECTION 2: a\nb"] {
            let text = format!("### Scope of Work\n{body}");
            assert_eq!(run(&text), text, "body: {body:?}");
        }
    }

    #[test]
    fn total_and_closing_lines_excluded() {
        assert_eq!(
            run("### Project Timeline\nWeek 1 demolition\nTotal Project Cost: $800\nThank you"),
            "### Project Timeline\n- Week 1 demolition\nTotal Project Cost: $800\nThank you"
        );
    }

    #[test]
    fn other_sections_untouched() {
        let text = "### Project Overview\nA small job";
        assert_eq!(run(text), text);
    }

    #[test]
    fn reapplying_is_noop() {
        let once = run("### Scope of Work\nDemolish deck");
        assert_eq!(run(&once), once);
    }
}
