//! Heading normalization
//!
//! Two promotions:
//! - an isolated numbered title line (`1. Project Overview`) becomes a
//!   level 2 heading (`## 1. Project Overview`)
//! - a bare allow-listed section title (`Scope of Work`, `**Labor Costs:**`)
//!   becomes a level 3 heading
//!
//! A numbered line only counts as a title when it looks like one: starts
//! with a capital, carries no tab, pipe or amount, has no trailing
//! punctuation, is short, and is not adjacent to another numbered line.
//! Numbered lines inside the numbered-prose section are never promoted.

use crate::rules::{CompiledRules, SectionPolicy};
use crate::sections::{fence_mask, heading, is_numbered_like};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.\s+(\S.*?)\s*$").unwrap());

/// Promote numbered title lines and bare section titles to headings
#[must_use]
pub fn promote_headings(text: &str, rules: &CompiledRules) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mask = fence_mask(&lines);
    let mut policy: Option<SectionPolicy> = None;
    let mut changed = false;

    let out: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if mask[i] {
                return (*line).to_string();
            }
            if let Some((_, title)) = heading(line) {
                policy = rules.policy_for(title);
                return (*line).to_string();
            }
            if let Some((number, title)) = numbered_title(&lines, i, rules) {
                if policy != Some(SectionPolicy::NumberedProse) {
                    changed = true;
                    policy = rules.policy_for(title);
                    return format!("## {number}. {title}");
                }
            }
            if let Some(title) = rules.bare_section_title(line) {
                changed = true;
                policy = rules.policy_for(title);
                return format!("### {title}");
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

fn numbered_title<'a>(
    lines: &[&'a str],
    index: usize,
    rules: &CompiledRules,
) -> Option<(&'a str, &'a str)> {
    let line = lines[index];
    let caps = NUMBERED_TITLE_RE.captures(line)?;
    let number = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str();

    let looks_like_title = title.chars().next().is_some_and(char::is_uppercase)
        && !title.contains(['\t', '|'])
        && !rules.has_amount(title)
        && !title.ends_with(['.', ':', ';', ',', '!', '?'])
        && title.split_whitespace().count() <= rules.source().numbered_heading_max_words;
    if !looks_like_title {
        return None;
    }

    let neighbour_numbered = |i: Option<usize>| {
        i.and_then(|i| lines.get(i))
            .is_some_and(|l| is_numbered_like(l))
    };
    if neighbour_numbered(index.checked_sub(1)) || neighbour_numbered(Some(index + 1)) {
        return None;
    }

    Some((number, title))
}
