//! Line classification and section spans
//!
//! A section is the text introduced by a heading and bounded by the next
//! heading of equal or higher level. Stages only rewrite a section's *direct*
//! body (the lines before the next heading of any level), so nested
//! subsections are handled by their own spans.

use crate::rules::{CompiledRules, CompiledSectionRule, SectionPolicy};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*?)\s*#*\s*$").unwrap());
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]").unwrap());
static NUMBERED_OR_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:#{1,6}\s+)?\d+\.\s").unwrap());

/// Parse an ATX heading into `(level, text)`
#[must_use]
pub fn heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    Some((level, caps.get(2).map_or("", |m| m.as_str())))
}

/// Line is blank or whitespace only
#[inline]
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Line starts with `-`, `*` or `+` (existing bullet or emphasis)
#[inline]
#[must_use]
pub fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(['-', '*', '+'])
}

/// Line starts with a `1.` / `1)` marker
#[inline]
#[must_use]
pub fn is_numbered(line: &str) -> bool {
    NUMBERED_RE.is_match(line)
}

/// Numbered line, or a heading whose text is numbered
#[inline]
#[must_use]
pub fn is_numbered_like(line: &str) -> bool {
    NUMBERED_OR_HEADING_RE.is_match(line)
}

/// Line is part of a pipe table
#[inline]
#[must_use]
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Line opens or closes a fenced code block
#[inline]
#[must_use]
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// For each line, whether it sits inside (or on) a fenced code block
#[must_use]
pub fn fence_mask(lines: &[&str]) -> Vec<bool> {
    let mut inside = false;
    lines
        .iter()
        .map(|line| {
            if is_fence(line) {
                inside = !inside;
                true
            } else {
                inside
            }
        })
        .collect()
}

/// A heading and the line ranges it governs
#[derive(Debug, Clone)]
pub struct SectionSpan<'r> {
    /// Line index of the heading
    pub heading: usize,
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text
    pub title: String,
    /// Section rule matched by the title
    pub rule: Option<&'r CompiledSectionRule>,
    /// Lines up to the next heading of any level
    pub body: Range<usize>,
    /// Lines up to the next heading of equal or higher level
    pub full: Range<usize>,
}

impl SectionSpan<'_> {
    /// Policy of the matched rule
    #[inline]
    #[must_use]
    pub fn policy(&self) -> Option<SectionPolicy> {
        self.rule.map(|r| r.policy)
    }
}

/// Compute section spans, ignoring headings inside fenced code
#[must_use]
pub fn section_spans<'r>(lines: &[&str], rules: &'r CompiledRules) -> Vec<SectionSpan<'r>> {
    let mask = fence_mask(lines);
    let headings: Vec<(usize, u8, &str)> = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !mask[*i])
        .filter_map(|(i, line)| heading(line).map(|(level, text)| (i, level, text)))
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(n, &(index, level, title))| {
            let next_any = headings.get(n + 1).map_or(lines.len(), |h| h.0);
            let next_peer = headings[n + 1..]
                .iter()
                .find(|h| h.1 <= level)
                .map_or(lines.len(), |h| h.0);
            SectionSpan {
                heading: index,
                level,
                title: title.to_string(),
                rule: rules.section_rule(title),
                body: index + 1..next_any,
                full: index + 1..next_peer,
            }
        })
        .collect()
}

/// Rewrite the direct body of each section
///
/// `rewrite` returns `None` to leave a body untouched. Bodies are visited in
/// document order; text outside any section is copied verbatim.
pub(crate) fn rewrite_bodies<F>(text: &str, rules: &CompiledRules, mut rewrite: F) -> String
where
    F: FnMut(&SectionSpan<'_>, &[&str]) -> Option<Vec<String>>,
{
    let lines: Vec<&str> = text.split('\n').collect();
    let spans = section_spans(&lines, rules);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut cursor = 0;
    let mut changed = false;

    for span in &spans {
        out.extend(lines[cursor..span.body.start].iter().map(|l| (*l).to_string()));
        let body = &lines[span.body.clone()];
        match rewrite(span, body) {
            Some(replacement) => {
                changed = true;
                out.extend(replacement);
            }
            None => out.extend(body.iter().map(|l| (*l).to_string())),
        }
        cursor = span.body.end;
    }
    out.extend(lines[cursor..].iter().map(|l| (*l).to_string()));

    if changed {
        out.join("\n")
    } else {
        text.to_string()
    }
}
