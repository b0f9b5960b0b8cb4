//! Rule tables for the normalization pipeline
//!
//! Marker lists, title allow-lists and section patterns are kept as data in
//! [`RuleSet`] so they can be versioned, loaded from a config file and unit
//! tested as tables. [`RuleSet::compile`] turns the data into
//! [`CompiledRules`], the only form the stages consume.

use crate::error::{RulesError, RulesResult};
use crate::format::load_document;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current rule-set schema version
pub const RULES_VERSION: u32 = 1;

/// How a named section's body is reshaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPolicy {
    /// Plain lines become `- ` bullets
    Bullets,
    /// `<description> ... $<amount>` lines become a two-column table
    AmountTable,
    /// Numbered lines stay numbered plain prose, never headings or badges
    NumberedProse,
    /// Only the generic stages (tab tables) apply
    Untouched,
}

/// A named section and the policy applied to its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    /// Display name, also used in error messages
    pub name: String,
    /// Case-insensitive regex searched in the heading text
    pub pattern: String,
    /// Body policy
    pub policy: SectionPolicy,
}

impl SectionRule {
    /// Create a section rule
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, policy: SectionPolicy) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            policy,
        }
    }
}

/// Column headers used when a tab-delimited block has no header line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabTableHeaders {
    /// First column
    pub first: String,
    /// Any column between first and last
    pub middle: String,
    /// Last column
    pub last: String,
}

impl Default for TabTableHeaders {
    fn default() -> Self {
        Self {
            first: "Item".to_string(),
            middle: "Details".to_string(),
            last: "Cost".to_string(),
        }
    }
}

impl TabTableHeaders {
    /// Header row for a table with `columns` columns
    #[must_use]
    pub fn for_columns(&self, columns: usize) -> Vec<String> {
        match columns {
            0 => Vec::new(),
            1 => vec![self.first.clone()],
            n => {
                let mut headers = Vec::with_capacity(n);
                headers.push(self.first.clone());
                headers.extend(std::iter::repeat(self.middle.clone()).take(n - 2));
                headers.push(self.last.clone());
                headers
            }
        }
    }
}

/// Labels and patterns for the totals section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalsRule {
    /// Header of the description column
    pub description_header: String,
    /// Header of the amount column
    pub amount_header: String,
    /// Bolded label of the total row
    pub total_label: String,
    /// Regex for the phrase that introduces the grand total
    pub total_phrase: String,
    /// Regex for a currency amount
    pub amount_pattern: String,
}

impl Default for TotalsRule {
    fn default() -> Self {
        Self {
            description_header: "Description".to_string(),
            amount_header: "Amount".to_string(),
            total_label: "TOTAL PROJECT COST".to_string(),
            total_phrase: r"total\s+(?:project\s+cost|estimate(?:d\s+cost)?)".to_string(),
            amount_pattern: r"\$\s?\d[\d,]*(?:\.\d+)?".to_string(),
        }
    }
}

/// Complete, serializable rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Schema version
    pub version: u32,
    /// Document titles removed when they appear as a level 1 or 2 heading
    pub boilerplate_titles: Vec<String>,
    /// Bare lines promoted to level 3 headings
    pub section_titles: Vec<String>,
    /// Named sections, first match wins
    pub sections: Vec<SectionRule>,
    /// Longest numbered line (in words) still treated as a heading
    pub numbered_heading_max_words: usize,
    /// Phrases that open a closing paragraph
    pub closing_phrases: Vec<String>,
    /// Heading placed above closing paragraphs
    pub closing_heading: String,
    /// Canonical heading for the notes section
    pub notes_heading: String,
    /// Regex for a "SECTION n:" prefix
    pub section_number_pattern: String,
    /// Fallback headers for tab tables
    pub tab_table: TabTableHeaders,
    /// Totals section labels
    pub totals: TotalsRule,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            version: RULES_VERSION,
            boilerplate_titles: strings(&[
                "Project Cost Estimate",
                "Construction Cost Estimate",
                "Cost Estimate",
            ]),
            section_titles: strings(&[
                "Project Overview",
                "Project Summary",
                "Scope of Work",
                "Materials & Cost Breakdown",
                "Materials and Cost Breakdown",
                "Materials",
                "Labor Costs",
                "Labour Costs",
                "Cost Breakdown",
                "Equipment Costs",
                "Permits & Fees",
                "Project Timeline",
                "Timeline",
                "Cost Summary",
                "Total Estimate",
                "Total Project Cost",
                "Exclusions",
                "Assumptions",
                "Notes & Terms",
                "Notes and Terms",
                "Thank You",
            ]),
            sections: vec![
                SectionRule::new(
                    "Notes & Terms",
                    r"notes\s*(?:&|and)\s*terms",
                    SectionPolicy::NumberedProse,
                ),
                SectionRule::new(
                    "Total Project Cost",
                    r"total\s+(?:project\s+cost|estimate)|cost\s+summary",
                    SectionPolicy::AmountTable,
                ),
                SectionRule::new("Scope of Work", r"scope\s+of\s+work", SectionPolicy::Bullets),
                SectionRule::new("Project Timeline", r"timeline", SectionPolicy::Bullets),
                SectionRule::new("Exclusions", r"exclusions|assumptions", SectionPolicy::Bullets),
                SectionRule::new(
                    "Materials & Cost Breakdown",
                    r"materials|cost\s+breakdown",
                    SectionPolicy::Untouched,
                ),
                SectionRule::new("Labor Costs", r"labou?r", SectionPolicy::Untouched),
                SectionRule::new("Equipment Costs", r"equipment", SectionPolicy::Untouched),
                SectionRule::new("Permits & Fees", r"permits?", SectionPolicy::Untouched),
                SectionRule::new(
                    "Project Overview",
                    r"project\s+(?:overview|summary)",
                    SectionPolicy::Untouched,
                ),
            ],
            numbered_heading_max_words: 8,
            closing_phrases: strings(&[
                "thank you",
                "thanks",
                "we appreciate",
                "we look forward",
                "sincerely",
                "best regards",
            ]),
            closing_heading: "Thank You".to_string(),
            notes_heading: "Notes and Terms".to_string(),
            section_number_pattern: r"^[*_\s]*section\s+\d+\s*:[*_\s]*".to_string(),
            tab_table: TabTableHeaders::default(),
            totals: TotalsRule::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl RuleSet {
    /// Load a rule set from a TOML, YAML or JSON file
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    /// IO, decode and version errors
    pub fn from_path(path: impl AsRef<Path>) -> RulesResult<Self> {
        let rules: Self = load_document(path)?;
        rules.check_version()?;
        Ok(rules)
    }

    fn check_version(&self) -> RulesResult<()> {
        if self.version > RULES_VERSION {
            return Err(RulesError::UnsupportedVersion {
                found: self.version,
                supported: RULES_VERSION,
            });
        }
        Ok(())
    }

    /// Compile every pattern in the set
    ///
    /// # Errors
    /// `RulesError::InvalidPattern` naming the first rule that fails
    pub fn compile(&self) -> RulesResult<CompiledRules> {
        self.check_version()?;

        let amount = &self.totals.amount_pattern;
        let total_phrase = &self.totals.total_phrase;

        let sections = self
            .sections
            .iter()
            .map(|rule| {
                Ok(CompiledSectionRule {
                    name: rule.name.clone(),
                    policy: rule.policy,
                    pattern: case_insensitive(&rule.name, &rule.pattern)?,
                })
            })
            .collect::<RulesResult<Vec<_>>>()?;

        Ok(CompiledRules {
            boilerplate: case_insensitive(
                "boilerplate_titles",
                &format!(
                    r"^#{{1,2}}\s+[*_]*\s*(?:{})\s*[*_]*\s*:?\s*$",
                    alternation(&self.boilerplate_titles)
                ),
            )?,
            section_titles: self
                .section_titles
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            sections,
            closing: case_insensitive(
                "closing_phrases",
                &format!(r"^[*_\s]*(?:{})\b", alternation(&self.closing_phrases)),
            )?,
            section_number: case_insensitive("section_number_pattern", &self.section_number_pattern)?,
            amount: case_insensitive("amount_pattern", amount)?,
            total_mention: case_insensitive("total_phrase", total_phrase)?,
            total_line: case_insensitive(
                "total_phrase",
                &format!(
                    r"^[\s*_\-]*(?:{total_phrase})\b[\s*_]*[:\-–\t]?[\s*_]*(?P<amount>{amount})"
                ),
            )?,
            amount_row: case_insensitive(
                "amount_pattern",
                &format!(
                    r"^(?:[-*+]\s+)?(?P<desc>.*?\S)[\s.]*(?:[:\-–=]|\t)?[\s*_]*(?P<amount>{amount})[\s*_]*$"
                ),
            )?,
            source: self.clone(),
        })
    }
}

/// Escaped `a|b|c` alternation; never matches when the list is empty
fn alternation(items: &[String]) -> String {
    if items.is_empty() {
        return r"[^\s\S]".to_string();
    }
    items
        .iter()
        .map(|s| regex::escape(s.trim()).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

fn case_insensitive(rule: &str, pattern: &str) -> RulesResult<Regex> {
    Regex::new(&format!("(?i){pattern}")).map_err(|e| RulesError::invalid_pattern(rule, e))
}

/// Section rule with its pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledSectionRule {
    /// Display name
    pub name: String,
    /// Body policy
    pub policy: SectionPolicy,
    pattern: Regex,
}

impl CompiledSectionRule {
    /// Whether the heading text names this section
    #[inline]
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

/// Compiled form of a [`RuleSet`]
#[derive(Debug, Clone)]
pub struct CompiledRules {
    source: RuleSet,
    boilerplate: Regex,
    section_titles: Vec<String>,
    sections: Vec<CompiledSectionRule>,
    closing: Regex,
    section_number: Regex,
    amount: Regex,
    total_mention: Regex,
    total_line: Regex,
    amount_row: Regex,
}

static DEFAULT_RULES: Lazy<CompiledRules> = Lazy::new(|| {
    RuleSet::default()
        .compile()
        .expect("built-in rule set must compile")
});

/// Process-wide compiled default rules
#[inline]
#[must_use]
pub fn default_rules() -> &'static CompiledRules {
    &DEFAULT_RULES
}

impl CompiledRules {
    /// The rule set this was compiled from
    #[inline]
    #[must_use]
    pub fn source(&self) -> &RuleSet {
        &self.source
    }

    /// First section rule whose pattern matches the heading text
    #[must_use]
    pub fn section_rule(&self, title: &str) -> Option<&CompiledSectionRule> {
        self.sections.iter().find(|rule| rule.matches(title))
    }

    /// Policy for a heading text, if it names a known section
    #[inline]
    #[must_use]
    pub fn policy_for(&self, title: &str) -> Option<SectionPolicy> {
        self.section_rule(title).map(|rule| rule.policy)
    }

    /// Whether a heading text opens the numbered-prose (notes) section
    #[inline]
    #[must_use]
    pub fn is_notes_title(&self, title: &str) -> bool {
        self.policy_for(title) == Some(SectionPolicy::NumberedProse)
    }

    /// Whether a cleaned heading text is a notes title and nothing more
    ///
    /// `Payment Notes and Terms of Service` opens the notes section but is
    /// not a bare notes title, so it keeps its wording.
    #[must_use]
    pub fn is_exact_notes_title(&self, title: &str) -> bool {
        let title = title.trim();
        if title.eq_ignore_ascii_case(self.source.notes_heading.trim()) {
            return true;
        }
        self.sections
            .iter()
            .filter(|rule| rule.policy == SectionPolicy::NumberedProse)
            .filter_map(|rule| rule.pattern.find(title))
            .any(|m| m.start() == 0 && m.end() == title.len())
    }

    /// Line is a boilerplate document title
    #[inline]
    #[must_use]
    pub fn is_boilerplate_title(&self, line: &str) -> bool {
        self.boilerplate.is_match(line.trim())
    }

    /// If the line is a bare allow-listed section title, return its cleaned text
    #[must_use]
    pub fn bare_section_title<'a>(&self, line: &'a str) -> Option<&'a str> {
        let cleaned = line
            .trim()
            .trim_matches(|c: char| c == '*' || c == '_')
            .trim()
            .trim_end_matches(':')
            .trim_matches(|c: char| c == '*' || c == '_')
            .trim();
        if cleaned.is_empty() {
            return None;
        }
        let lowered = cleaned.to_lowercase();
        self.section_titles
            .iter()
            .any(|t| *t == lowered)
            .then_some(cleaned)
    }

    /// Line opens with a closing phrase
    #[inline]
    #[must_use]
    pub fn is_closing_line(&self, line: &str) -> bool {
        self.closing.is_match(line.trim_start())
    }

    /// Heading text is the canonical closing heading
    #[inline]
    #[must_use]
    pub fn is_closing_heading(&self, title: &str) -> bool {
        title.trim().eq_ignore_ascii_case(self.source.closing_heading.trim())
            || self.is_closing_line(title)
    }

    /// Line carries a "SECTION n:" prefix
    #[inline]
    #[must_use]
    pub fn has_section_number(&self, line: &str) -> bool {
        self.section_number.is_match(line)
    }

    /// Remove a leading "SECTION n:" prefix
    #[must_use]
    pub fn strip_section_number<'a>(&self, line: &'a str) -> &'a str {
        match self.section_number.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    /// Line contains a currency amount
    #[inline]
    #[must_use]
    pub fn has_amount(&self, line: &str) -> bool {
        self.amount.is_match(line)
    }

    /// Line mentions the grand total phrase
    #[inline]
    #[must_use]
    pub fn mentions_total(&self, line: &str) -> bool {
        self.total_mention.is_match(line)
    }

    /// Amount from an explicit grand-total line
    #[must_use]
    pub fn total_amount<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.total_line
            .captures(line.trim())
            .and_then(|c| c.name("amount"))
            .map(|m| m.as_str())
    }

    /// Split a `<description> ... $<amount>` line
    #[must_use]
    pub fn amount_row<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.amount_row.captures(line.trim())?;
        let desc = clean_description(caps.name("desc")?.as_str());
        let amount = caps.name("amount")?.as_str();
        (!desc.is_empty()).then_some((desc, amount))
    }
}

fn clean_description(desc: &str) -> &str {
    desc.trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim_start_matches(|c: char| c == '-' || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ':' | '-' | '–' | '.' | '=' | '*' | '_') || c.is_whitespace())
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> &'static CompiledRules {
        default_rules()
    }

    #[test]
    fn default_rules_compile() {
        assert!(RuleSet::default().compile().is_ok());
    }

    #[test]
    fn invalid_section_pattern_reports_rule_name() {
        let mut set = RuleSet::default();
        set.sections.push(SectionRule::new("Broken", "(", SectionPolicy::Bullets));
        let err = set.compile().unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn newer_version_rejected() {
        let set = RuleSet {
            version: RULES_VERSION + 1,
            ..RuleSet::default()
        };
        assert!(matches!(set.compile(), Err(RulesError::UnsupportedVersion { .. })));
    }

    #[test]
    fn section_policy_table() {
        let cases = [
            ("Notes & Terms", Some(SectionPolicy::NumberedProse)),
            ("Notes and Terms", Some(SectionPolicy::NumberedProse)),
            ("5. NOTES & TERMS", Some(SectionPolicy::NumberedProse)),
            ("Total Project Cost", Some(SectionPolicy::AmountTable)),
            ("Total Estimate", Some(SectionPolicy::AmountTable)),
            ("Scope of Work", Some(SectionPolicy::Bullets)),
            ("Project Timeline", Some(SectionPolicy::Bullets)),
            ("2. Materials & Cost Breakdown", Some(SectionPolicy::Untouched)),
            ("Labour Costs", Some(SectionPolicy::Untouched)),
            ("Thank You", None),
        ];
        for (title, expected) in cases {
            assert_eq!(rules().policy_for(title), expected, "title: {title}");
        }
    }

    #[test]
    fn exact_notes_titles() {
        assert!(rules().is_exact_notes_title("Notes & Terms"));
        assert!(rules().is_exact_notes_title(" NOTES AND TERMS "));
        assert!(rules().is_exact_notes_title("Notes and Terms"));
        assert!(!rules().is_exact_notes_title("Payment Notes and Terms of Service"));
        assert!(!rules().is_exact_notes_title("Notes & Terms (read carefully)"));
        assert!(rules().is_notes_title("Payment Notes and Terms of Service"));
    }

    #[test]
    fn boilerplate_titles() {
        assert!(rules().is_boilerplate_title("# Project Cost Estimate"));
        assert!(rules().is_boilerplate_title("## construction cost estimate"));
        assert!(rules().is_boilerplate_title("# **Cost Estimate**"));
        assert!(!rules().is_boilerplate_title("### Project Cost Estimate"));
        assert!(!rules().is_boilerplate_title("# Project Cost Estimate for Smith"));
        assert!(!rules().is_boilerplate_title("Project Cost Estimate"));
    }

    #[test]
    fn bare_titles() {
        assert_eq!(rules().bare_section_title("Scope of Work"), Some("Scope of Work"));
        assert_eq!(rules().bare_section_title("**Project Timeline:**"), Some("Project Timeline"));
        assert_eq!(rules().bare_section_title("  labor costs  "), Some("labor costs"));
        assert_eq!(rules().bare_section_title("Total Project Cost: $800"), None);
        assert_eq!(rules().bare_section_title("### Scope of Work"), None);
        assert_eq!(rules().bare_section_title(""), None);
    }

    #[test]
    fn closing_lines() {
        assert!(rules().is_closing_line("Thank you for choosing us."));
        assert!(rules().is_closing_line("**Thanks** again"));
        assert!(rules().is_closing_line("We look forward to working with you"));
        assert!(!rules().is_closing_line("Thanksgiving schedule applies"));
        assert!(!rules().is_closing_line("- Thank you"));
    }

    #[test]
    fn total_lines() {
        assert_eq!(rules().total_amount("Total Project Cost: $800"), Some("$800"));
        assert_eq!(rules().total_amount("**Total Project Cost** - $1,250.50"), Some("$1,250.50"));
        assert_eq!(rules().total_amount("**TOTAL PROJECT COST: $800**"), Some("$800"));
        assert_eq!(rules().total_amount("Total Estimate\t$99"), Some("$99"));
        assert_eq!(rules().total_amount("Materials: $500"), None);
    }

    #[test]
    fn amount_rows() {
        let cases = [
            ("Materials: $500", Some(("Materials", "$500"))),
            ("Labor - $300", Some(("Labor", "$300"))),
            ("Permits\t$150", Some(("Permits", "$150"))),
            ("- Paint ...... $45.99", Some(("Paint", "$45.99"))),
            ("**Timber**: $1,200", Some(("Timber", "$1,200"))),
            ("Timber 20 @ $10: $200", Some(("Timber 20 @ $10", "$200"))),
            ("- $300", None),
            ("All prices include GST", None),
        ];
        for (line, expected) in cases {
            assert_eq!(rules().amount_row(line), expected, "line: {line}");
        }
    }

    #[test]
    fn section_number_prefix() {
        assert!(rules().has_section_number("SECTION 4: Payment terms"));
        assert_eq!(rules().strip_section_number("**SECTION 4:** Payment terms"), "Payment terms");
        assert_eq!(rules().strip_section_number("Payment terms"), "Payment terms");
    }

    #[test]
    fn tab_headers_for_columns() {
        let headers = TabTableHeaders::default();
        assert_eq!(headers.for_columns(2), vec!["Item", "Cost"]);
        assert_eq!(headers.for_columns(4), vec!["Item", "Details", "Details", "Cost"]);
        assert_eq!(headers.for_columns(1), vec!["Item"]);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let set: RuleSet = toml::from_str("closing_heading = \"Closing Remarks\"").unwrap();
        assert_eq!(set.closing_heading, "Closing Remarks");
        assert_eq!(set.notes_heading, "Notes and Terms");
        assert!(!set.sections.is_empty());
    }
}
