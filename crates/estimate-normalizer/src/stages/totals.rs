//! Totals section formatting
//!
//! Inside an `AmountTable` section, `<description> ... $<amount>` lines are
//! collected into a `| Description | Amount |` table. An explicit grand total
//! line ("Total Project Cost: $X") becomes a bolded last row. When only the
//! grand total is present, it is emitted as a single inline total marker
//! instead of a one-row table. Lines that parse as neither are kept, in
//! order, after the table.

use crate::rules::{CompiledRules, SectionPolicy};
use crate::sections::{is_blank, is_fence, rewrite_bodies};
use crate::table::pipe_table;

/// Rewrite totals sections as description/amount tables
#[must_use]
pub fn format_totals(text: &str, rules: &CompiledRules) -> String {
    rewrite_bodies(text, rules, |span, body| {
        if span.policy() != Some(SectionPolicy::AmountTable) {
            return None;
        }
        if body.iter().any(|l| l.contains('|') || is_fence(l)) {
            return None;
        }
        rewrite_totals(body, rules)
    })
}

fn rewrite_totals(body: &[&str], rules: &CompiledRules) -> Option<Vec<String>> {
    let labels = &rules.source().totals;
    let mut total: Option<&str> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut other: Vec<String> = Vec::new();

    for line in body.iter().filter(|l| !is_blank(l)) {
        if let Some(amount) = rules.total_amount(line) {
            total.get_or_insert(amount);
        } else if let Some((desc, amount)) = rules.amount_row(line) {
            rows.push(vec![desc.to_string(), amount.to_string()]);
        } else {
            other.push(line.trim().to_string());
        }
    }

    let mut out = vec![String::new()];
    if rows.is_empty() {
        let amount = total?;
        tracing::debug!(amount, "totals section has no rows, emitting total marker");
        out.push(format!("**{}: {amount}**", labels.total_label));
    } else {
        if let Some(amount) = total {
            rows.push(vec![format!("**{}**", labels.total_label), format!("**{amount}**")]);
        }
        let header = [labels.description_header.clone(), labels.amount_header.clone()];
        out.extend(pipe_table(&header, &rows));
    }

    if !other.is_empty() {
        out.push(String::new());
        out.extend(other);
    }
    if body.last().is_some_and(|l| is_blank(l)) {
        out.push(String::new());
    }
    Some(out)
}
