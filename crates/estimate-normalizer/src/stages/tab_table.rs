//! Table synthesis for tab-delimited blocks
//!
//! Inside a named section, a contiguous run of lines using tabs as column
//! separators becomes a pipe table. The first line is the header unless it
//! already carries an amount, in which case the configured default headers
//! are used and every line is data. Bodies that already contain a pipe are
//! considered formatted and skipped.

use crate::rules::{CompiledRules, SectionPolicy};
use crate::sections::{is_blank, is_fence, rewrite_bodies};
use crate::table::pipe_table;

/// Convert tab-delimited runs in named sections into pipe tables
#[must_use]
pub fn synthesize_tab_tables(text: &str, rules: &CompiledRules) -> String {
    rewrite_bodies(text, rules, |span, body| {
        match span.policy() {
            None | Some(SectionPolicy::NumberedProse | SectionPolicy::AmountTable) => return None,
            Some(SectionPolicy::Bullets | SectionPolicy::Untouched) => {}
        }
        if body.iter().any(|l| l.contains('|') || is_fence(l)) {
            return None;
        }
        if !body.iter().any(|l| is_tab_row(l)) {
            return None;
        }
        Some(rewrite_runs(body, rules))
    })
}

fn is_tab_row(line: &str) -> bool {
    line.contains('\t') && split_cells(line).len() >= 2
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('\t')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn rewrite_runs(body: &[&str], rules: &CompiledRules) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(body.len() + 4);
    let mut i = 0;

    while i < body.len() {
        if !is_tab_row(body[i]) {
            out.push(body[i].to_string());
            i += 1;
            continue;
        }

        let start = i;
        while i < body.len() && is_tab_row(body[i]) {
            i += 1;
        }
        let mut rows: Vec<Vec<String>> = body[start..i].iter().map(|l| split_cells(l)).collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

        let header = if rules.has_amount(body[start]) {
            rules.source().tab_table.for_columns(columns)
        } else {
            rows.remove(0)
        };

        if out.last().is_some_and(|l| !is_blank(l)) {
            out.push(String::new());
        }
        out.extend(pipe_table(&header, &rows));
        if body.get(i).is_some_and(|l| !is_blank(l)) {
            out.push(String::new());
        }
    }
    out
}
