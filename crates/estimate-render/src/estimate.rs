//! Structured estimate to markdown
//!
//! A structured estimate is shown through the same markdown path as text
//! results. Scalar fields become a `| Field | Value |` table, nested objects
//! become sub-sections, and arrays of line-item objects become tables whose
//! columns are the union of the items' fields in first-seen order.

use estimate_normalizer::table::pipe_table;
use indexmap::IndexSet;
use serde_json::{Map, Number, Value};

/// Key fragments that mark a currency field
const MONEY_KEYS: &[&str] = &[
    "cost", "price", "amount", "total", "subtotal", "rate", "tax", "fee", "deposit",
];

const MAX_HEADING_LEVEL: usize = 6;

/// Render a structured estimate as markdown
#[must_use]
pub fn estimate_to_markdown(estimate: &Value) -> String {
    let mut out = Vec::new();
    match estimate {
        Value::Object(map) => write_object(&mut out, None, map, 3),
        Value::Array(items) => write_array(&mut out, None, items, 3),
        other => out.push(display_value("", other)),
    }
    out.join("\n").trim().to_string()
}

fn write_object(out: &mut Vec<String>, title: Option<&str>, map: &Map<String, Value>, level: usize) {
    let child_level = match title {
        Some(title) => {
            push_heading(out, title, level);
            (level + 1).min(MAX_HEADING_LEVEL)
        }
        None => level,
    };

    let rows: Vec<Vec<String>> = map
        .iter()
        .filter(|(_, value)| !is_nested(value))
        .map(|(key, value)| vec![humanize(key), display_value(key, value)])
        .collect();
    if !rows.is_empty() {
        out.extend(pipe_table(&["Field".to_string(), "Value".to_string()], &rows));
    }

    for (key, value) in map {
        match value {
            Value::Object(inner) => write_object(out, Some(&humanize(key)), inner, child_level),
            Value::Array(items) if is_nested(value) => {
                write_array(out, Some(&humanize(key)), items, child_level);
            }
            _ => {}
        }
    }
}

fn write_array(out: &mut Vec<String>, title: Option<&str>, items: &[Value], level: usize) {
    if let Some(title) = title {
        push_heading(out, title, level);
    }
    if items.is_empty() {
        return;
    }

    if items.iter().all(Value::is_object) {
        let columns: IndexSet<&str> = items
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|item| item.keys().map(String::as_str))
            .collect();
        let header: Vec<String> = columns.iter().map(|c| humanize(c)).collect();
        let rows: Vec<Vec<String>> = items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| {
                columns
                    .iter()
                    .map(|col| item.get(*col).map(|v| display_value(col, v)).unwrap_or_default())
                    .collect()
            })
            .collect();
        out.extend(pipe_table(&header, &rows));
    } else {
        out.extend(items.iter().map(|item| format!("- {}", display_value("", item))));
    }
}

fn push_heading(out: &mut Vec<String>, title: &str, level: usize) {
    if !out.is_empty() {
        out.push(String::new());
    }
    out.push(format!("{} {title}", "#".repeat(level)));
}

/// Objects, and arrays holding objects or arrays
fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(|v| v.is_object() || v.is_array()),
        _ => false,
    }
}

fn display_value(key: &str, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) if is_money_key(key) => format_money(n),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if !is_nested(value) => items
            .iter()
            .map(|v| display_value(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn is_money_key(key: &str) -> bool {
    let key = key.to_lowercase();
    MONEY_KEYS.iter().any(|m| key.contains(m))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_money(n: &Number) -> String {
    let Some(value) = n.as_f64() else {
        return n.to_string();
    };
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}${whole}"),
        frac => format!("{sign}${whole}.{frac:02}"),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `laborCost` / `labor_cost` → `Labor Cost`
fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
