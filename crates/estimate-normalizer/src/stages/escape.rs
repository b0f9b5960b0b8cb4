//! Transport escape cleanup
//!
//! Text that travelled inside a JSON string often arrives with literal
//! `\n`, `\t`, `\"` and `\\` sequences. Fenced code is left alone so JSON
//! shown inside a code block keeps its own escapes.

use crate::rules::CompiledRules;
use crate::sections::is_fence;

/// Un-escape literal transport sequences and normalise line endings
#[must_use]
pub fn unescape_transport(text: &str, _rules: &CompiledRules) -> String {
    let text = if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    };
    if !text.contains('\\') {
        return text;
    }

    let mut inside_fence = false;
    text.split('\n')
        .map(|line| {
            if is_fence(line) {
                inside_fence = !inside_fence;
                return line.to_string();
            }
            if inside_fence {
                line.to_string()
            } else {
                unescape_line(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('r') => {}
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}
