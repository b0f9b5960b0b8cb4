//! HTML emission

use crate::block::{Block, HeadingStyle, ListMarker, Span, Table, TextStyle};
use crate::error::RenderResult;
use crate::theme::RenderTheme;
use estimate_classifier::ClassifyError;
use std::fmt::Write;

/// Escape text for HTML element content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write styled blocks as an HTML fragment
///
/// # Errors
/// `RenderError::Fmt` if writing to the buffer fails
pub fn to_html(blocks: &[Block], theme: &RenderTheme) -> RenderResult<String> {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list_tag = match block {
            Block::ListItem { marker: ListMarker::Bullet, .. } => Some("ul"),
            Block::ListItem { .. } => Some("ol"),
            _ => None,
        };
        if open_list != list_tag {
            if let Some(tag) = open_list {
                writeln!(out, "</{tag}>")?;
            }
            if let Some(tag) = list_tag {
                writeln!(out, "<{tag}>")?;
            }
            open_list = list_tag;
        }
        write_block(&mut out, block, theme)?;
    }
    if let Some(tag) = open_list {
        writeln!(out, "</{tag}>")?;
    }
    Ok(out)
}

fn write_block(out: &mut String, block: &Block, theme: &RenderTheme) -> RenderResult<()> {
    match block {
        Block::Heading { level, text, style } => {
            let (class, color) = match style {
                HeadingStyle::Section => (
                    &theme.section_heading_class,
                    format!(" style=\"color: {}\"", escape_html(&theme.accent_color)),
                ),
                HeadingStyle::Plain => (&theme.plain_heading_class, String::new()),
            };
            writeln!(
                out,
                "<h{level} class=\"{}\"{color}>{}</h{level}>",
                escape_html(class),
                escape_html(text)
            )?;
        }
        Block::Paragraph { spans, style } => match style {
            TextStyle::TotalMarker => writeln!(
                out,
                "<p class=\"{}\"><strong>{}</strong></p>",
                escape_html(&theme.total_marker_class),
                spans_html(spans, false)
            )?,
            TextStyle::Badge => writeln!(
                out,
                "<p class=\"{}\" style=\"border-left: 3px solid {}\">{}</p>",
                escape_html(&theme.badge_class),
                escape_html(&theme.accent_color),
                spans_html(spans, true)
            )?,
            TextStyle::PlainNumbered => writeln!(
                out,
                "<p class=\"{}\">{}</p>",
                escape_html(&theme.plain_numbered_class),
                spans_html(spans, false)
            )?,
            TextStyle::Body => writeln!(out, "<p>{}</p>", spans_html(spans, true))?,
        },
        Block::ListItem {
            marker,
            depth,
            spans,
            style,
        } => {
            let indent = if *depth > 0 {
                format!(" style=\"margin-left: {}em\"", depth * 2)
            } else {
                String::new()
            };
            match (marker, style) {
                (ListMarker::Number(n), TextStyle::Badge) => writeln!(
                    out,
                    "<li{indent}><span class=\"{}\" style=\"background: {}\">{n}</span> {}</li>",
                    escape_html(&theme.badge_class),
                    escape_html(&theme.accent_color),
                    spans_html(spans, true)
                )?,
                (ListMarker::Number(n), _) => writeln!(
                    out,
                    "<li{indent} class=\"{}\">{n}. {}</li>",
                    escape_html(&theme.plain_numbered_class),
                    spans_html(spans, false)
                )?,
                (ListMarker::Bullet, _) => {
                    writeln!(out, "<li{indent}>{}</li>", spans_html(spans, true))?;
                }
            }
        }
        Block::Table(table) => write_table(out, table, theme)?,
        Block::CodeBlock { language, code } => {
            let class = language
                .as_deref()
                .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
                .unwrap_or_default();
            writeln!(out, "<pre><code{class}>{}</code></pre>", escape_html(code))?;
        }
        Block::Rule => writeln!(out, "<hr>")?,
    }
    Ok(())
}

fn write_table(out: &mut String, table: &Table, theme: &RenderTheme) -> RenderResult<()> {
    let align = |col: usize| {
        if theme.align_amounts_right && table.amount_columns.get(col).copied().unwrap_or(false) {
            " style=\"text-align: right\""
        } else {
            ""
        }
    };

    writeln!(out, "<table class=\"{}\">", escape_html(&theme.table_class))?;
    if !table.header.is_empty() {
        out.push_str("<thead><tr>");
        for (col, cell) in table.header.iter().enumerate() {
            write!(out, "<th{}>{}</th>", align(col), escape_html(cell))?;
        }
        out.push_str("</tr></thead>\n");
    }
    out.push_str("<tbody>\n");
    for row in &table.rows {
        if row.total {
            write!(out, "<tr class=\"{}\">", escape_html(&theme.total_row_class))?;
        } else {
            out.push_str("<tr>");
        }
        for (col, cell) in row.cells.iter().enumerate() {
            write!(out, "<td{}>{}</td>", align(col), spans_html(cell, true))?;
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    Ok(())
}

/// Inline HTML for a span run; `keep_bold` false drops bold markup
fn spans_html(spans: &[Span], keep_bold: bool) -> String {
    spans
        .iter()
        .map(|span| {
            let mut html = escape_html(&span.text).replace('\n', "<br>");
            if span.code {
                html = format!("<code>{html}</code>");
            }
            if span.emphasis {
                html = format!("<em>{html}</em>");
            }
            if span.strong && keep_bold {
                html = format!("<strong>{html}</strong>");
            }
            html
        })
        .collect()
}

/// The "estimate couldn't be generated" card with retry and back actions
///
/// # Errors
/// `RenderError::Fmt` if writing to the buffer fails
pub fn fallback_html(error: &ClassifyError, theme: &RenderTheme) -> RenderResult<String> {
    let mut out = String::new();
    writeln!(out, "<div class=\"estimate-fallback\" data-reason=\"{}\">", error.kind())?;
    writeln!(out, "<h3>{}</h3>", escape_html(&theme.fallback_title))?;
    writeln!(out, "<p>{}</p>", escape_html(&error.to_string()))?;
    writeln!(out, "<div class=\"actions\">")?;
    writeln!(
        out,
        "<button type=\"button\" data-action=\"retry\">{}</button>",
        escape_html(&theme.retry_label)
    )?;
    writeln!(
        out,
        "<button type=\"button\" data-action=\"back\">{}</button>",
        escape_html(&theme.back_label)
    )?;
    writeln!(out, "</div>\n</div>")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TableRow;
    use pretty_assertions::assert_eq;

    fn theme() -> RenderTheme {
        RenderTheme::default()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_heading_styles() {
        let html = to_html(
            &[
                Block::Heading {
                    level: 3,
                    text: "Labor Costs".into(),
                    style: HeadingStyle::Section,
                },
                Block::Heading {
                    level: 3,
                    text: "Notes and Terms".into(),
                    style: HeadingStyle::Plain,
                },
            ],
            &theme(),
        )
        .unwrap();
        assert_eq!(
            html,
            "<h3 class=\"section-header\" style=\"color: #1d4ed8\">Labor Costs</h3>\n\
             <h3 class=\"plain-heading\">Notes and Terms</h3>\n"
        );
    }

    #[test]
    fn test_list_grouping() {
        let item = |marker, style| Block::ListItem {
            marker,
            depth: 0,
            spans: vec![Span::strong("Deposit")],
            style,
        };
        let html = to_html(
            &[
                item(ListMarker::Number(1), TextStyle::Badge),
                item(ListMarker::Number(1), TextStyle::PlainNumbered),
                item(ListMarker::Bullet, TextStyle::Body),
            ],
            &theme(),
        )
        .unwrap();
        assert_eq!(
            html,
            "<ol>\n\
             <li><span class=\"number-badge\" style=\"background: #1d4ed8\">1</span> <strong>Deposit</strong></li>\n\
             <li class=\"plain-numbered\">1. Deposit</li>\n\
             </ol>\n<ul>\n\
             <li><strong>Deposit</strong></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_table_html() {
        let table = Table {
            header: vec!["Description".into(), "Amount".into()],
            rows: vec![TableRow {
                cells: vec![vec![Span::strong("TOTAL")], vec![Span::strong("$5")]],
                total: true,
            }],
            amount_columns: vec![false, true],
        };
        let html = to_html(&[Block::Table(table)], &theme()).unwrap();
        assert!(html.contains("<th style=\"text-align: right\">Amount</th>"));
        assert!(html.contains("<tr class=\"total-row\"><td><strong>TOTAL</strong></td>"));
    }

    #[test]
    fn test_fallback_card() {
        let html = fallback_html(&ClassifyError::upstream("<timeout>"), &theme()).unwrap();
        assert!(html.contains("Sorry, the estimate couldn&#39;t be generated"));
        assert!(html.contains("<p>&lt;timeout&gt;</p>"));
        assert!(html.contains("data-action=\"retry\">Try again</button>"));
        assert!(html.contains("data-action=\"back\">Go back</button>"));
        assert!(html.contains("data-reason=\"upstream_error\""));
    }
}
