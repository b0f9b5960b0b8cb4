use estimate_classifier::{Classification, Classifier, ClassifyError};
use estimate_normalizer::normalize;
use estimate_render::{render, Block, HeadingStyle, ListMarker, Renderer, RenderTheme, TextStyle};
use estimate_test_utils::{error_payload, structured_estimate, NORMALIZED_ESTIMATE};
use pretty_assertions::assert_eq;
use serde_json::json;

fn numbered_styles(blocks: &[Block]) -> Vec<TextStyle> {
    blocks
        .iter()
        .filter_map(|b| match b {
            Block::ListItem {
                marker: ListMarker::Number(_),
                style,
                ..
            } => Some(*style),
            _ => None,
        })
        .collect()
}

#[test]
fn test_notes_exception() {
    let notes = normalize("### Notes & Terms\n1. Payment due on completion\n### Thank You");
    assert_eq!(numbered_styles(&render(&notes)), vec![TextStyle::PlainNumbered]);

    let other = render("### Labor Costs\n1. Payment due on completion\n### Thank You");
    assert_eq!(numbered_styles(&other), vec![TextStyle::Badge]);
}

#[test]
fn test_notes_heading_is_plain() {
    let blocks = render(&normalize("## 5. **Notes & Terms**\n1. Deposit of 30%"));
    assert_eq!(
        blocks[0],
        Block::Heading {
            level: 3,
            text: "Notes and Terms".to_string(),
            style: HeadingStyle::Plain,
        }
    );
}

#[test]
fn test_full_document_styles() {
    let blocks = render(NORMALIZED_ESTIMATE);
    let headings: Vec<_> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { text, style, .. } => Some((text.as_str(), *style)),
            _ => None,
        })
        .collect();
    assert_eq!(
        headings,
        vec![
            ("1. Project Overview", HeadingStyle::Section),
            ("Scope of Work", HeadingStyle::Section),
            ("2. Materials & Cost Breakdown", HeadingStyle::Section),
            ("Labor Costs", HeadingStyle::Section),
            ("Total Project Cost", HeadingStyle::Section),
            ("Notes and Terms", HeadingStyle::Plain),
            ("Thank You", HeadingStyle::Section),
        ]
    );
    assert_eq!(
        numbered_styles(&blocks),
        vec![TextStyle::PlainNumbered, TextStyle::PlainNumbered]
    );

    let tables: Vec<_> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(tables.len(), 3);
    assert!(tables[2].rows.last().is_some_and(|r| r.total));
    assert_eq!(tables[2].amount_columns, vec![false, true]);
}

#[test]
fn test_html_output() {
    let html = Renderer::default().render_html(NORMALIZED_ESTIMATE).unwrap();
    assert!(html.contains("<h3 class=\"plain-heading\">Notes and Terms</h3>"));
    assert!(html.contains("<li class=\"plain-numbered\">1. Payment due on completion</li>"));
    assert!(html.contains("<tr class=\"total-row\">"));
    assert!(html.contains("<li>Remove existing deck</li>"));
}

#[test]
fn test_render_classifications() {
    let renderer = Renderer::new(RenderTheme {
        retry_label: "Retry".to_string(),
        ..RenderTheme::default()
    });
    let classifier = Classifier::default();

    let fallback = classifier.classify_and_normalize(&error_payload("Quota exceeded"));
    let html = renderer.render_classification(&fallback).unwrap();
    assert!(html.contains("<p>Quota exceeded</p>"));
    assert!(html.contains(">Retry</button>"));

    let structured = classifier.classify_and_normalize(&json!({ "estimate": structured_estimate() }));
    let html = renderer.render_classification(&structured).unwrap();
    assert!(html.contains("<h3 class=\"section-header\""));
    assert!(html.contains("<td>Composite boards</td>"));

    let empty = Classification::Fallback(ClassifyError::EmptyInput);
    assert!(renderer.markdown_for(&empty).is_none());
}

#[test]
fn test_blocks_serialize() {
    let blocks = render("### Labor Costs\n1. Carpenter");
    let json = serde_json::to_value(&blocks).unwrap();
    assert_eq!(json[0]["type"], "heading");
    assert_eq!(json[1]["style"], "badge");
}
