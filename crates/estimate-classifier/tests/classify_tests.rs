use estimate_classifier::{
    classify, is_estimate_content, Classification, Classifier, ClassifyError, HeuristicConfig,
    Strictness,
};
use estimate_test_utils::{
    error_payload, estimate_prose, markdown_payload, structured_estimate, wrapped_payload,
    NORMALIZED_ESTIMATE, RAW_ESTIMATE,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_end_to_end_markdown_content() {
    let raw = "Total Project Cost\n\nMaterials & Cost Breakdown\n\n1. Timber\t$200";
    let payload = json!({ "markdownContent": raw });

    assert_eq!(classify(&payload), Classification::Markdown(raw.to_string()));

    let normalized = Classifier::default().classify_and_normalize(&payload);
    let text = normalized.as_markdown().unwrap();
    assert!(!text.contains("## 1. Timber"));
    assert!(text.contains("| 1. Timber | $200 |"));
    assert!(!text.contains('\\'));
}

#[test]
fn test_escaped_transport_text() {
    let payload = markdown_payload(r"### Labor Costs\nRole\tRate\nCarpenter\t$65");
    let result = Classifier::default().classify_and_normalize(&payload);
    assert_eq!(
        result.as_markdown(),
        Some("### Labor Costs\n| Role | Rate |\n| --- | --- |\n| Carpenter | $65 |")
    );
}

#[test]
fn test_sample_document() {
    let result = Classifier::default().classify_and_normalize(&wrapped_payload(markdown_payload(RAW_ESTIMATE)));
    assert_eq!(result.as_markdown(), Some(NORMALIZED_ESTIMATE));
}

#[test]
fn test_markdown_payload_uses_content_field() {
    let payload = markdown_payload(RAW_ESTIMATE);
    assert_eq!(
        classify(&payload),
        classify(&json!({ "markdownContent": RAW_ESTIMATE }))
    );
    assert_eq!(classify(&payload).kind(), "markdown");
}

#[test]
fn test_observed_shapes() {
    let cases: Vec<(Value, &str)> = vec![
        (Value::Null, "fallback"),
        (json!({}), "markdown"),
        (json!([]), "markdown"),
        (json!({ "data": { "data": "text" } }), "markdown"),
        (json!({ "data": { "data": "Labor Costs" } }), "markdown"),
        (error_payload("Service unavailable"), "fallback"),
        (json!({ "estimate": structured_estimate() }), "structured_estimate"),
        (json!([{ "type": "text", "text": RAW_ESTIMATE }]), "markdown"),
        (json!({ "textLong": RAW_ESTIMATE }), "markdown"),
    ];
    for (payload, kind) in cases {
        assert_eq!(classify(&payload).kind(), kind, "payload: {payload}");
    }
}

#[test]
fn test_upstream_error_detail() {
    let result = classify(&error_payload("Service unavailable"));
    assert_eq!(
        result,
        Classification::Fallback(ClassifyError::upstream("Service unavailable"))
    );
    assert_eq!(result.detail().as_deref(), Some("Service unavailable"));
}

#[test]
fn test_nested_string_data() {
    let payload = json!({ "data": { "data": "Labor Costs\nCarpenter $900" } });
    assert_eq!(
        classify(&payload).as_markdown(),
        Some("Labor Costs\nCarpenter $900")
    );
}

#[test]
fn test_custom_markers() {
    let classifier = Classifier::new(estimate_classifier::ClassifierConfig {
        heuristic: HeuristicConfig {
            markers: vec!["Quote Summary".to_string()],
            ..HeuristicConfig::default()
        },
        ..Default::default()
    });
    let payload = json!({ "markdownContent": "Quote Summary\nDeck: $900", "estimate": { "total": 900 } });
    assert!(classifier.classify(&payload).is_markdown());
    assert!(classify(&payload).as_estimate().is_some());
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        estimate_prose().prop_map(Value::String),
        "\\PC{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        let keys = prop_oneof![
            Just("error".to_string()),
            Just("markdownContent".to_string()),
            Just("textLong".to_string()),
            Just("textContent".to_string()),
            Just("estimate".to_string()),
            Just("data".to_string()),
            Just("fallbackContent".to_string()),
            Just("type".to_string()),
            Just("text".to_string()),
            "[a-z]{1,6}",
        ];
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((keys, inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_classify_is_total(payload in arb_json()) {
        let result = classify(&payload);
        let kinds = [
            result.as_markdown().is_some(),
            result.as_estimate().is_some(),
            result.as_error().is_some(),
        ];
        prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
    }

    #[test]
    fn prop_classify_and_normalize_is_total(payload in arb_json()) {
        let _ = Classifier::default().classify_and_normalize(&payload);
    }

    #[test]
    fn prop_two_markers_pass_strict(
        prefix in "[a-z ]{0,20}",
        picks in prop::sample::subsequence(HeuristicConfig::default().markers, 2..=4),
        suffix in "[a-z ]{0,20}",
    ) {
        let text = format!("{prefix}{}{suffix}", picks.join("\n"));
        prop_assert!(is_estimate_content(&text, Strictness::Strict));
        prop_assert!(is_estimate_content(&text, Strictness::Lenient));
    }

    #[test]
    fn prop_strict_implies_lenient(text in estimate_prose()) {
        if is_estimate_content(&text, Strictness::Strict) {
            prop_assert!(is_estimate_content(&text, Strictness::Lenient));
        }
    }
}
