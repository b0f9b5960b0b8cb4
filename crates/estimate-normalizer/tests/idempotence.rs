use estimate_normalizer::normalize;
use estimate_test_utils::{estimate_document, estimate_lines};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn boundary_moving_documents_are_idempotent() {
    for doc in [
        "1. Project Overview\n## 3. Notes & Terms",
        "Notes & Terms\nThank you for your business.\n1. Project Overview",
        "Scope of Work\nMaterials: $500\n\nThank you for your business.\nItem\tCost",
    ] {
        let once = normalize(doc);
        assert_eq!(normalize(&once), once, "input: {doc:?}");
    }
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(doc in estimate_document()) {
        let once = normalize(&doc);
        let twice = normalize(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_line_documents_are_idempotent(doc in estimate_lines()) {
        let once = normalize(&doc);
        let twice = normalize(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_output_is_trimmed(doc in estimate_lines()) {
        let out = normalize(&doc);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn prop_never_panics(text in "\\PC*") {
        let _ = normalize(&text);
    }

    #[test]
    fn prop_tables_stay_tables(doc in estimate_document()) {
        let out = normalize(&doc);
        if doc.contains("| Paint | $40 |") {
            prop_assert!(out.contains("| Paint | $40 |"));
        }
    }
}
