//! Testing utilities for the estimate workspace
//!
//! Shared sample documents, response payloads and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use serde_json::{json, Value};

/// A loosely formatted estimate as a model typically returns it.
pub const RAW_ESTIMATE: &str = "# Project Cost Estimate

1. Project Overview
Rear deck replacement for a single storey home.

Scope of Work
Remove existing deck
Install new footings
Build composite deck

2. Materials & Cost Breakdown
Item\tQty\tCost
Composite boards\t40\t$2,400
Footings\t8\t$640

Labor Costs
Carpenter\t32 hrs\t$2,080

Total Project Cost
Materials: $3,040
Labor: $2,080
Total Project Cost: $5,120

Notes & Terms
1. Payment due on completion
2. Quote valid for 30 days

Thank you for the opportunity to quote on your project.";

/// [`RAW_ESTIMATE`] after the default pipeline.
pub const NORMALIZED_ESTIMATE: &str = "## 1. Project Overview
Rear deck replacement for a single storey home.

### Scope of Work
- Remove existing deck
- Install new footings
- Build composite deck

## 2. Materials & Cost Breakdown
| Item | Qty | Cost |
| --- | --- | --- |
| Composite boards | 40 | $2,400 |
| Footings | 8 | $640 |

### Labor Costs
| Item | Details | Cost |
| --- | --- | --- |
| Carpenter | 32 hrs | $2,080 |

### Total Project Cost

| Description | Amount |
| --- | --- |
| Materials | $3,040 |
| Labor | $2,080 |
| **TOTAL PROJECT COST** | **$5,120** |

### Notes and Terms
1. Payment due on completion
2. Quote valid for 30 days

### Thank You
Thank you for the opportunity to quote on your project.";

/// Markdown that is already in canonical form.
pub const CANONICAL_ESTIMATE: &str = "### Materials & Cost Breakdown
| Item | Cost |
| --- | --- |
| Timber | $200 |

### Total Project Cost

**TOTAL PROJECT COST: $200**";

/// Building blocks for generated documents, joined by blank lines.
pub const DOCUMENT_BLOCKS: &[&str] = &[
    "### Project Overview\nA two storey extension to the rear of the house.",
    "Scope of Work\nDemolish existing deck\nFrame new extension",
    "## 2. Materials & Cost Breakdown\nItem\tQty\tCost\nTimber\t20\t$200\nNails\t1\t$15",
    "### Total Project Cost\nMaterials: $500\nLabor: $300\nTotal Project Cost: $800",
    "### Notes & Terms\n1. Payment due on completion\n2. Prices valid for 30 days",
    "Thank you for choosing us.",
    "| Item | Cost |\n| --- | --- |\n| Paint | $40 |",
    "- Site cleanup\n- Waste removal",
    "1. Project Timeline\nWork starts in March.",
    "Labor Costs\nCarpenter\t$900",
];

/// Documents assembled from [`DOCUMENT_BLOCKS`].
pub fn estimate_document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(DOCUMENT_BLOCKS), 0..8)
        .prop_map(|blocks| blocks.join("\n\n"))
}

/// Single lines that exercise section detection, table synthesis and the
/// closing and notes rules. `""` yields blank separators.
pub const DOCUMENT_LINES: &[&str] = &[
    "",
    "# Project Cost Estimate",
    "Project Overview",
    "Scope of Work",
    "Labor Costs",
    "Total Project Cost",
    "Notes & Terms",
    "1. Project Overview",
    "2. Materials & Cost Breakdown",
    "## 3. Notes & Terms",
    "### Notes and Terms",
    "### Scope of Work",
    "Item\tCost",
    "Timber\t$200",
    "Carpenter\t32\t$65",
    "Materials: $500",
    "Total Project Cost: $800",
    "1. Payment due on completion",
    "SECTION 2: Deposit of 30% required",
    "Thank you for your business.",
    "We look forward to working with you.",
    "- Site cleanup",
    "| Paint | $40 |",
    "Demolish existing deck",
];

/// Documents built line by line from [`DOCUMENT_LINES`], with single or
/// blank-line separators.
pub fn estimate_lines() -> impl Strategy<Value = String> {
    prop::collection::vec((prop::sample::select(DOCUMENT_LINES), any::<bool>()), 0..16).prop_map(
        |lines| {
            let mut doc = String::new();
            for (i, (line, blank)) in lines.into_iter().enumerate() {
                if i > 0 {
                    doc.push_str(if blank { "\n\n" } else { "\n" });
                }
                doc.push_str(line);
            }
            doc
        },
    )
}

/// Free text drawn from estimate-like vocabulary.
pub fn estimate_prose() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("Total Project Cost".to_string()),
            Just("Labor Costs".to_string()),
            Just("| a | b |\n| --- | --- |".to_string()),
            Just("\n".to_string()),
            "[a-zA-Z ]{0,12}",
        ],
        0..10,
    )
    .prop_map(|parts| parts.join(" "))
}

pub fn markdown_payload(text: &str) -> Value {
    json!({ "markdownContent": text })
}

pub fn wrapped_payload(inner: Value) -> Value {
    json!({ "success": true, "data": inner })
}

pub fn error_payload(message: &str) -> Value {
    json!({ "success": false, "error": message })
}

pub fn structured_estimate() -> Value {
    json!({
        "project": "Rear deck",
        "total": 5120,
        "materials": [
            { "item": "Composite boards", "qty": 40, "cost": 2400 },
            { "item": "Footings", "qty": 8, "cost": 640, "note": "concrete" }
        ],
        "contact": { "name": "Sam", "phone": "555-0101" }
    })
}
