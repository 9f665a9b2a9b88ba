//! Field scanner — enumerates fillable controls on a page.

use std::collections::HashSet;

use formpilot_dom::{is_visible, NodeId, Page};
use tracing::debug;

use crate::analyzer::analyze;
use crate::types::DetectedField;

/// Input types scanned explicitly, in scan order.
const EXPLICIT_INPUT_TYPES: &[&str] = &[
    "text",
    "email",
    "password",
    "number",
    "tel",
    "url",
    "checkbox",
    "radio",
    "date",
    "time",
    "datetime-local",
    "file",
    "color",
    "range",
    "search",
];

/// Scan the page for fillable controls.
///
/// Walks the explicit input-type list, then typeless inputs, textareas
/// and selects, then makes a second pass over every input/select/
/// textarea to catch anything the explicit list missed. Candidates are
/// deduplicated by element identity and filtered through the
/// visibility filter. No side effects on the page.
pub fn scan(page: &Page) -> Vec<DetectedField> {
    let all = page.elements();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut fields: Vec<DetectedField> = Vec::new();

    let consider = |id: NodeId, fields: &mut Vec<DetectedField>, seen: &mut HashSet<NodeId>| {
        if !seen.insert(id) {
            return;
        }
        if !is_visible(page, id) {
            return;
        }
        fields.push(analyze(page, id));
    };

    for &input_type in EXPLICIT_INPUT_TYPES {
        for &id in &all {
            if page.tag(id) == "input" && page.attr(id, "type") == Some(input_type) {
                consider(id, &mut fields, &mut seen);
            }
        }
    }

    // Typeless inputs (no declared type attribute)
    for &id in &all {
        if page.tag(id) == "input" && page.attr(id, "type").map_or(true, str::is_empty) {
            consider(id, &mut fields, &mut seen);
        }
    }

    for wanted in ["textarea", "select"] {
        for &id in &all {
            if page.tag(id) == wanted {
                consider(id, &mut fields, &mut seen);
            }
        }
    }

    // Defensive second pass: anything the explicit list missed
    // (unknown or future input types).
    for &id in &all {
        if matches!(page.tag(id), "input" | "select" | "textarea") {
            consider(id, &mut fields, &mut seen);
        }
    }

    debug!(count = fields.len(), "scan complete");
    fields
}
