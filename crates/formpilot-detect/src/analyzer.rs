//! Field analysis — builds a [`DetectedField`] per candidate control.

use formpilot_dom::{generate_selector, NodeId, Page};
use tracing::debug;

use crate::label::resolve_label;
use crate::types::DetectedField;

/// Analyze one control element into a detected-field record.
pub fn analyze(page: &Page, node: NodeId) -> DetectedField {
    let tag = page.tag(node).to_string();
    let control_type = match tag.as_str() {
        "select" => "select".to_string(),
        "textarea" => "textarea".to_string(),
        _ => page
            .attr(node, "type")
            .filter(|t| !t.is_empty())
            .unwrap_or("text")
            .to_lowercase(),
    };

    let mut field = DetectedField {
        node,
        tag,
        control_type,
        name: page.attr(node, "name").unwrap_or("").to_string(),
        id: page.attr(node, "id").unwrap_or("").to_string(),
        placeholder: page.attr(node, "placeholder").unwrap_or("").to_string(),
        label: resolve_label(page, node),
        current_value: page.value(node).to_string(),
        selector: generate_selector(page, node),
        confidence: 0.0,
    };
    field.confidence = field_confidence(&field);

    debug!(
        name = %field.display_name(),
        control_type = %field.control_type,
        label = %field.label,
        confidence = field.confidence,
        "field analyzed"
    );

    field
}

/// Intrinsic confidence of a detected field's identifying attributes.
///
/// Additive weights, clamped at 1.0. The raw sum can reach 1.2, so
/// high-signal fields cluster at exactly 1.0; that clamp-only behavior
/// is deliberate (see DESIGN.md).
pub fn field_confidence(field: &DetectedField) -> f64 {
    let mut confidence: f64 = 0.0;

    if !field.name.is_empty() {
        confidence += 0.3;
    }
    if !field.id.is_empty() {
        confidence += 0.2;
    }
    if !field.placeholder.is_empty() {
        confidence += 0.2;
    }
    if !field.label.is_empty() {
        confidence += 0.3;
    }
    if field.control_type != "text" {
        confidence += 0.1;
    }
    if field.selector.contains('#') {
        confidence += 0.1;
    }

    confidence.min(1.0)
}
