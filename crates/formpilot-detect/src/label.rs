//! Label resolution — prioritized chain of lookup strategies.

use formpilot_dom::{NodeId, Page};
use tracing::debug;

/// How far (px, Euclidean) a text node's parent may sit from an
/// element and still be treated as its label.
pub const NEARBY_TEXT_MAX_DISTANCE: f64 = 100.0;

/// Longest text accepted from a nearby heading/paragraph/span/div.
pub const NEARBY_ELEMENT_MAX_LEN: usize = 100;

const NEARBY_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "div"];

/// Resolve the best human-readable label for a control.
///
/// Strategies, first non-empty result wins:
/// 1. `label[for=<element id>]` text.
/// 2. Nearest ancestor `<label>`.
/// 3. Nearest text node on the page within 100px of the element.
/// 4. First heading/paragraph/span/div under the element's parent,
///    excluding the element itself, with text under 100 chars.
pub fn resolve_label(page: &Page, id: NodeId) -> String {
    if let Some(label) = label_for(page, id) {
        debug!(node = id, label = %label, "label found via for attribute");
        return label;
    }
    if let Some(label) = ancestor_label(page, id) {
        debug!(node = id, label = %label, "label found via ancestor");
        return label;
    }
    if let Some(label) = nearest_text(page, id) {
        debug!(node = id, label = %label, "label found via nearby text");
        return label;
    }
    if let Some(label) = nearby_element_text(page, id) {
        debug!(node = id, label = %label, "label found via nearby element");
        return label;
    }
    String::new()
}

fn label_for(page: &Page, id: NodeId) -> Option<String> {
    let elem_id = page.attr(id, "id").filter(|v| !v.is_empty())?;
    let label = page
        .elements()
        .into_iter()
        .find(|&n| page.tag(n) == "label" && page.attr(n, "for") == Some(elem_id))?;
    non_empty(page.text_content(label))
}

fn ancestor_label(page: &Page, id: NodeId) -> Option<String> {
    let mut current = page.parent(id);
    while let Some(node) = current {
        if page.tag(node) == "body" {
            break;
        }
        if page.tag(node) == "label" {
            return non_empty(page.text_content(node));
        }
        current = page.parent(node);
    }
    None
}

/// Nearest non-empty text node by Euclidean distance between the
/// element's rect and the text node's parent rect.
fn nearest_text(page: &Page, id: NodeId) -> Option<String> {
    let rect = page.bounding_rect(id);
    let mut closest: Option<(f64, String)> = None;

    for text_node in page.text_nodes() {
        let Some(text) = page.text(text_node).map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(parent) = page.parent(text_node) else {
            continue;
        };
        let distance = rect.distance_to(&page.bounding_rect(parent));
        if distance >= NEARBY_TEXT_MAX_DISTANCE {
            continue;
        }
        if closest.as_ref().map_or(true, |(best, _)| distance < *best) {
            closest = Some((distance, text.to_string()));
        }
    }

    closest.map(|(_, text)| text)
}

fn nearby_element_text(page: &Page, id: NodeId) -> Option<String> {
    let parent = page.parent(id)?;
    for candidate in page.descendants(parent) {
        if candidate == id || !NEARBY_TAGS.contains(&page.tag(candidate)) {
            continue;
        }
        let text = page.text_content(candidate);
        let text = text.trim();
        if !text.is_empty() && text.chars().count() < NEARBY_ELEMENT_MAX_LEN {
            return Some(text.to_string());
        }
    }
    None
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
