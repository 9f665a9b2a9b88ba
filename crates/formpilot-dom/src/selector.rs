//! Selector generation and matching.
//!
//! Supports exactly the grammar the analyzer emits: `#id`,
//! `[name="..."]`, and `tag(.class)*(:nth-child(n))?`. Generation
//! prefers the strongest identifier available and falls back to a
//! structural selector only when neither id nor name exists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::page::Page;
use crate::types::NodeId;

static STRUCTURAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z][a-z0-9-]*)((?:\.[^.:\s]+)*)(?::nth-child\((\d+)\))?$")
        .expect("structural selector regex")
});

static NAME_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[name="?([^"\]]*)"?\]$"#).expect("name selector regex")
});

/// Generate a selector for an element.
///
/// Priority: `#id`, then `[name="..."]`, then tag plus classes with an
/// `:nth-child` suffix added only when the element has no unique
/// identifier and is not the first of its siblings.
pub fn generate_selector(page: &Page, id: NodeId) -> String {
    if let Some(elem_id) = non_empty(page.attr(id, "id")) {
        return format!("#{elem_id}");
    }
    if let Some(name) = non_empty(page.attr(id, "name")) {
        return format!("[name=\"{name}\"]");
    }

    let mut selector = page.tag(id).to_string();
    if let Some(class) = non_empty(page.attr(id, "class")) {
        for cls in class.split_whitespace() {
            selector.push('.');
            selector.push_str(cls);
        }
    }

    let index = page.sibling_index(id);
    if index > 0 {
        selector.push_str(&format!(":nth-child({})", index + 1));
    }

    selector
}

/// First element matching `selector`, in document order.
pub fn query_selector(page: &Page, selector: &str) -> Option<NodeId> {
    page.elements()
        .into_iter()
        .find(|&id| matches(page, id, selector))
}

/// All elements matching `selector`, in document order.
pub fn query_selector_all(page: &Page, selector: &str) -> Vec<NodeId> {
    page.elements()
        .into_iter()
        .filter(|&id| matches(page, id, selector))
        .collect()
}

/// Whether one element matches a selector from the supported grammar.
pub fn matches(page: &Page, id: NodeId, selector: &str) -> bool {
    if let Some(wanted) = selector.strip_prefix('#') {
        return page.attr(id, "id") == Some(wanted);
    }

    if let Some(caps) = NAME_ATTR.captures(selector) {
        return page.attr(id, "name") == Some(&caps[1]);
    }

    let Some(caps) = STRUCTURAL.captures(selector) else {
        return false;
    };

    if page.tag(id) != &caps[1] {
        return false;
    }

    let classes = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    if !classes.is_empty() {
        let own: Vec<&str> = page
            .attr(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        for wanted in classes.split('.').filter(|c| !c.is_empty()) {
            if !own.contains(&wanted) {
                return false;
            }
        }
    }

    if let Some(n) = caps.get(3) {
        let n: usize = n.as_str().parse().unwrap_or(0);
        if page.sibling_index(id) + 1 != n {
            return false;
        }
    }

    true
}

fn non_empty(attr: Option<&str>) -> Option<&str> {
    attr.filter(|v| !v.is_empty())
}
