//! Arena-backed page tree with element state, text nodes, and an event log.

use std::collections::BTreeMap;

use crate::types::*;

/// An element node's tag, attributes, control state, and rendering info.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub style: ComputedStyle,
    pub rect: Rect,
    /// Current control value (inputs, textareas, selects).
    pub value: String,
    /// Checked state (checkboxes, radios).
    pub checked: bool,
    /// Options (selects only).
    pub options: Vec<SelectOption>,
    /// Inline style overrides written by annotations.
    pub inline_styles: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attrs: BTreeMap::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            value: String::new(),
            checked: false,
            options: Vec::new(),
            inline_styles: BTreeMap::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(x, y, width, height);
        self
    }

    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn option(mut self, value: impl Into<String>, text: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, text));
        self
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
    detached: bool,
}

/// In-memory page model.
///
/// Thin stand-in for the live DOM: the scanner reads it, the filler
/// mutates it, and dispatched events land in an ordered log where a
/// host-page framework (or a test) can observe them. Node handles are
/// arena indices and stay valid for the page's lifetime; removal only
/// detaches a subtree from traversal.
#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<Node>,
    body: NodeId,
    events: Vec<DomEvent>,
    focused: Option<NodeId>,
}

impl Page {
    /// Create an empty page containing only a `<body>`.
    pub fn new() -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(Element::new("body")),
            detached: false,
        };
        Self {
            nodes: vec![body],
            body: 0,
            events: Vec::new(),
            focused: None,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---------------------------------------------------------------
    // Tree construction
    // ---------------------------------------------------------------

    /// Append an element under `parent`, returning its handle.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data: NodeData::Element(element),
            detached: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data: NodeData::Text(text.into()),
            detached: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Detach a subtree from traversal. The handle stays valid.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&c| c != id);
        }
        self.nodes[id].detached = true;
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id)?.data {
            NodeData::Element(ref e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id)?.data {
            NodeData::Element(ref mut e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    /// Element tag name, or `""` for text nodes.
    pub fn tag(&self, id: NodeId) -> &str {
        self.element(id).map(|e| e.tag.as_str()).unwrap_or("")
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Raw text of a text node, if `id` is one.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id)?.data {
            NodeData::Text(ref t) => Some(t.as_str()),
            NodeData::Element(_) => None,
        }
    }

    /// Concatenated descendant text, like the DOM's `textContent`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(_) => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// All attached element nodes, pre-order (document encounter order).
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.body, &mut |page, id| {
            if page.element(id).is_some() {
                out.push(id);
            }
        });
        out
    }

    /// All attached text nodes, pre-order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.body, &mut |page, id| {
            if page.text(id).is_some() {
                out.push(id);
            }
        });
        out
    }

    /// Attached descendants of `id`, pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &child in self.children(id) {
            self.walk(child, &mut |_, n| out.push(n));
        }
        out
    }

    fn walk(&self, id: NodeId, f: &mut impl FnMut(&Page, NodeId)) {
        if self.nodes[id].detached {
            return;
        }
        f(self, id);
        for &child in &self.nodes[id].children {
            self.walk(child, f);
        }
    }

    /// Position of `id` among its parent's element children.
    pub fn sibling_index(&self, id: NodeId) -> usize {
        let Some(parent) = self.parent(id) else {
            return 0;
        };
        self.children(parent)
            .iter()
            .filter(|&&c| self.element(c).is_some())
            .position(|&c| c == id)
            .unwrap_or(0)
    }

    // ---------------------------------------------------------------
    // Control state
    // ---------------------------------------------------------------

    pub fn value(&self, id: NodeId) -> &str {
        self.element(id).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.value = value.to_string();
        }
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.element(id).map(|e| e.checked).unwrap_or(false)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(e) = self.element_mut(id) {
            e.checked = checked;
        }
    }

    pub fn options(&self, id: NodeId) -> &[SelectOption] {
        self.element(id)
            .map(|e| e.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn add_option(&mut self, id: NodeId, value: &str, text: &str) {
        if let Some(e) = self.element_mut(id) {
            e.options.push(SelectOption::new(value, text));
        }
    }

    /// Assign a select's value. Takes effect only when an option with
    /// that exact value exists, mirroring `select.value = x`.
    pub fn set_select_value(&mut self, id: NodeId, value: &str) -> bool {
        let Some(e) = self.element_mut(id) else {
            return false;
        };
        if e.options.iter().any(|o| o.value == value) {
            e.value = value.to_string();
            true
        } else {
            false
        }
    }

    // ---------------------------------------------------------------
    // Rendering info
    // ---------------------------------------------------------------

    pub fn computed_style(&self, id: NodeId) -> ComputedStyle {
        self.element(id)
            .map(|e| e.style.clone())
            .unwrap_or_default()
    }

    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        self.element(id).map(|e| e.rect).unwrap_or(Rect::new(
            0.0, 0.0, 0.0, 0.0,
        ))
    }

    pub fn set_inline_style(&mut self, id: NodeId, prop: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.inline_styles.insert(prop.to_string(), value.to_string());
        }
    }

    pub fn clear_inline_style(&mut self, id: NodeId, prop: &str) {
        if let Some(e) = self.element_mut(id) {
            e.inline_styles.remove(prop);
        }
    }

    pub fn inline_style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.element(id)?.inline_styles.get(prop).map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------

    /// Move focus to an element and record the focus event.
    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
        self.dispatch(id, EventKind::Focus);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Record a bubbling synthetic event against `id`.
    pub fn dispatch(&mut self, id: NodeId, kind: EventKind) {
        self.events.push(DomEvent {
            target: id,
            kind,
            bubbles: true,
        });
    }

    /// Full event log, in dispatch order.
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Events dispatched against one node, in order.
    pub fn events_for(&self, id: NodeId) -> Vec<EventKind> {
        self.events
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.kind)
            .collect()
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// All radios sharing a `name`, in document order.
    pub fn radio_group(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&id| {
                self.tag(id) == "input"
                    && self.attr(id, "type") == Some("radio")
                    && self.attr(id, "name") == Some(name)
            })
            .collect()
    }

    /// Count forms and fillable controls on the page.
    pub fn survey(&self) -> PageSurvey {
        let mut survey = PageSurvey::default();
        for id in self.elements() {
            match self.tag(id) {
                "form" => survey.forms += 1,
                "input" | "select" | "textarea" => survey.controls += 1,
                _ => {}
            }
        }
        survey
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
