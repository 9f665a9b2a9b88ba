//! Page fixtures — build a page from a nested JSON tree.
//!
//! Used by the CLI and by integration tests to describe a page without
//! a browser. Elements default to visible on-screen rects so fixtures
//! only state what differs.

use serde::Deserialize;

use crate::page::{Element, Page};
use crate::types::{ComputedStyle, NodeId, Rect, SelectOption};

/// One node in a fixture tree. Either an element (`tag`) or, when only
/// `text` is present, a text node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureNode {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attrs: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub style: Option<ComputedStyle>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

impl Page {
    /// Build a page whose `<body>` children are the given fixture nodes.
    pub fn from_fixture(nodes: &[FixtureNode]) -> formpilot_core::Result<Self> {
        let mut page = Page::new();
        let body = page.body();
        for node in nodes {
            append_fixture(&mut page, body, node)?;
        }
        Ok(page)
    }

    /// Parse a JSON array of fixture nodes and build the page.
    pub fn from_fixture_json(json: &str) -> formpilot_core::Result<Self> {
        let nodes: Vec<FixtureNode> = serde_json::from_str(json)?;
        Self::from_fixture(&nodes)
    }
}

fn append_fixture(
    page: &mut Page,
    parent: NodeId,
    node: &FixtureNode,
) -> formpilot_core::Result<NodeId> {
    if let Some(tag) = &node.tag {
        let mut element = Element::new(tag);
        element.attrs = node.attrs.clone();
        if let Some(rect) = node.rect {
            element.rect = rect;
        }
        if let Some(style) = &node.style {
            element.style = style.clone();
        }
        if let Some(value) = &node.value {
            element.value = value.clone();
        }
        element.checked = node.checked;
        element.options = node.options.clone();

        let id = page.append_element(parent, element);
        for child in &node.children {
            append_fixture(page, id, child)?;
        }
        Ok(id)
    } else if let Some(text) = &node.text {
        Ok(page.append_text(parent, text))
    } else {
        Err(formpilot_core::Error::Page(
            "fixture node needs a tag or text".into(),
        ))
    }
}
