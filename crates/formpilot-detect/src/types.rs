//! Detected-field record.

use formpilot_dom::NodeId;
use serde::Serialize;

/// A fillable control discovered on the page plus its inferred
/// semantic attributes. Built fresh on every scan and never cached
/// across operations; the page may have changed in between.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedField {
    /// Handle to the originating element.
    #[serde(rename = "elementRef")]
    pub node: NodeId,
    pub tag: String,
    pub control_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub label: String,
    pub current_value: String,
    pub selector: String,
    /// Intrinsic quality of the field's identifying attributes,
    /// independent of any template. Always in `[0, 1]`.
    pub confidence: f64,
}

impl DetectedField {
    /// Best human-readable handle for log lines.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.id.is_empty() {
            &self.id
        } else {
            &self.selector
        }
    }
}
