//! Page model types — geometry, computed style, options, events.

use serde::{Deserialize, Serialize};

/// Handle to a node in a [`crate::Page`] arena.
pub type NodeId = usize;

/// Bounding rect of a rendered element, viewport-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    /// Euclidean distance between the top-left corners of two rects.
    pub fn distance_to(&self, other: &Rect) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Rect {
    /// A small on-screen rect, so elements are visible unless a test
    /// says otherwise.
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 120.0,
            height: 24.0,
        }
    }
}

/// Subset of computed style the visibility filter inspects.
///
/// Values are kept as strings to mirror `getComputedStyle` output;
/// `opacity` in particular is compared literally against `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "block".into(),
            visibility: "visible".into(),
            opacity: "1".into(),
        }
    }
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self {
            display: "none".into(),
            ..Self::default()
        }
    }
}

/// One `<option>` inside a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Synthetic DOM event kinds the filler dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Input,
    Change,
    Blur,
}

/// One dispatched event, recorded in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}

/// Counts from a quick page survey (forms and fillable controls).
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageSurvey {
    pub forms: usize,
    pub controls: usize,
}
