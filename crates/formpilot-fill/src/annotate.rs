//! Visual feedback for filled fields.
//!
//! Best-effort cosmetics: green styling on the field, a floating
//! tooltip above it, and a page-level banner after the fill. Nothing
//! here returns an error; a page that rejects the annotation still got
//! its values.

use formpilot_dom::{Element, NodeId, Page};
use tracing::debug;
use uuid::Uuid;

const FILLED_BORDER_COLOR: &str = "#4CAF50";
const FILLED_BACKGROUND: &str = "#f0f9ff";
const TOOLTIP_TEXT: &str = "✅ Preenchido";
const TOOLTIP_OFFSET_PX: f64 = 30.0;

/// Marks filled fields and posts the success banner.
pub struct FeedbackAnnotator;

impl FeedbackAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Highlight a filled field and float a tooltip above it.
    ///
    /// Returns the tooltip's node so the caller can clear it later.
    pub fn mark_filled(&self, page: &mut Page, node: NodeId) -> NodeId {
        page.set_inline_style(node, "borderColor", FILLED_BORDER_COLOR);
        page.set_inline_style(node, "backgroundColor", FILLED_BACKGROUND);
        page.set_inline_style(node, "borderWidth", "2px");

        let rect = page.bounding_rect(node);
        let marker = format!("formpilot-tip-{}", Uuid::new_v4());
        let tooltip = page.append_element(
            page.body(),
            Element::new("div").attr("id", marker.clone()),
        );
        page.append_text(tooltip, TOOLTIP_TEXT);
        page.set_inline_style(tooltip, "position", "absolute");
        page.set_inline_style(tooltip, "left", &format!("{}px", rect.left()));
        page.set_inline_style(
            tooltip,
            "top",
            &format!("{}px", rect.top() - TOOLTIP_OFFSET_PX),
        );
        page.set_inline_style(tooltip, "background", FILLED_BORDER_COLOR);
        page.set_inline_style(tooltip, "color", "white");

        debug!(node, marker = %marker, "field marked as filled");
        tooltip
    }

    /// Undo [`mark_filled`](Self::mark_filled): restore the field's
    /// styling and detach its tooltip.
    ///
    /// The engine never clears marks on its own; the host embedding
    /// calls this once its feedback delay elapses.
    pub fn clear_mark(&self, page: &mut Page, node: NodeId, tooltip: NodeId) {
        page.clear_inline_style(node, "borderColor");
        page.clear_inline_style(node, "backgroundColor");
        page.clear_inline_style(node, "borderWidth");
        page.remove(tooltip);
    }

    /// Post the fill summary banner. Skipped when nothing was filled.
    pub fn show_success_banner(
        &self,
        page: &mut Page,
        filled: usize,
        total: usize,
    ) -> Option<NodeId> {
        if filled == 0 {
            return None;
        }
        let marker = format!("formpilot-banner-{}", Uuid::new_v4());
        let banner = page.append_element(
            page.body(),
            Element::new("div").attr("id", marker.clone()),
        );
        page.append_text(
            banner,
            format!("✅ FormPilot preencheu {filled} de {total} campos com sucesso!"),
        );
        page.set_inline_style(banner, "position", "fixed");
        page.set_inline_style(banner, "top", "20px");
        page.set_inline_style(banner, "right", "20px");
        page.set_inline_style(banner, "background", FILLED_BORDER_COLOR);
        page.set_inline_style(banner, "color", "white");

        debug!(filled, total, marker = %marker, "success banner shown");
        Some(banner)
    }
}

impl Default for FeedbackAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_clear() {
        let mut page = Page::new();
        let input = page.append_element(page.body(), Element::new("input"));

        let annotator = FeedbackAnnotator::new();
        let tooltip = annotator.mark_filled(&mut page, input);

        assert_eq!(page.inline_style(input, "borderColor"), Some("#4CAF50"));
        assert_eq!(page.inline_style(input, "backgroundColor"), Some("#f0f9ff"));
        assert_eq!(page.text_content(tooltip), "✅ Preenchido");

        annotator.clear_mark(&mut page, input, tooltip);
        assert_eq!(page.inline_style(input, "borderColor"), None);
        assert!(!page.elements().contains(&tooltip));
    }

    #[test]
    fn test_tooltip_floats_above_field() {
        let mut page = Page::new();
        let input = page.append_element(
            page.body(),
            Element::new("input").rect(50.0, 200.0, 120.0, 24.0),
        );

        let tooltip = FeedbackAnnotator::new().mark_filled(&mut page, input);
        assert_eq!(page.inline_style(tooltip, "left"), Some("50px"));
        assert_eq!(page.inline_style(tooltip, "top"), Some("170px"));
    }

    #[test]
    fn test_banner_only_when_something_filled() {
        let mut page = Page::new();
        let annotator = FeedbackAnnotator::new();

        assert!(annotator.show_success_banner(&mut page, 0, 3).is_none());

        let banner = annotator.show_success_banner(&mut page, 2, 3).unwrap();
        assert_eq!(
            page.text_content(banner),
            "✅ FormPilot preencheu 2 de 3 campos com sucesso!"
        );
    }
}
