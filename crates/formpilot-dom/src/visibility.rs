//! Visibility filter for scan candidates.

use tracing::debug;

use crate::page::Page;
use crate::types::NodeId;

/// Whether an element is user-visible and eligible for scanning.
///
/// Checks computed style (`display`, `visibility`, literal `opacity`
/// string) and the bounding rect: rendered size greater than zero and
/// top/left at or below the viewport origin. The negative top/left
/// rejection intentionally excludes controls scrolled above or left of
/// the origin; see DESIGN.md before changing it.
pub fn is_visible(page: &Page, id: NodeId) -> bool {
    let style = page.computed_style(id);
    let rect = page.bounding_rect(id);

    let visible = style.display != "none"
        && style.visibility != "hidden"
        && style.opacity != "0"
        && rect.width > 0.0
        && rect.height > 0.0
        && rect.top() >= 0.0
        && rect.left() >= 0.0;

    if !visible {
        debug!(
            node = id,
            display = %style.display,
            visibility = %style.visibility,
            opacity = %style.opacity,
            width = rect.width,
            height = rect.height,
            top = rect.top(),
            left = rect.left(),
            "element excluded by visibility filter"
        );
    }

    visible
}
