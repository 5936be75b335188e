use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest clickable element at the given coordinates.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_node(layout, root, x, y, &|el| el.clickable && !el.disabled)
}

/// Find any element at the given coordinates.
/// Returns the deepest element containing the point.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_node(layout, root, x, y, &|_| true)
}

/// Find the focusable element at the given coordinates.
/// Returns None if no focusable element contains the point.
pub fn hit_test_focusable(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_node(layout, root, x, y, &|el| el.focusable && !el.disabled)
}

/// Children are tried first, in reverse order (last painted wins), before
/// the element itself. Out-of-flow children may extend beyond the parent's
/// rect, so parent containment never prunes the descent.
fn hit_node(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_node(layout, child, x, y, accept) {
                return Some(id);
            }
        }
    }

    let rect = layout.get(&element.id)?;
    if rect.contains(x, y) && accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
