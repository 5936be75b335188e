use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Border, Direction, Justify, Position, Size};

pub type LayoutResult = HashMap<String, Rect>;

/// Compute one rect per element id.
///
/// Static children flow along the parent's main axis. `Absolute` children
/// anchor to the parent's border box, `Fixed` children to `available` (the
/// viewport); both resolve `left`/`right`/`top`/`bottom` against that base.
pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    place(element, available, available, &mut result);
    result
}

fn place(element: &Element, container: Rect, viewport: Rect, result: &mut LayoutResult) {
    let rect = match element.position {
        Position::Absolute => anchored(element, container),
        Position::Fixed => anchored(element, viewport),
        Position::Static => {
            let flow = container.shrink(
                element.margin.top,
                element.margin.right,
                element.margin.bottom,
                element.margin.left,
            );
            let width = resolve(element, element.width, flow.width, true);
            let height = resolve(element, element.height, flow.height, false);
            Rect::new(flow.x, flow.y, width, height)
        }
    };

    result.insert(element.id.clone(), rect);
    place_children(element, rect, viewport, result);
}

/// Resolve an out-of-flow element's rect against its anchor base.
fn anchored(element: &Element, base: Rect) -> Rect {
    let width = resolve(element, element.width, base.width, true);
    let height = resolve(element, element.height, base.height, false);

    let x = match (element.left, element.right) {
        (Some(left), _) => offset(base.x, left),
        (None, Some(right)) => (base.right() as i32 - width as i32 - right as i32).max(0) as u16,
        (None, None) => base.x,
    };
    let y = match (element.top, element.bottom) {
        (Some(top), _) => offset(base.y, top),
        (None, Some(bottom)) => {
            (base.bottom() as i32 - height as i32 - bottom as i32).max(0) as u16
        }
        (None, None) => base.y,
    };

    Rect::new(x, y, width, height)
}

fn offset(base: u16, delta: i16) -> u16 {
    (base as i32 + delta as i32).max(0) as u16
}

fn place_children(element: &Element, rect: Rect, viewport: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };
    if children.is_empty() {
        return;
    }

    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position == Position::Static)
        .collect();

    let border = if element.style.border == Border::None {
        0
    } else {
        1
    };
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );

    if !flow.is_empty() {
        flow_layout(element, &flow, inner, viewport, result);
    }

    for child in children.iter().filter(|c| c.position != Position::Static) {
        place(child, rect, viewport, result);
    }
}

struct Slot {
    main: u16,
    before: u16,
    after: u16,
}

fn flow_layout(
    parent: &Element,
    children: &[&Element],
    inner: Rect,
    viewport: Rect,
    result: &mut LayoutResult,
) {
    let is_row = parent.direction == Direction::Row;
    let main_avail = if is_row { inner.width } else { inner.height };
    let cross_avail = if is_row { inner.height } else { inner.width };
    let gap_total = parent.gap * (children.len() - 1) as u16;

    // First pass: fixed main sizes and flex weights.
    let mut slots: Vec<Slot> = Vec::with_capacity(children.len());
    let mut flexible: Vec<(usize, u16)> = Vec::new();
    let mut used = gap_total;

    for (i, child) in children.iter().enumerate() {
        let (before, after) = main_margins(child, is_row);
        let request = match main_size(child, is_row) {
            Size::Fixed(n) => Some(n),
            Size::Auto => Some(measure(child, is_row)),
            Size::Percent(p) => Some((main_avail as f32 * p) as u16),
            Size::Fill => {
                flexible.push((i, 1));
                None
            }
            Size::Flex(w) => {
                flexible.push((i, w.max(1)));
                None
            }
        };
        let main = request.map_or(0, |r| constrain(child, r, is_row));
        used = used.saturating_add(main + before + after);
        slots.push(Slot {
            main,
            before,
            after,
        });
    }

    // Share the remainder across flexible children by weight, last one
    // taking the rounding slack.
    if !flexible.is_empty() {
        let remaining = main_avail.saturating_sub(used);
        let total: u32 = flexible.iter().map(|(_, w)| *w as u32).sum();
        let mut given = 0u16;
        for (n, (i, w)) in flexible.iter().enumerate() {
            let share = if n == flexible.len() - 1 {
                remaining - given
            } else {
                ((remaining as u32 * *w as u32) / total) as u16
            };
            given += share;
            slots[*i].main = constrain(children[*i], share, is_row);
        }
    }

    let used_total =
        slots.iter().map(|s| s.main + s.before + s.after).sum::<u16>() + gap_total;
    let extra = main_avail.saturating_sub(used_total);

    let (mut offset, spacing) = match parent.justify {
        Justify::Start => (0, parent.gap),
        Justify::Center => (extra / 2, parent.gap),
        Justify::End => (extra, parent.gap),
        Justify::SpaceBetween => {
            if children.len() > 1 {
                (0, parent.gap + extra / (children.len() - 1) as u16)
            } else {
                (0, parent.gap)
            }
        }
    };

    // Second pass: cross sizing, alignment, recursion.
    for (child, slot) in children.iter().zip(&slots) {
        let (cross_before, cross_after) = cross_margins(child, is_row);
        let avail_cross = cross_avail.saturating_sub(cross_before + cross_after);

        let cross = match cross_size(child, is_row) {
            Size::Fixed(n) => n,
            Size::Fill | Size::Flex(_) => avail_cross,
            Size::Percent(p) => (cross_avail as f32 * p) as u16,
            Size::Auto => {
                if parent.align == Align::Stretch {
                    avail_cross
                } else {
                    measure(child, !is_row).min(avail_cross)
                }
            }
        };
        let cross = constrain(child, cross, !is_row).min(avail_cross);

        let main = slot
            .main
            .min(main_avail.saturating_sub(offset + slot.before));
        let cross_off = match parent.align {
            Align::Start | Align::Stretch => cross_before,
            Align::Center => cross_before + avail_cross.saturating_sub(cross) / 2,
            Align::End => cross_before + avail_cross.saturating_sub(cross),
        };

        let child_rect = if is_row {
            Rect::new(
                inner.x + offset + slot.before,
                inner.y + cross_off,
                main,
                cross,
            )
        } else {
            Rect::new(
                inner.x + cross_off,
                inner.y + offset + slot.before,
                cross,
                main,
            )
        };

        result.insert(child.id.clone(), child_rect);
        place_children(child, child_rect, viewport, result);

        offset += slot.before + slot.main + slot.after + spacing;
    }
}

fn resolve(element: &Element, size: Size, available: u16, is_width: bool) -> u16 {
    let base = match size {
        Size::Fixed(n) => n,
        Size::Fill | Size::Flex(_) => available,
        Size::Auto => measure(element, is_width),
        Size::Percent(p) => (available as f32 * p) as u16,
    };
    constrain(element, base, is_width).min(available)
}

fn constrain(element: &Element, value: u16, is_width: bool) -> u16 {
    let (min, max) = if is_width {
        (element.min_width, element.max_width)
    } else {
        (element.min_height, element.max_height)
    };
    let value = min.map_or(value, |m| value.max(m));
    max.map_or(value, |m| value.min(m))
}

/// Estimate the intrinsic content size of an element along one axis.
fn measure(element: &Element, is_width: bool) -> u16 {
    let border = if element.style.border == Border::None {
        0
    } else {
        2
    };
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Children(children) => {
            let flow: Vec<_> = children
                .iter()
                .filter(|c| c.position == Position::Static)
                .collect();
            if flow.is_empty() {
                0
            } else if (element.direction == Direction::Row) == is_width {
                let gaps = element.gap * (flow.len() - 1) as u16;
                flow.iter().map(|c| measure_outer(c, is_width)).sum::<u16>() + gaps
            } else {
                flow.iter()
                    .map(|c| measure_outer(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content + padding + border
}

fn measure_outer(element: &Element, is_width: bool) -> u16 {
    let margin = if is_width {
        element.margin.horizontal_total()
    } else {
        element.margin.vertical_total()
    };
    let size = if is_width { element.width } else { element.height };
    let base = match size {
        Size::Fixed(n) => n,
        _ => measure(element, is_width),
    };
    constrain(element, base, is_width) + margin
}

fn main_size(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn cross_size(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.height
    } else {
        element.width
    }
}

fn main_margins(element: &Element, is_row: bool) -> (u16, u16) {
    if is_row {
        (element.margin.left, element.margin.right)
    } else {
        (element.margin.top, element.margin.bottom)
    }
}

fn cross_margins(element: &Element, is_row: bool) -> (u16, u16) {
    if is_row {
        (element.margin.top, element.margin.bottom)
    } else {
        (element.margin.left, element.margin.right)
    }
}
