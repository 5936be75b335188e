use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width, wrap_words};
use crate::types::{Backdrop, Border, Rgb, Style, TextAlign, TextWrap};

/// A paint item pairs an element with its effective z_index and tree order.
struct PaintItem<'a> {
    element: &'a Element,
    z_index: i16,
    tree_order: usize,
}

pub fn render_to_buffer(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    // Collect all elements with their effective z_index and tree order
    let mut items: Vec<PaintItem> = Vec::new();
    collect_elements(element, &mut items, 0, element.z_index);

    // Sort by z_index (stable sort preserves tree order for equal z_index)
    items.sort_by_key(|item| (item.z_index, item.tree_order));

    for item in items {
        paint_element(item.element, layout, buf);
    }
}

/// Collect all elements in tree order with their effective z_index.
/// Children inherit their parent's z_index as a minimum, so a raised subtree
/// stays above its siblings as a whole.
fn collect_elements<'a>(
    element: &'a Element,
    list: &mut Vec<PaintItem<'a>>,
    tree_order: usize,
    parent_z_index: i16,
) -> usize {
    let mut order = tree_order;
    let effective_z = element.z_index.max(parent_z_index);

    list.push(PaintItem {
        element,
        z_index: effective_z,
        tree_order: order,
    });
    order += 1;

    if let Content::Children(children) = &element.content {
        for child in children {
            order = collect_elements(child, list, order, effective_z);
        }
    }

    order
}

fn paint_element(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };

    // Backdrop first: it tints whatever lower layers already painted under
    // this element's rect.
    apply_backdrop(buf, *rect, &element.backdrop);

    let style = effective_style(element);

    if let Some(bg) = &style.background {
        fill_rect(buf, *rect, bg.to_rgb());
    }

    render_border(style, *rect, buf);

    // Children are painted separately via collect_elements
    if let Content::Text(text) = &element.content {
        render_text(text, element, style, *rect, buf);
    }
}

/// Disabled styling wins over focused styling; both fall back to the base.
fn effective_style(element: &Element) -> &Style {
    if element.disabled {
        if let Some(style) = &element.style_disabled {
            return style;
        }
    } else if element.focused {
        if let Some(style) = &element.style_focused {
            return style;
        }
    }
    &element.style
}

fn apply_backdrop(buf: &mut Buffer, rect: Rect, backdrop: &Backdrop) {
    let (target, amount) = match backdrop {
        Backdrop::None => return,
        Backdrop::Dim(amount) => (Rgb::new(0, 0, 0), *amount),
        Backdrop::Tint(color, amount) => (*color, *amount),
    };

    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.fg = cell.fg.blend(target, amount);
                cell.bg = cell.bg.blend(target, amount);
            }
        }
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                // Skip if cell already has correct state
                if cell.bg == bg && cell.char == ' ' && !cell.wide_continuation {
                    continue;
                }
                cell.char = ' ';
                cell.bg = bg;
                cell.wide_continuation = false;
            }
        }
    }
}

fn render_text(text: &str, element: &Element, style: &Style, rect: Rect, buf: &mut Buffer) {
    let fg = style
        .foreground
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::new(255, 255, 255));
    let explicit_bg = style.background.as_ref().map(|c| c.to_rgb());

    let border_size = if style.border == Border::None { 0 } else { 1 };

    let inner = rect.shrink(
        element.padding.top + border_size,
        element.padding.right + border_size,
        element.padding.bottom + border_size,
        element.padding.left + border_size,
    );

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let max_width = inner.width as usize;

    // Get lines based on wrap mode
    let lines: Vec<String> = match element.text_wrap {
        TextWrap::NoWrap => text.lines().map(|s| s.to_string()).collect(),
        TextWrap::Wrap => wrap_words(text, max_width),
        TextWrap::Truncate => {
            let first_line = text.lines().next().unwrap_or("");
            vec![truncate_to_width(first_line, max_width)]
        }
    };

    for (line_idx, line) in lines.iter().enumerate() {
        let y = inner.y + line_idx as u16;
        if y >= inner.bottom() {
            break;
        }

        // Skip width calculation for left-align
        let x_offset = if element.text_align == TextAlign::Left {
            0
        } else {
            align_offset(display_width(line), max_width, element.text_align) as u16
        };
        let mut x = inner.x + x_offset;

        for ch in line.chars() {
            let ch_w = char_width(ch);

            if ch_w == 0 {
                // Zero-width char (combining mark, etc.) - attach to previous cell
                continue;
            }

            if x + ch_w as u16 > inner.right() {
                break;
            }

            // Preserve existing background if no explicit background set
            let bg = explicit_bg.unwrap_or_else(|| cell_bg(buf, x, y));

            buf.set(
                x,
                y,
                Cell::new(ch)
                    .with_fg(fg)
                    .with_bg(bg)
                    .with_style(style.text_style),
            );

            // For wide chars (CJK), fill the next cell with a continuation marker
            if ch_w == 2 && x + 1 < inner.right() {
                let mut continuation = Cell::new(' ')
                    .with_fg(fg)
                    .with_bg(bg)
                    .with_style(style.text_style);
                continuation.wide_continuation = true;
                buf.set(x + 1, y, continuation);
            }

            x += ch_w as u16;
        }
    }
}

fn cell_bg(buf: &Buffer, x: u16, y: u16) -> Rgb {
    buf.get(x, y).map(|c| c.bg).unwrap_or(Rgb::new(0, 0, 0))
}

fn render_border(style: &Style, rect: Rect, buf: &mut Buffer) {
    let (tl, tr, bl, br, h, v) = match style.border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        Border::Thick => ('┏', '┓', '┗', '┛', '━', '┃'),
    };

    let fg = style
        .foreground
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::new(255, 255, 255));

    if rect.width < 2 || rect.height < 2 {
        return;
    }

    // Corners
    set_char(buf, rect.x, rect.y, tl, fg);
    set_char(buf, rect.right() - 1, rect.y, tr, fg);
    set_char(buf, rect.x, rect.bottom() - 1, bl, fg);
    set_char(buf, rect.right() - 1, rect.bottom() - 1, br, fg);

    // Horizontal lines
    for x in (rect.x + 1)..(rect.right() - 1) {
        set_char(buf, x, rect.y, h, fg);
        set_char(buf, x, rect.bottom() - 1, h, fg);
    }

    // Vertical lines
    for y in (rect.y + 1)..(rect.bottom() - 1) {
        set_char(buf, rect.x, y, v, fg);
        set_char(buf, rect.right() - 1, y, v, fg);
    }
}

fn set_char(buf: &mut Buffer, x: u16, y: u16, ch: char, fg: Rgb) {
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = fg;
        // Preserve existing background
    }
}
