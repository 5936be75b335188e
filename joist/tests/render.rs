use joist::{
    mark_focused, Backdrop, Border, Buffer, Color, Edges, Element, Position, Rect, Rgb, Size,
    Style, TextAlign, TextWrap,
};

fn render_to_buffer(root: &Element, width: u16, height: u16) -> Buffer {
    let layout = joist::layout::layout(root, Rect::new(0, 0, width, height));
    let mut buf = Buffer::new(width, height);
    joist::render::render_to_buffer(root, &layout, &mut buf);
    buf
}

// ============================================================================
// z_index Tests
// ============================================================================

#[test]
fn test_higher_z_index_renders_on_top() {
    // Two overlapping boxes - higher z_index should be on top
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .child(
            Element::box_()
                .id("bottom")
                .width(Size::Fixed(10))
                .height(Size::Fixed(5))
                .position(Position::Absolute)
                .left(0)
                .top(0)
                .z_index(0)
                .style(Style::new().background(Color::rgb(255, 0, 0))),
        )
        .child(
            Element::box_()
                .id("top")
                .width(Size::Fixed(10))
                .height(Size::Fixed(5))
                .position(Position::Absolute)
                .left(5)
                .top(2)
                .z_index(1)
                .style(Style::new().background(Color::rgb(0, 255, 0))),
        );

    let buf = render_to_buffer(&root, 20, 10);

    // Overlap area - green (higher z_index) wins
    let cell = buf.get(7, 3).unwrap();
    assert_eq!(cell.bg, Rgb::new(0, 255, 0), "higher z_index on top");

    // Area only covered by the bottom element
    let cell = buf.get(2, 1).unwrap();
    assert_eq!(cell.bg, Rgb::new(255, 0, 0), "lower z_index still visible");
}

#[test]
fn test_children_inherit_raised_z_index() {
    // A later sibling at z 0 must not paint over the children of an
    // earlier subtree raised to z 10.
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(6))
        .child(
            Element::box_()
                .id("raised")
                .position(Position::Absolute)
                .left(0)
                .top(0)
                .width(Size::Fixed(10))
                .height(Size::Fixed(4))
                .z_index(10)
                .child(
                    Element::box_()
                        .id("leaf")
                        .width(Size::Fill)
                        .height(Size::Fill)
                        .style(Style::new().background(Color::rgb(0, 255, 0))),
                ),
        )
        .child(
            Element::box_()
                .id("later")
                .position(Position::Absolute)
                .left(0)
                .top(0)
                .width(Size::Fixed(10))
                .height(Size::Fixed(4))
                .style(Style::new().background(Color::rgb(255, 0, 0))),
        );

    let buf = render_to_buffer(&root, 20, 6);

    let cell = buf.get(2, 2).unwrap();
    assert_eq!(cell.bg, Rgb::new(0, 255, 0), "raised subtree stays on top");
}

// ============================================================================
// Background and Border
// ============================================================================

#[test]
fn test_background_fill() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(6))
        .height(Size::Fixed(3))
        .style(Style::new().background(Color::rgb(10, 20, 30)));

    let buf = render_to_buffer(&root, 10, 5);

    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::new(10, 20, 30));
    assert_eq!(buf.get(5, 2).unwrap().bg, Rgb::new(10, 20, 30));
    // Outside the rect stays at the default
    assert_eq!(buf.get(7, 0).unwrap().bg, Rgb::new(0, 0, 0));
}

#[test]
fn test_single_border_glyphs() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(6))
        .height(Size::Fixed(3))
        .style(Style::new().border(Border::Single));

    let buf = render_to_buffer(&root, 10, 5);

    assert_eq!(buf.get(0, 0).unwrap().char, '┌');
    assert_eq!(buf.get(5, 0).unwrap().char, '┐');
    assert_eq!(buf.get(0, 2).unwrap().char, '└');
    assert_eq!(buf.get(5, 2).unwrap().char, '┘');
    assert_eq!(buf.get(2, 0).unwrap().char, '─');
    assert_eq!(buf.get(0, 1).unwrap().char, '│');
}

#[test]
fn test_rounded_border_corners() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(4))
        .height(Size::Fixed(3))
        .style(Style::new().border(Border::Rounded));

    let buf = render_to_buffer(&root, 10, 5);

    assert_eq!(buf.get(0, 0).unwrap().char, '╭');
    assert_eq!(buf.get(3, 0).unwrap().char, '╮');
    assert_eq!(buf.get(0, 2).unwrap().char, '╰');
    assert_eq!(buf.get(3, 2).unwrap().char, '╯');
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_inside_padding_and_border() {
    let root = Element::text("hi")
        .id("root")
        .width(Size::Fixed(8))
        .height(Size::Fixed(3))
        .padding(Edges::new(0, 0, 0, 1))
        .style(Style::new().border(Border::Single));

    let buf = render_to_buffer(&root, 10, 5);

    // border (1) + padding left (1)
    assert_eq!(buf.get(2, 1).unwrap().char, 'h');
    assert_eq!(buf.get(3, 1).unwrap().char, 'i');
}

#[test]
fn test_text_truncate_with_ellipsis() {
    let root = Element::text("hello world")
        .id("root")
        .width(Size::Fixed(5))
        .height(Size::Fixed(1))
        .text_wrap(TextWrap::Truncate);

    let buf = render_to_buffer(&root, 10, 2);

    let line: String = (0..5).map(|x| buf.get(x, 0).unwrap().char).collect();
    assert_eq!(line, "hell…");
}

#[test]
fn test_text_word_wrap() {
    let root = Element::text("aa bb cc")
        .id("root")
        .width(Size::Fixed(5))
        .height(Size::Fixed(2))
        .text_wrap(TextWrap::Wrap);

    let buf = render_to_buffer(&root, 10, 4);

    let first: String = (0..5).map(|x| buf.get(x, 0).unwrap().char).collect();
    let second: String = (0..2).map(|x| buf.get(x, 1).unwrap().char).collect();
    assert_eq!(first, "aa bb");
    assert_eq!(second, "cc");
}

#[test]
fn test_text_align_center() {
    let root = Element::text("hi")
        .id("root")
        .width(Size::Fixed(10))
        .height(Size::Fixed(1))
        .text_align(TextAlign::Center);

    let buf = render_to_buffer(&root, 10, 2);

    assert_eq!(buf.get(4, 0).unwrap().char, 'h');
    assert_eq!(buf.get(5, 0).unwrap().char, 'i');
}

#[test]
fn test_wide_char_continuation() {
    let root = Element::text("日本")
        .id("root")
        .width(Size::Fixed(6))
        .height(Size::Fixed(1));

    let buf = render_to_buffer(&root, 10, 2);

    assert_eq!(buf.get(0, 0).unwrap().char, '日');
    assert!(buf.get(1, 0).unwrap().wide_continuation);
    assert_eq!(buf.get(2, 0).unwrap().char, '本');
    assert!(buf.get(3, 0).unwrap().wide_continuation);
}

// ============================================================================
// Backdrop
// ============================================================================

#[test]
fn test_backdrop_dims_covered_cells() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(10))
        .height(Size::Fixed(4))
        .style(Style::new().background(Color::rgb(255, 0, 0)))
        .child(
            Element::box_()
                .id("veil")
                .position(Position::Fixed)
                .left(0)
                .top(0)
                .width(Size::Fixed(5))
                .height(Size::Fixed(4))
                .backdrop(Backdrop::Dim(0.5)),
        );

    let buf = render_to_buffer(&root, 10, 4);

    assert_eq!(
        buf.get(2, 1).unwrap().bg,
        Rgb::new(128, 0, 0),
        "covered cells blend toward black"
    );
    assert_eq!(
        buf.get(7, 1).unwrap().bg,
        Rgb::new(255, 0, 0),
        "uncovered cells untouched"
    );
}

#[test]
fn test_backdrop_tint_blends_toward_color() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(4))
        .height(Size::Fixed(2))
        .style(Style::new().background(Color::rgb(0, 0, 0)))
        .child(
            Element::box_()
                .id("veil")
                .position(Position::Fixed)
                .left(0)
                .top(0)
                .width(Size::Fixed(4))
                .height(Size::Fixed(2))
                .backdrop(Backdrop::Tint(Rgb::new(0, 0, 200), 0.5)),
        );

    let buf = render_to_buffer(&root, 4, 2);

    assert_eq!(buf.get(1, 1).unwrap().bg, Rgb::new(0, 0, 100));
}

// ============================================================================
// Focused and Disabled Styles
// ============================================================================

#[test]
fn test_focused_style_applied() {
    let mut root = Element::box_()
        .id("btn")
        .width(Size::Fixed(4))
        .height(Size::Fixed(2))
        .style(Style::new().background(Color::rgb(255, 0, 0)))
        .style_focused(Style::new().background(Color::rgb(0, 0, 255)));

    let buf = render_to_buffer(&root, 6, 3);
    assert_eq!(buf.get(1, 1).unwrap().bg, Rgb::new(255, 0, 0));

    mark_focused(&mut root, Some("btn"));
    let buf = render_to_buffer(&root, 6, 3);
    assert_eq!(buf.get(1, 1).unwrap().bg, Rgb::new(0, 0, 255));
}

#[test]
fn test_disabled_style_wins_over_focused() {
    let mut root = Element::box_()
        .id("btn")
        .width(Size::Fixed(4))
        .height(Size::Fixed(2))
        .disabled(true)
        .style(Style::new().background(Color::rgb(255, 0, 0)))
        .style_focused(Style::new().background(Color::rgb(0, 0, 255)))
        .style_disabled(Style::new().background(Color::rgb(40, 40, 40)));

    mark_focused(&mut root, Some("btn"));
    let buf = render_to_buffer(&root, 6, 3);

    assert_eq!(buf.get(1, 1).unwrap().bg, Rgb::new(40, 40, 40));
}
