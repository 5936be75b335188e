//! Tests for event routing: bubbling, key activation, and hover diffing.

use std::sync::{Arc, Mutex};

use joist::{Element, Event, Key, Modifiers, MouseButton, Rect, Size, layout};

use lintel::prelude::*;

type Log = Arc<Mutex<Vec<String>>>;

fn log_handler(log: &Log, entry: &str) -> Handler {
    let log = log.clone();
    let entry = entry.to_string();
    Arc::new(move |hx: &HandlerContext| {
        log.lock().unwrap().push(format!("{entry}:{}", hx.target()));
    })
}

/// root (40x10) containing a card (20x4) containing an inner strip (5x1).
fn fixture() -> Element {
    Element::col()
        .id("root")
        .width(Size::Fixed(40))
        .height(Size::Fixed(10))
        .child(
            Element::col()
                .id("card")
                .width(Size::Fixed(20))
                .height(Size::Fixed(4))
                .child(
                    Element::box_()
                        .id("inner")
                        .width(Size::Fixed(5))
                        .height(Size::Fixed(1)),
                ),
        )
}

fn click(target: &str) -> Event {
    Event::Click {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    }
}

fn key(target: &str, key: Key) -> Event {
    Event::Key {
        target: Some(target.to_string()),
        key,
        modifiers: Modifiers::default(),
    }
}

#[test]
fn test_click_bubbles_to_nearest_ancestor_handler() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("card", "on_activate", log_handler(&log, "card"));

    let mut router = EventRouter::new();
    let result = router.route(&click("inner"), &root, &laid_out, &registry);

    assert_eq!(result, DispatchResult::Handled);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        &["card:inner".to_string()],
        "the handler runs on the ancestor but sees the original target"
    );
}

#[test]
fn test_target_handler_wins_over_ancestor() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("inner", "on_activate", log_handler(&log, "inner"));
    registry.register("card", "on_activate", log_handler(&log, "card"));

    let mut router = EventRouter::new();
    router.route(&click("inner"), &root, &laid_out, &registry);

    assert_eq!(log.lock().unwrap().as_slice(), &["inner:inner".to_string()]);
}

#[test]
fn test_enter_activates_but_space_does_not() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("card", "on_activate", log_handler(&log, "card"));

    let mut router = EventRouter::new();

    let result = router.route(&key("card", Key::Enter), &root, &laid_out, &registry);
    assert_eq!(result, DispatchResult::Handled);

    let result = router.route(&key("card", Key::Char(' ')), &root, &laid_out, &registry);
    assert_eq!(result, DispatchResult::Ignored);

    assert_eq!(log.lock().unwrap().len(), 1, "only Enter activates");
}

#[test]
fn test_escape_routes_dismissal_up_the_tree() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("root", "on_dismiss", log_handler(&log, "root"));

    let mut router = EventRouter::new();
    let result = router.route(&key("inner", Key::Escape), &root, &laid_out, &registry);

    assert_eq!(result, DispatchResult::Handled);
    assert_eq!(log.lock().unwrap().as_slice(), &["root:inner".to_string()]);
}

#[test]
fn test_focus_and_blur_bubble_for_focus_within() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("card", "on_focus", log_handler(&log, "focus"));
    registry.register("card", "on_blur", log_handler(&log, "blur"));

    let mut router = EventRouter::new();
    router.route(
        &Event::Focus {
            target: "inner".to_string(),
        },
        &root,
        &laid_out,
        &registry,
    );
    router.route(
        &Event::Blur {
            target: "inner".to_string(),
        },
        &root,
        &laid_out,
        &registry,
    );

    assert_eq!(
        log.lock().unwrap().as_slice(),
        &["focus:inner".to_string(), "blur:inner".to_string()]
    );
}

#[test]
fn test_hover_produces_ordered_enter_and_leave() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    for id in ["root", "card", "inner"] {
        registry.register(id, "on_mouse_enter", log_handler(&log, "enter"));
        registry.register(id, "on_mouse_leave", log_handler(&log, "leave"));
    }

    let mut router = EventRouter::new();

    // Into the deepest element: enter outermost-first
    router.route(&Event::MouseMove { x: 2, y: 0 }, &root, &laid_out, &registry);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        &[
            "enter:root".to_string(),
            "enter:card".to_string(),
            "enter:inner".to_string(),
        ]
    );
    log.lock().unwrap().clear();

    // Down into the card but off the strip: only the strip is left
    router.route(&Event::MouseMove { x: 2, y: 3 }, &root, &laid_out, &registry);
    assert_eq!(log.lock().unwrap().as_slice(), &["leave:inner".to_string()]);
    log.lock().unwrap().clear();

    // Off the card, still on the root
    router.route(&Event::MouseMove { x: 30, y: 9 }, &root, &laid_out, &registry);
    assert_eq!(log.lock().unwrap().as_slice(), &["leave:card".to_string()]);
    log.lock().unwrap().clear();

    // Off everything
    router.route(&Event::MouseMove { x: 45, y: 5 }, &root, &laid_out, &registry);
    assert_eq!(log.lock().unwrap().as_slice(), &["leave:root".to_string()]);
}

#[test]
fn test_hover_leaves_deepest_first_on_full_exit() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    for id in ["root", "card", "inner"] {
        registry.register(id, "on_mouse_enter", log_handler(&log, "enter"));
        registry.register(id, "on_mouse_leave", log_handler(&log, "leave"));
    }

    let mut router = EventRouter::new();
    router.route(&Event::MouseMove { x: 2, y: 0 }, &root, &laid_out, &registry);
    log.lock().unwrap().clear();

    router.route(&Event::MouseMove { x: 45, y: 5 }, &root, &laid_out, &registry);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        &[
            "leave:inner".to_string(),
            "leave:card".to_string(),
            "leave:root".to_string(),
        ]
    );
}

#[test]
fn test_unmoved_hover_is_ignored() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let log: Log = Log::default();
    registry.register("inner", "on_mouse_enter", log_handler(&log, "enter"));

    let mut router = EventRouter::new();
    let first = router.route(&Event::MouseMove { x: 2, y: 0 }, &root, &laid_out, &registry);
    let second = router.route(&Event::MouseMove { x: 2, y: 0 }, &root, &laid_out, &registry);

    assert_eq!(first, DispatchResult::Handled);
    assert_eq!(second, DispatchResult::Ignored);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_unhandled_events_are_ignored() {
    let root = fixture();
    let laid_out = layout(&root, Rect::from_size(40, 10));
    let registry = HandlerRegistry::new();
    let mut router = EventRouter::new();

    assert_eq!(
        router.route(&click("inner"), &root, &laid_out, &registry),
        DispatchResult::Ignored
    );
    assert_eq!(
        router.route(
            &Event::Click {
                target: None,
                x: 0,
                y: 0,
                button: MouseButton::Left,
            },
            &root,
            &laid_out,
            &registry,
        ),
        DispatchResult::Ignored
    );
    assert_eq!(
        router.route(
            &Event::Resize {
                width: 80,
                height: 24,
            },
            &root,
            &laid_out,
            &registry,
        ),
        DispatchResult::Ignored
    );
}
