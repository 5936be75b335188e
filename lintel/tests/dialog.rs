//! Tests for the dialog widget lifecycle and overlay tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use joist::element::{Content, find_element};
use joist::{Element, Rect, Role, hit_test, layout};

use lintel::prelude::*;

fn counting_handler(counter: &Arc<AtomicUsize>) -> Handler {
    let counter = counter.clone();
    Arc::new(move |_hx: &HandlerContext| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn build(
    state: &State<DialogCore>,
    stack: &OverlayStack,
    handlers: &WidgetHandlers,
) -> (Element, HandlerRegistry) {
    let registry = HandlerRegistry::new();
    let root = Dialog::new()
        .state(state)
        .id("dlg")
        .title("Settings")
        .body("Pick a theme")
        .overlay_stack(stack.clone())
        .build(&registry, handlers);
    (root, registry)
}

#[test]
fn test_overlay_present_iff_open() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (root, registry) = build(&state, &stack, &handlers);
    assert!(find_element(&root, "dlg-trigger").is_some());
    assert!(find_element(&root, "dlg-backdrop").is_none());
    assert!(find_element(&root, "dlg-panel").is_none());

    let toggle = registry.get("dlg-trigger", "on_activate").unwrap();
    toggle(&HandlerContext::new("dlg-trigger"));
    assert!(state.get().is_open());

    let (root, _registry) = build(&state, &stack, &handlers);
    assert!(find_element(&root, "dlg-trigger").is_some());
    assert!(find_element(&root, "dlg-backdrop").is_some());
    assert!(find_element(&root, "dlg-panel").is_some());
    assert!(find_element(&root, "dlg-close").is_some());
}

#[test]
fn test_trigger_toggles_closed_while_open() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    let toggle = registry.get("dlg-trigger", "on_activate").unwrap();

    toggle(&HandlerContext::new("dlg-trigger"));
    assert!(state.get().is_open());
    assert_eq!(stack.depth(), 1);

    toggle(&HandlerContext::new("dlg-trigger"));
    assert!(!state.get().is_open());
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_on_open_fires_exactly_once_per_edge() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let opened = Arc::new(AtomicUsize::new(0));
    let mut handlers = WidgetHandlers::new();
    handlers.insert("on_open", counting_handler(&opened));

    let (_root, registry) = build(&state, &stack, &handlers);
    let toggle = registry.get("dlg-trigger", "on_activate").unwrap();

    toggle(&HandlerContext::new("dlg-trigger"));
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    // Closing must not fire it
    toggle(&HandlerContext::new("dlg-trigger"));
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    toggle(&HandlerContext::new("dlg-trigger"));
    assert_eq!(opened.load(Ordering::SeqCst), 2);
}

#[test]
fn test_overlay_lock_held_exactly_once_across_toggles() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    let toggle = registry.get("dlg-trigger", "on_activate").unwrap();

    toggle(&HandlerContext::new("dlg-trigger"));
    toggle(&HandlerContext::new("dlg-trigger"));
    toggle(&HandlerContext::new("dlg-trigger"));
    assert!(state.get().is_open());
    assert_eq!(stack.depth(), 1, "open-close-open holds exactly one slot");
}

#[test]
fn test_teardown_while_open_releases_lock() {
    let stack = OverlayStack::new();
    {
        let state = State::new(DialogCore::new());
        let registry = HandlerRegistry::new();
        let handlers = WidgetHandlers::new();
        let root = Dialog::new()
            .state(&state)
            .id("dlg")
            .overlay_stack(stack.clone())
            .open()
            .build(&registry, &handlers);
        assert!(find_element(&root, "dlg-backdrop").is_some());
        assert_eq!(stack.depth(), 1);
    }
    assert_eq!(stack.depth(), 0, "dropping an open dialog frees its slot");
}

#[test]
fn test_initial_open_applies_once_and_closing_sticks() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let opened = Arc::new(AtomicUsize::new(0));
    let mut handlers = WidgetHandlers::new();
    handlers.insert("on_open", counting_handler(&opened));

    let build_open = |handlers: &WidgetHandlers| {
        let registry = HandlerRegistry::new();
        let root = Dialog::new()
            .state(&state)
            .id("dlg")
            .overlay_stack(stack.clone())
            .open()
            .build(&registry, handlers);
        (root, registry)
    };

    let (root, registry) = build_open(&handlers);
    assert!(find_element(&root, "dlg-backdrop").is_some());
    assert_eq!(stack.depth(), 1);
    assert_eq!(
        opened.load(Ordering::SeqCst),
        0,
        "seeding the initial phase is not an open edge"
    );

    let close = registry.get("dlg-close", "on_activate").unwrap();
    close(&HandlerContext::new("dlg-close"));
    assert!(!state.get().is_open());

    // The standing open request no longer applies after first use
    let (root, _registry) = build_open(&handlers);
    assert!(find_element(&root, "dlg-backdrop").is_none());
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_interactive_trigger_never_receives_toggle() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let own = Arc::new(AtomicUsize::new(0));

    let trigger = TriggerSpec::component(
        "badge",
        TriggerProps::new()
            .label("Sam Doe")
            .handler("on_activate", counting_handler(&own)),
    );

    let registry = HandlerRegistry::new();
    let handlers = WidgetHandlers::new();
    let root = Dialog::new()
        .state(&state)
        .id("dlg")
        .trigger(trigger)
        .overlay_stack(stack.clone())
        .build(&registry, &handlers);

    let el = find_element(&root, "dlg-trigger").unwrap();
    assert!(el.clickable, "interactive badge wires itself");

    let activate = registry.get("dlg-trigger", "on_activate").unwrap();
    activate(&HandlerContext::new("dlg-trigger"));
    assert_eq!(own.load(Ordering::SeqCst), 1);
    assert!(
        !state.get().is_open(),
        "one press runs the trigger's own handler only"
    );
}

#[test]
fn test_inert_raw_trigger_is_decorated() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let registry = HandlerRegistry::new();
    let handlers = WidgetHandlers::new();

    let root = Dialog::new()
        .state(&state)
        .id("dlg")
        .trigger(Element::text("open settings"))
        .class("wide")
        .overlay_stack(stack.clone())
        .build(&registry, &handlers);

    let el = find_element(&root, "dlg-trigger").unwrap();
    assert!(el.focusable);
    assert!(el.clickable);
    assert_eq!(el.role, Some(Role::Button));
    assert_eq!(el.get_data("class"), Some(&"wide".to_string()));

    let toggle = registry.get("dlg-trigger", "on_activate").unwrap();
    toggle(&HandlerContext::new("dlg-trigger"));
    assert!(state.get().is_open());
}

#[test]
fn test_interactive_raw_trigger_passes_through() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let registry = HandlerRegistry::new();
    let handlers = WidgetHandlers::new();

    let raw = Element::text("all set").id("my-btn").clickable(true);
    let root = Dialog::new()
        .state(&state)
        .id("dlg")
        .trigger(raw)
        .overlay_stack(stack.clone())
        .build(&registry, &handlers);

    assert!(find_element(&root, "my-btn").is_some());
    assert!(find_element(&root, "dlg-trigger").is_none());
    assert!(
        registry.get("my-btn", "on_activate").is_none(),
        "no toggle attached to an already-interactive element"
    );
}

#[test]
fn test_unknown_trigger_component_falls_back_to_badge() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let registry = HandlerRegistry::new();
    let handlers = WidgetHandlers::new();

    let root = Dialog::new()
        .state(&state)
        .id("dlg")
        .trigger(TriggerSpec::component(
            "profile-card",
            TriggerProps::new().label("Sam Doe"),
        ))
        .overlay_stack(stack.clone())
        .build(&registry, &handlers);

    let el = find_element(&root, "dlg-trigger").unwrap();
    match &el.content {
        Content::Text(initials) => assert_eq!(initials, "SD"),
        other => panic!("expected an initials badge, got {other:?}"),
    }
    assert_eq!(el.label.as_deref(), Some("Sam Doe"));
}

#[test]
fn test_backdrop_click_gated_on_surface_focus() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    registry.get("dlg-trigger", "on_activate").unwrap()(&HandlerContext::new("dlg-trigger"));
    assert!(state.get().is_open());

    let (_root, registry) = build(&state, &stack, &handlers);
    let enter = registry.get("dlg-panel", "on_mouse_enter").unwrap();
    let leave = registry.get("dlg-panel", "on_mouse_leave").unwrap();
    let click = registry.get("dlg-backdrop", "on_activate").unwrap();

    enter(&HandlerContext::new("dlg-panel"));
    click(&HandlerContext::new("dlg-backdrop"));
    assert!(
        state.get().is_open(),
        "a click while the pointer is over the panel is not outside"
    );

    leave(&HandlerContext::new("dlg-panel"));
    click(&HandlerContext::new("dlg-backdrop"));
    assert!(!state.get().is_open());
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_escape_dismisses_despite_surface_focus() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    registry.get("dlg-trigger", "on_activate").unwrap()(&HandlerContext::new("dlg-trigger"));

    let (_root, registry) = build(&state, &stack, &handlers);
    registry.get("dlg-panel", "on_focus").unwrap()(&HandlerContext::new("dlg-close"));
    assert!(state.get().surface_has_focus());

    registry.get("dlg-backdrop", "on_dismiss").unwrap()(&HandlerContext::new("dlg-close"));
    assert!(!state.get().is_open());
}

#[test]
fn test_panel_accessibility_wiring() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    registry.get("dlg-trigger", "on_activate").unwrap()(&HandlerContext::new("dlg-trigger"));

    let (root, _registry) = build(&state, &stack, &handlers);
    let panel = find_element(&root, "dlg-panel").unwrap();
    assert_eq!(panel.role, Some(Role::Dialog));
    assert!(panel.interaction_scope);
    assert_eq!(panel.labelled_by.as_deref(), Some("dlg-title"));
    assert_eq!(panel.described_by.as_deref(), Some("dlg-desc"));
    assert!(find_element(&root, "dlg-title").is_some());
    assert!(find_element(&root, "dlg-desc").is_some());

    let close = find_element(&root, "dlg-close").unwrap();
    assert_eq!(close.label.as_deref(), Some("Close dialog"));
    assert!(close.focusable);

    let backdrop = find_element(&root, "dlg-backdrop").unwrap();
    assert_eq!(backdrop.role, Some(Role::Button));
    assert_eq!(backdrop.tab_index, Some(-1));
    assert!(backdrop.clickable);
    assert_eq!(backdrop.z_index, 100);
}

#[test]
fn test_untitled_dialog_skips_labelled_by() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let registry = HandlerRegistry::new();
    let handlers = WidgetHandlers::new();

    let root = Dialog::new()
        .state(&state)
        .id("dlg")
        .overlay_stack(stack.clone())
        .open()
        .build(&registry, &handlers);

    let panel = find_element(&root, "dlg-panel").unwrap();
    assert_eq!(panel.labelled_by, None);
    assert_eq!(panel.described_by.as_deref(), Some("dlg-desc"));
    assert!(find_element(&root, "dlg-title").is_none());
    assert!(find_element(&root, "dlg-close").is_some());
}

// Full path: hit test resolves the veil, the router bubbles the click,
// and the core closes.
#[test]
fn test_outside_click_closes_through_router() {
    let stack = OverlayStack::new();
    let state = State::new(DialogCore::new());
    let handlers = WidgetHandlers::new();

    let (_root, registry) = build(&state, &stack, &handlers);
    registry.get("dlg-trigger", "on_activate").unwrap()(&HandlerContext::new("dlg-trigger"));

    let (root, registry) = build(&state, &stack, &handlers);
    let laid_out = layout(&root, Rect::from_size(100, 40));

    let target = hit_test(&laid_out, &root, 0, 0).expect("veil corner is clickable");
    assert_eq!(target, "dlg-backdrop");

    let mut router = EventRouter::new();
    let result = router.route(
        &joist::Event::Click {
            target: Some(target),
            x: 0,
            y: 0,
            button: joist::MouseButton::Left,
        },
        &root,
        &laid_out,
        &registry,
    );
    assert_eq!(result, DispatchResult::Handled);
    assert!(!state.get().is_open());
    assert_eq!(stack.depth(), 0);
}
