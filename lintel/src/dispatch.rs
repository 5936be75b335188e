//! Routes substrate events to registered widget handlers.
//!
//! Activation and dismissal resolve on the target element first, then
//! bubble up the ancestor chain until an element has a matching handler.
//! Pointer movement is diffed into enter/leave transitions per element.

use joist::element::element_path;
use joist::hit::hit_test_any;
use joist::{Element, Event, Key, LayoutResult};

use crate::handler::{EventData, HandlerContext, HandlerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// A handler ran.
    Handled,
    /// Nothing was registered along the path.
    Ignored,
}

/// Stateful event router. Keeps the hover path between frames so pointer
/// movement produces enter/leave pairs.
#[derive(Debug, Default)]
pub struct EventRouter {
    hover_path: Vec<String>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        &mut self,
        event: &Event,
        root: &Element,
        layout: &LayoutResult,
        registry: &HandlerRegistry,
    ) -> DispatchResult {
        match event {
            Event::Click {
                target: Some(target),
                x,
                y,
                ..
            } => bubble(
                root,
                registry,
                target,
                "on_activate",
                EventData::Click { x: *x, y: *y },
            ),

            // Enter activates; other keys are left to app-level keybinds
            Event::Key {
                target: Some(target),
                key: Key::Enter,
                ..
            } => bubble(root, registry, target, "on_activate", EventData::None),

            Event::Key {
                target: Some(target),
                key: Key::Escape,
                ..
            } => bubble(root, registry, target, "on_dismiss", EventData::None),

            Event::Focus { target } => bubble(root, registry, target, "on_focus", EventData::None),

            Event::Blur { target } => bubble(root, registry, target, "on_blur", EventData::None),

            Event::MouseMove { x, y } => self.route_mouse_move(*x, *y, root, layout, registry),

            _ => DispatchResult::Ignored,
        }
    }

    fn route_mouse_move(
        &mut self,
        x: u16,
        y: u16,
        root: &Element,
        layout: &LayoutResult,
        registry: &HandlerRegistry,
    ) -> DispatchResult {
        let new_path = hit_test_any(layout, root, x, y)
            .and_then(|id| element_path(root, &id))
            .unwrap_or_default();

        if new_path == self.hover_path {
            return DispatchResult::Ignored;
        }

        let shared = self
            .hover_path
            .iter()
            .zip(&new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut handled = false;

        // Leave the old branch deepest-first
        for id in self.hover_path[shared..].iter().rev() {
            if let Some(handler) = registry.get(id, "on_mouse_leave") {
                handler(&HandlerContext::new(id.clone()));
                handled = true;
            }
        }

        // Enter the new branch outermost-first
        for id in &new_path[shared..] {
            if let Some(handler) = registry.get(id, "on_mouse_enter") {
                handler(&HandlerContext::new(id.clone()));
                handled = true;
            }
        }

        self.hover_path = new_path;

        if handled {
            DispatchResult::Handled
        } else {
            DispatchResult::Ignored
        }
    }
}

/// Walk from `target` up to the root, running the first matching handler.
fn bubble(
    root: &Element,
    registry: &HandlerRegistry,
    target: &str,
    event_name: &str,
    data: EventData,
) -> DispatchResult {
    let Some(path) = element_path(root, target) else {
        return DispatchResult::Ignored;
    };

    for id in path.iter().rev() {
        if let Some(handler) = registry.get(id, event_name) {
            log::trace!("[dispatch] {event_name} on {target} handled by {id}");
            handler(&HandlerContext::with_event(target, data));
            return DispatchResult::Handled;
        }
    }

    DispatchResult::Ignored
}
