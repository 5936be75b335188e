//! Handler plumbing shared by all widgets.
//!
//! This module provides:
//! - `Handler`: closure type for widget event handlers
//! - `WidgetHandlers`: named callbacks passed into a widget builder
//! - `HandlerRegistry`: stores handlers keyed by (element_id, event_type)
//!
//! Widgets register their handlers while building their element tree; the
//! event router looks them up by element id when events arrive.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A handler closure that receives a HandlerContext.
///
/// The closure captures whatever state it mutates at creation time.
pub type Handler = Arc<dyn Fn(&HandlerContext) + Send + Sync>;

/// Map of handler names to handlers, used for passing callbacks to widgets.
///
/// Standard handler names:
/// - `"on_activate"` - click or Enter on the element
/// - `"on_change"` - a widget's value changed
/// - `"on_open"` - a dialog finished opening
/// - `"on_dismiss"` - dismissal requested (Escape, backdrop, close control)
/// - `"on_focus"` / `"on_blur"` - focus entered / left the element
/// - `"on_mouse_enter"` / `"on_mouse_leave"` - pointer crossed the element
pub type WidgetHandlers = HashMap<&'static str, Handler>;

// =============================================================================
// Event Data
// =============================================================================

/// Event-specific data passed to handlers via HandlerContext.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventData {
    /// No event data.
    #[default]
    None,
    /// A value changed. Carries the label of the newly selected option.
    Change {
        value: String,
    },
    /// Pointer click with cell coordinates.
    Click {
        x: u16,
        y: u16,
    },
}

impl EventData {
    /// Get the changed value from a Change event.
    pub fn value(&self) -> Option<&str> {
        match self {
            EventData::Change { value } => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// HandlerContext
// =============================================================================

/// Context passed to every widget handler: which element the event targeted
/// and any event-specific data.
#[derive(Debug, Clone, Default)]
pub struct HandlerContext {
    target: String,
    event_data: EventData,
}

impl HandlerContext {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            event_data: EventData::None,
        }
    }

    pub fn with_event(target: impl Into<String>, event_data: EventData) -> Self {
        Self {
            target: target.into(),
            event_data,
        }
    }

    /// The id of the element the event was dispatched to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn event(&self) -> &EventData {
        &self.event_data
    }
}

// =============================================================================
// HandlerRegistry
// =============================================================================

/// Registry for widget event handlers.
///
/// Maps (element_id, event_type) to handler closures. Cleared at the start
/// of each view build so handlers from previous frames don't persist.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, String), Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event.
    ///
    /// # Arguments
    /// - `element_id`: The element's unique ID (from Element.id)
    /// - `event`: The event type (e.g., "on_activate", "on_change")
    /// - `handler`: The handler closure
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.insert((element_id.to_string(), event.to_string()), handler);
        }
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, event: &str) -> Option<Handler> {
        self.handlers
            .read()
            .ok()?
            .get(&(element_id.to_string(), event.to_string()))
            .cloned()
    }

    /// Clear all handlers.
    ///
    /// Called before rebuilding the view to remove stale registrations.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.read().map(|h| h.is_empty()).unwrap_or(true)
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn register_and_get() {
        let registry = HandlerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        registry.register(
            "btn",
            "on_activate",
            Arc::new(move |_hx| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(registry.len(), 1);
        let handler = registry.get("btn", "on_activate").unwrap();
        handler(&HandlerContext::new("btn"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(registry.get("btn", "on_change").is_none());
        assert!(registry.get("other", "on_activate").is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let registry = HandlerRegistry::new();
        registry.register("a", "on_activate", Arc::new(|_| {}));
        registry.register("b", "on_change", Arc::new(|_| {}));

        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn debug_shows_handler_count() {
        let registry = HandlerRegistry::new();
        registry.register("a", "on_activate", Arc::new(|_| {}));

        let repr = format!("{registry:?}");
        assert!(repr.contains("handler_count: 1"), "got {repr}");
    }
}
