//! Dialog trigger resolution.
//!
//! A dialog opens from a trigger: either a raw element supplied by the
//! caller, or a descriptor naming one of the built-in trigger components.
//! Descriptors resolve through the closed [`TriggerKind`] enum, so there is
//! no runtime component registry to consult or mutate.

use std::fmt;

use joist::{Color, Edges, Element, Role, Style};

use crate::{Handler, HandlerRegistry, WidgetHandlers};

/// Props for a component trigger.
#[derive(Clone, Default)]
pub struct TriggerProps {
    /// Accessible label, also the source for derived initials.
    pub label: Option<String>,
    /// Explicit initials, overriding the ones derived from the label.
    pub initials: Option<String>,
    /// Style override for the rendered component.
    pub style: Option<Style>,
    /// The component's own handlers. A component carrying `on_activate`
    /// counts as interactive and keeps its wiring to itself.
    pub handlers: WidgetHandlers,
}

impl TriggerProps {
    /// Create empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set explicit initials.
    pub fn initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    /// Set the style override.
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach a handler under the given event name.
    pub fn handler(mut self, event: &'static str, handler: Handler) -> Self {
        self.handlers.insert(event, handler);
        self
    }
}

impl fmt::Debug for TriggerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerProps")
            .field("label", &self.label)
            .field("initials", &self.initials)
            .field("style", &self.style)
            .field("handler_count", &self.handlers.len())
            .finish()
    }
}

/// What a dialog renders as its trigger.
#[derive(Clone, Debug)]
pub enum TriggerSpec {
    /// A named component descriptor resolved through [`TriggerKind`].
    Component { name: String, props: TriggerProps },
    /// A caller-supplied element used as-is.
    Raw(Element),
}

impl TriggerSpec {
    /// Create a component descriptor.
    pub fn component(name: impl Into<String>, props: TriggerProps) -> Self {
        Self::Component {
            name: name.into(),
            props,
        }
    }

    /// Whether the trigger already handles activation itself.
    ///
    /// Interactive triggers keep their own wiring and never receive the
    /// dialog's toggle, so activation runs exactly one handler.
    pub fn is_interactive(&self) -> bool {
        match self {
            Self::Component { props, .. } => props.handlers.contains_key("on_activate"),
            Self::Raw(el) => el.clickable,
        }
    }
}

impl From<Element> for TriggerSpec {
    fn from(el: Element) -> Self {
        Self::Raw(el)
    }
}

/// The closed set of components a trigger descriptor can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// An initials badge derived from the label.
    Badge,
}

impl TriggerKind {
    /// Resolve a descriptor name.
    ///
    /// The badge doubles as the fallback, so unknown names still render
    /// something activatable instead of an empty trigger.
    pub fn resolve(name: &str) -> Self {
        match name {
            "badge" => Self::Badge,
            other => {
                log::debug!("[trigger] unknown component {other:?}, falling back to badge");
                Self::Badge
            }
        }
    }

    /// Build the component element under the given id.
    ///
    /// Interactive components register their own `on_activate` and come out
    /// focusable; non-interactive ones are plain content for the dialog to
    /// decorate.
    pub fn build(self, id: &str, props: &TriggerProps, registry: &HandlerRegistry) -> Element {
        match self {
            Self::Badge => {
                let label = props.label.clone().unwrap_or_default();
                let initials = match &props.initials {
                    Some(explicit) => explicit.clone(),
                    None => initials_of(&label),
                };
                let base = Color::oklch(0.5, 0.12, 280.0);
                let style = props
                    .style
                    .clone()
                    .unwrap_or_else(|| Style::new().background(base.clone()).bold());

                let mut elem = Element::text(initials)
                    .id(id)
                    .padding(Edges::horizontal(1))
                    .style(style)
                    .label(&label);

                if props.handlers.contains_key("on_activate") {
                    elem = elem
                        .role(Role::Button)
                        .focusable(true)
                        .clickable(true)
                        .style_focused(Style::new().background(base.lighten(0.12)).bold());
                    if let Some(handler) = props.handlers.get("on_activate") {
                        registry.register(id, "on_activate", handler.clone());
                    }
                }

                elem
            }
        }
    }
}

/// First letter of the first two words, uppercased. Empty labels get `?`.
fn initials_of(label: &str) -> String {
    let initials: String = label
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "?".into()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials_of("Ada Lovelace"), "AL");
        assert_eq!(initials_of("Ada Byron Lovelace"), "AB");
        assert_eq!(initials_of("ada"), "A");
        assert_eq!(initials_of(""), "?");
        assert_eq!(initials_of("  "), "?");
    }

    #[test]
    fn unknown_names_resolve_to_badge() {
        assert_eq!(TriggerKind::resolve("badge"), TriggerKind::Badge);
        assert_eq!(TriggerKind::resolve("avatar-stack"), TriggerKind::Badge);
        assert_eq!(TriggerKind::resolve(""), TriggerKind::Badge);
    }
}
