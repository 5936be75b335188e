//! Button widget.

use joist::{Color, Element, Role, Style};

use crate::{HandlerRegistry, WidgetHandlers};

/// A button widget builder.
///
/// This is a stateless widget that creates a clickable button element.
///
/// # Example
///
/// ```ignore
/// let mut handlers = WidgetHandlers::new();
/// handlers.insert("on_activate", on_save);
///
/// Button::new()
///     .label("Save")
///     .hint("s")
///     .id("save")
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Debug, Default)]
pub struct Button {
    label: Option<String>,
    hint: Option<String>,
    id: Option<String>,
    disabled: bool,
    ghost: bool,
    style: Option<Style>,
    style_focused: Option<Style>,
    style_disabled: Option<Style>,
}

impl Button {
    /// Create a new button builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the button hint (keybind displayed in dimmed text).
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the button id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark the button as disabled.
    ///
    /// Disabled buttons are not focusable, not clickable, and don't register handlers.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Make this a ghost button.
    ///
    /// Ghost buttons are transparent (no background) and don't change style on focus.
    pub fn ghost(mut self) -> Self {
        self.ghost = true;
        self
    }

    /// Set the button style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the style when focused.
    pub fn style_focused(mut self, style: Style) -> Self {
        self.style_focused = Some(style);
        self
    }

    /// Set the style when disabled.
    pub fn style_disabled(mut self, style: Style) -> Self {
        self.style_disabled = Some(style);
        self
    }

    /// Build the button element.
    ///
    /// Registers the `on_activate` handler if provided and not disabled.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let label = self.label.unwrap_or_default();
        let id = self.id.unwrap_or_else(|| "button".into());

        // Build content: either just label, or label + hint
        let content = if let Some(hint) = &self.hint {
            Element::row()
                .gap(1)
                .child(Element::text(&label))
                .child(Element::text(hint).style(Style::new().dim()))
        } else {
            Element::text(&label)
        };

        let mut elem = content
            .id(&id)
            .role(Role::Button)
            .label(&label)
            .focusable(!self.disabled)
            .clickable(!self.disabled)
            .disabled(self.disabled);

        if self.ghost {
            // Ghost buttons: no background, no style changes on focus
            if let Some(style) = self.style {
                elem = elem.style(style);
            }
        } else {
            // Normal buttons: solid background that brightens on focus
            let base = Color::oklch(0.45, 0.1, 250.0);
            let style = self
                .style
                .unwrap_or_else(|| Style::new().background(base.clone()));
            let focused_style = self
                .style_focused
                .unwrap_or_else(|| Style::new().background(base.clone().lighten(0.12)));
            let disabled_style = self
                .style_disabled
                .unwrap_or_else(|| Style::new().background(Color::oklch(0.3, 0.02, 250.0)).dim());
            elem = elem.style(style);
            elem = elem.style_focused(focused_style);
            elem = elem.style_disabled(disabled_style);
        }

        // Only register handler if not disabled
        if !self.disabled {
            if let Some(handler) = handlers.get("on_activate") {
                registry.register(&id, "on_activate", handler.clone());
            }
        }

        elem
    }
}
