//! RadioGroup widget - a group of mutually exclusive radio buttons.

use std::sync::Arc;

use joist::{Color, Element, Role, Style};

use crate::handler::{EventData, HandlerContext};
use crate::state::State;
use crate::{HandlerRegistry, WidgetHandlers};

/// A single option in a radio group.
///
/// Most callers build these through [`RadioState::new`] from `(value, label)`
/// pairs; construct options directly when one needs an explicit id or should
/// start out disabled.
#[derive(Clone, Debug)]
pub struct RadioOption<T: Clone> {
    /// The value stored when this option is selected.
    pub value: T,
    /// The label rendered next to the indicator.
    pub label: String,
    /// Explicit element id. Falls back to `{group}-opt-{i}` when unset.
    pub id: Option<String>,
    /// Disabled options render but cannot be focused or activated.
    pub disabled: bool,
}

impl<T: Clone> RadioOption<T> {
    /// Create an option from a value and a label.
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            id: None,
            disabled: false,
        }
    }

    /// Set an explicit element id for this option's row.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark this option as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// State for a radio group widget.
///
/// Contains the selected value and the ordered options.
///
/// # Example
///
/// ```ignore
/// let priority = State::new(RadioState::new([
///     ("low".to_string(), "Low"),
///     ("medium".to_string(), "Medium"),
///     ("high".to_string(), "High"),
/// ]));
/// ```
#[derive(Clone, Debug)]
pub struct RadioState<T: Clone> {
    /// The currently selected value, if any.
    pub value: Option<T>,
    /// Available options, in render order.
    pub options: Vec<RadioOption<T>>,
}

impl<T: Clone> Default for RadioState<T> {
    fn default() -> Self {
        Self {
            value: None,
            options: Vec::new(),
        }
    }
}

impl<T: Clone> RadioState<T> {
    /// Create a new RadioState from `(value, label)` pairs.
    pub fn new(options: impl IntoIterator<Item = (T, impl Into<String>)>) -> Self {
        Self {
            value: None,
            options: options
                .into_iter()
                .map(|(v, l)| RadioOption::new(v, l))
                .collect(),
        }
    }

    /// Create a new RadioState from fully built options.
    pub fn with_options(options: impl IntoIterator<Item = RadioOption<T>>) -> Self {
        Self {
            value: None,
            options: options.into_iter().collect(),
        }
    }

    /// Set the initial selected value.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }
}

impl<T: Clone + PartialEq> RadioState<T> {
    /// Index of the option matching the current value, if any.
    pub fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_ref()?;
        self.options.iter().position(|opt| &opt.value == value)
    }
}

/// Typestate marker: radio group needs a state reference.
pub struct NeedsState;

/// Typestate marker: radio group has a state reference.
pub struct HasState<'a, T: Clone>(&'a State<RadioState<T>>);

/// A radio group widget builder.
///
/// Uses typestate pattern to enforce `state()` is called before `build()`.
/// Renders one focusable row per option with a `●`/`○` indicator. When the
/// state holds no value (or a value matching no option), the first option
/// renders as the selected one.
///
/// # Example
///
/// ```ignore
/// RadioGroup::new()
///     .state(&priority)
///     .id("priority")
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Debug)]
pub struct RadioGroup<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    name: Option<String>,
    disabled: bool,
    style: Option<Style>,
    style_focused: Option<Style>,
    style_disabled: Option<Style>,
    option_style: Option<Style>,
    label_style: Option<Style>,
}

impl Default for RadioGroup<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioGroup<NeedsState> {
    /// Create a new radio group builder.
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            name: None,
            disabled: false,
            style: None,
            style_focused: None,
            style_disabled: None,
            option_style: None,
            label_style: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state<T: Clone + PartialEq + Send + Sync + 'static>(
        self,
        s: &State<RadioState<T>>,
    ) -> RadioGroup<HasState<'_, T>> {
        RadioGroup {
            state_marker: HasState(s),
            id: self.id,
            name: self.name,
            disabled: self.disabled,
            style: self.style,
            style_focused: self.style_focused,
            style_disabled: self.style_disabled,
            option_style: self.option_style,
            label_style: self.label_style,
        }
    }
}

impl<S> RadioGroup<S> {
    /// Set the radio group id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the group name recorded on each option row. Defaults to the id.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the radio group as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the container style.
    pub fn style(mut self, s: Style) -> Self {
        self.style = Some(s);
        self
    }

    /// Set the style when an option row is focused.
    pub fn style_focused(mut self, s: Style) -> Self {
        self.style_focused = Some(s);
        self
    }

    /// Set the style when disabled.
    pub fn style_disabled(mut self, s: Style) -> Self {
        self.style_disabled = Some(s);
        self
    }

    /// Set the style for each option indicator.
    pub fn option_style(mut self, s: Style) -> Self {
        self.option_style = Some(s);
        self
    }

    /// Set the label style.
    pub fn label_style(mut self, s: Style) -> Self {
        self.label_style = Some(s);
        self
    }
}

impl<'a, T: Clone + PartialEq + Send + Sync + 'static> RadioGroup<HasState<'a, T>> {
    /// Build the radio group element.
    ///
    /// Registers an activation handler for each enabled option. Activating a
    /// row stores its value in the state, then fires `on_change` with the
    /// option label as the change value.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let current = state.get();
        let id = self.id.clone().unwrap_or_else(|| "radio".into());
        let name = self.name.clone().unwrap_or_else(|| id.clone());

        // No stored value (or a value matching no option) selects the first
        // option, so a non-empty group always renders exactly one ● row.
        let selected = match current.selected_index() {
            Some(i) => Some(i),
            None if current.options.is_empty() => None,
            None => Some(0),
        };

        let mut container = Element::col().role(Role::Group);

        if let Some(style) = self.style.clone() {
            container = container.style(style);
        }

        for (i, opt) in current.options.iter().enumerate() {
            let opt_id = opt
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-opt-{}", id, i));
            let is_selected = selected == Some(i);
            let row_disabled = self.disabled || opt.disabled;

            // Radio indicator: ● for selected, ○ for unselected
            let indicator = if is_selected { "●" } else { "○" };

            let mut indicator_elem = Element::text(indicator);
            if let Some(style) = self.option_style.clone() {
                indicator_elem = indicator_elem.style(style);
            }

            let mut label_elem = Element::text(&opt.label);
            if let Some(style) = self.label_style.clone() {
                label_elem = label_elem.style(style);
            }

            let mut opt_row = Element::row()
                .id(&opt_id)
                .gap(1)
                .role(Role::Radio)
                .label(&opt.label)
                .data("group", &name)
                .data("checked", if is_selected { "true" } else { "false" })
                .focusable(!row_disabled)
                .clickable(!row_disabled)
                .disabled(row_disabled)
                .children(vec![indicator_elem, label_elem]);

            let focused_style = self
                .style_focused
                .clone()
                .unwrap_or_else(|| Style::new().background(Color::oklch(0.35, 0.06, 250.0)));
            let disabled_style = self
                .style_disabled
                .clone()
                .unwrap_or_else(|| Style::new().dim());
            opt_row = opt_row.style_focused(focused_style);
            opt_row = opt_row.style_disabled(disabled_style);

            container = container.child(opt_row);

            // Register option handler
            if !row_disabled {
                let state_clone = state.clone();
                let value_clone = opt.value.clone();
                let label_clone = opt.label.clone();
                let target = opt_id.clone();
                let on_change = handlers.get("on_change").cloned();
                registry.register(
                    &opt_id,
                    "on_activate",
                    Arc::new(move |_hx| {
                        state_clone.update(|s| {
                            s.value = Some(value_clone.clone());
                        });
                        if let Some(ref handler) = on_change {
                            let hx = HandlerContext::with_event(
                                target.clone(),
                                EventData::Change {
                                    value: label_clone.clone(),
                                },
                            );
                            handler(&hx);
                        }
                    }),
                );
            }
        }

        container.id(&id)
    }
}
