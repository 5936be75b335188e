//! Dialog widget - a modal surface opened from a trigger.
//!
//! The widget always renders its trigger and, while the phase is Open, a
//! full-screen backdrop with a centered panel on top. Lifecycle edges run
//! through [`DialogCore`]; this module only wires elements and handlers to
//! the inputs the core understands.

use std::sync::Arc;

use joist::{
    Align, Backdrop, Border, Color, Edges, Element, Justify, Position, Role, Size, Style,
};

use crate::content::{render_content, ContentOverrides, ContentSpec};
use crate::fsm::{DialogCore, DialogInput, DialogSignal};
use crate::overlay::OverlayStack;
use crate::state::State;
use crate::widgets::button::Button;
use crate::widgets::trigger::{TriggerKind, TriggerProps, TriggerSpec};
use crate::{Handler, HandlerRegistry, WidgetHandlers};

/// Typestate marker: dialog needs a state reference.
pub struct NeedsState;

/// Typestate marker: dialog has a state reference.
pub struct HasState<'a>(&'a State<DialogCore>);

/// A dialog widget builder.
///
/// Uses typestate pattern to enforce `state()` is called before `build()`.
///
/// The trigger can be a raw element or a descriptor naming a built-in
/// component. Triggers that are already interactive (carrying their own
/// activation wiring) are left untouched; anything else is decorated into
/// a focusable button that toggles the dialog.
///
/// # Example
///
/// ```ignore
/// let mut handlers = WidgetHandlers::new();
/// handlers.insert("on_open", on_settings_opened);
///
/// Dialog::new()
///     .state(&settings)
///     .id("settings")
///     .trigger(TriggerSpec::component("badge", TriggerProps::new().label("Sam Doe")))
///     .title("Settings")
///     .body("Nothing to configure yet.")
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Debug)]
pub struct Dialog<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    trigger: Option<TriggerSpec>,
    trigger_id: Option<String>,
    title: Option<String>,
    body: Option<ContentSpec>,
    close_label: Option<String>,
    class: Option<String>,
    open: bool,
    overlay_stack: Option<OverlayStack>,
    style: Option<Style>,
}

impl Default for Dialog<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog<NeedsState> {
    /// Create a new dialog builder.
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            trigger: None,
            trigger_id: None,
            title: None,
            body: None,
            close_label: None,
            class: None,
            open: false,
            overlay_stack: None,
            style: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, s: &State<DialogCore>) -> Dialog<HasState<'_>> {
        Dialog {
            state_marker: HasState(s),
            id: self.id,
            trigger: self.trigger,
            trigger_id: self.trigger_id,
            title: self.title,
            body: self.body,
            close_label: self.close_label,
            class: self.class,
            open: self.open,
            overlay_stack: self.overlay_stack,
            style: self.style,
        }
    }
}

impl<S> Dialog<S> {
    /// Set the dialog id. Derived ids (`{id}-trigger`, `{id}-backdrop`,
    /// `{id}-panel`, `{id}-title`, `{id}-desc`, `{id}-close`) hang off it.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the trigger. Defaults to a badge derived from the title.
    pub fn trigger(mut self, trigger: impl Into<TriggerSpec>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Override the id assigned to the trigger element.
    pub fn trigger_id(mut self, id: impl Into<String>) -> Self {
        self.trigger_id = Some(id.into());
        self
    }

    /// Set the title shown in the header.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body content.
    pub fn body(mut self, body: impl Into<ContentSpec>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the accessible label on the close control.
    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = Some(label.into());
        self
    }

    /// Record an extra class token on the trigger wrapper.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Request the dialog to start out open.
    ///
    /// Seeds the phase before the core's first use; once the dialog has
    /// opened through any path, this request no longer applies.
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }

    /// Use a specific overlay stack instead of the process-wide one.
    pub fn overlay_stack(mut self, stack: OverlayStack) -> Self {
        self.overlay_stack = Some(stack);
        self
    }

    /// Set the panel style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl<'a> Dialog<HasState<'a>> {
    /// Build the dialog fragment.
    ///
    /// Registers the toggle on the trigger (unless it is natively
    /// interactive), dismissal handlers on the overlay, and the
    /// surface-focus bookkeeping on the panel.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let id = self.id.clone().unwrap_or_else(|| "dialog".into());
        let stack = self
            .overlay_stack
            .clone()
            .unwrap_or_else(|| OverlayStack::global().clone());

        // An initial open request seeds the phase exactly once; after the
        // core has been used, closing sticks.
        if self.open && !state.get().has_opened() {
            state.update(|core| *core = DialogCore::open_initially(&stack));
        }

        let core = state.get();
        log::debug!("Dialog::build id={} phase={:?}", id, core.phase());

        let trigger_id = self
            .trigger_id
            .clone()
            .unwrap_or_else(|| format!("{}-trigger", id));

        // The toggle feeds TriggerActivated through the core and fires
        // on_open only on the Closed -> Open edge.
        let toggle: Handler = {
            let state = state.clone();
            let stack = stack.clone();
            let on_open = handlers.get("on_open").cloned();
            Arc::new(move |hx| {
                let mut signal = None;
                state.update(|core| signal = core.apply(DialogInput::TriggerActivated, &stack));
                if signal == Some(DialogSignal::Opened) {
                    if let Some(ref handler) = on_open {
                        handler(hx);
                    }
                }
            })
        };

        let trigger_spec = self
            .trigger
            .clone()
            .unwrap_or_else(|| default_trigger(self.title.as_deref()));
        let interactive = trigger_spec.is_interactive();

        let mut trigger_el = match &trigger_spec {
            TriggerSpec::Component { name, props } => {
                TriggerKind::resolve(name).build(&trigger_id, props, registry)
            }
            // Interactive raw elements pass through untouched; inert ones
            // get wrapped so the trigger id and wiring have somewhere to live.
            TriggerSpec::Raw(el) if interactive => el.clone(),
            TriggerSpec::Raw(el) => Element::box_().id(&trigger_id).child(el.clone()),
        };

        if let Some(class) = &self.class {
            trigger_el = trigger_el.data("class", class);
        }

        // Interactive triggers keep their own activation wiring and never
        // receive the toggle, so one press runs exactly one handler.
        if !interactive {
            trigger_el = trigger_el
                .role(Role::Button)
                .focusable(true)
                .clickable(true);
            if trigger_el.style_focused.is_none() {
                trigger_el = trigger_el
                    .style_focused(Style::new().background(Color::oklch(0.35, 0.06, 250.0)));
            }
            let toggle_id = trigger_el.id.clone();
            registry.register(&toggle_id, "on_activate", toggle);
        }

        let mut root = Element::box_().id(&id).child(trigger_el);

        if core.is_open() {
            root = root.child(self.build_overlay(&id, registry));
        }

        root
    }

    /// The backdrop and panel subtree rendered while open.
    fn build_overlay(&self, id: &str, registry: &HandlerRegistry) -> Element {
        let state = self.state_marker.0;
        let stack = self
            .overlay_stack
            .clone()
            .unwrap_or_else(|| OverlayStack::global().clone());

        let backdrop_id = format!("{id}-backdrop");
        let panel_id = format!("{id}-panel");
        let title_id = format!("{id}-title");
        let desc_id = format!("{id}-desc");
        let close_id = format!("{id}-close");

        // Close control shares the dismissal path with Escape and the
        // backdrop, all routed through the core.
        let close: Handler = {
            let state = state.clone();
            let stack = stack.clone();
            Arc::new(move |_hx| {
                state.update(|core| {
                    core.apply(DialogInput::CloseActivated, &stack);
                });
            })
        };

        let mut close_handlers = WidgetHandlers::new();
        close_handlers.insert("on_activate", close);
        let close_label = self
            .close_label
            .clone()
            .unwrap_or_else(|| "Close dialog".into());
        let close_btn = Button::new()
            .label("✕")
            .id(&close_id)
            .ghost()
            .build(registry, &close_handlers)
            .label(&close_label)
            .style_focused(Style::new().bold().underline());

        let mut header = Element::row()
            .justify(Justify::SpaceBetween)
            .align(Align::Center)
            .gap(2);
        match &self.title {
            Some(title) => {
                header = header.child(Element::text(title).id(&title_id).style(Style::new().bold()));
            }
            // Keep the close control on the right even without a title
            None => header = header.child(Element::text("")),
        }
        header = header.child(close_btn);

        let body_spec = self
            .body
            .clone()
            .unwrap_or_else(|| ContentSpec::Text(String::new()));
        let body_el = render_content(
            &body_spec,
            &ContentOverrides {
                id: Some(desc_id.clone()),
                style: None,
            },
        );

        let panel_style = self.style.clone().unwrap_or_else(|| {
            Style::new()
                .background(Color::oklch(0.22, 0.02, 250.0))
                .border(Border::Rounded)
        });

        let mut panel = Element::col()
            .id(&panel_id)
            .role(Role::Dialog)
            .interaction_scope(true)
            .described_by(&desc_id)
            .gap(1)
            .padding(Edges::symmetric(1, 2))
            .min_width(40)
            .max_width(80)
            .style(panel_style)
            .child(header)
            .child(body_el);
        if self.title.is_some() {
            panel = panel.labelled_by(&title_id);
        }

        // Surface-focus bookkeeping: the backdrop click only dismisses
        // while neither flag is set.
        {
            let state = state.clone();
            registry.register(
                &panel_id,
                "on_mouse_enter",
                Arc::new(move |_hx| state.update(|core| core.set_pointer_over(true))),
            );
        }
        {
            let state = state.clone();
            registry.register(
                &panel_id,
                "on_mouse_leave",
                Arc::new(move |_hx| state.update(|core| core.set_pointer_over(false))),
            );
        }
        {
            let state = state.clone();
            registry.register(
                &panel_id,
                "on_focus",
                Arc::new(move |_hx| state.update(|core| core.set_focus_within(true))),
            );
        }
        {
            let state = state.clone();
            registry.register(
                &panel_id,
                "on_blur",
                Arc::new(move |_hx| state.update(|core| core.set_focus_within(false))),
            );
        }

        {
            let state = state.clone();
            let stack = stack.clone();
            registry.register(
                &backdrop_id,
                "on_activate",
                Arc::new(move |_hx| {
                    state.update(|core| {
                        let surface_has_focus = core.surface_has_focus();
                        core.apply(DialogInput::BackdropClicked { surface_has_focus }, &stack);
                    });
                }),
            );
        }
        // Escape bubbles here from any focused descendant and dismisses
        // regardless of surface focus.
        {
            let state = state.clone();
            let stack = stack.clone();
            registry.register(
                &backdrop_id,
                "on_dismiss",
                Arc::new(move |_hx| {
                    state.update(|core| {
                        core.apply(DialogInput::EscapePressed, &stack);
                    });
                }),
            );
        }

        Element::col()
            .id(&backdrop_id)
            .position(Position::Fixed)
            .top(0)
            .left(0)
            .width(Size::Percent(1.0))
            .height(Size::Percent(1.0))
            .z_index(100)
            .backdrop(Backdrop::Dim(0.6))
            .role(Role::Button)
            .clickable(true)
            .tab_index(-1)
            .justify(Justify::Center)
            .align(Align::Center)
            .child(panel)
    }
}

/// Trigger used when the caller supplies none: a badge derived from the
/// title, or a `?` badge for an untitled dialog.
fn default_trigger(title: Option<&str>) -> TriggerSpec {
    let mut props = TriggerProps::new();
    if let Some(title) = title {
        props = props.label(title);
    }
    TriggerSpec::Component {
        name: "badge".into(),
        props,
    }
}
