//! Dialog lifecycle as a pure transition function plus a stateful core
//! that owns the overlay slot.
//!
//! `step` is total over phase and input and has no side effects, which
//! keeps every edge testable in isolation. `DialogCore` folds inputs
//! through it and acquires or releases its overlay slot on the edges.

use crate::overlay::{OverlayGuard, OverlayStack};

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
}

/// Everything that can drive the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    /// The trigger element was activated.
    TriggerActivated,
    /// Programmatic open request.
    OpenRequested,
    /// The backdrop was clicked. `surface_has_focus` is true when the
    /// pointer was over the panel or focus was inside it, meaning the
    /// click landed on dialog content rather than the veil.
    BackdropClicked { surface_has_focus: bool },
    EscapePressed,
    /// The close control was activated.
    CloseActivated,
}

/// Externally visible lifecycle edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSignal {
    Opened,
    Closed,
}

/// Advance one step. Signals fire only on actual phase edges, never on
/// self-loops.
pub fn step(phase: DialogPhase, input: DialogInput) -> (DialogPhase, Option<DialogSignal>) {
    use DialogInput::*;
    use DialogPhase::*;

    match (phase, input) {
        (Closed, TriggerActivated | OpenRequested) => (Open, Some(DialogSignal::Opened)),
        (Closed, _) => (Closed, None),

        // The trigger toggles: activating it again while open closes.
        (Open, TriggerActivated) => (Closed, Some(DialogSignal::Closed)),
        (Open, OpenRequested) => (Open, None),
        (
            Open,
            BackdropClicked {
                surface_has_focus: true,
            },
        ) => (Open, None),
        (Open, BackdropClicked { .. }) | (Open, EscapePressed) | (Open, CloseActivated) => {
            (Closed, Some(DialogSignal::Closed))
        }
    }
}

/// Stateful dialog lifecycle: the phase, surface-focus tracking for the
/// backdrop guard, and the overlay slot held while open.
///
/// Clones share the slot, so the core can live inside `State<DialogCore>`
/// without double-releasing.
#[derive(Debug, Clone, Default)]
pub struct DialogCore {
    phase: DialogPhase,
    pointer_over: bool,
    focus_within: bool,
    ever_opened: bool,
    guard: Option<OverlayGuard>,
}

impl DialogCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A core that starts out open, already holding its overlay slot.
    /// The initial state produces no `Opened` signal.
    pub fn open_initially(stack: &OverlayStack) -> Self {
        Self {
            phase: DialogPhase::Open,
            pointer_over: false,
            focus_within: false,
            ever_opened: true,
            guard: Some(stack.acquire()),
        }
    }

    /// Feed one input through the transition function, acquiring or
    /// releasing the overlay slot on phase edges.
    pub fn apply(&mut self, input: DialogInput, stack: &OverlayStack) -> Option<DialogSignal> {
        let (next, signal) = step(self.phase, input);
        self.phase = next;

        match signal {
            Some(DialogSignal::Opened) => {
                self.ever_opened = true;
                self.guard = Some(stack.acquire());
            }
            Some(DialogSignal::Closed) => {
                self.guard = None;
                self.pointer_over = false;
                self.focus_within = false;
            }
            None => {}
        }

        signal
    }

    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// True once the core has ever been open. An initial-open request is
    /// honored only while this is false, so closing sticks.
    pub fn has_opened(&self) -> bool {
        self.ever_opened
    }

    /// True while the pointer is over the panel or focus is inside it.
    pub fn surface_has_focus(&self) -> bool {
        self.pointer_over || self.focus_within
    }

    pub fn set_pointer_over(&mut self, over: bool) {
        self.pointer_over = over;
    }

    pub fn set_focus_within(&mut self, within: bool) {
        self.focus_within = within;
    }
}
