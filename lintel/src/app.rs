//! Application harness: terminal, focus, and event routing in one loop.
//!
//! `App::run` drives a rebuild-render-route cycle: the view closure
//! rebuilds the element tree (registering widget handlers as it goes),
//! the terminal diffs it onto the screen, and incoming input is converted
//! and routed back into those handlers. State lives outside in `State<T>`
//! cells, so the view stays a pure function of it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use thiserror::Error;

use joist::{Element, FocusState, Terminal, mark_focused};

use crate::dispatch::EventRouter;
use crate::handler::HandlerRegistry;

/// Error type for application startup and rendering failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, drawing, or input polling failed.
    #[error("terminal io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cloneable handle that asks the loop to stop after the current frame.
#[derive(Debug, Clone)]
pub struct ExitHandle(Arc<AtomicBool>);

impl ExitHandle {
    /// Request the application loop to exit.
    pub fn exit(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// The application shell owning the terminal and interaction state.
pub struct App {
    terminal: Terminal,
    focus: FocusState,
    router: EventRouter,
    registry: HandlerRegistry,
    exit: Arc<AtomicBool>,
}

impl App {
    /// Set up the terminal and an empty interaction state.
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            terminal: Terminal::new()?,
            focus: FocusState::new(),
            router: EventRouter::default(),
            registry: HandlerRegistry::new(),
            exit: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for stopping the loop from inside a handler.
    pub fn exit_handle(&self) -> ExitHandle {
        ExitHandle(self.exit.clone())
    }

    /// Run the event loop until an [`ExitHandle`] fires.
    ///
    /// The view closure is called once per frame with the registry that
    /// widgets register their handlers into while building.
    pub fn run(
        &mut self,
        mut view: impl FnMut(&HandlerRegistry) -> Element,
    ) -> Result<(), AppError> {
        log::info!("[app] event loop started");

        while !self.exit.load(Ordering::SeqCst) {
            // Handlers re-register on every build, so ids from a previous
            // frame never linger.
            self.registry.clear();
            let mut root = view(&self.registry);
            self.focus.sync_traps(&root);
            mark_focused(&mut root, self.focus.focused());

            let layout = self.terminal.render(&root)?.clone();
            let raw = self.terminal.poll(None)?;

            // Raw mode swallows the interrupt signal, so honor Ctrl+C here
            if raw.iter().any(is_interrupt) {
                log::info!("[app] interrupted");
                break;
            }

            let events = self.focus.process_events(&raw, &root, &layout);
            for event in &events {
                self.router.route(event, &root, &layout, &self.registry);
            }
        }

        log::info!("[app] event loop exited");
        Ok(())
    }
}

fn is_interrupt(event: &CrosstermEvent) -> bool {
    matches!(
        event,
        CrosstermEvent::Key(key)
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}
