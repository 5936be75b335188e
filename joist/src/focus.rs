use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{find_element, Content, Element};
use crate::event::{Event, Key, Modifiers};
use crate::hit::{hit_test, hit_test_focusable};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused and processes events.
///
/// Focus traps constrain Tab cycling and hover focus to one subtree while
/// engaged; popping a trap restores the focus it displaced.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
    traps: Vec<FocusTrap>,
}

#[derive(Debug)]
struct FocusTrap {
    scope: String,
    saved: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        if self.focused.is_some() {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// The innermost engaged trap scope, if any.
    pub fn trap_scope(&self) -> Option<&str> {
        self.traps.last().map(|t| t.scope.as_str())
    }

    /// Engage a focus trap on `scope`'s subtree: remembers the current
    /// focus and moves it to the scope's first focusable descendant.
    /// Returns the newly focused element ID if focus moved.
    pub fn push_trap(&mut self, scope: &str, root: &Element) -> Option<String> {
        log::debug!("[focus] engaging trap on {scope}, saving {:?}", self.focused);
        self.traps.push(FocusTrap {
            scope: scope.to_string(),
            saved: self.focused.take(),
        });

        let first = find_element(root, scope)
            .map(collect_focusable)
            .and_then(|ids| ids.into_iter().next());
        self.focused = first.clone();
        first
    }

    /// Release the innermost trap, restoring the focus it displaced.
    /// Returns the restored focus target.
    pub fn pop_trap(&mut self) -> Option<String> {
        let trap = self.traps.pop()?;
        log::debug!(
            "[focus] releasing trap on {}, restoring {:?}",
            trap.scope,
            trap.saved
        );
        self.focused = trap.saved.clone();
        trap.saved
    }

    /// Reconcile engaged traps with the interaction scopes present in the
    /// tree: pops traps whose scope element vanished, engages traps for
    /// scopes that appeared. Call after each rebuild of the tree.
    pub fn sync_traps(&mut self, root: &Element) {
        let scopes = collect_scopes(root);

        while let Some(top) = self.traps.last() {
            if scopes.iter().any(|s| *s == top.scope) {
                break;
            }
            self.pop_trap();
        }

        for scope in scopes {
            if !self.traps.iter().any(|t| t.scope == scope) {
                self.push_trap(&scope, root);
            }
        }
    }

    /// The subtree focus navigation is currently constrained to.
    fn nav_root<'a>(&self, root: &'a Element) -> &'a Element {
        self.trap_scope()
            .and_then(|scope| find_element(root, scope))
            .unwrap_or(root)
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(self.nav_root(root));
        if focusable.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => focusable[0].clone(),
            Some(current) => {
                let idx = focusable.iter().position(|id| id == current);
                match idx {
                    Some(i) => focusable[(i + 1) % focusable.len()].clone(),
                    None => focusable[0].clone(),
                }
            }
        };

        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(self.nav_root(root));
        if focusable.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => focusable[focusable.len() - 1].clone(),
            Some(current) => {
                let idx = focusable.iter().position(|id| id == current);
                match idx {
                    Some(0) => focusable[focusable.len() - 1].clone(),
                    Some(i) => focusable[i - 1].clone(),
                    None => focusable[focusable.len() - 1].clone(),
                }
            }
        };

        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    /// Process raw crossterm events and produce high-level events.
    /// Focus follows mouse - hovering over a focusable element focuses it.
    pub fn process_events(
        &mut self,
        raw: &[CrosstermEvent],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }

                    let key: Key = key_event.code.into();
                    let modifiers: Modifiers = key_event.modifiers.into();

                    // Handle Tab/BackTab for focus navigation
                    if key == Key::Tab {
                        let old = self.focused.clone();
                        if let Some(new) = self.focus_next(root) {
                            if let Some(old) = old {
                                events.push(Event::Blur { target: old });
                            }
                            events.push(Event::Focus { target: new });
                        }
                        continue;
                    }

                    if key == Key::BackTab {
                        let old = self.focused.clone();
                        if let Some(new) = self.focus_prev(root) {
                            if let Some(old) = old {
                                events.push(Event::Blur { target: old });
                            }
                            events.push(Event::Focus { target: new });
                        }
                        continue;
                    }

                    // Escape blurs the focused element when no trap is
                    // engaged. Inside a trap the key passes through so the
                    // trapped surface can decide what dismissal means.
                    if key == Key::Escape && self.traps.is_empty() {
                        if let Some(old) = self.focused.take() {
                            events.push(Event::Blur { target: old });
                            continue;
                        }
                        // Fall through to emit key event
                    }

                    events.push(Event::Key {
                        target: self.focused.clone(),
                        key,
                        modifiers,
                    });
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let x = mouse_event.column;
                    let y = mouse_event.row;

                    match mouse_event.kind {
                        MouseEventKind::Down(button) => {
                            let target = hit_test(layout, root, x, y);
                            events.push(Event::Click {
                                target,
                                x,
                                y,
                                button: button.into(),
                            });
                        }

                        MouseEventKind::Moved => {
                            // Focus follows mouse, constrained to the active trap scope.
                            let nav_root = self.nav_root(root);
                            if let Some(target) = hit_test_focusable(layout, nav_root, x, y) {
                                if self.focused.as_ref() != Some(&target) {
                                    log::trace!(
                                        "[focus] hover focus {:?} -> {target}",
                                        self.focused
                                    );
                                    if let Some(old) = self.focused.take() {
                                        events.push(Event::Blur { target: old });
                                    }
                                    self.focused = Some(target.clone());
                                    events.push(Event::Focus { target });
                                }
                            }

                            events.push(Event::MouseMove { x, y });
                        }

                        _ => {}
                    }
                }

                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        events
    }
}

/// Collect all focusable element IDs in tree order.
/// Disabled elements and elements annotated with a negative tab index are
/// skipped.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    let tabbable = element.tab_index.map_or(true, |t| t >= 0);
    if element.focusable && tabbable && !element.disabled {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_focusable_recursive(child, result);
        }
    }
}

/// Collect interaction scope IDs in tree order.
fn collect_scopes(element: &Element) -> Vec<String> {
    fn walk(element: &Element, result: &mut Vec<String>) {
        if element.interaction_scope {
            result.push(element.id.clone());
        }
        if let Content::Children(children) = &element.content {
            for child in children {
                walk(child, result);
            }
        }
    }

    let mut result = Vec::new();
    walk(element, &mut result);
    result
}

/// Set the `focused` flag on the element carrying the given ID and clear it
/// everywhere else. Runtime enrichment before painting.
pub fn mark_focused(root: &mut Element, focused: Option<&str>) {
    root.focused = focused == Some(root.id.as_str());
    if let Content::Children(children) = &mut root.content {
        for child in children {
            mark_focused(child, focused);
        }
    }
}
