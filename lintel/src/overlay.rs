//! Counts mounted overlay surfaces so background interaction can be
//! suspended while any of them is up.
//!
//! Every open overlay holds one slot on the stack through an RAII guard.
//! Nested overlays stack their slots; the lock lifts only when the last
//! guard drops. A dialog that is torn down while open releases its slot
//! through the same drop path, so counts never leak.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Default)]
pub struct OverlayStack {
    depth: Arc<AtomicUsize>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide stack used when a dialog is not handed its own.
    pub fn global() -> &'static OverlayStack {
        static GLOBAL: OnceLock<OverlayStack> = OnceLock::new();
        GLOBAL.get_or_init(OverlayStack::new)
    }

    /// Take a slot on the stack. The slot is held until the returned guard
    /// and every clone of it have dropped.
    pub fn acquire(&self) -> OverlayGuard {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("[overlay] slot acquired, depth now {depth}");
        OverlayGuard {
            inner: Arc::new(GuardInner {
                depth: Arc::clone(&self.depth),
            }),
        }
    }

    /// Number of overlay surfaces currently holding a slot.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// True while any overlay holds a slot.
    pub fn is_locked(&self) -> bool {
        self.depth() > 0
    }
}

/// RAII slot on an [`OverlayStack`].
///
/// Cloning shares the slot rather than taking another one, so a guard can
/// live inside cloneable state. The slot releases exactly once, when the
/// last clone drops.
#[derive(Debug, Clone)]
pub struct OverlayGuard {
    inner: Arc<GuardInner>,
}

impl OverlayGuard {
    /// True if this guard still shares its slot with other clones.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }
}

#[derive(Debug)]
struct GuardInner {
    depth: Arc<AtomicUsize>,
}

impl Drop for GuardInner {
    fn drop(&mut self) {
        let before = self.depth.fetch_sub(1, Ordering::SeqCst);
        log::debug!("[overlay] slot released, depth now {}", before.saturating_sub(1));
    }
}
