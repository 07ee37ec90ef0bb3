//! Scoped guards around a synchronization pass.
//!
//! Programmatically scrolling a neighbor re-fires that neighbor's own
//! scroll-changed event; without a brake the cascade would oscillate between
//! adjacent views forever. Two mechanisms bound it:
//!
//! - [`ListenerPause`] detaches the master's listener for the duration of
//!   one pass, so the host never redelivers the event we are handling.
//! - [`ReentrancyGuard`] marks the master as in-flight, so a synchronous
//!   redelivery that slips through anyway becomes a no-op.
//!
//! Both release on `Drop`: no exit path can leak a detached listener or a
//! stuck in-flight mark. Scope is per-view, never global -- passes for
//! different masters in the same cascade proceed independently.

use crate::host::{Host, ViewId, ViewPort};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Tracks which master views have a synchronization pass in flight.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    in_flight: Mutex<FxHashSet<ViewId>>,
}

impl ReentrancyGuard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark `view` as in flight. Returns `None` when a pass for the same
    /// view is already running, which makes the caller's entry a no-op.
    pub fn enter(self: &Arc<Self>, view: ViewId) -> Option<PassToken> {
        if !self.in_flight.lock().insert(view) {
            return None;
        }
        Some(PassToken {
            guard: Arc::clone(self),
            view,
        })
    }

    pub fn is_in_flight(&self, view: ViewId) -> bool {
        self.in_flight.lock().contains(&view)
    }
}

/// Clears the in-flight mark for one view on drop.
#[must_use]
pub struct PassToken {
    guard: Arc<ReentrancyGuard>,
    view: ViewId,
}

impl Drop for PassToken {
    fn drop(&mut self) {
        self.guard.in_flight.lock().remove(&self.view);
    }
}

/// Detaches a view's scroll listener for the guard's lifetime.
#[must_use]
pub struct ListenerPause<'a> {
    host: &'a dyn Host,
    view: ViewId,
}

impl<'a> ListenerPause<'a> {
    pub fn new(host: &'a dyn Host, view: ViewId) -> Self {
        host.detach_scroll_listener(view);
        Self { host, view }
    }
}

impl Drop for ListenerPause<'_> {
    fn drop(&mut self) {
        self.host.attach_scroll_listener(self.view);
    }
}

/// Suspends scroll animation on one view for the guard's lifetime.
///
/// Wrapped around the single programmatic scroll write: animated scrolling
/// during sync is visually distracting and can race with the next event.
#[must_use]
pub struct AnimationPause<'a> {
    view: &'a dyn ViewPort,
}

impl<'a> AnimationPause<'a> {
    pub fn new(view: &'a dyn ViewPort) -> Self {
        view.suspend_animation();
        Self { view }
    }
}

impl Drop for AnimationPause<'_> {
    fn drop(&mut self) {
        self.view.resume_animation();
    }
}
