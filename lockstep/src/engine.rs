//! The engine facade the host wires its notifications into.

use crate::{
    config::SyncConfig,
    guard::{ListenerPause, ReentrancyGuard},
    host::{DocumentId, Host, ViewId},
    order,
    registry::{LifecycleCounters, ViewRegistry},
    sync::ScrollSynchronizer,
};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Keeps every visible view of a shared document scrolled in lockstep.
///
/// The host forwards its lifecycle and scroll notifications to the matching
/// method here; nothing runs between events. One engine instance per host
/// session -- all state is per-instance, there are no globals.
///
/// Every method is infallible from the host's point of view: invariant
/// violations abort the current pass and are logged, because a bug in the
/// synchronizer must degrade to "scrolling doesn't sync for this event"
/// rather than destabilize the editing session.
pub struct SyncEngine {
    registry: ViewRegistry,
    synchronizer: ScrollSynchronizer,
    guard: Arc<ReentrancyGuard>,
    /// Views whose scroll listener we have attached; mirrors the host-side
    /// listener list so double-attach can be checked explicitly.
    listened: FxHashSet<ViewId>,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            registry: ViewRegistry::new(),
            synchronizer: ScrollSynchronizer::new(config),
            guard: ReentrancyGuard::new(),
            listened: FxHashSet::default(),
        }
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn counters(&self) -> LifecycleCounters {
        self.registry.counters()
    }

    /// Host notification: a view showing `document` came into existence.
    pub fn view_created(&mut self, host: &dyn Host, document: &DocumentId, view: ViewId) {
        self.registry.counters.views_created += 1;
        if self.listened.contains(&view) {
            // Attaching twice must never happen; if it did we would deliver
            // every scroll event twice.
            warn!(%view, %document, "created view is already tracked");
            return;
        }

        self.registry.register(document, view);
        host.attach_scroll_listener(view);
        self.listened.insert(view);
        info!(
            %view,
            %document,
            created = self.registry.counters().views_created,
            tracked = self.listened.len(),
            "view created, listening"
        );
    }

    /// Host notification: a view was torn down.
    pub fn view_destroyed(&mut self, host: &dyn Host, view: ViewId) {
        self.registry.counters.views_destroyed += 1;
        if !self.listened.remove(&view) {
            warn!(%view, "destroyed view was not tracked");
            return;
        }

        host.detach_scroll_listener(view);
        if let Some(document) = self.registry.document_of(view).cloned() {
            self.registry.unregister(&document, view);
        }
        info!(
            %view,
            destroyed = self.registry.counters().views_destroyed,
            tracked = self.listened.len(),
            "view destroyed, listener removed"
        );
    }

    /// Host notification: `document` was opened.
    pub fn file_opened(&mut self, document: &DocumentId) {
        self.registry.counters.files_opened += 1;
        info!(%document, opened = self.registry.counters().files_opened, "file opened");
    }

    /// Host notification: `document` was closed. Reconciles the registry
    /// entry against the views the host still resolves, dropping the rest.
    pub fn file_closed(&mut self, host: &dyn Host, document: &DocumentId) {
        self.registry.counters.files_closed += 1;
        let dropped = self.registry.retain_live(document, host);
        for &view in &dropped {
            if self.listened.remove(&view) {
                host.detach_scroll_listener(view);
            }
        }
        info!(
            %document,
            closed = self.registry.counters().files_closed,
            dropped = dropped.len(),
            "file closed"
        );
    }

    /// Host notification: `view`'s vertical scroll offset changed, whether
    /// by the user or programmatically.
    pub fn scroll_changed(&mut self, host: &dyn Host, view: ViewId) {
        let Some(_pass) = self.guard.enter(view) else {
            debug!(%view, "re-entrant scroll event ignored");
            return;
        };

        let Some(document) = self.registry.document_of(view).cloned() else {
            debug!(%view, "scroll event for untracked view");
            return;
        };

        // Listener stays detached for the whole pass, including neighbor
        // writes; reattached on every exit path.
        let _listener = ListenerPause::new(host, view);

        let live = self.registry.live_views_of(&document, host);
        if live.len() < 2 {
            debug!(%document, showing = live.len(), "fewer than two showing views");
            return;
        }

        let ordered = order::screen_order(host, live);
        match self.synchronizer.sync(host, &document, view, &ordered) {
            Ok(outcome) => debug!(%view, %document, ?outcome, "pass complete"),
            Err(err) => error!(%view, %document, %err, "synchronization pass aborted"),
        }
    }

    /// Views currently holding an attached scroll listener, sorted.
    ///
    /// Verification hook for listener bookkeeping; the engine itself never
    /// reads this.
    pub fn listened_views(&self) -> Vec<ViewId> {
        let mut views: Vec<ViewId> = self.listened.iter().copied().collect();
        views.sort_unstable();
        views
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHost, FakeView};

    fn doc() -> DocumentId {
        DocumentId::new("/tmp/shared.rs")
    }

    #[test]
    fn created_views_get_exactly_one_listener() {
        let mut host = FakeHost::new();
        let view = host.insert(FakeView::new(1));

        let mut engine = SyncEngine::default();
        engine.view_created(&host, &doc(), view);
        engine.view_created(&host, &doc(), view);

        assert!(host.is_listening(view));
        assert_eq!(engine.listened_views(), vec![view]);
        assert_eq!(engine.counters().views_created, 2);
    }

    #[test]
    fn in_flight_master_makes_reentry_a_noop() {
        let mut host = FakeHost::new();
        let a = host.insert(FakeView::new(1).screen(0, 0).scrolled_to(200));
        let b = host.insert(FakeView::new(2).screen(500, 0));

        let mut engine = SyncEngine::default();
        engine.view_created(&host, &doc(), a);
        engine.view_created(&host, &doc(), b);

        // Simulate a synchronous redelivery arriving while a's own pass is
        // still on the stack.
        let token = engine.guard.enter(a).expect("mark in flight");
        engine.scroll_changed(&host, a);
        assert!(host.writes(b).is_empty());

        drop(token);
        engine.scroll_changed(&host, a);
        assert_eq!(host.writes(b).len(), 1);
    }

    #[test]
    fn listener_is_reattached_after_every_pass() {
        let mut host = FakeHost::new();
        let a = host.insert(FakeView::new(1).screen(0, 0));

        let mut engine = SyncEngine::default();
        engine.view_created(&host, &doc(), a);

        // Trivial pass (single view) and a pass for an untracked view both
        // leave the listener state intact.
        engine.scroll_changed(&host, a);
        assert!(host.is_listening(a));
        engine.scroll_changed(&host, ViewId::new(99));
        assert!(host.is_listening(a));
    }
}
