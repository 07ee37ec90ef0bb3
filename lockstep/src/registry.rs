//! Tracks which live views currently show which shared document.

use crate::host::{DocumentId, Host, ViewId};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Per-registry lifecycle counters.
///
/// The host fires lifecycle notifications in pairs; drifting counters in the
/// logs are the first sign of an event-ordering anomaly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleCounters {
    pub files_opened: u64,
    pub files_closed: u64,
    pub views_created: u64,
    pub views_destroyed: u64,
}

/// Registry of live views per shared document.
///
/// Mutated only by lifecycle events, read by every synchronization pass.
/// Duplicate registrations and unknown unregistrations are host
/// event-ordering anomalies: logged, then ignored with best-effort state.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views_by_document: FxHashMap<DocumentId, FxHashSet<ViewId>>,
    document_of_view: FxHashMap<ViewId, DocumentId>,
    pub(crate) counters: LifecycleCounters,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `view` as showing `document`. Returns whether anything changed.
    pub fn register(&mut self, document: &DocumentId, view: ViewId) -> bool {
        match self.document_of_view.get(&view) {
            Some(current) if current == document => {
                warn!(%view, %document, "duplicate registration ignored");
                return false;
            }
            Some(current) => {
                // A view shows at most one document; the host told us about
                // the rebind out of order. Move it.
                warn!(%view, old = %current, new = %document, "view rebound to another document");
                let old = current.clone();
                self.remove_from_entry(&old, view);
            }
            None => {}
        }

        self.views_by_document
            .entry(document.clone())
            .or_default()
            .insert(view);
        self.document_of_view.insert(view, document.clone());
        debug!(%view, %document, "view registered");
        true
    }

    /// Stop tracking `view` under `document`. Returns whether it was present.
    pub fn unregister(&mut self, document: &DocumentId, view: ViewId) -> bool {
        let Some(actual) = self.document_of_view.remove(&view) else {
            warn!(%view, %document, "unregistering a view that was not tracked");
            return false;
        };
        if &actual != document {
            // Trust our own mapping over the caller's idea of the document.
            warn!(%view, claimed = %document, %actual, "unregister document mismatch");
        }
        self.remove_from_entry(&actual, view);
        debug!(%view, document = %actual, "view unregistered");
        true
    }

    /// The document `view` is currently registered under, if any.
    pub fn document_of(&self, view: ViewId) -> Option<&DocumentId> {
        self.document_of_view.get(&view)
    }

    pub fn is_tracked(&self, view: ViewId) -> bool {
        self.document_of_view.contains_key(&view)
    }

    /// Registered views of `document` that the host currently shows on
    /// screen. Visibility is evaluated at query time: a registered view can
    /// be minimized or otherwise hidden and must not participate.
    pub fn live_views_of(&self, document: &DocumentId, host: &dyn Host) -> SmallVec<[ViewId; 4]> {
        self.views_by_document
            .get(document)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&id| host.view(id).is_some_and(|view| view.is_showing()))
            .collect()
    }

    /// Drop registered views of `document` that the host no longer resolves,
    /// returning the dropped ids so the caller can detach their listeners.
    pub fn retain_live(&mut self, document: &DocumentId, host: &dyn Host) -> SmallVec<[ViewId; 4]> {
        let Some(entry) = self.views_by_document.get(document) else {
            return SmallVec::new();
        };

        let dropped: SmallVec<[ViewId; 4]> = entry
            .iter()
            .copied()
            .filter(|&id| host.view(id).is_none())
            .collect();

        for &view in &dropped {
            self.document_of_view.remove(&view);
            self.remove_from_entry(document, view);
        }
        dropped
    }

    pub fn counters(&self) -> LifecycleCounters {
        self.counters
    }

    fn remove_from_entry(&mut self, document: &DocumentId, view: ViewId) {
        if let Some(entry) = self.views_by_document.get_mut(document) {
            entry.remove(&view);
            if entry.is_empty() {
                self.views_by_document.remove(document);
            }
        }
    }
}
