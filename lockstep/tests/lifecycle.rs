//! View and file lifecycle handling: listener bookkeeping, registry
//! reconciliation, and anomaly tolerance.

use lockstep::{
    testing::{FakeHost, FakeView},
    DocumentId, SyncEngine, ViewId,
};

fn doc() -> DocumentId {
    DocumentId::new("/src/main.rs")
}

#[test]
fn destroyed_views_never_receive_another_write() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1).screen(0, 0));
    let b = host.insert(FakeView::new(2).screen(500, 0));

    let mut engine = SyncEngine::default();
    let d = doc();
    engine.view_created(&host, &d, a);
    engine.view_created(&host, &d, b);

    engine.view_destroyed(&host, b);
    host.remove(b);

    let live = engine.registry().live_views_of(&d, &host);
    assert_eq!(live.as_slice(), &[a]);
    assert!(!host.is_listening(b));

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);
    // Only one participant left, so nothing is written anywhere.
    assert!(host.writes(a).is_empty());
}

#[test]
fn duplicate_creation_attaches_no_second_listener() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1));

    let mut engine = SyncEngine::default();
    engine.view_created(&host, &doc(), a);
    engine.view_created(&host, &doc(), a);

    assert_eq!(engine.listened_views(), vec![a]);
    assert_eq!(engine.counters().views_created, 2);
}

#[test]
fn destroying_an_unknown_view_is_tolerated() {
    lockstep_log::test();

    let host = FakeHost::new();
    let mut engine = SyncEngine::default();

    engine.view_destroyed(&host, ViewId::new(42));
    assert_eq!(engine.counters().views_destroyed, 1);
    assert!(engine.listened_views().is_empty());
}

#[test]
fn file_close_reconciles_against_the_host() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1).screen(0, 0));
    let b = host.insert(FakeView::new(2).screen(500, 0));

    let mut engine = SyncEngine::default();
    let d = doc();
    engine.file_opened(&d);
    engine.view_created(&host, &d, a);
    engine.view_created(&host, &d, b);

    // The host tears b down without a view-destroyed notification; the
    // file-closed reconcile cleans it up.
    host.remove(b);
    engine.file_closed(&host, &d);

    assert!(!host.is_listening(b));
    assert!(host.is_listening(a));
    assert_eq!(engine.listened_views(), vec![a]);
    assert_eq!(engine.counters().files_opened, 1);
    assert_eq!(engine.counters().files_closed, 1);
}

#[test]
fn lifecycle_counters_track_every_notification() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1));

    let mut engine = SyncEngine::default();
    let d = doc();
    engine.file_opened(&d);
    engine.view_created(&host, &d, a);
    engine.view_destroyed(&host, a);
    engine.file_closed(&host, &d);

    let counters = engine.counters();
    assert_eq!(counters.files_opened, 1);
    assert_eq!(counters.views_created, 1);
    assert_eq!(counters.views_destroyed, 1);
    assert_eq!(counters.files_closed, 1);
}
