//! End-to-end synchronization scenarios across split views.
//!
//! Geometry model (see `lockstep::testing`): 10px lines, 390px viewports,
//! so every view shows 40 lines and scroll offsets are `line * 10`.

use lockstep::{
    testing::{FakeHost, FakeView},
    DocumentId, SyncConfig, SyncEngine,
};

fn doc() -> DocumentId {
    DocumentId::new("/src/main.rs")
}

/// Three side-by-side views of one document, engine already listening.
fn three_pane_host() -> (FakeHost, SyncEngine, [lockstep::ViewId; 3]) {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1).screen(0, 0));
    let b = host.insert(FakeView::new(2).screen(500, 0));
    let c = host.insert(FakeView::new(3).screen(1000, 0));

    let mut engine = SyncEngine::new(SyncConfig::default());
    let d = doc();
    engine.view_created(&host, &d, a);
    engine.view_created(&host, &d, b);
    engine.view_created(&host, &d, c);

    (host, engine, [a, b, c])
}

#[test]
fn scrolling_touches_only_immediate_neighbors() {
    let (host, mut engine, [a, b, c]) = three_pane_host();

    // A top 0 -> 20. B is adjacent; C is only adjacent to B and must wait
    // for B's own cascade event.
    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);

    assert_eq!(host.writes(b).len(), 1);
    assert!(host.writes(c).is_empty());

    // B's new top is the master's extent minus the overlap bias:
    // 20 - 2 + 1 + 40 = 59 = A's bottom line.
    assert_eq!(host.top_line(b), 59);
}

#[test]
fn cascade_reaches_the_far_view_through_the_middle_one() {
    let (host, mut engine, [a, b, c]) = three_pane_host();

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);
    // The host would now fire B's own scroll-changed event.
    engine.scroll_changed(&host, b);

    assert_eq!(host.writes(c).len(), 1);
    assert_eq!(host.top_line(c), 98); // 59 - 2 + 1 + 40

    // The cascade also converges: B's left-neighbor recompute lands A
    // exactly where it already is, so A is never rewritten.
    assert!(host.writes(a).is_empty());
}

#[test]
fn second_pass_without_movement_writes_nothing() {
    let (host, mut engine, [a, b, _]) = three_pane_host();

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);
    let writes_after_first = host.writes(b).len();

    engine.scroll_changed(&host, a);
    assert_eq!(host.writes(b).len(), writes_after_first);
}

#[test]
fn neighbor_views_share_exactly_the_overlap_anchor() {
    let (host, mut engine, [a, b, _]) = three_pane_host();

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);

    // Master shows lines 20..=59, neighbor 59..=98: one shared line.
    let master_bottom = host.top_line(a) + 39;
    assert_eq!(host.top_line(b), master_bottom);
}

#[test]
fn negative_targets_are_clamped_to_the_document_start() {
    let (host, mut engine, [a, b, _]) = three_pane_host();

    // B at the document start: A's target goes negative and clamps to 0.
    host.set_scroll_offset(a, 700);
    engine.scroll_changed(&host, b);

    assert_eq!(host.scroll_offset(a), 0);
    assert_eq!(host.top_line(a), 0);
}

#[test]
fn a_single_visible_view_never_triggers_a_write() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let only = host.insert(FakeView::new(1).screen(0, 0));

    let mut engine = SyncEngine::default();
    engine.view_created(&host, &doc(), only);

    host.set_scroll_offset(only, 300);
    engine.scroll_changed(&host, only);
    assert!(host.writes(only).is_empty());
}

#[test]
fn hidden_views_do_not_participate() {
    let (host, mut engine, [a, b, c]) = three_pane_host();

    // With B minimized, A and C are not adjacent through it; C becomes A's
    // direct right neighbor.
    host.set_showing(b, false);
    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);

    assert!(host.writes(b).is_empty());
    assert_eq!(host.writes(c).len(), 1);
}

#[test]
fn sub_line_positions_are_preserved_across_views() {
    let (host, mut engine, [a, b, _]) = three_pane_host();

    // 5px into line 20: the neighbor lands 5px into its own target line.
    host.set_scroll_offset(a, 205);
    engine.scroll_changed(&host, a);
    assert_eq!(host.scroll_offset(b), 595);
}

#[test]
fn header_chrome_is_compensated_between_views() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1).screen(0, 0));
    let b = host.insert(FakeView::new(2).screen(500, 0).header(24));

    let mut engine = SyncEngine::default();
    let d = doc();
    engine.view_created(&host, &d, a);
    engine.view_created(&host, &d, b);

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);
    assert_eq!(host.scroll_offset(b), 590 + 24);
}

#[test]
fn views_of_other_documents_are_untouched() {
    lockstep_log::test();

    let mut host = FakeHost::new();
    let a = host.insert(FakeView::new(1).screen(0, 0));
    let b = host.insert(FakeView::new(2).screen(500, 0));
    let other = host.insert(FakeView::new(3).screen(1000, 0));

    let mut engine = SyncEngine::default();
    let d = doc();
    engine.view_created(&host, &d, a);
    engine.view_created(&host, &d, b);
    engine.view_created(&host, &DocumentId::new("/src/other.rs"), other);

    host.set_scroll_offset(a, 200);
    engine.scroll_changed(&host, a);

    assert_eq!(host.writes(b).len(), 1);
    assert!(host.writes(other).is_empty());
}
