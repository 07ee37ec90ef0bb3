//! The core synchronization pass: align a master view's immediate screen
//! neighbors with its viewport.
//!
//! Only the two adjacent views are touched per event. Farther views are
//! reached by the cascade of each neighbor's own scroll-changed event, which
//! the guards in [`crate::guard`] keep bounded.

use crate::{
    config::SyncConfig,
    error::{MasterNotFoundSnafu, Result},
    geometry::VisualPosition,
    guard::AnimationPause,
    host::{DocumentId, Host, ViewId},
    viewport::ViewportSnapshot,
};
use tracing::debug;

/// Which side of the master a neighbor sits on, as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborSide {
    Left,
    Right,
}

impl NeighborSide {
    /// Direction coefficient: content continues backward through a left
    /// neighbor and forward through a right one.
    fn coefficient(self) -> i64 {
        match self {
            NeighborSide::Left => -1,
            NeighborSide::Right => 1,
        }
    }
}

/// What one pass did, for logs and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    /// Scroll writes issued to neighbors.
    pub writes: usize,
    /// Neighbors already at their target (idempotent passes skip the write).
    pub skipped: usize,
}

/// Computes and applies neighbor scroll offsets for one master scroll event.
#[derive(Debug)]
pub struct ScrollSynchronizer {
    config: SyncConfig,
}

impl ScrollSynchronizer {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run one pass: locate `master` in `ordered` and align its immediate
    /// neighbors. `ordered` must come from [`crate::order::screen_order`]
    /// over the document's live views.
    pub fn sync(
        &self,
        host: &dyn Host,
        document: &DocumentId,
        master: ViewId,
        ordered: &[ViewId],
    ) -> Result<PassOutcome> {
        let index = ordered
            .iter()
            .position(|&view| view == master)
            .ok_or_else(|| {
                MasterNotFoundSnafu {
                    view: master,
                    document: document.clone(),
                }
                .build()
            })?;

        let mut outcome = PassOutcome::default();
        if index > 0 {
            self.align(host, master, ordered[index - 1], NeighborSide::Left, &mut outcome)?;
        }
        if index + 1 < ordered.len() {
            self.align(host, master, ordered[index + 1], NeighborSide::Right, &mut outcome)?;
        }
        Ok(outcome)
    }

    /// Align one neighbor with the master.
    ///
    /// A left neighbor's top is pushed up by roughly its own height so its
    /// bottom lands on the master's top; a right neighbor's top is pushed
    /// down past the master's extent. The overlap bias pulls both back by a
    /// couple of lines so the two views share a visible anchor line instead
    /// of abutting at the boundary.
    fn align(
        &self,
        host: &dyn Host,
        master_id: ViewId,
        neighbor_id: ViewId,
        side: NeighborSide,
        outcome: &mut PassOutcome,
    ) -> Result<()> {
        // A view that stopped showing mid-pass is excluded, not an error.
        let Some(master) = host.view(master_id) else {
            return Ok(());
        };
        let Some(neighbor) = host.view(neighbor_id) else {
            return Ok(());
        };
        if !master.is_showing() || !neighbor.is_showing() {
            return Ok(());
        }

        let master_snapshot = ViewportSnapshot::capture(master_id, master)?;
        let neighbor_snapshot = ViewportSnapshot::capture(neighbor_id, neighbor)?;

        let c = side.coefficient();
        let adjusted_top =
            i64::from(master_snapshot.top_line) - c * i64::from(self.config.overlap_lines);
        let target_top =
            (adjusted_top + c + c * i64::from(neighbor_snapshot.lines_visible)).max(0);

        if target_top == i64::from(neighbor_snapshot.top_line) {
            debug!(
                master = %master_id,
                neighbor = %neighbor_id,
                ?side,
                target_top,
                "neighbor already aligned"
            );
            outcome.skipped += 1;
            return Ok(());
        }

        // Clamped at 0 above, and visual lines fit in u32.
        let target = VisualPosition::new(target_top as u32, master_snapshot.column);
        let anchor = neighbor.visual_to_pixel(target);

        // Sub-line correction keeps the neighbor aligned with the master's
        // fractional scroll position, not merely the same integer line.
        let line_height = master.line_height().max(1);
        let correction = master_snapshot.vertical_scroll_offset.rem_euclid(line_height);
        let header_delta = neighbor.header_height() - master.header_height();
        let offset = (anchor.y + correction + header_delta).max(0);

        debug!(
            master = %master_id,
            neighbor = %neighbor_id,
            ?side,
            ?master_snapshot,
            ?neighbor_snapshot,
            target_top,
            offset,
            "scrolling neighbor"
        );

        let _animation = AnimationPause::new(neighbor);
        neighbor.scroll_vertically(offset);
        outcome.writes += 1;
        Ok(())
    }
}
