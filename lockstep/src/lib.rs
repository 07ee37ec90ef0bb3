//! Lockstep keeps every visible view of one shared document scrolled
//! together: when the user scrolls a split pane or duplicated tab, its
//! screen-neighbors are repositioned so the content lines stay visually
//! aligned, with a small configurable overlap so adjacent views always share
//! an anchor line.
//!
//! The crate is a purely in-process reactive engine. The hosting editor owns
//! every view and document, delivers lifecycle and scroll notifications to
//! [`SyncEngine`], and exposes per-view geometry through the [`ViewPort`]
//! and [`Host`] traits. Each scroll event repositions only the master's two
//! immediate neighbors; farther views follow through the cascade of their
//! own scroll events, bounded by a per-view reentrancy guard.
//!
//! ```
//! use lockstep::{testing::{FakeHost, FakeView}, DocumentId, SyncEngine};
//!
//! let mut host = FakeHost::new();
//! let left = host.insert(FakeView::new(1).screen(0, 0));
//! let right = host.insert(FakeView::new(2).screen(500, 0));
//!
//! let mut engine = SyncEngine::default();
//! let doc = DocumentId::new("/src/main.rs");
//! engine.view_created(&host, &doc, left);
//! engine.view_created(&host, &doc, right);
//!
//! host.set_scroll_offset(left, 200);
//! engine.scroll_changed(&host, left);
//! assert!(host.scroll_offset(right) > 0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod guard;
pub mod host;
pub mod order;
pub mod registry;
pub mod sync;
pub mod testing;
pub mod viewport;

pub use config::SyncConfig;
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use geometry::{PixelPoint, PixelRect, VisualPosition};
pub use host::{DocumentId, Host, ViewId, ViewPort};
pub use registry::{LifecycleCounters, ViewRegistry};
pub use sync::{NeighborSide, PassOutcome, ScrollSynchronizer};
pub use viewport::ViewportSnapshot;
