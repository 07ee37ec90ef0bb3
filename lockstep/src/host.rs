//! Capability interfaces the hosting editor provides to the engine.
//!
//! The engine never owns views or documents. It holds opaque ids and resolves
//! them through [`Host`] at the moment of use, so a view that the host has
//! torn down simply stops resolving.

use crate::geometry::{PixelPoint, PixelRect, VisualPosition};
use compact_str::CompactString;
use std::fmt;

/// Opaque, stable handle for one view, supplied by the host adapter.
///
/// Identity only -- two ids compare equal exactly when the host considers
/// them the same view. Never derived from view contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Canonical identifier for a shared document, typically its canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(CompactString);

impl DocumentId {
    pub fn new(canonical: impl AsRef<str>) -> Self {
        Self(CompactString::new(canonical.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-view geometry and scrolling surface.
///
/// Backed by the host's rendering/layout engine; every call reads live state.
/// Geometry can change between any two calls (folding, resize, reflow), so
/// callers must not cache results across events.
pub trait ViewPort {
    /// Whether the view is currently laid out on screen.
    fn is_showing(&self) -> bool;

    /// Top-left corner of the view on the screen, `None` while not showing.
    fn screen_position(&self) -> Option<PixelPoint>;

    /// The visible content rectangle, in the view's own pixel space.
    fn visible_rect(&self) -> PixelRect;

    /// Height of one rendered line in pixels. Always positive.
    fn line_height(&self) -> i32;

    /// Height of any fixed non-scrolling chrome above the content (for
    /// example a file-state banner), zero when absent.
    fn header_height(&self) -> i32;

    /// Current vertical scroll offset in pixels.
    fn vertical_scroll_offset(&self) -> i32;

    fn pixel_to_visual(&self, point: PixelPoint) -> VisualPosition;

    fn visual_to_pixel(&self, position: VisualPosition) -> PixelPoint;

    /// Scroll the view's content to the given vertical pixel offset.
    fn scroll_vertically(&self, offset: i32);

    fn suspend_animation(&self);

    fn resume_animation(&self);
}

/// Host-side lookup and listener plumbing.
///
/// `view` returns `None` once the host has destroyed the view; the engine
/// treats that as "exclude from this pass", never as an error.
pub trait Host {
    fn view(&self, id: ViewId) -> Option<&dyn ViewPort>;

    /// Begin delivering scroll-changed notifications for `view` to the engine.
    fn attach_scroll_listener(&self, view: ViewId);

    /// Stop delivering scroll-changed notifications for `view`.
    fn detach_scroll_listener(&self, view: ViewId);
}
