//! Derivation of a view's line-based visual position from its pixel geometry.

use crate::{
    error::{DegenerateViewportSnafu, Result},
    geometry::PixelPoint,
    host::{ViewId, ViewPort},
};
use snafu::ensure;

/// Where a view's visible area sits in visual-line space, captured at one
/// instant.
///
/// Derived, never stored: geometry can change between events (folding,
/// resize, reflow), so every synchronization pass recomputes this from the
/// live [`ViewPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSnapshot {
    /// First visual line whose pixels are inside the visible area.
    pub top_line: u32,
    /// Last visual line whose pixels are inside the visible area.
    pub bottom_line: u32,
    /// `bottom_line - top_line + 1`, both endpoints inclusive.
    pub lines_visible: u32,
    /// Column at the visible area's left edge, kept to preserve the
    /// horizontal alignment reference when converting back to pixels.
    pub column: u32,
    /// The vertical scroll offset the snapshot was taken at, in pixels.
    pub vertical_scroll_offset: i32,
}

impl ViewportSnapshot {
    /// Capture the current viewport of `view`.
    ///
    /// Fails with [`Error::DegenerateViewport`](crate::Error) when the
    /// geometry yields fewer than one visible line; that is a host layout
    /// bug and must not be propagated into offset arithmetic.
    pub fn capture(id: ViewId, view: &dyn ViewPort) -> Result<Self> {
        let area = view.visible_rect();
        let offset = view.vertical_scroll_offset();

        // Convert through the host so folding is accounted for: these are
        // visual lines, not raw source lines.
        let top = view.pixel_to_visual(PixelPoint::new(area.x, offset));
        let bottom = view.pixel_to_visual(PixelPoint::new(area.x, offset + area.height));

        let lines_visible = i64::from(bottom.line) - i64::from(top.line) + 1;
        ensure!(
            lines_visible >= 1,
            DegenerateViewportSnafu {
                view: id,
                lines_visible,
            }
        );

        Ok(Self {
            top_line: top.line,
            bottom_line: bottom.line,
            lines_visible: lines_visible as u32,
            column: top.column,
            vertical_scroll_offset: offset,
        })
    }
}
