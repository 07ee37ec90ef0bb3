//! Pixel and visual-line coordinate types shared across the engine.
//!
//! Pixel coordinates are signed: a view's screen position can be negative on
//! multi-monitor setups. Visual positions are post-folding line/column indices
//! in the host's rendered coordinate space, always non-negative.

/// A point in pixel space (screen or view-content coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle, typically a view's visible area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rendered (post-folding) line/column position.
///
/// Distinct from raw source line numbers: folded regions collapse to a single
/// visual line, so visual indices are only meaningful to the host's layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct VisualPosition {
    pub line: u32,
    pub column: u32,
}

impl VisualPosition {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}
