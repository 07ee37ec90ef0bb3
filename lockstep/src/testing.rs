//! In-memory host fixture for exercising the engine without an editor.
//!
//! [`FakeView`] models a view with a linear layout: every line is
//! `line_height` pixels tall and every column [`CHAR_WIDTH`] pixels wide, so
//! pixel/visual conversions are exact and assertions stay readable.

use crate::{
    geometry::{PixelPoint, PixelRect, VisualPosition},
    host::{Host, ViewId, ViewPort},
};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

/// Column width of the fake layout, in pixels.
pub const CHAR_WIDTH: i32 = 8;

#[derive(Debug)]
struct FakeViewState {
    showing: bool,
    screen: PixelPoint,
    visible_rect: PixelRect,
    line_height: i32,
    header_height: i32,
    scroll_offset: i32,
    /// Every offset passed to `scroll_vertically`, oldest first.
    writes: Vec<i32>,
    animation_depth: i32,
    writes_while_suspended: usize,
}

/// One scriptable view. Build it fluently, then [`FakeHost::insert`] it.
#[derive(Debug)]
pub struct FakeView {
    id: ViewId,
    state: Mutex<FakeViewState>,
}

impl FakeView {
    /// A showing view at screen (0, 0) with a 390px-tall viewport of
    /// 10px lines (40 visible lines) and no header.
    pub fn new(raw_id: u64) -> Self {
        Self {
            id: ViewId::new(raw_id),
            state: Mutex::new(FakeViewState {
                showing: true,
                screen: PixelPoint::new(0, 0),
                visible_rect: PixelRect::new(0, 0, 400, 390),
                line_height: 10,
                header_height: 0,
                scroll_offset: 0,
                writes: Vec::new(),
                animation_depth: 0,
                writes_while_suspended: 0,
            }),
        }
    }

    pub fn screen(self, x: i32, y: i32) -> Self {
        self.state.lock().screen = PixelPoint::new(x, y);
        self
    }

    pub fn viewport_height(self, height: i32) -> Self {
        self.state.lock().visible_rect.height = height;
        self
    }

    pub fn line_height(self, pixels: i32) -> Self {
        self.state.lock().line_height = pixels;
        self
    }

    pub fn header(self, pixels: i32) -> Self {
        self.state.lock().header_height = pixels;
        self
    }

    pub fn scrolled_to(self, offset: i32) -> Self {
        self.state.lock().scroll_offset = offset;
        self
    }

    pub fn hidden(self) -> Self {
        self.state.lock().showing = false;
        self
    }

    pub fn id(&self) -> ViewId {
        self.id
    }
}

impl ViewPort for FakeView {
    fn is_showing(&self) -> bool {
        self.state.lock().showing
    }

    fn screen_position(&self) -> Option<PixelPoint> {
        let state = self.state.lock();
        state.showing.then_some(state.screen)
    }

    fn visible_rect(&self) -> PixelRect {
        self.state.lock().visible_rect
    }

    fn line_height(&self) -> i32 {
        self.state.lock().line_height
    }

    fn header_height(&self) -> i32 {
        self.state.lock().header_height
    }

    fn vertical_scroll_offset(&self) -> i32 {
        self.state.lock().scroll_offset
    }

    fn pixel_to_visual(&self, point: PixelPoint) -> VisualPosition {
        let line_height = self.state.lock().line_height.max(1);
        VisualPosition::new(
            (point.y.max(0) / line_height) as u32,
            (point.x.max(0) / CHAR_WIDTH) as u32,
        )
    }

    fn visual_to_pixel(&self, position: VisualPosition) -> PixelPoint {
        let line_height = self.state.lock().line_height;
        PixelPoint::new(
            position.column as i32 * CHAR_WIDTH,
            position.line as i32 * line_height,
        )
    }

    fn scroll_vertically(&self, offset: i32) {
        let mut state = self.state.lock();
        state.scroll_offset = offset;
        state.writes.push(offset);
        if state.animation_depth > 0 {
            state.writes_while_suspended += 1;
        }
    }

    fn suspend_animation(&self) {
        self.state.lock().animation_depth += 1;
    }

    fn resume_animation(&self) {
        self.state.lock().animation_depth -= 1;
    }
}

/// A scriptable host holding fake views and a listener set.
#[derive(Debug, Default)]
pub struct FakeHost {
    views: FxHashMap<ViewId, FakeView>,
    listeners: Mutex<FxHashSet<ViewId>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view to the host, returning its id.
    pub fn insert(&mut self, view: FakeView) -> ViewId {
        let id = view.id();
        self.views.insert(id, view);
        id
    }

    /// Tear a view down host-side, as if the editor destroyed it.
    pub fn remove(&mut self, view: ViewId) {
        self.views.remove(&view);
    }

    pub fn is_listening(&self, view: ViewId) -> bool {
        self.listeners.lock().contains(&view)
    }

    pub fn set_showing(&self, view: ViewId, showing: bool) {
        if let Some(view) = self.views.get(&view) {
            view.state.lock().showing = showing;
        }
    }

    pub fn set_scroll_offset(&self, view: ViewId, offset: i32) {
        if let Some(view) = self.views.get(&view) {
            view.state.lock().scroll_offset = offset;
        }
    }

    pub fn scroll_offset(&self, view: ViewId) -> i32 {
        self.views[&view].state.lock().scroll_offset
    }

    /// The view's current top visual line under the linear layout.
    pub fn top_line(&self, view: ViewId) -> u32 {
        let state = self.views[&view].state.lock();
        (state.scroll_offset.max(0) / state.line_height.max(1)) as u32
    }

    /// All scroll writes issued to the view, oldest first.
    pub fn writes(&self, view: ViewId) -> Vec<i32> {
        self.views[&view].state.lock().writes.clone()
    }

    pub fn writes_while_suspended(&self, view: ViewId) -> usize {
        self.views[&view].state.lock().writes_while_suspended
    }

    pub fn animation_suspended(&self, view: ViewId) -> bool {
        self.views[&view].state.lock().animation_depth > 0
    }
}

impl Host for FakeHost {
    fn view(&self, id: ViewId) -> Option<&dyn ViewPort> {
        self.views.get(&id).map(|view| view as &dyn ViewPort)
    }

    fn attach_scroll_listener(&self, view: ViewId) {
        self.listeners.lock().insert(view);
    }

    fn detach_scroll_listener(&self, view: ViewId) {
        self.listeners.lock().remove(&view);
    }
}
