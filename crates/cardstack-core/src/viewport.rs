use crate::{EdgeInsets, Rect, Size, Vec2};

/// Snapshot of the scrolling viewport, supplied fresh by the host for every
/// layout pass. All y positions are in content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportGeometry {
    pub frame: Rect,
    pub content_offset: Vec2,
    pub content_inset: EdgeInsets,
    pub content_size: Size,
    pub item_count: usize,
}

impl ViewportGeometry {
    pub fn new(frame_size: Size, item_count: usize) -> Self {
        Self {
            frame: Rect::new(0.0, 0.0, frame_size.width, frame_size.height),
            item_count,
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, y: f32) -> Self {
        self.content_offset = Vec2::new(self.content_offset.x, y);
        self
    }

    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.content_inset = insets;
        self
    }

    pub fn with_content_size(mut self, size: Size) -> Self {
        self.content_size = size;
        self
    }

    /// Scroll position measured from the top inset; 0 when scrolled to the top.
    pub fn offset_top(&self) -> f32 {
        self.content_offset.y + self.content_inset.top
    }

    /// Bottom edge of the visible region in content coordinates.
    pub fn visible_max_y(&self) -> f32 {
        self.content_offset.y + self.frame.h
    }

    /// Valid range for `content_offset.y`.
    pub fn scroll_range(&self) -> (f32, f32) {
        let min = -self.content_inset.top;
        let max = self.content_size.height.max(self.frame.h) - self.frame.h
            + self.content_inset.bottom;
        (min, max.max(min))
    }
}

/// Holds the bottom inset steady while a software keyboard is on screen, so the
/// bottom stack does not jump when the host shrinks the viewport for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BottomInsetLatch {
    frozen: bool,
    last_bottom: f32,
}

impl BottomInsetLatch {
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns the geometry with the bottom inset the layout should use.
    pub fn resolve(&mut self, mut viewport: ViewportGeometry) -> ViewportGeometry {
        if self.frozen {
            viewport.content_inset.bottom = self.last_bottom;
        } else {
            self.last_bottom = viewport.content_inset.bottom;
        }
        viewport
    }
}
