// Scroll state for TUI panels
//
// Each panel owns its ScrollState: position, content size, viewport size,
// all in lines. The feed panel's state doubles as the controller's viewport
// metrics, so "reached the bottom" is judged from exactly what is on screen.
//
// The logs panel follows new content while the view sits at the bottom; the
// feed never auto-follows, appended pages stay below the fold until the user
// scrolls to them.

use crate::feed::ViewportMetrics;

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line index at the top of the viewport
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,

    /// Keep the view pinned to the bottom as content grows.
    /// Scrolling up disables this.
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state that follows new content
    pub fn following() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Scroll state that stays where the user put it
    pub fn manual() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: false,
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by `lines`
    pub fn scroll_up(&mut self, lines: usize) {
        if lines > 0 && self.offset > 0 {
            self.offset = self.offset.saturating_sub(lines);
            self.auto_follow = false;
        }
    }

    /// Scroll down by `lines`, never past the last full viewport
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.max(1));
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.max(1));
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount that makes `start..start + len` visible.
    /// Spans taller than the viewport are aligned to their first line.
    pub fn ensure_visible(&mut self, start: usize, len: usize) {
        let end = start + len;
        if start < self.offset || len >= self.viewport {
            self.offset = start;
        } else if end > self.offset + self.viewport {
            self.offset = end - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_line, end_line)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Get total content size
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get viewport size
    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::manual()
    }
}

impl ViewportMetrics for ScrollState {
    fn viewport_height(&self) -> usize {
        self.viewport
    }

    fn scroll_offset(&self) -> usize {
        self.offset
    }

    fn content_height(&self) -> usize {
        self.total
    }
}
