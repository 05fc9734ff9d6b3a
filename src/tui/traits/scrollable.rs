//! Scrollable and Selectable traits
//!
//! Components own their `ScrollState` and expose it here; the navigation
//! methods come for free.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: usize = 3;

/// Trait for components with scrollable content
pub trait Scrollable: Component {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    // ─────────────────────────────────────────────────────────────
    // Navigation - default implementations delegate to ScrollState
    // ─────────────────────────────────────────────────────────────

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up(1);
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down(1);
    }

    fn wheel_up(&mut self) {
        self.scroll_state_mut().scroll_up(WHEEL_LINES);
    }

    fn wheel_down(&mut self) {
        self.scroll_state_mut().scroll_down(WHEEL_LINES);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}

/// Extension trait for scrollable content made of selectable items
pub trait Selectable: Scrollable {
    fn selected_index(&self) -> Option<usize>;

    /// Select an item and bring it into view
    fn select(&mut self, index: usize);

    fn item_count(&self) -> usize;

    /// Select the next item (with bounds checking)
    fn select_next(&mut self) {
        match self.selected_index() {
            Some(current) if current + 1 < self.item_count() => self.select(current + 1),
            None if self.item_count() > 0 => self.select(0),
            _ => {}
        }
    }

    /// Select the previous item (with bounds checking)
    fn select_previous(&mut self) {
        match self.selected_index() {
            Some(current) if current > 0 => self.select(current - 1),
            None if self.item_count() > 0 => self.select(0),
            _ => {}
        }
    }

    fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    fn select_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.select(count - 1);
        }
    }
}
