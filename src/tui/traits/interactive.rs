//! Interactive trait for components that handle keyboard input
//!
//! ```text
//! KeyEvent
//!    │
//!    ▼
//! App (global keys: q, r, l, y, Tab)
//!    │ if not handled
//!    ▼
//! Focused component (Interactive::handle_key)
//!    │ Handled::Yes / Handled::No
//!    ▼
//! App (a handled key in the feed emits a scroll signal)
//! ```

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints for the status bar while this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
