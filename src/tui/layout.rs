//! Width breakpoints for layout decisions.
//!
//! Keeps width thresholds in one place instead of scattered through render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: split pane, minimal terminal
    Compact,
    /// 60-99 cols: half-screen
    Normal,
    /// 100+ cols: full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Rows given to the logs panel when it is shown
    pub fn logs_height(&self, total_height: u16) -> u16 {
        let share = match self {
            Breakpoint::Compact => total_height / 4,
            Breakpoint::Normal | Breakpoint::Wide => total_height / 3,
        };
        share.max(5)
    }
}
