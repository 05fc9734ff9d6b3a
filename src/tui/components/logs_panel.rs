//! Logs panel component
//!
//! Shows the captured tracing output, newest at the bottom. Follows new
//! entries until the user selects one; Esc returns to following.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel, LogSnapshot};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,

    /// Selected entry (None = follow mode)
    selected: Option<usize>,

    /// Snapshot of the log buffer from the last sync
    entries: Vec<LogEntry>,

    /// Buffer eviction count at the last sync
    evicted: u64,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::following(),
            selected: None,
            entries: Vec::new(),
            evicted: 0,
        }
    }

    /// Take a fresh snapshot of the buffer (call each frame)
    ///
    /// Entries evicted since the last sync shift every index down, so the
    /// selection moves with its entry. If the selected entry itself was
    /// evicted the oldest remaining one is selected.
    pub fn sync_entries(&mut self, snapshot: LogSnapshot, area: Rect) {
        let LogSnapshot { entries, evicted } = snapshot;
        let shift = evicted.saturating_sub(self.evicted) as usize;
        self.evicted = evicted;

        let viewport = area.height.saturating_sub(2) as usize;
        if !self.scroll.auto_follow {
            self.scroll.scroll_up(shift);
        }
        self.scroll.update_dimensions(entries.len(), viewport);

        if let Some(idx) = self.selected {
            let idx = idx.saturating_sub(shift);
            self.selected = entries.len().checked_sub(1).map(|last| idx.min(last));
        }
        self.entries = entries;
    }

    fn selected_entry(&self) -> Option<&LogEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(idx, entry)| {
                let style = if focused && self.selected == Some(idx) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    log_level_style(entry.level, theme)
                };
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        let border_color = if focused {
            theme.panel_logs
        } else {
            theme.border
        };

        let title = if self.selected.is_some() && focused {
            " Logs [select] "
        } else if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for LogsPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        let index = index.min(self.entries.len() - 1);
        self.selected = Some(index);
        self.scroll.auto_follow = false;
        self.scroll.ensure_visible(index, 1);
    }

    fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// First selection starts from the newest entry
    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => self.select(idx - 1),
            None if !self.entries.is_empty() => self.select(self.entries.len() - 1),
            _ => {}
        }
    }
}

impl Copyable for LogsPanel {
    fn copy_text(&self) -> Option<String> {
        self.selected_entry().map(|entry| {
            format!(
                "{} {:5} {}: {}",
                entry.timestamp.to_rfc3339(),
                entry.level.as_str(),
                entry.target,
                entry.message
            )
        })
    }

    fn copy_description(&self) -> String {
        "log entry".to_string()
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = None;
                self.scroll.auto_follow = true;
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            KeyCode::Esc if self.selected.is_some() => {
                self.selected = None;
                self.scroll.auto_follow = true;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  y:copy  Esc:follow")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════════

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.debug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogBuffer;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn entry(i: usize) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "postscroll".to_string(),
            message: format!("entry {i}"),
        }
    }

    fn entries(n: usize) -> LogSnapshot {
        LogSnapshot {
            entries: (0..n).map(entry).collect(),
            evicted: 0,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn follows_new_entries_until_selection() {
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 7);

        panel.sync_entries(entries(10), area);
        assert_eq!(panel.scroll_state().offset(), 5);

        // First Up selects the newest entry
        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected_index(), Some(9));
        assert!(!panel.scroll_state().auto_follow);

        panel.sync_entries(entries(20), area);
        assert_eq!(panel.scroll_state().offset(), 5);

        panel.handle_key(key(KeyCode::Esc));
        panel.sync_entries(entries(20), area);
        assert_eq!(panel.scroll_state().offset(), 15);
    }

    #[test]
    fn copies_selected_entry() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries(3), Rect::new(0, 0, 60, 7));
        assert_eq!(panel.copy_text(), None);

        panel.handle_key(key(KeyCode::Up));
        panel.handle_key(key(KeyCode::Up));
        let text = panel.copy_text().unwrap();
        assert!(text.ends_with("INFO  postscroll: entry 1"));
    }

    #[test]
    fn selection_clamps_when_buffer_shrinks() {
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 7);
        panel.sync_entries(entries(10), area);
        panel.handle_key(key(KeyCode::Up));

        panel.sync_entries(entries(4), area);
        assert_eq!(panel.selected_index(), Some(3));
    }

    #[test]
    fn selection_follows_its_entry_across_eviction() {
        let buffer = LogBuffer::with_capacity(5);
        for i in 0..5 {
            buffer.add(entry(i));
        }
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 7);
        panel.sync_entries(buffer.snapshot(), area);

        // Select "entry 3"
        panel.handle_key(key(KeyCode::Up));
        panel.handle_key(key(KeyCode::Up));
        assert!(panel.copy_text().unwrap().ends_with("entry 3"));

        // Two new lines push "entry 0" and "entry 1" out
        buffer.add(entry(5));
        buffer.add(entry(6));
        panel.sync_entries(buffer.snapshot(), area);

        assert_eq!(panel.selected_index(), Some(1));
        assert!(panel.copy_text().unwrap().ends_with("entry 3"));
    }

    #[test]
    fn evicted_selection_falls_back_to_oldest_entry() {
        let buffer = LogBuffer::with_capacity(3);
        for i in 0..3 {
            buffer.add(entry(i));
        }
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 7);
        panel.sync_entries(buffer.snapshot(), area);
        panel.handle_key(key(KeyCode::Home));
        assert!(panel.copy_text().unwrap().ends_with("entry 0"));

        buffer.add(entry(3));
        panel.sync_entries(buffer.snapshot(), area);

        assert_eq!(panel.selected_index(), Some(0));
        assert!(panel.copy_text().unwrap().ends_with("entry 1"));
    }
}
