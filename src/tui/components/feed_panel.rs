//! Feed panel component
//!
//! Displays the loaded posts as a scrollable column of cards, with a one-line
//! footer for the loading indicator and the error text.
//!
//! # Scroll Architecture
//!
//! Scrolling is line-based: every card is laid out to plain lines for the
//! current width and the ScrollState counts those lines. That state is what
//! App hands to the feed controller as viewport metrics, so "reached the
//! bottom" means the last rendered line is on screen.
//!
//! Cards are created once per post when it first arrives and kept for the
//! panel's lifetime, so a post's photo seed is drawn exactly once.

use super::post_card::{layout_card, styled_line, truncate_to_width, CardLine};
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::config::ImageConfig;
use crate::feed::{FeedController, FeedState, Post, PostCard};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Controller state the panel shows, synced each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStatus {
    pub state: FeedState,
    pub error_message: String,
    pub page: u32,
}

impl FeedStatus {
    pub fn from_controller(controller: &FeedController) -> Self {
        Self {
            state: controller.state(),
            error_message: controller.error_message().to_string(),
            page: controller.page(),
        }
    }
}

impl Default for FeedStatus {
    fn default() -> Self {
        Self {
            state: FeedState::Idle,
            error_message: String::new(),
            page: 1,
        }
    }
}

/// Post feed component
pub struct FeedPanel {
    scroll: ScrollState,

    cards: Vec<PostCard>,

    /// Selected card (None until the user navigates)
    selected: Option<usize>,

    /// Laid-out lines per card for `layout_width`
    layout: Vec<Vec<CardLine>>,

    /// First content line of each card
    starts: Vec<usize>,

    /// Width the layout was computed for (0 = not laid out yet)
    layout_width: usize,

    status: FeedStatus,
}

impl FeedPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            cards: Vec::new(),
            selected: None,
            layout: Vec::new(),
            starts: Vec::new(),
            layout_width: 0,
            status: FeedStatus::default(),
        }
    }

    /// Create cards for posts that arrived since the last sync
    ///
    /// Posts are only ever appended, so the first `cards.len()` posts
    /// already have cards.
    pub fn sync_posts(&mut self, posts: &[Post], image: &ImageConfig) {
        if posts.len() <= self.cards.len() {
            return;
        }

        for post in &posts[self.cards.len()..] {
            let card = PostCard::random(post, image);
            if self.layout_width > 0 {
                self.push_layout(layout_card(&card, self.layout_width));
            }
            self.cards.push(card);
        }

        let total = self.total_lines();
        let viewport = self.scroll.viewport();
        self.scroll.update_dimensions(total, viewport);
    }

    pub fn set_status(&mut self, status: FeedStatus) {
        self.status = status;
    }

    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn selected_card(&self) -> Option<&PostCard> {
        self.selected.and_then(|idx| self.cards.get(idx))
    }

    /// Fit the layout to the panel area.
    ///
    /// Returns true when the viewport size changed, which App treats as a
    /// resize and answers with a scroll signal.
    pub fn fit(&mut self, area: Rect) -> bool {
        let (list, _) = Self::split(area);
        // One column on the right is left for the scrollbar
        let width = list.width.saturating_sub(1) as usize;
        let viewport = list.height as usize;

        let changed = width != self.layout_width || viewport != self.scroll.viewport();

        if width != self.layout_width {
            self.layout_width = width;
            self.layout.clear();
            self.starts.clear();
            let layouts: Vec<_> = self.cards.iter().map(|c| layout_card(c, width)).collect();
            for lines in layouts {
                self.push_layout(lines);
            }
        }

        let total = self.total_lines();
        self.scroll.update_dimensions(total, viewport);
        changed
    }

    fn push_layout(&mut self, lines: Vec<CardLine>) {
        self.starts.push(self.total_lines());
        self.layout.push(lines);
    }

    fn total_lines(&self) -> usize {
        match (self.starts.last(), self.layout.last()) {
            (Some(start), Some(lines)) => start + lines.len(),
            _ => 0,
        }
    }

    /// Card whose lines include `line`
    fn card_at_line(&self, line: usize) -> Option<usize> {
        if self.starts.is_empty() {
            return None;
        }
        let idx = self.starts.partition_point(|&start| start <= line);
        Some(idx.saturating_sub(1))
    }

    /// Block border, inner list area, footer line
    fn split(area: Rect) -> (Rect, Rect) {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        (chunks[0], chunks[1])
    }

    fn visible_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let (start, end) = self.scroll.visible_range();
        let Some(first) = self.card_at_line(start) else {
            return Vec::new();
        };

        let mut lines = Vec::with_capacity(end - start);
        for (idx, card_lines) in self.layout.iter().enumerate().skip(first) {
            let card_start = self.starts[idx];
            if card_start >= end {
                break;
            }
            let selected = self.selected == Some(idx) && ctx.is_focused(self.id());
            for (offset, line) in card_lines.iter().enumerate() {
                let line_no = card_start + offset;
                if line_no < start {
                    continue;
                }
                if line_no >= end {
                    break;
                }
                lines.push(styled_line(line, ctx.theme, selected));
            }
        }
        lines
    }

    fn footer_line(&self, ctx: &RenderContext, width: usize) -> Line<'static> {
        let theme = ctx.theme;
        let (text, style) = match self.status.state {
            FeedState::Loading => (
                format!(" {} Loading page {}…", ctx.spinner_char(), self.status.page),
                Style::default().fg(theme.loading),
            ),
            FeedState::Error => (
                format!(" ✗ {}  (r: retry)", self.status.error_message),
                Style::default().fg(theme.error),
            ),
            FeedState::Idle if self.cards.is_empty() => {
                (" No posts".to_string(), Style::default().fg(theme.muted))
            }
            FeedState::Idle => (
                " ↓ scroll to the end for more".to_string(),
                Style::default().fg(theme.muted),
            ),
        };
        Line::styled(truncate_to_width(&text, width), style)
    }
}

impl Default for FeedPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for FeedPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Feed
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let border_color = if ctx.is_focused(self.id()) {
            theme.panel_feed
        } else {
            theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(format!(" Posts ({}) ", self.cards.len()));
        f.render_widget(block, area);

        let (list, footer) = Self::split(area);
        f.render_widget(Paragraph::new(self.visible_lines(ctx)), list);
        f.render_widget(
            Paragraph::new(self.footer_line(ctx, footer.width as usize)),
            footer,
        );

        render_scrollbar(f, list, &self.scroll, ScrollbarStyle::Arrows);
    }
}

impl Scrollable for FeedPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for FeedPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        if self.cards.is_empty() {
            return;
        }
        let index = index.min(self.cards.len() - 1);
        self.selected = Some(index);
        if let (Some(&start), Some(lines)) = (self.starts.get(index), self.layout.get(index)) {
            self.scroll.ensure_visible(start, lines.len());
        }
    }

    fn item_count(&self) -> usize {
        self.cards.len()
    }
}

impl Copyable for FeedPanel {
    fn copy_text(&self) -> Option<String> {
        self.selected_card().map(PostCard::to_plain_text)
    }

    fn copy_description(&self) -> String {
        "post".to_string()
    }
}

impl Interactive for FeedPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let last = self.cards.len().checked_sub(1);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                // On the last card keep moving so tall cards can be read through
                if self.selected.is_some() && self.selected == last {
                    self.scroll_down();
                } else {
                    self.select_next();
                }
                Handled::Yes
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == Some(0) {
                    self.scroll_up();
                } else {
                    self.select_previous();
                }
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                self.selected = self.card_at_line(self.scroll.offset());
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                self.selected = self.card_at_line(self.scroll.offset());
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_last();
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::Esc if self.selected.is_some() => {
                self.selected = None;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  PgUp/PgDn:page  y:copy  r:retry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ViewportMetrics;
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|id| Post::new(format!("Title {id}"), "short body").with_id(id))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Panel with `n` posts fitted to a 40x12 area
    fn fitted(n: u64) -> FeedPanel {
        let mut panel = FeedPanel::new();
        panel.sync_posts(&posts(n), &ImageConfig::default());
        panel.fit(Rect::new(0, 0, 40, 12));
        panel
    }

    #[test]
    fn cards_are_created_once_per_post() {
        let mut panel = FeedPanel::new();
        let image = ImageConfig::default();

        panel.sync_posts(&posts(3), &image);
        let first = panel.cards()[0].clone();
        assert_eq!(panel.cards().len(), 3);

        panel.sync_posts(&posts(5), &image);
        assert_eq!(panel.cards().len(), 5);
        assert_eq!(panel.cards()[0], first);
        assert_eq!(panel.cards()[4].title, "Title 5");
    }

    #[test]
    fn fit_reports_viewport_changes() {
        let mut panel = FeedPanel::new();
        assert!(panel.fit(Rect::new(0, 0, 40, 12)));
        assert!(!panel.fit(Rect::new(0, 0, 40, 12)));
        assert!(panel.fit(Rect::new(0, 0, 40, 20)));
        assert!(panel.fit(Rect::new(0, 0, 60, 20)));
    }

    #[test]
    fn layout_tracks_appended_cards() {
        let mut panel = fitted(2);
        // 12 rows: 2 borders + 1 footer leaves 9 lines of viewport
        assert_eq!(panel.scroll_state().viewport(), 9);
        // Each short card: title, body, image, spacer
        assert_eq!(panel.scroll_state().total(), 8);

        panel.sync_posts(&posts(4), &ImageConfig::default());
        assert_eq!(panel.scroll_state().total(), 16);
        assert_eq!(panel.starts, vec![0, 4, 8, 12]);
    }

    #[test]
    fn short_feed_counts_as_bottom() {
        let panel = fitted(1);
        assert!(panel.scroll_state().reached_bottom());
    }

    #[test]
    fn selecting_down_scrolls_to_the_bottom() {
        let mut panel = fitted(5);
        assert!(!panel.scroll_state().reached_bottom());

        for _ in 0..5 {
            panel.handle_key(key(KeyCode::Down));
        }
        assert_eq!(panel.selected_index(), Some(4));
        assert!(panel.scroll_state().reached_bottom());
    }

    #[test]
    fn end_and_home_jump() {
        let mut panel = fitted(10);

        panel.handle_key(key(KeyCode::End));
        assert_eq!(panel.selected_index(), Some(9));
        assert!(panel.scroll_state().reached_bottom());

        panel.handle_key(key(KeyCode::Home));
        assert_eq!(panel.selected_index(), Some(0));
        assert_eq!(panel.scroll_state().offset(), 0);
    }

    #[test]
    fn page_down_moves_selection_with_view() {
        let mut panel = fitted(10);
        panel.handle_key(key(KeyCode::PageDown));
        assert_eq!(panel.scroll_state().offset(), 9);
        // Line 9 belongs to the third card (lines 8..12)
        assert_eq!(panel.selected_index(), Some(2));
    }

    #[test]
    fn copy_uses_selected_card() {
        let mut panel = fitted(3);
        assert_eq!(panel.copy_text(), None);

        panel.handle_key(key(KeyCode::Down));
        let text = panel.copy_text().unwrap();
        assert!(text.starts_with("Title 1\n\nshort body\n\nhttps://picsum.photos/seed/"));
    }

    #[test]
    fn esc_clears_selection_then_bubbles() {
        let mut panel = fitted(3);
        panel.handle_key(key(KeyCode::Down));
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::Yes);
        assert_eq!(panel.selected_index(), None);
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn renders_cards_and_loading_footer() {
        let mut panel = fitted(2);
        panel.set_status(FeedStatus {
            state: FeedState::Loading,
            error_message: String::new(),
            page: 2,
        });

        let theme = Theme::default();
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, ComponentId::Feed, 0);
                panel.render(f, f.area(), &ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Posts (2)"));
        assert!(text.contains("Title 1"));
        assert!(text.contains("Loading page 2"));
    }

    #[test]
    fn renders_error_footer() {
        let mut panel = fitted(0);
        panel.set_status(FeedStatus {
            state: FeedState::Error,
            error_message: "Something went wrong".to_string(),
            page: 1,
        });

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, ComponentId::Feed, 0);
                panel.render(f, f.area(), &ctx);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Something went wrong"));
    }
}
