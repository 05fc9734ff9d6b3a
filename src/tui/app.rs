// TUI application state
//
// App owns the feed controller and routes everything to it: the initial load
// on mount, a scroll signal for every movement of the feed (keys, wheel,
// resize), retries, and completions arriving from the loader. Panels own
// their own view state and never touch the controller.

use super::components::{FeedPanel, FeedStatus, LogsPanel, Toast};
use super::theme::Theme;
use super::traits::{
    copy_to_clipboard, ComponentId, Copyable, Interactive, RenderContext, Scrollable,
};
use crate::config::{Config, ImageConfig};
use crate::feed::{FeedController, FetchCompletion, LoadOutcome, Loader, PageRequest};
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

pub struct App {
    pub controller: FeedController,
    loader: Loader,

    pub feed_panel: FeedPanel,
    pub logs_panel: LogsPanel,
    pub log_buffer: LogBuffer,

    pub theme: Theme,
    image: ImageConfig,

    pub show_logs: bool,
    pub focus: ComponentId,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    animation_frame: usize,
    start_time: Instant,

    /// Feed viewport changed during the last draw
    resized: bool,
}

impl App {
    pub fn new(config: &Config, loader: Loader, log_buffer: LogBuffer) -> Self {
        Self {
            controller: FeedController::new(config.page_size),
            loader,
            feed_panel: FeedPanel::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme: Theme::by_name(&config.theme),
            image: config.image.clone(),
            show_logs: false,
            focus: ComponentId::Feed,
            toast: None,
            should_quit: false,
            animation_frame: 0,
            start_time: Instant::now(),
            resized: false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Feed driving
    // ─────────────────────────────────────────────────────────────

    /// Issue the initial page request
    pub fn mount(&mut self) {
        let request = self.controller.mount();
        self.dispatch(request);
    }

    /// Report the feed's current scroll position to the controller
    pub fn scroll_signal(&mut self) {
        let request = self.controller.on_scroll(self.feed_panel.scroll_state());
        self.dispatch(request);
    }

    pub fn retry(&mut self) {
        let request = self.controller.retry();
        self.dispatch(request);
    }

    fn dispatch(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.loader.dispatch(request);
        }
        self.sync_feed();
    }

    /// Apply a finished fetch and refresh the feed panel
    pub fn apply_completion(&mut self, completion: FetchCompletion) -> LoadOutcome {
        let outcome = self.controller.complete(completion);
        self.sync_feed();
        outcome
    }

    fn sync_feed(&mut self) {
        self.feed_panel
            .sync_posts(self.controller.posts(), &self.image);
        self.feed_panel
            .set_status(FeedStatus::from_controller(&self.controller));
    }

    /// Fit the feed panel to its area; a changed viewport counts as a resize
    pub fn fit_feed(&mut self, area: Rect) {
        if self.feed_panel.fit(area) {
            self.resized = true;
        }
    }

    /// Emit the scroll signal owed for a resize seen during the last draw
    pub fn after_draw(&mut self) {
        if std::mem::take(&mut self.resized) {
            self.scroll_signal();
        }
    }

    pub fn source_name(&self) -> &str {
        self.loader.source_name()
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('l') => self.toggle_logs(),
            KeyCode::Char('y') => self.copy_focused(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.next_focus(self.show_logs);
            }
            _ => self.dispatch_to_focused(key),
        }
    }

    /// Route a key to the focused panel; feed movement emits a scroll signal
    fn dispatch_to_focused(&mut self, key: KeyEvent) {
        match self.focus {
            ComponentId::Feed => {
                if self.feed_panel.handle_key(key).was_handled() {
                    self.scroll_signal();
                }
            }
            ComponentId::Logs => {
                self.logs_panel.handle_key(key);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => match self.focus {
                ComponentId::Feed => {
                    self.feed_panel.wheel_up();
                    self.scroll_signal();
                }
                ComponentId::Logs => self.logs_panel.wheel_up(),
            },
            MouseEventKind::ScrollDown => match self.focus {
                ComponentId::Feed => {
                    self.feed_panel.wheel_down();
                    self.scroll_signal();
                }
                ComponentId::Logs => self.logs_panel.wheel_down(),
            },
            _ => {}
        }
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs {
            self.focus = ComponentId::Feed;
        }
    }

    fn copy_focused(&mut self) {
        let (text, description) = match self.focus {
            ComponentId::Feed => (
                self.feed_panel.copy_text(),
                self.feed_panel.copy_description(),
            ),
            ComponentId::Logs => (
                self.logs_panel.copy_text(),
                self.logs_panel.copy_description(),
            ),
        };

        let Some(text) = text else {
            self.show_toast("Nothing selected");
            return;
        };

        match copy_to_clipboard(&text) {
            Ok(()) => self.show_toast(format!("✓ Copied {}", description)),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    pub fn focus_hint(&self) -> &'static str {
        let hint = match self.focus {
            ComponentId::Feed => self.feed_panel.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
        };
        hint.unwrap_or("")
    }

    // ─────────────────────────────────────────────────────────────
    // Presentation helpers
    // ─────────────────────────────────────────────────────────────

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.theme, self.focus, self.animation_frame)
    }

    pub fn spinner_char(&self) -> char {
        self.render_context().spinner_char()
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Time since start as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
