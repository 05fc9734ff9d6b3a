// Frame layout
//
// ┌ title ─────────────────────┐
// │ feed panel                 │
// ├ logs panel (toggle: l) ────┤
// └ status ────────────────────┘
//
// The toast is drawn last, over everything.

use super::app::App;
use super::components::{status_bar, title_bar};
use super::layout::Breakpoint;
use super::traits::Component;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, area);

    let bp = Breakpoint::from_width(area.width);
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if app.show_logs {
        constraints.push(Constraint::Length(bp.logs_height(area.height)));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    title_bar::render(f, chunks[0], app);

    let feed_area = chunks[1];
    app.fit_feed(feed_area);

    if app.show_logs {
        let logs_area = chunks[2];
        let snapshot = app.log_buffer.snapshot();
        app.logs_panel.sync_entries(snapshot, logs_area);
    }

    let ctx = app.render_context();
    app.feed_panel.render(f, feed_area, &ctx);
    if app.show_logs {
        app.logs_panel.render(f, chunks[2], &ctx);
    }

    status_bar::render(f, chunks[chunks.len() - 1], app);

    if let Some(ref toast) = app.toast {
        toast.render(f, area, &app.theme);
    }
    app.clear_expired_toast();
}
