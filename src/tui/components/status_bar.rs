// Status bar component
//
// Feed state, post count, next page, uptime, and key hints for the focused
// panel. Narrow terminals get a compact form without labels.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let controller = &app.controller;
    let bp = Breakpoint::from_width(area.width);

    let status_text = if !bp.at_least(Breakpoint::Normal) {
        format!(
            " {} │ {} │ p{} │ {}",
            controller.state().label(),
            app.feed_panel.cards().len(),
            controller.page(),
            app.uptime(),
        )
    } else {
        let hints = if bp.at_least(Breakpoint::Wide) {
            format!(" │ {}  l:logs  q:quit", app.focus_hint())
        } else {
            " │ q:quit".to_string()
        };
        format!(
            " ● {} │ 📄 {} posts │ next page {} × {} │ 📡 {} requests │ {}{}",
            controller.state().label(),
            app.feed_panel.cards().len(),
            controller.page(),
            controller.limit(),
            controller.requests_issued(),
            app.uptime(),
            hints,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
