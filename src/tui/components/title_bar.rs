// Title bar component
//
// App name, a spinner while a page is loading, and the source being read.

use crate::feed::FeedState;
use crate::tui::app::App;
use crate::tui::components::post_card::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let indicator = match app.controller.state() {
        FeedState::Idle => String::new(),
        FeedState::Loading => format!(" {} loading", app.spinner_char()),
        FeedState::Error => " ✗ error".to_string(),
    };

    let head = format!(" 📜 postscroll{}", indicator);
    // Source gets whatever room is left inside the borders
    let room = (area.width as usize).saturating_sub(head.chars().count() + 10);
    let title_text = if room > 0 {
        format!(
            "{} ──── {}",
            head,
            truncate_to_width(app.source_name(), room)
        )
    } else {
        head
    };

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.theme.name)).right_aligned()),
        );

    f.render_widget(title, area);
}
