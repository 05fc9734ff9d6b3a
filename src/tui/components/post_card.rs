// Post card layout
//
// Turns a PostCard into display lines for a given width: wrapped title,
// wrapped body, the photo URL on its own line, then a blank spacer. Layout is
// plain text so the feed panel can cache it per width and measure heights;
// styling happens per frame because it depends on selection.

use crate::feed::PostCard;
use crate::tui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns reserved on the left for the selection gutter
const GUTTER: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLineKind {
    Title,
    Body,
    Image,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub kind: CardLineKind,
    pub text: String,
}

impl CardLine {
    fn new(kind: CardLineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Lay a card out for a panel `width` columns wide (gutter included)
pub fn layout_card(card: &PostCard, width: usize) -> Vec<CardLine> {
    let text_width = width.saturating_sub(GUTTER).max(1);
    let mut lines: Vec<CardLine> = wrap_text(&card.title, text_width)
        .into_iter()
        .map(|t| CardLine::new(CardLineKind::Title, t))
        .collect();

    lines.extend(
        wrap_text(&card.body, text_width)
            .into_iter()
            .map(|t| CardLine::new(CardLineKind::Body, t)),
    );

    lines.push(CardLine::new(
        CardLineKind::Image,
        truncate_to_width(&format!("▣ {}", card.image_url), text_width),
    ));
    lines.push(CardLine::new(CardLineKind::Spacer, ""));
    lines
}

/// Style one laid-out line
pub fn styled_line(line: &CardLine, theme: &Theme, selected: bool) -> Line<'static> {
    let gutter = match (selected, line.kind) {
        (true, CardLineKind::Spacer) | (false, _) => Span::raw(" ".repeat(GUTTER)),
        (true, _) => Span::styled("▌ ", Style::default().fg(theme.highlight)),
    };

    let mut style = match line.kind {
        CardLineKind::Title => Style::default()
            .fg(theme.card_title)
            .add_modifier(Modifier::BOLD),
        CardLineKind::Body => Style::default().fg(theme.card_body),
        CardLineKind::Image => Style::default()
            .fg(theme.image_link)
            .add_modifier(Modifier::UNDERLINED),
        CardLineKind::Spacer => Style::default(),
    };
    if selected && line.kind == CardLineKind::Title {
        style = style.fg(theme.selection_fg).bg(theme.selection);
    }

    Line::from(vec![gutter, Span::styled(line.text.clone(), style)])
}

/// Greedy word wrap by display width.
///
/// Newlines start a new line; words wider than `width` are split by character.
/// Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            if word_width > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for ch in word.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if current_width + ch_width > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Cut `text` to at most `width` columns, marking the cut with '…'
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width - 1 {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}
