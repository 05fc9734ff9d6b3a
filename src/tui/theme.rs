// Theme system for the TUI
//
// A theme is a flat set of resolved colors. The built-in themes live in code;
// the config file selects one by name. Unknown names fall back to the default.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Name of the theme used when the config does not pick one
pub const DEFAULT_THEME: &str = "Harbor";

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Feed Colors ─────────────────────────────────────────
    pub card_title: Color,
    pub card_body: Color,
    pub image_link: Color,
    pub loading: Color,
    pub error: Color,

    // ─── Log Level Colors ────────────────────────────────────
    pub warn: Color,
    pub info: Color,
    pub debug: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub highlight: Color,

    // ─── Panel Identity Colors ───────────────────────────────
    pub panel_feed: Color,
    pub panel_logs: Color,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    pub muted: Color,
    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name (case-insensitive), falling back to the default
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "harbor" => Self::harbor(),
            "ember" => Self::ember(),
            "mono" => Self::mono(),
            other => {
                tracing::warn!("Unknown theme '{}', using {}", other, DEFAULT_THEME);
                Self::harbor()
            }
        }
    }

    /// Names accepted by `by_name`
    pub fn list_available() -> Vec<&'static str> {
        vec!["Harbor", "Ember", "Mono"]
    }

    fn harbor() -> Self {
        Self {
            name: "Harbor".to_string(),
            card_title: Color::Rgb(137, 220, 235),
            card_body: Color::Rgb(205, 214, 244),
            image_link: Color::Rgb(116, 199, 236),
            loading: Color::Rgb(249, 226, 175),
            error: Color::Rgb(243, 139, 168),
            warn: Color::Rgb(250, 179, 135),
            info: Color::Rgb(166, 227, 161),
            debug: Color::Rgb(127, 132, 156),
            status_bar: Color::Rgb(166, 173, 200),
            title: Color::Rgb(137, 180, 250),
            border: Color::Rgb(88, 91, 112),
            highlight: Color::Rgb(137, 180, 250),
            panel_feed: Color::Rgb(148, 226, 213),
            panel_logs: Color::Rgb(203, 166, 247),
            background: Color::Rgb(24, 24, 37),
            foreground: Color::Rgb(205, 214, 244),
            selection: Color::Rgb(69, 71, 90),
            selection_fg: Color::Rgb(245, 224, 220),
            muted: Color::Rgb(127, 132, 156),
            border_type: BorderType::Rounded,
        }
    }

    fn ember() -> Self {
        Self {
            name: "Ember".to_string(),
            card_title: Color::Rgb(250, 189, 47),
            card_body: Color::Rgb(235, 219, 178),
            image_link: Color::Rgb(131, 165, 152),
            loading: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            warn: Color::Rgb(254, 128, 25),
            info: Color::Rgb(184, 187, 38),
            debug: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(213, 196, 161),
            title: Color::Rgb(254, 128, 25),
            border: Color::Rgb(102, 92, 84),
            highlight: Color::Rgb(250, 189, 47),
            panel_feed: Color::Rgb(250, 189, 47),
            panel_logs: Color::Rgb(211, 134, 155),
            background: Color::Rgb(29, 32, 33),
            foreground: Color::Rgb(235, 219, 178),
            selection: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(251, 241, 199),
            muted: Color::Rgb(146, 131, 116),
            border_type: BorderType::Plain,
        }
    }

    /// Terminal palette only, for terminals without truecolor
    fn mono() -> Self {
        Self {
            name: "Mono".to_string(),
            card_title: Color::White,
            card_body: Color::Gray,
            image_link: Color::Cyan,
            loading: Color::Yellow,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::DarkGray,
            status_bar: Color::Gray,
            title: Color::White,
            border: Color::DarkGray,
            highlight: Color::White,
            panel_feed: Color::Cyan,
            panel_logs: Color::Magenta,
            background: Color::Reset,
            foreground: Color::Reset,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            muted: Color::DarkGray,
            border_type: BorderType::Plain,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::harbor()
    }
}
