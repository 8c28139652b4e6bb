use promptboard_domain::ColumnId;
use ratatui::style::{Color, Modifier, Style};

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const RUNNING_TEXT: Color = Color::Yellow;
pub const DONE_TEXT: Color = Color::Green;

pub const POPUP_BG: Color = Color::Black;

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn badge_text() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}

pub fn column_status_style(id: ColumnId) -> Style {
    match id {
        ColumnId::Todo => Style::default().fg(NORMAL_TEXT),
        ColumnId::InProgress => Style::default()
            .fg(RUNNING_TEXT)
            .add_modifier(Modifier::BOLD),
        ColumnId::Done => Style::default().fg(DONE_TEXT),
    }
}
