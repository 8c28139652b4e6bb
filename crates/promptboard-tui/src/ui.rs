use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use promptboard_domain::{Card, Column, ColumnId};

use crate::app::{App, AppMode};
use crate::components::{render_input_popup, render_popup_frame};
use crate::dialog::CreateField;
use crate::markdown_renderer::render_markdown;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    render_board(app, frame, chunks[0]);
    render_footer(app, frame, chunks[1]);

    match app.mode {
        AppMode::CreateCard => render_create_popup(app, frame),
        AppMode::Settings => render_settings_popup(app, frame),
        AppMode::Preview => render_preview_popup(app, frame),
        AppMode::Normal => {}
    }

    if let Some(banner) = &app.banner {
        banner.render(frame, chunks[0]);
    }
}

fn render_board(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (column, chunk) in app.board.columns().iter().zip(chunks.iter()) {
        render_column(app, frame, *chunk, column);
    }
}

fn render_column(app: &App, frame: &mut Frame, area: Rect, column: &Column) {
    let focused = app.focus == column.id;
    let border = if focused {
        theme::focused_border()
    } else {
        theme::unfocused_border()
    };

    let title = Span::styled(
        format!(" {} ({}) ", column.title, column.len()),
        theme::column_status_style(column.id),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    if column.is_empty() {
        let hint = match column.id {
            ColumnId::Todo => "No cards yet. Press 'n' to create a prompt",
            ColumnId::InProgress => "No runs in flight",
            ColumnId::Done => "Nothing completed yet",
        };
        lines.push(Line::from(Span::styled(hint, theme::label_text())));
    } else {
        for (idx, card) in column.cards.iter().enumerate() {
            let selected = focused && app.selection(column.id).is_selected(idx);
            lines.extend(card_lines(card, column.id, selected, width));
            lines.push(Line::from(""));
        }
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn card_lines(card: &Card, column: ColumnId, selected: bool, width: usize) -> Vec<Line<'static>> {
    let marker = match column {
        ColumnId::InProgress => "⟳ ",
        ColumnId::Done => "✓ ",
        ColumnId::Todo => "",
    };
    let badges = format!(
        "{}{} · {}° · {} tok",
        marker, card.model, card.config.temperature, card.config.max_tokens
    );

    let badge_line = Line::from(Span::styled(
        badges,
        theme::badge_text().patch(theme::selected_item(selected)),
    ));
    let prompt_line = Line::from(Span::styled(
        card.prompt_preview(width.max(8)),
        theme::normal_text().patch(theme::selected_item(selected)),
    ));

    vec![badge_line, prompt_line]
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        AppMode::Normal => {
            "n new · r run · enter preview · d export · j/k select · h/l column · J/K reorder · H/L move · s settings · q quit"
        }
        AppMode::CreateCard => {
            "tab next field · ←/→ model · ctrl+e edit prompt in $EDITOR · enter create · esc cancel"
        }
        AppMode::Settings => "enter save (empty clears) · esc cancel",
        AppMode::Preview => "j/k scroll · g top · esc close",
    };

    let credential = if app.credential.trim().is_empty() {
        Span::styled("credential: not set", theme::highlight_text())
    } else {
        Span::styled("credential: set", theme::label_text())
    };

    let line = Line::from(vec![
        Span::styled(hints, theme::label_text()),
        Span::raw("  "),
        credential,
    ]);

    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}

fn render_create_popup(app: &App, frame: &mut Frame) {
    let inner = render_popup_frame(frame, " New Prompt ", 70, 70);
    let dialog = &app.create_dialog;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // prompt label
            Constraint::Length(3), // prompt input
            Constraint::Length(1), // model label
            Constraint::Length(1), // model value
            Constraint::Length(1), // temperature label
            Constraint::Length(3), // temperature input
            Constraint::Length(1), // max tokens label
            Constraint::Length(3), // max tokens input
            Constraint::Min(0),
        ])
        .split(inner);

    render_field_label(frame, chunks[0], "Prompt", dialog.focus == CreateField::Prompt);
    render_text_field(
        frame,
        chunks[1],
        dialog.prompt.as_str(),
        dialog.prompt.cursor_chars(),
        dialog.focus == CreateField::Prompt,
    );

    render_field_label(frame, chunks[2], "Model", dialog.focus == CreateField::Model);
    let model_focused = dialog.focus == CreateField::Model;
    let model_line = Line::from(Span::styled(
        format!("◂ {} ▸", dialog.model),
        if model_focused {
            theme::highlight_text()
        } else {
            theme::normal_text()
        },
    ));
    frame.render_widget(Paragraph::new(model_line), chunks[3]);

    render_field_label(
        frame,
        chunks[4],
        "Temperature (0.0-2.0)",
        dialog.focus == CreateField::Temperature,
    );
    render_text_field(
        frame,
        chunks[5],
        dialog.temperature.as_str(),
        dialog.temperature.cursor_chars(),
        dialog.focus == CreateField::Temperature,
    );

    render_field_label(
        frame,
        chunks[6],
        "Max tokens (1-32000)",
        dialog.focus == CreateField::MaxTokens,
    );
    render_text_field(
        frame,
        chunks[7],
        dialog.max_tokens.as_str(),
        dialog.max_tokens.cursor_chars(),
        dialog.focus == CreateField::MaxTokens,
    );
}

fn render_field_label(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let style = if focused {
        theme::highlight_text()
    } else {
        theme::label_text()
    };
    frame.render_widget(Paragraph::new(Span::styled(label, style)), area);
}

fn render_text_field(frame: &mut Frame, area: Rect, text: &str, cursor_chars: usize, focused: bool) {
    let border = if focused {
        theme::focused_border()
    } else {
        theme::unfocused_border()
    };
    let field = Paragraph::new(text)
        .style(theme::normal_text())
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(field, area);

    if focused {
        let cursor_x = area.x + cursor_chars as u16 + 1;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_settings_popup(app: &App, frame: &mut Frame) {
    render_input_popup(
        frame,
        " Settings ",
        "API credential (stored locally, never on the board)",
        app.settings_input.as_str(),
        app.settings_input.cursor_chars(),
    );
}

fn render_preview_popup(app: &App, frame: &mut Frame) {
    let inner = render_popup_frame(frame, " Result Preview ", 80, 80);
    let lines = render_markdown(&app.preview_content);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));
    frame.render_widget(paragraph, inner);
}
