//! Renders a completed card's markdown result into styled terminal lines
//! for the preview popup.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::prelude::Stylize;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let parser = Parser::new(text);
    let mut renderer = MarkdownRenderer::new();

    for event in parser {
        renderer.process_event(event);
    }

    renderer.finish()
}

struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    current_line: Vec<Span<'static>>,
    in_code_block: bool,
    code_block_content: String,
    in_emphasis: bool,
    in_strong: bool,
    in_heading: bool,
    in_blockquote: bool,
    list_depth: usize,
}

impl MarkdownRenderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: Vec::new(),
            in_code_block: false,
            code_block_content: String::new(),
            in_emphasis: false,
            in_strong: false,
            in_heading: false,
            in_blockquote: false,
            list_depth: 0,
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.handle_tag_start(tag),
            Event::End(tag_end) => self.handle_tag_end(tag_end),
            Event::Text(text) => self.handle_text(text),
            Event::Code(code) => self.handle_inline_code(code),
            Event::SoftBreak | Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(40), Style::default())));
            }
            _ => {}
        }
    }

    fn handle_tag_start(&mut self, tag: Tag) {
        match tag {
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::Emphasis => self.in_emphasis = true,
            Tag::Strong => self.in_strong = true,
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.in_heading = true;
                let marker = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    _ => "### ",
                };
                self.current_line
                    .push(Span::styled(marker.to_string(), heading_style()));
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Tag::Paragraph => {
                if !self.current_line.is_empty() {
                    self.flush_line();
                }
            }
            Tag::List(_) => self.list_depth += 1,
            Tag::Item => {
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                self.current_line
                    .push(Span::raw(format!("{}• ", indent)));
            }
            _ => {}
        }
    }

    fn handle_tag_end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.render_code_block();
            }
            TagEnd::Emphasis => self.in_emphasis = false,
            TagEnd::Strong => self.in_strong = false,
            TagEnd::Heading(_) => {
                self.in_heading = false;
                self.flush_line();
                self.lines.push(Line::from(""));
            }
            TagEnd::BlockQuote(_) => {
                self.in_blockquote = false;
                self.flush_line();
            }
            TagEnd::Paragraph => {
                self.flush_line();
                self.lines.push(Line::from(""));
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.lines.push(Line::from(""));
                }
            }
            TagEnd::Item => self.flush_line(),
            _ => {}
        }
    }

    fn handle_text(&mut self, text: CowStr) {
        if self.in_code_block {
            self.code_block_content.push_str(&text);
            return;
        }

        let mut style = Style::default();
        if self.in_heading {
            style = heading_style();
        }
        if self.in_strong {
            style = style.bold();
        }
        if self.in_emphasis {
            style = style.italic();
        }
        if self.in_blockquote {
            style = style.fg(Color::DarkGray);
            if self.current_line.is_empty() {
                self.current_line.push(Span::styled(
                    "│ ".to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        self.current_line.push(Span::styled(text.to_string(), style));
    }

    fn handle_inline_code(&mut self, code: CowStr) {
        self.current_line.push(Span::styled(
            format!("`{}`", code),
            Style::default().fg(Color::Cyan),
        ));
    }

    fn render_code_block(&mut self) {
        for line in self.code_block_content.lines() {
            self.lines.push(Line::from(Span::styled(
                format!("  {}", line),
                Style::default().fg(Color::Green),
            )));
        }
        if !self.code_block_content.is_empty() {
            self.lines.push(Line::from(""));
        }
        self.code_block_content.clear();
    }

    fn flush_line(&mut self) {
        if !self.current_line.is_empty() {
            let line = Line::from(std::mem::take(&mut self.current_line));
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while matches!(self.lines.last(), Some(line) if line.spans.is_empty() || (line.spans.len() == 1 && line.spans[0].content.is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_style() -> Style {
    Style::default().fg(Color::Cyan).bold()
}
