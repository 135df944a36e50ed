use deck_core::Slide;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LABEL_WIDTH: usize = 22;

/// Strip of numbered slide titles with the current one highlighted.
pub struct Thumbnails<'a> {
    slides: &'a [Slide],
    current: usize,
}

impl<'a> Thumbnails<'a> {
    pub fn new(slides: &'a [Slide], current: usize) -> Self {
        Self { slides, current }
    }
}

impl Widget for Thumbnails<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.slides.len() * 2);
        for (i, slide) in self.slides.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, truncate(&slide.title, LABEL_WIDTH));
            let style = if i == self.current {
                Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title(" slides "))
            .render(area, buf);
    }
}

/// Cut `text` to at most `max` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
