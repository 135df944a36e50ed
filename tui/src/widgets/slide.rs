use deck_core::presenter::{ImageRef, SlideView, Visual, FOOTER_TAG};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};

use super::chart::ChartWidget;

/// Full slide: heading, bullets, visual and footer.
pub struct SlideWidget<'a> {
    view: &'a SlideView<'a>,
}

impl<'a> SlideWidget<'a> {
    pub fn new(view: &'a SlideView<'a>) -> Self {
        Self { view }
    }
}

impl Widget for SlideWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(2));
        let inner = block.inner(area);
        block.render(area, buf);

        let heading_height = if self.view.subtitle.is_some() { 3 } else { 2 };
        let footer_height = if self.view.footer.is_some() { 2 } else { 0 };
        let [heading, body, footer] = Layout::vertical([
            Constraint::Length(heading_height),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .areas(inner);

        let mut head = vec![Line::styled(
            self.view.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if let Some(subtitle) = self.view.subtitle {
            head.push(Line::styled(subtitle, Style::default().fg(Color::Blue)));
        }
        Paragraph::new(head).render(heading, buf);

        match &self.view.visual {
            Visual::Nothing => render_bullets(self.view.bullets, body, buf),
            visual => {
                let [left, right] =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .spacing(2)
                        .areas(body);
                render_bullets(self.view.bullets, left, buf);
                match visual {
                    Visual::Chart(spec) => ChartWidget::new(spec).render(right, buf),
                    Visual::Image(image) => render_image(image, right, buf),
                    Visual::Nothing => {}
                }
            }
        }

        if let Some(text) = self.view.footer {
            let rule = Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray));
            let line_area = rule.inner(footer);
            rule.render(footer, buf);
            let [left, right] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(FOOTER_TAG.len() as u16)])
                    .areas(line_area);
            Paragraph::new(text).style(Style::default().fg(Color::Gray)).render(left, buf);
            Paragraph::new(FOOTER_TAG)
                .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Right)
                .render(right, buf);
        }
    }
}

fn render_bullets(bullets: &[String], area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::with_capacity(bullets.len() * 2);
    for (i, point) in bullets.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Blue)),
            Span::raw(point.as_str()),
        ]));
    }
    Paragraph::new(lines).wrap(Wrap { trim: true }).render(area, buf);
}

fn render_image(image: &ImageRef, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::styled(image.prompt.as_str(), Style::default().add_modifier(Modifier::ITALIC)),
        Line::raw(""),
        Line::styled(
            image.url.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        ),
        Line::raw(""),
        Line::styled("[o] open image", Style::default().fg(Color::DarkGray)),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" image "),
        )
        .render(area, buf);
}
