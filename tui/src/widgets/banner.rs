use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

pub const APP_NAME: &str = "DALY Master";

const LOGO: &str = r"
 ____    _    _  __   __  __  __           _
|  _ \  / \  | | \ \ / / |  \/  | __ _ ___| |_ ___ _ __
| | | |/ _ \ | |  \ V /  | |\/| |/ _` / __| __/ _ \ '__|
| |_| / ___ \| |___| |   | |  | | (_| \__ \ ||  __/ |
|____/_/   \_\_____|_|   |_|  |_|\__,_|___/\__\___|_|
";

/// Landing screen shown before the first generation.
pub struct IdleBanner;

impl Widget for IdleBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = LOGO
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Blue)))
            .collect();
        lines.extend([
            Line::raw(""),
            Line::styled(
                "The Burden of Low Back Pain",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                "Visualize Disability-Adjusted Life Years (DALYs) like never before.",
                Style::default().fg(Color::Gray),
            ),
            Line::styled(
                "Understand how years lived with disability impacts global populations.",
                Style::default().fg(Color::Gray),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Cyan)),
                Span::raw(" to generate an expert presentation"),
            ]),
        ]);

        let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(body, buf);
        Paragraph::new("Powered by Gemini | GBD Study Data | Musculoskeletal Expert System")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(footer, buf);
    }
}

/// Spinner shown while a generation is in flight.
pub struct GeneratingBanner {
    pub tick: usize,
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl Widget for GeneratingBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = SPINNER[self.tick % SPINNER.len()];
        let lines = vec![
            Line::styled(frame, Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Line::raw(""),
            Line::styled("Synthesizing GBD Insights", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(
                "Calculating DALY metrics and building your slides...",
                Style::default().fg(Color::Gray),
            ),
        ];
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(lines).alignment(Alignment::Center).render(middle, buf);
    }
}

/// Failure panel with a retry hint.
pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, panel, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(60),
            Constraint::Fill(1),
        ])
        .areas(middle);

        let lines = vec![
            Line::styled("Something went wrong", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Line::raw(""),
            Line::styled(self.message, Style::default().fg(Color::LightRed)),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::Red)),
                Span::raw(" Try Again"),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .render(panel, buf);
    }
}
