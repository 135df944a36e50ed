use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEvent};
use deck_core::presenter::{present, PicsumImages, Visual};
use deck_core::{Op, Session, Status, ViewState};
use futures::StreamExt;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

use crate::keymap::{map_key, Action};
use crate::widgets::{
    banner::{ErrorBanner, GeneratingBanner, IdleBanner, APP_NAME},
    slide::SlideWidget,
    status_bar::StatusBar,
    thumbnails::Thumbnails,
};

const TICK: Duration = Duration::from_millis(120);

/// Terminal front end over a [`Session`].
pub struct App {
    session: Session,
    images: PicsumImages,
    tick: usize,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            images: PicsumImages::default(),
            tick: 0,
            notice: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.session.state()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run until the user quits. Redraws after every event.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = interval(TICK);

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = ticker.tick() => {
                    self.tick = self.tick.wrapping_add(1);
                }
                _ = self.session.next_completion(), if self.session.is_generating() => {
                    debug!(status = self.session.state().status.label(), "generation finished");
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = map_key(key, self.session.state()) else {
            return;
        };
        self.notice = None;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Dispatch(op) => self.dispatch(op),
            Action::OpenImage => self.open_image(),
        }
    }

    pub fn dispatch(&mut self, op: Op) {
        self.session.submit(op);
    }

    fn open_image(&mut self) {
        let Some(slide) = self.session.state().current_slide() else {
            return;
        };
        let Visual::Image(image) = present(slide, &self.images).visual else {
            self.notice = Some("This slide has no image".to_string());
            return;
        };
        match webbrowser::open(&image.url) {
            Ok(()) => self.notice = Some(format!("Opened {}", image.url)),
            Err(e) => {
                warn!(url = %image.url, error = %e, "failed to open browser");
                self.notice = Some(format!("Could not open browser: {e}"));
            }
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let state = self.session.state();
        let viewing = state.status == Status::Viewing;

        if state.fullscreen {
            let [main, controls] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(if viewing { 1 } else { 0 }),
            ])
            .areas(f.area());
            self.draw_main(f, main);
            if viewing {
                self.draw_controls(f, controls);
            }
            return;
        }

        let [header, main, controls, thumbs, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(if viewing { 1 } else { 0 }),
            Constraint::Length(if viewing { 4 } else { 0 }),
            Constraint::Length(2),
        ])
        .areas(f.area());

        self.draw_header(f, header);
        self.draw_main(f, main);
        if viewing {
            self.draw_controls(f, controls);
            if let Some(deck) = &state.presentation {
                f.render_widget(Thumbnails::new(deck.slides(), state.current_index), thumbs);
            }
        }
        self.draw_status(f, status);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let state = self.session.state();
        let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(40)]).areas(area);

        let title = Line::from(vec![
            Span::styled(
                format!(" {APP_NAME} "),
                Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.session.topic()), Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(title), left);

        let action = match state.status {
            Status::Idle => "[g] Create Presentation",
            Status::Viewing => "[g] Regenerate",
            Status::Error => "[g] Restart",
            Status::Generating => "",
        };
        f.render_widget(
            Paragraph::new(action)
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Right),
            right,
        );
    }

    fn draw_main(&self, f: &mut Frame, area: Rect) {
        let state = self.session.state();
        match state.status {
            Status::Idle => f.render_widget(IdleBanner, area),
            Status::Generating => f.render_widget(GeneratingBanner { tick: self.tick }, area),
            Status::Error => {
                let message = state.error_message.as_deref().unwrap_or_default();
                f.render_widget(ErrorBanner { message }, area);
            }
            Status::Viewing => {
                if let Some(slide) = state.current_slide() {
                    let view = present(slide, &self.images);
                    f.render_widget(SlideWidget::new(&view), area);
                }
            }
        }
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect) {
        let state = self.session.state();
        let Some((current, total)) = state.position() else {
            return;
        };
        let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);
        let fullscreen = if state.fullscreen { "[f] Exit Fullscreen" } else { "[f] Fullscreen" };

        let line = Line::from(vec![
            Span::styled(" ◀ prev ", if state.is_first() { disabled } else { enabled }),
            Span::styled(format!(" {current} / {total} "), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" next ▶ ", if state.is_last() { disabled } else { enabled }),
            Span::raw("    "),
            Span::styled(fullscreen, Style::default().fg(Color::Gray)),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let state = self.session.state();
        let message = self.notice.as_deref().unwrap_or(match state.status {
            Status::Idle => "Ready",
            Status::Generating => "Generating presentation...",
            Status::Viewing => "Presenting",
            Status::Error => "Generation failed",
        });
        let hints = match state.status {
            Status::Viewing => "←/→ navigate | 1-9 jump | o image | f fullscreen | q quit",
            Status::Error => "r retry | g restart | q quit",
            Status::Idle => "Enter generate | f fullscreen | q quit",
            Status::Generating => "q quit",
        };
        f.render_widget(StatusBar::new(state.status.label(), message, hints), area);
    }
}
