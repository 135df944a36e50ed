//! Terminal presentation viewer.

pub mod app;
pub mod keymap;
pub mod widgets;

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deck_core::Session;
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::App;

/// Take over the terminal and present until the user quits.
///
/// The terminal is restored on every exit path, including setup failures.
pub async fn run_present(session: Session) -> Result<()> {
    let _guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(session);
    app.run(&mut terminal).await
}

/// Leaves the alternate screen and raw mode when dropped.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen, Show);
    }
}
