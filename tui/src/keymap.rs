use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use deck_core::{Op, Status, ViewState};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Dispatch(Op),
    OpenImage,
    Quit,
}

/// Translate a key press into an action for the current view.
pub fn map_key(key: KeyEvent, state: &ViewState) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('f') => return Some(Action::Dispatch(Op::ToggleFullscreen)),
        _ => {}
    }

    let op = match state.status {
        Status::Idle => match key.code {
            KeyCode::Enter | KeyCode::Char('g') => Op::StartGeneration,
            _ => return None,
        },
        Status::Generating => return None,
        Status::Error => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Op::Retry,
            KeyCode::Char('g') => Op::StartGeneration,
            _ => return None,
        },
        Status::Viewing => match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Char('j') => Op::Next,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('k') => Op::Prev,
            KeyCode::Home => Op::JumpTo(0),
            KeyCode::End => Op::JumpTo(state.slide_count().saturating_sub(1)),
            KeyCode::Char(c @ '1'..='9') => Op::JumpTo(c as usize - '1' as usize),
            KeyCode::Esc => Op::ExitFullscreen,
            KeyCode::Char('g') => Op::StartGeneration,
            KeyCode::Char('o') => return Some(Action::OpenImage),
            _ => return None,
        },
    };
    Some(Action::Dispatch(op))
}
