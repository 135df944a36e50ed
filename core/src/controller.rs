//! View controller: the state machine behind the presentation screen.
//!
//! ```text
//!   IDLE ──start──▶ GENERATING ──ok──▶ VIEWING ──start──▶ GENERATING
//!                      │  ▲
//!                     err │retry/start
//!                      ▼  │
//!                     ERROR
//! ```
//!
//! Navigation only moves the index while viewing and is silently ignored
//! when out of range. Fullscreen is independent of the status.

use deck_common::{GenerationError, Presentation, Slide};
use tracing::{debug, info, warn};

use crate::error::GENERATION_FAILED_MESSAGE;
use crate::protocol::{Effect, Op, Status};

/// Everything the surface needs to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub status: Status,
    pub presentation: Option<Presentation>,
    pub current_index: usize,
    pub error_message: Option<String>,
    pub fullscreen: bool,
}

impl ViewState {
    /// Slide at the current index while viewing.
    pub fn current_slide(&self) -> Option<&Slide> {
        if self.status != Status::Viewing {
            return None;
        }
        self.presentation.as_ref()?.get(self.current_index)
    }

    pub fn slide_count(&self) -> usize {
        self.presentation.as_ref().map_or(0, Presentation::len)
    }

    /// One-based "current / total" while viewing.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current_slide().map(|_| (self.current_index + 1, self.slide_count()))
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.slide_count()
    }
}

/// Single owner of the [`ViewState`].
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Dispatch a command. Returns the effect the caller must run, if any.
    pub fn apply(&mut self, op: Op) -> Option<Effect> {
        match op {
            Op::StartGeneration => self.start_generation(),
            Op::Retry => self.retry(),
            Op::Next => {
                self.next();
                None
            }
            Op::Prev => {
                self.prev();
                None
            }
            Op::JumpTo(index) => {
                self.jump_to(index);
                None
            }
            Op::ToggleFullscreen => {
                self.toggle_fullscreen();
                None
            }
            Op::ExitFullscreen => {
                self.exit_fullscreen();
                None
            }
        }
    }

    /// Start (or restart) generation from any state but `Generating`.
    pub fn start_generation(&mut self) -> Option<Effect> {
        match self.state.status {
            Status::Idle | Status::Viewing | Status::Error => Some(self.begin()),
            Status::Generating => {
                debug!("start ignored: generation already in flight");
                None
            }
        }
    }

    /// Retry after a failure. Only meaningful in `Error`.
    pub fn retry(&mut self) -> Option<Effect> {
        if self.state.status == Status::Error {
            Some(self.begin())
        } else {
            debug!(status = self.state.status.label(), "retry ignored");
            None
        }
    }

    fn begin(&mut self) -> Effect {
        info!(from = self.state.status.label(), "generation started");
        self.state.status = Status::Generating;
        self.state.error_message = None;
        Effect::Generate
    }

    /// Feed back the outcome of the generation started by the last [`Effect::Generate`].
    pub fn complete(&mut self, outcome: Result<Presentation, GenerationError>) {
        if self.state.status != Status::Generating {
            warn!(status = self.state.status.label(), "generation result arrived outside GENERATING; dropped");
            return;
        }
        match outcome {
            Ok(presentation) => {
                info!(slides = presentation.len(), "generation succeeded");
                self.state.presentation = Some(presentation);
                self.state.current_index = 0;
                self.state.status = Status::Viewing;
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "generation failed");
                self.state.error_message = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.state.status = Status::Error;
            }
        }
    }

    pub fn next(&mut self) {
        if self.state.status == Status::Viewing && !self.state.is_last() {
            self.state.current_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.state.status == Status::Viewing && self.state.current_index > 0 {
            self.state.current_index -= 1;
        }
    }

    pub fn jump_to(&mut self, index: usize) {
        if self.state.status == Status::Viewing && index < self.state.slide_count() {
            self.state.current_index = index;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.state.fullscreen = !self.state.fullscreen;
    }

    pub fn exit_fullscreen(&mut self) {
        self.state.fullscreen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Presentation {
        let slides = (1..=n)
            .map(|i| Slide::new(format!("s{i}"), format!("Slide {i}"), vec![format!("point {i}")]))
            .collect();
        Presentation::new(slides).unwrap()
    }

    fn viewing(n: usize) -> ViewController {
        let mut c = ViewController::new();
        assert_eq!(c.start_generation(), Some(Effect::Generate));
        c.complete(Ok(deck(n)));
        c
    }

    #[test]
    fn starts_idle() {
        let c = ViewController::new();
        assert_eq!(c.state().status, Status::Idle);
        assert!(c.state().presentation.is_none());
        assert_eq!(c.state().current_index, 0);
        assert!(!c.state().fullscreen);
        assert!(c.state().current_slide().is_none());
    }

    #[test]
    fn success_with_eight_slides_shows_first_of_eight() {
        let c = viewing(8);
        assert_eq!(c.state().status, Status::Viewing);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().position(), Some((1, 8)));
        assert_eq!(c.state().current_slide().unwrap().id, "s1");
    }

    #[test]
    fn next_clamps_at_last_slide() {
        let n = 5;
        let mut c = viewing(n);
        for _ in 0..n {
            c.next();
        }
        assert_eq!(c.state().current_index, n - 1);
        c.next();
        c.next();
        assert_eq!(c.state().current_index, n - 1);
    }

    #[test]
    fn prev_at_first_slide_is_noop() {
        let mut c = viewing(3);
        let before = c.state().clone();
        c.prev();
        assert_eq!(c.state(), &before);
        c.next();
        c.prev();
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn jump_to_ignores_out_of_range() {
        let mut c = viewing(4);
        c.jump_to(3);
        assert_eq!(c.state().current_index, 3);
        c.jump_to(4);
        assert_eq!(c.state().current_index, 3);
        c.jump_to(usize::MAX);
        assert_eq!(c.state().current_index, 3);
        c.jump_to(0);
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn navigation_outside_viewing_is_ignored() {
        let mut c = ViewController::new();
        c.next();
        c.jump_to(0);
        assert_eq!(c.state(), &ViewState::default());
    }

    #[test]
    fn toggle_fullscreen_twice_restores_value() {
        let mut c = ViewController::new();
        c.toggle_fullscreen();
        assert!(c.state().fullscreen);
        c.toggle_fullscreen();
        assert!(!c.state().fullscreen);

        let mut c = viewing(2);
        c.toggle_fullscreen();
        c.toggle_fullscreen();
        assert!(!c.state().fullscreen);
    }

    #[test]
    fn exit_fullscreen_clears_flag() {
        let mut c = viewing(2);
        c.apply(Op::ToggleFullscreen);
        assert!(c.state().fullscreen);
        c.apply(Op::ExitFullscreen);
        assert!(!c.state().fullscreen);
        c.apply(Op::ExitFullscreen);
        assert!(!c.state().fullscreen);
    }

    #[test]
    fn failure_moves_to_error_with_message() {
        let mut c = ViewController::new();
        c.start_generation();
        c.complete(Err(GenerationError::transport("timeout")));
        assert_eq!(c.state().status, Status::Error);
        assert_eq!(c.state().error_message.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn format_and_transport_failures_look_the_same() {
        let mut a = ViewController::new();
        a.start_generation();
        a.complete(Err(GenerationError::format("missing field `id`")));
        let mut b = ViewController::new();
        b.start_generation();
        b.complete(Err(GenerationError::transport("http 500")));
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn retry_from_error_then_success() {
        let mut c = ViewController::new();
        c.start_generation();
        c.complete(Err(GenerationError::transport("timeout")));

        assert_eq!(c.apply(Op::Retry), Some(Effect::Generate));
        assert_eq!(c.state().status, Status::Generating);
        assert!(c.state().error_message.is_none());

        c.complete(Ok(deck(3)));
        assert_eq!(c.state().status, Status::Viewing);
        assert_eq!(c.state().slide_count(), 3);
    }

    #[test]
    fn duplicate_triggers_are_rejected_while_generating() {
        let mut c = ViewController::new();
        assert_eq!(c.apply(Op::StartGeneration), Some(Effect::Generate));
        assert_eq!(c.apply(Op::StartGeneration), None);
        assert_eq!(c.apply(Op::Retry), None);
        assert_eq!(c.state().status, Status::Generating);
    }

    #[test]
    fn retry_outside_error_is_ignored() {
        let mut c = ViewController::new();
        assert_eq!(c.retry(), None);
        let mut c = viewing(2);
        assert_eq!(c.retry(), None);
        assert_eq!(c.state().status, Status::Viewing);
    }

    #[test]
    fn regenerate_keeps_old_deck_until_success() {
        let mut c = viewing(3);
        c.jump_to(2);
        assert_eq!(c.start_generation(), Some(Effect::Generate));
        assert_eq!(c.state().slide_count(), 3);
        assert!(c.state().current_slide().is_none());

        c.complete(Ok(deck(5)));
        assert_eq!(c.state().slide_count(), 5);
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn regenerate_failure_moves_to_error() {
        let mut c = viewing(3);
        c.start_generation();
        c.complete(Err(GenerationError::format("not json")));
        assert_eq!(c.state().status, Status::Error);
        assert!(c.state().current_slide().is_none());
    }

    #[test]
    fn start_from_error_is_allowed() {
        let mut c = ViewController::new();
        c.start_generation();
        c.complete(Err(GenerationError::transport("down")));
        assert_eq!(c.apply(Op::StartGeneration), Some(Effect::Generate));
    }

    #[test]
    fn stray_completion_is_dropped() {
        let mut c = ViewController::new();
        c.complete(Ok(deck(2)));
        assert_eq!(c.state().status, Status::Idle);
        assert!(c.state().presentation.is_none());
    }

    #[test]
    fn fullscreen_survives_status_changes() {
        let mut c = ViewController::new();
        c.toggle_fullscreen();
        c.start_generation();
        c.complete(Ok(deck(1)));
        assert!(c.state().fullscreen);
    }
}
