/// Commands the embedding surface sends to the view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Create, regenerate or restart the presentation.
    StartGeneration,
    /// Try again after a failed generation.
    Retry,
    Next,
    Prev,
    JumpTo(usize),
    ToggleFullscreen,
    ExitFullscreen,
}

/// Lifecycle of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Generating,
    Viewing,
    Error,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "IDLE",
            Status::Generating => "GENERATING",
            Status::Viewing => "VIEWING",
            Status::Error => "ERROR",
        }
    }
}

/// Work the controller asks its driver to perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Issue one generation call and report back through
    /// [`crate::controller::ViewController::complete`].
    Generate,
}
