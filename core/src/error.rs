use thiserror::Error;

pub use deck_common::{ConfigError, GenerationError};

/// Message shown for every failed generation, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate content. Please try again.";

/// Top-level error for the deck engine.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// Error reporting utilities
pub struct ErrorReporter;

impl ErrorReporter {
    /// Text shown to the user. Generation failures all collapse to one message.
    pub fn user_message(error: &DeckError) -> String {
        match error {
            DeckError::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
            DeckError::Config(err) => format!("Configuration problem: {err}"),
        }
    }

    /// Diagnostic label for logs.
    pub fn kind(error: &DeckError) -> &'static str {
        match error {
            DeckError::Generation(err) => err.kind(),
            DeckError::Config(_) => "config",
        }
    }
}
