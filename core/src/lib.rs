//! Deck engine: generation seam, view controller, presenter and the session
//! that ties them together for an embedding surface.

pub mod client;
pub mod controller;
pub mod error;
pub mod presenter;
pub mod protocol;
pub mod session;

pub use client::{GeminiAdapter, PresentationGenerator};
pub use controller::{ViewController, ViewState};
pub use error::{DeckError, ErrorReporter, GENERATION_FAILED_MESSAGE};
pub use protocol::{Effect, Op, Status};
pub use session::Session;

pub use deck_common::{ChartRecord, ChartType, DeckConfig, GenerationError, Presentation, Slide};
