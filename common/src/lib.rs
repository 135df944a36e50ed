pub mod config;
pub mod decode;
pub mod error;
pub mod types;

pub use config::DeckConfig;
pub use decode::decode_presentation;
pub use error::{ConfigError, GenerationError};
pub use types::{ChartRecord, ChartType, Presentation, Slide};
