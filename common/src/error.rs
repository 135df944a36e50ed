use thiserror::Error;

/// Why a generation attempt failed.
///
/// Both variants surface to the user as the same generic message; the split
/// exists for logs and diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The service answered, but not with JSON matching the slide schema.
    #[error("invalid response format: {0}")]
    Format(String),

    /// The call did not complete: network failure, non-success status,
    /// rate limiting or a missing credential.
    #[error("generation request failed: {0}")]
    Transport(String),
}

impl GenerationError {
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// Short machine-friendly label used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::Transport(_) => "transport",
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
