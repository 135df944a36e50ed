use async_trait::async_trait;
use deck_common::{DeckConfig, GenerationError, Presentation};
use deck_gemini::GeminiClient;

/// Anything that can turn a topic into a presentation with one call.
#[async_trait]
pub trait PresentationGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<Presentation, GenerationError>;

    /// Name used in logs.
    fn describe(&self) -> String {
        "generator".to_string()
    }
}

/// Adapter to wrap [`GeminiClient`] into [`PresentationGenerator`]
pub struct GeminiAdapter {
    inner: GeminiClient,
}

impl GeminiAdapter {
    pub fn new(inner: GeminiClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &DeckConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(GeminiClient::from_config(config)?))
    }
}

#[async_trait]
impl PresentationGenerator for GeminiAdapter {
    async fn generate(&self, topic: &str) -> Result<Presentation, GenerationError> {
        self.inner.generate(topic).await
    }

    fn describe(&self) -> String {
        format!("gemini:{}", self.inner.model())
    }
}
