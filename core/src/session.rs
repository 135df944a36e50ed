use std::sync::Arc;

use deck_common::{GenerationError, Presentation};
use tokio::task::JoinHandle;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::client::PresentationGenerator;
use crate::controller::{ViewController, ViewState};
use crate::protocol::{Effect, Op};

/// The generation task currently running, tagged with the id it was issued under.
struct InFlight {
    id: Uuid,
    handle: JoinHandle<Result<Presentation, GenerationError>>,
}

/// Drives a [`ViewController`]: runs the generation effects it requests and
/// feeds the outcomes back in.
///
/// At most one generation is in flight; the controller refuses to start
/// another while one is pending.
pub struct Session {
    controller: ViewController,
    generator: Arc<dyn PresentationGenerator>,
    topic: String,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(generator: Arc<dyn PresentationGenerator>, topic: impl Into<String>) -> Self {
        Self {
            controller: ViewController::new(),
            generator,
            topic: topic.into(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply a command; spawns the generation call when the controller asks for one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, op: Op) {
        if let Some(Effect::Generate) = self.controller.apply(op) {
            self.spawn_generation();
        }
    }

    fn spawn_generation(&mut self) {
        let id = Uuid::new_v4();
        let generator = Arc::clone(&self.generator);
        let topic = self.topic.clone();
        info!(generation = %id, generator = %generator.describe(), "dispatching generation");

        let span = tracing::info_span!("generation", id = %id);
        let handle = tokio::spawn(async move { generator.generate(&topic).await }.instrument(span));
        self.in_flight = Some(InFlight { id, handle });
    }

    /// Wait for the pending generation and apply its outcome.
    ///
    /// Returns `false` immediately when nothing is in flight. A task that
    /// panics or is aborted completes as a transport failure. Cancel-safe.
    pub async fn next_completion(&mut self) -> bool {
        let Some(task) = self.in_flight.as_mut() else {
            return false;
        };
        let joined = (&mut task.handle).await;
        let id = task.id;
        self.in_flight = None;

        let outcome = joined.unwrap_or_else(|e| {
            warn!(generation = %id, error = %e, "generation task failed");
            Err(GenerationError::transport(format!("generation task failed: {e}")))
        });
        self.controller.complete(outcome);
        true
    }
}
