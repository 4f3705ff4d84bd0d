use crate::error::BackendError;
use async_trait::async_trait;
use review_protocol::{GenerationRequest, GenerationSuccess, StreamPhase};
use std::sync::Arc;

/// Collaborator that runs one generation call end to end.
///
/// Implementations report pipeline stage switches through the
/// [`PhaseReporter`] as they observe them and resolve with the review id.
/// Cancellation and the overall time budget are owned by the controller,
/// not by implementations.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
        progress: &PhaseReporter,
    ) -> Result<GenerationSuccess, BackendError>;
}

/// Callback handle a backend uses to surface pipeline stage switches.
#[derive(Clone)]
pub struct PhaseReporter {
    notify: Arc<dyn Fn(StreamPhase) + Send + Sync>,
}

impl PhaseReporter {
    pub fn new(notify: impl Fn(StreamPhase) + Send + Sync + 'static) -> Self {
        Self {
            notify: Arc::new(notify),
        }
    }

    /// Reporter that discards stage switches, for callers driving a backend
    /// directly without a controller.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, phase: StreamPhase) {
        (self.notify)(phase);
    }
}

impl std::fmt::Debug for PhaseReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseReporter").finish_non_exhaustive()
    }
}
