use crate::backend::{PhaseReporter, ReviewBackend};
use crate::config::ClientConfig;
use crate::error::BackendError;
use crate::form::ReviewForm;
use crate::http::HttpReviewBackend;
use crate::outcome::{GenerationFailure, SubmitOutcome};
use crate::phase::{is_valid_transition, GenerationPhase};
use review_protocol::StreamPhase;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Owns one in-flight generation call at a time.
///
/// `submit` cancels and discards any previous in-flight request before
/// starting (last-submit-wins). Each attempt gets a serial number; the
/// shared phase channel only accepts writes from the newest serial, so a
/// superseded attempt can resolve quietly without clobbering the phase the
/// UI is watching. The cancellation token and phase fields are mutated only
/// by `submit` and `cancel`, never from outside.
pub struct GenerationController {
    backend: Arc<dyn ReviewBackend>,
    config: ClientConfig,
    shared: Arc<Shared>,
    current: Mutex<Option<Attempt>>,
}

struct Shared {
    phase: watch::Sender<GenerationPhase>,
    newest_serial: AtomicU64,
}

struct Attempt {
    serial: u64,
    token: CancellationToken,
}

impl Shared {
    /// Apply a phase transition on behalf of attempt `serial`. Writes from
    /// superseded attempts and invalid transitions are dropped.
    fn set_phase(&self, serial: u64, next: GenerationPhase) {
        if self.newest_serial.load(Ordering::SeqCst) != serial {
            return;
        }
        let current = *self.phase.borrow();
        if !is_valid_transition(current, next) {
            log::warn!("dropping invalid phase transition {current} -> {next}");
            return;
        }
        if current != next {
            log::debug!("generation phase {current} -> {next}");
            self.phase.send_replace(next);
        }
    }
}

impl GenerationController {
    pub fn new(backend: Arc<dyn ReviewBackend>, config: ClientConfig) -> Self {
        let (phase, _) = watch::channel(GenerationPhase::Idle);
        Self {
            backend,
            config,
            shared: Arc::new(Shared {
                phase,
                newest_serial: AtomicU64::new(0),
            }),
            current: Mutex::new(None),
        }
    }

    /// Controller wired to the real HTTP backend.
    pub fn over_http(config: ClientConfig) -> Result<Self, BackendError> {
        let backend = HttpReviewBackend::new(&config)?;
        Ok(Self::new(Arc::new(backend), config))
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        *self.shared.phase.borrow()
    }

    /// Subscription for the UI; the receiver observes every phase change.
    #[must_use]
    pub fn phase_watch(&self) -> watch::Receiver<GenerationPhase> {
        self.shared.phase.subscribe()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.phase().is_in_flight()
    }

    /// Run one generation request end to end.
    ///
    /// Local validation failures resolve without any network call. A call
    /// superseded by a newer `submit`, or aborted by `cancel`, resolves as
    /// [`SubmitOutcome::Cancelled`] — deliberately not an error.
    pub async fn submit(&self, form: &ReviewForm) -> SubmitOutcome {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(errors) => return SubmitOutcome::Rejected(errors),
        };

        let serial = self.shared.newest_serial.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();

        {
            let mut current = self.lock_current();
            match current.take() {
                Some(previous) if previous.serial > serial => {
                    // A newer submit raced ahead between our serial grab and
                    // this lock; that one wins.
                    *current = Some(previous);
                    token.cancel();
                }
                Some(previous) => {
                    log::debug!("superseding in-flight generation request");
                    previous.token.cancel();
                    *current = Some(Attempt {
                        serial,
                        token: token.clone(),
                    });
                }
                None => {
                    *current = Some(Attempt {
                        serial,
                        token: token.clone(),
                    });
                }
            }
        }

        self.shared.set_phase(serial, GenerationPhase::Analyzing);

        let reporter = {
            let shared = Arc::clone(&self.shared);
            PhaseReporter::new(move |stream_phase| {
                let next = match stream_phase {
                    StreamPhase::Analyzing => GenerationPhase::Analyzing,
                    StreamPhase::Evaluating => GenerationPhase::Evaluating,
                };
                shared.set_phase(serial, next);
            })
        };

        let outcome = tokio::select! {
            () = token.cancelled() => {
                self.shared.set_phase(serial, GenerationPhase::Cancelled);
                SubmitOutcome::Cancelled
            }
            result = timeout(
                self.config.request_timeout,
                self.backend.generate(&request, &reporter),
            ) => match result {
                Err(_) => {
                    log::warn!(
                        "generation request exceeded the {:?} budget",
                        self.config.request_timeout
                    );
                    self.shared.set_phase(serial, GenerationPhase::Failed);
                    SubmitOutcome::Failed(GenerationFailure::ClientTimeout)
                }
                Ok(Ok(success)) => {
                    self.shared.set_phase(serial, GenerationPhase::Done);
                    SubmitOutcome::Completed(success)
                }
                Ok(Err(error)) => {
                    log::warn!("generation request failed: {error}");
                    self.shared.set_phase(serial, GenerationPhase::Failed);
                    SubmitOutcome::Failed(GenerationFailure::from_backend(&error))
                }
            },
        };

        let mut current = self.lock_current();
        if current.as_ref().is_some_and(|attempt| attempt.serial == serial) {
            *current = None;
        }

        outcome
    }

    /// Abort the in-flight request, if any. The aborted `submit` resolves
    /// as [`SubmitOutcome::Cancelled`] and the phase moves to `Cancelled`.
    pub fn cancel(&self) {
        let current = self.lock_current();
        if let Some(attempt) = current.as_ref() {
            log::debug!("cancelling in-flight generation request");
            attempt.token.cancel();
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<Attempt>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
