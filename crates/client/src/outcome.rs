use crate::error::BackendError;
use crate::form::ValidationError;
use review_protocol::GenerationSuccess;
use thiserror::Error;

/// Upstream message fragment signalling that the monthly review quota is
/// exhausted and a ticket purchase is required.
const TICKET_EXHAUSTED_SIGNAL: &str = "講評の作成回数が上限";

/// Free-text fragments upstream AI providers use to report their own
/// timeouts. Matched case-insensitively against the error detail.
const TIMEOUT_SIGNALS: &[&str] = &["timeout", "timed out", "deadline exceeded", "タイムアウト"];

/// Which billing modal the caller should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingKind {
    /// No plan registered; open plan selection.
    Plan,
    /// Review quota exhausted; open ticket purchase.
    Ticket,
}

/// Classified failure of a generation request. None of these are retried
/// automatically; the user must re-trigger a submit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// The client-side budget elapsed before the backend answered.
    #[error("the request exceeded the client timeout budget")]
    ClientTimeout,

    /// The upstream AI provider reported its own timeout.
    #[error("the AI provider timed out while generating the review")]
    ServerTimeout,

    /// A billing precondition is not met; the caller opens the matching
    /// modal instead of showing a plain error string.
    #[error("billing action required")]
    BillingRequired(BillingKind),

    #[error("{0}")]
    Generic(String),
}

impl GenerationFailure {
    /// User-facing retry guidance: a client timeout may be transient while
    /// an upstream timeout means the provider is saturated.
    #[must_use]
    pub const fn retry_guidance(&self) -> &'static str {
        match self {
            Self::ClientTimeout => "retrying now may succeed",
            Self::ServerTimeout => "wait a while before retrying",
            Self::BillingRequired(_) => "complete the billing step, then retry",
            Self::Generic(_) => "check the answer and retry",
        }
    }

    /// Map a backend failure into the taxonomy.
    #[must_use]
    pub fn from_backend(error: &BackendError) -> Self {
        match error {
            BackendError::Status { status, detail } => classify(*status, detail),
            BackendError::Transport(message) | BackendError::Stream(message) => {
                Self::Generic(message.clone())
            }
        }
    }
}

/// Classify a non-OK response into the failure taxonomy. Pure function of
/// status and detail; drives which modal the caller shows.
#[must_use]
pub fn classify(status: u16, detail: &str) -> GenerationFailure {
    if status == 402 {
        return GenerationFailure::BillingRequired(BillingKind::Plan);
    }
    if status == 429 && detail.contains(TICKET_EXHAUSTED_SIGNAL) {
        return GenerationFailure::BillingRequired(BillingKind::Ticket);
    }
    if has_timeout_signal(detail) {
        return GenerationFailure::ServerTimeout;
    }
    if detail.trim().is_empty() {
        return GenerationFailure::Generic(format!("generation failed with status {status}"));
    }
    GenerationFailure::Generic(detail.to_string())
}

fn has_timeout_signal(detail: &str) -> bool {
    let lowered = detail.to_lowercase();
    TIMEOUT_SIGNALS
        .iter()
        .any(|signal| lowered.contains(&signal.to_lowercase()))
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The review exists; navigate to it.
    Completed(GenerationSuccess),
    /// Local validation failed; no network call was made.
    Rejected(Vec<ValidationError>),
    /// The request failed; see the classified failure.
    Failed(GenerationFailure),
    /// The request was cancelled — user-initiated or superseded by a newer
    /// submit. Deliberately not an error.
    Cancelled,
}
