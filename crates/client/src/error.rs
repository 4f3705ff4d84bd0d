use thiserror::Error;

/// Failures surfaced by a [`crate::ReviewBackend`] implementation.
///
/// `Status` carries the raw material for failure classification; everything
/// else is transport-level and classifies as generic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Non-OK response with the backend's structured `detail` message.
    #[error("generation endpoint returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Connection or protocol failure before a status was obtained.
    #[error("transport error: {0}")]
    Transport(String),

    /// The progress stream ended without a terminal event.
    #[error("malformed progress stream: {0}")]
    Stream(String),
}
