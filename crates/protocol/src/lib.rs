//! Wire and domain types shared across the review-engine workspace.
//!
//! Everything here is shape, not behavior: the segmenter, correlation and
//! client crates exchange these types with each other and with the backend
//! API that produces review content. Paragraph numbers used in
//! [`FeedbackItem::paragraph_numbers`] live in the same numbering space as
//! the segmenter's output for the answer text of the same review.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod feedback;
pub mod generation;

pub use feedback::{FeedbackCategory, FeedbackItem, FeedbackItemId, ReviewFeedback};
pub use generation::{BackendEvent, GenerationRequest, GenerationSuccess, StreamPhase};

pub const PROTOCOL_SCHEMA_VERSION: u32 = 1;

/// Structured error body returned by the generation endpoint on non-OK
/// statuses. The HTTP status plus `detail` drive failure classification.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Best-effort decode of an error body; a backend that returns plain
    /// text instead of the envelope still yields a usable detail string.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Self>(body) {
            Ok(parsed) => parsed,
            Err(_) => Self {
                detail: body.trim().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_detail_decodes_envelope() {
        let decoded = ErrorDetail::from_body(r#"{"detail":"plan not registered"}"#);
        assert_eq!(decoded.detail, "plan not registered");
    }

    #[test]
    fn error_detail_falls_back_to_raw_body() {
        let decoded = ErrorDetail::from_body("  Bad Gateway\n");
        assert_eq!(decoded.detail, "Bad Gateway");
    }
}
