use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for the generation endpoint.
///
/// Exactly one of `official_question_id` (existing-question mode) or
/// `question_text` (new-question mode) is set; the client crate's form
/// validation enforces this before anything is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationRequest {
    pub answer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl GenerationRequest {
    #[must_use]
    pub fn targets_official_question(&self) -> bool {
        self.official_question_id.is_some()
    }
}

/// Successful terminal response: the opaque review identifier the caller
/// navigates to. The controller holds no further state once this arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationSuccess {
    pub review_id: String,
}

/// Backend pipeline stage reported while a generation request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    /// The answer is being structured into paragraphs.
    Analyzing,
    /// The structured answer is being evaluated against the question.
    Evaluating,
}

/// One line of the NDJSON progress stream the generation endpoint emits.
///
/// The stream is a sequence of `phase` events followed by a single terminal
/// `done`; failures arrive as a non-OK HTTP status with an
/// [`crate::ErrorDetail`] body instead of a stream event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BackendEvent {
    Phase { phase: StreamPhase },
    Done { review_id: String },
}
