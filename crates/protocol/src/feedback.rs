use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque feedback item identifier assigned by the backend.
pub type FeedbackItemId = String;

/// Category of a feedback item, used by the UI for grouping and badge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    /// Something the answer does well.
    Strength,
    /// Something the answer gets wrong or misses.
    Weakness,
    /// A scoring point the grader looks for.
    Point,
}

impl FeedbackCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Weakness => "weakness",
            Self::Point => "point",
        }
    }
}

/// One structured feedback entry from a generated review.
///
/// `paragraph_numbers` reference the numbering produced by segmenting the
/// same review's answer text; an empty list means the item applies to the
/// answer as a whole. Items are immutable once rendered — edits require a
/// new generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackItem {
    pub id: FeedbackItemId,
    pub category: FeedbackCategory,
    pub description: String,
    #[serde(default)]
    pub paragraph_numbers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FeedbackItem {
    #[must_use]
    pub fn references(&self, paragraph_number: u32) -> bool {
        self.paragraph_numbers.contains(&paragraph_number)
    }
}

/// The feedback portion of a review-result response.
///
/// `numbering_fingerprint` is the backend's digest of the paragraph
/// numbering it assigned (lowercase hex); when present, the correlation
/// layer can compare it against a locally computed fingerprint and fail
/// loudly on divergence instead of silently misattributing feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewFeedback {
    pub review_id: String,
    pub items: Vec<FeedbackItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering_fingerprint: Option<String>,
}
