use serde::{Deserialize, Serialize};

/// Lifecycle of one generation request as observed by the UI.
///
/// The backend pipeline has two long stages: structuring the answer
/// (`Analyzing`) and judging it against the question (`Evaluating`). A
/// request may also end while still analyzing, e.g. on a validation-level
/// rejection by the backend or an early provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Idle,
    Analyzing,
    Evaluating,
    Done,
    Cancelled,
    Failed,
}

impl GenerationPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Evaluating => "evaluating",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// A request is currently in flight.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Analyzing | Self::Evaluating)
    }

    /// The previous request reached a final state; a new submit may start.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }
}

impl std::fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn is_valid_transition(from: GenerationPhase, to: GenerationPhase) -> bool {
    use GenerationPhase as P;

    if from == to {
        return true;
    }

    matches!(
        (from, to),
        (P::Idle, P::Analyzing)
            | (P::Analyzing, P::Evaluating)
            | (P::Analyzing, P::Done)
            | (P::Analyzing, P::Cancelled)
            | (P::Analyzing, P::Failed)
            | (P::Evaluating, P::Done)
            | (P::Evaluating, P::Cancelled)
            | (P::Evaluating, P::Failed)
            // Resubmit from any settled request.
            | (P::Done, P::Analyzing)
            | (P::Cancelled, P::Analyzing)
            | (P::Failed, P::Analyzing)
    )
}
