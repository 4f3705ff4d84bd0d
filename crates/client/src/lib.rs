//! # Review Client
//!
//! The generation-request side of the answer-review workflow: form
//! validation, submission of a long-running AI review-generation call,
//! cancellation, timeout budgeting, two-stage phase reporting and failure
//! classification.
//!
//! ## Architecture
//!
//! ```text
//! ReviewForm
//!     │ validate (no network on failure)
//!     ▼
//! GenerationController ──────────────┐
//!     │ owns one cancellation token  │ phase: watch<GenerationPhase>
//!     │ and a submission serial      │ (UI subscribes)
//!     ▼                              │
//! ReviewBackend (trait) ─────────────┘
//!     └─> HttpReviewBackend: POST + NDJSON progress stream
//! ```
//!
//! A second `submit` while one call is in flight cancels the first before
//! starting (last-submit-wins); the superseded attempt resolves as
//! [`SubmitOutcome::Cancelled`] and can no longer touch the shared phase.
//! Failures classify into a small taxonomy ([`GenerationFailure`]) that the
//! caller maps onto modals: plan registration, ticket purchase, or a plain
//! message with retry guidance. No class is retried automatically.

mod backend;
mod config;
mod controller;
mod error;
mod form;
mod http;
mod outcome;
mod phase;

pub use backend::{PhaseReporter, ReviewBackend};
pub use config::ClientConfig;
pub use controller::GenerationController;
pub use error::BackendError;
pub use form::{QuestionMode, ReviewForm, ValidationError, MIN_ANSWER_CHARS};
pub use http::HttpReviewBackend;
pub use outcome::{classify, BillingKind, GenerationFailure, SubmitOutcome};
pub use phase::GenerationPhase;
