//! Paragraph↔feedback correlation for the answer-review result view.
//!
//! [`CorrelationIndex`] is a derived, read-only view over a review's
//! feedback items: paragraph number → the ordered ids of the items that
//! reference it. [`FocusNavigator`] cycles through the items linked to one
//! paragraph, so the answer pane and the feedback pane can highlight each
//! other from either side.
//!
//! Both are pure and synchronous; the index is rebuilt whenever the
//! feedback-item set changes and never mutated in place.

mod error;
mod focus;
mod index;

pub use error::{CorrelationError, Result};
pub use focus::{FocusNavigator, FocusState, Origin};
pub use index::CorrelationIndex;
