use crate::index::CorrelationIndex;
use review_protocol::FeedbackItemId;
use serde::Serialize;

/// Which single feedback item, among possibly several referencing the same
/// paragraph, is currently highlighted. Transient UI state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusState {
    pub paragraph_number: u32,
    /// Always within `[0, total_count)`.
    pub current_index: usize,
    /// Count of feedback items referencing `paragraph_number`.
    pub total_count: usize,
}

/// Which side of the result view triggered the activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin<'a> {
    /// A paragraph marker in the answer pane; focus starts at the first
    /// linked item.
    Answer,
    /// A feedback card; focus starts at that item's position among its
    /// paragraph's items.
    Feedback(&'a str),
}

/// Cycles through the feedback items linked to one paragraph.
///
/// States are `Unfocused` and `Focused(paragraph, index)`: activation moves
/// to `Focused`, stepping and re-activation stay `Focused`, and an explicit
/// clear — or the active paragraph losing all its items on a rebuild —
/// returns to `Unfocused`. Lives for the UI session; there is no terminal
/// state.
#[derive(Debug, Clone, Default)]
pub struct FocusNavigator {
    state: Option<FocusState>,
}

impl FocusNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> Option<&FocusState> {
        self.state.as_ref()
    }

    /// Entry point when a paragraph marker or a feedback item is clicked.
    /// Activating a paragraph with no linked items clears the focus.
    pub fn activate(
        &mut self,
        index: &CorrelationIndex,
        paragraph_number: u32,
        origin: Origin<'_>,
    ) -> Option<&FocusState> {
        let total_count = index.items_for(paragraph_number).len();
        if total_count == 0 {
            self.state = None;
            return None;
        }

        let current_index = match origin {
            Origin::Answer => 0,
            Origin::Feedback(item_id) => index
                .item_position(paragraph_number, item_id)
                .unwrap_or(0),
        };

        self.state = Some(FocusState {
            paragraph_number,
            current_index,
            total_count,
        });
        self.state.as_ref()
    }

    /// Move the focus within the current paragraph's items. The index is
    /// clamped to `[0, total_count)`; stepping past either end is a no-op.
    pub fn step(&mut self, delta: i32) -> Option<&FocusState> {
        if let Some(state) = &mut self.state {
            let last = state.total_count - 1;
            let stepped = state.current_index as i64 + i64::from(delta);
            state.current_index = stepped.clamp(0, last as i64) as usize;
        }
        self.state.as_ref()
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    /// Reconcile the focus after the feedback-item set was rebuilt: the
    /// focus is cleared when the active paragraph lost all its items, and
    /// re-clamped when the item count shrank.
    pub fn sync(&mut self, index: &CorrelationIndex) {
        let Some(state) = &mut self.state else {
            return;
        };
        let total_count = index.items_for(state.paragraph_number).len();
        if total_count == 0 {
            log::debug!(
                "paragraph {} lost all feedback items, clearing focus",
                state.paragraph_number
            );
            self.state = None;
            return;
        }
        state.total_count = total_count;
        state.current_index = state.current_index.min(total_count - 1);
    }

    /// Id of the currently focused feedback item, for the presentation layer
    /// to scroll into view and highlight.
    #[must_use]
    pub fn focused_item<'a>(&self, index: &'a CorrelationIndex) -> Option<&'a FeedbackItemId> {
        let state = self.state.as_ref()?;
        index.items_for(state.paragraph_number).get(state.current_index)
    }
}
