use crate::error::{CorrelationError, Result};
use review_protocol::{FeedbackItem, FeedbackItemId, ReviewFeedback};
use review_segmenter::{NumberingFingerprint, Paragraph, SPACER_NUMBER};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Read-only index from paragraph number to the feedback items that
/// reference it, in original item order.
///
/// Paragraph number 0 is never indexed — spacers are not addressable.
/// Duplicate references within one item's `paragraph_numbers` collapse to a
/// single entry. Rebuild the index whenever the feedback-item set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationIndex {
    by_paragraph: HashMap<u32, Vec<FeedbackItemId>>,
}

impl CorrelationIndex {
    /// Build the index with a single linear pass over the items.
    #[must_use]
    pub fn build(items: &[FeedbackItem]) -> Self {
        let mut by_paragraph: HashMap<u32, Vec<FeedbackItemId>> = HashMap::new();

        for item in items {
            let mut seen = HashSet::new();
            for &number in &item.paragraph_numbers {
                if number == SPACER_NUMBER || !seen.insert(number) {
                    continue;
                }
                by_paragraph.entry(number).or_default().push(item.id.clone());
            }
        }

        Self { by_paragraph }
    }

    /// Build the index, rejecting feedback that references paragraph numbers
    /// absent from the segmented answer. Use this when the answer text was
    /// re-segmented locally and may have diverged from the numbering the
    /// backend assigned (e.g. after a marked-mode fallback).
    pub fn build_verified(items: &[FeedbackItem], paragraphs: &[Paragraph]) -> Result<Self> {
        let known: HashSet<u32> = paragraphs
            .iter()
            .filter(|p| !p.is_spacer())
            .map(|p| p.number)
            .collect();

        let unknown: BTreeSet<u32> = items
            .iter()
            .flat_map(|item| item.paragraph_numbers.iter().copied())
            .filter(|&number| number != SPACER_NUMBER && !known.contains(&number))
            .collect();

        if !unknown.is_empty() {
            return Err(CorrelationError::NumberingMismatch {
                unknown: unknown.into_iter().collect(),
            });
        }

        Ok(Self::build(items))
    }

    /// Build from a full review-feedback payload, verifying the backend's
    /// numbering fingerprint (when present) before checking references.
    pub fn build_from_review(feedback: &ReviewFeedback, paragraphs: &[Paragraph]) -> Result<Self> {
        if let Some(backend) = &feedback.numbering_fingerprint {
            let local = NumberingFingerprint::of(paragraphs);
            if !local.matches(backend) {
                return Err(CorrelationError::FingerprintMismatch {
                    backend: backend.clone(),
                    local: local.as_hex().to_string(),
                });
            }
        }
        Self::build_verified(&feedback.items, paragraphs)
    }

    /// Ordered ids of the feedback items referencing `paragraph_number`.
    #[must_use]
    pub fn items_for(&self, paragraph_number: u32) -> &[FeedbackItemId] {
        self.by_paragraph
            .get(&paragraph_number)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether any feedback references `paragraph_number`. Advisory only,
    /// used for visual de-emphasis of unlinked paragraphs.
    #[must_use]
    pub fn has_items(&self, paragraph_number: u32) -> bool {
        !self.items_for(paragraph_number).is_empty()
    }

    /// Position of `item_id` among the items of `paragraph_number`, used
    /// when focus is activated from the feedback side.
    #[must_use]
    pub fn item_position(&self, paragraph_number: u32, item_id: &str) -> Option<usize> {
        self.items_for(paragraph_number)
            .iter()
            .position(|id| id == item_id)
    }

    /// Paragraph numbers with at least one linked item, ascending.
    #[must_use]
    pub fn referenced_paragraphs(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.by_paragraph.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }
}
