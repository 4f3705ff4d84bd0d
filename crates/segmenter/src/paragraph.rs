use serde::{Deserialize, Serialize};

/// Number assigned to spacer elements. Spacers preserve vertical layout but
/// never participate in correlation.
pub const SPACER_NUMBER: u32 = 0;

/// One element of a segmented answer: a numbered paragraph or a spacer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// 1-based paragraph number, or [`SPACER_NUMBER`] for a blank line.
    pub number: u32,

    /// Line content with any leading `$$[n]` marker removed.
    pub content: String,
}

impl Paragraph {
    #[must_use]
    pub fn new(number: u32, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }

    /// A blank-line element.
    #[must_use]
    pub fn spacer() -> Self {
        Self {
            number: SPACER_NUMBER,
            content: String::new(),
        }
    }

    #[must_use]
    pub const fn is_spacer(&self) -> bool {
        self.number == SPACER_NUMBER
    }
}

/// Which parse produced a paragraph sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Marker numbers were present, consistent and trusted verbatim.
    Marked,
    /// Numbers were computed by counting non-blank lines.
    Unmarked,
}

impl SegmentMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marked => "marked",
            Self::Unmarked => "unmarked",
        }
    }
}

/// Summary counters over a segmentation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStats {
    pub paragraphs: usize,
    pub spacers: usize,
    pub max_number: u32,
}

impl SegmentStats {
    #[must_use]
    pub fn of(elements: &[Paragraph]) -> Self {
        let spacers = elements.iter().filter(|p| p.is_spacer()).count();
        Self {
            paragraphs: elements.len() - spacers,
            spacers,
            max_number: elements.iter().map(|p| p.number).max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for SegmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Paragraphs: {} | Spacers: {} | Max number: {}",
            self.paragraphs, self.spacers, self.max_number
        )
    }
}
