//! # Review Segmenter
//!
//! Deterministic segmentation of an essay answer into numbered paragraphs.
//!
//! ## Architecture
//!
//! ```text
//! Answer Text
//!     │
//!     ├──> Line Split (blank lines kept as explicit spacers)
//!     │
//!     ├──> Marked-Mode Parse ($$[n] prefixes, all-or-nothing)
//!     │    └─> on any mixing or non-monotonic numbering:
//!     │        whole-text fallback, never a partial parse
//!     │
//!     └──> Unmarked Mode
//!          ├─> strip stray $$[n] prefixes
//!          └─> number non-blank lines 1..k, blanks 0
//! ```
//!
//! Segmentation is a pure function of the input text: identical input always
//! yields an identical paragraph sequence, so results are safe to recompute
//! inside a render path. It never fails — malformed marker input degrades to
//! unmarked renumbering rather than rejecting the text.
//!
//! ## Example
//!
//! ```rust
//! use review_segmenter::segment;
//!
//! let paragraphs = segment("line one\n\nline two");
//! let numbers: Vec<u32> = paragraphs.iter().map(|p| p.number).collect();
//! assert_eq!(numbers, [1, 0, 2]);
//! ```

mod fingerprint;
mod marker;
mod paragraph;
mod segment;

pub use fingerprint::NumberingFingerprint;
pub use marker::strip_markers;
pub use paragraph::{Paragraph, SegmentMode, SegmentStats, SPACER_NUMBER};
pub use segment::{reassemble, segment, segment_with_mode, to_marked_text};
