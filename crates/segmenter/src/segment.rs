use crate::marker::parse_marked_line;
use crate::paragraph::{Paragraph, SegmentMode, SPACER_NUMBER};

/// Segment `text` into numbered paragraphs and spacers.
///
/// The marked-mode parse is attempted first; any mixing of marked and
/// unmarked non-blank lines, or a non-monotonic marker sequence, fails the
/// whole parse and the entire text is renumbered in unmarked mode — never
/// half of it. Never panics; empty input yields an empty sequence.
#[must_use]
pub fn segment(text: &str) -> Vec<Paragraph> {
    segment_with_mode(text).0
}

/// [`segment`], also reporting which parse produced the result.
#[must_use]
pub fn segment_with_mode(text: &str) -> (Vec<Paragraph>, SegmentMode) {
    let lines = split_lines(text);
    match try_segment_marked(&lines) {
        MarkedParse::Parsed(elements) => (elements, SegmentMode::Marked),
        MarkedParse::NoMarkers => (segment_unmarked(&lines), SegmentMode::Unmarked),
        MarkedParse::Malformed(reason) => {
            log::warn!("marked-mode parse failed ({reason}), renumbering whole text");
            (segment_unmarked(&lines), SegmentMode::Unmarked)
        }
    }
}

/// Split on `\n`, keeping a trailing blank line as its own element so
/// vertical layout survives a round trip. A trailing `\r` is trimmed per
/// line. Empty input has no lines at all.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

enum MarkedParse {
    Parsed(Vec<Paragraph>),
    NoMarkers,
    Malformed(&'static str),
}

fn try_segment_marked(lines: &[&str]) -> MarkedParse {
    if !lines
        .iter()
        .any(|line| parse_marked_line(line).is_some())
    {
        return MarkedParse::NoMarkers;
    }

    let mut elements = Vec::with_capacity(lines.len());
    let mut previous: Option<u32> = None;

    for line in lines {
        if line.trim().is_empty() {
            elements.push(Paragraph::new(SPACER_NUMBER, *line));
            continue;
        }
        let Some((number, content)) = parse_marked_line(line) else {
            return MarkedParse::Malformed("unmarked non-blank line among marked lines");
        };
        if number == SPACER_NUMBER {
            return MarkedParse::Malformed("marker number 0 is reserved for spacers");
        }
        if previous.is_some_and(|prev| number <= prev) {
            return MarkedParse::Malformed("marker numbers are not strictly increasing");
        }
        previous = Some(number);
        elements.push(Paragraph::new(number, content));
    }

    MarkedParse::Parsed(elements)
}

fn segment_unmarked(lines: &[&str]) -> Vec<Paragraph> {
    let mut elements = Vec::with_capacity(lines.len());
    let mut next = 1u32;

    for line in lines {
        // Stray markers from a failed marked-mode parse are stripped rather
        // than shown to the user.
        let mut content = *line;
        while let Some((_, rest)) = parse_marked_line(content) {
            content = rest;
        }
        if content.trim().is_empty() {
            elements.push(Paragraph::new(SPACER_NUMBER, content));
        } else {
            elements.push(Paragraph::new(next, content));
            next += 1;
        }
    }

    elements
}

/// Join element contents back into plain text: paragraph contents in order,
/// spacers re-inserted at their original line positions, markers excluded.
#[must_use]
pub fn reassemble(elements: &[Paragraph]) -> String {
    let mut out = String::new();
    let mut first = true;
    for element in elements {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&element.content);
    }
    out
}

/// Serialize elements into marked text, the on-wire convention used when a
/// segmented answer is persisted for later re-display: `$$[n] content` per
/// paragraph, spacer lines verbatim.
#[must_use]
pub fn to_marked_text(elements: &[Paragraph]) -> String {
    let mut out = String::new();
    let mut first = true;
    for element in elements {
        if !first {
            out.push('\n');
        }
        first = false;
        if element.is_spacer() {
            out.push_str(&element.content);
        } else {
            out.push_str(&format!("$$[{}] {}", element.number, element.content));
        }
    }
    out
}
