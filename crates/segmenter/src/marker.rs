use once_cell::sync::Lazy;
use regex::Regex;

/// Line-leading paragraph marker: `$$[<n>]` followed by optional whitespace
/// and the line content.
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\$\[(\d+)\]\s*(.*)$").expect("marker pattern is valid"));

/// Parse a line as a marked paragraph, returning the marker number and the
/// remaining content. Numbers too large for `u32` do not count as markers.
pub(crate) fn parse_marked_line(line: &str) -> Option<(u32, &str)> {
    let caps = MARKER.captures(line)?;
    let number: u32 = caps.get(1)?.as_str().parse().ok()?;
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some((number, content))
}

/// Remove line-leading `$$[n]` tokens from `text`, keeping everything else
/// intact. Used when paragraph content is copied elsewhere (e.g. into a chat
/// composer) so markers never leak into user-facing text.
///
/// Stacked markers (`$$[1] $$[2] text`) are stripped until the line no
/// longer starts with one; markers in the middle of a line are content.
#[must_use]
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut first = true;
    for line in crate::segment::split_lines(text) {
        if !first {
            out.push('\n');
        }
        first = false;
        let mut rest = line;
        while let Some((_, content)) = parse_marked_line(rest) {
            rest = content;
        }
        out.push_str(rest);
    }
    out
}
