use crate::paragraph::Paragraph;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of the non-spacer numbering sequence of a segmented
/// answer, as lowercase hex.
///
/// The backend and the client both derive paragraph numbers from the same
/// text; comparing fingerprints detects a divergence (e.g. after a
/// marked-mode fallback renumbered the text) before feedback is attributed
/// to the wrong paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingFingerprint(String);

impl NumberingFingerprint {
    #[must_use]
    pub fn of(elements: &[Paragraph]) -> Self {
        let mut hasher = Sha256::new();
        let numbers: Vec<u32> = elements
            .iter()
            .filter(|p| !p.is_spacer())
            .map(|p| p.number)
            .collect();
        hasher.update((numbers.len() as u64).to_be_bytes());
        for number in numbers {
            hasher.update(number.to_be_bytes());
        }
        Self(to_lower_hex(&hasher.finalize()))
    }

    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a hex digest from the wire.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl std::fmt::Display for NumberingFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    #[test]
    fn identical_numbering_yields_identical_fingerprint() {
        let a = NumberingFingerprint::of(&segment("foo\n\nbar"));
        let b = NumberingFingerprint::of(&segment("$$[1] different\n\n$$[2] words"));
        assert_eq!(a, b);
    }

    #[test]
    fn diverged_numbering_is_detected() {
        let local = NumberingFingerprint::of(&segment("foo\nbar"));
        let backend = NumberingFingerprint::of(&segment("$$[2] foo\n$$[3] bar"));
        assert_ne!(local, backend);
        assert!(!local.matches(backend.as_hex()));
    }

    #[test]
    fn spacers_do_not_affect_the_fingerprint() {
        let with = NumberingFingerprint::of(&segment("foo\n\n\nbar"));
        let without = NumberingFingerprint::of(&segment("foo\nbar"));
        assert_eq!(with, without);
    }

    #[test]
    fn matches_is_case_insensitive() {
        let fingerprint = NumberingFingerprint::of(&segment("foo"));
        let upper = fingerprint.as_hex().to_ascii_uppercase();
        assert!(fingerprint.matches(&upper));
        assert!(fingerprint.matches(&format!(" {} ", fingerprint.as_hex())));
    }

    #[test]
    fn hex_is_lowercase_sha256_width() {
        let fingerprint = NumberingFingerprint::of(&segment("foo"));
        assert_eq!(fingerprint.as_hex().len(), 64);
        assert!(fingerprint
            .as_hex()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
