//! Content fingerprint for duplicate-document detection.

use sha2::{Digest, Sha256};

/// Number of leading characters hashed into the fingerprint.
pub const FINGERPRINT_CHARS: usize = 10_000;

/// Hex SHA-256 of the first [`FINGERPRINT_CHARS`] characters of the
/// raw text. Deterministic; a collision is treated downstream as
/// "likely duplicate", never as a hard reject.
pub fn fingerprint(text: &str) -> String {
    let end = text
        .char_indices()
        .nth(FINGERPRINT_CHARS)
        .map_or(text.len(), |(idx, _)| idx);
    let mut hasher = Sha256::new();
    hasher.update(text[..end].as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint("statement text"), fingerprint("statement text"));
    }

    #[test]
    fn test_single_char_change_changes_fingerprint() {
        assert_ne!(fingerprint("statement text"), fingerprint("statement texT"));
    }

    #[test]
    fn test_text_beyond_prefix_is_ignored() {
        let prefix = "x".repeat(FINGERPRINT_CHARS);
        let a = format!("{prefix}AAAA");
        let b = format!("{prefix}BBBB");
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_change_inside_prefix_is_detected() {
        let a = format!("a{}", "x".repeat(FINGERPRINT_CHARS));
        let b = format!("b{}", "x".repeat(FINGERPRINT_CHARS));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_multibyte_boundary_is_safe() {
        let text = "é".repeat(FINGERPRINT_CHARS + 10);
        // Must not panic on a non-ASCII boundary.
        let _ = fingerprint(&text);
    }
}
