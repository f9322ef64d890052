//! Best-effort guess at whether a stored value is already encoded.
//!
//! The legacy migration script skipped values made only of "encoded-looking"
//! characters or non-digits. That boundary is kept exactly as it was so that
//! historical data is classified the same way. It misfires both ways: a
//! plaintext without digits (`"secret"`) looks encoded, and an encoded value
//! containing a digit (`";493"`) looks plain.

/// Characters the legacy script treated as possible encoder output.
pub const ENCODED_LOOKING: &[char] = &[
    'Q', 'W', 'E', 'R', 'T', 'A', 'S', 'D', 'F', 'G', 'Z', 'X', 'C', 'V', 'B', 'Y', 'U', 'I', 'O',
    'P', 'H', 'J', 'K', 'L', 'Ç', 'N', 'M', '!', '@', '#', '$', '%', '¨', '&', '*', '(', ')', '_',
    '+', '=', '{', '}', '[', ']', '?', '/', ':', ';', '>', '<',
];

/// Returns true if `candidate` looks like it was already encoded.
///
/// Empty input is never considered encoded.
pub fn looks_already_encoded(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| ENCODED_LOOKING.contains(&c) || !c.is_ascii_digit())
}

/// Classification of a stored value, as reported by tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredFormat {
    /// Heuristic says the value is already encoded
    Encoded,
    /// Heuristic says the value still needs encoding
    Plain,
}

impl StoredFormat {
    pub fn classify(candidate: &str) -> Self {
        if looks_already_encoded(candidate) {
            StoredFormat::Encoded
        } else {
            StoredFormat::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoredFormat::Encoded => "encoded",
            StoredFormat::Plain => "plain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::codec::PasswordCodec;

    #[test]
    fn test_empty_is_not_encoded() {
        assert!(!looks_already_encoded(""));
        assert_eq!(StoredFormat::classify(""), StoredFormat::Plain);
    }

    #[test]
    fn test_digits_look_plain() {
        assert!(!looks_already_encoded("123456"));
        assert!(!looks_already_encoded("admin123"));
        assert!(!looks_already_encoded("9"));
    }

    #[test]
    fn test_digit_free_values_look_encoded() {
        assert!(looks_already_encoded("?<><"));
        assert!(looks_already_encoded("QWERTY"));
        assert!(looks_already_encoded("Ç¨"));
    }

    #[test]
    fn test_known_false_positive() {
        // a plaintext with no digits is skipped by the legacy boundary
        assert!(looks_already_encoded("secret"));
        assert!(looks_already_encoded("senha-forte"));
    }

    #[test]
    fn test_known_false_negative() {
        // encoded output often contains digits
        let encoded = PasswordCodec::builtin().encode("0");
        assert_eq!(encoded, ";493");
        assert!(!looks_already_encoded(&encoded));
    }

    #[test]
    fn test_non_ascii_digits_do_not_count() {
        assert!(looks_already_encoded("٣٤"));
    }

    #[test]
    fn test_as_str() {
        assert_eq!(StoredFormat::Encoded.as_str(), "encoded");
        assert_eq!(StoredFormat::Plain.as_str(), "plain");
    }
}
