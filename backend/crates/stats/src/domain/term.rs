//! Search Term Value Object
//!
//! Represents a normalized, validated search term. Validation happens
//! before any store interaction; rejected input is surfaced to callers as
//! a no-op success, never an error.

/// Minimum normalized term length
const TERM_MIN_LENGTH: usize = 2;
/// Maximum normalized term length
const TERM_MAX_LENGTH: usize = 60;

/// Normalized search term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalize (trim, lowercase) and validate a raw submission.
    ///
    /// Returns `None` when the normalized length, in characters, falls
    /// outside [`TERM_MIN_LENGTH`]..=[`TERM_MAX_LENGTH`].
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        let chars = normalized.chars().count();
        if chars < TERM_MIN_LENGTH || chars > TERM_MAX_LENGTH {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let term = SearchTerm::new("  ReactJS  ").unwrap();
        assert_eq!(term.as_str(), "reactjs");
        assert_eq!(term, SearchTerm::new("reactjs").unwrap());
    }

    #[test]
    fn test_rejects_too_short() {
        assert!(SearchTerm::new("a").is_none());
        assert!(SearchTerm::new("  a  ").is_none());
        assert!(SearchTerm::new("").is_none());
    }

    #[test]
    fn test_accepts_minimum_length() {
        assert!(SearchTerm::new("ab").is_some());
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "x".repeat(61);
        assert!(SearchTerm::new(&long).is_none());
        let max = "x".repeat(60);
        assert!(SearchTerm::new(&max).is_some());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "é" is two bytes but one character; still too short
        assert!(SearchTerm::new("é").is_none());
        assert!(SearchTerm::new("éé").is_some());
        // 60 two-byte characters exceed 60 bytes but fit the bound
        let max = "é".repeat(60);
        assert!(SearchTerm::new(&max).is_some());
        assert!(SearchTerm::new(&"é".repeat(61)).is_none());
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert!(SearchTerm::new("   ").is_none());
    }
}
