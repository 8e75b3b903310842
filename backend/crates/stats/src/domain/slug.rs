//! Page Slug Value Object
//!
//! A validated page path used as the member key in weekly view counters.

/// Maximum slug length
const SLUG_MAX_LENGTH: usize = 200;

/// Validated page slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageSlug(String);

impl PageSlug {
    /// Validate a raw slug.
    ///
    /// Trimmed, 1..=200 chars, restricted to a path-safe charset. Invalid
    /// slugs are rejected before any store interaction.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > SLUG_MAX_LENGTH {
            return None;
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'));
        if !valid {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_paths() {
        assert!(PageSlug::new("/blog/hello-world").is_some());
        assert!(PageSlug::new("/about").is_some());
        assert!(PageSlug::new("  /about  ").is_some());
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(PageSlug::new("").is_none());
        assert!(PageSlug::new("   ").is_none());
        assert!(PageSlug::new(&"x".repeat(201)).is_none());
    }

    #[test]
    fn test_rejects_unsafe_characters() {
        assert!(PageSlug::new("/blog?q=1").is_none());
        assert!(PageSlug::new("/blog hello").is_none());
    }
}
