//! Case-insensitive text matching for catalog lookups.
//!
//! Caller text is escaped before it is compiled, so titles such as
//! "Se7en (1995)" or "What?" match literally.

use cinedex_core::error::{CinedexError, Result};
use regex::{Regex, RegexBuilder};

/// Where in the haystack the needle has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Prefix,
    Contains,
}

/// A compiled case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    regex: Regex,
}

impl TextMatcher {
    /// # Errors
    ///
    /// `InvalidInput` for a blank needle, which would match everything.
    pub fn new(needle: &str, mode: MatchMode) -> Result<Self> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(CinedexError::invalid_input("query", "Search text is required"));
        }

        let escaped = regex::escape(needle);
        let pattern = match mode {
            MatchMode::Prefix => format!("^{}", escaped),
            MatchMode::Contains => escaped,
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CinedexError::invalid_input("query", e.to_string()))?;
        Ok(Self { regex })
    }

    pub fn prefix(needle: &str) -> Result<Self> {
        Self::new(needle, MatchMode::Prefix)
    }

    pub fn contains(needle: &str) -> Result<Self> {
        Self::new(needle, MatchMode::Contains)
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_ignores_case() {
        let matcher = TextMatcher::prefix("the dark").unwrap();
        assert!(matcher.is_match("The Dark Knight"));
        assert!(!matcher.is_match("Batman: The Dark Knight"));
    }

    #[test]
    fn test_contains_ignores_case() {
        let matcher = TextMatcher::contains("nolan").unwrap();
        assert!(matcher.is_match("Christopher Nolan"));
        assert!(!matcher.is_match("Peter Jackson"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = TextMatcher::prefix("What?").unwrap();
        assert!(matcher.is_match("What? Another sequel"));
        assert!(!matcher.is_match("Wha"));

        let matcher = TextMatcher::contains(".*").unwrap();
        assert!(!matcher.is_match("Inception"));
    }

    #[test]
    fn test_blank_needle_rejected() {
        let err = TextMatcher::prefix("   ").unwrap_err();
        assert!(err.is_invalid_input());
    }
}
