//! Whitelist filter for the deletion sweep
//!
//! Persisted types that are no longer configured are only deleted when their
//! key matches the filter. Without a filter every undesired type is eligible.

use regex::Regex;

use crate::{Error, Result};

/// Restricts which persisted-but-undesired keys may be deleted
#[derive(Debug, Clone, Default)]
pub struct KeyFilter {
    patterns: Vec<Regex>,
}

impl KeyFilter {
    /// A filter that accepts every key
    pub fn none() -> Self {
        Self::default()
    }

    /// Match keys containing `needle` literally
    ///
    /// An empty needle yields a filter that accepts every key.
    pub fn literal(needle: &str) -> Self {
        Self::literals([needle])
    }

    /// Match keys containing any of the given substrings
    pub fn literals<'a>(needles: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = needles
            .into_iter()
            .filter(|n| !n.is_empty())
            .filter_map(|n| Regex::new(&regex::escape(n)).ok())
            .collect();
        Self { patterns }
    }

    /// Match keys against a regular expression
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] if `pattern` does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::none());
        }
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidFilter {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            patterns: vec![regex],
        })
    }

    /// True if no pattern restricts the sweep
    pub fn is_open(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if `key` is eligible for deletion
    pub fn matches(&self, key: &str) -> bool {
        self.is_open() || self.patterns.iter().any(|p| p.is_match(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("order", "order-note", true)]
    #[case("order", "customer-note", false)]
    // regex metacharacters are matched literally
    #[case("a.b", "axb", false)]
    #[case("a.b", "key-a.b", true)]
    #[case("", "anything", true)]
    fn test_literal_filter(#[case] needle: &str, #[case] key: &str, #[case] expected: bool) {
        assert_eq!(KeyFilter::literal(needle).matches(key), expected);
    }

    #[test]
    fn test_literals_match_any() {
        let filter = KeyFilter::literals(["order-", "cart-"]);
        assert!(filter.matches("cart-extra"));
        assert!(filter.matches("order-note"));
        assert!(!filter.matches("customer-flags"));
    }

    #[test]
    fn test_pattern_filter_uses_regex() {
        let filter = KeyFilter::pattern("^order-(note|flag)$").unwrap();
        assert!(filter.matches("order-note"));
        assert!(!filter.matches("order-notes"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = KeyFilter::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidFilter { .. }));
    }

    #[test]
    fn test_empty_filter_is_open() {
        assert!(KeyFilter::none().is_open());
        assert!(KeyFilter::pattern("").unwrap().is_open());
    }
}
