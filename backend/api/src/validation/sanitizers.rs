//! Input normalization functions
//!
//! This module provides the functions that clean up raw form values
//! before and after the field rules run.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Separators tolerated inside phone numbers
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-]").unwrap();
}

/// Trim leading and trailing whitespace from a string
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim and lower-case, as applied to email addresses
pub fn trim_lowercase(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim an optional string, mapping blank values to `None`
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Remove every space and hyphen from a phone number
pub fn strip_phone_separators(phone: &str) -> String {
    PHONE_SEPARATORS.replace_all(phone, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("\n\tspaces\t\n"), "spaces");
    }

    #[test]
    fn test_trim_lowercase() {
        assert_eq!(trim_lowercase("  USER@Example.COM  "), "user@example.com");
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(Some("  hello  ")), Some("hello".to_string()));
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(Some("")), None);
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn test_strip_phone_separators() {
        assert_eq!(strip_phone_separators("+238 261-1234"), "+2382611234");
        assert_eq!(strip_phone_separators("261 - 12 34"), "2611234");
        assert_eq!(strip_phone_separators("2611234"), "2611234");
    }
}
