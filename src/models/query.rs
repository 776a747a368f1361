//! Validated city name input

use crate::{Result, TempoError};
use std::fmt;

/// A validated, trimmed city name
///
/// Parsing rejects blank input before any network request is issued, so a
/// `CityQuery` in hand always carries a non-empty place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Parse free-text input into a city query
    ///
    /// Trims surrounding whitespace and rejects empty or whitespace-only
    /// input with a validation error.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TempoError::validation(
                "Por favor, digite o nome de uma cidade.",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The validated city name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_input_rejected(#[case] input: &str) {
        let result = CityQuery::parse(input);
        assert!(matches!(result, Err(TempoError::Validation { .. })));
    }

    #[test]
    fn test_blank_input_message_is_pt_br() {
        let err = CityQuery::parse("  ").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Por favor, digite o nome de uma cidade."
        );
    }

    #[test]
    fn test_input_is_trimmed() {
        let query = CityQuery::parse("  São Paulo  ").unwrap();
        assert_eq!(query.as_str(), "São Paulo");
    }

    #[test]
    fn test_display_matches_input() {
        let query = CityQuery::parse("Curitiba").unwrap();
        assert_eq!(query.to_string(), "Curitiba");
    }
}
