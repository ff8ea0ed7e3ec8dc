use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated short identifier for a redirect link.
///
/// Link ids are embedded directly in a public URL path, so they must be
/// 1-64 characters drawn from the unreserved path characters
/// `[A-Za-z0-9._~-]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(String);

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 64;

impl LinkId {
    /// Creates a new `LinkId` after validating the input.
    pub fn new(id: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `LinkId` without validation.
    ///
    /// Use this only for ids read back from a trusted document.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> std::result::Result<(), CoreError> {
        if id.len() < MIN_LENGTH || id.len() > MAX_LENGTH {
            return Err(CoreError::InvalidLinkId(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
        {
            return Err(CoreError::InvalidLinkId(format!(
                "must contain only alphanumeric characters, hyphens, underscores, dots, or tildes: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert!(LinkId::new("a").is_ok());
        assert!(LinkId::new("promo").is_ok());
        assert!(LinkId::new("Promo-2024_v1.2~x").is_ok());
        assert!(LinkId::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn empty_id() {
        assert!(LinkId::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(LinkId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(LinkId::new("abc def").is_err());
        assert!(LinkId::new("abc/def").is_err());
        assert!(LinkId::new("abc?x=1").is_err());
    }

    #[test]
    fn display_matches_input() {
        let id = LinkId::new("promo").unwrap();
        assert_eq!(id.to_string(), "promo");
        assert_eq!(id.as_str(), "promo");
    }
}
