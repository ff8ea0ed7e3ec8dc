use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Namespace that holds entries migrated from a legacy flat document.
///
/// No credential can ever be registered under this name; it is a
/// permanent bucket for pre-migration links, not a real user.
pub const LEGACY_NAMESPACE: &str = "global";

/// A normalized username.
///
/// Usernames are not case-sensitive: input is trimmed and lower-cased
/// on construction, so `"Bob "` and `"bob"` name the same account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Normalizes and validates a raw username.
    ///
    /// Returns an error if the name is empty after trimming.
    pub fn new(raw: &str) -> std::result::Result<Self, CoreError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::InvalidUsername(
                "username cannot be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name is the reserved legacy-migration namespace.
    pub fn is_reserved(&self) -> bool {
        self.0 == LEGACY_NAMESPACE
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
