use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced while constructing core types.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid link id: {0}")]
    InvalidLinkId(String),
    #[error("invalid username: {0}")]
    InvalidUsername(String),
}

/// Errors surfaced by the link and credential stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("link id already exists: {0}")]
    DuplicateId(String),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("link is owned by another user: {0}")]
    Forbidden(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("username already exists: {0}")]
    UsernameTaken(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Operation(value.to_string())
    }
}

impl From<CoreError> for StoreError {
    fn from(value: CoreError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
