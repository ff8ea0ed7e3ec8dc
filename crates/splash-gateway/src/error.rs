use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use splash_core::{CoreError, StoreError};
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Gateway-level error, rendered as `{"error": "<message>"}` with the
/// matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// An error surfaced by one of the stores.
    Store(StoreError),
    /// No usable session cookie on a request that needs one.
    Unauthorized,
    /// The request body or form did not have the expected shape.
    InvalidForm(String),
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        Self::InvalidForm(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::InvalidForm(message) => (StatusCode::BAD_REQUEST, message),
            Self::Store(err) => match err {
                StoreError::DuplicateId(_) => {
                    (StatusCode::BAD_REQUEST, "ID already exists".to_string())
                }
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found".to_string()),
                StoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
                StoreError::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
                }
                StoreError::UsernameTaken(_) => {
                    (StatusCode::BAD_REQUEST, "Username already exists".to_string())
                }
                StoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "Invalid username or password".to_string(),
                ),
                StoreError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
                StoreError::Operation(message) => {
                    error!(error = %message, "store operation failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
