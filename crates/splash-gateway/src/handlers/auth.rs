use crate::auth::{login_cookie, logout_cookie};
use crate::error::{ApiError, Result};
use crate::model::{CredentialsRequest, SuccessResponse};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use splash_core::Username;
use tracing::info;

/// `POST /api/register` — create an account and log it in.
///
/// Also makes sure the link document has a namespace for the new user,
/// which migrates a legacy flat document on the first registration.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Response> {
    if request.password.is_empty() {
        return Err(ApiError::InvalidForm("Invalid request".to_string()));
    }
    let username = Username::new(&request.username)?;

    state
        .credentials
        .register(&username, &request.password)
        .await?;
    state.links.ensure_namespace(&username).await?;

    info!(user = %username, "registered new account");
    Ok(session_response(&username))
}

/// `POST /api/login` — verify credentials and set the session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Response> {
    if request.password.is_empty() {
        return Err(ApiError::InvalidForm("Invalid request".to_string()));
    }
    let username = Username::new(&request.username)?;

    state
        .credentials
        .authenticate(&username, &request.password)
        .await?;

    Ok(session_response(&username))
}

/// `POST /api/logout` — clear the session cookie.
pub async fn logout_handler() -> Response {
    (
        [(header::SET_COOKIE, logout_cookie())],
        Json(SuccessResponse::ok()),
    )
        .into_response()
}

fn session_response(username: &Username) -> Response {
    (
        [(header::SET_COOKIE, login_cookie(username))],
        Json(SuccessResponse::ok()),
    )
        .into_response()
}
