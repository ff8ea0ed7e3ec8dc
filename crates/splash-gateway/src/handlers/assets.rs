use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// `GET /uploads/{*path}` — serves a stored loading image.
pub async fn serve_upload_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.assets.open(&path).await {
        Some(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
