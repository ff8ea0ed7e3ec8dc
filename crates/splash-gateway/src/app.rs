use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler, list_links_handler,
    login_handler, logout_handler, register_handler, serve_upload_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/register", post(register_handler))
                    .route("/login", post(login_handler))
                    .route("/logout", post(logout_handler))
                    .route("/create", post(create_link_handler))
                    .route("/links", get(list_links_handler))
                    .route("/link/{id}", get(get_link_handler))
                    .route("/delete/{id}", delete(delete_link_handler)),
            )
            .route("/uploads/{*path}", get(serve_upload_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
