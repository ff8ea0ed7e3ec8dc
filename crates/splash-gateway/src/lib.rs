//! HTTP gateway for the Splash redirect service.
//!
//! Translates the HTTP surface (JSON auth endpoints, a multipart
//! create form, the public link resolution endpoint, and stored asset
//! serving) onto the repository traits from `splash-core`. Sessions
//! are a bare `username` cookie set on login and registration.

pub mod app;
pub mod auth;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::ApiError;
pub use state::AppState;
