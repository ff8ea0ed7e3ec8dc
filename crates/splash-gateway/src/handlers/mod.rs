mod assets;
mod auth;
mod health;
mod links;

pub use assets::serve_upload_handler;
pub use auth::{login_handler, logout_handler, register_handler};
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, get_link_handler, list_links_handler};
