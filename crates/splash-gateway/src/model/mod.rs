mod auth;
mod health;
mod link;

pub use auth::{CredentialsRequest, SuccessResponse};
pub use health::HealthResponse;
pub use link::CreateLinkResponse;
