use splash_core::{CredentialRepository, LinkRepository};
use splash_store::AssetStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub links: Arc<dyn LinkRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub assets: Arc<AssetStore>,
}

impl AppState {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        credentials: Arc<dyn CredentialRepository>,
        assets: Arc<AssetStore>,
    ) -> Self {
        Self {
            links,
            credentials,
            assets,
        }
    }
}
