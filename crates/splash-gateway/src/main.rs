use clap::Parser;
use splash_gateway::cli::CLI;
use splash_gateway::{App, AppState};
use splash_store::{AssetStore, JsonCredentialStore, JsonLinkStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        uploads_dir = %config.uploads_dir.display(),
        "starting gateway server"
    );

    let assets = Arc::new(AssetStore::new(
        config.uploads_dir.clone(),
        config.public_dir.clone(),
    ));
    let links = Arc::new(JsonLinkStore::new(
        config.data_dir.join("links.json"),
        assets.clone(),
    ));
    let credentials = Arc::new(JsonCredentialStore::new(config.data_dir.join("users.json")));
    let state = AppState::new(links, credentials, assets);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}
