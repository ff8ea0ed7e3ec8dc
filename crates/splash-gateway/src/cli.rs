use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SPLASH_GATEWAY_LISTEN_ADDR";
pub const DATA_DIR_ENV: &str = "SPLASH_DATA_DIR";
pub const UPLOADS_DIR_ENV: &str = "SPLASH_UPLOADS_DIR";
pub const PUBLIC_DIR_ENV: &str = "SPLASH_PUBLIC_DIR";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_UPLOADS_DIR: &str = "data/uploads";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Parser)]
#[command(name = "splash-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Directory holding `links.json` and `users.json`.
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory where uploaded loading images are written.
    #[arg(long, env = UPLOADS_DIR_ENV, default_value = DEFAULT_UPLOADS_DIR)]
    pub uploads_dir: PathBuf,

    /// Static-file root of the previous deployment; image references
    /// without the `/uploads/` prefix resolve under it.
    #[arg(long, env = PUBLIC_DIR_ENV, default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,
}
