//! Files Manager Server - Entry Point
//!
//! A small HTTP server for managing files and directories under a single
//! storage root.

use log::{error, info};

use files_manager::Server;
use files_manager::config::ServerConfig;
use files_manager::storage::locate_storage_root;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching files manager server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // No usable storage root means the server must not start serving
    let storage_root = match locate_storage_root(config.storage_root.as_deref()) {
        Ok(root) => root,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config, storage_root).await;
    server.start().await;
}
