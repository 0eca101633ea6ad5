//! Serve command: runs the course API in the foreground.
//!
//! Builds the Drive source from config, binds the listener, and serves until
//! SIGTERM or SIGINT.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use coursedrive_providers::FolderSource;
use coursedrive_server::{HttpServer, SignalHandler};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Runs the HTTP API until a shutdown signal arrives.
pub async fn run(config: &ClientConfig, listen: Option<SocketAddr>) -> ClientResult<()> {
    let server_config = config.server_config(listen).map_err(ClientError::Config)?;
    let source = build_source(config)?;
    info!(
        source = source.name(),
        max_depth = server_config.max_depth,
        "Folder source ready"
    );

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();

    let server = HttpServer::bind(&server_config, source).await?;
    let addr = server.local_addr()?;
    println!("Serving courses on http://{}", addr);

    server.run(signal_handler.shutdown()).await?;
    info!("Server stopped");
    Ok(())
}

#[cfg(feature = "drive")]
fn build_source(config: &ClientConfig) -> ClientResult<Arc<dyn FolderSource>> {
    use coursedrive_providers::drive::DriveClient;

    let drive_config = config
        .drive
        .to_provider_config()
        .map_err(|e| ClientError::Config(format!("invalid Drive configuration: {}", e)))?;
    let client = DriveClient::new(drive_config)?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "drive"))]
fn build_source(_config: &ClientConfig) -> ClientResult<Arc<dyn FolderSource>> {
    Err(ClientError::Config(
        "coursedrive was built without Drive support; rebuild with the `drive` feature".into(),
    ))
}
