//! Router assembly and the listening server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use coursedrive_protocol::routes;
use coursedrive_providers::FolderSource;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{self, AppState};
use crate::signals::ShutdownSignal;

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::COURSE_DETAILS, get(handler::course_details))
        .route(routes::TIMESTAMP, get(handler::folder_timestamp))
        .route(routes::METADATA, get(handler::folder_metadata))
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A bound HTTP server.
pub struct HttpServer {
    listener: TcpListener,
    app: Router,
}

impl HttpServer {
    /// Binds the listen address of `config`.
    pub async fn bind(config: &ServerConfig, source: Arc<dyn FolderSource>) -> ServerResult<Self> {
        config.validate()?;
        let listener = TcpListener::bind(config.listen_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.listen_addr,
                source,
            })?;

        let app = router(AppState::new(source, config));
        Ok(Self { listener, app })
    }

    /// Returns the bound address (useful with port 0).
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` resolves.
    pub async fn run(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr = self.local_addr()?;
        info!(addr = %addr, "Course API listening");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        info!("Course API stopped");
        Ok(())
    }
}
