//! HTTP API serving courses read from a [`coursedrive_providers::FolderSource`].
//!
//! Three read endpoints, each answering with an
//! [`coursedrive_protocol::ApiResponse`] envelope whose `status` is also the
//! HTTP status:
//! - `GET /api/folder_details/{folder_id}`: full tree and metadata
//! - `GET /api/courses/{folder_id}/timestamp`: root modification time
//! - `GET /api/courses/{folder_id}/metadata`: root folder name
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use coursedrive_providers::MemorySource;
//! use coursedrive_server::{HttpServer, ServerConfig, SignalHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener();
//!
//!     let server = HttpServer::bind(&ServerConfig::default(), Arc::new(MemorySource::new())).await?;
//!     server.run(signals.shutdown()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod handler;
mod http;
mod signals;

pub use config::{DEFAULT_LISTEN_ADDR, ServerConfig, default_listen_addr};
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, Envelope};
pub use http::{HttpServer, router};
pub use signals::{ShutdownSignal, SignalHandler};
