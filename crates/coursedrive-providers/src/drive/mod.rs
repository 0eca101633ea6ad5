//! Google Drive v3 folder source.
//!
//! Reads publicly shared folders with an API key; no OAuth flow is involved.
//!
//! # Example
//!
//! ```ignore
//! use coursedrive_providers::drive::{DriveClient, DriveConfig};
//! use coursedrive_providers::{FolderSource, TreeBuilder};
//!
//! let client = DriveClient::new(DriveConfig::new("AIza..."))?;
//! let (items, metadata) = TreeBuilder::new(&client).build_course("1AbC").await?;
//! ```

mod client;
mod config;

pub use client::DriveClient;
pub use config::DriveConfig;
