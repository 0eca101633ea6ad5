//! Folder sources and course tree construction.
//!
//! - [`FolderSource`] - listing and metadata of remote folders
//! - [`drive::DriveClient`] - the Google Drive v3 implementation
//! - [`TreeBuilder`] - expands a root folder into a [`coursedrive_core::CourseItem`] tree
//! - [`ProviderError`] - classified failures
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  Drive v3 API   │    │  MemorySource   │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      │
//! ┌─────────────────┐             │
//! │   DriveClient   │             │
//! └────────┬────────┘             │
//!          │     FolderSource     │
//!          └──────────┬───────────┘
//!                     ▼
//!              ┌─────────────┐
//!              │ TreeBuilder │
//!              └──────┬──────┘
//!                     ▼
//!            Vec<CourseItem> + CourseMetadata
//! ```

pub mod builder;
#[cfg(feature = "drive")]
pub mod drive;
pub mod error;
pub mod memory;
pub mod provider;

pub use builder::TreeBuilder;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use memory::MemorySource;
pub use provider::{BoxFuture, DriveEntry, FolderMetadata, FolderSource};
