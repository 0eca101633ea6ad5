//! FolderSource trait definition.
//!
//! A [`FolderSource`] is the remote collaborator a course is read from: it
//! lists the direct children of a folder and reports a folder's name and
//! modification time. The Drive v3 API is the production implementation.

use std::future::Future;
use std::pin::Pin;

use coursedrive_core::{CourseMetadata, FOLDER_MIME_TYPE};
use serde::Deserialize;

use crate::error::ProviderResult;

/// A direct child of a folder as listed by the source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEntry {
    pub id: String,
    pub name: String,
    /// Discriminates folders from files.
    pub mime_type: String,
}

impl DriveEntry {
    /// Creates an entry with an explicit mime type.
    pub fn new(id: impl Into<String>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Creates a folder entry.
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FOLDER_MIME_TYPE)
    }

    /// Returns true when the entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

/// Name and modification time of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadata {
    pub name: String,
    /// Opaque timestamp, compared verbatim by the cache gate.
    pub modified_time: String,
}

impl FolderMetadata {
    pub fn new(name: impl Into<String>, modified_time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modified_time: modified_time.into(),
        }
    }
}

impl From<FolderMetadata> for CourseMetadata {
    fn from(metadata: FolderMetadata) -> Self {
        CourseMetadata::new(metadata.name, metadata.modified_time)
    }
}

/// A boxed future for async trait methods.
///
/// Keeps [`FolderSource`] object-safe so it can live behind `Arc<dyn _>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote folder listing and metadata.
///
/// # Implementation Notes
///
/// - `list_children` returns the complete listing, following pagination
///   internally, ordered ascending by name.
/// - Errors carry a [`crate::ProviderErrorCode`] so callers can tell a
///   missing folder from a network failure.
pub trait FolderSource: Send + Sync {
    /// Returns the source name (e.g. `"drive"`).
    fn name(&self) -> &str;

    /// Fetches the name and modification time of a folder.
    fn folder_metadata<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<FolderMetadata>>;

    /// Lists the direct children of a folder.
    fn list_children<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<DriveEntry>>>;

    /// Fetches only the folder name.
    fn folder_name<'a>(&'a self, folder_id: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move { Ok(self.folder_metadata(folder_id).await?.name) })
    }

    /// Fetches only the folder modification time.
    fn folder_modified_time<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move { Ok(self.folder_metadata(folder_id).await?.modified_time) })
    }
}
