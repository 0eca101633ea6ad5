//! In-memory folder source.
//!
//! Serves a fixed folder hierarchy. Used by tests of everything sitting on
//! top of a [`FolderSource`], and counts calls so tests can assert how often
//! the source was hit.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, DriveEntry, FolderMetadata, FolderSource};

/// A [`FolderSource`] backed by maps.
#[derive(Debug, Default)]
pub struct MemorySource {
    metadata: HashMap<String, FolderMetadata>,
    children: HashMap<String, Vec<DriveEntry>>,
    failing: HashSet<String>,
    list_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the name and modification time of a folder.
    pub fn with_folder(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        modified_time: impl Into<String>,
    ) -> Self {
        let id = id.into();
        self.children.entry(id.clone()).or_default();
        self.metadata
            .insert(id, FolderMetadata::new(name, modified_time));
        self
    }

    /// Adds a child to a folder's listing.
    pub fn with_child(mut self, parent: impl Into<String>, entry: DriveEntry) -> Self {
        if entry.is_folder() {
            self.children.entry(entry.id.clone()).or_default();
        }
        self.children.entry(parent.into()).or_default().push(entry);
        self
    }

    /// Makes every call touching `folder_id` fail with a network error.
    pub fn with_failure(mut self, folder_id: impl Into<String>) -> Self {
        self.failing.insert(folder_id.into());
        self
    }

    /// Number of `list_children` calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `folder_metadata` calls so far.
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self, folder_id: &str) -> ProviderResult<()> {
        if self.failing.contains(folder_id) {
            return Err(ProviderError::network(format!("listing {} failed", folder_id))
                .with_provider(self.name()));
        }
        Ok(())
    }
}

impl FolderSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn folder_metadata<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<FolderMetadata>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_failure(folder_id).and_then(|()| {
            self.metadata.get(folder_id).cloned().ok_or_else(|| {
                ProviderError::not_found(format!("folder {} not found", folder_id))
                    .with_provider(self.name())
            })
        });
        Box::pin(async move { result })
    }

    fn list_children<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<DriveEntry>>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check_failure(folder_id).and_then(|()| {
            let mut entries = self.children.get(folder_id).cloned().ok_or_else(|| {
                ProviderError::not_found(format!("folder {} not found", folder_id))
                    .with_provider(self.name())
            })?;
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(entries)
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[tokio::test]
    async fn lists_children_sorted_by_name() {
        let source = MemorySource::new()
            .with_folder("root", "Course", "T1")
            .with_child("root", DriveEntry::new("b", "B lesson", "video/mp4"))
            .with_child("root", DriveEntry::new("a", "A lesson", "video/mp4"));

        let names: Vec<_> = source
            .list_children("root")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["A lesson", "B lesson"]);
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_folder_is_not_found() {
        let source = MemorySource::new();
        let err = source.folder_metadata("nope").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(source.metadata_calls(), 1);
    }

    #[tokio::test]
    async fn failing_folder_reports_network_error() {
        let source = MemorySource::new()
            .with_folder("root", "Course", "T1")
            .with_failure("root");
        let err = source.folder_modified_time("root").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
    }
}
