//! Course tree construction.
//!
//! [`TreeBuilder`] expands a root folder into a nested [`CourseItem`] tree by
//! listing every folder it reaches. The walk keeps an explicit stack of open
//! folders instead of recursing, which is also the path used by the cycle
//! guard and the depth limit.
//!
//! Any listing failure aborts the build: callers get a single
//! `tree_build_failed` error and never a partial tree.

use std::collections::HashSet;
use std::vec;

use coursedrive_core::{CourseItem, CourseMetadata};
use tracing::{debug, error, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{DriveEntry, FolderSource};

/// A folder whose listing is being consumed.
struct OpenFolder {
    id: String,
    name: String,
    pending: vec::IntoIter<DriveEntry>,
    children: Vec<CourseItem>,
}

/// Builds course trees from a [`FolderSource`].
pub struct TreeBuilder<'a, S: ?Sized> {
    source: &'a S,
    max_depth: usize,
}

impl<'a, S: FolderSource + ?Sized> TreeBuilder<'a, S> {
    /// Default folder nesting limit below the root.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many folder levels below the root may be expanded.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builds the tree under `root_id`.
    pub async fn build(&self, root_id: &str) -> ProviderResult<Vec<CourseItem>> {
        self.expand(root_id)
            .await
            .map_err(|e| self.failed(root_id, e))
    }

    /// Builds the tree under `root_id` and fetches the root metadata alongside.
    pub async fn build_course(
        &self,
        root_id: &str,
    ) -> ProviderResult<(Vec<CourseItem>, CourseMetadata)> {
        let (items, metadata) =
            tokio::try_join!(self.expand(root_id), self.source.folder_metadata(root_id))
                .map_err(|e| self.failed(root_id, e))?;

        Ok((items, metadata.into()))
    }

    fn failed(&self, root_id: &str, cause: ProviderError) -> ProviderError {
        error!(
            root_id = %root_id,
            source = self.source.name(),
            error = %cause,
            "Course tree build failed"
        );
        ProviderError::tree_build_failed(root_id, cause)
    }

    async fn expand(&self, root_id: &str) -> ProviderResult<Vec<CourseItem>> {
        let mut seen: HashSet<String> = HashSet::from([root_id.to_string()]);
        let mut stack = vec![self.open(root_id.to_string(), String::new()).await?];
        let mut folders = 0usize;

        loop {
            let depth = stack.len();
            let Some(top) = stack.last_mut() else {
                return Err(ProviderError::internal("tree builder stack underflow"));
            };

            match top.pending.next() {
                Some(entry) if entry.is_folder() => {
                    if stack.iter().any(|open| open.id == entry.id) {
                        warn!(folder_id = %entry.id, name = %entry.name, "Skipping folder cycle");
                        continue;
                    }
                    if !seen.insert(entry.id.clone()) {
                        warn!(folder_id = %entry.id, name = %entry.name, "Skipping folder listed twice");
                        continue;
                    }
                    if depth > self.max_depth {
                        return Err(ProviderError::bad_request(format!(
                            "folder {} exceeds the maximum depth of {}",
                            entry.id, self.max_depth
                        )));
                    }
                    folders += 1;
                    let folder = self.open(entry.id, entry.name).await?;
                    stack.push(folder);
                }
                Some(entry) => {
                    if !seen.insert(entry.id.clone()) {
                        warn!(file_id = %entry.id, name = %entry.name, "Skipping file listed twice");
                        continue;
                    }
                    top.children
                        .push(CourseItem::file(entry.id, entry.name, entry.mime_type));
                }
                None => {
                    let Some(done) = stack.pop() else {
                        return Err(ProviderError::internal("tree builder stack underflow"));
                    };
                    match stack.last_mut() {
                        Some(parent) => parent
                            .children
                            .push(CourseItem::folder(done.id, done.name, done.children)),
                        None => {
                            debug!(root_id = %root_id, folders, "Built course tree");
                            return Ok(done.children);
                        }
                    }
                }
            }
        }
    }

    async fn open(&self, id: String, name: String) -> ProviderResult<OpenFolder> {
        let entries = self.source.list_children(&id).await?;
        Ok(OpenFolder {
            id,
            name,
            pending: entries.into_iter(),
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::memory::MemorySource;
    use std::error::Error;

    fn lesson(id: &str, name: &str) -> DriveEntry {
        DriveEntry::new(id, name, "video/mp4")
    }

    fn course_source() -> MemorySource {
        MemorySource::new()
            .with_folder("root", "Rust Course", "2024-01-01T00:00:00.000Z")
            .with_child("root", DriveEntry::folder("f2", "02 Advanced"))
            .with_child("root", DriveEntry::folder("f1", "01 Intro"))
            .with_child("root", DriveEntry::new("notes", "99 Notes.pdf", "application/pdf"))
            .with_child("f1", lesson("L2", "02 Setup"))
            .with_child("f1", lesson("L1", "01 Welcome"))
            .with_child("f2", DriveEntry::folder("f3", "Deep"))
            .with_child("f3", lesson("L3", "Traits"))
    }

    #[tokio::test]
    async fn builds_nested_tree_in_listing_order() {
        let source = course_source();
        let tree = TreeBuilder::new(&source).build("root").await.unwrap();

        let expected = vec![
            CourseItem::folder(
                "f1",
                "01 Intro",
                vec![
                    CourseItem::file("L1", "01 Welcome", "video/mp4"),
                    CourseItem::file("L2", "02 Setup", "video/mp4"),
                ],
            ),
            CourseItem::folder(
                "f2",
                "02 Advanced",
                vec![CourseItem::folder(
                    "f3",
                    "Deep",
                    vec![CourseItem::file("L3", "Traits", "video/mp4")],
                )],
            ),
            CourseItem::file("notes", "99 Notes.pdf", "application/pdf"),
        ];
        assert_eq!(tree, expected);
        // root, f1, f2, f3
        assert_eq!(source.list_calls(), 4);
    }

    #[tokio::test]
    async fn files_are_not_listed() {
        let source = MemorySource::new()
            .with_folder("root", "Course", "T")
            .with_child("root", lesson("L1", "One"))
            .with_child("root", lesson("L2", "Two"));

        let tree = TreeBuilder::new(&source).build("root").await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn build_course_returns_metadata() {
        let source = course_source();
        let (items, metadata) = TreeBuilder::new(&source).build_course("root").await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(
            metadata,
            CourseMetadata::new("Rust Course", "2024-01-01T00:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn empty_folder_builds_empty_tree() {
        let source = MemorySource::new().with_folder("root", "Empty", "T");
        assert!(TreeBuilder::new(&source).build("root").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn nested_listing_failure_fails_whole_build() {
        let source = course_source().with_failure("f3");
        let err = TreeBuilder::new(&source).build("root").await.unwrap_err();

        assert_eq!(err.code(), ProviderErrorCode::TreeBuildFailed);
        assert_eq!(err.provider(), Some("memory"));
        let cause = err.source().unwrap().to_string();
        assert!(cause.contains("network_error"), "cause: {}", cause);
    }

    #[tokio::test]
    async fn metadata_failure_fails_build_course() {
        let source = MemorySource::new()
            .with_child("root", lesson("L1", "One"));
        let err = TreeBuilder::new(&source).build_course("root").await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::TreeBuildFailed);
    }

    #[tokio::test]
    async fn cycle_is_skipped() {
        let source = MemorySource::new()
            .with_folder("root", "Course", "T")
            .with_child("root", DriveEntry::folder("a", "A"))
            .with_child("a", lesson("L1", "One"))
            .with_child("a", DriveEntry::folder("root", "Back to root"))
            .with_child("a", DriveEntry::folder("a", "Self"));

        let tree = TreeBuilder::new(&source).build("root").await.unwrap();
        assert_eq!(
            tree,
            vec![CourseItem::folder(
                "a",
                "A",
                vec![CourseItem::file("L1", "One", "video/mp4")]
            )]
        );
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn folder_with_two_parents_is_expanded_once() {
        let source = MemorySource::new()
            .with_folder("root", "Course", "T")
            .with_child("root", DriveEntry::folder("a", "A"))
            .with_child("root", DriveEntry::folder("b", "B"))
            .with_child("a", DriveEntry::folder("shared", "Shared"))
            .with_child("b", DriveEntry::folder("shared", "Shared"))
            .with_child("shared", lesson("L1", "One"));

        let tree = TreeBuilder::new(&source).build("root").await.unwrap();
        assert_eq!(coursedrive_core::lesson_count(&tree), 1);
        assert!(tree[1].children().is_empty());
    }

    fn chain(levels: usize) -> MemorySource {
        let mut source = MemorySource::new().with_folder("d0", "Root", "T");
        for level in 1..=levels {
            source = source.with_child(
                format!("d{}", level - 1),
                DriveEntry::folder(format!("d{}", level), format!("Level {}", level)),
            );
        }
        source.with_child(format!("d{}", levels), lesson("L", "Bottom"))
    }

    #[tokio::test]
    async fn depth_limit_allows_exact_depth() {
        let source = chain(3);
        let tree = TreeBuilder::new(&source)
            .with_max_depth(3)
            .build("d0")
            .await
            .unwrap();
        assert_eq!(coursedrive_core::find_ancestor_chain(&tree, "L"), vec!["d1", "d2", "d3"]);
    }

    #[tokio::test]
    async fn depth_limit_exceeded_fails() {
        let source = chain(4);
        let err = TreeBuilder::new(&source)
            .with_max_depth(3)
            .build("d0")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::TreeBuildFailed);
        assert!(err.source().unwrap().to_string().contains("maximum depth of 3"));
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let source: Box<dyn FolderSource> = Box::new(course_source());
        let tree = TreeBuilder::new(source.as_ref()).build("root").await.unwrap();
        assert_eq!(coursedrive_core::flatten(&tree).len(), 4);
    }
}
