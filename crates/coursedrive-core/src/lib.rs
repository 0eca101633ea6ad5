//! Core types: course tree, tree queries, progress store, cache gate

pub mod cache;
pub mod course;
pub mod error;
pub mod folder_ref;
pub mod progress;
pub mod store;
pub mod tracing;
pub mod tree;

pub use cache::{GateDecision, RefetchReason, SnapshotCache, evaluate, snapshot_key};
pub use course::{
    CachedSnapshot, CourseItem, CourseMetadata, FOLDER_MIME_TYPE, Folder, Lesson, LessonKind,
    lesson_url,
};
pub use error::{FolderRefError, StoreError, StoreResult};
pub use folder_ref::parse_folder_ref;
pub use progress::{COMPLETED_KEY, LAST_VIEWED_KEY, Progress, ProgressStore};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, read_json, write_json};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use tree::{
    NextLesson, Walk, find_ancestor_chain, find_first_lesson, find_lesson_by_id, flatten,
    lesson_count, next_lesson, walk,
};
