//! Per-course progress bookkeeping.
//!
//! Progress lives in two independent maps keyed by course id: one holding the
//! last viewed lesson, one holding the completed lessons. Every operation is a
//! read-modify-write of one whole map.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::store::{KeyValueStore, read_json, write_json};

/// Store key of the course id → last viewed lesson id map.
pub const LAST_VIEWED_KEY: &str = "courseProgress";

/// Store key of the course id → completed lesson ids map.
pub const COMPLETED_KEY: &str = "completedProgress";

type LastViewedMap = BTreeMap<String, String>;
type CompletedMap = BTreeMap<String, Vec<String>>;

/// Progress of a single course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Lesson the user last opened.
    pub last_viewed_lesson_id: Option<String>,
    /// Lessons the user completed.
    pub completed_lesson_ids: BTreeSet<String>,
}

impl Progress {
    /// Returns true if the lesson has been completed.
    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.contains(lesson_id)
    }
}

/// Progress store on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore").finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Creates a progress store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Records `lesson_id` as the last viewed lesson of `course_id`.
    pub fn record_last_viewed(&self, course_id: &str, lesson_id: &str) -> StoreResult<()> {
        let mut all = self.last_viewed_map()?;
        all.insert(course_id.to_string(), lesson_id.to_string());
        write_json(&*self.store, LAST_VIEWED_KEY, &all)?;
        debug!(course_id = %course_id, lesson_id = %lesson_id, "Recorded last viewed lesson");
        Ok(())
    }

    /// Adds `lesson_id` to the completed lessons of `course_id`.
    ///
    /// Returns false when the lesson was already completed, in which case
    /// nothing is written.
    pub fn mark_completed(&self, course_id: &str, lesson_id: &str) -> StoreResult<bool> {
        let mut all = self.completed_map()?;
        let completed = all.entry(course_id.to_string()).or_default();
        if completed.iter().any(|id| id == lesson_id) {
            return Ok(false);
        }
        completed.push(lesson_id.to_string());
        write_json(&*self.store, COMPLETED_KEY, &all)?;
        debug!(course_id = %course_id, lesson_id = %lesson_id, "Marked lesson completed");
        Ok(true)
    }

    /// Loads the progress of `course_id`, defaulting missing parts.
    pub fn load_progress(&self, course_id: &str) -> StoreResult<Progress> {
        let last_viewed_lesson_id = self.last_viewed_map()?.remove(course_id);
        let completed_lesson_ids = self
            .completed_map()?
            .remove(course_id)
            .unwrap_or_default()
            .into_iter()
            .collect();

        Ok(Progress {
            last_viewed_lesson_id,
            completed_lesson_ids,
        })
    }

    /// Returns every course id present in either map, sorted.
    pub fn known_courses(&self) -> StoreResult<Vec<String>> {
        let mut ids: BTreeSet<String> = self.last_viewed_map()?.into_keys().collect();
        ids.extend(self.completed_map()?.into_keys());
        Ok(ids.into_iter().collect())
    }

    fn last_viewed_map(&self) -> StoreResult<LastViewedMap> {
        Ok(read_json(&*self.store, LAST_VIEWED_KEY)?.unwrap_or_default())
    }

    fn completed_map(&self) -> StoreResult<CompletedMap> {
        Ok(read_json(&*self.store, COMPLETED_KEY)?.unwrap_or_default())
    }
}
