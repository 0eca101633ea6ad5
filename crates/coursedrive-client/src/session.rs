//! Course loading and lesson navigation.
//!
//! [`CourseLoader::load`] runs one course load:
//!
//! 1. read the local snapshot
//! 2. if there is one, fetch the root folder's current modification time
//! 3. let the cache gate decide: reuse the snapshot, or fetch the whole
//!    course and overwrite the snapshot
//! 4. load progress and pick the active lesson: the last viewed one if it
//!    still exists, the first lesson otherwise
//!
//! Every load takes a [`LoadTicket`]. When another load started after it,
//! the result is dropped and [`LoadOutcome::Superseded`] is returned, so a
//! slow load can never replace the course that was asked for last.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use coursedrive_core::{
    CachedSnapshot, CourseItem, CourseMetadata, GateDecision, KeyValueStore, Lesson, NextLesson,
    Progress, ProgressStore, SnapshotCache, find_ancestor_chain, find_first_lesson,
    find_lesson_by_id, flatten, next_lesson,
};

use crate::api::CourseApi;
use crate::error::{ClientError, ClientResult};

/// Monotonic load counter shared by all loads of a loader.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation; every earlier ticket stops being current.
    pub fn next(&self) -> LoadTicket {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            id,
            current: self.0.clone(),
        }
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Identifies one load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    id: u64,
    current: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns false once a newer load has started.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}

/// Result of [`CourseLoader::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(CourseSession),
    /// A newer load started while this one was in flight.
    Superseded,
}

impl LoadOutcome {
    /// Returns the session, treating a superseded load as an error.
    pub fn into_session(self) -> ClientResult<CourseSession> {
        match self {
            Self::Loaded(session) => Ok(session),
            Self::Superseded => Err(ClientError::Superseded),
        }
    }
}

/// Loads courses through the cache gate.
pub struct CourseLoader {
    api: Arc<dyn CourseApi>,
    cache: SnapshotCache,
    progress: ProgressStore,
    generation: Generation,
}

impl CourseLoader {
    pub fn new(api: Arc<dyn CourseApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            cache: SnapshotCache::new(store.clone()),
            progress: ProgressStore::new(store),
            generation: Generation::new(),
        }
    }

    pub fn api(&self) -> &dyn CourseApi {
        self.api.as_ref()
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Loads `course_id`.
    pub async fn load(&self, course_id: &str) -> ClientResult<LoadOutcome> {
        let ticket = self.generation.next();
        debug!(course_id = %course_id, generation = ticket.id(), "Loading course");

        let snapshot = self.resolve_snapshot(course_id).await;
        if !ticket.is_current() {
            debug!(
                course_id = %course_id,
                generation = ticket.id(),
                "Discarding superseded course load"
            );
            return Ok(LoadOutcome::Superseded);
        }
        let snapshot = snapshot?;

        let progress = self.progress.load_progress(course_id)?;
        let session = CourseSession::new(course_id, snapshot, progress, self.progress.clone());
        if let Some(lesson_id) = session.active_lesson_id() {
            self.progress.record_last_viewed(course_id, lesson_id)?;
        }

        Ok(LoadOutcome::Loaded(session))
    }

    async fn resolve_snapshot(&self, course_id: &str) -> ClientResult<CachedSnapshot> {
        let cached = self.cache.load(course_id)?;

        let latest = match cached {
            Some(_) => match self.api.folder_timestamp(course_id).await {
                Ok(timestamp) => Some(timestamp.modified_time),
                Err(e) => {
                    warn!(course_id = %course_id, error = %e, "Could not check course freshness");
                    None
                }
            },
            None => None,
        };

        match coursedrive_core::evaluate(cached, latest.as_deref()) {
            GateDecision::Fresh(snapshot) => {
                info!(course_id = %course_id, "Using cached course");
                Ok(snapshot)
            }
            GateDecision::Refetch(reason) => {
                info!(course_id = %course_id, reason = %reason, "Fetching course");
                let snapshot: CachedSnapshot = self.api.course_details(course_id).await?.into();
                if let Err(e) = self.cache.save(course_id, &snapshot) {
                    warn!(course_id = %course_id, error = %e, "Failed to store course snapshot");
                }
                Ok(snapshot)
            }
        }
    }
}

/// What happened after completing a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The following lesson is now active.
    Next(Lesson),
    /// The completed lesson was the last one.
    CourseComplete,
}

/// A loaded course with its active lesson and completion state.
#[derive(Debug)]
pub struct CourseSession {
    course_id: String,
    snapshot: CachedSnapshot,
    active: Option<String>,
    completed: BTreeSet<String>,
    progress: ProgressStore,
}

impl CourseSession {
    pub(crate) fn new(
        course_id: &str,
        snapshot: CachedSnapshot,
        progress: Progress,
        store: ProgressStore,
    ) -> Self {
        let tree = &snapshot.data;
        let active = progress
            .last_viewed_lesson_id
            .as_deref()
            .and_then(|id| find_lesson_by_id(tree, id))
            .or_else(|| find_first_lesson(tree))
            .map(|lesson| lesson.id.clone());

        Self {
            course_id: course_id.to_string(),
            snapshot,
            active,
            completed: progress.completed_lesson_ids,
            progress: store,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn course_name(&self) -> &str {
        &self.snapshot.metadata.course_name
    }

    pub fn metadata(&self) -> &CourseMetadata {
        &self.snapshot.metadata
    }

    pub fn tree(&self) -> &[CourseItem] {
        &self.snapshot.data
    }

    pub fn active_lesson_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_lesson(&self) -> Option<&Lesson> {
        self.active
            .as_deref()
            .and_then(|id| find_lesson_by_id(self.tree(), id))
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    /// Number of lessons of the tree that are completed.
    ///
    /// Completed ids of lessons that no longer exist are not counted.
    pub fn completed_count(&self) -> usize {
        flatten(self.tree())
            .into_iter()
            .filter(|lesson| self.is_completed(&lesson.id))
            .count()
    }

    pub fn lesson_total(&self) -> usize {
        flatten(self.tree()).len()
    }

    /// Makes `lesson_id` the active lesson and records it as last viewed.
    pub fn select_lesson(&mut self, lesson_id: &str) -> ClientResult<Lesson> {
        let lesson = find_lesson_by_id(self.tree(), lesson_id)
            .cloned()
            .ok_or_else(|| ClientError::LessonNotFound(lesson_id.to_string()))?;

        self.progress.record_last_viewed(&self.course_id, &lesson.id)?;
        self.active = Some(lesson.id.clone());
        Ok(lesson)
    }

    /// Completes the active lesson and moves to the next one.
    pub fn complete_and_continue(&mut self) -> ClientResult<Advance> {
        let Some(current) = self.active.clone() else {
            return Ok(Advance::CourseComplete);
        };

        self.progress.mark_completed(&self.course_id, &current)?;
        self.completed.insert(current.clone());

        let next = match next_lesson(self.tree(), &current) {
            NextLesson::Next(lesson) => lesson.clone(),
            NextLesson::CourseComplete => {
                info!(course_id = %self.course_id, "Course completed");
                return Ok(Advance::CourseComplete);
            }
        };

        self.progress.record_last_viewed(&self.course_id, &next.id)?;
        self.active = Some(next.id.clone());
        Ok(Advance::Next(next))
    }

    /// Folder ids that must be expanded to show the active lesson.
    pub fn expanded_folders(&self) -> Vec<String> {
        match self.active.as_deref() {
            Some(id) => find_ancestor_chain(self.tree(), id),
            None => Vec::new(),
        }
    }
}
