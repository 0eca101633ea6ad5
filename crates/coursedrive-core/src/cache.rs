//! Local course snapshots and the freshness gate in front of them.
//!
//! A snapshot is reused only when its stored `modifiedTime` equals the one
//! just fetched for the root folder. Every other case, including a failed
//! timestamp fetch, leads to a full refetch that replaces the snapshot.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::course::CachedSnapshot;
use crate::error::StoreResult;
use crate::store::{KeyValueStore, read_json, write_json};

/// Returns the store key of a course snapshot.
pub fn snapshot_key(course_id: &str) -> String {
    format!("course-cache-{}", course_id)
}

/// Why a snapshot cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchReason {
    /// No snapshot is stored, or the stored one is unreadable.
    Absent,
    /// The folder changed since the snapshot was taken.
    Modified,
    /// The current modification time could not be fetched.
    TimestampUnavailable,
}

impl RefetchReason {
    /// Returns a short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Modified => "modified",
            Self::TimestampUnavailable => "timestamp_unavailable",
        }
    }
}

impl fmt::Display for RefetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the freshness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The snapshot is current; use it as-is.
    Fresh(CachedSnapshot),
    /// Fetch the whole tree again and overwrite the snapshot.
    Refetch(RefetchReason),
}

impl GateDecision {
    /// Returns true for [`GateDecision::Fresh`].
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

/// Decides between reusing `cached` and refetching.
///
/// `latest_modified_time` is `None` when the authoritative timestamp could
/// not be fetched; that never yields a stale hit.
pub fn evaluate(cached: Option<CachedSnapshot>, latest_modified_time: Option<&str>) -> GateDecision {
    let Some(snapshot) = cached else {
        return GateDecision::Refetch(RefetchReason::Absent);
    };
    let Some(latest) = latest_modified_time else {
        return GateDecision::Refetch(RefetchReason::TimestampUnavailable);
    };

    if snapshot.metadata.modified_time == latest {
        GateDecision::Fresh(snapshot)
    } else {
        GateDecision::Refetch(RefetchReason::Modified)
    }
}

/// Snapshot storage keyed by course id.
#[derive(Clone)]
pub struct SnapshotCache {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCache").finish_non_exhaustive()
    }
}

impl SnapshotCache {
    /// Creates a snapshot cache.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the snapshot of `course_id`. Unreadable snapshots load as `None`.
    pub fn load(&self, course_id: &str) -> StoreResult<Option<CachedSnapshot>> {
        let snapshot = read_json(&*self.store, &snapshot_key(course_id))?;
        debug!(course_id = %course_id, hit = snapshot.is_some(), "Loaded course snapshot");
        Ok(snapshot)
    }

    /// Replaces the snapshot of `course_id`.
    pub fn save(&self, course_id: &str, snapshot: &CachedSnapshot) -> StoreResult<()> {
        write_json(&*self.store, &snapshot_key(course_id), snapshot)?;
        info!(
            course_id = %course_id,
            modified_time = %snapshot.metadata.modified_time,
            "Stored course snapshot"
        );
        Ok(())
    }

    /// Removes the snapshot of `course_id`.
    pub fn invalidate(&self, course_id: &str) -> StoreResult<()> {
        self.store.remove(&snapshot_key(course_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseItem, CourseMetadata};
    use crate::store::MemoryStore;

    fn snapshot(modified: &str) -> CachedSnapshot {
        CachedSnapshot::new(
            vec![CourseItem::file("L1", "Welcome", "video/mp4")],
            CourseMetadata::new("Course", modified),
        )
    }

    #[test]
    fn fresh_when_timestamps_match() {
        let decision = evaluate(Some(snapshot("X")), Some("X"));
        assert_eq!(decision, GateDecision::Fresh(snapshot("X")));
        assert!(decision.is_fresh());
    }

    #[test]
    fn refetch_when_timestamps_differ() {
        assert_eq!(
            evaluate(Some(snapshot("X")), Some("Y")),
            GateDecision::Refetch(RefetchReason::Modified)
        );
    }

    #[test]
    fn refetch_when_absent() {
        assert_eq!(evaluate(None, Some("X")), GateDecision::Refetch(RefetchReason::Absent));
        assert_eq!(evaluate(None, None), GateDecision::Refetch(RefetchReason::Absent));
    }

    #[test]
    fn refetch_when_timestamp_unavailable() {
        let decision = evaluate(Some(snapshot("X")), None);
        assert_eq!(decision, GateDecision::Refetch(RefetchReason::TimestampUnavailable));
        assert!(!decision.is_fresh());
    }

    #[test]
    fn snapshot_cache_roundtrip_and_overwrite() {
        let cache = SnapshotCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.load("c1").unwrap().is_none());

        cache.save("c1", &snapshot("X")).unwrap();
        assert_eq!(cache.load("c1").unwrap(), Some(snapshot("X")));

        cache.save("c1", &snapshot("Y")).unwrap();
        assert_eq!(cache.load("c1").unwrap(), Some(snapshot("Y")));

        cache.invalidate("c1").unwrap();
        assert!(cache.load("c1").unwrap().is_none());
    }

    #[test]
    fn malformed_snapshot_is_absent() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(&snapshot_key("c1"), "{\"data\": 3}").unwrap();

        let cache = SnapshotCache::new(backing);
        let loaded = cache.load("c1").unwrap();
        assert!(loaded.is_none());
        assert_eq!(evaluate(loaded, Some("X")), GateDecision::Refetch(RefetchReason::Absent));
    }

    #[test]
    fn snapshot_key_format() {
        assert_eq!(snapshot_key("abc"), "course-cache-abc");
    }
}
