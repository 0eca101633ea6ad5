//! Test doubles shared by the client tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use coursedrive_core::{CourseItem, CourseMetadata};
use coursedrive_protocol::{CourseDetails, FolderName, FolderTimestamp};
use coursedrive_providers::BoxFuture;
use tokio::sync::Notify;

use crate::api::CourseApi;
use crate::error::{ClientError, ClientResult};

/// In-memory course API that counts calls.
#[derive(Default)]
pub struct FakeApi {
    courses: Mutex<HashMap<String, CourseDetails>>,
    timestamp_fails: bool,
    details_calls: AtomicUsize,
    timestamp_calls: AtomicUsize,
    /// Holds `course_details` of one course until notified.
    hold: Option<(String, Arc<Notify>)>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course named `Course <id>`.
    pub fn with_course(self, id: &str, items: Vec<CourseItem>, modified: &str) -> Self {
        self.set_course(id, items, modified);
        self
    }

    pub fn failing_timestamps(mut self) -> Self {
        self.timestamp_fails = true;
        self
    }

    pub fn holding(mut self, id: &str, notify: Arc<Notify>) -> Self {
        self.hold = Some((id.to_string(), notify));
        self
    }

    pub fn set_course(&self, id: &str, items: Vec<CourseItem>, modified: &str) {
        let metadata = CourseMetadata::new(format!("Course {}", id), modified);
        self.courses
            .lock()
            .unwrap()
            .insert(id.to_string(), CourseDetails::new(items, metadata));
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn timestamp_calls(&self) -> usize {
        self.timestamp_calls.load(Ordering::SeqCst)
    }

    fn find(&self, id: &str, message: &str) -> ClientResult<CourseDetails> {
        self.courses
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 500,
                message: message.to_string(),
            })
    }
}

impl CourseApi for FakeApi {
    fn course_details<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<CourseDetails>> {
        Box::pin(async move {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            if let Some((held, notify)) = &self.hold {
                if held == course_id {
                    notify.notified().await;
                }
            }
            self.find(course_id, "Failed to retrieve course data.")
        })
    }

    fn folder_timestamp<'a>(
        &'a self,
        course_id: &'a str,
    ) -> BoxFuture<'a, ClientResult<FolderTimestamp>> {
        Box::pin(async move {
            self.timestamp_calls.fetch_add(1, Ordering::SeqCst);
            if self.timestamp_fails {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Failed to fetch folder timestamp".into(),
                });
            }
            let details = self.find(course_id, "Failed to fetch folder timestamp")?;
            Ok(FolderTimestamp {
                modified_time: details.metadata.modified_time,
            })
        })
    }

    fn folder_name<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<FolderName>> {
        Box::pin(async move {
            let details = self.find(course_id, "Failed to fetch metadata")?;
            Ok(FolderName {
                name: details.metadata.course_name,
            })
        })
    }
}

/// A folder `f1` "Intro" holding `L1` (video, url `u1`) and `L2` (pdf, url `u2`).
pub fn intro_tree() -> Vec<CourseItem> {
    vec![CourseItem::folder(
        "f1",
        "Intro",
        vec![
            CourseItem::file_with_url("L1", "Welcome", "video/mp4", "u1"),
            CourseItem::file_with_url("L2", "Setup", "application/pdf", "u2"),
        ],
    )]
}
