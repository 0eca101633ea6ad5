//! Course commands: open, view, complete, courses.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use coursedrive_core::{JsonFileStore, parse_folder_ref};

use crate::actions;
use crate::api::HttpCourseApi;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::outline::{OutlineOptions, render_outline};
use crate::session::{Advance, CourseLoader, CourseSession};

/// Printed once the last lesson of a course is completed.
pub const COURSE_COMPLETE_MESSAGE: &str = "You've completed all lessons in this course!";

/// Builds a loader talking to the configured server and data directory.
pub fn build_loader(config: &ClientConfig) -> ClientResult<CourseLoader> {
    let api = HttpCourseApi::new(&config.client.server_url, config.client.timeout())?;
    let data_dir = config.client.data_dir();
    let store = JsonFileStore::open(&data_dir)?;
    debug!(
        server_url = %api.base_url(),
        data_dir = %data_dir.display(),
        "Course loader ready"
    );
    Ok(CourseLoader::new(Arc::new(api), Arc::new(store)))
}

async fn load_session(loader: &CourseLoader, course: &str) -> ClientResult<CourseSession> {
    let course_id = parse_folder_ref(course)?;
    loader.load(&course_id).await?.into_session()
}

/// Loads a course and prints its outline.
pub async fn open(loader: &CourseLoader, course: &str, options: &OutlineOptions) -> ClientResult<()> {
    let session = load_session(loader, course).await?;
    println!("{}", render_outline(&session, options));

    if let Some(lesson) = session.active_lesson() {
        println!();
        println!("Current lesson: {}", lesson.name);
        println!("  {}", lesson.url);
    }
    Ok(())
}

/// Selects a lesson and prints its viewer URL.
pub async fn view(
    loader: &CourseLoader,
    course: &str,
    lesson_id: &str,
    open_url: bool,
    copy_url: bool,
) -> ClientResult<()> {
    let mut session = load_session(loader, course).await?;
    let lesson = session.select_lesson(lesson_id)?;
    println!("{}", lesson.url);

    if open_url {
        actions::open_lesson(&lesson)?;
    }
    if copy_url {
        actions::copy_lesson_url(&lesson)?;
    }
    Ok(())
}

/// Completes the active lesson and prints where the course goes next.
pub async fn complete(loader: &CourseLoader, course: &str) -> ClientResult<()> {
    let mut session = load_session(loader, course).await?;
    let finished = session.active_lesson().map(|lesson| lesson.name.clone());
    let advance = session.complete_and_continue()?;

    if let Some(name) = finished {
        info!(course_id = %session.course_id(), lesson = %name, "Lesson completed");
        println!("Completed: {}", name);
    }
    println!("{}", describe_advance(&advance));
    Ok(())
}

fn describe_advance(advance: &Advance) -> String {
    match advance {
        Advance::Next(lesson) => format!("Next lesson: {}\n  {}", lesson.name, lesson.url),
        Advance::CourseComplete => COURSE_COMPLETE_MESSAGE.to_string(),
    }
}

/// A course with recorded progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    pub id: String,
    pub name: String,
}

/// Lists known courses, looking up their names concurrently.
///
/// A failed lookup does not fail the listing; the course is shown with a
/// placeholder name instead.
pub async fn list_courses(loader: &CourseLoader) -> ClientResult<Vec<CourseEntry>> {
    let ids = loader.progress().known_courses()?;
    let lookups = join_all(ids.iter().map(|id| loader.api().folder_name(id))).await;

    Ok(ids
        .into_iter()
        .zip(lookups)
        .map(|(id, lookup)| {
            let name = match lookup {
                Ok(folder) => folder.name,
                Err(e) => {
                    debug!(course_id = %id, error = %e, "Course name lookup failed");
                    placeholder_name(&id)
                }
            };
            CourseEntry { id, name }
        })
        .collect())
}

fn placeholder_name(course_id: &str) -> String {
    format!("Course (ID: {})", course_id)
}

/// Prints known courses.
pub async fn courses(loader: &CourseLoader) -> ClientResult<()> {
    let entries = list_courses(loader).await?;
    if entries.is_empty() {
        println!("No courses yet. Open one with `coursedrive open <folder-url>`.");
        return Ok(());
    }

    for entry in entries {
        println!("{}  {}", entry.id, entry.name);
    }
    Ok(())
}
