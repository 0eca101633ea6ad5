//! Lesson actions: open in the browser, copy to the clipboard.

use tracing::info;

use coursedrive_core::Lesson;

use crate::error::{ClientError, ClientResult};

/// Opens the lesson viewer URL in the default browser.
pub fn open_lesson(lesson: &Lesson) -> ClientResult<()> {
    info!(lesson_id = %lesson.id, url = %lesson.url, "opening lesson");
    open::that(&lesson.url)
        .map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))
}

/// Copies the lesson viewer URL to the clipboard.
pub fn copy_lesson_url(lesson: &Lesson) -> ClientResult<()> {
    info!(lesson_id = %lesson.id, url = %lesson.url, "copying lesson URL to clipboard");

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(&lesson.url)
        .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))
}
