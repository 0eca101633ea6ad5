//! Course tree types.
//!
//! This module provides the types a course is made of:
//! - [`CourseItem`]: A node of the course tree, either a folder or a lesson
//! - [`Folder`]: A module of the course, holding ordered children
//! - [`Lesson`]: A playable/displayable file
//! - [`CourseMetadata`]: The course name and the modification stamp of its root folder
//! - [`CachedSnapshot`]: A locally stored `{tree, metadata}` pair

use serde::{Deserialize, Serialize};

/// Mime type Google Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Base of the embeddable preview URL of a Drive file.
pub const PREVIEW_URL_BASE: &str = "https://drive.google.com/file/d";

/// Returns the embeddable preview URL for a Drive file id.
pub fn lesson_url(file_id: &str) -> String {
    format!("{}/{}/preview", PREVIEW_URL_BASE, file_id)
}

/// A node of the course tree.
///
/// Serialized with a `type` tag (`"folder"` or `"file"`), which is the wire
/// format shared by the API and the local snapshot cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CourseItem {
    /// A module: a folder whose children keep the remote listing order.
    Folder(Folder),
    /// A lesson: any non-folder file.
    File(Lesson),
}

/// A course module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<CourseItem>,
}

/// A course lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub url: String,
}

impl CourseItem {
    /// Creates a folder item.
    pub fn folder(id: impl Into<String>, name: impl Into<String>, children: Vec<CourseItem>) -> Self {
        Self::Folder(Folder {
            id: id.into(),
            name: name.into(),
            children,
        })
    }

    /// Creates a lesson item whose URL is derived from its id.
    pub fn file(id: impl Into<String>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let id = id.into();
        let url = lesson_url(&id);
        Self::File(Lesson {
            id,
            name: name.into(),
            mime_type: mime_type.into(),
            url,
        })
    }

    /// Creates a lesson item with an explicit URL.
    pub fn file_with_url(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::File(Lesson {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            url: url.into(),
        })
    }

    /// Returns the item id.
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.id,
            Self::File(lesson) => &lesson.id,
        }
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(lesson) => &lesson.name,
        }
    }

    /// Returns true if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Returns the lesson if this is a file item.
    pub fn as_lesson(&self) -> Option<&Lesson> {
        match self {
            Self::File(lesson) => Some(lesson),
            Self::Folder(_) => None,
        }
    }

    /// Returns the children of a folder, or an empty slice for a lesson.
    pub fn children(&self) -> &[CourseItem] {
        match self {
            Self::Folder(folder) => &folder.children,
            Self::File(_) => &[],
        }
    }
}

/// How a lesson should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    /// Embedded in a player frame.
    Video,
    /// Shown as a document preview.
    Document,
}

impl LessonKind {
    /// Classifies a mime type.
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Document
        }
    }

    /// Returns a short label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

impl Lesson {
    /// Returns how this lesson should be presented.
    pub fn kind(&self) -> LessonKind {
        LessonKind::from_mime_type(&self.mime_type)
    }
}

/// Course-level metadata taken from the root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMetadata {
    /// Name of the root folder.
    pub course_name: String,
    /// Modification stamp of the root folder, compared verbatim.
    pub modified_time: String,
}

impl CourseMetadata {
    /// Creates course metadata.
    pub fn new(course_name: impl Into<String>, modified_time: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            modified_time: modified_time.into(),
        }
    }
}

/// A cached course, stored per course identifier and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub data: Vec<CourseItem>,
    pub metadata: CourseMetadata,
}

impl CachedSnapshot {
    /// Creates a snapshot.
    pub fn new(data: Vec<CourseItem>, metadata: CourseMetadata) -> Self {
        Self { data, metadata }
    }
}
