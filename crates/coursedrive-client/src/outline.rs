//! Text outline of a course.
//!
//! Folders on the path to the active lesson are expanded; every other folder
//! is shown collapsed with its lesson count. The active lesson is marked
//! with `▶` and completed lessons with `✓`.

use std::borrow::Cow;
use std::collections::HashSet;

use coursedrive_core::{CourseItem, lesson_count, walk};

use crate::session::CourseSession;

/// Options for [`render_outline`].
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Expand every folder instead of only the active lesson's ancestors.
    pub expand_all: bool,
    /// Maximum length for item names (truncated with ellipsis).
    pub max_name_length: Option<usize>,
}

impl OutlineOptions {
    pub fn expand_all(mut self, expand_all: bool) -> Self {
        self.expand_all = expand_all;
        self
    }

    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = Some(max);
        self
    }
}

/// Renders the course tree of `session` as indented text.
pub fn render_outline(session: &CourseSession, options: &OutlineOptions) -> String {
    let expanded: HashSet<String> = session.expanded_folders().into_iter().collect();
    let mut lines = vec![format!(
        "{} ({}/{} completed)",
        session.course_name(),
        session.completed_count(),
        session.lesson_total()
    )];

    if session.tree().is_empty() {
        lines.push("(no lessons)".to_string());
        return lines.join("\n");
    }

    // Depth of the collapsed folder whose subtree is being skipped.
    let mut collapsed_at: Option<usize> = None;

    for (depth, item) in walk(session.tree()) {
        if let Some(collapsed) = collapsed_at {
            if depth > collapsed {
                continue;
            }
            collapsed_at = None;
        }

        let indent = "  ".repeat(depth);
        match item {
            CourseItem::Folder(folder) => {
                let name = truncate(&folder.name, options.max_name_length);
                if options.expand_all || expanded.contains(&folder.id) {
                    lines.push(format!("{}▾ {}", indent, name));
                } else {
                    collapsed_at = Some(depth);
                    let count = lesson_count(&folder.children);
                    let noun = if count == 1 { "lesson" } else { "lessons" };
                    lines.push(format!("{}▸ {} ({} {})", indent, name, count, noun));
                }
            }
            CourseItem::File(lesson) => {
                let marker = if session.active_lesson_id() == Some(lesson.id.as_str()) {
                    "▶"
                } else if session.is_completed(&lesson.id) {
                    "✓"
                } else {
                    " "
                };
                lines.push(format!(
                    "{}{} {} ({})",
                    indent,
                    marker,
                    truncate(&lesson.name, options.max_name_length),
                    lesson.kind().as_str()
                ));
            }
        }
    }

    lines.join("\n")
}

fn truncate(name: &str, max: Option<usize>) -> Cow<'_, str> {
    match max {
        Some(max) if max > 0 && name.chars().count() > max => {
            let kept: String = name.chars().take(max - 1).collect();
            Cow::Owned(format!("{}…", kept))
        }
        _ => Cow::Borrowed(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use coursedrive_core::{CachedSnapshot, CourseMetadata, MemoryStore, Progress, ProgressStore};

    fn course() -> Vec<CourseItem> {
        vec![
            CourseItem::folder(
                "f1",
                "Intro",
                vec![
                    CourseItem::file("L1", "Welcome", "video/mp4"),
                    CourseItem::file("L2", "Setup", "application/pdf"),
                ],
            ),
            CourseItem::folder(
                "f2",
                "Advanced",
                vec![CourseItem::folder(
                    "f3",
                    "Deep",
                    vec![
                        CourseItem::file("L3", "Ownership", "video/mp4"),
                        CourseItem::file("L4", "Traits", "application/pdf"),
                    ],
                )],
            ),
            CourseItem::file("L5", "Wrap-up", "video/mp4"),
        ]
    }

    fn session(tree: Vec<CourseItem>, last_viewed: Option<&str>, completed: &[&str]) -> CourseSession {
        let progress = Progress {
            last_viewed_lesson_id: last_viewed.map(String::from),
            completed_lesson_ids: completed.iter().map(|id| id.to_string()).collect(),
        };
        let snapshot = CachedSnapshot::new(tree, CourseMetadata::new("Rust", "T1"));
        CourseSession::new(
            "c1",
            snapshot,
            progress,
            ProgressStore::new(Arc::new(MemoryStore::new())),
        )
    }

    #[test]
    fn collapses_folders_off_the_active_path() {
        let session = session(course(), Some("L2"), &["L1"]);
        let output = render_outline(&session, &OutlineOptions::default());

        insta::assert_snapshot!(output, @r"
        Rust (1/5 completed)
        ▾ Intro
          ✓ Welcome (video)
          ▶ Setup (document)
        ▸ Advanced (2 lessons)
          Wrap-up (video)
        ");
    }

    #[test]
    fn expands_nested_ancestors_of_active_lesson() {
        let session = session(course(), Some("L4"), &[]);
        let output = render_outline(&session, &OutlineOptions::default());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "▸ Intro (2 lessons)");
        assert_eq!(lines[2], "▾ Advanced");
        assert_eq!(lines[3], "  ▾ Deep");
        assert_eq!(lines[5], "    ▶ Traits (document)");
    }

    #[test]
    fn expand_all_shows_every_lesson() {
        let session = session(course(), Some("L1"), &["L1", "L3"]);
        let output = render_outline(&session, &OutlineOptions::default().expand_all(true));

        insta::assert_snapshot!(output, @r"
        Rust (2/5 completed)
        ▾ Intro
          ▶ Welcome (video)
            Setup (document)
        ▾ Advanced
          ▾ Deep
            ✓ Ownership (video)
              Traits (document)
          Wrap-up (video)
        ");
    }

    #[test]
    fn empty_course() {
        let session = session(Vec::new(), None, &[]);
        assert_eq!(
            render_outline(&session, &OutlineOptions::default()),
            "Rust (0/0 completed)\n(no lessons)"
        );
    }

    #[test]
    fn single_lesson_folder_count_is_singular() {
        let tree = vec![
            CourseItem::file("L0", "Start", "video/mp4"),
            CourseItem::folder("f1", "Extra", vec![CourseItem::file("L1", "Bonus", "video/mp4")]),
        ];
        let output = render_outline(&session(tree, None, &[]), &OutlineOptions::default());
        assert!(output.ends_with("▸ Extra (1 lesson)"));
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("Introduction", Some(6)), "Intro…");
        assert_eq!(truncate("Intro", Some(6)), "Intro");
        assert_eq!(truncate("Introduction", None), "Introduction");
    }
}
