//! Queries over a course tree.
//!
//! All traversals are depth-first and pre-order, keep sibling order, and use
//! an explicit stack so folder depth never translates into call-stack depth.
//! Every function here is total and pure.

use std::slice;

use crate::course::{CourseItem, Lesson};

/// Pre-order walk over a course tree, yielding each item with its depth.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<slice::Iter<'a, CourseItem>>,
}

impl<'a> Walk<'a> {
    /// Starts a walk over the given top-level items.
    pub fn new(items: &'a [CourseItem]) -> Self {
        Self {
            stack: vec![items.iter()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CourseItem);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            match self.stack[depth].next() {
                Some(item) => {
                    if let CourseItem::Folder(folder) = item {
                        self.stack.push(folder.children.iter());
                    }
                    return Some((depth, item));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Returns a pre-order walk over `tree`.
pub fn walk(tree: &[CourseItem]) -> Walk<'_> {
    Walk::new(tree)
}

/// Returns the first lesson in traversal order.
pub fn find_first_lesson(tree: &[CourseItem]) -> Option<&Lesson> {
    walk(tree).find_map(|(_, item)| item.as_lesson())
}

/// Returns the first lesson whose id matches. Folders never match.
pub fn find_lesson_by_id<'a>(tree: &'a [CourseItem], id: &str) -> Option<&'a Lesson> {
    walk(tree)
        .filter_map(|(_, item)| item.as_lesson())
        .find(|lesson| lesson.id == id)
}

/// Returns every lesson in traversal order; folders are dropped and their
/// children spliced in place.
///
/// This order is the one "next lesson" follows.
pub fn flatten(tree: &[CourseItem]) -> Vec<&Lesson> {
    walk(tree).filter_map(|(_, item)| item.as_lesson()).collect()
}

/// Returns the ids of the folders enclosing `target_id`, root first.
///
/// The target itself is not included. The result is empty when the target
/// is missing or sits at the top level.
pub fn find_ancestor_chain(tree: &[CourseItem], target_id: &str) -> Vec<String> {
    let mut path: Vec<&str> = Vec::new();

    for (depth, item) in walk(tree) {
        path.truncate(depth);
        if item.id() == target_id {
            return path.into_iter().map(String::from).collect();
        }
        if item.is_folder() {
            path.push(item.id());
        }
    }

    Vec::new()
}

/// Result of asking for the lesson after the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLesson<'a> {
    /// The lesson that follows in traversal order.
    Next(&'a Lesson),
    /// The current lesson is the last one, or is not part of the course.
    CourseComplete,
}

/// Returns the lesson following `current_id` in [`flatten`] order.
pub fn next_lesson<'a>(tree: &'a [CourseItem], current_id: &str) -> NextLesson<'a> {
    let lessons = flatten(tree);
    let next = lessons
        .iter()
        .position(|lesson| lesson.id == current_id)
        .and_then(|index| lessons.get(index + 1));

    match next {
        Some(lesson) => NextLesson::Next(lesson),
        None => NextLesson::CourseComplete,
    }
}

/// Returns the number of lessons in the tree.
pub fn lesson_count(tree: &[CourseItem]) -> usize {
    walk(tree).filter(|(_, item)| !item.is_folder()).count()
}
