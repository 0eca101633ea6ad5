//! CLI, course loading, progress tracking, outline rendering
//!
//! This crate provides the `coursedrive` command-line interface.

pub mod actions;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod outline;
pub mod secret;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{CourseApi, HttpCourseApi};
pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use outline::{OutlineOptions, render_outline};
pub use session::{Advance, CourseLoader, CourseSession, Generation, LoadOutcome, LoadTicket};
