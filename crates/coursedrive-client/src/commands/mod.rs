//! Subcommand implementations.

pub mod config;
pub mod course;
pub mod server;
