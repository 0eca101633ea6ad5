//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ClientConfig;
use crate::outline::OutlineOptions;

/// coursedrive - Google Drive folders as courses
#[derive(Debug, Parser)]
#[command(name = "coursedrive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "COURSEDRIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Base URL of the course API
    #[arg(long, env = "COURSEDRIVE_SERVER_URL")]
    pub server_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for cached courses and progress
    #[arg(long, env = "COURSEDRIVE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Maximum name length in outlines (truncated with ellipsis)
    #[arg(long)]
    pub max_name_length: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Applies flag overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.server_url {
            config.client.server_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.client.timeout_secs = timeout;
        }
        if let Some(ref dir) = self.data_dir {
            config.client.data_dir = Some(dir.clone());
        }
    }

    /// Returns outline options from display flags.
    pub fn outline_options(&self, expand_all: bool) -> OutlineOptions {
        let options = OutlineOptions::default().expand_all(expand_all);
        match self.max_name_length {
            Some(max) => options.with_max_name_length(max),
            None => options,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the course API in the foreground
    Serve {
        /// Listen address (overrides `server.listen`)
        #[arg(long)]
        listen: Option<SocketAddr>,
    },

    /// Load a course and print its outline
    Open {
        /// Drive folder URL or id
        course: String,

        /// Expand every folder
        #[arg(long, short)]
        all: bool,
    },

    /// Select a lesson and print its viewer URL
    View {
        /// Drive folder URL or id
        course: String,

        /// Lesson (file) id
        lesson: String,

        /// Open the lesson in the default browser
        #[arg(long)]
        open: bool,

        /// Copy the lesson URL to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Complete the active lesson and move to the next one
    Complete {
        /// Drive folder URL or id
        course: String,
    },

    /// List courses with recorded progress
    Courses,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
