//! Client error types.

use std::fmt;

use coursedrive_core::{FolderRefError, StoreError};
use coursedrive_protocol::ProtocolError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The folder reference could not be parsed.
    InvalidCourse(FolderRefError),
    /// Local snapshot or progress storage failed.
    Store(StoreError),
    /// The server could not be reached.
    Connection(String),
    /// A request exceeded the configured timeout.
    Timeout(String),
    /// The server answered with an error envelope.
    Api { status: u16, message: String },
    /// The server answered with something that is not an envelope.
    Protocol(String),
    /// The lesson id is not a lesson of the course.
    LessonNotFound(String),
    /// A newer load replaced this one.
    Superseded,
    /// Opening or copying a lesson URL failed.
    Action(String),
    /// Server start-up or runtime failure.
    Server(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::InvalidCourse(err) => write!(f, "invalid course: {}", err),
            Self::Store(err) => write!(f, "storage error: {}", err),
            Self::Connection(msg) => write!(f, "connection error: {}", msg),
            Self::Timeout(msg) => write!(f, "timeout: {}", msg),
            Self::Api { status, message } => write!(f, "server error ({}): {}", status, message),
            Self::Protocol(msg) => write!(f, "protocol error: {}", msg),
            Self::LessonNotFound(id) => write!(f, "lesson {} is not part of this course", id),
            Self::Superseded => write!(f, "course load was superseded by a newer one"),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
            Self::Server(msg) => write!(f, "server error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidCourse(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<FolderRefError> for ClientError {
    fn from(err: FolderRefError) -> Self {
        Self::InvalidCourse(err)
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Api { status, message } => Self::Api { status, message },
            other => Self::Protocol(other.to_string()),
        }
    }
}

impl From<coursedrive_server::ServerError> for ClientError {
    fn from(err: coursedrive_server::ServerError) -> Self {
        Self::Server(err.to_string())
    }
}

#[cfg(feature = "drive")]
impl From<coursedrive_providers::ProviderError> for ClientError {
    fn from(err: coursedrive_providers::ProviderError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_status() {
        let err: ClientError = ProtocolError::Api {
            status: 500,
            message: "Failed to fetch metadata".into(),
        }
        .into();
        assert_eq!(err.to_string(), "server error (500): Failed to fetch metadata");
    }

    #[test]
    fn folder_ref_error_is_source() {
        use std::error::Error;
        let err: ClientError = FolderRefError::Empty.into();
        assert!(err.source().is_some());
    }
}
