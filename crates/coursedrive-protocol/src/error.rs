//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while decoding or unwrapping API responses.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to encode or decode a message.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered with an error envelope.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A success envelope arrived without a payload.
    #[error("response carried no data (status {status})")]
    MissingData { status: u16 },
}

impl ProtocolError {
    /// Returns the HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::MissingData { status } => Some(*status),
            Self::Serialization(_) => None,
        }
    }
}
