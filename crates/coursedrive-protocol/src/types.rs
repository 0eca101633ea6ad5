//! Response envelope and payload types of the course API.

use chrono::{DateTime, Utc};
use coursedrive_core::{CachedSnapshot, CourseItem, CourseMetadata};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Uniform envelope wrapping every API response.
///
/// The HTTP status of the response mirrors `status`. Error envelopes carry a
/// message and a `null` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Whether the request succeeded.
    pub success: bool,
    /// Error message, `null` on success.
    pub error: Option<String>,
    /// Payload, `null` on error.
    pub data: Option<T>,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Creates a 200 success envelope.
    pub fn success(data: T) -> Self {
        Self::success_with_status(data, 200)
    }

    /// Creates a success envelope with a custom status.
    pub fn success_with_status(data: T, status: u16) -> Self {
        Self {
            status,
            success: true,
            error: None,
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// Creates an error envelope.
    pub fn error(message: impl Into<String>, status: u16) -> Self {
        Self {
            status,
            success: false,
            error: Some(message.into()),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Returns true for success envelopes.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Unwraps the payload, turning error envelopes into [`ProtocolError`].
    pub fn into_result(self) -> ProtocolResult<T> {
        if !self.success {
            return Err(ProtocolError::Api {
                status: self.status,
                message: self.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        self.data
            .ok_or(ProtocolError::MissingData { status: self.status })
    }
}

/// Payload of the course details endpoint: the full tree and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub items: Vec<CourseItem>,
    pub metadata: CourseMetadata,
}

impl CourseDetails {
    /// Creates a course details payload.
    pub fn new(items: Vec<CourseItem>, metadata: CourseMetadata) -> Self {
        Self { items, metadata }
    }
}

impl From<CourseDetails> for CachedSnapshot {
    fn from(details: CourseDetails) -> Self {
        CachedSnapshot::new(details.items, details.metadata)
    }
}

/// Payload of the timestamp endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderTimestamp {
    pub modified_time: String,
}

/// Payload of the name endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderName {
    pub name: String,
}
