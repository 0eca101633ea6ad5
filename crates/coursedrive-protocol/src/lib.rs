//! Wire types shared by the coursedrive server and client.
//!
//! Every HTTP response is wrapped in an [`ApiResponse`] envelope whose
//! `status` mirrors the HTTP status code. Three endpoints exist:
//!
//! | Route | Payload |
//! |-------|---------|
//! | `GET /api/folder_details/{folder_id}` | [`CourseDetails`] |
//! | `GET /api/courses/{folder_id}/timestamp` | [`FolderTimestamp`] |
//! | `GET /api/courses/{folder_id}/metadata` | [`FolderName`] |
//!
//! # Example
//!
//! ```rust
//! use coursedrive_protocol::{ApiResponse, FolderName, routes};
//!
//! let response = ApiResponse::success(FolderName { name: "Rust".into() });
//! let json = serde_json::to_string(&response).unwrap();
//! let decoded: ApiResponse<FolderName> = serde_json::from_str(&json).unwrap();
//! assert_eq!(decoded.into_result().unwrap().name, "Rust");
//!
//! assert_eq!(routes::timestamp_path("abc"), "/api/courses/abc/timestamp");
//! ```

mod error;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use types::{ApiResponse, CourseDetails, FolderName, FolderTimestamp};

/// Route patterns and concrete request paths.
pub mod routes {
    /// Router pattern of the course details endpoint.
    pub const COURSE_DETAILS: &str = "/api/folder_details/{folder_id}";
    /// Router pattern of the timestamp endpoint.
    pub const TIMESTAMP: &str = "/api/courses/{folder_id}/timestamp";
    /// Router pattern of the metadata endpoint.
    pub const METADATA: &str = "/api/courses/{folder_id}/metadata";

    /// Path of the course details of `folder_id`.
    pub fn course_details_path(folder_id: &str) -> String {
        format!("/api/folder_details/{}", urlencoding::encode(folder_id))
    }

    /// Path of the modification time of `folder_id`.
    pub fn timestamp_path(folder_id: &str) -> String {
        format!("/api/courses/{}/timestamp", urlencoding::encode(folder_id))
    }

    /// Path of the name of `folder_id`.
    pub fn metadata_path(folder_id: &str) -> String {
        format!("/api/courses/{}/metadata", urlencoding::encode(folder_id))
    }
}

/// Error message of a failed course details request.
pub const COURSE_DETAILS_FAILED: &str = "Failed to retrieve course data.";
/// Error message of a failed timestamp request.
pub const TIMESTAMP_FAILED: &str = "Failed to fetch folder timestamp";
/// Error message of a failed metadata request.
pub const METADATA_FAILED: &str = "Failed to fetch metadata";

#[cfg(test)]
mod tests {
    use super::routes;

    #[test]
    fn paths_encode_ids() {
        assert_eq!(routes::course_details_path("1AbC"), "/api/folder_details/1AbC");
        assert_eq!(routes::metadata_path("a b"), "/api/courses/a%20b/metadata");
    }
}
