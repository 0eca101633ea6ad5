//! Access to the course API.
//!
//! [`CourseApi`] is what the course loader talks to. [`HttpCourseApi`] is the
//! implementation over HTTP; every request is bounded by the client timeout.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use coursedrive_protocol::{ApiResponse, CourseDetails, FolderName, FolderTimestamp, routes};
use coursedrive_providers::BoxFuture;

use crate::error::{ClientError, ClientResult};

/// The three read endpoints of the course API.
pub trait CourseApi: Send + Sync {
    /// Full tree and metadata of a course.
    fn course_details<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<CourseDetails>>;

    /// Current modification time of a course's root folder.
    fn folder_timestamp<'a>(
        &'a self,
        course_id: &'a str,
    ) -> BoxFuture<'a, ClientResult<FolderTimestamp>>;

    /// Name of a course's root folder.
    fn folder_name<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<FolderName>>;
}

/// [`CourseApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCourseApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("coursedrive/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(format!("GET {}", path))
            } else if e.is_connect() {
                ClientError::Connection(format!("cannot reach {}: {}", self.base_url, e))
            } else {
                ClientError::Connection(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(format!("GET {}", path))
            } else {
                ClientError::Connection(format!("failed to read response: {}", e))
            }
        })?;

        decode_envelope(status.as_u16(), &body)
    }
}

/// Decodes an envelope body and unwraps its payload.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    let envelope: ApiResponse<T> = serde_json::from_str(body).map_err(|e| {
        ClientError::Protocol(format!("unexpected response (HTTP {}): {}", status, e))
    })?;
    Ok(envelope.into_result()?)
}

impl CourseApi for HttpCourseApi {
    fn course_details<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<CourseDetails>> {
        Box::pin(async move { self.get(&routes::course_details_path(course_id)).await })
    }

    fn folder_timestamp<'a>(
        &'a self,
        course_id: &'a str,
    ) -> BoxFuture<'a, ClientResult<FolderTimestamp>> {
        Box::pin(async move { self.get(&routes::timestamp_path(course_id)).await })
    }

    fn folder_name<'a>(&'a self, course_id: &'a str) -> BoxFuture<'a, ClientResult<FolderName>> {
        Box::pin(async move { self.get(&routes::metadata_path(course_id)).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpCourseApi::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
    }

    #[test]
    fn decode_success_envelope() {
        let body = r#"{"status":200,"success":true,"error":null,"data":{"name":"Rust"},"timestamp":"2024-05-01T12:00:00.000Z"}"#;
        let name: FolderName = decode_envelope(200, body).unwrap();
        assert_eq!(name.name, "Rust");
    }

    #[test]
    fn decode_error_envelope() {
        let body = r#"{"status":500,"success":false,"error":"Failed to fetch metadata","data":null,"timestamp":"2024-05-01T12:00:00.000Z"}"#;
        let err = decode_envelope::<FolderName>(500, body).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 500, ref message } if message == "Failed to fetch metadata"
        ));
    }

    #[test]
    fn decode_non_envelope() {
        let err = decode_envelope::<FolderName>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Protocol(ref msg) if msg.contains("HTTP 502")));
    }

    #[tokio::test]
    async fn unreachable_server_is_connection_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = HttpCourseApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = api.folder_name("abc").await.unwrap_err();
        assert!(matches!(err, ClientError::Connection(_) | ClientError::Timeout(_)));
    }
}
