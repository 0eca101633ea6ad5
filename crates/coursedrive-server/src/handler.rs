//! Route handlers of the course API.
//!
//! Each handler answers with an [`Envelope`]. Failures are logged with their
//! details and answered with a fixed generic message.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error, warn};

use coursedrive_core::parse_folder_ref;
use coursedrive_protocol::{
    ApiResponse, COURSE_DETAILS_FAILED, CourseDetails, FolderName, FolderTimestamp,
    METADATA_FAILED, TIMESTAMP_FAILED,
};
use coursedrive_providers::{FolderSource, ProviderError, ProviderResult, TreeBuilder};

use crate::config::ServerConfig;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn FolderSource>,
    max_depth: usize,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(source: Arc<dyn FolderSource>, config: &ServerConfig) -> Self {
        Self {
            source,
            max_depth: config.max_depth,
            request_timeout: config.request_timeout,
        }
    }

    /// Runs a source call bounded by the request timeout.
    async fn bounded<T>(&self, call: impl Future<Output = ProviderResult<T>>) -> ProviderResult<T> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::network(format!(
                "request exceeded {}s",
                self.request_timeout.as_secs_f64()
            ))
            .with_provider(self.source.name())),
        }
    }
}

/// An [`ApiResponse`] sent with the HTTP status it carries.
#[derive(Debug)]
pub struct Envelope<T>(pub ApiResponse<T>);

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self(ApiResponse::success(data))
    }

    pub fn error(message: &str, status: StatusCode) -> Self {
        Self(ApiResponse::error(message, status.as_u16()))
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

/// Rejects folder ids that could never name a Drive folder.
fn check_folder_id<T>(folder_id: &str) -> Result<(), Envelope<T>> {
    match parse_folder_ref(folder_id) {
        Ok(id) if id == folder_id => Ok(()),
        _ => {
            warn!(folder_id = %folder_id, "Rejected invalid folder id");
            Err(Envelope::error("Invalid folder id", StatusCode::BAD_REQUEST))
        }
    }
}

/// `GET /api/folder_details/{folder_id}`
pub async fn course_details(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Envelope<CourseDetails> {
    if let Err(rejection) = check_folder_id(&folder_id) {
        return rejection;
    }

    let builder = TreeBuilder::new(state.source.as_ref()).with_max_depth(state.max_depth);
    match state.bounded(builder.build_course(&folder_id)).await {
        Ok((items, metadata)) => {
            debug!(folder_id = %folder_id, top_level = items.len(), "Served course details");
            Envelope::ok(CourseDetails::new(items, metadata))
        }
        Err(e) => {
            error!(folder_id = %folder_id, error = %e, "Error fetching course data");
            Envelope::error(COURSE_DETAILS_FAILED, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /api/courses/{folder_id}/timestamp`
pub async fn folder_timestamp(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Envelope<FolderTimestamp> {
    if let Err(rejection) = check_folder_id(&folder_id) {
        return rejection;
    }

    match state
        .bounded(state.source.folder_modified_time(&folder_id))
        .await
    {
        Ok(modified_time) => Envelope::ok(FolderTimestamp { modified_time }),
        Err(e) => {
            error!(folder_id = %folder_id, error = %e, "Error fetching folder timestamp");
            Envelope::error(TIMESTAMP_FAILED, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /api/courses/{folder_id}/metadata`
pub async fn folder_metadata(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> Envelope<FolderName> {
    if let Err(rejection) = check_folder_id(&folder_id) {
        return rejection;
    }

    match state.bounded(state.source.folder_name(&folder_id)).await {
        Ok(name) => Envelope::ok(FolderName { name }),
        Err(e) => {
            error!(folder_id = %folder_id, error = %e, "Error fetching folder metadata");
            Envelope::error(METADATA_FAILED, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> Envelope<()> {
    Envelope::error("Not found", StatusCode::NOT_FOUND)
}
