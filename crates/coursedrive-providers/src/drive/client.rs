//! Drive v3 REST client.
//!
//! Two endpoints are used:
//! - `GET /files?q='<id>' in parents` for folder listings (paginated)
//! - `GET /files/<id>?fields=name,modifiedTime` for folder metadata

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::DriveConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, DriveEntry, FolderMetadata, FolderSource};

const PROVIDER_NAME: &str = "drive";

const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType)";
const METADATA_FIELDS: &str = "name,modifiedTime";

/// Google Drive API client.
#[derive(Debug)]
pub struct DriveClient {
    http_client: reqwest::Client,
    config: DriveConfig,
}

impl DriveClient {
    /// Creates a client, validating the configuration first.
    pub fn new(config: DriveConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration(e).with_provider(PROVIDER_NAME))?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration("failed to create HTTP client")
                    .with_provider(PROVIDER_NAME)
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Lists every child of a folder, following `nextPageToken`.
    pub async fn list_folder(&self, folder_id: &str) -> ProviderResult<Vec<DriveEntry>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(folder_id, page_token.as_deref()).await?;
            entries.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(folder_id = %folder_id, count = entries.len(), "Listed Drive folder");
        Ok(entries)
    }

    async fn list_page(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> ProviderResult<FileListResponse> {
        let url = format!("{}/files", self.config.base_url);

        let mut request = self.http_client.get(&url).query(&[
            (
                "q",
                parents_query(folder_id, self.config.exclude_trashed),
            ),
            ("fields", LIST_FIELDS.to_string()),
            ("orderBy", "name".to_string()),
            ("pageSize", self.config.page_size.to_string()),
            ("key", self.config.api_key.clone()),
        ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        self.execute(request, folder_id).await
    }

    /// Fetches the name and modification time of a folder.
    pub async fn get_metadata(&self, folder_id: &str) -> ProviderResult<FolderMetadata> {
        let url = format!(
            "{}/files/{}",
            self.config.base_url,
            urlencoding::encode(folder_id)
        );

        let request = self.http_client.get(&url).query(&[
            ("fields", METADATA_FIELDS),
            ("key", self.config.api_key.as_str()),
        ]);

        self.execute(request, folder_id).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        folder_id: &str,
    ) -> ProviderResult<T> {
        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ProviderError::network("request timeout")
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e.without_url()))
            } else {
                ProviderError::network(format!("request failed: {}", e.without_url()))
            };
            err.with_provider(PROVIDER_NAME)
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(
                status_error(status.as_u16(), retry_after, &body, folder_id)
                    .with_provider(PROVIDER_NAME),
            );
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e))
                .with_provider(PROVIDER_NAME)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
                .with_provider(PROVIDER_NAME)
        })
    }
}

impl FolderSource for DriveClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn folder_metadata<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<FolderMetadata>> {
        Box::pin(self.get_metadata(folder_id))
    }

    fn list_children<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<DriveEntry>>> {
        Box::pin(self.list_folder(folder_id))
    }
}

/// Builds the `q` parameter selecting the children of `folder_id`.
fn parents_query(folder_id: &str, exclude_trashed: bool) -> String {
    let escaped = folder_id.replace('\\', "\\\\").replace('\'', "\\'");
    if exclude_trashed {
        format!("'{}' in parents and trashed = false", escaped)
    } else {
        format!("'{}' in parents", escaped)
    }
}

/// Maps a non-success Drive status to a provider error.
fn status_error(status: u16, retry_after: Option<u64>, body: &str, folder_id: &str) -> ProviderError {
    match status {
        429 => ProviderError::rate_limited(format!(
            "rate limit exceeded{}",
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        )),
        401 => ProviderError::authentication("API key rejected"),
        403 => ProviderError::authorization(format!("access denied to folder {}", folder_id)),
        404 => ProviderError::not_found(format!("folder {} not found", folder_id)),
        400 => ProviderError::bad_request(format!("API error ({}): {}", status, body)),
        _ => ProviderError::server(format!("API error ({}): {}", status, body)),
    }
}

/// Response of the files.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveEntry>,
    next_page_token: Option<String>,
}
