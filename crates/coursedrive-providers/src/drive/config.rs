//! Drive source configuration.

use std::time::Duration;

/// Configuration of the Drive v3 client.
#[derive(Clone)]
pub struct DriveConfig {
    /// API key sent as the `key` query parameter.
    pub api_key: String,

    /// API root, overridable for tests and proxies.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// `pageSize` of folder listings.
    pub page_size: u32,

    /// Skip trashed files in listings.
    pub exclude_trashed: bool,

    pub user_agent: String,
}

impl std::fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .field("exclude_trashed", &self.exclude_trashed)
            .finish()
    }
}

impl DriveConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/drive/v3";

    /// Largest page size Drive accepts.
    pub const MAX_PAGE_SIZE: u32 = 1000;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            page_size: Self::MAX_PAGE_SIZE,
            exclude_trashed: true,
            user_agent: format!("coursedrive/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_exclude_trashed(mut self, exclude: bool) -> Self {
        self.exclude_trashed = exclude;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("api_key is required".to_string());
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(format!("base_url must be an http(s) URL: {}", self.base_url));
        }
        if self.page_size == 0 || self.page_size > Self::MAX_PAGE_SIZE {
            return Err(format!(
                "page_size must be between 1 and {}",
                Self::MAX_PAGE_SIZE
            ));
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
