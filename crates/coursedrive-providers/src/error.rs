//! Errors of folder sources and the tree builder.
//!
//! A [`ProviderError`] pairs a [`ProviderErrorCode`] with a human message.
//! The server only logs these, so the message is written for the log and may
//! name folder ids and Drive statuses.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync>;

/// What went wrong, independent of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Drive rejected the API key (401).
    AuthenticationFailed,
    /// The folder is not shared with the key (403).
    AuthorizationFailed,
    NetworkError,
    /// 429.
    RateLimited,
    /// 5xx or any status without a dedicated code.
    ServerError,
    /// A body that does not decode.
    InvalidResponse,
    /// 404.
    NotFound,
    /// 400, or a request the builder refuses to make.
    BadRequest,
    ConfigurationError,
    /// A course tree could not be built; the cause is the source.
    TreeBuildFailed,
    InternalError,
}

impl ProviderErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
            Self::TreeBuildFailed => "tree_build_failed",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure, optionally tagged with the source that raised it.
#[derive(Debug, Error)]
#[error("{}{code}: {message}", source_prefix(.provider))]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    provider: Option<String>,
    #[source]
    cause: Option<BoxedCause>,
}

fn source_prefix(provider: &Option<String>) -> String {
    provider
        .as_ref()
        .map(|name| format!("[{}] ", name))
        .unwrap_or_default()
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            cause: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthorizationFailed, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Wraps whatever stopped the tree of `root_id` from being built.
    ///
    /// Keeps the provider tag of `cause`.
    pub fn tree_build_failed(root_id: &str, cause: ProviderError) -> Self {
        Self {
            code: ProviderErrorCode::TreeBuildFailed,
            message: format!("tree build failed for folder {}", root_id),
            provider: cause.provider.clone(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_provider() {
        let err = ProviderError::bad_request("folder x exceeds the maximum depth of 2");
        assert_eq!(
            err.to_string(),
            "bad_request: folder x exceeds the maximum depth of 2"
        );
    }

    #[test]
    fn display_with_provider() {
        let err = ProviderError::not_found("folder abc not found").with_provider("drive");
        assert_eq!(err.to_string(), "[drive] not_found: folder abc not found");
    }

    #[test]
    fn tree_build_failure_wraps_cause() {
        let cause = ProviderError::authorization("access denied").with_provider("drive");
        let err = ProviderError::tree_build_failed("root", cause);

        assert_eq!(err.code(), ProviderErrorCode::TreeBuildFailed);
        assert_eq!(err.provider(), Some("drive"));
        assert_eq!(
            err.to_string(),
            "[drive] tree_build_failed: tree build failed for folder root"
        );

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "[drive] authorization_failed: access denied");
    }

    #[test]
    fn with_source_keeps_foreign_error() {
        let err = ProviderError::internal("boom").with_source(std::io::Error::other("disk"));
        assert_eq!(err.source().unwrap().to_string(), "disk");
        assert!(ProviderError::internal("boom").source().is_none());
    }
}
