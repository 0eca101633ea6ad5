//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub listen_addr: SocketAddr,

    /// Upper bound for answering one request, tree builds included.
    pub request_timeout: Duration,

    /// Folder nesting limit passed to the tree builder.
    pub max_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout: Duration::from_secs(120),
            max_depth: 32,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration listening on `listen_addr`.
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            ..Default::default()
        }
    }

    /// Builder: set request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder: set tree depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        if self.request_timeout.is_zero() {
            return Err(ServerError::config("request timeout must be greater than zero"));
        }
        if self.max_depth == 0 {
            return Err(ServerError::config("max_depth must be at least 1"));
        }
        Ok(())
    }
}

/// Returns [`DEFAULT_LISTEN_ADDR`] parsed.
pub fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.max_depth, 32);
    }

    #[test]
    fn custom_config() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let config = ServerConfig::new(addr)
            .with_request_timeout(Duration::from_secs(5))
            .with_max_depth(4);

        assert_eq!(config.listen_addr, addr);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_depth, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation() {
        let err = ServerConfig::default()
            .with_request_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("request timeout"));

        let err = ServerConfig::default().with_max_depth(0).validate().unwrap_err();
        assert!(matches!(err, ServerError::Config { .. }));
    }
}
