//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/coursedrive/config.toml` by default:
//!
//! ```toml
//! [drive]
//! api_key = "env::COURSEDRIVE_API_KEY"
//! max_depth = 32
//!
//! [server]
//! listen = "127.0.0.1:3000"
//!
//! [client]
//! server_url = "http://127.0.0.1:3000"
//! timeout_secs = 30
//! ```
//!
//! `drive.api_key` supports secret references (`pass::…`, `env::…`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use coursedrive_server::ServerConfig;

/// Configuration for the coursedrive CLI and server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Drive API settings used by `serve`.
    pub drive: DriveSettings,

    /// HTTP API settings used by `serve`.
    pub server: ServerSettings,

    /// Settings of the course commands.
    pub client: ClientSettings,
}

/// Drive API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    /// API key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// Override of the Drive v3 API root.
    pub base_url: Option<String>,

    /// Timeout of a single Drive request in seconds.
    pub timeout_secs: u64,

    /// Folder nesting limit when building a course.
    pub max_depth: usize,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_depth: 32,
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address.
    pub listen: String,

    /// Upper bound for answering a request in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: coursedrive_server::DEFAULT_LISTEN_ADDR.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Course command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the course API.
    pub server_url: String,

    /// Timeout of a single API request in seconds.
    pub timeout_secs: u64,

    /// Where snapshots and progress are kept.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: format!("http://{}", coursedrive_server::DEFAULT_LISTEN_ADDR),
            timeout_secs: 30,
            data_dir: None,
        }
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the configured data directory or the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(ClientConfig::default_data_dir)
    }
}

impl ServerSettings {
    /// Parses the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        self.listen
            .parse()
            .map_err(|e| format!("invalid listen address `{}`: {}", self.listen, e))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursedrive")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursedrive")
    }

    /// Builds the HTTP API configuration, with an optional listen override.
    pub fn server_config(&self, listen: Option<SocketAddr>) -> Result<ServerConfig, String> {
        let addr = match listen {
            Some(addr) => addr,
            None => self.server.listen_addr()?,
        };
        Ok(ServerConfig::new(addr)
            .with_request_timeout(Duration::from_secs(self.server.timeout_secs))
            .with_max_depth(self.drive.max_depth))
    }

    /// Checks everything that can be checked without network access.
    pub fn validate(&self) -> Result<(), String> {
        self.server.listen_addr()?;

        if self.server.timeout_secs == 0 {
            return Err("server.timeout_secs must be greater than zero".to_string());
        }
        if self.client.timeout_secs == 0 {
            return Err("client.timeout_secs must be greater than zero".to_string());
        }
        if !(self.client.server_url.starts_with("http://")
            || self.client.server_url.starts_with("https://"))
        {
            return Err(format!(
                "client.server_url must be an http(s) URL: {}",
                self.client.server_url
            ));
        }
        if self.drive.max_depth == 0 {
            return Err("drive.max_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(feature = "drive")]
impl DriveSettings {
    /// Resolves the API key and builds the Drive client configuration.
    pub fn to_provider_config(
        &self,
    ) -> Result<coursedrive_providers::drive::DriveConfig, String> {
        use coursedrive_providers::drive::DriveConfig;

        let raw_key = self.api_key.as_deref().ok_or_else(|| {
            format!(
                "Drive API key not found. Add to {}:\n  \
                 [drive]\n  \
                 api_key = \"env::COURSEDRIVE_API_KEY\"",
                ClientConfig::default_path().display()
            )
        })?;
        let api_key = crate::secret::resolve(raw_key)
            .map_err(|e| format!("failed to resolve api_key: {}", e))?;

        let mut config =
            DriveConfig::new(api_key).with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server.listen, "127.0.0.1:3000");
        assert_eq!(config.client.server_url, "http://127.0.0.1:3000");
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
        assert_eq!(config.drive.max_depth, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
[client]
server_url = "http://courses.local:8080"
data_dir = "/tmp/coursedrive-test"
"#,
        )
        .unwrap();

        assert_eq!(config.client.server_url, "http://courses.local:8080");
        assert_eq!(config.client.timeout_secs, 30);
        assert_eq!(config.client.data_dir(), PathBuf::from("/tmp/coursedrive-test"));
        assert_eq!(config.server.timeout_secs, 120);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[drive]\nmax_depth = 5\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.drive.max_depth, 5);

        std::fs::write(&path, "[drive\n").unwrap();
        assert!(ClientConfig::load_from(&path).unwrap_err().contains("parse"));
    }

    #[test]
    fn server_config_uses_settings_and_override() {
        let mut config = ClientConfig::default();
        config.server.timeout_secs = 10;
        config.drive.max_depth = 4;

        let server = config.server_config(None).unwrap();
        assert_eq!(server.listen_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(server.request_timeout, Duration::from_secs(10));
        assert_eq!(server.max_depth, 4);

        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        assert_eq!(config.server_config(Some(addr)).unwrap().listen_addr, addr);
    }

    #[test]
    fn validation_errors() {
        let mut config = ClientConfig::default();
        config.server.listen = "not an address".into();
        assert!(config.validate().unwrap_err().contains("listen"));

        let mut config = ClientConfig::default();
        config.client.server_url = "courses.local".into();
        assert!(config.validate().unwrap_err().contains("server_url"));

        let mut config = ClientConfig::default();
        config.client.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "drive")]
    #[test]
    fn api_key_from_env_reference() {
        unsafe {
            std::env::set_var("_COURSEDRIVE_TEST_API_KEY", "AIza-test");
        }
        let config: ClientConfig = toml::from_str(
            r#"
[drive]
api_key = "env::_COURSEDRIVE_TEST_API_KEY"
base_url = "http://localhost:9999/drive/v3"
timeout_secs = 7
"#,
        )
        .unwrap();

        let drive = config.drive.to_provider_config().unwrap();
        assert_eq!(drive.api_key, "AIza-test");
        assert_eq!(drive.base_url, "http://localhost:9999/drive/v3");
        assert_eq!(drive.timeout, Duration::from_secs(7));

        unsafe {
            std::env::remove_var("_COURSEDRIVE_TEST_API_KEY");
        }
    }

    #[cfg(feature = "drive")]
    #[test]
    fn missing_api_key_errors() {
        let err = DriveSettings::default().to_provider_config().unwrap_err();
        assert!(err.contains("API key not found"));
    }
}
