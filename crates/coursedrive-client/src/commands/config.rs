//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    #[cfg(feature = "drive")]
    if config.drive.api_key.is_some() {
        config
            .drive
            .to_provider_config()
            .map_err(|e| ClientError::Config(format!("invalid Drive settings: {}", e)))?;
        println!("Drive API key resolves.");
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration and data paths.
pub fn path(config: &ClientConfig) -> ClientResult<()> {
    println!("config: {}", ClientConfig::default_path().display());
    println!("data:   {}", config.client.data_dir().display());
    Ok(())
}
