use std::path::{Path, PathBuf};

use coolschool_bridge::config::Config;
use directories::ProjectDirs;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Environment variable overriding [`coolschool_bridge::config::ApiConfig::base_url`].
const API_URL_VAR: &str = "COOLSCHOOL_API_URL";

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the default configuration to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_path() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("dev", "coolschool", "coolschool") {
        Some(dirs) => Ok(dirs.config_dir().join("config.toml")),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

/// Loads the application configuration from the user's config directory and
/// applies environment overrides.
pub async fn load_config() -> Result<Config, ConfigError> {
    let mut config = load_config_from(&config_path()?).await?;
    if let Ok(base_url) = std::env::var(API_URL_VAR) {
        log::info!("Using API base URL from {API_URL_VAR}: {base_url}");
        config.api.base_url = base_url;
    }

    Ok(config)
}

/// Reads the config at `config_path`. If the file does not exist yet, the
/// default config is written there and returned.
pub async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(config.notifications.max_visible, 3);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("unmount_after_ms = 10000"));
    }

    #[tokio::test]
    async fn partial_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://school.example/api/v1/\"\n").unwrap();

        let config = load_config_from(&path).await.unwrap();
        assert_eq!(config.api.base_url, "https://school.example/api/v1/");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.notifications.unmount_after_ms, 10_000);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "notifications = 3").unwrap();

        assert!(matches!(
            load_config_from(&path).await,
            Err(ConfigError::DeserializeError(_))
        ));
    }
}
