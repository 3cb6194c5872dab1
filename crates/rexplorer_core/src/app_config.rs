use crate::{ConnectionProfile, DEFAULT_DELIMITER, ExplorerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable holding a connection URI.
pub const URL_ENV_VAR: &str = "REXPLORER_URL";

pub const DEFAULT_FONT_SIZE: f32 = 13.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionProfile,

    /// Character separating a key's group prefix from the rest.
    pub delimiter: char,

    /// Base font size of the value panel, in pixels.
    pub font_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionProfile::default(),
            delimiter: DEFAULT_DELIMITER,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl AppConfig {
    /// Replace the stored connection with the first URI given, in priority order.
    ///
    /// `overrides` is typically `[command line, environment]`.
    pub fn apply_uri_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Result<(), ExplorerError> {
        let uri = overrides
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|uri| !uri.is_empty());

        if let Some(uri) = uri {
            self.connection = ConnectionProfile::from_uri(uri)?;
        }

        Ok(())
    }
}

pub struct AppConfigStore {
    path: PathBuf,
}

impl AppConfigStore {
    pub fn new() -> Result<Self, ExplorerError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExplorerError::IoError(std::io::Error::other("Could not find config directory"))
        })?;

        Ok(Self::with_path(config_dir.join("rexplorer").join("config.json")))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the config, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<AppConfig, ExplorerError> {
        if !self.path.exists() {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| ExplorerError::InvalidProfile(format!("{}: {}", self.path.display(), e)))?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but writes the defaults out on first start
    /// so there is a file to edit. A failed write is only logged.
    pub fn load_or_init(&self) -> Result<AppConfig, ExplorerError> {
        if self.path.exists() {
            return self.load();
        }

        let config = AppConfig::default();
        match self.save(&config) {
            Ok(()) => log::info!("Wrote default config to {}", self.path.display()),
            Err(e) => log::warn!("Could not write {}: {}", self.path.display(), e),
        }

        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ExplorerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| ExplorerError::InvalidProfile(e.to_string()))?;
        fs::write(&self.path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = AppConfigStore::with_path(dir.path().join("config.json"));

        assert_eq!(store.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = AppConfigStore::with_path(dir.path().join("nested").join("config.json"));

        let config = AppConfig {
            delimiter: '/',
            font_size: 16.0,
            ..AppConfig::default()
        };
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn first_start_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rexplorer").join("config.json");
        let store = AppConfigStore::with_path(&path);

        assert_eq!(store.load_or_init().unwrap(), AppConfig::default());
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"delimiter": "/"}"#).unwrap();

        let config = AppConfigStore::with_path(&path).load_or_init().unwrap();
        assert_eq!(config.delimiter, '/');
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"delimiter": "/"}"#);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"connection": {"port": 6380}}"#).unwrap();

        let config = AppConfigStore::with_path(path).load().unwrap();
        assert_eq!(config.connection.port, 6380);
        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.delimiter, ':');
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfigStore::with_path(path).load().unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidProfile(_)));
    }

    #[test]
    fn first_non_empty_override_wins() {
        let mut config = AppConfig::default();
        config
            .apply_uri_overrides([None, Some("  "), Some("redis://cli:7000/2"), Some("redis://env:7001")])
            .unwrap();

        assert_eq!(config.connection.host, "cli");
        assert_eq!(config.connection.port, 7000);
        assert_eq!(config.connection.database, 2);
    }

    #[test]
    fn no_override_keeps_stored_connection() {
        let mut config = AppConfig::default();
        config.connection.port = 6390;
        config.apply_uri_overrides([None::<&str>, None]).unwrap();

        assert_eq!(config.connection.port, 6390);
    }
}
