use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable that overrides the configured access key
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User configuration for the gallery.
///
/// Stored as TOML in the user's config directory:
/// - Linux: ~/.config/photo-gallery/config.toml
/// - macOS: ~/Library/Application Support/photo-gallery/config.toml
/// - Windows: %APPDATA%\photo-gallery\config.toml
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Unsplash access key sent as `Client-ID`
    pub access_key: Option<String>,
    /// Base URL of the catalog API
    pub api_base: String,
    /// Images requested per browse page
    pub per_page: u32,
    /// Quiet period before a search is sent, in milliseconds
    pub search_debounce_ms: u64,
    /// Distance from the bottom of the grid that triggers the next page
    pub scroll_threshold: f32,
    /// Number of masonry columns
    pub columns: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            api_base: "https://api.unsplash.com".to_string(),
            per_page: 10,
            search_debounce_ms: 1000,
            scroll_threshold: 100.0,
            columns: 4,
        }
    }
}

impl GalleryConfig {
    /// Load the configuration from the default location, then apply
    /// environment overrides.
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::get_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env(std::env::var(ACCESS_KEY_ENV).ok());

        if config.access_key.is_none() {
            warn!("No access key configured; set {} or access_key in config.toml", ACCESS_KEY_ENV);
        }

        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("⚙️  Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Override the access key with a non-empty environment value
    fn apply_env(&mut self, access_key: Option<String>) {
        if let Some(key) = access_key.filter(|key| !key.trim().is_empty()) {
            self.access_key = Some(key);
        }
    }

    /// Get the path where the config file is expected
    fn get_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("photo-gallery");
        path.push("config.toml");
        Some(path)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.per_page, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(1000));
        assert_eq!(config.scroll_threshold, 100.0);
        assert!(config.access_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalleryConfig::from_toml(
            r#"
            access_key = "secret"
            columns = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.access_key.as_deref(), Some("secret"));
        assert_eq!(config.columns, 2);
        assert_eq!(config.api_base, "https://api.unsplash.com");
        assert_eq!(config.search_debounce_ms, 1000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(GalleryConfig::from_toml("per_page = \"ten\"").is_err());
    }

    #[test]
    fn test_env_overrides_access_key() {
        let mut config = GalleryConfig {
            access_key: Some("from-file".to_string()),
            ..GalleryConfig::default()
        };

        config.apply_env(Some("from-env".to_string()));
        assert_eq!(config.access_key.as_deref(), Some("from-env"));

        // Blank values are ignored
        config.apply_env(Some("  ".to_string()));
        assert_eq!(config.access_key.as_deref(), Some("from-env"));

        config.apply_env(None);
        assert_eq!(config.access_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = GalleryConfig::from_file(Path::new("/nonexistent/photo-gallery.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
