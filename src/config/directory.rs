//! Directory configuration - where resources and catalogs are loaded from

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Directory data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// JSON snapshot of directory resources
    #[serde(default = "default_resources_path")]
    pub resources_path: PathBuf,

    /// Seconds between checks for a rewritten snapshot
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// ZIP to service-area index used for neighborhood resources
    pub zip_index_path: Option<PathBuf>,

    /// ZIP codes inside the city, used for city resources
    pub city_zips_path: Option<PathBuf>,

    /// Directory holding one message catalog per language
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Language used when a translation is missing
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl DirectoryConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resources_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY_RESOURCES_PATH"));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ValidationError::InvalidChatTiming("refresh_interval_secs"));
        }
        if self.catalog_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY_CATALOG_DIR"));
        }
        if self.default_language.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY_DEFAULT_LANGUAGE"));
        }
        Ok(())
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            resources_path: default_resources_path(),
            refresh_interval_secs: default_refresh_interval(),
            zip_index_path: None,
            city_zips_path: None,
            catalog_dir: default_catalog_dir(),
            default_language: default_language(),
        }
    }
}

fn default_resources_path() -> PathBuf {
    PathBuf::from("data/resources.json")
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("i18n")
}

fn default_language() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_config_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.resources_path, PathBuf::from("data/resources.json"));
        assert_eq!(config.catalog_dir, PathBuf::from("i18n"));
        assert_eq!(config.default_language, "en");
        assert!(config.zip_index_path.is_none());
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_refresh_interval() {
        let config = DirectoryConfig {
            refresh_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidChatTiming("refresh_interval_secs"))
        );
    }

    #[test]
    fn test_validation_missing_language() {
        let config = DirectoryConfig {
            default_language: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
