//! Client configuration shared by every front-end.
//!
//! Provides a `ClientConfig` describing where the API lives, where exported
//! PDFs land and which directory backs the widget's shared store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::normalize_base_url;
use crate::error::{Error, Result};
use crate::util::normalize_text_option;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const ENV_API_BASE_URL: &str = "NOTES_API_BASE_URL";
pub const ENV_EXPORT_DIR: &str = "NOTES_EXPORT_DIR";
pub const ENV_WIDGET_DIR: &str = "NOTES_WIDGET_DIR";

const SHARED_DIR_NAME: &str = "shared";
const APP_DIR_NAME: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Directory receiving downloaded PDF exports.
    pub export_dir: PathBuf,
    /// Directory shared between the app and the widget reader.
    pub widget_cache_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            export_dir: std::env::temp_dir(),
            widget_cache_dir: default_widget_cache_dir(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `NOTES_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(
            std::env::var(ENV_API_BASE_URL).ok(),
            std::env::var(ENV_EXPORT_DIR).ok(),
            std::env::var(ENV_WIDGET_DIR).ok(),
        )
    }

    /// Applies optional overrides; blank values are ignored.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        export_dir: Option<String>,
        widget_cache_dir: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = normalize_text_option(api_base_url) {
            self.api_base_url = url;
        }
        if let Some(dir) = normalize_text_option(export_dir) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(dir) = normalize_text_option(widget_cache_dir) {
            self.widget_cache_dir = PathBuf::from(dir);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&mut self) -> Result<()> {
        self.api_base_url = normalize_base_url(&self.api_base_url)
            .map_err(|error| Error::Configuration(error.to_string()))?;
        Ok(())
    }
}

/// Platform data directory used for the shared widget store.
#[must_use]
pub fn default_widget_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(SHARED_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert!(config.widget_cache_dir.ends_with("notes/shared"));
    }

    #[test]
    fn overrides_replace_and_normalize_values() {
        let config = ClientConfig::default()
            .with_overrides(
                Some(" https://notes.example.com/ ".to_string()),
                Some("/tmp/exports".to_string()),
                Some("   ".to_string()),
            )
            .unwrap();
        assert_eq!(config.api_base_url, "https://notes.example.com");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.widget_cache_dir, default_widget_cache_dir());
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let error = ClientConfig::default()
            .with_overrides(Some("notes.example.com".to_string()), None, None)
            .unwrap_err();
        assert!(matches!(error, Error::Configuration(_)));
    }
}
