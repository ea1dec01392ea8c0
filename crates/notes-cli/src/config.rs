//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use notes_core::config::{ClientConfig, ENV_API_BASE_URL, ENV_EXPORT_DIR, ENV_WIDGET_DIR};
use notes_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const CONFIG_DIR_NAME: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub export_dir: Option<String>,
    #[serde(default)]
    pub widget_cache_dir: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            api_base_url: None,
            export_dir: None,
            widget_cache_dir: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Layers defaults, this file, the environment and the `--api-url` flag.
    pub fn resolve(&self, api_url_flag: Option<String>) -> Result<ClientConfig, CliError> {
        self.resolve_with_env(|name| std::env::var(name).ok(), api_url_flag)
    }

    pub fn resolve_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
        api_url_flag: Option<String>,
    ) -> Result<ClientConfig, CliError> {
        let config = ClientConfig::default()
            .with_overrides(
                self.api_base_url.clone(),
                self.export_dir.clone(),
                self.widget_cache_dir.clone(),
            )
            .and_then(|config| {
                config.with_overrides(
                    env(ENV_API_BASE_URL),
                    env(ENV_EXPORT_DIR),
                    env(ENV_WIDGET_DIR),
                )
            })
            .and_then(|config| config.with_overrides(api_url_flag, None, None))
            .map_err(|error| CliError::Config(error.to_string()))?;
        Ok(config)
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        self.export_dir = normalize_text_option(self.export_dir.take());
        self.widget_cache_dir = normalize_text_option(self.widget_cache_dir.take());
    }
}
