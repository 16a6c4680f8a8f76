// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[server]` - API and storage base URLs
//! - `[general]` - Theme mode
//! - `[display]` - Grid display settings
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `PHOTARIUM_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! The server URLs themselves can additionally be overridden per-process via
//! `PHOTARIUM_API_URL` and `PHOTARIUM_STORAGE_URL`, which take precedence
//! over whatever the file says.

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "PHOTARIUM_API_URL";

/// Environment variable overriding the storage base URL.
pub const ENV_STORAGE_URL: &str = "PHOTARIUM_STORAGE_URL";

/// Remote endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// API base URL, e.g. `https://photos.example.com`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Storage base URL for thumbnails and avatars.
    #[serde(default)]
    pub storage_url: Option<String>,
}

impl ServerConfig {
    /// Effective API URL: environment variable, then config, then default.
    #[must_use]
    pub fn effective_api_url(&self) -> String {
        std::env::var(ENV_API_URL)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Effective storage URL: environment variable, then config, then default.
    #[must_use]
    pub fn effective_storage_url(&self) -> String {
        std::env::var(ENV_STORAGE_URL)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.storage_url.clone())
            .unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(default = "defaults::default_theme_mode")]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: defaults::default_theme_mode(),
        }
    }
}

/// Grid display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Side length of a grid tile in logical pixels.
    #[serde(
        default = "defaults::default_grid_tile",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_tile_px: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            grid_tile_px: defaults::default_grid_tile(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Grid tile size clamped into the supported range so persisted configs
    /// cannot request unusable layouts.
    #[must_use]
    pub fn grid_tile_px(&self) -> f32 {
        self.display
            .grid_tile_px
            .unwrap_or(DEFAULT_GRID_TILE_PX)
            .clamp(MIN_GRID_TILE_PX, MAX_GRID_TILE_PX)
    }
}

fn default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration, falling back to defaults.
///
/// Returns the config and an optional warning describing a file that existed
/// but could not be parsed; callers surface the warning as a toast.
pub fn load() -> (Config, Option<String>) {
    let Some(path) = default_config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(error) => (
            Config::default(),
            Some(format!("Could not read settings: {error}")),
        ),
    }
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let config = Config {
            server: ServerConfig {
                api_url: Some("https://photos.example.com".into()),
                storage_url: Some("https://cdn.example.com".into()),
            },
            general: GeneralConfig {
                theme_mode: ThemeMode::Dark,
            },
            display: DisplayConfig {
                grid_tile_px: Some(200.0),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"light\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("partial config should load");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Light);
        assert_eq!(loaded.server, ServerConfig::default());
        assert_eq!(loaded.grid_tile_px(), DEFAULT_GRID_TILE_PX);
    }

    #[test]
    fn grid_tile_is_clamped() {
        let config = Config {
            display: DisplayConfig {
                grid_tile_px: Some(10_000.0),
            },
            ..Config::default()
        };
        assert_eq!(config.grid_tile_px(), MAX_GRID_TILE_PX);
    }

    #[test]
    fn effective_urls_fall_back_to_defaults() {
        let server = ServerConfig::default();
        // The override variables are not set in the test environment.
        if std::env::var(ENV_API_URL).is_err() {
            assert_eq!(server.effective_api_url(), DEFAULT_API_URL);
        }
        if std::env::var(ENV_STORAGE_URL).is_err() {
            assert_eq!(server.effective_storage_url(), DEFAULT_STORAGE_URL);
        }
    }
}
