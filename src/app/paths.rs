// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`PHOTARIUM_DATA_DIR`, `PHOTARIUM_CONFIG_DIR`)
//! 4. **Platform default** - via the `dirs` crate
//!
//! CLI overrides should be initialized once at startup:
//! ```ignore
//! paths::init_cli_overrides(flags.data_dir, flags.config_dir);
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Photarium";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "PHOTARIUM_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PHOTARIUM_CONFIG_DIR";

/// Global CLI override for the data directory (set once at startup).
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for the config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for the data and config directories.
///
/// Must be called at most once, before any path resolution.
///
/// # Panics
///
/// Panics if called more than once (`OnceLock` can only be set once).
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

fn cli_data_dir() -> Option<PathBuf> {
    CLI_DATA_DIR.get().and_then(Clone::clone)
}

fn cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application data directory (persisted session state).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the data directory with an optional explicit override, which
/// takes highest priority (used by tests).
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = cli_data_dir() {
        return Some(path);
    }
    if let Some(path) = env_dir(ENV_DATA_DIR) {
        return Some(path);
    }
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application config directory (`settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory with an optional explicit override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = cli_config_dir() {
        return Some(path);
    }
    if let Some(path) = env_dir(ENV_CONFIG_DIR) {
        return Some(path);
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let expected = PathBuf::from("/tmp/photarium-test-data");
        let resolved = get_app_data_dir_with_override(Some(expected.clone()));
        assert_eq!(resolved, Some(expected));

        let expected = PathBuf::from("/tmp/photarium-test-config");
        let resolved = get_app_config_dir_with_override(Some(expected.clone()));
        assert_eq!(resolved, Some(expected));
    }

    #[test]
    fn platform_default_ends_with_app_name() {
        // Only meaningful when no CLI/env override is active in the test
        // environment.
        if std::env::var(ENV_DATA_DIR).is_err() && CLI_DATA_DIR.get().is_none() {
            if let Some(path) = get_app_data_dir() {
                assert!(path.ends_with(APP_NAME));
            }
        }
    }
}
