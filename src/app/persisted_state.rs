// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! This holds transient state that should survive restarts but is not
//! user-configurable (unlike preferences in `settings.toml`): most
//! importantly the bearer token, which keeps the session signed in across
//! launches. The token is removed from this file on explicit logout.
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with an explicit base directory
//! 2. Set the `PHOTARIUM_DATA_DIR` environment variable
//! 3. Falls back to the platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Bearer token of the signed-in session, if any.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Last directory used for download Save As dialogs.
    #[serde(default)]
    pub last_save_directory: Option<PathBuf>,

    /// Last directory used when picking files to upload.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns a tuple of (state, optional warning). If loading fails the
    /// default state is returned with a message the caller can surface.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom base directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };
        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(error) => (
                    Self::default(),
                    Some(format!("Could not read saved session: {error}")),
                ),
            },
            Err(error) => (
                Self::default(),
                Some(format!("Could not open saved session: {error}")),
            ),
        }
    }

    /// Saves application state to the default location.
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(None)
    }

    /// Saves application state to a custom base directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> std::io::Result<()> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&path)?;
        ciborium::into_writer(self, BufWriter::new(file)).map_err(std::io::Error::other)
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_cbor() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let state = AppState {
            auth_token: Some("bearer-token".into()),
            last_save_directory: Some(PathBuf::from("/downloads")),
            last_open_directory: None,
        };

        state
            .save_to(Some(temp_dir.path().to_path_buf()))
            .expect("failed to save state");
        let (loaded, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));

        assert_eq!(loaded, state);
        assert!(warning.is_none());
    }

    #[test]
    fn missing_file_yields_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (loaded, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded, AppState::default());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupt_file_yields_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(STATE_FILE), b"not cbor at all")
            .expect("failed to write garbage");

        let (loaded, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded, AppState::default());
        assert!(warning.is_some());
    }

    #[test]
    fn clearing_the_token_persists() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());

        let mut state = AppState {
            auth_token: Some("bearer-token".into()),
            ..AppState::default()
        };
        state.save_to(base.clone()).expect("failed to save");

        state.auth_token = None;
        state.save_to(base.clone()).expect("failed to save again");

        let (loaded, _) = AppState::load_from(base);
        assert_eq!(loaded.auth_token, None);
    }
}
