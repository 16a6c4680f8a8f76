// SPDX-License-Identifier: MPL-2.0
//! Default values for every configurable setting.

use crate::ui::theming::ThemeMode;

/// API base URL used when the config file does not set one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Storage base URL for thumbnails and avatars.
pub const DEFAULT_STORAGE_URL: &str = "http://localhost:8000/storage";

/// Side length of a grid tile in logical pixels.
pub const DEFAULT_GRID_TILE_PX: f32 = 168.0;

/// Grid tile bounds accepted from persisted configs.
pub const MIN_GRID_TILE_PX: f32 = 96.0;
pub const MAX_GRID_TILE_PX: f32 = 320.0;

/// Poll interval for the unread-notice badge, in seconds.
pub const DEFAULT_NOTICE_POLL_SECS: u64 = 60;

pub(super) fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

pub(super) fn default_grid_tile() -> Option<f32> {
    Some(DEFAULT_GRID_TILE_PX)
}
