// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::types::User;
use crate::api::ApiError;
use crate::ui::{
    account, activity, albums, auth, friends, gallery, navbar, notifications, shares,
    upload_screen,
};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Auth(auth::Message),
    Gallery(gallery::Message),
    Albums(albums::Message),
    Upload(upload_screen::Message),
    Friends(friends::Message),
    Shares(shares::Message),
    Activity(activity::Message),
    Account(account::Message),
    Navbar(navbar::Message),
    Notification(notifications::NotificationMessage),
    /// Result of validating a persisted token on startup.
    SessionRestored(Box<Result<User, ApiError>>),
    /// Server-side logout finished (best-effort; the local token is already
    /// cleared by then).
    LogoutAcknowledged(Result<(), ApiError>),
    /// Periodic unread-badge refresh fired.
    RefreshUnread,
    UnreadCountLoaded(Result<u32, ApiError>),
    /// A file was dropped on the window (queued when on the upload screen).
    FileDropped(PathBuf),
    /// Ctrl+V pressed on the upload screen.
    PasteRequested,
    /// Native events routed to the gallery's viewer key bindings.
    RawEvent(iced::Event),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// API base URL override; beats `PHOTARIUM_API_URL` and the config file.
    pub api_url: Option<String>,
    /// Storage base URL override.
    pub storage_url: Option<String>,
    /// Optional data directory override (for the state file).
    /// Takes precedence over the `PHOTARIUM_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `PHOTARIUM_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
