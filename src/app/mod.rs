// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between screens.
//!
//! The `App` struct wires together the API client, the per-screen
//! components, and the cross-cutting concerns (toasts, persisted session,
//! theming) and keeps policy decisions close to the main update loop so
//! user-facing behavior is easy to audit.

pub mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::types::User;
use crate::api::ApiClient;
use crate::config::{self, Config};
use crate::ui::notifications::Notification;
use crate::ui::theming::ThemeMode;
use crate::ui::{
    account, activity, albums, auth, friends, gallery, notifications, shares, upload_screen,
};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Root Iced application state bridging screens, the API client, and
/// persisted session state.
pub struct App {
    api: ApiClient,
    screen: Screen,
    theme_mode: ThemeMode,
    config: Config,
    app_state: persisted_state::AppState,
    /// Signed-in account; `None` shows the auth screen.
    user: Option<User>,
    /// Unread server notices, shown as a navbar badge.
    unread_notices: u32,
    auth: auth::State,
    gallery: gallery::State,
    albums: albums::State,
    upload: upload_screen::State,
    friends: friends::State,
    shares: shares::State,
    activity: activity::State,
    account: account::State,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("signed_in", &self.user.is_some())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state: config, persisted session, and (when a
    /// token survived the last run) asynchronous session restoration.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir, flags.config_dir);

        let (config, config_warning) = config::load();
        let api_url = flags
            .api_url
            .unwrap_or_else(|| config.server.effective_api_url());
        let storage_url = flags
            .storage_url
            .unwrap_or_else(|| config.server.effective_storage_url());
        let mut api =
            ApiClient::new(&api_url, &storage_url).expect("HTTP client initialization failed");

        let (app_state, state_warning) = persisted_state::AppState::load();
        if let Some(token) = &app_state.auth_token {
            api.set_token(token.clone());
        }

        let mut app = App {
            api,
            screen: Screen::Photos,
            theme_mode: config.general.theme_mode,
            config,
            app_state,
            user: None,
            unread_notices: 0,
            auth: auth::State::new(),
            gallery: gallery::State::new(),
            albums: albums::State::new(),
            upload: upload_screen::State::new(),
            friends: friends::State::new(),
            shares: shares::State::new(),
            activity: activity::State::new(),
            account: account::State::new(),
            notifications: notifications::Manager::new(),
        };

        app.gallery
            .set_default_save_dir(app.app_state.last_save_directory.clone());
        app.upload
            .set_default_open_dir(app.app_state.last_open_directory.clone());

        if let Some(warning) = config_warning {
            app.notifications.push(Notification::warning(warning));
        }
        if let Some(warning) = state_warning {
            app.notifications.push(Notification::warning(warning));
        }

        let boot_task = if app.api.has_token() {
            let api = app.api.clone();
            Task::perform(async move { api.me().await }, |result| {
                Message::SessionRestored(Box::new(result))
            })
        } else {
            Task::none()
        };

        (app, boot_task)
    }

    fn title(&self) -> String {
        if self.user.is_some() {
            format!("Photarium - {}", self.screen.title())
        } else {
            "Photarium".to_string()
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create(
            self.screen,
            self.user.is_some(),
            self.notifications.has_notifications(),
        )
    }
}
