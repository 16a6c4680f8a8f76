// SPDX-License-Identifier: MPL-2.0
//! Top-level update loop: forwards component messages and applies their
//! events to the application root.

use super::{App, Message, Screen};
use crate::ui::gallery;
use crate::ui::notifications::Notification;
use crate::ui::{account, activity, albums, auth, friends, navbar, shares, upload_screen};
use iced::Task;
use std::path::PathBuf;

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Auth(message) => {
            let (event, task) = app.auth.update(message, &app.api);
            let follow_up = match event {
                auth::Event::None => Task::none(),
                auth::Event::Notify(notification) => {
                    app.notifications.push(notification);
                    Task::none()
                }
                auth::Event::SignedIn(session) => on_signed_in(app, *session),
            };
            Task::batch([task.map(Message::Auth), follow_up])
        }
        Message::Gallery(message) => {
            let (event, task) = app.gallery.update(message, &app.api);
            match event {
                gallery::Event::None => {}
                gallery::Event::Notify(notification) => app.notifications.push(notification),
                gallery::Event::DownloadSaved(path) => {
                    app.notifications
                        .push(Notification::success(format!("Saved to {}", path.display())));
                    app.app_state.last_save_directory = path.parent().map(PathBuf::from);
                    app.gallery
                        .set_default_save_dir(app.app_state.last_save_directory.clone());
                    persist_state(app);
                }
            }
            task.map(Message::Gallery)
        }
        Message::Albums(message) => {
            let (event, task) = app.albums.update(message, &app.api);
            let follow_up = match event {
                albums::Event::None => Task::none(),
                albums::Event::Notify(notification) => {
                    app.notifications.push(notification);
                    Task::none()
                }
                albums::Event::OpenAlbum(id) => navigate(app, Screen::Album(id)),
            };
            Task::batch([task.map(Message::Albums), follow_up])
        }
        Message::Upload(message) => {
            let (event, task) = app.upload.update(message, &app.api);
            let follow_up = match event {
                upload_screen::Event::None => Task::none(),
                upload_screen::Event::Notify(notification) => {
                    app.notifications.push(notification);
                    Task::none()
                }
                upload_screen::Event::BatchUploaded(outcome) => {
                    app.notifications
                        .push(Notification::success(outcome.summary_message()));
                    navigate(app, Screen::Photos)
                }
                upload_screen::Event::PickedFrom(dir) => {
                    app.app_state.last_open_directory = Some(dir);
                    app.upload
                        .set_default_open_dir(app.app_state.last_open_directory.clone());
                    persist_state(app);
                    Task::none()
                }
            };
            Task::batch([task.map(Message::Upload), follow_up])
        }
        Message::Friends(message) => {
            let (event, task) = app.friends.update(message, &app.api);
            if let friends::Event::Notify(notification) = event {
                app.notifications.push(notification);
            }
            task.map(Message::Friends)
        }
        Message::Shares(message) => {
            let (event, task) = app.shares.update(message, &app.api);
            if let shares::Event::Notify(notification) = event {
                app.notifications.push(notification);
            }
            task.map(Message::Shares)
        }
        Message::Activity(message) => {
            let (event, task) = app.activity.update(message, &app.api);
            let follow_up = match event {
                activity::Event::None => Task::none(),
                activity::Event::Notify(notification) => {
                    app.notifications.push(notification);
                    Task::none()
                }
                activity::Event::UnreadChanged => refresh_unread(app),
            };
            Task::batch([task.map(Message::Activity), follow_up])
        }
        Message::Account(message) => {
            let (event, task) = app.account.update(message, &app.api);
            let follow_up = match event {
                account::Event::None => Task::none(),
                account::Event::Notify(notification) => {
                    app.notifications.push(notification);
                    Task::none()
                }
                account::Event::ProfileUpdated(user) => {
                    app.notifications
                        .push(Notification::success("Profile updated"));
                    app.user = Some(*user);
                    Task::none()
                }
                account::Event::LogoutRequested => on_logout(app),
            };
            Task::batch([task.map(Message::Account), follow_up])
        }
        Message::Navbar(navbar::Message::Navigate(screen)) => navigate(app, screen),
        Message::Notification(message) => {
            app.notifications.handle_message(&message);
            Task::none()
        }
        Message::SessionRestored(result) => match *result {
            Ok(user) => {
                app.account.set_user(&user);
                app.user = Some(user);
                Task::batch([navigate(app, Screen::Photos), refresh_unread(app)])
            }
            Err(error) => {
                // The token stays on disk; the server may only be unreachable.
                let notification = if error.is_unauthorized() {
                    Notification::info("Session expired, please sign in again")
                } else {
                    Notification::warning(error.to_string())
                };
                app.notifications.push(notification);
                Task::none()
            }
        },
        Message::LogoutAcknowledged(_) => {
            // Best-effort server-side revocation; the local session is
            // already gone either way.
            Task::none()
        }
        Message::RefreshUnread => refresh_unread(app),
        Message::UnreadCountLoaded(result) => {
            if let Ok(count) = result {
                app.unread_notices = count;
            }
            Task::none()
        }
        Message::FileDropped(path) => {
            if app.screen == Screen::Upload {
                return update(
                    app,
                    Message::Upload(upload_screen::Message::FilesDropped(vec![path])),
                );
            }
            Task::none()
        }
        Message::PasteRequested => {
            let text = arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.get_text())
                .unwrap_or_default();
            if text.is_empty() {
                return Task::none();
            }
            update(
                app,
                Message::Upload(upload_screen::Message::ClipboardPasted(text)),
            )
        }
        Message::RawEvent(event) => {
            update(app, Message::Gallery(gallery::Message::RawEvent(event)))
        }
    }
}

/// Applies a successful sign-in: token storage, profile, first load.
fn on_signed_in(app: &mut App, session: crate::api::types::AuthSession) -> Task<Message> {
    app.api.set_token(session.token.clone());
    app.app_state.auth_token = Some(session.token);
    persist_state(app);

    app.account.set_user(&session.user);
    app.notifications
        .push(Notification::success(format!("Welcome, {}", session.user.name)));
    app.user = Some(session.user);

    Task::batch([navigate(app, Screen::Photos), refresh_unread(app)])
}

/// Clears the local session and revokes the token server-side.
fn on_logout(app: &mut App) -> Task<Message> {
    let api_for_revocation = app.api.clone();

    app.api.clear_token();
    app.app_state.auth_token = None;
    persist_state(app);

    app.user = None;
    app.unread_notices = 0;
    app.screen = Screen::Photos;
    app.notifications.push(Notification::info("Signed out"));

    Task::perform(
        async move { api_for_revocation.logout().await },
        Message::LogoutAcknowledged,
    )
}

/// Switches screens and kicks off the target screen's load.
fn navigate(app: &mut App, screen: Screen) -> Task<Message> {
    app.screen = screen;

    if let Some(collection) = screen.collection() {
        let (_, task) = app
            .gallery
            .update(gallery::Message::SetCollection(collection), &app.api);
        return task.map(Message::Gallery);
    }

    match screen {
        Screen::Albums => app.albums.load(&app.api).map(Message::Albums),
        Screen::Upload => Task::none(),
        Screen::Friends => app.friends.load(&app.api).map(Message::Friends),
        Screen::Shares => app.shares.load(&app.api).map(Message::Shares),
        Screen::Activity => app.activity.load(&app.api).map(Message::Activity),
        Screen::Account => {
            if let Some(user) = &app.user {
                app.account.set_user(user);
            }
            app.account.load(&app.api).map(Message::Account)
        }
        // Gallery screens were handled above.
        _ => Task::none(),
    }
}

fn refresh_unread(app: &App) -> Task<Message> {
    if app.user.is_none() {
        return Task::none();
    }
    let api = app.api.clone();
    Task::perform(
        async move { api.unread_notice_count().await },
        Message::UnreadCountLoaded,
    )
}

fn persist_state(app: &App) {
    if let Err(error) = app.app_state.save() {
        eprintln!("Failed to save session state: {error}");
    }
}
