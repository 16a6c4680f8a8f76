// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are routed by the current screen: grid screens receive
//! keyboard events for the viewer bindings, the upload screen receives file
//! drops and the paste shortcut. Timers only run while they have something
//! to do (toast auto-dismiss, unread-badge polling).

use super::{Message, Screen};
use crate::config::DEFAULT_NOTICE_POLL_SECS;
use crate::ui::notifications::NotificationMessage;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Builds the subscription set for the current application state.
pub fn create(
    screen: Screen,
    signed_in: bool,
    has_notifications: bool,
) -> Subscription<Message> {
    let mut subscriptions = vec![create_event_subscription(screen)];

    // Toast auto-dismiss only needs ticks while toasts are showing.
    if has_notifications {
        subscriptions.push(
            time::every(Duration::from_millis(200))
                .map(|_| Message::Notification(NotificationMessage::Tick)),
        );
    }

    if signed_in {
        subscriptions.push(
            time::every(Duration::from_secs(DEFAULT_NOTICE_POLL_SECS))
                .map(|_| Message::RefreshUnread),
        );
    }

    Subscription::batch(subscriptions)
}

fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    // `listen_with` in iced 0.14 requires a non-capturing `fn`, so the current
    // screen is threaded in via `.with(screen)` and the routing happens in a
    // non-capturing `filter_map`.
    event::listen_with(|event, status, _window| Some((event, status)))
        .with(screen)
        .filter_map(|(screen, (event, status))| {
            // File drops are only meaningful on the upload screen.
            if let iced::Event::Window(window::Event::FileDropped(path)) = &event {
                if screen == Screen::Upload {
                    return Some(Message::FileDropped(path.clone()));
                }
                return None;
            }

            if let iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Character(ref c),
                modifiers,
                ..
            }) = event
            {
                if screen == Screen::Upload && c.as_str() == "v" && modifiers.command() {
                    return Some(Message::PasteRequested);
                }
            }

            // Grid screens consume keyboard events for the viewer bindings,
            // but only those no focused widget claimed.
            if screen.is_gallery() {
                if let iced::Event::Keyboard(..) = &event {
                    return match status {
                        event::Status::Ignored => Some(Message::RawEvent(event.clone())),
                        event::Status::Captured => None,
                    };
                }
            }

            None
        })
}
