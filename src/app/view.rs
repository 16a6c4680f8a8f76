// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the auth screen until a session exists, then the navbar plus the
//! active screen. Toasts overlay everything.

use super::{App, Message, Screen};
use crate::ui::gallery;
use crate::ui::navbar;
use crate::ui::notifications::Toast;
use iced::widget::{Column, Stack};
use iced::{Element, Length};

pub fn view(app: &App) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &app.user {
        None => app.auth.view().map(Message::Auth),
        Some(user) => {
            let navbar_view = navbar::view(navbar::ViewContext {
                active: app.screen,
                unread_notices: app.unread_notices,
                user_name: Some(user.name.as_str()),
            })
            .map(Message::Navbar);

            let screen_view: Element<'_, Message> = match app.screen {
                Screen::Photos
                | Screen::Videos
                | Screen::Favorites
                | Screen::Trash
                | Screen::Album(_) => app
                    .gallery
                    .view(&gallery::ViewContext {
                        tile_px: app.config.grid_tile_px(),
                    })
                    .map(Message::Gallery),
                Screen::Albums => app.albums.view().map(Message::Albums),
                Screen::Upload => app.upload.view().map(Message::Upload),
                Screen::Friends => app.friends.view().map(Message::Friends),
                Screen::Shares => app.shares.view().map(Message::Shares),
                Screen::Activity => app.activity.view().map(Message::Activity),
                Screen::Account => app.account.view().map(Message::Account),
            };

            Column::new()
                .push(navbar_view)
                .push(screen_view)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    };

    let toasts = Toast::view_overlay(&app.notifications).map(Message::Notification);

    Stack::new()
        .push(content)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
