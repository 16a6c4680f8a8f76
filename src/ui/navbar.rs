// SPDX-License-Identifier: MPL-2.0
//! Top navigation bar: screen tabs, the unread-activity badge, and the
//! signed-in account shortcut.

use crate::app::Screen;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub active: Screen,
    pub unread_notices: u32,
    pub user_name: Option<&'a str>,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Screen),
}

/// Tabs shown left-to-right. Album detail is reachable from the albums
/// screen only, so it has no tab; its presence highlights the Albums tab.
const TABS: &[(&str, Screen)] = &[
    ("Photos", Screen::Photos),
    ("Videos", Screen::Videos),
    ("Favorites", Screen::Favorites),
    ("Albums", Screen::Albums),
    ("Upload", Screen::Upload),
    ("Friends", Screen::Friends),
    ("Sharing", Screen::Shares),
    ("Trash", Screen::Trash),
];

fn is_active(tab: Screen, current: Screen) -> bool {
    match (tab, current) {
        (Screen::Albums, Screen::Album(_)) => true,
        (tab, current) => tab == current,
    }
}

/// Render the navigation bar.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut row = Row::new()
        .spacing(spacing::XS)
        .padding(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new("Photarium").size(typography::TITLE_MD));

    for (label, screen) in TABS {
        let tab = button(Text::new(*label).size(typography::BODY))
            .on_press(Message::Navigate(*screen))
            .padding([spacing::XXS, spacing::XS]);
        row = row.push(if is_active(*screen, ctx.active) {
            tab.style(styles::button::selected)
        } else {
            tab.style(styles::button::quiet)
        });
    }

    row = row.push(Space::new().width(Length::Fill).height(Length::Shrink));

    let activity_label = if ctx.unread_notices > 0 {
        format!("Activity ({})", ctx.unread_notices)
    } else {
        "Activity".to_string()
    };
    let activity = button(Text::new(activity_label).size(typography::BODY))
        .on_press(Message::Navigate(Screen::Activity))
        .padding([spacing::XXS, spacing::XS]);
    row = row.push(if is_active(Screen::Activity, ctx.active) {
        activity.style(styles::button::selected)
    } else {
        activity.style(styles::button::quiet)
    });

    let account_label = ctx.user_name.unwrap_or("Account").to_string();
    let account = button(Text::new(account_label).size(typography::BODY))
        .on_press(Message::Navigate(Screen::Account))
        .padding([spacing::XXS, spacing::XS]);
    row = row.push(if is_active(Screen::Account, ctx.active) {
        account.style(styles::button::selected)
    } else {
        account.style(styles::button::quiet)
    });

    Container::new(row)
        .width(Length::Fill)
        .style(styles::container::toolbar)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_detail_highlights_albums_tab() {
        assert!(is_active(Screen::Albums, Screen::Album(3)));
        assert!(!is_active(Screen::Photos, Screen::Album(3)));
    }

    #[test]
    fn exact_screens_match_their_own_tab() {
        assert!(is_active(Screen::Trash, Screen::Trash));
        assert!(!is_active(Screen::Trash, Screen::Photos));
    }

    #[test]
    fn navbar_view_renders() {
        let ctx = ViewContext {
            active: Screen::Photos,
            unread_notices: 2,
            user_name: Some("Mai"),
        };
        let _element = view(ctx);
    }
}
