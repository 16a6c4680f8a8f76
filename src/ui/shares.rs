// SPDX-License-Identifier: MPL-2.0
//! Shares screen: items shared with me, items I shared, and public links.

use crate::api::types::{Share, ShareKind, ShareLink, ShareLinkId, SharedContent};
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, scrollable, text_input, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Received,
    Sent,
    Links,
}

/// All three lists, fetched together on refresh.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub received: Vec<Share>,
    pub sent: Vec<Share>,
    pub links: Vec<ShareLink>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Box<Result<Listing, ApiError>>),
    TabSelected(Tab),
    DeleteLink(ShareLinkId),
    LinkDeleted {
        id: ShareLinkId,
        result: Result<(), ApiError>,
    },
    CopyLink(String),
    TokenInputChanged(String),
    ResolveToken,
    TokenResolved(Box<Result<SharedContent, ApiError>>),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
}

#[derive(Debug, Default)]
pub struct State {
    listing: Listing,
    tab: Tab,
    loading: bool,
    token_input: String,
    /// Content of the last resolved public token, shown under the input.
    resolved: Option<SharedContent>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        self.loading = true;
        let api = api.clone();
        Task::perform(
            async move {
                let received = api.shares_received().await?;
                let sent = api.shares_sent().await?;
                let links = api.list_share_links().await?;
                Ok(Listing {
                    received,
                    sent,
                    links,
                })
            },
            |result: Result<Listing, ApiError>| Message::Loaded(Box::new(result)),
        )
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::Refresh => (Event::None, self.load(api)),
            Message::Loaded(result) => {
                self.loading = false;
                match *result {
                    Ok(listing) => {
                        self.listing = listing;
                        (Event::None, Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::TabSelected(tab) => {
                self.tab = tab;
                (Event::None, Task::none())
            }
            Message::DeleteLink(id) => {
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.delete_share_link(id).await },
                        move |result| Message::LinkDeleted { id, result },
                    ),
                )
            }
            Message::LinkDeleted { id, result } => match result {
                Ok(()) => {
                    self.listing.links.retain(|link| link.id != id);
                    (
                        Event::Notify(Notification::success("Share link deleted")),
                        Task::none(),
                    )
                }
                Err(error) => (
                    Event::Notify(Notification::error(error.to_string())),
                    Task::none(),
                ),
            },
            Message::CopyLink(url) => {
                let notification = match arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(url.clone()))
                {
                    Ok(()) => Notification::success("Link copied to clipboard"),
                    Err(_) => Notification::info(format!("Share link: {url}")),
                };
                (Event::Notify(notification), Task::none())
            }
            Message::TokenInputChanged(value) => {
                self.token_input = value;
                (Event::None, Task::none())
            }
            Message::ResolveToken => {
                // Accepts a bare token or a full share URL.
                let token = self
                    .token_input
                    .trim()
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                if token.is_empty() {
                    return (Event::None, Task::none());
                }
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.resolve_share_token(&token).await },
                        |result| Message::TokenResolved(Box::new(result)),
                    ),
                )
            }
            Message::TokenResolved(result) => match *result {
                Ok(content) => {
                    self.resolved = Some(content);
                    (Event::None, Task::none())
                }
                Err(error) => {
                    self.resolved = None;
                    (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    )
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tab_button = |label: &'static str, tab: Tab| {
            let b = button(Text::new(label).size(typography::BODY))
                .on_press(Message::TabSelected(tab))
                .padding(spacing::XS);
            if self.tab == tab {
                b.style(styles::button::selected)
            } else {
                b.style(styles::button::quiet)
            }
        };

        let toolbar = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Sharing").size(typography::TITLE_SM))
            .push(tab_button("Shared with me", Tab::Received))
            .push(tab_button("Shared by me", Tab::Sent))
            .push(tab_button("Public links", Tab::Links))
            .push(Space::new().width(Length::Fill).height(Length::Shrink))
            .push(
                button(Text::new("Refresh").size(typography::BODY))
                    .on_press(Message::Refresh)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            );

        let body: Element<'_, Message> = if self.loading {
            Text::new("Loading...").size(typography::BODY_LG).into()
        } else {
            match self.tab {
                Tab::Received => self.view_shares(&self.listing.received, "Nothing shared with you yet"),
                Tab::Sent => self.view_shares(&self.listing.sent, "You have not shared anything yet"),
                Tab::Links => self.view_links(),
            }
        };

        Column::new()
            .spacing(spacing::MD)
            .padding(spacing::MD)
            .push(toolbar)
            .push(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_shares<'a>(&'a self, shares: &'a [Share], empty: &'static str) -> Element<'a, Message> {
        if shares.is_empty() {
            return Text::new(empty).size(typography::BODY_LG).into();
        }

        let mut list = Column::new().spacing(spacing::XS);
        for share in shares {
            let what = share
                .item
                .as_ref()
                .map(|item| item.label().to_string())
                .unwrap_or_else(|| "(removed item)".to_string());
            let who = share
                .counterpart
                .as_ref()
                .map(|user| user.name.clone())
                .unwrap_or_else(|| "someone".to_string());

            let mut row = Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(Text::new(what).size(typography::BODY))
                .push(Text::new(who).size(typography::BODY_SM));

            if let Some(message) = share.message.as_deref().filter(|m| !m.is_empty()) {
                row = row.push(Text::new(format!("\u{201C}{message}\u{201D}")).size(typography::BODY_SM));
            }
            if let Some(created) = share.created_at {
                row = row.push(Space::new().width(Length::Fill).height(Length::Shrink));
                row = row.push(
                    Text::new(created.format("%Y-%m-%d").to_string()).size(typography::CAPTION),
                );
            }

            list = list.push(
                Container::new(row)
                    .width(Length::Fill)
                    .padding(spacing::XS)
                    .style(styles::container::card),
            );
        }
        scrollable(list).height(Length::Fill).into()
    }

    fn view_links(&self) -> Element<'_, Message> {
        let mut list = Column::new().spacing(spacing::XS);

        // Paste box for opening someone else's public link.
        let mut resolve_row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                text_input("Paste a share link or token", &self.token_input)
                    .on_input(Message::TokenInputChanged)
                    .on_submit(Message::ResolveToken)
                    .padding(spacing::XS)
                    .width(Length::Fixed(sizing::FORM_WIDTH)),
            )
            .push(
                button(Text::new("Open").size(typography::BODY))
                    .on_press(Message::ResolveToken)
                    .padding(spacing::XS)
                    .style(styles::button::primary),
            );
        if let Some(content) = &self.resolved {
            let kind = match content.kind {
                ShareKind::Photo => "Photo",
                ShareKind::Album => "Album",
            };
            resolve_row = resolve_row.push(
                Text::new(format!("{kind}: {}", content.item.label())).size(typography::BODY),
            );
        }
        list = list.push(resolve_row);

        if self.listing.links.is_empty() {
            return list
                .push(
                    Text::new("No public links. Create one from the photo viewer.")
                        .size(typography::BODY_LG),
                )
                .into();
        }
        for link in &self.listing.links {
            let label = link
                .item
                .as_ref()
                .map(|item| item.label().to_string())
                .unwrap_or_else(|| link.token.clone());
            let status = if link.is_expired {
                "expired".to_string()
            } else {
                match link.expires_at {
                    Some(at) => format!("expires {}", at.format("%Y-%m-%d")),
                    None => "never expires".to_string(),
                }
            };

            let mut row = Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(Text::new(label).size(typography::BODY))
                .push(Text::new(status).size(typography::BODY_SM))
                .push(Space::new().width(Length::Fill).height(Length::Shrink));

            if let Some(url) = &link.url {
                row = row.push(
                    button(Text::new("Copy").size(typography::BODY_SM))
                        .on_press(Message::CopyLink(url.clone()))
                        .padding(spacing::XXS)
                        .style(styles::button::quiet),
                );
            }
            row = row.push(
                button(Text::new("Delete").size(typography::BODY_SM))
                    .on_press(Message::DeleteLink(link.id))
                    .padding(spacing::XXS)
                    .style(styles::button::danger),
            );

            list = list.push(
                Container::new(row)
                    .width(Length::Fill)
                    .padding(spacing::XS)
                    .style(styles::container::card),
            );
        }
        scrollable(list).height(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn link(id: ShareLinkId) -> ShareLink {
        ShareLink {
            id,
            token: format!("token-{id}"),
            url: Some(format!("https://photos.example.com/share/token-{id}")),
            kind: None,
            item: None,
            expires_at: None,
            is_expired: false,
            created_at: None,
        }
    }

    #[test]
    fn loaded_listing_replaces_state() {
        let mut state = State::new();
        let listing = Listing {
            links: vec![link(1), link(2)],
            ..Listing::default()
        };
        let _ = state.update(Message::Loaded(Box::new(Ok(listing))), &api());
        assert_eq!(state.listing().links.len(), 2);
    }

    #[test]
    fn deleted_link_is_removed_locally() {
        let mut state = State::new();
        state.listing.links = vec![link(1), link(2)];

        let _ = state.update(
            Message::LinkDeleted {
                id: 1,
                result: Ok(()),
            },
            &api(),
        );
        assert_eq!(state.listing().links.len(), 1);
        assert_eq!(state.listing().links[0].id, 2);
    }

    #[test]
    fn failed_delete_keeps_the_link() {
        let mut state = State::new();
        state.listing.links = vec![link(1)];

        let (event, _) = state.update(
            Message::LinkDeleted {
                id: 1,
                result: Err(ApiError::Network("down".into())),
            },
            &api(),
        );
        assert!(matches!(event, Event::Notify(_)));
        assert_eq!(state.listing().links.len(), 1);
    }

    #[test]
    fn tab_selection_is_sticky() {
        let mut state = State::new();
        let _ = state.update(Message::TabSelected(Tab::Links), &api());
        assert_eq!(state.tab, Tab::Links);
    }

    #[test]
    fn failed_token_resolution_clears_previous_result() {
        let mut state = State::new();
        let _ = state.update(
            Message::TokenInputChanged("https://photos.example.com/share/abc".into()),
            &api(),
        );
        let (event, _) = state.update(
            Message::TokenResolved(Box::new(Err(ApiError::Rejected {
                status: 404,
                message: "Share link not found".into(),
            }))),
            &api(),
        );
        assert!(matches!(event, Event::Notify(_)));
        assert!(state.resolved.is_none());
    }

    #[test]
    fn blank_token_is_not_resolved() {
        let mut state = State::new();
        let _ = state.update(Message::TokenInputChanged("   ".into()), &api());
        let (event, _task) = state.update(Message::ResolveToken, &api());
        assert!(matches!(event, Event::None));
    }
}
