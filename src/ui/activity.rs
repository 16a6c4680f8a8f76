// SPDX-License-Identifier: MPL-2.0
//! Activity feed: server-side notices (friend requests, received shares).

use crate::api::types::{Notice, NoticeId};
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Task};

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Result<Vec<Notice>, ApiError>),
    MarkRead(NoticeId),
    MarkedRead {
        id: NoticeId,
        result: Result<(), ApiError>,
    },
    MarkAllRead,
    AllMarkedRead(Result<(), ApiError>),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
    /// Read states changed; the root refreshes the unread badge.
    UnreadChanged,
}

#[derive(Debug, Default)]
pub struct State {
    notices: Vec<Notice>,
    loading: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        self.loading = true;
        let api = api.clone();
        Task::perform(async move { api.list_notices().await }, Message::Loaded)
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::Refresh => (Event::None, self.load(api)),
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(notices) => {
                        self.notices = notices;
                        (Event::None, Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::MarkRead(id) => {
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.mark_notice_read(id).await },
                        move |result| Message::MarkedRead { id, result },
                    ),
                )
            }
            Message::MarkedRead { id, result } => match result {
                Ok(()) => {
                    if let Some(notice) = self.notices.iter_mut().find(|notice| notice.id == id) {
                        notice.read_at = Some(chrono::Utc::now());
                    }
                    (Event::UnreadChanged, Task::none())
                }
                Err(error) => (
                    Event::Notify(Notification::error(error.to_string())),
                    Task::none(),
                ),
            },
            Message::MarkAllRead => {
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.mark_all_notices_read().await },
                        Message::AllMarkedRead,
                    ),
                )
            }
            Message::AllMarkedRead(result) => match result {
                Ok(()) => {
                    let now = chrono::Utc::now();
                    for notice in &mut self.notices {
                        if notice.read_at.is_none() {
                            notice.read_at = Some(now);
                        }
                    }
                    (Event::UnreadChanged, Task::none())
                }
                Err(error) => (
                    Event::Notify(Notification::error(error.to_string())),
                    Task::none(),
                ),
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Activity").size(typography::TITLE_SM))
            .push(Space::new().width(Length::Fill).height(Length::Shrink))
            .push(
                button(Text::new("Mark all read").size(typography::BODY))
                    .on_press(Message::MarkAllRead)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            )
            .push(
                button(Text::new("Refresh").size(typography::BODY))
                    .on_press(Message::Refresh)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            );

        let body: Element<'_, Message> = if self.loading && self.notices.is_empty() {
            Text::new("Loading...").size(typography::BODY_LG).into()
        } else if self.notices.is_empty() {
            Text::new("Nothing new").size(typography::BODY_LG).into()
        } else {
            let mut list = Column::new().spacing(spacing::XS);
            for notice in &self.notices {
                let mut row = Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center);

                if !notice.is_read() {
                    row = row.push(Text::new("\u{25CF}").size(typography::BODY_SM));
                }
                row = row.push(Text::new(notice.summary()).size(typography::BODY));
                if let Some(created) = notice.created_at {
                    row = row.push(Space::new().width(Length::Fill).height(Length::Shrink));
                    row = row.push(
                        Text::new(created.format("%Y-%m-%d %H:%M").to_string())
                            .size(typography::CAPTION),
                    );
                }
                if !notice.is_read() {
                    row = row.push(
                        button(Text::new("Mark read").size(typography::BODY_SM))
                            .on_press(Message::MarkRead(notice.id))
                            .padding(spacing::XXS)
                            .style(styles::button::quiet),
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn notice(id: NoticeId, read: bool) -> Notice {
        Notice {
            id,
            kind: "share_received".into(),
            data: json!({}),
            read_at: read.then(chrono::Utc::now),
            created_at: None,
        }
    }

    #[test]
    fn mark_read_updates_only_that_notice() {
        let mut state = State::new();
        state.notices = vec![notice(1, false), notice(2, false)];

        let (event, _) = state.update(
            Message::MarkedRead {
                id: 1,
                result: Ok(()),
            },
            &api(),
        );

        assert!(matches!(event, Event::UnreadChanged));
        assert!(state.notices()[0].is_read());
        assert!(!state.notices()[1].is_read());
    }

    #[test]
    fn mark_all_read_updates_every_notice() {
        let mut state = State::new();
        state.notices = vec![notice(1, false), notice(2, true), notice(3, false)];

        let (event, _) = state.update(Message::AllMarkedRead(Ok(())), &api());

        assert!(matches!(event, Event::UnreadChanged));
        assert!(state.notices().iter().all(Notice::is_read));
    }

    #[test]
    fn failed_mark_read_leaves_notice_unread() {
        let mut state = State::new();
        state.notices = vec![notice(1, false)];

        let (event, _) = state.update(
            Message::MarkedRead {
                id: 1,
                result: Err(ApiError::Network("down".into())),
            },
            &api(),
        );

        assert!(matches!(event, Event::Notify(_)));
        assert!(!state.notices()[0].is_read());
    }
}
