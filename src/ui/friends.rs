// SPDX-License-Identifier: MPL-2.0
//! Friends screen: accepted friends plus incoming, outgoing, and blocked
//! relationship requests.

use crate::api::types::{FriendId, FriendsSummary};
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, scrollable, text_input, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Task};

/// One relationship mutation, named for its toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Reject,
    Cancel,
    Remove,
    Block,
    Unblock,
}

impl Action {
    fn done_message(self) -> &'static str {
        match self {
            Action::Accept => "Friend request accepted",
            Action::Reject => "Friend request rejected",
            Action::Cancel => "Friend request cancelled",
            Action::Remove => "Friend removed",
            Action::Block => "User blocked",
            Action::Unblock => "User unblocked",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Box<Result<FriendsSummary, ApiError>>),
    EmailChanged(String),
    SendRequest,
    RequestSent(Result<(), ApiError>),
    Accept(FriendId),
    Reject(FriendId),
    Cancel(FriendId),
    Remove(FriendId),
    Block(FriendId),
    Unblock(FriendId),
    ActionDone {
        action: Action,
        result: Result<(), ApiError>,
    },
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
}

#[derive(Debug, Default)]
pub struct State {
    summary: FriendsSummary,
    loading: bool,
    email_input: String,
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn summary(&self) -> &FriendsSummary {
        &self.summary
    }

    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        self.loading = true;
        let api = api.clone();
        Task::perform(async move { api.friends_summary().await }, |result| {
            Message::Loaded(Box::new(result))
        })
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::Refresh => (Event::None, self.load(api)),
            Message::Loaded(result) => {
                self.loading = false;
                match *result {
                    Ok(summary) => {
                        self.summary = summary;
                        (Event::None, Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::EmailChanged(value) => {
                self.email_input = value;
                (Event::None, Task::none())
            }
            Message::SendRequest => {
                let email = self.email_input.trim().to_string();
                if email.is_empty() || !email.contains('@') {
                    return (
                        Event::Notify(Notification::warning("Enter your friend's email address")),
                        Task::none(),
                    );
                }
                self.busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.send_friend_request(&email).await },
                        Message::RequestSent,
                    ),
                )
            }
            Message::RequestSent(result) => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        self.email_input.clear();
                        (
                            Event::Notify(Notification::success("Friend request sent")),
                            self.load(api),
                        )
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::Accept(id) => self.run_action(Action::Accept, id, api),
            Message::Reject(id) => self.run_action(Action::Reject, id, api),
            Message::Cancel(id) => self.run_action(Action::Cancel, id, api),
            Message::Remove(id) => self.run_action(Action::Remove, id, api),
            Message::Block(id) => self.run_action(Action::Block, id, api),
            Message::Unblock(id) => self.run_action(Action::Unblock, id, api),
            Message::ActionDone { action, result } => {
                self.busy = false;
                match result {
                    Ok(()) => (
                        Event::Notify(Notification::success(action.done_message())),
                        self.load(api),
                    ),
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
        }
    }

    fn run_action(&mut self, action: Action, id: FriendId, api: &ApiClient) -> (Event, Task<Message>) {
        if self.busy {
            return (Event::None, Task::none());
        }
        self.busy = true;
        let api = api.clone();
        (
            Event::None,
            Task::perform(
                async move {
                    match action {
                        Action::Accept => api.accept_friend_request(id).await,
                        Action::Reject => api.reject_friend_request(id).await,
                        Action::Cancel => api.cancel_friend_request(id).await,
                        Action::Remove => api.remove_friend(id).await,
                        Action::Block => api.block_friend(id).await,
                        Action::Unblock => api.unblock_friend(id).await,
                    }
                },
                move |result| Message::ActionDone { action, result },
            ),
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut page = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::MD)
            .push(self.view_toolbar());

        if self.loading {
            page = page.push(Text::new("Loading...").size(typography::BODY));
        }

        let mut sections = Column::new().spacing(spacing::LG);

        let mut friends = Column::new()
            .spacing(spacing::XS)
            .push(Text::new("Friends").size(typography::TITLE_SM));
        if self.summary.friends.is_empty() {
            friends = friends.push(Text::new("No friends yet").size(typography::BODY_SM));
        }
        for friend in &self.summary.friends {
            friends = friends.push(self.person_row(
                format!("{} <{}>", friend.name, friend.email),
                vec![
                    ("Remove", Message::Remove(friend.id), true),
                    ("Block", Message::Block(friend.id), true),
                ],
            ));
        }
        sections = sections.push(friends);

        let mut incoming = Column::new()
            .spacing(spacing::XS)
            .push(Text::new("Incoming requests").size(typography::TITLE_SM));
        if self.summary.incoming.is_empty() {
            incoming = incoming.push(Text::new("None").size(typography::BODY_SM));
        }
        for request in &self.summary.incoming {
            incoming = incoming.push(self.person_row(
                request
                    .counterpart
                    .as_ref()
                    .map(|user| format!("{} <{}>", user.name, user.email))
                    .unwrap_or_else(|| format!("Request #{}", request.id)),
                vec![
                    ("Accept", Message::Accept(request.id), false),
                    ("Reject", Message::Reject(request.id), true),
                ],
            ));
        }
        sections = sections.push(incoming);

        let mut outgoing = Column::new()
            .spacing(spacing::XS)
            .push(Text::new("Sent requests").size(typography::TITLE_SM));
        if self.summary.outgoing.is_empty() {
            outgoing = outgoing.push(Text::new("None").size(typography::BODY_SM));
        }
        for request in &self.summary.outgoing {
            outgoing = outgoing.push(self.person_row(
                request
                    .counterpart
                    .as_ref()
                    .map(|user| format!("{} <{}>", user.name, user.email))
                    .unwrap_or_else(|| format!("Request #{}", request.id)),
                vec![("Cancel", Message::Cancel(request.id), true)],
            ));
        }
        sections = sections.push(outgoing);

        let mut blocked = Column::new()
            .spacing(spacing::XS)
            .push(Text::new("Blocked").size(typography::TITLE_SM));
        if self.summary.blocked.is_empty() {
            blocked = blocked.push(Text::new("None").size(typography::BODY_SM));
        }
        for request in &self.summary.blocked {
            blocked = blocked.push(self.person_row(
                request
                    .counterpart
                    .as_ref()
                    .map(|user| format!("{} <{}>", user.name, user.email))
                    .unwrap_or_else(|| format!("User #{}", request.id)),
                vec![("Unblock", Message::Unblock(request.id), false)],
            ));
        }
        sections = sections.push(blocked);

        page = page.push(scrollable(sections).height(Length::Fill));
        page.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_toolbar(&self) -> Element<'_, Message> {
        let mut send = button(Text::new("Send request").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::primary);
        if !self.busy {
            send = send.on_press(Message::SendRequest);
        }

        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Friends").size(typography::TITLE_SM))
            .push(
                text_input("friend@example.com", &self.email_input)
                    .on_input(Message::EmailChanged)
                    .on_submit(Message::SendRequest)
                    .padding(spacing::XS)
                    .width(Length::Fixed(sizing::FORM_WIDTH)),
            )
            .push(send)
            .push(Space::new().width(Length::Fill).height(Length::Shrink))
            .push(
                button(Text::new("Refresh").size(typography::BODY))
                    .on_press(Message::Refresh)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            )
            .into()
    }

    fn person_row(
        &self,
        label: String,
        actions: Vec<(&'static str, Message, bool)>,
    ) -> Element<'_, Message> {
        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new(label).size(typography::BODY))
            .push(Space::new().width(Length::Fill).height(Length::Shrink));

        for (label, message, destructive) in actions {
            let mut b = button(Text::new(label).size(typography::BODY_SM)).padding(spacing::XXS);
            if !self.busy {
                b = b.on_press(message);
            }
            row = row.push(if destructive {
                b.style(styles::button::danger)
            } else {
                b.style(styles::button::quiet)
            });
        }

        Container::new(row)
            .width(Length::Fill)
            .padding(spacing::XS)
            .style(styles::container::card)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Friend;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    #[test]
    fn blank_email_is_rejected_before_any_request() {
        let mut state = State::new();
        let (event, _) = state.update(Message::SendRequest, &api());
        assert!(matches!(event, Event::Notify(_)));
        assert!(!state.busy);
    }

    #[test]
    fn summary_load_replaces_lists() {
        let mut state = State::new();
        let summary = FriendsSummary {
            friends: vec![Friend {
                id: 1,
                name: "Mai".into(),
                email: "mai@example.com".into(),
                avatar_path: None,
            }],
            ..FriendsSummary::default()
        };

        let _ = state.update(Message::Loaded(Box::new(Ok(summary))), &api());
        assert_eq!(state.summary().friends.len(), 1);
        assert!(!state.loading);
    }

    #[test]
    fn action_done_notifies_and_reloads() {
        let mut state = State::new();
        let (event, _task) = state.update(
            Message::ActionDone {
                action: Action::Accept,
                result: Ok(()),
            },
            &api(),
        );
        match event {
            Event::Notify(notification) => {
                assert!(notification.message().contains("accepted"));
            }
            _ => panic!("expected a notification"),
        }
        assert!(state.loading); // reload started
    }

    #[test]
    fn actions_are_serialized_while_busy() {
        let mut state = State::new();
        let _ = state.update(Message::Accept(1), &api());
        assert!(state.busy);

        // Second action while busy is dropped.
        let (event, _) = state.update(Message::Reject(2), &api());
        assert!(matches!(event, Event::None));
    }
}
