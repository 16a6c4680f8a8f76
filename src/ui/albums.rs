// SPDX-License-Identifier: MPL-2.0
//! Album list screen: create, rename, delete, and auto-generation.
//!
//! Opening an album hands off to the gallery with the album collection; the
//! membership itself is edited from the grid's "Add to album" bulk action.

use crate::api::types::{Album, AlbumId, AutoAlbumOutcome};
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, scrollable, text_input, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Task};

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Result<Vec<Album>, ApiError>),
    NameChanged(String),
    Create,
    Created(Result<Album, ApiError>),
    RenameStarted(AlbumId),
    RenameChanged(String),
    RenameSubmitted,
    Renamed {
        id: AlbumId,
        name: String,
        result: Result<(), ApiError>,
    },
    Delete(AlbumId),
    Deleted {
        id: AlbumId,
        result: Result<(), ApiError>,
    },
    AutoCreate,
    AutoCreated(Result<AutoAlbumOutcome, ApiError>),
    Open(AlbumId),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
    /// Navigate to the album's photo grid.
    OpenAlbum(AlbumId),
}

#[derive(Debug, Default)]
pub struct State {
    albums: Vec<Album>,
    loading: bool,
    name_input: String,
    rename: Option<(AlbumId, String)>,
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        self.loading = true;
        let api = api.clone();
        Task::perform(async move { api.list_albums().await }, Message::Loaded)
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::Refresh => (Event::None, self.load(api)),
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(albums) => {
                        self.albums = albums;
                        (Event::None, Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::NameChanged(value) => {
                self.name_input = value;
                (Event::None, Task::none())
            }
            Message::Create => {
                let name = self.name_input.trim().to_string();
                if name.is_empty() {
                    return (
                        Event::Notify(Notification::warning("Album name is required")),
                        Task::none(),
                    );
                }
                self.busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.create_album(&name, &[]).await },
                        Message::Created,
                    ),
                )
            }
            Message::Created(result) => {
                self.busy = false;
                match result {
                    Ok(album) => {
                        self.name_input.clear();
                        let name = album.name.clone();
                        self.albums.insert(0, album);
                        (
                            Event::Notify(Notification::success(format!("Created \"{name}\""))),
                            Task::none(),
                        )
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::RenameStarted(id) => {
                let current = self
                    .albums
                    .iter()
                    .find(|album| album.id == id)
                    .map(|album| album.name.clone())
                    .unwrap_or_default();
                self.rename = Some((id, current));
                (Event::None, Task::none())
            }
            Message::RenameChanged(value) => {
                if let Some((_, name)) = &mut self.rename {
                    *name = value;
                }
                (Event::None, Task::none())
            }
            Message::RenameSubmitted => {
                let Some((id, name)) = self.rename.take() else {
                    return (Event::None, Task::none());
                };
                let name = name.trim().to_string();
                if name.is_empty() {
                    return (
                        Event::Notify(Notification::warning("Album name is required")),
                        Task::none(),
                    );
                }
                let api = api.clone();
                let sent = name.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.rename_album(id, &sent).await },
                        move |result| Message::Renamed {
                            id,
                            name: name.clone(),
                            result,
                        },
                    ),
                )
            }
            Message::Renamed { id, name, result } => match result {
                Ok(()) => {
                    if let Some(album) = self.albums.iter_mut().find(|album| album.id == id) {
                        album.name = name;
                    }
                    (Event::None, Task::none())
                }
                Err(error) => (
                    Event::Notify(Notification::error(error.to_string())),
                    Task::none(),
                ),
            },
            Message::Delete(id) => {
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(async move { api.delete_album(id).await }, move |result| {
                        Message::Deleted { id, result }
                    }),
                )
            }
            Message::Deleted { id, result } => match result {
                Ok(()) => {
                    self.albums.retain(|album| album.id != id);
                    (
                        Event::Notify(Notification::success("Album deleted")),
                        Task::none(),
                    )
                }
                Err(error) => (
                    Event::Notify(Notification::error(error.to_string())),
                    Task::none(),
                ),
            },
            Message::AutoCreate => {
                self.busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.auto_create_albums(None).await },
                        Message::AutoCreated,
                    ),
                )
            }
            Message::AutoCreated(result) => {
                self.busy = false;
                match result {
                    Ok(outcome) => (
                        Event::Notify(Notification::success(format!(
                            "Auto-albums: {} created, {} updated",
                            outcome.created, outcome.updated
                        ))),
                        self.load(api),
                    ),
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::Open(id) => (Event::OpenAlbum(id), Task::none()),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut page = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::MD)
            .push(self.view_toolbar());

        let body: Element<'_, Message> = if self.loading && self.albums.is_empty() {
            Text::new("Loading albums...").size(typography::BODY_LG).into()
        } else if self.albums.is_empty() {
            Text::new("No albums yet. Create one above.")
                .size(typography::BODY_LG)
                .into()
        } else {
            let mut list = Column::new().spacing(spacing::XS);
            for album in &self.albums {
                list = list.push(self.view_album_row(album));
            }
            scrollable(list).height(Length::Fill).into()
        };
        page = page.push(body);

        page.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_toolbar(&self) -> Element<'_, Message> {
        let mut create = button(Text::new("Create").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::primary);
        let mut auto = button(Text::new("Auto-albums by date").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::quiet);
        if !self.busy {
            create = create.on_press(Message::Create);
            auto = auto.on_press(Message::AutoCreate);
        }

        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("Albums").size(typography::TITLE_SM))
            .push(
                text_input("New album name", &self.name_input)
                    .on_input(Message::NameChanged)
                    .on_submit(Message::Create)
                    .padding(spacing::XS)
                    .width(Length::Fixed(sizing::FORM_WIDTH)),
            )
            .push(create)
            .push(Space::new().width(Length::Fill).height(Length::Shrink))
            .push(auto)
            .push(
                button(Text::new("Refresh").size(typography::BODY))
                    .on_press(Message::Refresh)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            )
            .into()
    }

    fn view_album_row<'a>(&'a self, album: &'a Album) -> Element<'a, Message> {
        let renaming = self
            .rename
            .as_ref()
            .filter(|(id, _)| *id == album.id)
            .map(|(_, name)| name.clone());

        let title: Element<'_, Message> = match renaming {
            Some(name) => text_input("Album name", &name)
                .on_input(Message::RenameChanged)
                .on_submit(Message::RenameSubmitted)
                .padding(spacing::XXS)
                .width(Length::Fixed(sizing::FORM_WIDTH))
                .into(),
            None => Text::new(album.name.clone()).size(typography::BODY_LG).into(),
        };

        let row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                button(title)
                    .on_press(Message::Open(album.id))
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            )
            .push(
                Text::new(format!("{} photos", album.photos_count)).size(typography::BODY_SM),
            )
            .push(Space::new().width(Length::Fill).height(Length::Shrink))
            .push(
                button(Text::new("Rename").size(typography::BODY_SM))
                    .on_press(Message::RenameStarted(album.id))
                    .padding(spacing::XXS)
                    .style(styles::button::quiet),
            )
            .push(
                button(Text::new("Delete").size(typography::BODY_SM))
                    .on_press(Message::Delete(album.id))
                    .padding(spacing::XXS)
                    .style(styles::button::danger),
            );

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

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn album(id: AlbumId, name: &str) -> Album {
        Album {
            id,
            name: name.into(),
            cover_photo: None,
            photos_count: 0,
            photos: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn create_with_empty_name_is_rejected_locally() {
        let mut state = State::new();
        let (event, _) = state.update(Message::Create, &api());
        assert!(matches!(event, Event::Notify(_)));
        assert!(!state.busy);
    }

    #[test]
    fn created_album_is_prepended() {
        let mut state = State::new();
        state.albums.push(album(1, "Old"));

        let (event, _) = state.update(Message::Created(Ok(album(2, "New"))), &api());
        assert!(matches!(event, Event::Notify(_)));
        assert_eq!(state.albums()[0].name, "New");
        assert_eq!(state.albums().len(), 2);
    }

    #[test]
    fn deleted_album_is_removed_from_list() {
        let mut state = State::new();
        state.albums.push(album(1, "Holiday"));

        let _ = state.update(Message::Deleted { id: 1, result: Ok(()) }, &api());
        assert!(state.albums().is_empty());
    }

    #[test]
    fn rename_updates_the_row_on_success() {
        let mut state = State::new();
        state.albums.push(album(5, "Before"));

        let _ = state.update(
            Message::Renamed {
                id: 5,
                name: "After".into(),
                result: Ok(()),
            },
            &api(),
        );
        assert_eq!(state.albums()[0].name, "After");
    }

    #[test]
    fn open_emits_navigation_event() {
        let mut state = State::new();
        let (event, _) = state.update(Message::Open(9), &api());
        assert!(matches!(event, Event::OpenAlbum(9)));
    }
}
