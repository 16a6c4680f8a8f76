// SPDX-License-Identifier: MPL-2.0
//! Photo grid screen: collections, selection mode, bulk actions, and the
//! full-screen viewer.
//!
//! One gallery state serves every photo collection (all photos, videos,
//! favorites, trash, album contents); switching collection reloads the list.
//! Collection loads carry a monotonically increasing generation number and
//! responses from a superseded load are discarded, so a stale response can
//! never clobber a newer collection.

use crate::api::types::{Album, AlbumId, Friend, FriendId, Photo, PhotoId, ShareKind};
use crate::api::{ApiClient, ApiError};
use crate::selection::{BulkOutcome, SelectionController};
use crate::thumbnail_cache::{self, ThumbnailCache};
use crate::ui::design_tokens::{border, radius, sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::ui::viewer;
use crate::viewer_navigation::ViewerNavigator;
use iced::widget::{
    button, image, mouse_area, scrollable, text_input, Column, Container, Row, Space, Stack, Text,
};
use iced::{alignment, keyboard, ContentFit, Element, Length, Task, Theme};
use std::collections::HashSet;
use std::path::PathBuf;

/// Which ordered list of photos the grid is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collection {
    #[default]
    All,
    Videos,
    Favorites,
    Trash,
    Album(AlbumId),
}

impl Collection {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Collection::All => "Photos",
            Collection::Videos => "Videos",
            Collection::Favorites => "Favorites",
            Collection::Trash => "Trash",
            Collection::Album(_) => "Album",
        }
    }

    #[must_use]
    pub fn is_trash(self) -> bool {
        matches!(self, Collection::Trash)
    }
}

/// One bulk operation over the selected IDs.
///
/// Executed sequentially, one single-item call per ID, with no atomicity:
/// a failure partway leaves earlier items mutated and is only surfaced in
/// the aggregate toast.
#[derive(Debug, Clone)]
enum BulkOp {
    Favorite,
    Trash,
    Restore,
    ForceDelete,
    AddToAlbum(AlbumId),
    Share { friends: Vec<FriendId>, message: String },
}

impl BulkOp {
    fn verb(&self) -> &'static str {
        match self {
            BulkOp::Favorite => "Favorited",
            BulkOp::Trash => "Trashed",
            BulkOp::Restore => "Restored",
            BulkOp::ForceDelete => "Deleted",
            BulkOp::AddToAlbum(_) => "Added",
            BulkOp::Share { .. } => "Shared",
        }
    }
}

/// Album chooser dialog backing the "Add to album" bulk action.
#[derive(Debug, Default)]
struct AlbumPicker {
    albums: Vec<Album>,
    loading: bool,
}

/// Friend chooser dialog backing the "Share" bulk action.
#[derive(Debug, Default)]
struct SharePicker {
    friends: Vec<Friend>,
    chosen: HashSet<FriendId>,
    message: String,
    loading: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    SetCollection(Collection),
    Refresh,
    Loaded {
        generation: u64,
        result: Result<Vec<Photo>, ApiError>,
    },
    SearchChanged(String),
    SearchSubmitted,
    ThumbnailLoaded {
        id: PhotoId,
        handle: Option<image::Handle>,
    },
    TileClicked(PhotoId),
    TileToggled(PhotoId),
    ClearSelection,
    BulkFavorite,
    BulkTrash,
    BulkRestore,
    BulkForceDelete,
    BulkFinished {
        verb: &'static str,
        outcome: BulkOutcome,
    },
    OpenAlbumPicker,
    AlbumPickerLoaded(Result<Vec<Album>, ApiError>),
    AlbumChosen(AlbumId),
    OpenSharePicker,
    SharePickerLoaded(Result<Vec<Friend>, ApiError>),
    ShareFriendToggled(FriendId),
    ShareMessageChanged(String),
    ShareSubmitted,
    DialogCancelled,
    Viewer(viewer::Message),
    FullImageLoaded {
        id: PhotoId,
        handle: Option<image::Handle>,
    },
    FavoriteToggled {
        id: PhotoId,
        result: Result<(), ApiError>,
    },
    PhotoTrashed {
        id: PhotoId,
        result: Result<(), ApiError>,
    },
    ShareLinkCreated(Result<String, ApiError>),
    DownloadPathChosen {
        id: PhotoId,
        path: Option<PathBuf>,
    },
    DownloadFinished {
        path: PathBuf,
        result: Result<(), ApiError>,
    },
    RawEvent(iced::Event),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
    /// A download completed; the root persists the directory for next time.
    DownloadSaved(PathBuf),
}

/// Context required to render the gallery.
pub struct ViewContext {
    /// Side length of one grid tile in logical pixels.
    pub tile_px: f32,
}

#[derive(Debug)]
pub struct State {
    collection: Collection,
    photos: Vec<Photo>,
    loading: bool,
    /// Monotonic load generation; responses tagged with an older value are
    /// stale and dropped.
    generation: u64,
    search: String,
    selection: SelectionController,
    navigator: ViewerNavigator,
    thumbnails: ThumbnailCache,
    /// Full-resolution image for the photo currently in the viewer.
    full_image: Option<(PhotoId, image::Handle)>,
    album_picker: Option<AlbumPicker>,
    share_picker: Option<SharePicker>,
    bulk_running: bool,
    viewer_busy: bool,
    default_save_dir: Option<PathBuf>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collection: Collection::All,
            photos: Vec::new(),
            loading: false,
            generation: 0,
            search: String::new(),
            selection: SelectionController::new(),
            navigator: ViewerNavigator::new(),
            thumbnails: ThumbnailCache::default(),
            full_image: None,
            album_picker: None,
            share_picker: None,
            bulk_running: false,
            viewer_busy: false,
            default_save_dir: None,
        }
    }

    #[must_use]
    pub fn collection(&self) -> Collection {
        self.collection
    }

    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    #[must_use]
    pub fn is_viewer_open(&self) -> bool {
        self.navigator.is_open()
    }

    /// Seeds the directory offered by download dialogs.
    pub fn set_default_save_dir(&mut self, dir: Option<PathBuf>) {
        self.default_save_dir = dir;
    }

    fn current_photo(&self) -> Option<&Photo> {
        self.navigator
            .current_index()
            .and_then(|index| self.photos.get(index))
    }

    /// Starts a (re)load of the current collection.
    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        self.loading = true;
        self.generation += 1;
        let generation = self.generation;
        let collection = self.collection;
        let search = self.search.trim().to_string();
        let api = api.clone();

        Task::perform(
            async move {
                match collection {
                    Collection::All => {
                        let params = crate::api::photos::PhotoListParams {
                            search: Some(search),
                            ..Default::default()
                        };
                        api.list_photos(&params).await
                    }
                    Collection::Videos => api.list_videos(None).await,
                    Collection::Favorites => api.favorite_photos().await,
                    Collection::Trash => api.trashed_photos().await,
                    Collection::Album(id) => api.get_album(id).await.map(|album| album.photos),
                }
            },
            move |result| Message::Loaded { generation, result },
        )
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::SetCollection(collection) => {
                if self.collection != collection {
                    self.collection = collection;
                    self.photos.clear();
                    self.selection.clear();
                    self.navigator.sync(0);
                    self.full_image = None;
                }
                (Event::None, self.load(api))
            }
            Message::Refresh => (Event::None, self.load(api)),
            Message::Loaded { generation, result } => self.on_loaded(generation, result, api),
            Message::SearchChanged(value) => {
                self.search = value;
                (Event::None, Task::none())
            }
            Message::SearchSubmitted => (Event::None, self.load(api)),
            Message::ThumbnailLoaded { id, handle } => {
                if let Some(handle) = handle {
                    self.thumbnails.insert(id, handle);
                }
                (Event::None, Task::none())
            }
            Message::TileClicked(id) => {
                if self.selection.is_active() {
                    self.selection.toggle(id);
                    (Event::None, Task::none())
                } else {
                    self.open_viewer(id, api)
                }
            }
            Message::TileToggled(id) => {
                self.selection.toggle(id);
                (Event::None, Task::none())
            }
            Message::ClearSelection => {
                self.selection.clear();
                (Event::None, Task::none())
            }
            Message::BulkFavorite => self.run_bulk(BulkOp::Favorite, api),
            Message::BulkTrash => self.run_bulk(BulkOp::Trash, api),
            Message::BulkRestore => self.run_bulk(BulkOp::Restore, api),
            Message::BulkForceDelete => self.run_bulk(BulkOp::ForceDelete, api),
            Message::BulkFinished { verb, outcome } => {
                self.bulk_running = false;
                self.selection.clear();
                let severity = if outcome.all_failed() {
                    Notification::error(outcome.message(verb))
                } else if outcome.failed > 0 {
                    Notification::warning(outcome.message(verb))
                } else {
                    Notification::success(outcome.message(verb))
                };
                (Event::Notify(severity), self.load(api))
            }
            Message::OpenAlbumPicker => {
                self.album_picker = Some(AlbumPicker {
                    albums: Vec::new(),
                    loading: true,
                });
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.list_albums().await },
                        Message::AlbumPickerLoaded,
                    ),
                )
            }
            Message::AlbumPickerLoaded(result) => {
                match (&mut self.album_picker, result) {
                    (Some(picker), Ok(albums)) => {
                        picker.albums = albums;
                        picker.loading = false;
                        (Event::None, Task::none())
                    }
                    (Some(_), Err(error)) => {
                        self.album_picker = None;
                        (
                            Event::Notify(Notification::error(error.to_string())),
                            Task::none(),
                        )
                    }
                    // Dialog already dismissed; drop the late response.
                    (None, _) => (Event::None, Task::none()),
                }
            }
            Message::AlbumChosen(album_id) => {
                self.album_picker = None;
                self.run_bulk(BulkOp::AddToAlbum(album_id), api)
            }
            Message::OpenSharePicker => {
                self.share_picker = Some(SharePicker {
                    loading: true,
                    ..SharePicker::default()
                });
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.friends_list().await },
                        Message::SharePickerLoaded,
                    ),
                )
            }
            Message::SharePickerLoaded(result) => {
                match (&mut self.share_picker, result) {
                    (Some(picker), Ok(friends)) => {
                        picker.friends = friends;
                        picker.loading = false;
                        (Event::None, Task::none())
                    }
                    (Some(_), Err(error)) => {
                        self.share_picker = None;
                        (
                            Event::Notify(Notification::error(error.to_string())),
                            Task::none(),
                        )
                    }
                    (None, _) => (Event::None, Task::none()),
                }
            }
            Message::ShareFriendToggled(id) => {
                if let Some(picker) = &mut self.share_picker {
                    if !picker.chosen.insert(id) {
                        picker.chosen.remove(&id);
                    }
                }
                (Event::None, Task::none())
            }
            Message::ShareMessageChanged(value) => {
                if let Some(picker) = &mut self.share_picker {
                    picker.message = value;
                }
                (Event::None, Task::none())
            }
            Message::ShareSubmitted => {
                let Some(picker) = self.share_picker.take() else {
                    return (Event::None, Task::none());
                };
                if picker.chosen.is_empty() {
                    self.share_picker = Some(picker);
                    return (
                        Event::Notify(Notification::warning("Choose at least one friend")),
                        Task::none(),
                    );
                }
                self.run_bulk(
                    BulkOp::Share {
                        friends: picker.chosen.into_iter().collect(),
                        message: picker.message,
                    },
                    api,
                )
            }
            Message::DialogCancelled => {
                self.album_picker = None;
                self.share_picker = None;
                (Event::None, Task::none())
            }
            Message::Viewer(message) => self.on_viewer_message(message, api),
            Message::FullImageLoaded { id, handle } => {
                if let Some(handle) = handle {
                    if self.current_photo().is_some_and(|photo| photo.id == id) {
                        self.full_image = Some((id, handle));
                    }
                }
                (Event::None, Task::none())
            }
            Message::FavoriteToggled { id, result } => {
                self.viewer_busy = false;
                match result {
                    Ok(()) => {
                        if let Some(photo) = self.photos.iter_mut().find(|photo| photo.id == id) {
                            photo.is_favorite = !photo.is_favorite;
                        }
                        // Unfavoriting while looking at the favorites list
                        // removes the item from the collection.
                        if self.collection == Collection::Favorites {
                            return (Event::None, self.load(api));
                        }
                        (Event::None, Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::PhotoTrashed { id, result } => {
                self.viewer_busy = false;
                match result {
                    Ok(()) => {
                        self.remove_locally(id);
                        (
                            Event::Notify(Notification::success("Moved to trash")),
                            Task::none(),
                        )
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::ShareLinkCreated(result) => {
                self.viewer_busy = false;
                match result {
                    Ok(url) => {
                        let notification = match copy_to_clipboard(&url) {
                            Ok(()) => Notification::success("Share link copied to clipboard"),
                            Err(_) => Notification::info(format!("Share link: {url}")),
                        };
                        (Event::Notify(notification), Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::DownloadPathChosen { id, path } => match path {
                Some(path) => {
                    let api = api.clone();
                    let target = path.clone();
                    (
                        Event::None,
                        Task::perform(
                            async move {
                                let bytes = api.download_photo(id).await?;
                                std::fs::write(&target, bytes)
                                    .map_err(|e| ApiError::Network(e.to_string()))
                            },
                            move |result| Message::DownloadFinished {
                                path: path.clone(),
                                result,
                            },
                        ),
                    )
                }
                None => {
                    self.viewer_busy = false;
                    (Event::None, Task::none())
                }
            },
            Message::DownloadFinished { path, result } => {
                self.viewer_busy = false;
                match result {
                    Ok(()) => (Event::DownloadSaved(path), Task::none()),
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::RawEvent(event) => self.on_raw_event(&event, api),
        }
    }

    fn on_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Photo>, ApiError>,
        api: &ApiClient,
    ) -> (Event, Task<Message>) {
        // A newer load was started after this one; applying it would be
        // last-write-wins in the wrong direction.
        if generation != self.generation {
            return (Event::None, Task::none());
        }
        self.loading = false;

        match result {
            Ok(photos) => {
                self.photos = photos;
                self.selection.prune(self.photos.iter().map(|photo| photo.id));
                self.navigator.sync(self.photos.len());
                if !self.navigator.is_open() {
                    self.full_image = None;
                }
                (Event::None, self.fetch_missing_thumbnails(api))
            }
            Err(error) => (
                Event::Notify(Notification::error(error.to_string())),
                Task::none(),
            ),
        }
    }

    fn fetch_missing_thumbnails(&mut self, api: &ApiClient) -> Task<Message> {
        let mut tasks = Vec::new();
        for photo in &self.photos {
            if !self.thumbnails.begin_fetch(photo.id) {
                continue;
            }
            let id = photo.id;
            let url = api.storage_file_url(photo.display_path());
            let api = api.clone();
            tasks.push(Task::perform(
                async move {
                    let bytes = api.fetch_bytes(&url).await.ok()?;
                    thumbnail_cache::handle_from_bytes(&bytes).ok()
                },
                move |handle| Message::ThumbnailLoaded { id, handle },
            ));
        }
        Task::batch(tasks)
    }

    fn open_viewer(&mut self, id: PhotoId, api: &ApiClient) -> (Event, Task<Message>) {
        // Linear scan; an ID that vanished from the list falls back to 0.
        let position = self.photos.iter().position(|photo| photo.id == id);
        self.navigator.sync(self.photos.len());
        self.navigator.open(position);
        (Event::None, self.load_full_image(api))
    }

    fn load_full_image(&mut self, api: &ApiClient) -> Task<Message> {
        let Some(photo) = self.current_photo() else {
            return Task::none();
        };
        let id = photo.id;
        let is_video = photo.is_video();
        let url = api.storage_file_url(&photo.file_path);

        if self
            .full_image
            .as_ref()
            .is_some_and(|(cached, _)| *cached == id)
        {
            return Task::none();
        }
        self.full_image = None;
        if is_video {
            // Video playback is server-side streaming territory; the viewer
            // shows the poster thumbnail.
            return Task::none();
        }
        let api = api.clone();
        Task::perform(
            async move {
                let bytes = api.fetch_bytes(&url).await.ok()?;
                thumbnail_cache::handle_from_bytes(&bytes).ok()
            },
            move |handle| Message::FullImageLoaded { id, handle },
        )
    }

    fn on_viewer_message(
        &mut self,
        message: viewer::Message,
        api: &ApiClient,
    ) -> (Event, Task<Message>) {
        match message {
            viewer::Message::Close => {
                self.navigator.close();
                self.full_image = None;
                (Event::None, Task::none())
            }
            viewer::Message::Previous => {
                self.navigator.previous();
                (Event::None, self.load_full_image(api))
            }
            viewer::Message::Next => {
                self.navigator.next();
                (Event::None, self.load_full_image(api))
            }
            viewer::Message::ToggleFavorite => {
                let Some(photo) = self.current_photo() else {
                    return (Event::None, Task::none());
                };
                let id = photo.id;
                self.viewer_busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.toggle_favorite(id).await },
                        move |result| Message::FavoriteToggled { id, result },
                    ),
                )
            }
            viewer::Message::Delete => {
                let Some(photo) = self.current_photo() else {
                    return (Event::None, Task::none());
                };
                let id = photo.id;
                self.viewer_busy = true;
                let api = api.clone();
                let in_trash = self.collection.is_trash();
                (
                    Event::None,
                    Task::perform(
                        async move {
                            if in_trash {
                                api.force_delete_photo(id).await
                            } else {
                                api.delete_photo(id).await
                            }
                        },
                        move |result| Message::PhotoTrashed { id, result },
                    ),
                )
            }
            viewer::Message::Download => {
                let Some(photo) = self.current_photo() else {
                    return (Event::None, Task::none());
                };
                let id = photo.id;
                let file_name = photo.original_filename.clone();
                let default_dir = self.default_save_dir.clone();
                self.viewer_busy = true;
                (
                    Event::None,
                    Task::perform(
                        async move {
                            let mut dialog = rfd::AsyncFileDialog::new().set_file_name(&file_name);
                            if let Some(dir) = default_dir {
                                if dir.exists() {
                                    dialog = dialog.set_directory(&dir);
                                }
                            }
                            dialog.save_file().await.map(|h| h.path().to_path_buf())
                        },
                        move |path| Message::DownloadPathChosen { id, path },
                    ),
                )
            }
            viewer::Message::CreateShareLink => {
                let Some(photo) = self.current_photo() else {
                    return (Event::None, Task::none());
                };
                let id = photo.id;
                self.viewer_busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move {
                            api.create_share_link(ShareKind::Photo, id, None)
                                .await
                                .map(|link| link.url)
                        },
                        Message::ShareLinkCreated,
                    ),
                )
            }
        }
    }

    fn on_raw_event(&mut self, event: &iced::Event, api: &ApiClient) -> (Event, Task<Message>) {
        // Keyboard bindings are active only while the viewer is open.
        if !self.navigator.is_open() {
            return (Event::None, Task::none());
        }
        if let iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event {
            match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    return self.on_viewer_message(viewer::Message::Close, api);
                }
                keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                    if self.navigator.has_previous() {
                        return self.on_viewer_message(viewer::Message::Previous, api);
                    }
                }
                keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                    if self.navigator.has_next() {
                        return self.on_viewer_message(viewer::Message::Next, api);
                    }
                }
                _ => {}
            }
        }
        (Event::None, Task::none())
    }

    fn run_bulk(&mut self, op: BulkOp, api: &ApiClient) -> (Event, Task<Message>) {
        if self.bulk_running || !self.selection.is_active() {
            return (Event::None, Task::none());
        }
        self.bulk_running = true;
        let ids = self.selection.ids();
        let verb = op.verb();
        let api = api.clone();

        (
            Event::None,
            Task::perform(
                async move {
                    let mut outcome = BulkOutcome::default();
                    for id in ids {
                        let result = match &op {
                            BulkOp::Favorite => api.toggle_favorite(id).await,
                            BulkOp::Trash => api.delete_photo(id).await,
                            BulkOp::Restore => api.restore_photo(id).await,
                            BulkOp::ForceDelete => api.force_delete_photo(id).await,
                            BulkOp::AddToAlbum(album_id) => {
                                api.add_photos_to_album(*album_id, &[id]).await
                            }
                            BulkOp::Share { friends, message } => {
                                api.share_with_friends(
                                    friends,
                                    &[id],
                                    None,
                                    Some(message.as_str()),
                                )
                                .await
                            }
                        };
                        match result {
                            Ok(()) => outcome.record_success(),
                            Err(_) => outcome.record_failure(),
                        }
                    }
                    outcome
                },
                move |outcome| Message::BulkFinished { verb, outcome },
            ),
        )
    }

    fn remove_locally(&mut self, id: PhotoId) {
        self.photos.retain(|photo| photo.id != id);
        self.selection.prune(self.photos.iter().map(|photo| photo.id));
        self.navigator.sync(self.photos.len());
        if self.navigator.is_open() {
            self.full_image = None;
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn view(&self, ctx: &ViewContext) -> Element<'_, Message> {
        let mut layers = Stack::new().push(self.view_grid_page(ctx));

        if self.navigator.is_open() {
            if let Some(photo) = self.current_photo() {
                let overlay = viewer::view(viewer::ViewContext {
                    photo,
                    position_label: self.navigator.position_label(),
                    has_previous: self.navigator.has_previous(),
                    has_next: self.navigator.has_next(),
                    full_image: self
                        .full_image
                        .as_ref()
                        .filter(|(id, _)| *id == photo.id)
                        .map(|(_, handle)| handle),
                    thumbnail: self.thumbnails.peek(photo.id),
                    busy: self.viewer_busy,
                })
                .map(Message::Viewer);
                layers = layers.push(overlay);
            }
        }

        if self.album_picker.is_some() || self.share_picker.is_some() {
            layers = layers.push(self.view_dialog());
        }

        layers.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_grid_page(&self, ctx: &ViewContext) -> Element<'_, Message> {
        let mut page = Column::new().spacing(spacing::SM).padding(spacing::MD);

        page = page.push(self.view_toolbar());

        if self.selection.is_active() {
            page = page.push(self.view_action_bar());
        }

        let body: Element<'_, Message> = if self.loading && self.photos.is_empty() {
            centered_label("Loading...")
        } else if self.photos.is_empty() {
            centered_label(match self.collection {
                Collection::Trash => "Trash is empty",
                Collection::Favorites => "No favorites yet",
                _ => "No photos yet",
            })
        } else {
            self.view_grid(ctx)
        };
        page = page.push(body);

        page.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_toolbar(&self) -> Element<'_, Message> {
        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new(self.collection.title()).size(typography::TITLE_SM));

        if self.collection == Collection::All {
            row = row.push(
                text_input("Search photos", &self.search)
                    .on_input(Message::SearchChanged)
                    .on_submit(Message::SearchSubmitted)
                    .padding(spacing::XS)
                    .width(Length::Fixed(240.0)),
            );
        }

        row = row.push(Space::new().width(Length::Fill).height(Length::Shrink));
        row = row.push(
            Text::new(format!("{} items", self.photos.len())).size(typography::BODY_SM),
        );
        row = row.push(
            button(Text::new("Refresh").size(typography::BODY))
                .on_press(Message::Refresh)
                .padding(spacing::XS)
                .style(styles::button::quiet),
        );

        Container::new(row)
            .width(Length::Fill)
            .padding(spacing::XS)
            .style(styles::container::toolbar)
            .into()
    }

    fn view_action_bar(&self) -> Element<'_, Message> {
        let action = |label: &'static str, message: Message| {
            let mut b = button(Text::new(label).size(typography::BODY)).padding(spacing::XS);
            if !self.bulk_running {
                b = b.on_press(message);
            }
            b.style(styles::button::quiet)
        };

        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(format!("{} selected", self.selection.len())).size(typography::BODY),
            )
            .push(action("Clear", Message::ClearSelection))
            .push(Space::new().width(Length::Fill).height(Length::Shrink));

        if self.collection.is_trash() {
            row = row.push(action("Restore", Message::BulkRestore));
            let mut delete =
                button(Text::new("Delete forever").size(typography::BODY)).padding(spacing::XS);
            if !self.bulk_running {
                delete = delete.on_press(Message::BulkForceDelete);
            }
            row = row.push(delete.style(styles::button::danger));
        } else {
            row = row.push(action("Favorite", Message::BulkFavorite));
            row = row.push(action("Add to album", Message::OpenAlbumPicker));
            row = row.push(action("Share", Message::OpenSharePicker));
            let mut trash =
                button(Text::new("Move to trash").size(typography::BODY)).padding(spacing::XS);
            if !self.bulk_running {
                trash = trash.on_press(Message::BulkTrash);
            }
            row = row.push(trash.style(styles::button::danger));
        }

        Container::new(row)
            .width(Length::Fill)
            .padding(spacing::SM)
            .style(styles::container::action_bar)
            .into()
    }

    fn view_grid(&self, ctx: &ViewContext) -> Element<'_, Message> {
        // Chunked rows instead of a measuring layout; the tile size comes
        // from config so the column count is stable per session.
        let columns = ((1100.0 / ctx.tile_px) as usize).max(2);

        let mut grid = Column::new().spacing(sizing::GRID_SPACING);
        for chunk in self.photos.chunks(columns) {
            let mut row = Row::new().spacing(sizing::GRID_SPACING);
            for photo in chunk {
                row = row.push(self.view_tile(photo, ctx.tile_px));
            }
            grid = grid.push(row);
        }

        scrollable(grid).width(Length::Fill).height(Length::Fill).into()
    }

    fn view_tile(&self, photo: &Photo, tile_px: f32) -> Element<'_, Message> {
        let selected = self.selection.contains(photo.id);
        let selection_mode = self.selection.is_active();

        let surface: Element<'_, Message> = match self.thumbnails.peek(photo.id) {
            Some(handle) => image::Image::new(handle.clone())
                .width(Length::Fixed(tile_px))
                .height(Length::Fixed(tile_px))
                .content_fit(ContentFit::Cover)
                .into(),
            None => Container::new(
                Text::new(if photo.is_video() { "\u{25B6}" } else { "\u{1F5BC}" })
                    .size(typography::TITLE_MD),
            )
            .width(Length::Fixed(tile_px))
            .height(Length::Fixed(tile_px))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(|theme: &Theme| iced::widget::container::Style {
                background: Some(theme.extended_palette().background.weak.color.into()),
                ..Default::default()
            })
            .into(),
        };

        let mut badges = Row::new()
            .spacing(spacing::XXS)
            .padding(spacing::XXS)
            .align_y(alignment::Vertical::Center);

        let toggle_glyph = if selected {
            "\u{25C9}"
        } else {
            "\u{25CB}"
        };
        badges = badges.push(
            button(Text::new(toggle_glyph).size(sizing::SELECTION_BADGE))
                .on_press(Message::TileToggled(photo.id))
                .padding(0.0)
                .style(styles::button::quiet),
        );
        if photo.is_favorite {
            badges = badges.push(Text::new("\u{2605}").size(typography::BODY));
        }
        if photo.is_video() {
            badges = badges.push(Text::new("\u{25B6}").size(typography::BODY));
        }

        let framed = Container::new(Stack::new().push(surface).push(badges)).style(
            move |theme: &Theme| {
                let colors = theme.extended_palette();
                let (color, width) = if selected {
                    (colors.primary.strong.color, border::WIDTH_LG)
                } else if selection_mode {
                    (colors.background.strong.color, border::WIDTH_SM)
                } else {
                    (colors.background.strong.color, 0.0)
                };
                iced::widget::container::Style {
                    border: iced::Border {
                        color,
                        width,
                        radius: radius::SM.into(),
                    },
                    ..Default::default()
                }
            },
        );

        mouse_area(framed)
            .on_press(Message::TileClicked(photo.id))
            .into()
    }

    fn view_dialog(&self) -> Element<'_, Message> {
        let card: Element<'_, Message> = if let Some(picker) = &self.album_picker {
            let mut column = Column::new()
                .spacing(spacing::SM)
                .push(Text::new("Add to album").size(typography::TITLE_SM));
            if picker.loading {
                column = column.push(Text::new("Loading albums...").size(typography::BODY));
            } else if picker.albums.is_empty() {
                column = column.push(Text::new("No albums yet").size(typography::BODY));
            } else {
                for album in &picker.albums {
                    column = column.push(
                        button(
                            Text::new(format!("{} ({})", album.name, album.photos_count))
                                .size(typography::BODY),
                        )
                        .on_press(Message::AlbumChosen(album.id))
                        .padding(spacing::XS)
                        .width(Length::Fill)
                        .style(styles::button::quiet),
                    );
                }
            }
            column = column.push(
                button(Text::new("Cancel").size(typography::BODY))
                    .on_press(Message::DialogCancelled)
                    .padding(spacing::XS)
                    .style(styles::button::quiet),
            );
            column.into()
        } else if let Some(picker) = &self.share_picker {
            let mut column = Column::new()
                .spacing(spacing::SM)
                .push(Text::new("Share with friends").size(typography::TITLE_SM));
            if picker.loading {
                column = column.push(Text::new("Loading friends...").size(typography::BODY));
            } else if picker.friends.is_empty() {
                column = column.push(Text::new("No friends to share with").size(typography::BODY));
            } else {
                for friend in &picker.friends {
                    let marker = if picker.chosen.contains(&friend.id) {
                        "\u{25C9}"
                    } else {
                        "\u{25CB}"
                    };
                    column = column.push(
                        button(
                            Text::new(format!("{marker} {} <{}>", friend.name, friend.email))
                                .size(typography::BODY),
                        )
                        .on_press(Message::ShareFriendToggled(friend.id))
                        .padding(spacing::XS)
                        .width(Length::Fill)
                        .style(styles::button::quiet),
                    );
                }
                column = column.push(
                    text_input("Message (optional)", &picker.message)
                        .on_input(Message::ShareMessageChanged)
                        .padding(spacing::XS),
                );
            }
            column = column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(
                        button(Text::new("Share").size(typography::BODY))
                            .on_press(Message::ShareSubmitted)
                            .padding(spacing::XS)
                            .style(styles::button::primary),
                    )
                    .push(
                        button(Text::new("Cancel").size(typography::BODY))
                            .on_press(Message::DialogCancelled)
                            .padding(spacing::XS)
                            .style(styles::button::quiet),
                    ),
            );
            column.into()
        } else {
            Text::new("").into()
        };

        Container::new(
            Container::new(card)
                .padding(spacing::LG)
                .width(Length::Fixed(sizing::DIALOG_WIDTH))
                .style(styles::container::card),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::scrim)
        .into()
    }
}

fn centered_label(label: &str) -> Element<'_, Message> {
    Container::new(Text::new(label.to_string()).size(typography::BODY_LG))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// Copies text to the system clipboard.
fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text.to_string()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn photo(id: PhotoId) -> Photo {
        Photo {
            id,
            file_path: format!("photos/{id}.jpg"),
            thumbnail_path: Some(format!("thumbs/{id}.jpg")),
            original_filename: format!("{id}.jpg"),
            mime: "image/jpeg".into(),
            size: 100,
            width: None,
            height: None,
            is_favorite: false,
            captured_at: None,
            created_at: None,
            deleted_at: None,
            location: None,
            duration_secs: None,
        }
    }

    fn loaded_state(ids: &[PhotoId]) -> State {
        let mut state = State::new();
        state.generation = 1;
        let result = Ok(ids.iter().map(|id| photo(*id)).collect());
        let _ = state.on_loaded(1, result, &api());
        state
    }

    #[test]
    fn stale_generation_response_is_discarded() {
        let mut state = State::new();
        state.generation = 2; // a newer load is in flight

        let _ = state.on_loaded(1, Ok(vec![photo(1)]), &api());
        assert!(state.photos().is_empty());

        let _ = state.on_loaded(2, Ok(vec![photo(2)]), &api());
        assert_eq!(state.photos().len(), 1);
        assert_eq!(state.photos()[0].id, 2);
    }

    #[test]
    fn refresh_prunes_selection_to_visible_ids() {
        let mut state = loaded_state(&[1, 2, 3]);
        state.selection.toggle(1);
        state.selection.toggle(3);

        state.generation += 1;
        let generation = state.generation;
        let _ = state.on_loaded(generation, Ok(vec![photo(3)]), &api());

        assert!(!state.selection().contains(1));
        assert!(state.selection().contains(3));
    }

    #[test]
    fn tile_click_outside_selection_mode_opens_viewer() {
        let mut state = loaded_state(&[1, 2, 3]);
        let _ = state.update(Message::TileClicked(2), &api());

        assert!(state.is_viewer_open());
        assert_eq!(state.navigator.current_index(), Some(1));
    }

    #[test]
    fn tile_click_in_selection_mode_toggles_instead() {
        let mut state = loaded_state(&[1, 2, 3]);
        let _ = state.update(Message::TileToggled(1), &api());
        assert!(state.selection().is_active());

        let _ = state.update(Message::TileClicked(2), &api());
        assert!(!state.is_viewer_open());
        assert!(state.selection().contains(2));
    }

    #[test]
    fn viewer_open_with_unknown_id_falls_back_to_first() {
        let mut state = loaded_state(&[1, 2, 3]);
        let _ = state.open_viewer(99, &api());
        assert_eq!(state.navigator.current_index(), Some(0));
    }

    #[test]
    fn viewer_next_clamps_at_end() {
        let mut state = loaded_state(&[1, 2, 3, 4, 5]);
        let _ = state.open_viewer(3, &api());
        assert_eq!(state.navigator.current_index(), Some(2));

        for _ in 0..3 {
            let _ = state.update(Message::Viewer(viewer::Message::Next), &api());
        }
        assert_eq!(state.navigator.current_index(), Some(4));
    }

    #[test]
    fn deleting_last_photo_closes_viewer() {
        let mut state = loaded_state(&[7]);
        let _ = state.open_viewer(7, &api());
        assert!(state.is_viewer_open());

        state.remove_locally(7);
        assert!(!state.is_viewer_open());
        assert!(state.photos().is_empty());
    }

    #[test]
    fn deletion_reclamps_viewer_index() {
        let mut state = loaded_state(&[1, 2, 3]);
        let _ = state.open_viewer(3, &api());
        assert_eq!(state.navigator.current_index(), Some(2));

        state.remove_locally(3);
        assert_eq!(state.navigator.current_index(), Some(1));
    }

    #[test]
    fn escape_key_closes_viewer() {
        let mut state = loaded_state(&[1, 2]);
        let _ = state.open_viewer(1, &api());

        let event = iced::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            modified_key: keyboard::Key::Named(keyboard::key::Named::Escape),
            physical_key: keyboard::key::Physical::Code(keyboard::key::Code::Escape),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::default(),
            text: None,
            repeat: false,
        });
        let _ = state.update(Message::RawEvent(event), &api());
        assert!(!state.is_viewer_open());
    }

    #[test]
    fn keyboard_is_inert_while_viewer_closed() {
        let mut state = loaded_state(&[1, 2]);
        let event = iced::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::ArrowRight),
            modified_key: keyboard::Key::Named(keyboard::key::Named::ArrowRight),
            physical_key: keyboard::key::Physical::Code(keyboard::key::Code::ArrowRight),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::default(),
            text: None,
            repeat: false,
        });
        let _ = state.update(Message::RawEvent(event), &api());
        assert!(!state.is_viewer_open());
    }

    #[test]
    fn bulk_requires_active_selection() {
        let mut state = loaded_state(&[1, 2]);
        let (_, _task) = state.update(Message::BulkFavorite, &api());
        assert!(!state.bulk_running);

        let _ = state.update(Message::TileToggled(1), &api());
        let (_, _task) = state.update(Message::BulkFavorite, &api());
        assert!(state.bulk_running);
    }

    #[test]
    fn bulk_finish_clears_selection_and_notifies() {
        let mut state = loaded_state(&[1, 2]);
        let _ = state.update(Message::TileToggled(1), &api());
        let _ = state.update(Message::BulkFavorite, &api());

        let mut outcome = BulkOutcome::default();
        outcome.record_success();
        let (event, _) = state.update(
            Message::BulkFinished {
                verb: "Favorited",
                outcome,
            },
            &api(),
        );

        assert!(!state.bulk_running);
        assert!(state.selection().is_empty());
        assert!(matches!(event, Event::Notify(_)));
    }

    #[test]
    fn late_album_picker_response_after_cancel_is_dropped() {
        let mut state = loaded_state(&[1]);
        let _ = state.update(Message::TileToggled(1), &api());
        let _ = state.update(Message::OpenAlbumPicker, &api());
        let _ = state.update(Message::DialogCancelled, &api());

        let (event, _) = state.update(Message::AlbumPickerLoaded(Ok(Vec::new())), &api());
        assert!(matches!(event, Event::None));
        assert!(state.album_picker.is_none());
    }
}
