// SPDX-License-Identifier: MPL-2.0
//! Upload screen: drop zone, queue grid, and batch submission.
//!
//! Files arrive three ways: dropped onto the window, chosen in the native
//! file picker, or pasted as paths from the clipboard (Ctrl+V). All of them
//! funnel into [`UploadSession::add_files`], which silently drops anything
//! that is not an image or video and reports the count.

use crate::api::ApiClient;
use crate::api::types::BatchUploadOutcome;
use crate::media::{self, MediaKind};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::upload::{self, UploadSession, UploadStatus};
use iced::widget::{button, image, scrollable, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, ContentFit, Element, Length, Task, Theme};
use std::path::PathBuf;

/// Queue tile side length.
const TILE_PX: f32 = 132.0;

/// Queue grid column count.
const COLUMNS: usize = 6;

#[derive(Debug, Clone)]
pub enum Message {
    PickFiles,
    FilesPicked(Option<Vec<PathBuf>>),
    /// Paths dropped on the window (routed here by the app shell).
    FilesDropped(Vec<PathBuf>),
    /// Clipboard text pasted with Ctrl+V; existing paths are queued.
    ClipboardPasted(String),
    PreviewDecoded {
        path: PathBuf,
        handle: Option<image::Handle>,
    },
    Remove(usize),
    ClearAll,
    Submit,
    Finished(Result<BatchUploadOutcome, String>),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
    /// A batch finished successfully; the root shows the aggregate toast
    /// and refreshes the photo grid.
    BatchUploaded(BatchUploadOutcome),
    /// The picker was used; the root persists the directory for next time.
    PickedFrom(PathBuf),
}

#[derive(Debug, Default)]
pub struct State {
    session: UploadSession,
    default_open_dir: Option<PathBuf>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    /// Seeds the directory offered by the file picker.
    pub fn set_default_open_dir(&mut self, dir: Option<PathBuf>) {
        self.default_open_dir = dir;
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::PickFiles => {
                let default_dir = self.default_open_dir.clone();
                (
                    Event::None,
                    Task::perform(
                        async move {
                            let mut dialog = rfd::AsyncFileDialog::new()
                                .add_filter("Images", media::extensions::IMAGE_EXTENSIONS)
                                .add_filter("Videos", media::extensions::VIDEO_EXTENSIONS);
                            if let Some(dir) = default_dir {
                                if dir.exists() {
                                    dialog = dialog.set_directory(&dir);
                                }
                            }
                            dialog.pick_files().await.map(|handles| {
                                handles
                                    .into_iter()
                                    .map(|handle| handle.path().to_path_buf())
                                    .collect()
                            })
                        },
                        Message::FilesPicked,
                    ),
                )
            }
            Message::FilesPicked(paths) => match paths {
                Some(paths) => {
                    let picked_dir = paths
                        .first()
                        .and_then(|path| path.parent().map(PathBuf::from));
                    let (event, task) = self.queue_paths(paths);
                    match (picked_dir, event) {
                        // Rejection toasts take precedence over the
                        // bookkeeping event.
                        (_, event @ Event::Notify(_)) => (event, task),
                        (Some(dir), _) => (Event::PickedFrom(dir), task),
                        (None, event) => (event, task),
                    }
                }
                None => (Event::None, Task::none()),
            },
            Message::FilesDropped(paths) => self.queue_paths(paths),
            Message::ClipboardPasted(text) => {
                let paths: Vec<PathBuf> = text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from)
                    .filter(|path| path.exists())
                    .collect();
                if paths.is_empty() {
                    return (Event::None, Task::none());
                }
                self.queue_paths(paths)
            }
            Message::PreviewDecoded { path, handle } => {
                if let Some(handle) = handle {
                    self.session.set_preview(&path, handle);
                }
                (Event::None, Task::none())
            }
            Message::Remove(index) => {
                self.session.remove_file(index);
                (Event::None, Task::none())
            }
            Message::ClearAll => {
                self.session.clear();
                (Event::None, Task::none())
            }
            Message::Submit => {
                let Some(paths) = self.session.begin_upload() else {
                    return (Event::None, Task::none());
                };
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move {
                            let parts = tokio::task::spawn_blocking(move || {
                                upload::load_parts(&paths)
                            })
                            .await
                            .map_err(|e| e.to_string())?
                            .map_err(|e| e.to_string())?;
                            api.upload_photos(parts).await.map_err(|e| e.to_string())
                        },
                        Message::Finished,
                    ),
                )
            }
            Message::Finished(result) => match result {
                Ok(outcome) => {
                    self.session.finish_success(&outcome);
                    (Event::BatchUploaded(outcome), Task::none())
                }
                Err(message) => {
                    self.session.finish_failure();
                    (
                        Event::Notify(Notification::error(format!("Upload failed: {message}"))),
                        Task::none(),
                    )
                }
            },
        }
    }

    /// Queues paths and kicks off preview decodes for the accepted images.
    fn queue_paths(&mut self, paths: Vec<PathBuf>) -> (Event, Task<Message>) {
        let added = self.session.add_files(paths);

        let mut tasks = Vec::new();
        for item in self.session.items() {
            if item.kind() == MediaKind::Image
                && item.preview().is_none()
                && item.status() == UploadStatus::Pending
            {
                let path = item.path().to_path_buf();
                tasks.push(Task::perform(
                    async move {
                        let decoded = path.clone();
                        let handle = tokio::task::spawn_blocking(move || {
                            upload::decode_preview(&decoded).ok()
                        })
                        .await
                        .ok()
                        .flatten();
                        (path, handle)
                    },
                    |(path, handle)| Message::PreviewDecoded { path, handle },
                ));
            }
        }

        let event = match added.rejection_message() {
            Some(message) => Event::Notify(Notification::warning(message)),
            None => Event::None,
        };
        (event, Task::batch(tasks))
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn view(&self) -> Element<'_, Message> {
        let mut page = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::MD)
            .push(Text::new("Upload photos and videos").size(typography::TITLE_SM))
            .push(self.view_drop_zone());

        if !self.session.is_empty() {
            page = page.push(self.view_queue());
            page = page.push(self.view_controls());
        }

        page.width(Length::Fill).height(Length::Fill).into()
    }

    fn view_drop_zone(&self) -> Element<'_, Message> {
        let hint = Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new("Drop photos or videos here").size(typography::BODY_LG))
            .push(
                Text::new("or press Ctrl+V to paste file paths").size(typography::BODY_SM),
            )
            .push(
                button(Text::new("Browse files").size(typography::BODY))
                    .on_press(Message::PickFiles)
                    .padding(spacing::XS)
                    .style(styles::button::primary),
            );

        Container::new(hint)
            .width(Length::Fill)
            .padding(spacing::XXL)
            .align_x(alignment::Horizontal::Center)
            .style(|theme: &Theme| styles::container::drop_zone(theme, false))
            .into()
    }

    fn view_queue(&self) -> Element<'_, Message> {
        let mut grid = Column::new().spacing(spacing::XS);
        let items: Vec<_> = self.session.items().iter().enumerate().collect();
        for chunk in items.chunks(COLUMNS) {
            let mut row = Row::new().spacing(spacing::XS);
            for (index, item) in chunk {
                row = row.push(self.view_queue_tile(*index, item));
            }
            grid = grid.push(row);
        }
        scrollable(grid).height(Length::Fill).into()
    }

    fn view_queue_tile<'a>(
        &'a self,
        index: usize,
        item: &'a crate::upload::UploadItem,
    ) -> Element<'a, Message> {
        let surface: Element<'_, Message> = match item.preview() {
            Some(handle) => image::Image::new(handle.clone())
                .width(Length::Fixed(TILE_PX))
                .height(Length::Fixed(TILE_PX))
                .content_fit(ContentFit::Cover)
                .into(),
            None => Container::new(
                Text::new(if item.kind() == MediaKind::Video {
                    "\u{25B6}"
                } else {
                    "\u{1F5BC}"
                })
                .size(typography::TITLE_MD),
            )
            .width(Length::Fixed(TILE_PX))
            .height(Length::Fixed(TILE_PX))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(|theme: &Theme| iced::widget::container::Style {
                background: Some(theme.extended_palette().background.weak.color.into()),
                ..Default::default()
            })
            .into(),
        };

        let status_glyph = match item.status() {
            UploadStatus::Pending => "",
            UploadStatus::Uploading => "\u{2026}",
            UploadStatus::Done => "\u{2713}",
            UploadStatus::Error => "\u{26A0}",
        };
        let mut badges = Row::new().spacing(spacing::XXS).padding(spacing::XXS);
        if !status_glyph.is_empty() {
            badges = badges.push(Text::new(status_glyph).size(typography::BODY_LG));
        }
        if item.status() == UploadStatus::Pending {
            badges = badges.push(
                button(Text::new("\u{00D7}").size(typography::BODY))
                    .on_press(Message::Remove(index))
                    .padding(0.0)
                    .style(styles::button::quiet),
            );
        }

        Column::new()
            .spacing(spacing::XXS)
            .push(Stack::new().push(surface).push(badges))
            .push(
                Text::new(item.file_name().to_string())
                    .size(typography::CAPTION)
                    .width(Length::Fixed(TILE_PX)),
            )
            .into()
    }

    fn view_controls(&self) -> Element<'_, Message> {
        let submit_label = if self.session.is_uploading() {
            "Uploading...".to_string()
        } else {
            format!("Upload {} files", self.session.submittable_count())
        };

        let mut submit = button(
            Text::new(submit_label).align_x(alignment::Horizontal::Center),
        )
        .padding(spacing::XS)
        .width(Length::Fill)
        .style(styles::button::primary);
        if self.session.can_submit() {
            submit = submit.on_press(Message::Submit);
        }

        let mut clear = button(Text::new("Clear all").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::quiet);
        if !self.session.is_uploading() {
            clear = clear.on_press(Message::ClearAll);
        }

        Row::new()
            .spacing(spacing::SM)
            .push(submit)
            .push(clear)
            .push(Space::new().width(Length::Fixed(sizing::BUTTON_HEIGHT)).height(Length::Shrink))
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

    fn outcome(uploaded: u32, restored: u32) -> BatchUploadOutcome {
        BatchUploadOutcome {
            photos: Vec::new(),
            uploaded,
            restored,
            duplicates: 0,
        }
    }

    #[test]
    fn dropped_files_are_filtered_and_rejections_noticed() {
        let mut state = State::new();
        let (event, _) = state.update(
            Message::FilesDropped(vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.mp4"),
                PathBuf::from("c.txt"),
            ]),
            &api(),
        );

        assert_eq!(state.session().len(), 2);
        assert!(matches!(event, Event::Notify(_)));
    }

    #[test]
    fn clean_drop_produces_no_event() {
        let mut state = State::new();
        let (event, _) = state.update(
            Message::FilesDropped(vec![PathBuf::from("a.jpg")]),
            &api(),
        );
        assert!(matches!(event, Event::None));
    }

    #[test]
    fn clipboard_paste_ignores_nonexistent_paths() {
        let mut state = State::new();
        let (_, _task) = state.update(
            Message::ClipboardPasted("/definitely/not/a/real/file.jpg\n".to_string()),
            &api(),
        );
        assert!(state.session().is_empty());
    }

    #[test]
    fn remove_shrinks_the_queue() {
        let mut state = State::new();
        let _ = state.update(
            Message::FilesDropped(vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]),
            &api(),
        );
        let _ = state.update(Message::Remove(0), &api());
        assert_eq!(state.session().len(), 1);
    }

    #[test]
    fn successful_finish_reports_batch_uploaded() {
        let mut state = State::new();
        let _ = state.update(Message::FilesDropped(vec![PathBuf::from("a.jpg")]), &api());
        state.session.begin_upload().expect("should start");

        let (event, _) = state.update(Message::Finished(Ok(outcome(2, 1))), &api());
        match event {
            Event::BatchUploaded(outcome) => {
                let message = outcome.summary_message();
                assert!(message.contains("Uploaded 2"), "{message}");
                assert!(message.contains("restored 1"), "{message}");
            }
            _ => panic!("expected BatchUploaded"),
        }
        assert!(state.session().all_done());
    }

    #[test]
    fn failed_finish_surfaces_server_message() {
        let mut state = State::new();
        let _ = state.update(Message::FilesDropped(vec![PathBuf::from("a.jpg")]), &api());
        state.session.begin_upload().expect("should start");

        let (event, _) = state.update(
            Message::Finished(Err("payload too large".to_string())),
            &api(),
        );
        match event {
            Event::Notify(notification) => {
                assert!(notification.message().contains("payload too large"));
            }
            _ => panic!("expected a notification"),
        }
        assert!(!state.session().all_done());
    }
}
