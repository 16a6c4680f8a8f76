// SPDX-License-Identifier: MPL-2.0
//! Upload queue state machine.
//!
//! Files arrive from drag-and-drop, the file picker, or clipboard paste and
//! are validated by MIME type before entering the queue. The whole queue is
//! submitted as ONE multipart batch request; the server answers with
//! aggregate counters (uploaded / restored-from-trash / duplicates) and no
//! per-file granularity, so the batch succeeds or fails as a unit.
//!
//! Status transitions per item: `pending -> uploading -> done` on success,
//! `uploading -> error` on failure. Progress only moves 0 -> 100 along the
//! success path. Nothing is retried automatically; a failed entry is
//! re-queued the next time the user triggers a submit.

use crate::api::photos::UploadPart;
use crate::api::types::BatchUploadOutcome;
use crate::media::{self, MediaKind};
use iced::widget::image;
use std::path::{Path, PathBuf};

/// Lifecycle of one queued file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Pending,
    Uploading,
    Done,
    Error,
}

/// One file in the upload queue.
#[derive(Debug, Clone)]
pub struct UploadItem {
    path: PathBuf,
    file_name: String,
    mime: String,
    kind: MediaKind,
    preview: Option<image::Handle>,
    progress: u8,
    status: UploadStatus,
}

impl UploadItem {
    fn new(path: PathBuf, mime: &str, kind: MediaKind) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        Self {
            path,
            file_name,
            mime: mime.to_string(),
            kind,
            preview: None,
            progress: 0,
            status: UploadStatus::Pending,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Decoded preview thumbnail, once the background decode finished.
    /// Videos never get one; the queue shows a film placeholder instead.
    #[must_use]
    pub fn preview(&self) -> Option<&image::Handle> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn status(&self) -> UploadStatus {
        self.status
    }
}

/// Result of an [`UploadSession::add_files`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOutcome {
    pub added: usize,
    pub rejected: usize,
}

impl AddOutcome {
    /// Toast line for silently rejected files, if any were dropped.
    #[must_use]
    pub fn rejection_message(&self) -> Option<String> {
        match self.rejected {
            0 => None,
            1 => Some("1 file was skipped (not an image or video)".to_string()),
            n => Some(format!("{n} files were skipped (not images or videos)")),
        }
    }
}

/// Queue of files awaiting batch upload.
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    items: Vec<UploadItem>,
    in_flight: bool,
}

impl UploadSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries that would go out with the next submit.
    #[must_use]
    pub fn submittable_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.status, UploadStatus::Pending | UploadStatus::Error))
            .count()
    }

    /// Whether a batch request is currently in flight. The submit control is
    /// disabled while this is true to prevent duplicate submission.
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.submittable_count() > 0
    }

    /// Queues the given files, keeping only those with an `image/*` or
    /// `video/*` MIME type. Everything else is silently dropped and counted.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for path in paths {
            match (media::mime_for_path(&path), media::detect_media_kind(&path)) {
                (Some(mime), Some(kind)) => {
                    self.items.push(UploadItem::new(path, mime, kind));
                    outcome.added += 1;
                }
                _ => outcome.rejected += 1,
            }
        }
        outcome
    }

    /// Attaches a decoded preview to the queued file at `path`.
    ///
    /// Keyed by path rather than index: entries may have been removed while
    /// the decode ran in the background.
    pub fn set_preview(&mut self, path: &Path, handle: image::Handle) {
        if let Some(item) = self.items.iter_mut().find(|item| item.path == path) {
            item.preview = Some(handle);
        }
    }

    /// Removes the entry at `index`, releasing its preview.
    ///
    /// Only permitted while the entry is still `pending`; returns `false`
    /// otherwise.
    pub fn remove_file(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if item.status == UploadStatus::Pending => {
                self.items.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Empties the queue. Refused while a batch is in flight.
    pub fn clear(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.items.clear();
        true
    }

    /// Marks every submittable entry `uploading` and returns their paths for
    /// the batch request. Returns `None` when there is nothing to submit or a
    /// batch is already in flight.
    pub fn begin_upload(&mut self) -> Option<Vec<PathBuf>> {
        if !self.can_submit() {
            return None;
        }
        let mut paths = Vec::new();
        for item in &mut self.items {
            if matches!(item.status, UploadStatus::Pending | UploadStatus::Error) {
                item.status = UploadStatus::Uploading;
                item.progress = 0;
                paths.push(item.path.clone());
            }
        }
        self.in_flight = true;
        Some(paths)
    }

    /// Applies a successful batch response: every in-flight entry is `done`
    /// with progress 100.
    pub fn finish_success(&mut self, _outcome: &BatchUploadOutcome) {
        for item in &mut self.items {
            if item.status == UploadStatus::Uploading {
                item.status = UploadStatus::Done;
                item.progress = 100;
            }
        }
        self.in_flight = false;
    }

    /// Applies a failed batch: every in-flight entry is `error`. The server
    /// message is surfaced by the caller; entries go out again on the next
    /// submit.
    pub fn finish_failure(&mut self) {
        for item in &mut self.items {
            if item.status == UploadStatus::Uploading {
                item.status = UploadStatus::Error;
            }
        }
        self.in_flight = false;
    }

    /// Whether every queued entry completed successfully.
    #[must_use]
    pub fn all_done(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|item| item.status == UploadStatus::Done)
    }
}

/// Reads the queued files into multipart parts.
///
/// Runs right before the batch request so a file deleted from disk after
/// queueing fails the whole batch, matching the all-or-nothing semantics.
pub fn load_parts(paths: &[PathBuf]) -> std::io::Result<Vec<UploadPart>> {
    let mut parts = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let mime = media::mime_for_path(path)
            .unwrap_or("application/octet-stream")
            .to_string();
        parts.push(UploadPart {
            file_name,
            mime,
            bytes,
        });
    }
    Ok(parts)
}

/// Decodes an image file into a small preview handle for the queue grid.
pub fn decode_preview(path: &Path) -> crate::error::Result<image::Handle> {
    let decoded = image_rs::open(path)?;
    let thumbnail = decoded.thumbnail(256, 256).to_rgba8();
    let (width, height) = thumbnail.dimensions();
    Ok(image::Handle::from_rgba(width, height, thumbnail.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn outcome(uploaded: u32, restored: u32, duplicates: u32) -> BatchUploadOutcome {
        BatchUploadOutcome {
            photos: Vec::new(),
            uploaded,
            restored,
            duplicates,
        }
    }

    #[test]
    fn add_files_keeps_only_images_and_videos() {
        let mut session = UploadSession::new();
        let added = session.add_files(paths(&["a.jpg", "b.mp4", "c.txt"]));

        assert_eq!(added.added, 2);
        assert_eq!(added.rejected, 1);
        assert_eq!(session.len(), 2);
        assert_eq!(session.items()[0].file_name(), "a.jpg");
        assert_eq!(session.items()[1].file_name(), "b.mp4");
        assert_eq!(session.items()[1].kind(), MediaKind::Video);
    }

    #[test]
    fn rejection_message_counts_dropped_files() {
        let mut session = UploadSession::new();
        let added = session.add_files(paths(&["a.jpg"]));
        assert_eq!(added.rejection_message(), None);

        let added = session.add_files(paths(&["x.txt", "y.zip"]));
        let message = added.rejection_message().expect("should mention rejects");
        assert!(message.contains('2'), "{message}");
    }

    #[test]
    fn every_new_item_is_pending_with_zero_progress() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png"]));
        for item in session.items() {
            assert_eq!(item.status(), UploadStatus::Pending);
            assert_eq!(item.progress(), 0);
            assert!(item.preview().is_none());
        }
    }

    #[test]
    fn remove_file_shrinks_queue_by_one() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png"]));

        assert!(session.remove_file(0));
        assert_eq!(session.len(), 1);
        assert_eq!(session.items()[0].file_name(), "b.png");
    }

    #[test]
    fn remove_file_is_refused_once_uploading() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg"]));
        session.begin_upload().expect("should start");

        assert!(!session.remove_file(0));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn remove_file_out_of_bounds_is_refused() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg"]));
        assert!(!session.remove_file(5));
    }

    #[test]
    fn begin_upload_marks_all_pending_as_uploading() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png", "c.mp4"]));

        let uploading = session.begin_upload().expect("should start");
        assert_eq!(uploading.len(), 3);
        assert!(session.is_uploading());
        assert!(!session.can_submit());
        for item in session.items() {
            assert_eq!(item.status(), UploadStatus::Uploading);
        }
    }

    #[test]
    fn begin_upload_with_empty_queue_returns_none() {
        let mut session = UploadSession::new();
        assert_eq!(session.begin_upload(), None);
    }

    #[test]
    fn successful_batch_marks_everything_done() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png", "c.mp4"]));
        session.begin_upload().expect("should start");

        session.finish_success(&outcome(2, 1, 0));

        assert!(!session.is_uploading());
        assert!(session.all_done());
        for item in session.items() {
            assert_eq!(item.status(), UploadStatus::Done);
            assert_eq!(item.progress(), 100);
        }
    }

    #[test]
    fn failed_batch_marks_everything_error() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png"]));
        session.begin_upload().expect("should start");

        session.finish_failure();

        assert!(!session.is_uploading());
        for item in session.items() {
            assert_eq!(item.status(), UploadStatus::Error);
            assert_eq!(item.progress(), 0);
        }
    }

    #[test]
    fn failed_entries_go_out_again_on_next_submit() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg"]));
        session.begin_upload().expect("first attempt");
        session.finish_failure();

        assert!(session.can_submit());
        let retried = session.begin_upload().expect("retry");
        assert_eq!(retried.len(), 1);
    }

    #[test]
    fn done_entries_are_not_resubmitted() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg"]));
        session.begin_upload().expect("first attempt");
        session.finish_success(&outcome(1, 0, 0));

        session.add_files(paths(&["b.png"]));
        let second = session.begin_upload().expect("second attempt");
        assert_eq!(second, paths(&["b.png"]));
    }

    #[test]
    fn clear_is_refused_mid_flight() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg"]));
        session.begin_upload().expect("should start");

        assert!(!session.clear());
        assert_eq!(session.len(), 1);

        session.finish_failure();
        assert!(session.clear());
        assert!(session.is_empty());
    }

    #[test]
    fn set_preview_is_keyed_by_path() {
        let mut session = UploadSession::new();
        session.add_files(paths(&["a.jpg", "b.png"]));
        session.remove_file(0);

        // Preview for the removed file arrives late and is dropped silently.
        let handle = image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        session.set_preview(Path::new("a.jpg"), handle.clone());
        assert!(session.items()[0].preview().is_none());

        session.set_preview(Path::new("b.png"), handle);
        assert!(session.items()[0].preview().is_some());
    }
}
