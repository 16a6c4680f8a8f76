// SPDX-License-Identifier: MPL-2.0
//! Normalized entities and the raw wire shapes they are decoded from.
//!
//! The service has gone through several backend revisions and older
//! endpoints still emit historical field aliases (`thumb_path` vs
//! `thumbnail_path`, `mime` vs `mime_type`, `path` vs `file_path`,
//! `captured_at` vs `taken_at`). Each entity therefore has a private
//! `Raw*` deserialization twin, and the alias resolution happens exactly
//! once, here, in the `From` conversions. Components never see the raw
//! shapes.

use crate::media::MediaKind;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

pub type UserId = u64;
pub type PhotoId = u64;
pub type AlbumId = u64;
pub type FriendId = u64;
pub type ShareId = u64;
pub type ShareLinkId = u64;
pub type NoticeId = u64;

/// Parses the timestamp formats the backend has emitted over time:
/// RFC 3339 (current) and the bare `YYYY-MM-DD HH:MM:SS` of older rows.
fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

// =============================================================================
// User & auth
// =============================================================================

/// An account on the service.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_path: Option<String>,
    pub storage_used: Option<u64>,
    pub storage_quota: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    id: UserId,
    name: String,
    email: String,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    avatar_path: Option<String>,
    #[serde(default)]
    storage_used: Option<u64>,
    #[serde(default)]
    storage_limit: Option<u64>,
    #[serde(default)]
    storage_quota: Option<u64>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            avatar_path: raw.avatar_path.or(raw.avatar),
            storage_used: raw.storage_used,
            storage_quota: raw.storage_quota.or(raw.storage_limit),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAuthResponse {
    pub(crate) user: RawUser,
    pub(crate) token: String,
}

impl From<RawAuthResponse> for AuthSession {
    fn from(raw: RawAuthResponse) -> Self {
        Self {
            user: raw.user.into(),
            token: raw.token,
        }
    }
}

/// Storage quota usage for the account screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageInfo {
    pub used: u64,
    pub quota: u64,
    pub available: u64,
    pub percentage: f32,
    #[serde(default)]
    pub used_human: Option<String>,
    #[serde(default)]
    pub quota_human: Option<String>,
}

// =============================================================================
// Photos & videos
// =============================================================================

/// A stored photo or video.
///
/// Videos share the photo endpoints; [`Photo::kind`] distinguishes them by
/// MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub original_filename: String,
    pub mime: String,
    pub size: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub is_favorite: bool,
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Playback length in seconds, for videos.
    pub duration_secs: Option<f64>,
}

impl Photo {
    /// Media kind derived from the MIME type; unknown types render as images.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        if self.mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }

    /// Path to render in the grid: the thumbnail when present, otherwise the
    /// original file.
    #[must_use]
    pub fn display_path(&self) -> &str {
        self.thumbnail_path.as_deref().unwrap_or(&self.file_path)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPhoto {
    id: PhotoId,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    thumb_path: Option<String>,
    #[serde(default)]
    thumbnail_path: Option<String>,
    #[serde(default)]
    original_filename: Option<String>,
    #[serde(default)]
    mime: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(default)]
    captured_at: Option<String>,
    #[serde(default)]
    taken_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    deleted_at: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    location_text: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

impl From<RawPhoto> for Photo {
    fn from(raw: RawPhoto) -> Self {
        Self {
            id: raw.id,
            file_path: raw.path.or(raw.file_path).unwrap_or_default(),
            thumbnail_path: raw.thumb_path.or(raw.thumbnail_path),
            original_filename: raw.original_filename.unwrap_or_default(),
            mime: raw.mime.or(raw.mime_type).unwrap_or_default(),
            size: raw.size.unwrap_or(0),
            width: raw.width,
            height: raw.height,
            is_favorite: raw.is_favorite.unwrap_or(false),
            captured_at: parse_timestamp(raw.captured_at.or(raw.taken_at)),
            created_at: parse_timestamp(raw.created_at),
            deleted_at: parse_timestamp(raw.deleted_at),
            location: raw.location.or(raw.location_text),
            duration_secs: raw.duration,
        }
    }
}

/// Aggregate counters returned by the batch upload endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchUploadOutcome {
    pub photos: Vec<Photo>,
    pub uploaded: u32,
    pub restored: u32,
    pub duplicates: u32,
}

impl BatchUploadOutcome {
    /// One-line summary for the toast shown after a batch completes.
    #[must_use]
    pub fn summary_message(&self) -> String {
        let mut parts = vec![format!("Uploaded {}", self.uploaded)];
        if self.restored > 0 {
            parts.push(format!("restored {} from trash", self.restored));
        }
        if self.duplicates > 0 {
            parts.push(format!("skipped {} duplicates", self.duplicates));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBatchUploadResponse {
    #[serde(default)]
    pub(crate) data: Vec<RawPhoto>,
    #[serde(default)]
    pub(crate) uploaded: u32,
    #[serde(default)]
    pub(crate) restored: u32,
    #[serde(default)]
    pub(crate) duplicates: u32,
}

impl From<RawBatchUploadResponse> for BatchUploadOutcome {
    fn from(raw: RawBatchUploadResponse) -> Self {
        Self {
            photos: raw.data.into_iter().map(Photo::from).collect(),
            uploaded: raw.uploaded,
            restored: raw.restored,
            duplicates: raw.duplicates,
        }
    }
}

// =============================================================================
// Albums
// =============================================================================

/// A user-created or auto-generated album.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub cover_photo: Option<Photo>,
    pub photos_count: u32,
    pub photos: Vec<Photo>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    id: AlbumId,
    name: String,
    #[serde(default)]
    cover_photo: Option<RawPhoto>,
    #[serde(default)]
    photos_count: Option<u32>,
    #[serde(default)]
    photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RawAlbum> for Album {
    fn from(raw: RawAlbum) -> Self {
        let photos: Vec<Photo> = raw
            .photos
            .unwrap_or_default()
            .into_iter()
            .map(Photo::from)
            .collect();
        Self {
            id: raw.id,
            name: raw.name,
            cover_photo: raw.cover_photo.map(Photo::from),
            photos_count: raw.photos_count.unwrap_or(photos.len() as u32),
            photos,
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

/// Counters returned by the auto-album generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoAlbumOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created: u32,
    #[serde(default)]
    pub updated: u32,
}

// =============================================================================
// Friends
// =============================================================================

/// An accepted friend.
#[derive(Debug, Clone, PartialEq)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub email: String,
    pub avatar_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFriend {
    id: FriendId,
    name: String,
    email: String,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    avatar_path: Option<String>,
}

impl From<RawFriend> for Friend {
    fn from(raw: RawFriend) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            avatar_path: raw.avatar_path.or(raw.avatar),
        }
    }
}

/// A pending, sent, or blocked relationship entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendRequest {
    pub id: FriendId,
    /// The counterpart account, whichever side of the row it was stored on.
    pub counterpart: Option<User>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFriendRequest {
    id: FriendId,
    #[serde(default)]
    user: Option<RawUser>,
    #[serde(default)]
    friend: Option<RawUser>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RawFriendRequest> for FriendRequest {
    fn from(raw: RawFriendRequest) -> Self {
        Self {
            id: raw.id,
            counterpart: raw.user.or(raw.friend).map(User::from),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

/// The full relationship summary returned by `/api/friends`.
#[derive(Debug, Clone, Default)]
pub struct FriendsSummary {
    pub friends: Vec<Friend>,
    pub incoming: Vec<FriendRequest>,
    pub outgoing: Vec<FriendRequest>,
    pub blocked: Vec<FriendRequest>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFriendsSummary {
    #[serde(default)]
    pub(crate) friends: Vec<RawFriend>,
    #[serde(default)]
    pub(crate) incoming: Vec<RawFriendRequest>,
    #[serde(default)]
    pub(crate) outgoing: Vec<RawFriendRequest>,
    #[serde(default)]
    pub(crate) blocked: Vec<RawFriendRequest>,
}

impl From<RawFriendsSummary> for FriendsSummary {
    fn from(raw: RawFriendsSummary) -> Self {
        Self {
            friends: raw.friends.into_iter().map(Friend::from).collect(),
            incoming: raw.incoming.into_iter().map(FriendRequest::from).collect(),
            outgoing: raw.outgoing.into_iter().map(FriendRequest::from).collect(),
            blocked: raw.blocked.into_iter().map(FriendRequest::from).collect(),
        }
    }
}

// =============================================================================
// Shares
// =============================================================================

/// The item a share points at.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedItem {
    Photo(Photo),
    Album(Album),
}

impl SharedItem {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SharedItem::Photo(photo) => &photo.original_filename,
            SharedItem::Album(album) => &album.name,
        }
    }
}

/// A direct share between two accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub id: ShareId,
    pub item: Option<SharedItem>,
    pub counterpart: Option<User>,
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawShare {
    id: ShareId,
    #[serde(default)]
    shareable_type: Option<String>,
    #[serde(default)]
    shareable: Option<Value>,
    #[serde(default)]
    user: Option<RawUser>,
    #[serde(default)]
    friend: Option<RawUser>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    is_read: Option<bool>,
    #[serde(default)]
    created_at: Option<String>,
}

/// Resolves the polymorphic `shareable` payload against its type tag, which
/// may be a bare word ("album") or a fully qualified backend class name.
pub(crate) fn parse_shared_item(kind: Option<&str>, payload: Option<Value>) -> Option<SharedItem> {
    let payload = payload?;
    let is_album = kind.is_some_and(|k| k.to_lowercase().contains("album"));
    if is_album {
        serde_json::from_value::<RawAlbum>(payload)
            .ok()
            .map(|raw| SharedItem::Album(raw.into()))
    } else {
        serde_json::from_value::<RawPhoto>(payload)
            .ok()
            .map(|raw| SharedItem::Photo(raw.into()))
    }
}

impl From<RawShare> for Share {
    fn from(raw: RawShare) -> Self {
        Self {
            id: raw.id,
            item: parse_shared_item(raw.shareable_type.as_deref(), raw.shareable),
            counterpart: raw.user.or(raw.friend).map(User::from),
            message: raw.message,
            is_read: raw.is_read.unwrap_or(false),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

/// Whether a share link grants access to a single photo or a whole album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    Photo,
    Album,
}

impl ShareKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShareKind::Photo => "photo",
            ShareKind::Album => "album",
        }
    }
}

/// A public, tokenized link granting unauthenticated read access.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub id: ShareLinkId,
    pub token: String,
    pub url: Option<String>,
    pub kind: Option<ShareKind>,
    pub item: Option<SharedItem>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawShareLink {
    id: ShareLinkId,
    token: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<ShareKind>,
    #[serde(default)]
    item: Option<Value>,
    #[serde(default)]
    expires_at: Option<String>,
    #[serde(default)]
    is_expired: Option<bool>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RawShareLink> for ShareLink {
    fn from(raw: RawShareLink) -> Self {
        let kind_tag = raw.kind.map(ShareKind::as_str);
        Self {
            id: raw.id,
            token: raw.token,
            url: raw.url,
            kind: raw.kind,
            item: parse_shared_item(kind_tag, raw.item),
            expires_at: parse_timestamp(raw.expires_at),
            is_expired: raw.is_expired.unwrap_or(false),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

/// Content resolved from a public share token.
#[derive(Debug, Clone)]
pub struct SharedContent {
    pub kind: ShareKind,
    pub item: SharedItem,
}

// =============================================================================
// Notices (server notifications)
// =============================================================================

/// A server-side notification (friend request received, share received, ...).
///
/// Named `Notice` to keep it distinct from the in-app toast notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: String,
    pub data: Value,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notice {
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Human-readable line for the activity feed: the embedded message when
    /// the server sent one, otherwise the notice kind.
    #[must_use]
    pub fn summary(&self) -> String {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.kind.replace(['_', '-'], " "))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNotice {
    id: NoticeId,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    read_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RawNotice> for Notice {
    fn from(raw: RawNotice) -> Self {
        Self {
            id: raw.id,
            kind: raw.kind,
            data: raw.data,
            read_at: parse_timestamp(raw.read_at),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn photo_prefers_current_aliases() {
        let raw: RawPhoto = serde_json::from_value(json!({
            "id": 7,
            "path": "photos/7.jpg",
            "thumb_path": "thumbs/7.jpg",
            "original_filename": "beach.jpg",
            "mime": "image/jpeg",
            "size": 1024,
            "is_favorite": true,
            "captured_at": "2025-06-01T10:00:00Z",
            "created_at": "2025-06-02 08:30:00"
        }))
        .expect("raw photo should decode");

        let photo: Photo = raw.into();
        assert_eq!(photo.file_path, "photos/7.jpg");
        assert_eq!(photo.thumbnail_path.as_deref(), Some("thumbs/7.jpg"));
        assert_eq!(photo.mime, "image/jpeg");
        assert!(photo.is_favorite);
        assert!(photo.captured_at.is_some());
        assert!(photo.created_at.is_some());
    }

    #[test]
    fn photo_falls_back_to_legacy_aliases() {
        let raw: RawPhoto = serde_json::from_value(json!({
            "id": 8,
            "file_path": "photos/8.mp4",
            "thumbnail_path": "thumbs/8.jpg",
            "mime_type": "video/mp4",
            "taken_at": "2024-12-24T20:00:00Z",
            "duration": 12.5
        }))
        .expect("raw photo should decode");

        let photo: Photo = raw.into();
        assert_eq!(photo.file_path, "photos/8.mp4");
        assert_eq!(photo.thumbnail_path.as_deref(), Some("thumbs/8.jpg"));
        assert_eq!(photo.mime, "video/mp4");
        assert!(photo.is_video());
        assert!(photo.captured_at.is_some());
        assert_eq!(photo.duration_secs, Some(12.5));
    }

    #[test]
    fn display_path_prefers_thumbnail() {
        let photo = Photo {
            id: 1,
            file_path: "photos/full.jpg".into(),
            thumbnail_path: Some("thumbs/small.jpg".into()),
            original_filename: "full.jpg".into(),
            mime: "image/jpeg".into(),
            size: 0,
            width: None,
            height: None,
            is_favorite: false,
            captured_at: None,
            created_at: None,
            deleted_at: None,
            location: None,
            duration_secs: None,
        };
        assert_eq!(photo.display_path(), "thumbs/small.jpg");
    }

    #[test]
    fn batch_summary_mentions_uploaded_and_restored() {
        let outcome = BatchUploadOutcome {
            photos: Vec::new(),
            uploaded: 2,
            restored: 1,
            duplicates: 0,
        };
        let message = outcome.summary_message();
        assert!(message.contains("Uploaded 2"), "{message}");
        assert!(message.contains("restored 1"), "{message}");
        assert!(!message.contains("duplicate"), "{message}");
    }

    #[test]
    fn album_counts_fall_back_to_embedded_photos() {
        let raw: RawAlbum = serde_json::from_value(json!({
            "id": 3,
            "name": "Holiday",
            "photos": [
                {"id": 1, "path": "a.jpg", "mime": "image/jpeg"},
                {"id": 2, "path": "b.jpg", "mime": "image/jpeg"}
            ]
        }))
        .expect("raw album should decode");

        let album: Album = raw.into();
        assert_eq!(album.photos_count, 2);
        assert_eq!(album.photos.len(), 2);
    }

    #[test]
    fn shared_item_resolves_album_from_class_name() {
        let item = parse_shared_item(
            Some("App\\Models\\Album"),
            Some(json!({"id": 5, "name": "Trip"})),
        );
        assert!(matches!(item, Some(SharedItem::Album(album)) if album.name == "Trip"));
    }

    #[test]
    fn shared_item_defaults_to_photo() {
        let item = parse_shared_item(
            Some("photo"),
            Some(json!({"id": 9, "path": "p.jpg", "mime": "image/jpeg"})),
        );
        assert!(matches!(item, Some(SharedItem::Photo(photo)) if photo.id == 9));
    }

    #[test]
    fn friend_request_picks_whichever_side_is_present() {
        let raw: RawFriendRequest = serde_json::from_value(json!({
            "id": 11,
            "friend": {"id": 2, "name": "Mai", "email": "mai@example.com"},
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .expect("raw request should decode");

        let request: FriendRequest = raw.into();
        let counterpart = request.counterpart.expect("counterpart should be set");
        assert_eq!(counterpart.name, "Mai");
    }

    #[test]
    fn notice_summary_prefers_embedded_message() {
        let notice = Notice {
            id: 1,
            kind: "friend_request".into(),
            data: json!({"message": "Mai sent you a friend request"}),
            read_at: None,
            created_at: None,
        };
        assert_eq!(notice.summary(), "Mai sent you a friend request");

        let bare = Notice {
            id: 2,
            kind: "share_received".into(),
            data: json!({}),
            read_at: None,
            created_at: None,
        };
        assert_eq!(bare.summary(), "share received");
        assert!(!bare.is_read());
    }

    #[test]
    fn timestamps_parse_both_known_formats() {
        assert!(parse_timestamp(Some("2025-06-01T10:00:00Z".into())).is_some());
        assert!(parse_timestamp(Some("2025-06-01 10:00:00".into())).is_some());
        assert!(parse_timestamp(Some("not a date".into())).is_none());
        assert!(parse_timestamp(None).is_none());
    }
}
