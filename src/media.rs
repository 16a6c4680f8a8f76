// SPDX-License-Identifier: MPL-2.0
//! Media kind detection for local files.
//!
//! The upload queue only accepts files the service can store: anything with
//! an `image/*` or `video/*` MIME type. Detection is extension-based, which
//! mirrors what the server's own validator accepts.

use std::path::Path;

/// Represents different types of media formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Supported file extensions, grouped by media kind.
pub mod extensions {
    /// Image formats accepted by the upload endpoint.
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];

    /// Video formats accepted by the upload endpoint.
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "avi", "webm", "mkv"];
}

/// Detects the media kind of a file from its extension.
///
/// Returns `None` for unknown or missing extensions.
pub fn detect_media_kind<P: AsRef<Path>>(path: P) -> Option<MediaKind> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)?;

    if extensions::IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Image)
    } else if extensions::VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Returns the MIME type string for a supported file, or `None` if the
/// extension is not one the service accepts.
pub fn mime_for_path<P: AsRef<Path>>(path: P) -> Option<&'static str> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)?;

    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => return None,
    };
    Some(mime)
}

/// Checks whether a file can be queued for upload.
pub fn is_supported_upload<P: AsRef<Path>>(path: P) -> bool {
    detect_media_kind(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_image_extensions() {
        assert_eq!(detect_media_kind("photo.jpg"), Some(MediaKind::Image));
        assert_eq!(detect_media_kind("photo.JPEG"), Some(MediaKind::Image));
        assert_eq!(detect_media_kind("photo.png"), Some(MediaKind::Image));
        assert_eq!(detect_media_kind("photo.heic"), Some(MediaKind::Image));
    }

    #[test]
    fn detects_video_extensions() {
        assert_eq!(detect_media_kind("clip.mp4"), Some(MediaKind::Video));
        assert_eq!(detect_media_kind("clip.MOV"), Some(MediaKind::Video));
        assert_eq!(detect_media_kind("clip.mkv"), Some(MediaKind::Video));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert_eq!(detect_media_kind("notes.txt"), None);
        assert_eq!(detect_media_kind("archive.zip"), None);
        assert_eq!(detect_media_kind("no_extension"), None);
    }

    #[test]
    fn mime_starts_with_image_or_video() {
        for ext in extensions::IMAGE_EXTENSIONS {
            let path = PathBuf::from(format!("f.{ext}"));
            let mime = mime_for_path(&path).expect("image ext should have a mime");
            assert!(mime.starts_with("image/"), "{mime}");
        }
        for ext in extensions::VIDEO_EXTENSIONS {
            let path = PathBuf::from(format!("f.{ext}"));
            let mime = mime_for_path(&path).expect("video ext should have a mime");
            assert!(mime.starts_with("video/"), "{mime}");
        }
    }

    #[test]
    fn unsupported_file_has_no_mime() {
        assert_eq!(mime_for_path("c.txt"), None);
        assert!(!is_supported_upload("c.txt"));
    }
}
