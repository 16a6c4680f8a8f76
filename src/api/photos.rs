// SPDX-License-Identifier: MPL-2.0
//! Photo and video endpoints.
//!
//! Videos share the photo storage: they are uploaded through the same batch
//! endpoint and only differ in MIME type. The dedicated `/api/videos` routes
//! are list-only conveniences.

use super::types::{BatchUploadOutcome, Photo, PhotoId, RawBatchUploadResponse, RawPhoto};
use super::{ApiClient, ApiError, ApiResult};

/// Sort orders accepted by the photo list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoSort {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    CapturedAsc,
    CapturedDesc,
}

impl PhotoSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoSort::Newest => "newest",
            PhotoSort::Oldest => "oldest",
            PhotoSort::NameAsc => "name_asc",
            PhotoSort::NameDesc => "name_desc",
            PhotoSort::CapturedAsc => "captured_asc",
            PhotoSort::CapturedDesc => "captured_desc",
        }
    }
}

/// Filters for the photo list endpoint. Empty fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default)]
pub struct PhotoListParams {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<PhotoSort>,
}

impl PhotoListParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("q", search.to_string()));
        }
        if let Some(sort) = self.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        query
    }
}

/// One file of a batch upload, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub async fn list_photos(&self, params: &PhotoListParams) -> ApiResult<Vec<Photo>> {
        let raw: Vec<RawPhoto> = self
            .data(self.get("/api/photos").query(&params.query()))
            .await?;
        Ok(raw.into_iter().map(Photo::from).collect())
    }

    pub async fn list_videos(&self, page: Option<u32>) -> ApiResult<Vec<Photo>> {
        let mut builder = self.get("/api/videos");
        if let Some(page) = page {
            builder = builder.query(&[("page", page.to_string())]);
        }
        let raw: Vec<RawPhoto> = self.data(builder).await?;
        Ok(raw.into_iter().map(Photo::from).collect())
    }

    pub async fn get_photo(&self, id: PhotoId) -> ApiResult<Photo> {
        let raw: RawPhoto = self.data(self.get(&format!("/api/photos/{id}"))).await?;
        Ok(raw.into())
    }

    /// Uploads a whole batch as one multipart request.
    ///
    /// The backend expects every file under the array field `photos[]` and
    /// answers with aggregate counters; there is no per-file granularity.
    pub async fn upload_photos(&self, parts: Vec<UploadPart>) -> ApiResult<BatchUploadOutcome> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            let file = reqwest::multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(&part.mime)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            form = form.part("photos[]", file);
        }

        // The batch response carries counters next to `data`, so it bypasses
        // the envelope helper.
        let response = self.send(self.post("/api/photos").multipart(form)).await?;
        let raw: RawBatchUploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(raw.into())
    }

    /// Moves a photo to the trash (soft delete, reversible).
    pub async fn delete_photo(&self, id: PhotoId) -> ApiResult<()> {
        self.accept(self.delete(&format!("/api/photos/{id}"))).await
    }

    /// Restores a trashed photo.
    pub async fn restore_photo(&self, id: PhotoId) -> ApiResult<()> {
        self.accept(self.post(&format!("/api/photos/{id}/restore")))
            .await
    }

    /// Permanently deletes a trashed photo.
    pub async fn force_delete_photo(&self, id: PhotoId) -> ApiResult<()> {
        self.accept(self.delete(&format!("/api/photos/{id}/force")))
            .await
    }

    pub async fn toggle_favorite(&self, id: PhotoId) -> ApiResult<()> {
        self.accept(self.post(&format!("/api/photos/{id}/favorite")))
            .await
    }

    pub async fn favorite_photos(&self) -> ApiResult<Vec<Photo>> {
        let raw: Vec<RawPhoto> = self.data(self.get("/api/photos/favorites")).await?;
        Ok(raw.into_iter().map(Photo::from).collect())
    }

    pub async fn trashed_photos(&self) -> ApiResult<Vec<Photo>> {
        let raw: Vec<RawPhoto> = self.data(self.get("/api/photos/trash")).await?;
        Ok(raw.into_iter().map(Photo::from).collect())
    }

    /// Downloads the original file bytes.
    pub async fn download_photo(&self, id: PhotoId) -> ApiResult<Vec<u8>> {
        let response = self
            .send(self.get(&format!("/api/photos/{id}/download")))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_omit_empty_fields() {
        let params = PhotoListParams::default();
        assert!(params.query().is_empty());

        let params = PhotoListParams {
            page: Some(2),
            search: Some(String::new()),
            sort: Some(PhotoSort::CapturedDesc),
        };
        let query = params.query();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("page", "2".to_string())));
        assert!(query.contains(&("sort", "captured_desc".to_string())));
    }

    #[test]
    fn sort_keys_match_backend_values() {
        assert_eq!(PhotoSort::Newest.as_str(), "newest");
        assert_eq!(PhotoSort::NameDesc.as_str(), "name_desc");
    }
}
