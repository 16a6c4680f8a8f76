// SPDX-License-Identifier: MPL-2.0
//! Album endpoints.

use super::types::{Album, AlbumId, AutoAlbumOutcome, PhotoId, RawAlbum};
use super::{ApiClient, ApiResult};
use serde_json::json;

impl ApiClient {
    pub async fn list_albums(&self) -> ApiResult<Vec<Album>> {
        let raw: Vec<RawAlbum> = self.data(self.get("/api/albums")).await?;
        Ok(raw.into_iter().map(Album::from).collect())
    }

    /// Fetches an album including its photo membership.
    pub async fn get_album(&self, id: AlbumId) -> ApiResult<Album> {
        let raw: RawAlbum = self.data(self.get(&format!("/api/albums/{id}"))).await?;
        Ok(raw.into())
    }

    /// Creates an album, optionally seeding it with photos.
    pub async fn create_album(&self, name: &str, photo_ids: &[PhotoId]) -> ApiResult<Album> {
        let body = if photo_ids.is_empty() {
            json!({ "name": name })
        } else {
            json!({ "name": name, "photo_ids": photo_ids })
        };
        let raw: RawAlbum = self.data(self.post("/api/albums").json(&body)).await?;
        Ok(raw.into())
    }

    pub async fn rename_album(&self, id: AlbumId, name: &str) -> ApiResult<()> {
        let body = json!({ "name": name });
        self.accept(self.put(&format!("/api/albums/{id}")).json(&body))
            .await
    }

    /// Deletes an album. Member photos are left untouched.
    pub async fn delete_album(&self, id: AlbumId) -> ApiResult<()> {
        self.accept(self.delete(&format!("/api/albums/{id}"))).await
    }

    pub async fn add_photos_to_album(&self, id: AlbumId, photo_ids: &[PhotoId]) -> ApiResult<()> {
        let body = json!({ "photo_ids": photo_ids });
        self.accept(self.post(&format!("/api/albums/{id}/photos")).json(&body))
            .await
    }

    pub async fn remove_photos_from_album(
        &self,
        id: AlbumId,
        photo_ids: &[PhotoId],
    ) -> ApiResult<()> {
        let body = json!({ "photo_ids": photo_ids });
        self.accept(self.delete(&format!("/api/albums/{id}/photos")).json(&body))
            .await
    }

    pub async fn set_album_cover(&self, id: AlbumId, photo_id: PhotoId) -> ApiResult<()> {
        let body = json!({ "photo_id": photo_id });
        self.accept(self.put(&format!("/api/albums/{id}/cover")).json(&body))
            .await
    }

    /// Asks the server to group photos into albums by capture date.
    pub async fn auto_create_albums(&self, min_photos: Option<u32>) -> ApiResult<AutoAlbumOutcome> {
        let body = match min_photos {
            Some(min) => json!({ "type": "date", "min_photos": min }),
            None => json!({ "type": "date" }),
        };
        let response = self
            .send(self.post("/api/albums/auto-create").json(&body))
            .await?;
        response
            .json()
            .await
            .map_err(|e| super::ApiError::Decode(e.to_string()))
    }
}
