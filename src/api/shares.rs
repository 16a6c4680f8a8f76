// SPDX-License-Identifier: MPL-2.0
//! Direct shares and public share links.

use super::types::{
    AlbumId, FriendId, PhotoId, RawShare, RawShareLink, Share, ShareKind, ShareLink, ShareLinkId,
    SharedContent,
};
use super::{ApiClient, ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Response of the share link creation endpoint.
#[derive(Debug, Clone)]
pub struct CreatedShareLink {
    pub url: String,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawCreatedShareLink {
    url: String,
    token: String,
    #[serde(default)]
    expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSharedContent {
    #[serde(rename = "type")]
    kind: ShareKind,
    data: serde_json::Value,
}

impl ApiClient {
    pub async fn shares_sent(&self) -> ApiResult<Vec<Share>> {
        let raw: Vec<RawShare> = self.data(self.get("/api/shares/sent")).await?;
        Ok(raw.into_iter().map(Share::from).collect())
    }

    pub async fn shares_received(&self) -> ApiResult<Vec<Share>> {
        let raw: Vec<RawShare> = self.data(self.get("/api/shares/received")).await?;
        Ok(raw.into_iter().map(Share::from).collect())
    }

    /// Shares photos or an album directly with friends.
    pub async fn share_with_friends(
        &self,
        friend_ids: &[FriendId],
        photo_ids: &[PhotoId],
        album_id: Option<AlbumId>,
        message: Option<&str>,
    ) -> ApiResult<()> {
        let mut body = serde_json::Map::new();
        body.insert("friend_ids".into(), json!(friend_ids));
        if !photo_ids.is_empty() {
            body.insert("photo_ids".into(), json!(photo_ids));
        }
        if let Some(album_id) = album_id {
            body.insert("album_id".into(), json!(album_id));
        }
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            body.insert("message".into(), json!(message));
        }
        self.accept(
            self.post("/api/shares")
                .json(&serde_json::Value::Object(body)),
        )
        .await
    }

    pub async fn list_share_links(&self) -> ApiResult<Vec<ShareLink>> {
        let raw: Vec<RawShareLink> = self.data(self.get("/api/share-links")).await?;
        Ok(raw.into_iter().map(ShareLink::from).collect())
    }

    /// Creates a public link for a photo or album, optionally time-limited.
    pub async fn create_share_link(
        &self,
        kind: ShareKind,
        id: u64,
        expires_in_days: Option<u32>,
    ) -> ApiResult<CreatedShareLink> {
        let body = match expires_in_days {
            Some(days) => json!({ "type": kind.as_str(), "id": id, "expires_in_days": days }),
            None => json!({ "type": kind.as_str(), "id": id }),
        };
        let response = self.send(self.post("/api/share-links").json(&body)).await?;
        let raw: RawCreatedShareLink = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(CreatedShareLink {
            url: raw.url,
            token: raw.token,
            expires_at: raw
                .expires_at
                .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
        })
    }

    pub async fn delete_share_link(&self, id: ShareLinkId) -> ApiResult<()> {
        self.accept(self.delete(&format!("/api/share-links/{id}")))
            .await
    }

    /// Resolves a public share token without authentication.
    pub async fn resolve_share_token(&self, token: &str) -> ApiResult<SharedContent> {
        let response = self.send(self.get(&format!("/api/share/{token}"))).await?;
        let raw: RawSharedContent = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let item = super::types::parse_shared_item(Some(raw.kind.as_str()), Some(raw.data))
            .ok_or_else(|| ApiError::Decode("share payload missing item".to_string()))?;
        Ok(SharedContent {
            kind: raw.kind,
            item,
        })
    }
}
