// SPDX-License-Identifier: MPL-2.0
//! Server notification endpoints (the activity feed).

use super::types::{Notice, NoticeId, RawNotice};
use super::{ApiClient, ApiError, ApiResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CountBody {
    count: u32,
}

impl ApiClient {
    pub async fn list_notices(&self) -> ApiResult<Vec<Notice>> {
        let raw: Vec<RawNotice> = self.data(self.get("/api/notifications")).await?;
        Ok(raw.into_iter().map(Notice::from).collect())
    }

    /// Number of unread notices, shown as a badge in the navbar.
    pub async fn unread_notice_count(&self) -> ApiResult<u32> {
        let response = self.send(self.get("/api/notifications/unread-count")).await?;
        let body: CountBody = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.count)
    }

    pub async fn mark_notice_read(&self, id: NoticeId) -> ApiResult<()> {
        self.accept(self.post(&format!("/api/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_notices_read(&self) -> ApiResult<()> {
        self.accept(self.post("/api/notifications/read-all")).await
    }
}
