// SPDX-License-Identifier: MPL-2.0
//! Friend relationship endpoints.
//!
//! Rejecting an incoming request, cancelling an outgoing one, and removing
//! an accepted friend all hit the same DELETE route; the distinct methods
//! exist so call sites read like the action the user took.

use super::types::{Friend, FriendId, FriendsSummary, RawFriend, RawFriendsSummary};
use super::{ApiClient, ApiResult};
use serde_json::json;

impl ApiClient {
    /// Full relationship summary: accepted, incoming, outgoing, blocked.
    pub async fn friends_summary(&self) -> ApiResult<FriendsSummary> {
        let raw: RawFriendsSummary = self.data(self.get("/api/friends")).await?;
        Ok(raw.into())
    }

    /// Accepted friends only (for pickers).
    pub async fn friends_list(&self) -> ApiResult<Vec<Friend>> {
        let raw: Vec<RawFriend> = self.data(self.get("/api/friends/list")).await?;
        Ok(raw.into_iter().map(Friend::from).collect())
    }

    pub async fn send_friend_request(&self, email: &str) -> ApiResult<()> {
        let body = json!({ "email": email });
        self.accept(self.post("/api/friends").json(&body)).await
    }

    pub async fn accept_friend_request(&self, id: FriendId) -> ApiResult<()> {
        self.accept(self.patch(&format!("/api/friends/{id}"))).await
    }

    pub async fn reject_friend_request(&self, id: FriendId) -> ApiResult<()> {
        self.remove_relationship(id).await
    }

    pub async fn cancel_friend_request(&self, id: FriendId) -> ApiResult<()> {
        self.remove_relationship(id).await
    }

    pub async fn remove_friend(&self, id: FriendId) -> ApiResult<()> {
        self.remove_relationship(id).await
    }

    async fn remove_relationship(&self, id: FriendId) -> ApiResult<()> {
        self.accept(self.delete(&format!("/api/friends/{id}"))).await
    }

    pub async fn block_friend(&self, id: FriendId) -> ApiResult<()> {
        self.accept(self.post(&format!("/api/friends/{id}/block")))
            .await
    }

    pub async fn unblock_friend(&self, id: FriendId) -> ApiResult<()> {
        self.accept(self.post(&format!("/api/friends/{id}/unblock")))
            .await
    }
}
