// SPDX-License-Identifier: MPL-2.0
//! Authentication and profile endpoints.

use super::types::{AuthSession, RawAuthResponse, RawUser, StorageInfo, User};
use super::{ApiClient, ApiError, ApiResult};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct UserBody {
    user: RawUser,
}

#[derive(Debug, Deserialize)]
struct AvatarBody {
    avatar_path: String,
}

#[derive(Debug, Deserialize)]
struct StorageBody {
    storage: StorageInfo,
}

impl ApiClient {
    /// Exchanges credentials for a bearer token and the account profile.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let body = json!({ "email": email, "password": password });
        let raw: RawAuthResponse = self.data(self.post("/api/auth/login").json(&body)).await?;
        Ok(raw.into())
    }

    /// Creates an account and returns a fresh session.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> ApiResult<AuthSession> {
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password_confirmation,
        });
        let raw: RawAuthResponse = self.data(self.post("/api/auth/register").json(&body)).await?;
        Ok(raw.into())
    }

    /// Revokes the current token server-side. The caller still clears the
    /// local token afterwards.
    pub async fn logout(&self) -> ApiResult<()> {
        self.accept(self.post("/api/auth/logout")).await
    }

    /// Fetches the profile for the current token.
    pub async fn me(&self) -> ApiResult<User> {
        let body: UserBody = self.data(self.get("/api/auth/user")).await?;
        Ok(body.user.into())
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        let body = json!({ "email": email });
        self.accept(self.post("/api/auth/forgot-password").json(&body))
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> ApiResult<()> {
        let body = json!({
            "token": token,
            "email": email,
            "password": password,
            "password_confirmation": password_confirmation,
        });
        self.accept(self.post("/api/auth/reset-password").json(&body))
            .await
    }

    /// Updates the account name and/or email. Omitted fields are untouched.
    pub async fn update_profile(
        &self,
        name: Option<&str>,
        email: Option<&str>,
    ) -> ApiResult<User> {
        let mut body = serde_json::Map::new();
        if let Some(name) = name {
            body.insert("name".into(), json!(name));
        }
        if let Some(email) = email {
            body.insert("email".into(), json!(email));
        }
        let body: UserBody = self
            .data(self.patch("/api/profile").json(&serde_json::Value::Object(body)))
            .await?;
        Ok(body.user.into())
    }

    pub async fn update_password(
        &self,
        current_password: &str,
        password: &str,
        password_confirmation: &str,
    ) -> ApiResult<()> {
        let body = json!({
            "current_password": current_password,
            "password": password,
            "password_confirmation": password_confirmation,
        });
        self.accept(self.put("/api/auth/password").json(&body)).await
    }

    /// Uploads a new avatar image and returns its storage path.
    pub async fn upload_avatar(&self, file: &Path) -> ApiResult<String> {
        let bytes = std::fs::read(file).map_err(|e| ApiError::Network(e.to_string()))?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());
        let mime = crate::media::mime_for_path(file).unwrap_or("application/octet-stream");

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("avatar", part);

        let body: AvatarBody = self
            .data(self.post("/api/profile/avatar").multipart(form))
            .await?;
        Ok(body.avatar_path)
    }

    /// Fetches storage quota usage for the account screen.
    pub async fn storage_info(&self) -> ApiResult<StorageInfo> {
        let body: StorageBody = self.data(self.get("/api/profile/storage")).await?;
        Ok(body.storage)
    }
}
