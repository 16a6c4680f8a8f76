// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the photo service REST API.
//!
//! The [`ApiClient`] is constructed explicitly from configuration and passed
//! into every async task that talks to the server. There is no ambient
//! global client: the bearer token lives on the instance and is set or
//! cleared through explicit methods.
//!
//! Endpoints return either `{ "data": ... }` envelopes or flat bodies
//! depending on their generation; [`ApiClient::data`] accepts both. Non-2xx
//! responses carry a JSON `{ message, errors? }` body which is mapped onto
//! the [`ApiError`] taxonomy and surfaced to the user as a single line.

pub mod albums;
pub mod auth;
pub mod friends;
pub mod notices;
pub mod photos;
pub mod shares;
pub mod types;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the service.
///
/// Every variant carries a message fit for a one-line toast; nothing here is
/// retried automatically and nothing is rethrown to a global handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received at all (DNS, refused connection, reset).
    Network(String),
    /// 401 - the bearer token is missing, expired, or revoked.
    Unauthorized(String),
    /// 4xx with per-field validation errors.
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
    /// Any other 4xx rejection (403, 404, 409, ...).
    Rejected { status: u16, message: String },
    /// 5xx server failure.
    Server { status: u16, message: String },
    /// The response body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Returns the first field error, if any, for inline form display.
    pub fn first_field_error(&self) -> Option<&str> {
        match self {
            ApiError::Validation { errors, .. } => errors
                .values()
                .flat_map(|messages| messages.iter())
                .next()
                .map(String::as_str),
            _ => None,
        }
    }

    /// Whether the session should be treated as no longer authenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network request failed: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "{}", msg),
            ApiError::Validation { message, .. } => write!(f, "{}", message),
            ApiError::Rejected { message, .. } => write!(f, "{}", message),
            ApiError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response from server: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error payload returned by the service for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Response body that may or may not be wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaybeWrapped<T> {
    Wrapped { data: T },
    Flat(T),
}

impl<T> MaybeWrapped<T> {
    fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped { data } => data,
            MaybeWrapped::Flat(value) => value,
        }
    }
}

/// Client for the photo service REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted,
/// and clones snapshot the current token for the lifetime of a request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    storage_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for the given API and storage base URLs.
    pub fn new(api_url: &str, storage_url: &str) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("Photarium/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            storage_url: storage_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Stores the bearer token attached to every subsequent request.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forgets the bearer token (explicit logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a bearer token is currently set.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Joins an API path onto the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Builds an absolute URL for a storage-relative file path (thumbnails,
    /// avatars). Already-absolute paths are passed through unchanged.
    #[must_use]
    pub fn storage_file_url(&self, relative: &str) -> String {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            relative.to_string()
        } else {
            format!("{}/{}", self.storage_url, relative.trim_start_matches('/'))
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.endpoint(path)))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.endpoint(path)))
    }

    pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.put(self.endpoint(path)))
    }

    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.patch(self.endpoint(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.delete(self.endpoint(path)))
    }

    /// Sends a request and maps the status class onto [`ApiError`].
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ApiResult<reqwest::Response> {
        let response = builder
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status = status.as_u16();
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .unwrap_or_else(|| format!("Request failed ({})", status));

        Err(match status {
            401 => ApiError::Unauthorized(message),
            500..=599 => ApiError::Server { status, message },
            _ => match body.errors.filter(|errors| !errors.is_empty()) {
                Some(errors) => ApiError::Validation { message, errors },
                None => ApiError::Rejected { status, message },
            },
        })
    }

    /// Sends a request and decodes the body, accepting both `{ data: ... }`
    /// envelopes and flat bodies.
    pub(crate) async fn data<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(builder).await?;
        let wrapped: MaybeWrapped<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(wrapped.into_inner())
    }

    /// Sends a request and discards the body (201/204-style endpoints).
    pub(crate) async fn accept(&self, builder: reqwest::RequestBuilder) -> ApiResult<()> {
        self.send(builder).await.map(|_| ())
    }

    /// Fetches raw bytes from an absolute URL (thumbnails, downloads), with
    /// the bearer token attached.
    pub async fn fetch_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        let response = self.send(self.authorize(self.http.get(url))).await?;
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

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/", "http://localhost:8000/storage/")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = client();
        assert_eq!(
            client.endpoint("/api/photos"),
            "http://localhost:8000/api/photos"
        );
    }

    #[test]
    fn storage_url_passes_through_absolute_paths() {
        let client = client();
        assert_eq!(
            client.storage_file_url("https://cdn.example/thumb.jpg"),
            "https://cdn.example/thumb.jpg"
        );
        assert_eq!(
            client.storage_file_url("/thumbs/1.jpg"),
            "http://localhost:8000/storage/thumbs/1.jpg"
        );
    }

    #[test]
    fn token_lifecycle() {
        let mut client = client();
        assert!(!client.has_token());

        client.set_token("secret");
        assert_eq!(client.token(), Some("secret"));

        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn wrapped_and_flat_bodies_decode_the_same() {
        let wrapped: MaybeWrapped<Vec<u32>> =
            serde_json::from_str(r#"{"data":[1,2,3]}"#).expect("wrapped should decode");
        let flat: MaybeWrapped<Vec<u32>> =
            serde_json::from_str("[1,2,3]").expect("flat should decode");
        assert_eq!(wrapped.into_inner(), vec![1, 2, 3]);
        assert_eq!(flat.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn validation_error_exposes_first_field_message() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "email".to_string(),
            vec!["The email has already been taken.".to_string()],
        );
        let err = ApiError::Validation {
            message: "The given data was invalid.".into(),
            errors,
        };
        assert_eq!(
            err.first_field_error(),
            Some("The email has already been taken.")
        );
    }

    #[test]
    fn unauthorized_is_detected() {
        assert!(ApiError::Unauthorized("Unauthenticated.".into()).is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }

    #[test]
    fn display_is_one_line_per_variant() {
        let cases: Vec<ApiError> = vec![
            ApiError::Network("connection refused".into()),
            ApiError::Unauthorized("Unauthenticated.".into()),
            ApiError::Rejected {
                status: 404,
                message: "Not found".into(),
            },
            ApiError::Server {
                status: 500,
                message: "boom".into(),
            },
            ApiError::Decode("expected data".into()),
        ];
        for case in cases {
            let line = format!("{}", case);
            assert!(!line.is_empty());
            assert!(!line.contains('\n'));
        }
    }
}
