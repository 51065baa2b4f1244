use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::config::Config;
use crate::models::{
    CreatePostRequest, Credentials, LoginResponse, Post, PostEnvelope, PostId, PostsEnvelope,
    PublishedUpdate,
};
use crate::session::SessionStore;

/// Standard User-Agent header for postdesk API requests.
pub const USER_AGENT: &str = concat!("postdesk/", env!("CARGO_PKG_VERSION"));

/// Result of `DELETE /posts/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Server answered exactly 200.
    Deleted,
    /// Server answered some other 2xx; the deletion is not confirmed.
    Unconfirmed(u16),
}

/// HTTP client for the blog API.
///
/// Reads the token from the shared session on every request. Never mutates
/// the session: callers decide what a 401 means for them.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        login_path: impl Into<String>,
        session: SessionStore,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            login_path: login_path.into(),
            session,
        })
    }

    /// Creates a client from config (base URL precedence: env > config).
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config, session: SessionStore) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        Self::new(
            base_url,
            config.request_timeout(),
            config.login_path.clone(),
            session,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(USER_AGENT_HEADER, USER_AGENT);

        if let Some(value) = self.session.token().as_deref().and_then(bearer_value) {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder
    }

    /// Sends a request and applies the status contract.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!("api request failed: {e}");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "api returned 401");
            return Err(ApiError::unauthorized());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::http_status(status.as_u16(), &body);
            warn!("api error: {err}");
            return Err(err);
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse(format!("Unexpected response: {e}")))
    }

    /// `GET /posts`
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure, non-2xx status, or a bad envelope.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.send(self.request(Method::GET, "/posts")).await?;
        let envelope: PostsEnvelope = Self::read_json(response).await?;
        Ok(envelope.posts)
    }

    /// `GET /posts/{id}`
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure, non-2xx status, or a bad envelope.
    pub async fn get_post(&self, id: &PostId) -> Result<Post, ApiError> {
        let path = format!("/posts/{id}");
        let response = self.send(self.request(Method::GET, &path)).await?;
        let envelope: PostEnvelope = Self::read_json(response).await?;
        Ok(envelope.post)
    }

    /// `POST /posts`
    ///
    /// Returns the created post when the server echoes one back.
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure or non-2xx status.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Option<Post>, ApiError> {
        let response = self
            .send(self.request(Method::POST, "/posts").json(request))
            .await?;
        let body = response.text().await.map_err(ApiError::from)?;
        Ok(serde_json::from_str::<PostEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.post))
    }

    /// `PUT /posts/{id}` with only `isPublished` in the body.
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure, non-2xx status, or a bad envelope.
    pub async fn set_published(&self, id: &PostId, is_published: bool) -> Result<Post, ApiError> {
        let path = format!("/posts/{id}");
        let body = PublishedUpdate { is_published };
        let response = self
            .send(self.request(Method::PUT, &path).json(&body))
            .await?;
        let envelope: PostEnvelope = Self::read_json(response).await?;
        Ok(envelope.post)
    }

    /// `DELETE /posts/{id}`
    ///
    /// Only an exact 200 counts as deleted.
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure or non-2xx status.
    pub async fn delete_post(&self, id: &PostId) -> Result<DeleteOutcome, ApiError> {
        let path = format!("/posts/{id}");
        let response = self.send(self.request(Method::DELETE, &path)).await?;
        let status = response.status();
        if status == StatusCode::OK {
            Ok(DeleteOutcome::Deleted)
        } else {
            debug!(%status, "delete answered without 200");
            Ok(DeleteOutcome::Unconfirmed(status.as_u16()))
        }
    }

    /// Exchanges credentials for a token at the configured login path.
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failure, non-2xx status, or a bad body.
    pub async fn log_in(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let response = self
            .send(
                self.request(Method::POST, &self.login_path)
                    .json(credentials),
            )
            .await?;
        Self::read_json(response).await
    }
}

/// Builds the Authorization header value. A token that already carries a
/// scheme is sent verbatim.
fn bearer_value(token: &str) -> Option<HeaderValue> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let value = if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    };
    HeaderValue::from_str(&value).ok()
}
