use std::time::Duration;

use async_trait::async_trait;
use ipa_application::{UpdateUserInput, UserDirectory};
use ipa_core::{AppError, AppResult};
use ipa_domain::{DirectoryUser, UserId};
use reqwest::{Method, RequestBuilder, Response, header};
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Error body returned by the user administration API.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

/// User directory backed by the administration REST API.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    http_client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpUserDirectory {
    /// Creates a directory client for `base_url` (for example `http://host/api`).
    pub fn new(base_url: Url, bearer_token: Option<String>, timeout: Duration) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "user directory base url '{base_url}' cannot carry a path"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url,
            bearer_token: bearer_token.filter(|token| !token.trim().is_empty()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!("base url '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|error| AppError::Remote(format!("failed to {action}: {error}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = remote_error_message(status.as_u16(), body.as_str(), action);
        warn!(status = status.as_u16(), error = %message, "user directory request failed");

        Err(AppError::Remote(message))
    }
}

/// Extracts the human-readable message from an API error response.
fn remote_error_message(status: u16, body: &str, action: &str) -> String {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("failed to {action} (status {status})"))
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        let url = self.endpoint(&["admin", "users"])?;
        let response = self
            .send(self.request(Method::GET, url), "fetch users")
            .await?;

        response
            .json::<Vec<DirectoryUser>>()
            .await
            .map_err(|error| AppError::Remote(format!("failed to parse user list: {error}")))
    }

    async fn update_user(
        &self,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<DirectoryUser> {
        let id = user_id.to_string();
        let url = self.endpoint(&["admin", "users", id.as_str()])?;
        let response = self
            .send(
                self.request(Method::PUT, url).json(&input),
                "update user",
            )
            .await?;

        response
            .json::<DirectoryUser>()
            .await
            .map_err(|error| AppError::Remote(format!("failed to parse updated user: {error}")))
    }
}
