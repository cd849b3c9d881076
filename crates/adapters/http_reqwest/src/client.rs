//! reqwest-backed implementation of the `StatusApi` port.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use aini_app::ports::StatusApi;
use aini_app::ports::status_api::{SETTINGS_PATH, STATUS_PATH};
use aini_domain::action::{ActionResponse, ServerAction};
use aini_domain::error::FetchError;
use aini_domain::server::ServerKind;
use aini_domain::settings::SettingsResponse;
use aini_domain::status::PollResult;

use crate::error::HttpError;

/// Connection settings for the dashboard backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the underlying client cannot be created.
    pub fn build(self) -> Result<ReqwestStatusApi, HttpError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(HttpError::Build)?;
        Ok(ReqwestStatusApi {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Error envelope of the backend on non-2xx responses.
///
/// `detail` is a string for command failures and a list for request validation errors.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn error_detail(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;
    match body.detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// [`StatusApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestStatusApi {
    client: Client,
    base_url: String,
}

impl ReqwestStatusApi {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, HttpError> {
        let response = request.send().await.map_err(HttpError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(HttpError::Transport)?;
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        serde_json::from_slice(&body).map_err(HttpError::Decode)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        tracing::trace!(path, "GET");
        Ok(Self::send(self.client.get(self.url(path))).await?)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        tracing::trace!(path, "POST");
        Ok(Self::send(self.client.post(self.url(path))).await?)
    }
}

impl StatusApi for ReqwestStatusApi {
    fn fetch_status(&self) -> impl Future<Output = Result<PollResult, FetchError>> {
        self.get(STATUS_PATH)
    }

    fn fetch_settings(&self) -> impl Future<Output = Result<SettingsResponse, FetchError>> {
        self.get(SETTINGS_PATH)
    }

    fn post_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> impl Future<Output = Result<ActionResponse, FetchError>> {
        let path = action.path(server);
        async move { self.post(&path).await }
    }
}
