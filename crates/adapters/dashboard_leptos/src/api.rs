//! `StatusApi` over `gloo-net`, for calls to the same-origin `/api/*` routes.

use std::future::Future;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use aini_app::ports::StatusApi;
use aini_app::ports::status_api::{SETTINGS_PATH, STATUS_PATH};
use aini_domain::action::{ActionResponse, ServerAction};
use aini_domain::error::FetchError;
use aini_domain::server::ServerKind;
use aini_domain::settings::SettingsResponse;
use aini_domain::status::PollResult;

fn fetch_error(err: gloo_net::Error) -> FetchError {
    match err {
        gloo_net::Error::SerdeError(err) => FetchError::Decode(err.to_string()),
        other => FetchError::Transport(other.to_string()),
    }
}

/// JSON error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, FetchError> {
    if resp.ok() {
        return Ok(resp);
    }
    let detail = match resp.json::<ErrorBody>().await.map(|body| body.detail) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(serde_json::Value::Null) | Err(_) => None,
        Ok(other) => Some(other.to_string()),
    };
    Err(FetchError::Application(
        detail.unwrap_or_else(|| format!("HTTP {}", resp.status())),
    ))
}

async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let resp = request.send().await.map_err(fetch_error)?;
    let resp = check_response(resp).await?;
    resp.json().await.map_err(fetch_error)
}

/// Browser client for the dashboard backend.
///
/// Paths are resolved against the page origin, so the dashboard must be
/// served by the same backend that exposes `/api`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooStatusApi;

impl StatusApi for GlooStatusApi {
    fn fetch_status(&self) -> impl Future<Output = Result<PollResult, FetchError>> {
        read(Request::get(STATUS_PATH))
    }

    fn fetch_settings(&self) -> impl Future<Output = Result<SettingsResponse, FetchError>> {
        read(Request::get(SETTINGS_PATH))
    }

    fn post_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> impl Future<Output = Result<ActionResponse, FetchError>> {
        let path = action.path(server);
        async move { read(Request::post(&path)).await }
    }
}
