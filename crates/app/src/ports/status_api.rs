//! Status API port — the backend endpoints the dashboard consumes.
//!
//! Implementations only move bytes: they classify transport and decode
//! failures into [`FetchError`] and return the decoded body as-is.
//! Interpreting `success: false` is left to [`StatusClient`](crate::services::status_client::StatusClient).

use std::future::Future;

use aini_domain::action::{ActionResponse, ServerAction};
use aini_domain::error::FetchError;
use aini_domain::server::ServerKind;
use aini_domain::settings::SettingsResponse;
use aini_domain::status::PollResult;

/// Path of the status endpoint.
pub const STATUS_PATH: &str = "/api/status";
/// Path of the settings endpoint.
pub const SETTINGS_PATH: &str = "/api/settings";

/// HTTP access to the dashboard backend.
///
/// Futures are not required to be `Send`: the browser client is single-threaded.
pub trait StatusApi {
    /// `GET /api/status`.
    fn fetch_status(&self) -> impl Future<Output = Result<PollResult, FetchError>>;

    /// `GET /api/settings`.
    fn fetch_settings(&self) -> impl Future<Output = Result<SettingsResponse, FetchError>>;

    /// `POST /api/{action}/{server}`.
    fn post_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> impl Future<Output = Result<ActionResponse, FetchError>>;
}
