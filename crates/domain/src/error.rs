//! Common error types used across the workspace.
//!
//! Every failure that reaches the dashboard is one of three kinds: the request never got a
//! response ([`FetchError::Transport`]), the response body could not be decoded
//! ([`FetchError::Decode`]), or the backend answered but refused ([`FetchError::Application`]).
//! [`FetchError::ViewClosed`] is raised by the services themselves, never by an adapter.
//! Adapters classify their client errors into these variants; the UI only ever shows the
//! rendered message.

use crate::action::ServerAction;
use crate::server::ServerKind;

/// Failure of a single request against the dashboard API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network failure, timeout or refused connection.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The backend answered with `success: false` or a non-2xx status.
    #[error("{0}")]
    Application(String),

    /// The view owning the session was torn down; nothing was requested.
    #[error("dashboard view is closed")]
    ViewClosed,
}

impl FetchError {
    /// Application error for a well-formed body carrying `success: false`.
    #[must_use]
    pub fn rejected(endpoint: &str) -> Self {
        Self::Application(format!("{endpoint} reported failure"))
    }
}

/// Failure of a start/stop command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Another action is still in flight; only one runs at a time.
    #[error("cannot {action} {server} server: {pending} {pending_server} server is still in progress")]
    Busy {
        server: ServerKind,
        action: ServerAction,
        pending_server: ServerKind,
        pending: ServerAction,
    },

    /// The dashboard view that issued the action has been torn down.
    #[error("dashboard view is closed")]
    ViewClosed,

    /// The command request itself failed.
    #[error("failed to {action} {server} server: {source}")]
    Request {
        server: ServerKind,
        action: ServerAction,
        #[source]
        source: FetchError,
    },
}
