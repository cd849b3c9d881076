//! Start/stop commands sent to a managed server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::server::{ServerKind, ServerState};

/// Command applied to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerAction {
    Start,
    Stop,
}

impl ServerAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// The action a power button offers for a server in the given state.
    #[must_use]
    pub fn toggle_for(state: &ServerState) -> Self {
        if state.is_running() {
            Self::Stop
        } else {
            Self::Start
        }
    }

    /// Request path, e.g. `/api/start/gpu`.
    #[must_use]
    pub fn path(self, server: ServerKind) -> String {
        format!("/api/{}/{}", self.as_str(), server.as_str())
    }
}

impl fmt::Display for ServerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action `{0}` (expected `start` or `stop`)")]
pub struct UnknownAction(pub String);

impl FromStr for ServerAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Body of `POST /api/{action}/{server}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    /// Command stdout, informational only.
    #[serde(default)]
    pub output: Option<String>,
}
